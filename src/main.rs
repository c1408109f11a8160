//! read-back-lines - print the lines of a file, last line first.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use read_back_lines::{Encoding, ReadBackLines, DEFAULT_CHUNK_SIZE};

fn main() -> Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let stdout = io::stdout();
    run(&matches, BufWriter::new(stdout.lock()))
}

fn cli() -> Command {
    Command::new("read-back-lines")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints the lines of a file in reverse order without loading the whole file")
        .arg(
            Arg::new("file")
                .help("Path to the file to read back")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("chunk-size")
                .short('c')
                .long("chunk-size")
                .help("Bytes per read [default: 8192]")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("encoding")
                .short('e')
                .long("encoding")
                .help("Encoding of the file: utf-8, ascii or latin-1")
                .default_value("utf-8"),
        )
        .arg(
            Arg::new("lines")
                .short('n')
                .long("lines")
                .help("Stop after this many lines")
                .value_parser(value_parser!(usize)),
        )
}

#[derive(Debug, PartialEq)]
struct Options {
    path: PathBuf,
    chunk_size: usize,
    encoding: Encoding,
    limit: Option<usize>,
}

impl Options {
    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let path = matches
            .get_one::<PathBuf>("file")
            .context("missing file argument")?
            .clone();
        let chunk_size = matches
            .get_one::<usize>("chunk-size")
            .copied()
            .unwrap_or(DEFAULT_CHUNK_SIZE);
        let encoding = matches
            .get_one::<String>("encoding")
            .context("missing encoding")?
            .parse::<Encoding>()?;
        let limit = matches.get_one::<usize>("lines").copied();

        Ok(Self {
            path,
            chunk_size,
            encoding,
            limit,
        })
    }
}

fn run<W: Write>(matches: &ArgMatches, out: W) -> Result<()> {
    let options = Options::from_matches(matches)?;
    let path = &options.path;

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let lines = ReadBackLines::with_chunk_size(options.chunk_size, file, options.encoding)
        .with_context(|| format!("failed to read {}", path.display()))?;

    print_lines(lines, options.limit, out)
}

/// Writes at most `limit` lines to `out`, one per line. Lines past the limit are never read.
fn print_lines<W: Write>(
    lines: impl Iterator<Item = read_back_lines::Result<String>>,
    limit: Option<usize>,
    mut out: W,
) -> Result<()> {
    for (index, line) in lines.take(limit.unwrap_or(usize::MAX)).enumerate() {
        let line = line.with_context(|| format!("failed to read line {} from the end", index + 1))?;
        writeln!(out, "{line}")?;
    }

    out.flush()?;
    Ok(())
}
