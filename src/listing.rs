//! Printing the lines of a file named on the command line.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::DemoArgs;

static NO_FILENAME_MSG: &str = "No filename provided - please try again.";

/// Run
///
/// Optionally dump `args`, then write every line of `args.filename` to `output` as a single
/// list. An empty filename writes a message instead of opening anything.
pub fn run<W: Write>(args: &DemoArgs, output: &mut W) -> Result<()> {
	let mut buffered = BufWriter::new(output);
	if args.verbose {
		writeln!(buffered, "INFO: User set the verbose flag")?;
		writeln!(buffered, "{:?}", args)?;
		writeln!(buffered)?;
	}

	if !args.filename.is_empty() {
		let lines = read_lines(&args.filename)?;
		log::debug!("Read {} lines from '{}'", lines.len(), args.filename);
		writeln!(buffered, "{:?}", lines)?;
	} else {
		writeln!(buffered, "{}", NO_FILENAME_MSG)?;
	}
	buffered.flush()?;
	Ok(())
}

/// Read Lines
///
/// Every line of the file at `path` in order, each keeping its line terminator.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
	let path = path.as_ref();
	let file = File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
	let mut reader = BufReader::new(file);
	let mut lines = Vec::new();
	loop {
		let mut line = String::new();
		if reader.read_line(&mut line)? == 0 {
			break;
		}
		lines.push(line);
	}
	Ok(lines)
}
