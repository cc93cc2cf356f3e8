//! Read a table from stdin, keep rows at or above a minimum and print the result.

use std::io;

use anyhow::Result;
use clap::Parser;

use pipe_demos::cli::PipeArgs;
use pipe_demos::process;

fn main() -> Result<()> {
	env_logger::init();
	let args = PipeArgs::parse();
	let config = args.config()?;
	let mut input = io::stdin();
	let mut output = io::stdout();
	process::run(&mut input, &mut output, &config)
}
