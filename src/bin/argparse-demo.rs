//! Print the lines of a file, optionally dumping the parsed arguments first.

use std::io;

use anyhow::Result;
use clap::Parser;

use pipe_demos::cli::DemoArgs;
use pipe_demos::listing;

fn main() -> Result<()> {
	env_logger::init();
	let args = DemoArgs::parse();
	log::debug!("{:?}", args);
	let mut output = io::stdout();
	listing::run(&args, &mut output)
}
