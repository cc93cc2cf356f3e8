//! Command line arguments for both binaries.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::output::OutputFormat;
use crate::process::Config;
use crate::schema::load_schema;

/// Demonstrates basic command line argument parsing
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "argparse-demo", version, long_about = None)]
pub struct DemoArgs {
	/// Name of the file that will be loaded
	#[arg(short, long, default_value = "myfile1.txt")]
	pub filename: String,
	/// Print the arguments to the screen for informational purposes
	#[arg(short, long)]
	pub verbose: bool,
}

/// Filter a space delimited table read from stdin by a minimum value
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "pipe-demo", version, long_about = None)]
pub struct PipeArgs {
	/// File holding the space separated column names, optionally annotated as `name:text`
	#[arg(short, long, default_value = "diabetes_colnames.csv")]
	pub colnames: PathBuf,
	/// Column compared against the minimum
	#[arg(long, default_value = "age")]
	pub column: String,
	/// Smallest value of the filter column that is kept
	#[arg(long, default_value_t = 18.0)]
	pub min: f64,
	/// Output format
	#[arg(long, value_enum, default_value_t = OutputFormat::Table)]
	pub format: OutputFormat,
}

impl PipeArgs {
	/// Load the side file and build the pipeline configuration.
	pub fn config(&self) -> Result<Config> {
		Ok(Config {
			schema: load_schema(&self.colnames)?,
			column: self.column.clone(),
			min: self.min,
			format: self.format,
		})
	}
}
