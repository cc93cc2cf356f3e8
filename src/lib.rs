//! Two small command line utilities: `argparse-demo` prints the lines of a file named on the
//! command line, `pipe-demo` filters a space delimited table read from stdin.

pub mod cli;
pub mod listing;
pub mod output;
pub mod process;
pub mod schema;
pub mod types;
