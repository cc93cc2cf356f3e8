//! Printing tables.

use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::ValueEnum;

use crate::types::{Cell, Table};

const MAX_PRECISION: usize = 6;
const LARGE_MAGNITUDE: f64 = 1e16;
const SMALL_MAGNITUDE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Aligned columns with the row index on the left
	Table,
	/// Comma separated, missing values left empty
	Csv,
}

/// Write Table
///
/// Write `table` to `wtr` (required trait bound `std::io::Write`) in the requested format.
pub fn write_table<W: Write>(wtr: &mut W, table: &Table, format: OutputFormat) -> Result<()> {
	let mut buffered = BufWriter::new(wtr);
	match format {
		OutputFormat::Table => write_aligned(&mut buffered, table)?,
		OutputFormat::Csv => write_csv(&mut buffered, table)?,
	}
	buffered.flush()?;
	Ok(())
}

/// Write Aligned
///
/// Every column is right aligned to its widest entry and separated from the previous one by two
/// spaces. The row index is left aligned in the first column, which has no header.
fn write_aligned<W: Write>(wtr: &mut W, table: &Table) -> Result<()> {
	if table.rows.is_empty() {
		let names: Vec<&str> = table.schema.names().collect();
		writeln!(wtr, "Empty DataFrame")?;
		writeln!(wtr, "Columns: [{}]", names.join(", "))?;
		writeln!(wtr, "Index: []")?;
		return Ok(());
	}

	let columns: Vec<Vec<String>> = (0..table.schema.len())
		.map(|i| format_column(table, i))
		.collect();
	let widths: Vec<usize> = table
		.schema
		.columns
		.iter()
		.zip(&columns)
		.map(|(column, cells)| {
			cells
				.iter()
				.map(|c| c.len())
				.chain(Some(column.name.len()))
				.max()
				.unwrap_or(0)
		})
		.collect();
	let indices: Vec<String> = table.rows.iter().map(|r| r.index.to_string()).collect();
	let index_width = indices.iter().map(|i| i.len()).max().unwrap_or(0);

	write!(wtr, "{:index_width$}", "")?;
	for (column, width) in table.schema.columns.iter().zip(&widths) {
		write!(wtr, "  {:>width$}", column.name)?;
	}
	writeln!(wtr)?;

	for (r, index) in indices.iter().enumerate() {
		write!(wtr, "{:<index_width$}", index)?;
		for (cells, width) in columns.iter().zip(&widths) {
			write!(wtr, "  {:>width$}", cells[r])?;
		}
		writeln!(wtr)?;
	}
	Ok(())
}

/// Format Column
///
/// Render column `i` of every row. A column flagged integral when it was read prints as
/// integers. Other numeric columns share one precision: the most decimals any of their numbers
/// needs, between 1 and 6. A column holding very large or very small magnitudes switches to
/// exponent notation instead. These thresholds approximate the pandas float formatter rather
/// than reproduce it.
fn format_column(table: &Table, i: usize) -> Vec<String> {
	if table.is_integral(i) {
		return table
			.rows
			.iter()
			.map(|row| match &row.cells[i] {
				Cell::Number(x) => format!("{:.0}", x),
				cell => format_other(cell),
			})
			.collect();
	}

	let numbers: Vec<f64> = table
		.rows
		.iter()
		.filter_map(|row| row.cells[i].as_number())
		.filter(|x| x.is_finite())
		.collect();
	let scientific = numbers
		.iter()
		.any(|x| x.abs() >= LARGE_MAGNITUDE || (*x != 0.0 && x.abs() < SMALL_MAGNITUDE));
	let precision = numbers
		.iter()
		.map(|x| decimals(*x))
		.max()
		.unwrap_or(1)
		.clamp(1, MAX_PRECISION);

	table
		.rows
		.iter()
		.map(|row| match &row.cells[i] {
			Cell::Number(x) if !x.is_finite() => x.to_string(),
			Cell::Number(x) if scientific => format_scientific(*x),
			Cell::Number(x) => format!("{:.precision$}", x),
			cell => format_other(cell),
		})
		.collect()
}

fn format_other(cell: &Cell) -> String {
	match cell {
		Cell::Number(x) => x.to_string(),
		Cell::Text(s) => s.clone(),
		Cell::Missing => "NaN".to_string(),
	}
}

/// Decimal places in the shortest representation of `x`.
fn decimals(x: f64) -> usize {
	let repr = x.abs().to_string();
	repr.split_once('.').map_or(0, |(_, frac)| frac.len())
}

/// `1.500000e+20` style, with a signed exponent of at least two digits.
fn format_scientific(x: f64) -> String {
	let repr = format!("{:.prec$e}", x, prec = MAX_PRECISION);
	match repr.split_once('e') {
		Some((mantissa, exponent)) => {
			let exponent: i32 = exponent.parse().unwrap_or(0);
			format!("{}e{}{:02}", mantissa, if exponent < 0 { '-' } else { '+' }, exponent.abs())
		}
		None => repr,
	}
}

fn write_csv<W: Write>(wtr: &mut W, table: &Table) -> Result<()> {
	let mut writer = csv::WriterBuilder::new()
		.has_headers(false)
		.from_writer(wtr);
	writer.write_record(table.schema.names())?;
	for row in table.rows.iter() {
		writer.serialize(&row.cells)?;
	}
	writer.flush()?;
	Ok(())
}
