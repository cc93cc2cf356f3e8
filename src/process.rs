//! Main table pipeline processing.

use std::io::{BufRead, BufReader, Read, Write};

use anyhow::{bail, Result};

use crate::output::{write_table, OutputFormat};
use crate::types::{Cell, ColumnKind, Row, RowIndex, Schema, Table};

/// Everything the pipeline needs besides its input and output streams.
#[derive(Debug, Clone)]
pub struct Config {
	pub schema: Schema,
	/// Column compared against `min`.
	pub column: String,
	pub min: f64,
	pub format: OutputFormat,
}

/// Run
///
/// Read a space delimited table from `input` (trait bound `std::io::Read`), keep rows whose
/// filter column is at least `config.min` and write the result to `output` (trait bound
/// `std::io::Write`).
pub fn run<R: Read, W: Write>(input: &mut R, output: &mut W, config: &Config) -> Result<()> {
	let table = read_table(input, &config.schema)?;
	let filtered = filter_min(table, &config.column, config.min)?;
	write_table(output, &filtered, config.format)
}

/// Read Table
///
/// Split `input` into lines and each line into fields on single spaces, coercing every field
/// according to its column in `schema`. Blank lines are skipped, though each row keeps the
/// index of the line it came from. A line whose field count differs from the number of columns
/// is an error.
pub fn read_table<R: Read>(input: &mut R, schema: &Schema) -> Result<Table> {
	let buffered = BufReader::new(input);
	let mut table = Table::new(schema.clone());
	for (index, line) in buffered.lines().enumerate() {
		let raw = line?;
		let line = raw.strip_suffix('\r').unwrap_or(&raw);
		if line.is_empty() {
			log::debug!("Skipping blank line {}", index + 1);
			continue;
		}
		table.rows.push(read_row(index, line, schema)?);
	}
	log::info!("Read {} rows of {} columns", table.rows.len(), schema.len());

	table.mark_integral();
	warn_empty_columns(&table);
	Ok(table)
}

/// Read Row
///
/// Split one non-blank line on single spaces. Consecutive spaces yield empty fields.
fn read_row(index: RowIndex, line: &str, schema: &Schema) -> Result<Row> {
	let fields: Vec<&str> = line.split(' ').collect();
	if fields.len() != schema.len() {
		bail!(
			"Line {} has {} fields but {} column names were given",
			index + 1,
			fields.len(),
			schema.len()
		);
	}
	let cells = fields
		.iter()
		.zip(&schema.columns)
		.map(|(field, column)| coerce(field, column.kind))
		.collect();
	Ok(Row { index, cells })
}

/// Coerce
///
/// Numeric fields are parsed as `f64`; anything unparseable (including an empty field or an
/// explicit NaN) becomes `Cell::Missing`. Text fields are kept as they are.
pub fn coerce(field: &str, kind: ColumnKind) -> Cell {
	match kind {
		ColumnKind::Text => Cell::Text(field.to_string()),
		ColumnKind::Numeric => match field.trim().parse::<f64>() {
			Ok(x) if !x.is_nan() => Cell::Number(x),
			_ => {
				log::debug!("Coerced '{}' to missing", field);
				Cell::Missing
			}
		},
	}
}

/// Filter Min
///
/// Keep only the rows whose `column` holds a number greater than or equal to `min`. Missing
/// values never pass. The column must exist and be numeric.
pub fn filter_min(mut table: Table, column: &str, min: f64) -> Result<Table> {
	let position = match table.schema.position(column) {
		Some(position) => position,
		None => bail!("Unknown filter column '{}'", column),
	};
	if table.schema.columns[position].kind != ColumnKind::Numeric {
		bail!("Filter column '{}' is not numeric", column);
	}

	let before = table.rows.len();
	table.rows.retain(|row| {
		let keep = row.cells[position].as_number().map_or(false, |x| x >= min);
		if !keep {
			log::debug!("Dropping row {} ({} < {} or missing)", row.index, column, min);
		}
		keep
	});
	log::info!("Kept {} of {} rows where {} >= {}", table.rows.len(), before, column, min);
	Ok(table)
}

fn warn_empty_columns(table: &Table) {
	if table.rows.is_empty() {
		return;
	}
	for (i, column) in table.schema.columns.iter().enumerate() {
		if column.kind == ColumnKind::Numeric && table.rows.iter().all(|r| r.cells[i].is_missing()) {
			log::warn!("Column '{}' has no numeric values", column.name);
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use rstest::*;

	#[fixture]
	fn schema() -> Schema {
		Schema::parse("age weight score").unwrap()
	}

	fn read(input: &str, schema: &Schema) -> Result<Table> {
		read_table(&mut input.as_bytes(), schema)
	}

	#[rstest]
	#[case("25", Cell::Number(25.0))]
	#[case(" 3.5", Cell::Number(3.5))]
	#[case("-1e2", Cell::Number(-100.0))]
	#[case("abc", Cell::Missing)]
	#[case("", Cell::Missing)]
	#[case("NaN", Cell::Missing)]
	fn coerce_numeric(#[case] field: &str, #[case] expected: Cell) {
		assert_eq!(coerce(field, ColumnKind::Numeric), expected);
	}

	#[rstest]
	fn coerce_text_keeps_field() {
		assert_eq!(coerce("abc", ColumnKind::Text), Cell::Text("abc".to_string()));
	}

	#[rstest]
	fn read_table_splits_rows_and_fields(schema: Schema) {
		let table = read("25 70 3\n12 abc 4\n", &schema).unwrap();
		assert_eq!(table.rows.len(), 2);
		assert_eq!(
			table.rows[1],
			Row {
				index: 1,
				cells: vec![Cell::Number(12.0), Cell::Missing, Cell::Number(4.0)],
			}
		);
	}

	#[rstest]
	fn trailing_newline_does_not_add_a_row(schema: Schema) {
		let with = read("25 70 3\n", &schema).unwrap();
		let without = read("25 70 3", &schema).unwrap();
		assert_eq!(with, without);
	}

	#[rstest]
	fn crlf_line_endings(schema: Schema) {
		let table = read("25 70 3\r\n30 80 1\r\n", &schema).unwrap();
		assert_eq!(table.rows.len(), 2);
		assert_eq!(table.rows[1].cells[2], Cell::Number(1.0));
	}

	#[rstest]
	fn numeric_columns_hold_no_strings(schema: Schema) {
		let table = read("x y z\n1 2 3\n", &schema).unwrap();
		for row in table.rows.iter() {
			assert!(row.cells.iter().all(|c| !matches!(c, Cell::Text(_))));
		}
	}

	#[rstest]
	#[case("25 70\n")]
	#[case("25 70 3 9\n")]
	#[case("25  70 3\n")]
	fn field_count_mismatch_is_an_error(schema: Schema, #[case] input: &str) {
		let err = read(input, &schema).unwrap_err();
		assert!(err.to_string().starts_with("Line 1 has"), "{}", err);
	}

	#[rstest]
	fn mismatch_reports_line_number(schema: Schema) {
		let err = read("25 70 3\n1 2\n", &schema).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Line 2 has 2 fields but 3 column names were given"
		);
	}

	#[rstest]
	fn text_columns_are_not_coerced() {
		let schema = Schema::parse("name:text age").unwrap();
		let table = read("bob 40\n", &schema).unwrap();
		assert_eq!(table.rows[0].cells[0], Cell::Text("bob".to_string()));
	}

	#[rstest]
	fn filter_keeps_adults(schema: Schema) {
		let table = read("25 70 3\n12 70 3\nabc 70 3\n18 60 2\n", &schema).unwrap();
		let filtered = filter_min(table, "age", 18.0).unwrap();
		let indices: Vec<_> = filtered.rows.iter().map(|r| r.index).collect();
		assert_eq!(indices, [0, 3]);
	}

	#[rstest]
	fn blank_lines_keep_later_indices(schema: Schema) {
		let table = read("25 70 3\n\n30 80 1\n", &schema).unwrap();
		let indices: Vec<_> = table.rows.iter().map(|r| r.index).collect();
		assert_eq!(indices, [0, 2]);

		let filtered = filter_min(table, "age", 18.0).unwrap();
		assert_eq!(filtered.rows[1].index, 2);
	}

	#[rstest]
	fn blank_line_is_not_a_field_count_error(schema: Schema) {
		assert!(read("\n25 70 3\n\n\n", &schema).is_ok());
	}

	#[rstest]
	fn all_missing_column_still_builds(schema: Schema) {
		let table = read("abc 70 3\nxyz 80 1\n", &schema).unwrap();
		assert_eq!(table.rows.len(), 2);
		assert!(table.rows.iter().all(|r| r.cells[0].is_missing()));
		assert!(!table.is_integral(0));
	}

	#[rstest]
	fn integral_flags_survive_filtering(schema: Schema) {
		let table = read("25 70 3\nabc 70.5 3\n", &schema).unwrap();
		let filtered = filter_min(table, "age", 18.0).unwrap();
		assert_eq!(filtered.rows.len(), 1);
		assert_eq!(filtered.integral, [false, false, true]);
	}

	#[rstest]
	fn filter_on_unknown_column_fails(schema: Schema) {
		let table = read("25 70 3\n", &schema).unwrap();
		assert!(filter_min(table, "height", 18.0).is_err());
	}

	#[rstest]
	fn filter_on_text_column_fails() {
		let schema = Schema::parse("age:text").unwrap();
		let table = read("25\n", &schema).unwrap();
		assert!(filter_min(table, "age", 18.0).is_err());
	}
}
