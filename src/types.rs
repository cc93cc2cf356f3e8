//! Global type definitions.

use serde::{Deserialize, Serialize, Serializer};

/// Whole numbers at or above this are printed as floats.
const INTEGRAL_LIMIT: f64 = 1e16;

/// 0-based position of a row in the input.
pub type RowIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
	Numeric,
	Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	pub name: String,
	pub kind: ColumnKind,
}

/// Ordered column names and their expected kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
	pub columns: Vec<Column>,
}

/// A single table value. Numeric fields that fail to parse become `Missing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
	Number(f64),
	Text(String),
	Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
	pub index: RowIndex,
	pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	pub schema: Schema,
	pub rows: Vec<Row>,
	/// Per column: numeric, whole numbers only and nothing missing. Taken over every row read,
	/// so it does not change when rows are filtered out.
	pub integral: Vec<bool>,
}

impl Column {
	pub fn new(name: &str, kind: ColumnKind) -> Self {
		Self {
			name: name.to_string(),
			kind,
		}
	}
}

impl Schema {
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// Position of the column called `name`, if any.
	pub fn position(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.name == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().map(|c| c.name.as_str())
	}
}

impl Cell {
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Cell::Number(x) => Some(*x),
			_ => None,
		}
	}

	pub fn is_missing(&self) -> bool {
		matches!(self, Cell::Missing)
	}
}

/// Missing cells serialize as `None`, which the CSV writer turns into an empty field.
impl Serialize for Cell {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Cell::Number(x) => serializer.serialize_f64(*x),
			Cell::Text(s) => serializer.serialize_str(s),
			Cell::Missing => serializer.serialize_none(),
		}
	}
}

impl Table {
	pub fn new(schema: Schema) -> Self {
		Self {
			schema,
			rows: Vec::new(),
			integral: Vec::new(),
		}
	}

	/// Recompute `integral` from the current rows.
	pub fn mark_integral(&mut self) {
		self.integral = (0..self.schema.len())
			.map(|i| {
				self.schema.columns[i].kind == ColumnKind::Numeric
					&& self.rows.iter().all(|row| match row.cells[i] {
						Cell::Number(x) => x.fract() == 0.0 && x.abs() < INTEGRAL_LIMIT,
						_ => false,
					})
			})
			.collect();
	}

	/// Whether column `i` prints as whole numbers.
	pub fn is_integral(&self, i: usize) -> bool {
		self.integral.get(i).copied().unwrap_or(false)
	}
}
