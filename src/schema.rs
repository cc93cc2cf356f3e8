//! Loading column names from the side file.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::IntoDeserializer;
use serde::Deserialize;

use crate::types::{Column, ColumnKind, Schema};

/// Load Schema
///
/// Read the side file at `path` and parse its contents with `Schema::parse`.
pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Schema> {
	let path = path.as_ref();
	let text = fs::read_to_string(path)
		.with_context(|| format!("Failed to read column names from '{}'", path.display()))?;
	let schema = Schema::parse(&text)?;
	log::debug!("Loaded {} column names from '{}'", schema.len(), path.display());
	Ok(schema)
}

impl Schema {
	/// Parse whitespace separated column names. Each token is either `name` (a numeric column)
	/// or `name:kind` where kind is `numeric` or `text`.
	pub fn parse(text: &str) -> Result<Self> {
		let mut seen = HashSet::new();
		let mut columns = Vec::new();
		for token in text.split_whitespace() {
			let column = parse_column(token)?;
			if !seen.insert(column.name.clone()) {
				bail!("Duplicate column name '{}'", column.name);
			}
			columns.push(column);
		}
		if columns.is_empty() {
			bail!("No column names provided");
		}
		Ok(Self { columns })
	}
}

fn parse_column(token: &str) -> Result<Column> {
	let (name, kind) = match token.split_once(':') {
		Some((name, kind)) => (name, parse_kind(kind)?),
		None => (token, ColumnKind::Numeric),
	};
	if name.is_empty() {
		bail!("Empty column name in '{}'", token);
	}
	Ok(Column::new(name, kind))
}

fn parse_kind(kind: &str) -> Result<ColumnKind> {
	let de: StrDeserializer<ValueError> = kind.into_deserializer();
	ColumnKind::deserialize(de).map_err(|e| anyhow!("Invalid column kind '{}': {}", kind, e))
}
