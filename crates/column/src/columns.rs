// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use pgcolumnar_type::ColumnDescriptor;
use serde::{Deserialize, Serialize};

use crate::{LayoutError, buffer::TypedBuffer};

/// The complete, column-major result of one marshalling call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColumns")]
pub struct Columns {
	row_count: usize,
	columns: Vec<TypedBuffer>,
}

#[derive(Deserialize)]
struct RawColumns {
	row_count: usize,
	columns: Vec<TypedBuffer>,
}

impl TryFrom<RawColumns> for Columns {
	type Error = LayoutError;

	fn try_from(raw: RawColumns) -> Result<Self, Self::Error> {
		Self::try_new(raw.row_count, raw.columns)
	}
}

impl Deref for Columns {
	type Target = [TypedBuffer];

	fn deref(&self) -> &Self::Target {
		&self.columns
	}
}

impl Index<usize> for Columns {
	type Output = TypedBuffer;

	fn index(&self, index: usize) -> &Self::Output {
		&self.columns[index]
	}
}

impl Columns {
	pub fn new(row_count: usize, columns: Vec<TypedBuffer>) -> Self {
		match Self::try_new(row_count, columns) {
			Ok(columns) => columns,
			Err(err) => panic!("{}", err),
		}
	}

	/// A result with no columns keeps its row count.
	pub fn try_new(row_count: usize, columns: Vec<TypedBuffer>) -> Result<Self, LayoutError> {
		if let Some(c) = columns.iter().find(|c| c.len() != row_count) {
			return Err(LayoutError::RowCount {
				column: c.name().to_string(),
				len: c.len(),
				row_count,
			});
		}
		Ok(Self {
			row_count,
			columns,
		})
	}

	pub fn row_count(&self) -> usize {
		self.row_count
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	/// First column called `name`; PostgreSQL allows duplicate output names.
	pub fn column(&self, name: &str) -> Option<&TypedBuffer> {
		self.columns.iter().find(|c| c.name() == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.columns.iter().map(|c| c.name())
	}

	pub fn descriptors(&self) -> impl Iterator<Item = &ColumnDescriptor> + '_ {
		self.columns.iter().map(|c| c.descriptor())
	}

	pub fn into_vec(self) -> Vec<TypedBuffer> {
		self.columns
	}
}

impl IntoIterator for Columns {
	type Item = TypedBuffer;
	type IntoIter = std::vec::IntoIter<TypedBuffer>;

	fn into_iter(self) -> Self::IntoIter {
		self.columns.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use pgcolumnar_type::{BitVec, Format, Oid, WireType};

	use super::*;
	use crate::data::ColumnData;

	fn column(name: &str, data: ColumnData) -> TypedBuffer {
		let rows = data.len();
		let wire_type = data.wire_type();
		let oid = match wire_type {
			WireType::Int4 => Oid::INT4,
			_ => Oid::TEXT,
		};
		TypedBuffer::new(ColumnDescriptor::new(name, oid, wire_type, Format::Binary, true), data, BitVec::new(rows, false))
	}

	#[test]
	fn test_lookup_by_name() {
		let columns = Columns::new(
			2,
			vec![column("id", ColumnData::int4([1, 2])), column("name", ColumnData::utf8(["a", "b"]))],
		);
		assert_eq!(columns.row_count(), 2);
		assert_eq!(columns.column_count(), 2);
		assert_eq!(columns.names().collect::<Vec<_>>(), vec!["id", "name"]);
		assert_eq!(columns.column("name").unwrap().var().unwrap().get_str(1), Some("b"));
		assert!(columns.column("missing").is_none());
		assert_eq!(columns[0].name(), "id");
	}

	#[test]
	fn test_duplicate_names_resolve_to_first() {
		let columns =
			Columns::new(1, vec![column("x", ColumnData::int4([1])), column("x", ColumnData::int4([2]))]);
		assert_eq!(columns.column("x").unwrap().values::<i32>(), Some(&[1][..]));
	}

	#[test]
	fn test_serde_roundtrip() {
		let columns = Columns::new(1, vec![column("id", ColumnData::int4([7]))]);
		let json = serde_json::to_string(&columns).unwrap();
		let back: Columns = serde_json::from_str(&json).unwrap();
		assert_eq!(back, columns);
	}

	#[test]
	#[should_panic(expected = "column 'id' has 2 rows, expected 3")]
	fn test_row_count_mismatch_panics() {
		Columns::new(3, vec![column("id", ColumnData::int4([1, 2]))]);
	}

	#[test]
	fn test_deserialize_validates_row_count() {
		let columns = Columns::new(2, vec![column("id", ColumnData::int4([1, 2]))]);
		let mut value = serde_json::to_value(&columns).unwrap();
		value["row_count"] = serde_json::json!(5);

		let err = serde_json::from_value::<Columns>(value).unwrap_err();
		assert!(err.to_string().contains("column 'id' has 2 rows, expected 5"), "{}", err);
	}

	#[test]
	fn test_no_columns_keeps_row_count() {
		let columns = Columns::try_new(4, vec![]).unwrap();
		assert_eq!(columns.row_count(), 4);
		assert_eq!(columns.column_count(), 0);
	}
}
