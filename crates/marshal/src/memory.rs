// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! An owned, in-memory [`ResultSet`].
//!
//! Useful for staging rows from any client that can hand out raw field values
//! in PostgreSQL's binary or text transfer format.

use std::{
	collections::HashMap,
	sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use pgcolumnar_type::{Format, Oid};

use crate::result_set::{Field, ResultSet, ResultSetError};

#[derive(Debug, Clone)]
struct MemoryColumn {
	name: String,
	oid: Oid,
	format: Format,
	nullable: bool,
}

#[derive(Debug)]
pub struct MemoryResultSet {
	columns: Vec<MemoryColumn>,
	rows: Vec<Vec<Option<Vec<u8>>>>,
	reported: HashMap<(usize, usize), Oid>,
	reads_left: Option<AtomicUsize>,
	closed: AtomicBool,
}

impl MemoryResultSet {
	pub fn builder() -> MemoryResultSetBuilder {
		MemoryResultSetBuilder::default()
	}

	/// Invalidates the handle; every later read fails with [`ResultSetError::Closed`].
	pub fn close(&self) {
		self.closed.store(true, Ordering::SeqCst);
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	fn consume_read(&self) -> Result<(), ResultSetError> {
		if self.is_closed() {
			return Err(ResultSetError::Closed("result set was cleared".to_string()));
		}
		if let Some(reads_left) = &self.reads_left {
			let granted = reads_left.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)).is_ok();
			if !granted {
				self.close();
				return Err(ResultSetError::Closed("connection dropped".to_string()));
			}
		}
		Ok(())
	}

	fn column(&self, column: usize) -> Result<&MemoryColumn, ResultSetError> {
		self.columns.get(column).ok_or(ResultSetError::OutOfRange {
			row: 0,
			column,
		})
	}
}

impl ResultSet for MemoryResultSet {
	fn row_count(&self) -> usize {
		self.rows.len()
	}

	fn column_count(&self) -> usize {
		self.columns.len()
	}

	fn column_name(&self, column: usize) -> Result<&str, ResultSetError> {
		Ok(&self.column(column)?.name)
	}

	fn column_oid(&self, column: usize) -> Result<Oid, ResultSetError> {
		Ok(self.column(column)?.oid)
	}

	fn column_format(&self, column: usize) -> Result<Format, ResultSetError> {
		Ok(self.column(column)?.format)
	}

	fn column_nullable(&self, column: usize) -> Result<bool, ResultSetError> {
		Ok(self.column(column)?.nullable)
	}

	fn field(&self, row: usize, column: usize) -> Result<Field<'_>, ResultSetError> {
		self.consume_read()?;
		let value = self.rows.get(row).and_then(|r| r.get(column)).ok_or(ResultSetError::OutOfRange {
			row,
			column,
		})?;
		let oid = match self.reported.get(&(row, column)) {
			Some(oid) => *oid,
			None => self.columns[column].oid,
		};
		Ok(Field::new(oid, value.as_deref()))
	}

	fn is_valid(&self) -> bool {
		!self.is_closed()
	}
}

#[derive(Debug, Default)]
pub struct MemoryResultSetBuilder {
	columns: Vec<MemoryColumn>,
	rows: Vec<Vec<Option<Vec<u8>>>>,
	reported: HashMap<(usize, usize), Oid>,
	close_after: Option<usize>,
}

impl MemoryResultSetBuilder {
	/// Adds a nullable column delivered in binary format.
	pub fn column(self, name: impl Into<String>, oid: Oid) -> Self {
		self.column_with(name, oid, Format::Binary, true)
	}

	pub fn column_with(mut self, name: impl Into<String>, oid: Oid, format: Format, nullable: bool) -> Self {
		self.columns.push(MemoryColumn {
			name: name.into(),
			oid,
			format,
			nullable,
		});
		self
	}

	pub fn row(mut self, values: impl IntoIterator<Item = Option<Vec<u8>>>) -> Self {
		self.rows.push(values.into_iter().collect());
		self
	}

	pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Option<Vec<u8>>>>) -> Self {
		self.rows.extend(rows);
		self
	}

	/// Makes the field at `(row, column)` report `oid` instead of the column's type.
	pub fn report_oid(mut self, row: usize, column: usize, oid: Oid) -> Self {
		self.reported.insert((row, column), oid);
		self
	}

	/// Drops the simulated connection once `reads` fields have been read.
	pub fn close_after(mut self, reads: usize) -> Self {
		self.close_after = Some(reads);
		self
	}

	pub fn build(self) -> MemoryResultSet {
		let width = self.columns.len();
		for (idx, row) in self.rows.iter().enumerate() {
			assert_eq!(row.len(), width, "row {} has {} fields, expected {}", idx, row.len(), width);
		}
		MemoryResultSet {
			columns: self.columns,
			rows: self.rows,
			reported: self.reported,
			reads_left: self.close_after.map(AtomicUsize::new),
			closed: AtomicBool::new(false),
		}
	}
}
