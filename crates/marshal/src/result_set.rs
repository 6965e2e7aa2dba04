// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pgcolumnar_type::{Format, Oid};

/// Failure reported by the client library while reading a result set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResultSetError {
	/// The cursor was closed or the connection dropped.
	#[error("result set closed: {0}")]
	Closed(String),

	/// The handle no longer has the requested field.
	#[error("field ({row}, {column}) out of range")]
	OutOfRange {
		row: usize,
		column: usize,
	},
}

/// A single field as delivered by the client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<'a> {
	/// Type the client reports for this value at read time.
	pub oid: Oid,
	/// Raw value in the column's transfer format, `None` for SQL NULL.
	pub value: Option<&'a [u8]>,
}

impl<'a> Field<'a> {
	pub fn new(oid: Oid, value: Option<&'a [u8]>) -> Self {
		Self {
			oid,
			value,
		}
	}

	pub fn null(oid: Oid) -> Self {
		Self {
			oid,
			value: None,
		}
	}

	pub fn is_null(&self) -> bool {
		self.value.is_none()
	}
}

/// Read-only view of a completed query's result, owned by the client library.
///
/// Mirrors the accessors of libpq's `PGresult`: column metadata by index and
/// fields by `(row, column)`. The view is only valid while the originating
/// query execution is; implementations report invalidation through
/// [`ResultSetError::Closed`] or by returning `false` from
/// [`ResultSet::is_valid`].
pub trait ResultSet {
	fn row_count(&self) -> usize;

	fn column_count(&self) -> usize;

	fn column_name(&self, column: usize) -> Result<&str, ResultSetError>;

	fn column_oid(&self, column: usize) -> Result<Oid, ResultSetError>;

	fn column_format(&self, _column: usize) -> Result<Format, ResultSetError> {
		Ok(Format::Binary)
	}

	/// PostgreSQL does not report nullability with a result, so by default every column may hold NULL.
	fn column_nullable(&self, _column: usize) -> Result<bool, ResultSetError> {
		Ok(true)
	}

	fn field(&self, row: usize, column: usize) -> Result<Field<'_>, ResultSetError>;

	fn is_valid(&self) -> bool {
		true
	}
}

impl<R: ResultSet + ?Sized> ResultSet for &R {
	fn row_count(&self) -> usize {
		(**self).row_count()
	}

	fn column_count(&self) -> usize {
		(**self).column_count()
	}

	fn column_name(&self, column: usize) -> Result<&str, ResultSetError> {
		(**self).column_name(column)
	}

	fn column_oid(&self, column: usize) -> Result<Oid, ResultSetError> {
		(**self).column_oid(column)
	}

	fn column_format(&self, column: usize) -> Result<Format, ResultSetError> {
		(**self).column_format(column)
	}

	fn column_nullable(&self, column: usize) -> Result<bool, ResultSetError> {
		(**self).column_nullable(column)
	}

	fn field(&self, row: usize, column: usize) -> Result<Field<'_>, ResultSetError> {
		(**self).field(row, column)
	}

	fn is_valid(&self) -> bool {
		(**self).is_valid()
	}
}
