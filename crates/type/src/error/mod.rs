// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod diagnostic;

pub use diagnostic::{Diagnostic, IntoDiagnostic};

use crate::wire::{Oid, WireType};

/// Errors raised while turning a result set into typed buffers.
///
/// All of them are fatal for the call that raised them: no partial output is
/// ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarshalError {
	#[error("Column '{column}' has unsupported type {oid}")]
	UnsupportedType {
		column: String,
		oid: Oid,
	},

	#[error("Result set is no longer valid: {reason}")]
	StaleResultSet {
		reason: String,
	},

	#[error("Failed to allocate buffers for {rows} rows of column '{column}'")]
	AllocationFailure {
		column: String,
		rows: usize,
	},

	#[error("Column '{column}' declared as {expected} but {reason}")]
	TypeMismatch {
		column: String,
		expected: WireType,
		row: Option<usize>,
		reason: String,
	},
}

impl MarshalError {
	pub fn unsupported_type(column: impl Into<String>, oid: Oid) -> Self {
		MarshalError::UnsupportedType {
			column: column.into(),
			oid,
		}
	}

	pub fn stale(reason: impl Into<String>) -> Self {
		MarshalError::StaleResultSet {
			reason: reason.into(),
		}
	}

	pub fn allocation_failure(column: impl Into<String>, rows: usize) -> Self {
		MarshalError::AllocationFailure {
			column: column.into(),
			rows,
		}
	}

	pub fn type_mismatch(
		column: impl Into<String>,
		expected: WireType,
		row: Option<usize>,
		reason: impl Into<String>,
	) -> Self {
		MarshalError::TypeMismatch {
			column: column.into(),
			expected,
			row,
			reason: reason.into(),
		}
	}

	/// Stable machine-readable code of this error.
	pub fn code(&self) -> &'static str {
		match self {
			MarshalError::UnsupportedType {
				..
			} => "MARSHAL_001",
			MarshalError::StaleResultSet {
				..
			} => "MARSHAL_002",
			MarshalError::AllocationFailure {
				..
			} => "MARSHAL_003",
			MarshalError::TypeMismatch {
				..
			} => "MARSHAL_004",
		}
	}
}

impl IntoDiagnostic for MarshalError {
	fn into_diagnostic(self) -> Diagnostic {
		let code = self.code().to_string();
		let message = self.to_string();
		match self {
			MarshalError::UnsupportedType {
				column,
				oid,
			} => Diagnostic {
				code,
				message,
				column: Some(column),
				row: None,
				help: Some("Cast the column to a supported type in the query, e.g. 'SELECT amount::float8'"
					.to_string()),
				notes: vec![
					format!("type tag reported by the client: {}", oid.0),
					"supported types: bool, int2, int4, int8, float4, float8, text, varchar, bpchar, name, char, bytea".to_string(),
					"no buffers were produced for any column".to_string(),
				],
			},
			MarshalError::StaleResultSet {
				..
			} => Diagnostic {
				code,
				message,
				column: None,
				row: None,
				help: Some("Re-execute the query; the cursor or connection was closed while reading".to_string()),
				notes: vec!["no buffers were produced for any column".to_string()],
			},
			MarshalError::AllocationFailure {
				column,
				..
			} => Diagnostic {
				code,
				message,
				column: Some(column),
				row: None,
				help: Some("Reduce the result size, e.g. with LIMIT or by selecting fewer columns".to_string()),
				notes: vec!["buffers already allocated for earlier columns were released".to_string()],
			},
			MarshalError::TypeMismatch {
				column,
				expected,
				row,
				..
			} => Diagnostic {
				code,
				message,
				column: Some(column),
				row,
				help: None,
				notes: vec![format!("the column was described as {}", expected)],
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_messages() {
		let err = MarshalError::unsupported_type("amount", Oid(1700));
		assert_eq!(err.to_string(), "Column 'amount' has unsupported type oid 1700");

		let err = MarshalError::stale("connection dropped");
		assert_eq!(err.to_string(), "Result set is no longer valid: connection dropped");

		let err = MarshalError::type_mismatch("id", WireType::Int4, Some(2), "value is 3 bytes long");
		assert_eq!(err.to_string(), "Column 'id' declared as INT4 but value is 3 bytes long");
	}

	#[test]
	fn test_error_codes() {
		assert_eq!(MarshalError::unsupported_type("a", Oid(0)).code(), "MARSHAL_001");
		assert_eq!(MarshalError::stale("x").code(), "MARSHAL_002");
		assert_eq!(MarshalError::allocation_failure("a", 8).code(), "MARSHAL_003");
		assert_eq!(MarshalError::type_mismatch("a", WireType::Int2, None, "x").code(), "MARSHAL_004");
	}

	#[test]
	fn test_into_diagnostic() {
		let diagnostic = MarshalError::type_mismatch("id", WireType::Int8, Some(7), "value is 4 bytes long")
			.into_diagnostic();
		assert_eq!(diagnostic.code, "MARSHAL_004");
		assert_eq!(diagnostic.column.as_deref(), Some("id"));
		assert_eq!(diagnostic.row, Some(7));
		assert_eq!(diagnostic.notes, vec!["the column was described as INT8".to_string()]);
	}
}
