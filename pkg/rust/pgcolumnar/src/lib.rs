// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Column-major, typed buffers from PostgreSQL result sets.
//!
//! ```
//! use pgcolumnar::{MemoryResultSet, Oid, marshal};
//!
//! let rs = MemoryResultSet::builder()
//! 	.column("id", Oid::INT4)
//! 	.row([Some(7i32.to_be_bytes().to_vec())])
//! 	.row([None])
//! 	.build();
//!
//! let columns = marshal(&rs).unwrap();
//! assert_eq!(columns[0].values::<i32>(), Some(&[7, 0][..]));
//! assert!(columns[0].is_null(1));
//! ```

pub use pgcolumnar_column as column;
pub use pgcolumnar_column::{ColumnData, Columns, FixedBuffer, LayoutError, Native, PaddedBuffer, TypedBuffer, ValueRef, VarBuffer};
pub use pgcolumnar_marshal as marshal;
pub use pgcolumnar_marshal::{
	CopyWriter, Field, MarshalConfig, Marshaller, MemoryResultSet, MemoryResultSetBuilder, ResultSet, ResultSetError,
	WriteError, describe, marshal,
};
#[cfg(feature = "sub_tracing")]
pub use pgcolumnar_sub_tracing as tracing;
pub use pgcolumnar_type as r#type;
pub use pgcolumnar_type::{
	BitVec, ColumnDescriptor, Diagnostic, Format, IntoDiagnostic, MarshalError, Oid, Result, WireType,
};
