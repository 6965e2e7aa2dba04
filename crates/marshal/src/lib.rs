// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Result-set-to-array marshalling.
//!
//! A [`ResultSet`] is the database client's borrowed view of a completed
//! query. The [`Marshaller`] walks it once, column by column, and produces a
//! [`Columns`](pgcolumnar_column::Columns) value owning one typed buffer per
//! column. Marshalling is all-or-nothing: any error discards every buffer
//! produced by the call.
//!
//! Text columns are assumed to arrive in UTF-8; converting from another client
//! encoding is the client library's job.

pub mod config;
pub mod copy;
mod decode;
pub mod marshaller;
pub mod memory;
pub mod result_set;

pub use config::MarshalConfig;
pub use copy::{CopyWriter, WriteError};
pub use marshaller::{Marshaller, describe, marshal};
pub use memory::{MemoryResultSet, MemoryResultSetBuilder};
pub use result_set::{Field, ResultSet, ResultSetError};
