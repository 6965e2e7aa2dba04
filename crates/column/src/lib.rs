// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Column buffers handed to numeric-array runtimes.
//!
//! Fixed-width types (`int2`, `int4`, `int8`, `float4`, `float8`, `bool`) are
//! stored as a contiguous [`FixedBuffer`]; `text` and `bytea` are stored
//! offset-indexed in a [`VarBuffer`]. Each [`TypedBuffer`] pairs one of those
//! with a null [`BitVec`](pgcolumnar_type::BitVec) of the same length.

mod buffer;
mod columns;
mod data;
mod error;
mod fixed;
mod var;

pub use buffer::{TypedBuffer, ValueRef};
pub use columns::Columns;
pub use data::ColumnData;
pub use error::LayoutError;
pub use fixed::{FixedBuffer, Native};
pub use var::{PaddedBuffer, VarBuffer};
