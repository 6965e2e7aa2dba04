// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::TryReserveError;

use pgcolumnar_type::WireType;
use serde::{Deserialize, Serialize};

use crate::{fixed::FixedBuffer, var::VarBuffer};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
	Int2(FixedBuffer<i16>),
	Int4(FixedBuffer<i32>),
	Int8(FixedBuffer<i64>),
	Float4(FixedBuffer<f32>),
	Float8(FixedBuffer<f64>),
	Boolean(FixedBuffer<bool>),
	Utf8(VarBuffer),
	Blob(VarBuffer),
}

impl ColumnData {
	/// Empty storage for `rows` values of `wire_type`.
	///
	/// Fixed-width storage is reserved exactly; variable-length storage gets
	/// its offsets reserved and `var_bytes` of pool.
	pub fn try_with_capacity(wire_type: WireType, rows: usize, var_bytes: usize) -> Result<Self, TryReserveError> {
		Ok(match wire_type {
			WireType::Int2 => ColumnData::Int2(FixedBuffer::try_with_capacity(rows)?),
			WireType::Int4 => ColumnData::Int4(FixedBuffer::try_with_capacity(rows)?),
			WireType::Int8 => ColumnData::Int8(FixedBuffer::try_with_capacity(rows)?),
			WireType::Float4 => ColumnData::Float4(FixedBuffer::try_with_capacity(rows)?),
			WireType::Float8 => ColumnData::Float8(FixedBuffer::try_with_capacity(rows)?),
			WireType::Boolean => ColumnData::Boolean(FixedBuffer::try_with_capacity(rows)?),
			WireType::Utf8 => ColumnData::Utf8(VarBuffer::try_with_capacity(rows, var_bytes)?),
			WireType::Blob => ColumnData::Blob(VarBuffer::try_with_capacity(rows, var_bytes)?),
		})
	}

	pub fn int2(values: impl IntoIterator<Item = i16>) -> Self {
		ColumnData::Int2(FixedBuffer::new(values.into_iter().collect()))
	}

	pub fn int4(values: impl IntoIterator<Item = i32>) -> Self {
		ColumnData::Int4(FixedBuffer::new(values.into_iter().collect()))
	}

	pub fn int8(values: impl IntoIterator<Item = i64>) -> Self {
		ColumnData::Int8(FixedBuffer::new(values.into_iter().collect()))
	}

	pub fn float4(values: impl IntoIterator<Item = f32>) -> Self {
		ColumnData::Float4(FixedBuffer::new(values.into_iter().collect()))
	}

	pub fn float8(values: impl IntoIterator<Item = f64>) -> Self {
		ColumnData::Float8(FixedBuffer::new(values.into_iter().collect()))
	}

	pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
		ColumnData::Boolean(FixedBuffer::new(values.into_iter().collect()))
	}

	pub fn utf8<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
		let mut buffer = VarBuffer::new();
		for value in values {
			buffer.push(value.as_bytes());
		}
		ColumnData::Utf8(buffer)
	}

	pub fn blob<'a>(values: impl IntoIterator<Item = &'a [u8]>) -> Self {
		let mut buffer = VarBuffer::new();
		for value in values {
			buffer.push(value);
		}
		ColumnData::Blob(buffer)
	}

	pub fn wire_type(&self) -> WireType {
		match self {
			ColumnData::Int2(_) => WireType::Int2,
			ColumnData::Int4(_) => WireType::Int4,
			ColumnData::Int8(_) => WireType::Int8,
			ColumnData::Float4(_) => WireType::Float4,
			ColumnData::Float8(_) => WireType::Float8,
			ColumnData::Boolean(_) => WireType::Boolean,
			ColumnData::Utf8(_) => WireType::Utf8,
			ColumnData::Blob(_) => WireType::Blob,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnData::Int2(b) => b.len(),
			ColumnData::Int4(b) => b.len(),
			ColumnData::Int8(b) => b.len(),
			ColumnData::Float4(b) => b.len(),
			ColumnData::Float8(b) => b.len(),
			ColumnData::Boolean(b) => b.len(),
			ColumnData::Utf8(b) | ColumnData::Blob(b) => b.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Appends the sentinel of a NULL row.
	pub fn push_null(&mut self) {
		match self {
			ColumnData::Int2(b) => b.push_default(),
			ColumnData::Int4(b) => b.push_default(),
			ColumnData::Int8(b) => b.push_default(),
			ColumnData::Float4(b) => b.push_default(),
			ColumnData::Float8(b) => b.push_default(),
			ColumnData::Boolean(b) => b.push_default(),
			ColumnData::Utf8(b) | ColumnData::Blob(b) => b.push_empty(),
		}
	}

	pub fn as_var(&self) -> Option<&VarBuffer> {
		match self {
			ColumnData::Utf8(b) | ColumnData::Blob(b) => Some(b),
			_ => None,
		}
	}

	/// Byte image of the column: native-endian elements for fixed-width
	/// columns, offsets (native-endian `u64`) followed by the pool otherwise.
	pub fn to_bytes(&self) -> Vec<u8> {
		match self {
			ColumnData::Int2(b) => b.to_bytes(),
			ColumnData::Int4(b) => b.to_bytes(),
			ColumnData::Int8(b) => b.to_bytes(),
			ColumnData::Float4(b) => b.to_bytes(),
			ColumnData::Float8(b) => b.to_bytes(),
			ColumnData::Boolean(b) => b.to_bytes(),
			ColumnData::Utf8(b) | ColumnData::Blob(b) => {
				let mut out = Vec::with_capacity(b.offsets().len() * 8 + b.data().len());
				for offset in b.offsets() {
					out.extend_from_slice(&offset.to_ne_bytes());
				}
				out.extend_from_slice(b.data());
				out
			}
		}
	}
}
