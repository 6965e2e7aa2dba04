// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use pgcolumnar_type::{BitVec, ColumnDescriptor};
use serde::{Deserialize, Serialize};

use crate::{
	data::ColumnData,
	error::LayoutError,
	fixed::{FixedBuffer, Native},
	var::VarBuffer,
};

/// One marshalled column: its descriptor, its values and its null mask.
///
/// `data.len() == nulls.len()` always holds. Where the null bit of a row is
/// set, the value slot holds a sentinel (zero or an empty span).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTypedBuffer")]
pub struct TypedBuffer {
	descriptor: ColumnDescriptor,
	data: ColumnData,
	nulls: BitVec,
}

#[derive(Deserialize)]
struct RawTypedBuffer {
	descriptor: ColumnDescriptor,
	data: ColumnData,
	nulls: BitVec,
}

impl TryFrom<RawTypedBuffer> for TypedBuffer {
	type Error = LayoutError;

	fn try_from(raw: RawTypedBuffer) -> Result<Self, Self::Error> {
		TypedBuffer::try_new(raw.descriptor, raw.data, raw.nulls)
	}
}

/// Borrowed view of a single non-null value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ValueRef<'a> {
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Float4(f32),
	Float8(f64),
	Boolean(bool),
	/// Text in the client encoding, UTF-8 unless validation was disabled.
	Utf8(&'a [u8]),
	Blob(&'a [u8]),
}

impl TypedBuffer {
	/// Panics if `data` and `nulls` differ in length or `data` does not match the descriptor type.
	pub fn new(descriptor: ColumnDescriptor, data: ColumnData, nulls: BitVec) -> Self {
		match Self::try_new(descriptor, data, nulls) {
			Ok(buffer) => buffer,
			Err(err) => panic!("{}", err),
		}
	}

	pub fn try_new(descriptor: ColumnDescriptor, data: ColumnData, nulls: BitVec) -> Result<Self, LayoutError> {
		if data.len() != nulls.len() {
			return Err(LayoutError::NullMaskLength {
				column: descriptor.name().to_string(),
				data: data.len(),
				nulls: nulls.len(),
			});
		}
		if data.wire_type() != descriptor.wire_type() {
			return Err(LayoutError::DataType {
				column: descriptor.name().to_string(),
				expected: descriptor.wire_type(),
				actual: data.wire_type(),
			});
		}
		Ok(Self {
			descriptor,
			data,
			nulls,
		})
	}

	pub fn descriptor(&self) -> &ColumnDescriptor {
		&self.descriptor
	}

	pub fn name(&self) -> &str {
		self.descriptor.name()
	}

	pub fn data(&self) -> &ColumnData {
		&self.data
	}

	pub fn nulls(&self) -> &BitVec {
		&self.nulls
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn is_null(&self, row: usize) -> bool {
		self.nulls.get(row)
	}

	pub fn null_count(&self) -> usize {
		self.nulls.count_ones()
	}

	/// Fixed-stride storage when the column's element type is `T`.
	pub fn fixed<T: Native>(&self) -> Option<&FixedBuffer<T>> {
		T::buffer(&self.data)
	}

	/// Values when the column's element type is `T`, NULL slots included.
	pub fn values<T: Native>(&self) -> Option<&[T]> {
		self.fixed::<T>().map(|b| b.as_slice())
	}

	pub fn var(&self) -> Option<&VarBuffer> {
		self.data.as_var()
	}

	/// The value at `row`, `None` when the row is NULL or out of range.
	pub fn value(&self, row: usize) -> Option<ValueRef<'_>> {
		if row >= self.len() || self.nulls.get(row) {
			return None;
		}
		Some(match &self.data {
			ColumnData::Int2(b) => ValueRef::Int2(b[row]),
			ColumnData::Int4(b) => ValueRef::Int4(b[row]),
			ColumnData::Int8(b) => ValueRef::Int8(b[row]),
			ColumnData::Float4(b) => ValueRef::Float4(b[row]),
			ColumnData::Float8(b) => ValueRef::Float8(b[row]),
			ColumnData::Boolean(b) => ValueRef::Boolean(b[row]),
			ColumnData::Utf8(b) => ValueRef::Utf8(b.get(row)?),
			ColumnData::Blob(b) => ValueRef::Blob(b.get(row)?),
		})
	}

	/// Transfers ownership of the storage to the caller.
	pub fn into_parts(self) -> (ColumnDescriptor, ColumnData, BitVec) {
		(self.descriptor, self.data, self.nulls)
	}
}
