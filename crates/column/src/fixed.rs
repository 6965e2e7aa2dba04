// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{collections::TryReserveError, fmt::Debug, ops::Deref};

use pgcolumnar_type::GetWireType;
use serde::{Deserialize, Serialize};

use crate::data::ColumnData;

/// Element type of a fixed-stride column.
pub trait Native: GetWireType + Copy + Default + PartialEq + Debug + Send + Sync + 'static {
	/// Appends the native-endian bytes of `self` to `out`.
	fn extend_bytes(&self, out: &mut Vec<u8>);

	fn buffer(data: &ColumnData) -> Option<&FixedBuffer<Self>>;
}

macro_rules! impl_native {
	($t:ty, $variant:ident) => {
		impl Native for $t {
			fn extend_bytes(&self, out: &mut Vec<u8>) {
				out.extend_from_slice(&self.to_ne_bytes());
			}

			fn buffer(data: &ColumnData) -> Option<&FixedBuffer<Self>> {
				match data {
					ColumnData::$variant(buffer) => Some(buffer),
					_ => None,
				}
			}
		}
	};
}

impl_native!(i16, Int2);
impl_native!(i32, Int4);
impl_native!(i64, Int8);
impl_native!(f32, Float4);
impl_native!(f64, Float8);

impl Native for bool {
	fn extend_bytes(&self, out: &mut Vec<u8>) {
		out.push(*self as u8);
	}

	fn buffer(data: &ColumnData) -> Option<&FixedBuffer<Self>> {
		match data {
			ColumnData::Boolean(buffer) => Some(buffer),
			_ => None,
		}
	}
}

/// Contiguous, fixed-stride storage of one column's values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedBuffer<T: Native> {
	data: Vec<T>,
}

impl<T: Native> FixedBuffer<T> {
	pub fn new(data: Vec<T>) -> Self {
		Self {
			data,
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			data: Vec::with_capacity(capacity),
		}
	}

	/// Reserves exactly `capacity` elements up front, reporting allocation failure.
	pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
		let mut data = Vec::new();
		data.try_reserve_exact(capacity)?;
		Ok(Self {
			data,
		})
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.data.capacity()
	}

	pub fn push(&mut self, value: T) {
		self.data.push(value);
	}

	/// Pushes the zero value; used as the slot content of a NULL row.
	pub fn push_default(&mut self) {
		self.data.push(T::default());
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		self.data.get(index)
	}

	pub fn as_slice(&self) -> &[T] {
		&self.data
	}

	pub fn into_vec(self) -> Vec<T> {
		self.data
	}

	/// Size in bytes of the element storage.
	pub fn byte_len(&self) -> usize {
		self.data.len() * size_of::<T>()
	}

	/// Native-endian byte image of the buffer.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.byte_len());
		for value in &self.data {
			value.extend_bytes(&mut out);
		}
		out
	}
}

impl<T: Native> Deref for FixedBuffer<T> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

impl<T: Native> From<Vec<T>> for FixedBuffer<T> {
	fn from(data: Vec<T>) -> Self {
		Self::new(data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_push_and_get() {
		let mut buffer = FixedBuffer::<i32>::with_capacity(3);
		buffer.push(1);
		buffer.push_default();
		buffer.push(3);
		assert_eq!(buffer.len(), 3);
		assert_eq!(buffer.get(1), Some(&0));
		assert_eq!(buffer.get(3), None);
		assert_eq!(buffer.as_slice(), &[1, 0, 3]);
	}

	#[test]
	fn test_try_with_capacity_reserves_exactly() {
		let buffer = FixedBuffer::<i64>::try_with_capacity(10).unwrap();
		assert!(buffer.is_empty());
		assert!(buffer.capacity() >= 10);
	}

	#[test]
	fn test_try_with_capacity_overflow() {
		assert!(FixedBuffer::<i64>::try_with_capacity(usize::MAX).is_err());
	}

	#[test]
	fn test_to_bytes() {
		let buffer = FixedBuffer::new(vec![1i16, -1]);
		assert_eq!(buffer.byte_len(), 4);
		let mut expected = Vec::new();
		expected.extend_from_slice(&1i16.to_ne_bytes());
		expected.extend_from_slice(&(-1i16).to_ne_bytes());
		assert_eq!(buffer.to_bytes(), expected);

		let buffer = FixedBuffer::new(vec![true, false]);
		assert_eq!(buffer.to_bytes(), vec![1, 0]);
	}

	#[test]
	fn test_native_buffer_lookup() {
		let data = ColumnData::float8([1.5, 2.5]);
		assert_eq!(f64::buffer(&data).map(|b| b.as_slice()), Some(&[1.5, 2.5][..]));
		assert!(i32::buffer(&data).is_none());
	}
}
