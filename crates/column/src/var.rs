// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Offset-indexed storage for variable-length values.
///
/// Element `i` spans `data[offsets[i]..offsets[i + 1]]`. `offsets` always has
/// one more entry than there are elements, starts at zero and never decreases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVarBuffer")]
pub struct VarBuffer {
	offsets: Vec<u64>,
	data: Vec<u8>,
}

#[derive(Deserialize)]
struct RawVarBuffer {
	offsets: Vec<u64>,
	data: Vec<u8>,
}

impl TryFrom<RawVarBuffer> for VarBuffer {
	type Error = LayoutError;

	fn try_from(raw: RawVarBuffer) -> Result<Self, Self::Error> {
		VarBuffer::from_parts(raw.offsets, raw.data)
	}
}

impl Default for VarBuffer {
	fn default() -> Self {
		Self::new()
	}
}

impl VarBuffer {
	pub fn new() -> Self {
		Self {
			offsets: vec![0],
			data: Vec::new(),
		}
	}

	pub fn with_capacity(elements: usize, bytes: usize) -> Self {
		let mut offsets = Vec::with_capacity(elements + 1);
		offsets.push(0);
		Self {
			offsets,
			data: Vec::with_capacity(bytes),
		}
	}

	/// Reserves the offsets for `elements` rows and `bytes` of pool up front.
	pub fn try_with_capacity(elements: usize, bytes: usize) -> Result<Self, TryReserveError> {
		let mut offsets = Vec::new();
		offsets.try_reserve_exact(elements.saturating_add(1))?;
		offsets.push(0);
		let mut data = Vec::new();
		data.try_reserve_exact(bytes)?;
		Ok(Self {
			offsets,
			data,
		})
	}

	pub fn len(&self) -> usize {
		self.offsets.len() - 1
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn push(&mut self, value: &[u8]) {
		self.data.extend_from_slice(value);
		self.offsets.push(self.data.len() as u64);
	}

	/// Appends `value`, growing the pool fallibly.
	pub fn try_push(&mut self, value: &[u8]) -> Result<(), TryReserveError> {
		self.data.try_reserve(value.len())?;
		self.offsets.try_reserve(1)?;
		self.push(value);
		Ok(())
	}

	/// Appends an empty span; used as the slot content of a NULL row.
	pub fn push_empty(&mut self) {
		self.offsets.push(self.data.len() as u64);
	}

	pub fn get(&self, index: usize) -> Option<&[u8]> {
		if index >= self.len() {
			return None;
		}
		let start = self.offsets[index] as usize;
		let end = self.offsets[index + 1] as usize;
		Some(&self.data[start..end])
	}

	pub fn get_str(&self, index: usize) -> Option<&str> {
		self.get(index).and_then(|bytes| std::str::from_utf8(bytes).ok())
	}

	pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
		self.offsets.windows(2).map(|w| &self.data[w[0] as usize..w[1] as usize])
	}

	pub fn offsets(&self) -> &[u64] {
		&self.offsets
	}

	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Length in bytes of the longest element.
	pub fn max_len(&self) -> usize {
		self.offsets.windows(2).map(|w| (w[1] - w[0]) as usize).max().unwrap_or(0)
	}

	/// Rebuilds a buffer from the output of [`VarBuffer::into_parts`].
	pub fn from_parts(offsets: Vec<u64>, data: Vec<u8>) -> Result<Self, LayoutError> {
		if offsets.first() != Some(&0) {
			return Err(LayoutError::OffsetsNotZeroBased);
		}
		if let Some(index) = offsets.windows(2).position(|w| w[1] < w[0]) {
			return Err(LayoutError::OffsetsDecreasing {
				index: index + 1,
				offset: offsets[index + 1],
			});
		}
		let last = offsets[offsets.len() - 1];
		if last > data.len() as u64 {
			return Err(LayoutError::OffsetOutOfBounds {
				offset: last,
				len: data.len(),
			});
		}
		Ok(Self {
			offsets,
			data,
		})
	}

	pub fn into_parts(self) -> (Vec<u64>, Vec<u8>) {
		(self.offsets, self.data)
	}

	/// Converts to a fixed-stride buffer of `width` bytes per element.
	///
	/// With `None` the width of the longest element is used. Shorter values
	/// are zero padded, longer ones truncated.
	pub fn to_padded(&self, width: Option<usize>) -> Result<PaddedBuffer, LayoutError> {
		let width = width.unwrap_or_else(|| self.max_len());
		let too_large = || LayoutError::PaddedTooLarge {
			rows: self.len(),
			width,
		};
		let size = width.checked_mul(self.len()).ok_or_else(too_large)?;
		let mut data = Vec::new();
		data.try_reserve_exact(size).map_err(|_| too_large())?;
		data.resize(size, 0);
		for (i, value) in self.iter().enumerate() {
			let n = value.len().min(width);
			data[i * width..i * width + n].copy_from_slice(&value[..n]);
		}
		Ok(PaddedBuffer {
			width,
			data,
		})
	}
}

/// Fixed-stride byte strings, as consumed by fixed-width string arrays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaddedBuffer {
	width: usize,
	data: Vec<u8>,
}

impl PaddedBuffer {
	pub fn width(&self) -> usize {
		self.width
	}

	pub fn len(&self) -> usize {
		if self.width == 0 {
			0
		} else {
			self.data.len() / self.width
		}
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&[u8]> {
		let start = index.checked_mul(self.width)?;
		self.data.get(start..start.checked_add(self.width)?)
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.data
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn buffer(values: &[&str]) -> VarBuffer {
		let mut result = VarBuffer::new();
		for value in values {
			result.push(value.as_bytes());
		}
		result
	}

	#[test]
	fn test_offsets() {
		let mut b = VarBuffer::with_capacity(3, 4);
		b.push(b"a");
		b.push_empty();
		b.push(b"ccc");
		assert_eq!(b.len(), 3);
		assert_eq!(b.offsets(), &[0, 1, 1, 4]);
		assert_eq!(b.data(), b"accc");
		assert_eq!(b.get(0), Some(&b"a"[..]));
		assert_eq!(b.get(1), Some(&b""[..]));
		assert_eq!(b.get_str(2), Some("ccc"));
		assert_eq!(b.get(3), None);
	}

	#[test]
	fn test_empty() {
		let b = VarBuffer::try_with_capacity(0, 0).unwrap();
		assert!(b.is_empty());
		assert_eq!(b.offsets(), &[0]);
		assert_eq!(b.max_len(), 0);
		assert_eq!(b.iter().count(), 0);
	}

	#[test]
	fn test_try_push() {
		let mut b = VarBuffer::new();
		b.try_push(b"xy").unwrap();
		assert_eq!(b.get(0), Some(&b"xy"[..]));
	}

	#[test]
	fn test_get_str_invalid_utf8() {
		let mut b = VarBuffer::new();
		b.push(&[0xff, 0xfe]);
		assert_eq!(b.get_str(0), None);
		assert_eq!(b.get(0), Some(&[0xff, 0xfe][..]));
	}

	#[test]
	fn test_padded_to_longest() {
		let padded = buffer(&["a", "", "ccc"]).to_padded(None).unwrap();
		assert_eq!(padded.width(), 3);
		assert_eq!(padded.len(), 3);
		assert_eq!(padded.as_bytes(), b"a\0\0\0\0\0ccc");
		assert_eq!(padded.get(2), Some(&b"ccc"[..]));
		assert_eq!(padded.get(3), None);
	}

	#[test]
	fn test_padded_truncates() {
		let padded = buffer(&["hello", "hi"]).to_padded(Some(3)).unwrap();
		assert_eq!(padded.as_bytes(), b"helhi\0");
	}

	#[test]
	fn test_padded_zero_width() {
		let padded = buffer(&["", ""]).to_padded(None).unwrap();
		assert_eq!(padded.width(), 0);
		assert!(padded.is_empty());
		assert_eq!(padded.len(), 0);
	}

	#[test]
	fn test_padded_width_overflow() {
		let b = buffer(&["a", "b"]);
		assert_eq!(
			b.to_padded(Some(usize::MAX)),
			Err(LayoutError::PaddedTooLarge {
				rows: 2,
				width: usize::MAX
			})
		);
		assert!(matches!(b.to_padded(Some(usize::MAX / 2)), Err(LayoutError::PaddedTooLarge { .. })));
	}

	#[test]
	fn test_from_parts() {
		let b = VarBuffer::from_parts(vec![0, 1, 1, 4], b"accc".to_vec()).unwrap();
		assert_eq!(b.get_str(2), Some("ccc"));
		assert_eq!(VarBuffer::from_parts(vec![], vec![]), Err(LayoutError::OffsetsNotZeroBased));
		assert_eq!(VarBuffer::from_parts(vec![1, 2], b"ab".to_vec()), Err(LayoutError::OffsetsNotZeroBased));
		assert_eq!(
			VarBuffer::from_parts(vec![0, 2, 1], b"ab".to_vec()),
			Err(LayoutError::OffsetsDecreasing {
				index: 2,
				offset: 1
			})
		);
		assert_eq!(
			VarBuffer::from_parts(vec![0, 5], vec![]),
			Err(LayoutError::OffsetOutOfBounds {
				offset: 5,
				len: 0
			})
		);
	}

	#[test]
	fn test_deserialize_validates_offsets() {
		let b: VarBuffer = serde_json::from_str(r#"{"offsets":[0,1,1,4],"data":[97,99,99,99]}"#).unwrap();
		assert_eq!(b.len(), 3);
		assert_eq!(serde_json::from_str::<VarBuffer>(&serde_json::to_string(&b).unwrap()).unwrap(), b);

		for json in [
			r#"{"offsets":[0,5],"data":[]}"#,
			r#"{"offsets":[],"data":[]}"#,
			r#"{"offsets":[3],"data":[1,2,3]}"#,
			r#"{"offsets":[0,2,1],"data":[1,2]}"#,
		] {
			assert!(serde_json::from_str::<VarBuffer>(json).is_err(), "{}", json);
		}
	}
}
