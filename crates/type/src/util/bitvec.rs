// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	collections::TryReserveError,
	fmt::{self, Debug, Formatter},
};

use serde::{Deserialize, Serialize};

/// Packed bitset, least significant bit first within each byte.
///
/// Used as the null mask of a column: bit `i` set means row `i` is NULL.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBitVec")]
pub struct BitVec {
	bits: Vec<u8>,
	len: usize,
}

#[derive(Deserialize)]
struct RawBitVec {
	bits: Vec<u8>,
	len: usize,
}

impl TryFrom<RawBitVec> for BitVec {
	type Error = String;

	fn try_from(raw: RawBitVec) -> Result<Self, Self::Error> {
		if raw.bits.len() != raw.len.div_ceil(8) {
			return Err(format!("{} bits need {} bytes, got {}", raw.len, raw.len.div_ceil(8), raw.bits.len()));
		}
		let rem = raw.len % 8;
		if rem != 0 && raw.bits[raw.bits.len() - 1] >> rem != 0 {
			return Err(format!("bits past length {} are set", raw.len));
		}
		Ok(Self {
			bits: raw.bits,
			len: raw.len,
		})
	}
}

impl BitVec {
	pub fn new(len: usize, value: bool) -> Self {
		let fill = if value {
			0xFF
		} else {
			0x00
		};
		let mut result = Self {
			bits: vec![fill; len.div_ceil(8)],
			len,
		};
		result.clear_tail();
		result
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			bits: Vec::with_capacity(capacity.div_ceil(8)),
			len: 0,
		}
	}

	/// Like [`BitVec::with_capacity`], but reports allocation failure instead of aborting.
	pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
		let mut bits = Vec::new();
		bits.try_reserve_exact(capacity.div_ceil(8))?;
		Ok(Self {
			bits,
			len: 0,
		})
	}

	pub fn from_slice(values: &[bool]) -> Self {
		let mut result = Self::with_capacity(values.len());
		for &value in values {
			result.push(value);
		}
		result
	}

	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn push(&mut self, bit: bool) {
		let byte = self.len / 8;
		if byte == self.bits.len() {
			self.bits.push(0);
		}
		if bit {
			self.bits[byte] |= 1 << (self.len % 8);
		}
		self.len += 1;
	}

	pub fn get(&self, idx: usize) -> bool {
		assert!(idx < self.len, "bit index {} out of bounds for length {}", idx, self.len);
		self.bits[idx / 8] & (1 << (idx % 8)) != 0
	}

	pub fn set(&mut self, idx: usize, value: bool) {
		assert!(idx < self.len, "bit index {} out of bounds for length {}", idx, self.len);
		let mask = 1 << (idx % 8);
		if value {
			self.bits[idx / 8] |= mask;
		} else {
			self.bits[idx / 8] &= !mask;
		}
	}

	pub fn count_ones(&self) -> usize {
		self.bits.iter().map(|b| b.count_ones() as usize).sum()
	}

	pub fn count_zeros(&self) -> usize {
		self.len - self.count_ones()
	}

	pub fn any(&self) -> bool {
		self.bits.iter().any(|&b| b != 0)
	}

	pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
		(0..self.len).map(|i| self.get(i))
	}

	/// Packed bytes, `ceil(len / 8)` long. Bits past `len` are always zero.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bits
	}

	pub fn into_bytes(self) -> Vec<u8> {
		self.bits
	}

	fn clear_tail(&mut self) {
		let rem = self.len % 8;
		if rem != 0 {
			if let Some(last) = self.bits.last_mut() {
				*last &= (1u8 << rem) - 1;
			}
		}
	}
}

impl Debug for BitVec {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("BitVec[")?;
		for bit in self.iter() {
			f.write_str(if bit {
				"1"
			} else {
				"0"
			})?;
		}
		f.write_str("]")
	}
}
