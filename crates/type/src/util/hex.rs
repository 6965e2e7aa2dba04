// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Lowercase hex encoding, as used by the `bytea` text representation.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
	OddLength,
	InvalidDigit(u8),
}

impl Display for DecodeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			DecodeError::OddLength => f.write_str("odd number of hex digits"),
			DecodeError::InvalidDigit(b) => write!(f, "invalid hex digit 0x{:02x}", b),
		}
	}
}

impl std::error::Error for DecodeError {}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

pub fn encode(data: &[u8]) -> String {
	let mut out = String::with_capacity(data.len() * 2);
	for &b in data {
		out.push(DIGITS[(b >> 4) as usize] as char);
		out.push(DIGITS[(b & 0x0f) as usize] as char);
	}
	out
}

pub fn decode(hex: &[u8]) -> Result<Vec<u8>, DecodeError> {
	if hex.len() % 2 != 0 {
		return Err(DecodeError::OddLength);
	}
	let mut out = Vec::with_capacity(hex.len() / 2);
	for pair in hex.chunks_exact(2) {
		out.push(nibble(pair[0])? << 4 | nibble(pair[1])?);
	}
	Ok(out)
}

fn nibble(b: u8) -> Result<u8, DecodeError> {
	match b {
		b'0'..=b'9' => Ok(b - b'0'),
		b'a'..=b'f' => Ok(b - b'a' + 10),
		b'A'..=b'F' => Ok(b - b'A' + 10),
		_ => Err(DecodeError::InvalidDigit(b)),
	}
}
