// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Decoding of single field values into column storage.
//!
//! Binary format follows PostgreSQL's `*send` functions: big-endian integers
//! and IEEE floats of exact width, one byte for `bool`, raw bytes for `text`
//! and `bytea`. Text format follows the `*out` functions.

use std::{collections::TryReserveError, str::FromStr};

use pgcolumnar_column::{ColumnData, FixedBuffer, VarBuffer};
use pgcolumnar_type::{Format, hex};

#[derive(Debug)]
pub(crate) enum DecodeError {
	Invalid(String),
	Alloc(TryReserveError),
}

impl From<TryReserveError> for DecodeError {
	fn from(err: TryReserveError) -> Self {
		DecodeError::Alloc(err)
	}
}

pub(crate) fn push_value(
	data: &mut ColumnData,
	format: Format,
	raw: &[u8],
	validate_utf8: bool,
) -> Result<(), DecodeError> {
	match (data, format) {
		(ColumnData::Int2(b), Format::Binary) => push_be(b, raw, i16::from_be_bytes),
		(ColumnData::Int4(b), Format::Binary) => push_be(b, raw, i32::from_be_bytes),
		(ColumnData::Int8(b), Format::Binary) => push_be(b, raw, i64::from_be_bytes),
		(ColumnData::Float4(b), Format::Binary) => push_be(b, raw, f32::from_be_bytes),
		(ColumnData::Float8(b), Format::Binary) => push_be(b, raw, f64::from_be_bytes),
		(ColumnData::Boolean(b), Format::Binary) => match raw {
			[0] => {
				b.push(false);
				Ok(())
			}
			[1] => {
				b.push(true);
				Ok(())
			}
			_ => Err(DecodeError::Invalid(format!("bool value {:?} is not a single 0/1 byte", raw))),
		},

		(ColumnData::Int2(b), Format::Text) => push_parsed(b, raw),
		(ColumnData::Int4(b), Format::Text) => push_parsed(b, raw),
		(ColumnData::Int8(b), Format::Text) => push_parsed(b, raw),
		(ColumnData::Float4(b), Format::Text) => push_float(b, raw),
		(ColumnData::Float8(b), Format::Text) => push_float(b, raw),
		(ColumnData::Boolean(b), Format::Text) => match raw {
			b"t" => {
				b.push(true);
				Ok(())
			}
			b"f" => {
				b.push(false);
				Ok(())
			}
			_ => Err(DecodeError::Invalid(format!("'{}' is not a boolean", String::from_utf8_lossy(raw)))),
		},

		(ColumnData::Utf8(b), _) => {
			if validate_utf8 {
				std::str::from_utf8(raw).map_err(|e| DecodeError::Invalid(format!("text is not valid UTF-8: {}", e)))?;
			}
			Ok(b.try_push(raw)?)
		}
		(ColumnData::Blob(b), Format::Binary) => Ok(b.try_push(raw)?),
		(ColumnData::Blob(b), Format::Text) => push_bytea_text(b, raw),
	}
}

fn push_be<T, const N: usize>(buffer: &mut FixedBuffer<T>, raw: &[u8], convert: fn([u8; N]) -> T) -> Result<(), DecodeError>
where
	T: pgcolumnar_column::Native,
{
	let bytes: [u8; N] = raw
		.try_into()
		.map_err(|_| DecodeError::Invalid(format!("value is {} bytes long, expected {}", raw.len(), N)))?;
	buffer.push(convert(bytes));
	Ok(())
}

fn as_text(raw: &[u8]) -> Result<&str, DecodeError> {
	std::str::from_utf8(raw).map_err(|_| DecodeError::Invalid("text value is not valid UTF-8".to_string()))
}

fn push_parsed<T>(buffer: &mut FixedBuffer<T>, raw: &[u8]) -> Result<(), DecodeError>
where
	T: pgcolumnar_column::Native + FromStr,
{
	let text = as_text(raw)?;
	let value = text.parse::<T>().map_err(|_| DecodeError::Invalid(format!("'{}' is not a valid integer", text)))?;
	buffer.push(value);
	Ok(())
}

trait Float: pgcolumnar_column::Native + FromStr {
	const NAN: Self;
	const INFINITY: Self;
	const NEG_INFINITY: Self;
}

impl Float for f32 {
	const NAN: Self = f32::NAN;
	const INFINITY: Self = f32::INFINITY;
	const NEG_INFINITY: Self = f32::NEG_INFINITY;
}

impl Float for f64 {
	const NAN: Self = f64::NAN;
	const INFINITY: Self = f64::INFINITY;
	const NEG_INFINITY: Self = f64::NEG_INFINITY;
}

fn push_float<T: Float>(buffer: &mut FixedBuffer<T>, raw: &[u8]) -> Result<(), DecodeError> {
	let text = as_text(raw)?;
	let value = match text {
		"NaN" => T::NAN,
		"Infinity" => T::INFINITY,
		"-Infinity" => T::NEG_INFINITY,
		// Rust would also accept "inf"/"nan" spellings, PostgreSQL never emits them
		_ if text.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') => {
			return Err(DecodeError::Invalid(format!("'{}' is not a valid float", text)));
		}
		_ => text.parse::<T>().map_err(|_| DecodeError::Invalid(format!("'{}' is not a valid float", text)))?,
	};
	buffer.push(value);
	Ok(())
}

/// Decodes `bytea` text output, in either the hex (`\x...`) or the escape form.
fn push_bytea_text(buffer: &mut VarBuffer, raw: &[u8]) -> Result<(), DecodeError> {
	let bytes = match raw.strip_prefix(b"\\x") {
		Some(digits) => hex::decode(digits).map_err(|e| DecodeError::Invalid(format!("bytea hex: {}", e)))?,
		None => unescape_bytea(raw)?,
	};
	Ok(buffer.try_push(&bytes)?)
}

fn unescape_bytea(raw: &[u8]) -> Result<Vec<u8>, DecodeError> {
	let mut out = Vec::with_capacity(raw.len());
	let mut i = 0;
	while i < raw.len() {
		if raw[i] != b'\\' {
			out.push(raw[i]);
			i += 1;
			continue;
		}
		match raw.get(i + 1..i + 4) {
			_ if raw.get(i + 1) == Some(&b'\\') => {
				out.push(b'\\');
				i += 2;
			}
			Some([a @ b'0'..=b'3', b @ b'0'..=b'7', c @ b'0'..=b'7']) => {
				out.push((a - b'0') << 6 | (b - b'0') << 3 | (c - b'0'));
				i += 4;
			}
			_ => return Err(DecodeError::Invalid("invalid bytea escape sequence".to_string())),
		}
	}
	Ok(out)
}
