// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Encoders producing field values the way a PostgreSQL server sends them.

use pgcolumnar_type::{Format, hex};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Float4(f32),
	Float8(f64),
	Bool(bool),
	Text(String),
	Bytea(Vec<u8>),
}

impl Value {
	pub fn text(value: impl Into<String>) -> Self {
		Value::Text(value.into())
	}

	pub fn encode(&self, format: Format) -> Option<Vec<u8>> {
		match format {
			Format::Binary => self.binary(),
			Format::Text => self.text_form(),
		}
	}

	pub fn binary(&self) -> Option<Vec<u8>> {
		Some(match self {
			Value::Null => return None,
			Value::Int2(v) => v.to_be_bytes().to_vec(),
			Value::Int4(v) => v.to_be_bytes().to_vec(),
			Value::Int8(v) => v.to_be_bytes().to_vec(),
			Value::Float4(v) => v.to_be_bytes().to_vec(),
			Value::Float8(v) => v.to_be_bytes().to_vec(),
			Value::Bool(v) => vec![*v as u8],
			Value::Text(v) => v.as_bytes().to_vec(),
			Value::Bytea(v) => v.clone(),
		})
	}

	pub fn text_form(&self) -> Option<Vec<u8>> {
		let text = match self {
			Value::Null => return None,
			Value::Int2(v) => v.to_string(),
			Value::Int4(v) => v.to_string(),
			Value::Int8(v) => v.to_string(),
			Value::Float4(v) => float_text(*v as f64, v.to_string()),
			Value::Float8(v) => float_text(*v, v.to_string()),
			Value::Bool(v) => (if *v { "t" } else { "f" }).to_string(),
			Value::Text(v) => v.clone(),
			Value::Bytea(v) => format!("\\x{}", hex::encode(v)),
		};
		Some(text.into_bytes())
	}
}

fn float_text(v: f64, shortest: String) -> String {
	if v.is_nan() {
		"NaN".to_string()
	} else if v.is_infinite() {
		(if v > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
	} else {
		shortest
	}
}
