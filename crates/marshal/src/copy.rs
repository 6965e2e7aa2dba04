// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Rendering of marshalled columns in PostgreSQL's COPY text format.
//!
//! The output can be loaded back with `COPY table FROM ... (FORMAT text)`.

use std::{
	fs::File,
	io::{self, BufWriter, Write},
	path::Path,
};

use pgcolumnar_column::{Columns, ValueRef};
use pgcolumnar_type::hex;
use tracing::{debug, instrument};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
	#[error("I/O error while writing rows: {0}")]
	Io(#[from] io::Error),

	#[error("'{0}' cannot be used as a COPY delimiter")]
	InvalidDelimiter(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyWriter {
	delimiter: char,
	null: String,
	header: bool,
}

impl Default for CopyWriter {
	fn default() -> Self {
		Self {
			delimiter: '\t',
			null: "\\N".to_string(),
			header: false,
		}
	}
}

impl CopyWriter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn delimiter(mut self, delimiter: char) -> Self {
		self.delimiter = delimiter;
		self
	}

	pub fn null(mut self, null: impl Into<String>) -> Self {
		self.null = null.into();
		self
	}

	pub fn header(mut self, header: bool) -> Self {
		self.header = header;
		self
	}

	/// Writes every row of `columns` to `out` and returns the number of rows written.
	#[instrument(name = "marshal::copy::write", level = "debug", skip(self, columns, out), fields(rows = columns.row_count()))]
	pub fn write<W: Write>(&self, columns: &Columns, mut out: W) -> Result<usize, WriteError> {
		let delimiter = self.delimiter_byte()?;
		let mut line = Vec::new();

		if self.header {
			for (idx, name) in columns.names().enumerate() {
				if idx > 0 {
					line.push(delimiter);
				}
				escape_into(&mut line, name.as_bytes(), delimiter);
			}
			line.push(b'\n');
			out.write_all(&line)?;
		}

		for row in 0..columns.row_count() {
			line.clear();
			for (idx, column) in columns.iter().enumerate() {
				if idx > 0 {
					line.push(delimiter);
				}
				match column.value(row) {
					None => line.extend_from_slice(self.null.as_bytes()),
					Some(value) => render_into(&mut line, value, delimiter),
				}
			}
			line.push(b'\n');
			out.write_all(&line)?;
		}
		out.flush()?;

		debug!(rows = columns.row_count(), "rows written");
		Ok(columns.row_count())
	}

	/// Writes to a newly created file at `path`, replacing any existing file.
	pub fn write_file(&self, columns: &Columns, path: impl AsRef<Path>) -> Result<usize, WriteError> {
		self.delimiter_byte()?;
		let file = File::create(path)?;
		self.write(columns, BufWriter::new(file))
	}

	fn delimiter_byte(&self) -> Result<u8, WriteError> {
		match self.delimiter {
			'\\' | '\n' | '\r' | '.' | 'a'..='z' | 'A'..='Z' | '0'..='9' => Err(WriteError::InvalidDelimiter(self.delimiter)),
			c if c.is_ascii() => Ok(c as u8),
			c => Err(WriteError::InvalidDelimiter(c)),
		}
	}
}

fn render_into(line: &mut Vec<u8>, value: ValueRef<'_>, delimiter: u8) {
	match value {
		ValueRef::Int2(v) => line.extend_from_slice(v.to_string().as_bytes()),
		ValueRef::Int4(v) => line.extend_from_slice(v.to_string().as_bytes()),
		ValueRef::Int8(v) => line.extend_from_slice(v.to_string().as_bytes()),
		ValueRef::Float4(v) => line.extend_from_slice(float_text(v as f64, v.to_string()).as_bytes()),
		ValueRef::Float8(v) => line.extend_from_slice(float_text(v, v.to_string()).as_bytes()),
		ValueRef::Boolean(v) => line.push(if v {
			b't'
		} else {
			b'f'
		}),
		ValueRef::Utf8(bytes) => escape_into(line, bytes, delimiter),
		// bytea hex output is `\x...`; the backslash itself needs escaping in COPY text
		ValueRef::Blob(bytes) => {
			line.extend_from_slice(b"\\\\x");
			line.extend_from_slice(hex::encode(bytes).as_bytes());
		}
	}
}

fn float_text(v: f64, shortest: String) -> String {
	if v.is_nan() {
		"NaN".to_string()
	} else if v == f64::INFINITY {
		"Infinity".to_string()
	} else if v == f64::NEG_INFINITY {
		"-Infinity".to_string()
	} else {
		shortest
	}
}

fn escape_into(line: &mut Vec<u8>, bytes: &[u8], delimiter: u8) {
	for &b in bytes {
		match b {
			b'\\' => line.extend_from_slice(b"\\\\"),
			b'\n' => line.extend_from_slice(b"\\n"),
			b'\r' => line.extend_from_slice(b"\\r"),
			b'\t' => line.extend_from_slice(b"\\t"),
			b if b == delimiter => {
				line.push(b'\\');
				line.push(b);
			}
			b => line.push(b),
		}
	}
}
