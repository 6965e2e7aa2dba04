// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! PostgreSQL wire types and their native representations.
//!
//! Every column of a result set is tagged with a type [`Oid`]. Only the OIDs
//! listed in [`WireType::from_oid`] have a native buffer representation;
//! everything else is rejected by the marshaller.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// PostgreSQL object identifier of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oid(pub u32);

impl Oid {
	pub const BOOL: Oid = Oid(16);
	pub const BYTEA: Oid = Oid(17);
	pub const CHAR: Oid = Oid(18);
	pub const NAME: Oid = Oid(19);
	pub const INT8: Oid = Oid(20);
	pub const INT2: Oid = Oid(21);
	pub const INT4: Oid = Oid(23);
	pub const TEXT: Oid = Oid(25);
	pub const FLOAT4: Oid = Oid(700);
	pub const FLOAT8: Oid = Oid(701);
	pub const BPCHAR: Oid = Oid(1042);
	pub const VARCHAR: Oid = Oid(1043);

	/// Name of the PostgreSQL type, if it is one of the types known here.
	pub fn type_name(&self) -> Option<&'static str> {
		let name = match *self {
			Oid::BOOL => "bool",
			Oid::BYTEA => "bytea",
			Oid::CHAR => "char",
			Oid::NAME => "name",
			Oid::INT8 => "int8",
			Oid::INT2 => "int2",
			Oid::INT4 => "int4",
			Oid::TEXT => "text",
			Oid::FLOAT4 => "float4",
			Oid::FLOAT8 => "float8",
			Oid::BPCHAR => "bpchar",
			Oid::VARCHAR => "varchar",
			_ => return None,
		};
		Some(name)
	}
}

impl Display for Oid {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.type_name() {
			Some(name) => write!(f, "{} (oid {})", name, self.0),
			None => write!(f, "oid {}", self.0),
		}
	}
}

impl From<u32> for Oid {
	fn from(value: u32) -> Self {
		Oid(value)
	}
}

/// Transfer format of a column, as requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
	Text,
	#[default]
	Binary,
}

impl Display for Format {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Format::Text => f.write_str("text"),
			Format::Binary => f.write_str("binary"),
		}
	}
}

/// The closed set of column types the marshaller can materialise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
	Int2,
	Int4,
	Int8,
	Float4,
	Float8,
	Utf8,
	Blob,
	Boolean,
}

impl WireType {
	pub fn from_oid(oid: Oid) -> Option<WireType> {
		match oid {
			Oid::BOOL => Some(WireType::Boolean),
			Oid::BYTEA => Some(WireType::Blob),
			Oid::CHAR | Oid::NAME | Oid::TEXT | Oid::BPCHAR | Oid::VARCHAR => Some(WireType::Utf8),
			Oid::INT8 => Some(WireType::Int8),
			Oid::INT2 => Some(WireType::Int2),
			Oid::INT4 => Some(WireType::Int4),
			Oid::FLOAT4 => Some(WireType::Float4),
			Oid::FLOAT8 => Some(WireType::Float8),
			_ => None,
		}
	}

	/// Bytes per element in a fixed-stride buffer, `None` for variable-length types.
	pub fn byte_width(&self) -> Option<usize> {
		match self {
			WireType::Int2 => Some(2),
			WireType::Int4 => Some(4),
			WireType::Int8 => Some(8),
			WireType::Float4 => Some(4),
			WireType::Float8 => Some(8),
			WireType::Boolean => Some(1),
			WireType::Utf8 | WireType::Blob => None,
		}
	}

	pub fn is_variable_length(&self) -> bool {
		self.byte_width().is_none()
	}
}

impl Display for WireType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			WireType::Int2 => f.write_str("INT2"),
			WireType::Int4 => f.write_str("INT4"),
			WireType::Int8 => f.write_str("INT8"),
			WireType::Float4 => f.write_str("FLOAT4"),
			WireType::Float8 => f.write_str("FLOAT8"),
			WireType::Utf8 => f.write_str("UTF8"),
			WireType::Blob => f.write_str("BLOB"),
			WireType::Boolean => f.write_str("BOOLEAN"),
		}
	}
}

/// Maps a native element type to the wire type it is decoded from.
pub trait GetWireType {
	fn wire_type() -> WireType;
}

impl GetWireType for i16 {
	fn wire_type() -> WireType {
		WireType::Int2
	}
}

impl GetWireType for i32 {
	fn wire_type() -> WireType {
		WireType::Int4
	}
}

impl GetWireType for i64 {
	fn wire_type() -> WireType {
		WireType::Int8
	}
}

impl GetWireType for f32 {
	fn wire_type() -> WireType {
		WireType::Float4
	}
}

impl GetWireType for f64 {
	fn wire_type() -> WireType {
		WireType::Float8
	}
}

impl GetWireType for bool {
	fn wire_type() -> WireType {
		WireType::Boolean
	}
}
