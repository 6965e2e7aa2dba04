// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::wire::{Format, Oid, WireType};

/// Metadata of one result column, derived once from a result-set handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	name: String,
	oid: Oid,
	wire_type: WireType,
	format: Format,
	nullable: bool,
}

impl ColumnDescriptor {
	pub fn new(name: impl Into<String>, oid: Oid, wire_type: WireType, format: Format, nullable: bool) -> Self {
		Self {
			name: name.into(),
			oid,
			wire_type,
			format,
			nullable,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn oid(&self) -> Oid {
		self.oid
	}

	pub fn wire_type(&self) -> WireType {
		self.wire_type
	}

	pub fn format(&self) -> Format {
		self.format
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	/// Element width in bytes; `None` means the column is offset-indexed.
	pub fn byte_width(&self) -> Option<usize> {
		self.wire_type.byte_width()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_descriptor_accessors() {
		let descriptor = ColumnDescriptor::new("id", Oid::INT4, WireType::Int4, Format::Binary, false);
		assert_eq!(descriptor.name(), "id");
		assert_eq!(descriptor.oid(), Oid::INT4);
		assert_eq!(descriptor.wire_type(), WireType::Int4);
		assert_eq!(descriptor.byte_width(), Some(4));
		assert!(!descriptor.nullable());
	}

	#[test]
	fn test_descriptor_serializes() {
		let descriptor = ColumnDescriptor::new("name", Oid::TEXT, WireType::Utf8, Format::Text, true);
		let json = serde_json::to_string(&descriptor).unwrap();
		assert_eq!(
			json,
			r#"{"name":"name","oid":25,"wire_type":"Utf8","format":"text","nullable":true}"#
		);
		let back: ColumnDescriptor = serde_json::from_str(&json).unwrap();
		assert_eq!(back, descriptor);
	}
}
