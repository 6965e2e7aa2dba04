// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pgcolumnar_marshal::MemoryResultSet;
use pgcolumnar_type::{Format, Oid};

use crate::wire::Value;

/// Builds a result set whose columns all use `format`.
pub fn table_with_format(columns: &[(&str, Oid)], rows: &[Vec<Value>], format: Format) -> MemoryResultSet {
	let mut builder = MemoryResultSet::builder();
	for (name, oid) in columns {
		builder = builder.column_with(*name, *oid, format, true);
	}
	for row in rows {
		builder = builder.row(row.iter().map(|v| v.encode(format)));
	}
	builder.build()
}

pub fn table(columns: &[(&str, Oid)], rows: &[Vec<Value>]) -> MemoryResultSet {
	table_with_format(columns, rows, Format::Binary)
}

/// `(id int4, name text)` with rows `(1, 'a')`, `(2, NULL)`, `(3, 'ccc')`.
pub fn people() -> MemoryResultSet {
	table(
		&[("id", Oid::INT4), ("name", Oid::TEXT)],
		&[
			vec![Value::Int4(1), Value::text("a")],
			vec![Value::Int4(2), Value::Null],
			vec![Value::Int4(3), Value::text("ccc")],
		],
	)
}

pub const MEASUREMENT_COLUMNS: [(&str, Oid); 7] = [
	("id", Oid::INT8),
	("sensor", Oid::INT2),
	("reading", Oid::INT4),
	("temperature", Oid::FLOAT8),
	("ratio", Oid::FLOAT4),
	("valid", Oid::BOOL),
	("label", Oid::VARCHAR),
];

/// Deterministic rows covering every fixed-width type plus text.
///
/// `temperature` is NULL on every 5th row, `label` on every 3rd.
pub fn measurement_rows(rows: usize) -> Vec<Vec<Value>> {
	(0..rows)
		.map(|i| {
			let n = i as i64;
			vec![
				Value::Int8(n * 1_000_003 - 7),
				Value::Int2((n % 300) as i16 - 150),
				Value::Int4((n * 7919 % 100_000) as i32 - 50_000),
				if i % 5 == 0 {
					Value::Null
				} else {
					Value::Float8(n as f64 * 0.25 - 40.0)
				},
				Value::Float4(1.0 / (n as f32 + 1.0)),
				Value::Bool(i % 2 == 0),
				if i % 3 == 0 {
					Value::Null
				} else {
					Value::text(format!("sensor-{}", i % 11))
				},
			]
		})
		.collect()
}

pub fn measurements(rows: usize) -> MemoryResultSet {
	table(&MEASUREMENT_COLUMNS, &measurement_rows(rows))
}

pub fn measurements_text(rows: usize) -> MemoryResultSet {
	table_with_format(&MEASUREMENT_COLUMNS, &measurement_rows(rows), Format::Text)
}
