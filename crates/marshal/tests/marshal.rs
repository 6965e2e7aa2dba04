// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pgcolumnar_column::ValueRef;
use pgcolumnar_marshal::{MarshalConfig, Marshaller, MemoryResultSet, marshal};
use pgcolumnar_testing::{
	fixture::{self, MEASUREMENT_COLUMNS},
	init_tracing,
	wire::Value,
};
use pgcolumnar_type::{Format, MarshalError, Oid, WireType};

#[test]
fn test_people() {
	init_tracing();
	let columns = marshal(&fixture::people()).unwrap();

	assert_eq!(columns.names().collect::<Vec<_>>(), vec!["id", "name"]);
	assert_eq!(columns[0].values::<i32>(), Some(&[1, 2, 3][..]));
	assert_eq!(columns[0].null_count(), 0);

	let name = columns[1].var().unwrap();
	assert_eq!(name.offsets(), &[0, 1, 1, 4]);
	assert_eq!(name.data(), b"accc");
	assert_eq!(columns[1].nulls().iter().collect::<Vec<_>>(), vec![false, true, false]);
}

#[test]
fn test_every_type_in_both_formats() {
	init_tracing();
	let rows = fixture::measurement_rows(50);

	for format in [Format::Binary, Format::Text] {
		let rs = fixture::table_with_format(&MEASUREMENT_COLUMNS, &rows, format);
		let columns = marshal(&rs).unwrap();
		assert_eq!(columns.row_count(), 50);

		for (column, (name, oid)) in MEASUREMENT_COLUMNS.iter().enumerate() {
			let buffer = &columns[column];
			assert_eq!(buffer.name(), *name);
			assert_eq!(buffer.descriptor().oid(), *oid);
			assert_eq!(buffer.descriptor().format(), format);

			for (row, expected) in rows.iter().enumerate() {
				let expected = &expected[column];
				assert_eq!(buffer.is_null(row), *expected == Value::Null, "{} row {}", name, row);
				match (expected, buffer.value(row)) {
					(Value::Null, None) => {}
					(Value::Int2(v), Some(actual)) => assert_eq!(actual, ValueRef::Int2(*v)),
					(Value::Int4(v), Some(actual)) => assert_eq!(actual, ValueRef::Int4(*v)),
					(Value::Int8(v), Some(actual)) => assert_eq!(actual, ValueRef::Int8(*v)),
					(Value::Float4(v), Some(actual)) => {
						assert_eq!(actual, ValueRef::Float4(*v))
					}
					(Value::Float8(v), Some(actual)) => {
						assert_eq!(actual, ValueRef::Float8(*v))
					}
					(Value::Bool(v), Some(actual)) => assert_eq!(actual, ValueRef::Boolean(*v)),
					(Value::Text(v), Some(actual)) => {
						assert_eq!(actual, ValueRef::Utf8(v.as_bytes()))
					}
					(expected, actual) => panic!("{} row {}: expected {:?}, got {:?}", name, row, expected, actual),
				}
			}
		}
	}
}

#[test]
fn test_null_slots_hold_sentinels() {
	let columns = marshal(&fixture::measurements(10)).unwrap();

	let temperature = columns.column("temperature").unwrap();
	assert_eq!(temperature.null_count(), 2);
	assert_eq!(temperature.values::<f64>().unwrap()[0], 0.0);
	assert_eq!(temperature.values::<f64>().unwrap()[5], 0.0);

	let label = columns.column("label").unwrap();
	assert_eq!(label.null_count(), 4);
	let var = label.var().unwrap();
	for row in [0, 3, 6, 9] {
		assert_eq!(var.get(row), Some(&b""[..]));
	}
	assert_eq!(label.descriptor().wire_type(), WireType::Utf8);
}

#[test]
fn test_extreme_values() {
	let rs = fixture::table(
		&[("a", Oid::INT2), ("b", Oid::INT4), ("c", Oid::INT8), ("d", Oid::FLOAT8)],
		&[
			vec![Value::Int2(i16::MIN), Value::Int4(i32::MIN), Value::Int8(i64::MIN), Value::Float8(f64::NEG_INFINITY)],
			vec![Value::Int2(i16::MAX), Value::Int4(i32::MAX), Value::Int8(i64::MAX), Value::Float8(f64::MIN_POSITIVE)],
		],
	);
	let columns = marshal(&rs).unwrap();
	assert_eq!(columns[0].values::<i16>(), Some(&[i16::MIN, i16::MAX][..]));
	assert_eq!(columns[1].values::<i32>(), Some(&[i32::MIN, i32::MAX][..]));
	assert_eq!(columns[2].values::<i64>(), Some(&[i64::MIN, i64::MAX][..]));
	assert_eq!(columns[3].values::<f64>(), Some(&[f64::NEG_INFINITY, f64::MIN_POSITIVE][..]));
}

#[test]
fn test_bytea_both_formats() {
	let payloads: Vec<Vec<u8>> = vec![vec![], vec![0x00, 0xff, b'\\'], b"plain".to_vec()];
	let rows: Vec<Vec<Value>> = payloads.iter().map(|p| vec![Value::Bytea(p.clone())]).collect();

	for format in [Format::Binary, Format::Text] {
		let rs = fixture::table_with_format(&[("payload", Oid::BYTEA)], &rows, format);
		let columns = marshal(&rs).unwrap();
		let var = columns[0].var().unwrap();
		assert_eq!(var.iter().collect::<Vec<_>>(), payloads.iter().map(|p| p.as_slice()).collect::<Vec<_>>());
		assert_eq!(columns[0].null_count(), 0);
	}
}

#[test]
fn test_empty_result_set() {
	let columns = marshal(&fixture::measurements(0)).unwrap();
	assert_eq!(columns.row_count(), 0);
	assert_eq!(columns.column_count(), MEASUREMENT_COLUMNS.len());
	for column in columns.iter() {
		assert!(column.is_empty());
		assert!(column.nulls().is_empty());
	}
}

#[test]
fn test_unsupported_type_produces_nothing() {
	let rs = fixture::table(
		&[("id", Oid::INT4), ("created", Oid(1114))],
		&[vec![Value::Int4(1), Value::Int8(0)]],
	);
	match marshal(&rs) {
		Err(MarshalError::UnsupportedType {
			column,
			oid,
		}) => {
			assert_eq!(column, "created");
			assert_eq!(oid, Oid(1114));
		}
		other => panic!("unexpected {:?}", other),
	}
}

#[test]
fn test_deterministic_output() {
	init_tracing();
	let rs = fixture::measurements(2_000);

	let first = marshal(&rs).unwrap();
	let second = marshal(&rs).unwrap();
	let sequential = Marshaller::new(MarshalConfig::sequential()).marshal(&rs).unwrap();
	let parallel = Marshaller::new(MarshalConfig::new().parallel_threshold(1)).marshal(&rs).unwrap();

	for other in [&second, &sequential, &parallel] {
		assert_eq!(first.column_count(), other.column_count());
		for (a, b) in first.iter().zip(other.iter()) {
			assert_eq!(a.descriptor(), b.descriptor());
			assert_eq!(a.data().to_bytes(), b.data().to_bytes());
			assert_eq!(a.nulls().as_bytes(), b.nulls().as_bytes());
		}
	}
}

#[test]
fn test_text_format_matches_binary() {
	let binary = marshal(&fixture::measurements(300)).unwrap();
	let text = marshal(&fixture::measurements_text(300)).unwrap();
	for (a, b) in binary.iter().zip(text.iter()) {
		assert_eq!(a.data(), b.data());
		assert_eq!(a.nulls(), b.nulls());
	}
}

#[test]
fn test_stale_mid_run_discards_output() {
	let rows = fixture::measurement_rows(20);
	let mut builder = MemoryResultSet::builder();
	for (name, oid) in MEASUREMENT_COLUMNS {
		builder = builder.column(name, oid);
	}
	let rs = builder.rows(rows.iter().map(|row| row.iter().map(Value::binary).collect())).close_after(45).build();

	let err = Marshaller::new(MarshalConfig::sequential()).marshal(&rs).unwrap_err();
	assert!(matches!(err, MarshalError::StaleResultSet { .. }));
	assert_eq!(err.code(), "MARSHAL_002");
}

#[test]
fn test_padded_text_export() {
	let columns = marshal(&fixture::people()).unwrap();
	let padded = columns[1].var().unwrap().to_padded(None).unwrap();
	assert_eq!(padded.width(), 3);
	assert_eq!(padded.as_bytes(), b"a\0\0\0\0\0ccc");

	let truncated = columns[1].var().unwrap().to_padded(Some(2)).unwrap();
	assert_eq!(truncated.get(2), Some(&b"cc"[..]));
}
