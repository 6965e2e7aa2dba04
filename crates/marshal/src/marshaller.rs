// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pgcolumnar_column::{ColumnData, Columns, TypedBuffer};
use pgcolumnar_type::{BitVec, ColumnDescriptor, MarshalError, Result, WireType};
use rayon::prelude::*;
use tracing::{debug, instrument, trace, warn};

use crate::{
	config::MarshalConfig,
	decode::{self, DecodeError},
	result_set::{ResultSet, ResultSetError},
};

/// Turns result sets into owned, column-major typed buffers.
///
/// Holds nothing but its configuration; every call is an independent,
/// single-pass transformation.
#[derive(Debug, Clone, Default)]
pub struct Marshaller {
	config: MarshalConfig,
}

impl Marshaller {
	pub fn new(config: MarshalConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &MarshalConfig {
		&self.config
	}

	/// Derives the descriptor of every column, failing on the first column
	/// whose type has no native representation.
	#[instrument(name = "marshal::describe", level = "debug", skip(self, result_set))]
	pub fn describe<R: ResultSet + ?Sized>(&self, result_set: &R) -> Result<Vec<ColumnDescriptor>> {
		if !result_set.is_valid() {
			return Err(MarshalError::stale("result set handle is not valid"));
		}
		(0..result_set.column_count()).map(|column| describe_column(result_set, column)).collect()
	}

	/// Converts every column of `result_set` into a [`TypedBuffer`].
	///
	/// All columns are described before anything is allocated. On error every
	/// buffer built so far is dropped before the error is returned.
	#[instrument(
		name = "marshal::marshal",
		level = "debug",
		skip(self, result_set),
		fields(rows = result_set.row_count(), columns = result_set.column_count())
	)]
	pub fn marshal<R: ResultSet + Sync + ?Sized>(&self, result_set: &R) -> Result<Columns> {
		let descriptors = self.describe(result_set)?;
		let rows = result_set.row_count();

		let buffers = if self.config.use_parallel(rows, descriptors.len()) {
			debug!("converting columns in parallel");
			let results: Vec<Result<TypedBuffer>> = descriptors
				.into_par_iter()
				.enumerate()
				.map(|(column, descriptor)| self.marshal_column(result_set, column, descriptor, rows))
				.collect();
			// first error by column index, whatever order the workers finished in
			results.into_iter().collect::<Result<Vec<_>>>()
		} else {
			descriptors
				.into_iter()
				.enumerate()
				.map(|(column, descriptor)| self.marshal_column(result_set, column, descriptor, rows))
				.collect::<Result<Vec<_>>>()
		};

		let buffers = buffers.and_then(|buffers| {
			if result_set.is_valid() {
				Ok(buffers)
			} else {
				Err(MarshalError::stale("result set was invalidated during marshalling"))
			}
		});

		match buffers {
			Ok(buffers) => {
				debug!(rows, columns = buffers.len(), "result set marshalled");
				Ok(Columns::new(rows, buffers))
			}
			Err(err) => {
				warn!(code = err.code(), error = %err, "marshalling failed, partial output discarded");
				Err(err)
			}
		}
	}

	fn marshal_column<R: ResultSet + ?Sized>(
		&self,
		result_set: &R,
		column: usize,
		descriptor: ColumnDescriptor,
		rows: usize,
	) -> Result<TypedBuffer> {
		let wire_type = descriptor.wire_type();
		let mut data = ColumnData::try_with_capacity(wire_type, rows, 0)
			.map_err(|_| MarshalError::allocation_failure(descriptor.name(), rows))?;
		let mut nulls = BitVec::try_with_capacity(rows)
			.map_err(|_| MarshalError::allocation_failure(descriptor.name(), rows))?;

		for row in 0..rows {
			let field = result_set.field(row, column).map_err(stale)?;

			if WireType::from_oid(field.oid) != Some(wire_type) {
				return Err(MarshalError::type_mismatch(
					descriptor.name(),
					wire_type,
					Some(row),
					format!("the client reports {} for row {}", field.oid, row),
				));
			}

			match field.value {
				None => {
					if self.config.enforce_nullability && !descriptor.nullable() {
						return Err(MarshalError::type_mismatch(
							descriptor.name(),
							wire_type,
							Some(row),
							format!("row {} is NULL in a non-nullable column", row),
						));
					}
					data.push_null();
					nulls.push(true);
				}
				Some(raw) => {
					decode::push_value(&mut data, descriptor.format(), raw, self.config.validate_utf8)
						.map_err(|err| match err {
							DecodeError::Invalid(reason) => MarshalError::type_mismatch(
								descriptor.name(),
								wire_type,
								Some(row),
								format!("row {}: {}", row, reason),
							),
							DecodeError::Alloc(_) => MarshalError::allocation_failure(descriptor.name(), rows),
						})?;
					nulls.push(false);
				}
			}
		}

		trace!(column = descriptor.name(), nulls = nulls.count_ones(), "column converted");
		Ok(TypedBuffer::new(descriptor, data, nulls))
	}
}

fn describe_column<R: ResultSet + ?Sized>(result_set: &R, column: usize) -> Result<ColumnDescriptor> {
	let name = result_set.column_name(column).map_err(stale)?;
	let oid = result_set.column_oid(column).map_err(stale)?;
	let wire_type = WireType::from_oid(oid).ok_or_else(|| MarshalError::unsupported_type(name, oid))?;
	let format = result_set.column_format(column).map_err(stale)?;
	let nullable = result_set.column_nullable(column).map_err(stale)?;
	Ok(ColumnDescriptor::new(name, oid, wire_type, format, nullable))
}

fn stale(err: ResultSetError) -> MarshalError {
	MarshalError::stale(err.to_string())
}

/// [`Marshaller::describe`] with the default configuration.
pub fn describe<R: ResultSet + ?Sized>(result_set: &R) -> Result<Vec<ColumnDescriptor>> {
	Marshaller::default().describe(result_set)
}

/// [`Marshaller::marshal`] with the default configuration.
pub fn marshal<R: ResultSet + Sync + ?Sized>(result_set: &R) -> Result<Columns> {
	Marshaller::default().marshal(result_set)
}
