// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use pgcolumnar_type::WireType;

/// A buffer whose parts do not describe a consistent layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
	#[error("offsets must start at 0")]
	OffsetsNotZeroBased,

	#[error("offset {index} ({offset}) is smaller than the offset before it")]
	OffsetsDecreasing {
		index: usize,
		offset: u64,
	},

	#[error("last offset {offset} is past the end of the {len} byte pool")]
	OffsetOutOfBounds {
		offset: u64,
		len: usize,
	},

	#[error("column '{column}' has {data} values but {nulls} null bits")]
	NullMaskLength {
		column: String,
		data: usize,
		nulls: usize,
	},

	#[error("column '{column}' is described as {expected} but holds {actual} data")]
	DataType {
		column: String,
		expected: WireType,
		actual: WireType,
	},

	#[error("column '{column}' has {len} rows, expected {row_count}")]
	RowCount {
		column: String,
		len: usize,
		row_count: usize,
	},

	#[error("{rows} values padded to {width} bytes do not fit in memory")]
	PaddedTooLarge {
		rows: usize,
		width: usize,
	},
}
