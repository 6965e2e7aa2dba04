// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Configuration of a [`Marshaller`](crate::Marshaller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
	/// Convert columns concurrently on the rayon pool.
	pub parallel: bool,
	/// Minimum number of fields (rows x columns) before the parallel path is taken.
	pub parallel_threshold: usize,
	/// Reject text columns that are not valid UTF-8.
	pub validate_utf8: bool,
	/// Reject NULLs in columns the result set describes as non-nullable.
	pub enforce_nullability: bool,
}

impl Default for MarshalConfig {
	fn default() -> Self {
		Self {
			parallel: true,
			parallel_threshold: 16_384,
			validate_utf8: true,
			enforce_nullability: true,
		}
	}
}

impl MarshalConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Always convert on the calling thread.
	pub fn sequential() -> Self {
		Self {
			parallel: false,
			..Self::default()
		}
	}

	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	pub fn parallel(mut self, parallel: bool) -> Self {
		self.parallel = parallel;
		self
	}

	pub fn parallel_threshold(mut self, threshold: usize) -> Self {
		self.parallel_threshold = threshold;
		self
	}

	pub fn validate_utf8(mut self, validate: bool) -> Self {
		self.validate_utf8 = validate;
		self
	}

	pub fn enforce_nullability(mut self, enforce: bool) -> Self {
		self.enforce_nullability = enforce;
		self
	}

	pub(crate) fn use_parallel(&self, rows: usize, columns: usize) -> bool {
		self.parallel && columns > 1 && rows.saturating_mul(columns) >= self.parallel_threshold
	}
}
