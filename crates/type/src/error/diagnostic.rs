// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Structured, user-facing description of an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub column: Option<String>,
	pub row: Option<usize>,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		writeln!(f, "Error {}", self.code)?;
		writeln!(f, "  {}", self.message)?;
		match (&self.column, self.row) {
			(Some(column), Some(row)) => writeln!(f, "  at column '{}', row {}", column, row)?,
			(Some(column), None) => writeln!(f, "  at column '{}'", column)?,
			_ => {}
		}
		if let Some(help) = &self.help {
			writeln!(f, "  help: {}", help)?;
		}
		for note in &self.notes {
			writeln!(f, "  note: {}", note)?;
		}
		Ok(())
	}
}
