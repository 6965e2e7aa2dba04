// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod descriptor;
pub mod error;
pub mod util;
pub mod wire;

pub use descriptor::ColumnDescriptor;
pub use error::{Diagnostic, IntoDiagnostic, MarshalError};
pub use util::{bitvec::BitVec, hex};
pub use wire::{Format, GetWireType, Oid, WireType};

pub type Result<T> = std::result::Result<T, MarshalError>;
