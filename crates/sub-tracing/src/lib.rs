// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Installs a `tracing` subscriber for applications embedding pgcolumnar.
//!
//! The library crates only emit spans and events; nothing is printed unless
//! the host application installs a subscriber, e.g. through
//! [`TracingFactory`].

mod builder;
mod factory;

pub use builder::{OutputFormat, TracingBuilder, TracingConfig, TracingError};
pub use factory::{TracingConfigurator, TracingFactory};
