// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

#[derive(Debug, thiserror::Error)]
pub enum TracingError {
	#[error("invalid log filter '{filter}': {reason}")]
	InvalidFilter {
		filter: String,
		reason: String,
	},

	#[error("a global tracing subscriber is already installed")]
	AlreadyInstalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	#[default]
	Fmt,
	Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
	/// `EnvFilter` directives, used when `RUST_LOG` is not set.
	pub filter: String,
	pub format: OutputFormat,
	pub with_target: bool,
	pub with_thread_names: bool,
	pub ansi: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
			format: OutputFormat::Fmt,
			with_target: true,
			with_thread_names: false,
			ansi: true,
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct TracingBuilder {
	config: TracingConfig,
	ignore_env: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_config(config: TracingConfig) -> Self {
		Self {
			config,
			ignore_env: false,
		}
	}

	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.config.filter = filter.into();
		self
	}

	pub fn with_format(mut self, format: OutputFormat) -> Self {
		self.config.format = format;
		self
	}

	pub fn json(self) -> Self {
		self.with_format(OutputFormat::Json)
	}

	pub fn with_target(mut self, enabled: bool) -> Self {
		self.config.with_target = enabled;
		self
	}

	pub fn with_thread_names(mut self, enabled: bool) -> Self {
		self.config.with_thread_names = enabled;
		self
	}

	pub fn with_ansi(mut self, enabled: bool) -> Self {
		self.config.ansi = enabled;
		self
	}

	/// Use the configured filter even when `RUST_LOG` is set.
	pub fn ignore_env(mut self) -> Self {
		self.ignore_env = true;
		self
	}

	pub fn config(&self) -> &TracingConfig {
		&self.config
	}

	fn filter(&self) -> Result<EnvFilter, TracingError> {
		if !self.ignore_env {
			if let Ok(filter) = EnvFilter::try_from_default_env() {
				return Ok(filter);
			}
		}
		EnvFilter::try_new(&self.config.filter).map_err(|e| TracingError::InvalidFilter {
			filter: self.config.filter.clone(),
			reason: e.to_string(),
		})
	}

	pub fn build(self) -> Result<Box<dyn Subscriber + Send + Sync>, TracingError> {
		let filter = self.filter()?;
		let registry = tracing_subscriber::registry().with(filter);
		let config = self.config;
		Ok(match config.format {
			OutputFormat::Fmt => Box::new(
				registry.with(
					fmt::layer()
						.with_target(config.with_target)
						.with_thread_names(config.with_thread_names)
						.with_ansi(config.ansi),
				),
			),
			OutputFormat::Json => Box::new(
				registry.with(
					fmt::layer()
						.json()
						.with_target(config.with_target)
						.with_thread_names(config.with_thread_names),
				),
			),
		})
	}

	/// Installs the subscriber as the process-wide default.
	pub fn install(self) -> Result<(), TracingError> {
		let subscriber = self.build()?;
		tracing::subscriber::set_global_default(subscriber).map_err(|_| TracingError::AlreadyInstalled)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config() {
		let builder = TracingBuilder::new();
		assert_eq!(builder.config().filter, "info");
		assert_eq!(builder.config().format, OutputFormat::Fmt);
	}

	#[test]
	fn test_config_from_json() {
		let config: TracingConfig = serde_json::from_str(r#"{"filter": "pgcolumnar_marshal=debug", "format": "json"}"#).unwrap();
		assert_eq!(config.filter, "pgcolumnar_marshal=debug");
		assert_eq!(config.format, OutputFormat::Json);
		assert!(config.with_target);
	}

	#[test]
	fn test_invalid_filter() {
		let result = TracingBuilder::new().with_filter("marshal=notalevel").ignore_env().build();
		assert!(matches!(result, Err(TracingError::InvalidFilter { .. })));
	}

	#[test]
	fn test_build_scoped() {
		for builder in [TracingBuilder::new(), TracingBuilder::new().json()] {
			let subscriber = builder.with_filter("debug").ignore_env().with_ansi(false).build().unwrap();
			tracing::subscriber::with_default(subscriber, || {
				tracing::debug!(rows = 3, "scoped event");
			});
		}
	}
}
