//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`. Every field
//! has a default, so an empty file (or no file at all) yields a
//! working service on :8000 with metrics on :8001.

pub mod loader;

use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Service identity and main listener.
  pub service: ServiceConfig,
  /// Metrics instruments and the secondary exposition listener.
  pub metrics: MetricsConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  pub log_level: String,
  /// Main application listener.
  pub bind_address: String,
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
  /// Start the secondary exposition listener.
  pub enabled: bool,
  /// Secondary exposition listener address.
  pub bind_address: String,
  /// Upper bounds (seconds) of the request duration histogram.
  pub duration_buckets: Vec<f64>,
  /// Register the `process_*` collector (Linux only).
  pub process_metrics: bool,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: default_service_name(),
      log_level: default_log_level(),
      bind_address: default_bind_address(),
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      bind_address: default_metrics_addr(),
      duration_buckets: default_duration_buckets(),
      process_metrics: true,
    }
  }
}

// Default value functions

fn default_service_name() -> String {
  "contoso-sales-metrics".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_bind_address() -> String {
  "0.0.0.0:8000".to_string()
}

fn default_metrics_addr() -> String {
  "0.0.0.0:8001".to_string()
}

/// Same bounds Prometheus client libraries use by default.
fn default_duration_buckets() -> Vec<f64> {
  vec![
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
  ]
}
