//! Configuration Loader - File Loading and Validation
//!
//! Handles locating and loading `config.toml`, validating all
//! parameters, and providing clear error messages for
//! misconfiguration.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CONTOSO_CONFIG";

/// Config file read when `CONTOSO_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Resolve configuration for the running process.
///
/// An explicit `CONTOSO_CONFIG` path must exist. Without it,
/// `config.toml` is read if present, otherwise defaults apply.
pub fn resolve_config() -> Result<AppConfig> {
  if let Ok(path) = std::env::var(CONFIG_ENV) {
    return load_config(&path);
  }

  if Path::new(DEFAULT_CONFIG_PATH).exists() {
    return load_config(DEFAULT_CONFIG_PATH);
  }

  let config = AppConfig::default();
  validate_config(&config)?;
  Ok(config)
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    path = %path.display(),
    bind = %config.service.bind_address,
    metrics_enabled = config.metrics.enabled,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Parseable listener addresses
/// - Distinct main and metrics listeners
/// - Finite, strictly increasing histogram buckets
/// - Non-empty log level
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.service.log_level.trim().is_empty(),
    "service.log_level must not be empty"
  );

  let main_addr: SocketAddr = config
    .service
    .bind_address
    .parse()
    .with_context(|| {
      format!(
        "service.bind_address is not a socket address: {}",
        config.service.bind_address
      )
    })?;

  let metrics_addr: SocketAddr = config
    .metrics
    .bind_address
    .parse()
    .with_context(|| {
      format!(
        "metrics.bind_address is not a socket address: {}",
        config.metrics.bind_address
      )
    })?;

  if config.metrics.enabled {
    anyhow::ensure!(
      main_addr != metrics_addr,
      "metrics.bind_address must differ from service.bind_address ({main_addr})"
    );
  }

  let buckets = &config.metrics.duration_buckets;
  anyhow::ensure!(
    !buckets.is_empty(),
    "metrics.duration_buckets must not be empty"
  );
  anyhow::ensure!(
    buckets.iter().all(|b| b.is_finite()),
    "metrics.duration_buckets must be finite, got {buckets:?}"
  );
  anyhow::ensure!(
    buckets.windows(2).all(|w| w[0] < w[1]),
    "metrics.duration_buckets must be strictly increasing, got {buckets:?}"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_file_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.service.bind_address, "0.0.0.0:8000");
    assert_eq!(config.metrics.bind_address, "0.0.0.0:8001");
    assert!(config.metrics.enabled);
    assert_eq!(config.metrics.duration_buckets.len(), 14);
  }

  #[test]
  fn test_partial_sections_keep_defaults() {
    let config = parse_config(
      r#"
      [service]
      log_level = "debug"

      [metrics]
      enabled = false
      "#,
    )
    .unwrap();
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.service.name, "contoso-sales-metrics");
    assert!(!config.metrics.enabled);
    assert!(config.metrics.process_metrics);
  }

  #[test]
  fn test_rejects_unsorted_buckets() {
    let result = parse_config(
      r#"
      [metrics]
      duration_buckets = [0.5, 0.1]
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_bad_address() {
    let result = parse_config(
      r#"
      [service]
      bind_address = "localhost"
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_shared_listener() {
    let result = parse_config(
      r#"
      [service]
      bind_address = "0.0.0.0:9000"

      [metrics]
      bind_address = "0.0.0.0:9000"
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_shared_listener_allowed_when_metrics_disabled() {
    let result = parse_config(
      r#"
      [service]
      bind_address = "0.0.0.0:9000"

      [metrics]
      enabled = false
      bind_address = "0.0.0.0:9000"
      "#,
    );
    assert!(result.is_ok());
  }
}
