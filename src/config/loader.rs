//! Configuration loading from disk.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::MinterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MinterConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: MinterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the config file when present, otherwise fall back to defaults.
pub fn load_or_default(path: &Path) -> Result<MinterConfig, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        Ok(MinterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("minter-config-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_load_valid_file() {
        let path = temp_path("valid.toml");
        std::fs::write(&path, "[wallets]\ncount = 3\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.wallets.count, 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let path = temp_path("invalid.toml");
        std::fs::write(&path, "[wallets]\ncount = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_or_default(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.wallets.count, 5);
    }
}
