//! Framework configuration loader.
//!
//! Reads `palaver.toml` from the given path and deserializes it into
//! [`FrameworkConfig`]. Falls back to defaults when the file is missing or
//! malformed, so a bare deployment still starts (with no platforms bound).

use std::path::Path;

use palaver_types::config::FrameworkConfig;

/// Load framework configuration from a TOML file.
///
/// - Missing file: returns [`FrameworkConfig::default()`] quietly.
/// - Unreadable or unparseable file: logs a warning and returns the default.
pub async fn load_config(path: &Path) -> FrameworkConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return FrameworkConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return FrameworkConfig::default();
        }
    };

    match toml::from_str::<FrameworkConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            FrameworkConfig::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
