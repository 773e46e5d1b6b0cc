//! Configuration loader for EDGO.
//!
//! Reads `config.toml` from the data directory (`~/.edgo/` by default) into
//! [`CounselorConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use edgo_types::config::{ConfigError, CounselorConfig};

use crate::filesystem::config_path;

/// Strictly read and parse a config file.
pub async fn read_config(path: &Path) -> Result<CounselorConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load `{data_dir}/config.toml`.
///
/// - Missing file: defaults.
/// - Unreadable or malformed file: logs a warning, defaults.
pub async fn load_config(data_dir: &Path) -> CounselorConfig {
    let path = config_path(data_dir);

    match read_config(&path).await {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            CounselorConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            CounselorConfig::default()
        }
    }
}

/// Read the persona template named by `persona_file`, if any.
///
/// Relative paths resolve against the data directory.
pub async fn load_persona(
    config: &CounselorConfig,
    data_dir: &Path,
) -> Result<Option<String>, ConfigError> {
    let Some(file) = &config.persona_file else {
        return Ok(None);
    };
    let path = resolve_relative(file, data_dir);

    let template = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), "using custom persona template");
    Ok(Some(template))
}

fn resolve_relative(file: &Path, data_dir: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        data_dir.join(file)
    }
}
