//! Data directory layout.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "EDGO_DATA_DIR";

/// Resolve the data directory.
///
/// Priority: `EDGO_DATA_DIR`, then `~/.edgo`, then `./.edgo`.
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_with(|key| std::env::var(key).ok())
}

/// [`resolve_data_dir`] with an injectable environment lookup.
pub fn resolve_data_dir_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".edgo");
    }

    PathBuf::from(".edgo")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let dir = resolve_data_dir_with(|key| {
            (key == DATA_DIR_ENV).then(|| "/tmp/edgo-test".to_string())
        });
        assert_eq!(dir, PathBuf::from("/tmp/edgo-test"));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let dir = resolve_data_dir_with(|_| Some("  ".to_string()));
        assert!(dir.ends_with(".edgo"));
    }

    #[test]
    fn test_default_ends_with_dot_edgo() {
        assert!(resolve_data_dir_with(|_| None).ends_with(".edgo"));
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            config_path(Path::new("/data")),
            PathBuf::from("/data/config.toml")
        );
    }
}
