// Filesystem locations for journal's persistent files.
// Storage, logs and config live under the platform's project directories.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "journal")
}

/// Get the base cache directory (~/.cache/journal on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory (~/.config/journal on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the key-value storage file holding cache entries and the credential.
pub fn storage_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("storage.json"))
}

/// Path to the log file. The terminal belongs to the UI, so logs go here.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("journal.log"))
}

/// Path to the optional user config file.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_project_dirs() {
        // Headless CI may have no home directory; only check shape when present.
        if let (Some(cache), Some(storage), Some(log)) = (cache_dir(), storage_path(), log_path()) {
            assert!(storage.starts_with(&cache));
            assert!(storage.ends_with("storage.json"));
            assert!(log.ends_with("journal.log"));
        }
        if let Some(config) = config_path() {
            assert!(config.ends_with("config.toml"));
        }
    }
}
