// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// Set from the Android Context; wins over everything else.
static ANDROID_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

pub const TEST_DIR_VAR: &str = "DEVSCOUT_TEST_DIR";

const CONFIG_FILE: &str = "config.toml";
const SECURE_DIR: &str = "secure";
const KEY_VALUE_FILE: &str = "storage.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    Data,
    Config,
}

impl DirKind {
    fn name(self) -> &'static str {
        match self {
            DirKind::Data => "data",
            DirKind::Config => "config",
        }
    }

    fn locate(self, root: Option<&Path>) -> Option<PathBuf> {
        if let Some(root) = root {
            return Some(root.join(self.name()));
        }
        let proj = ProjectDirs::from("com", "devscout", "devscout")?;
        let dir = match self {
            DirKind::Data => proj.data_dir(),
            DirKind::Config => proj.config_dir(),
        };
        Some(dir.to_path_buf())
    }
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory: {:?}", path))?;
    Ok(path)
}

pub struct AppPaths;

impl AppPaths {
    /// Initialize the Android data directory. Must be called once at startup.
    pub fn init_android_path(path: String) {
        let _ = ANDROID_DATA_DIR.set(PathBuf::from(path));
    }

    /// Android files dir, then `DEVSCOUT_TEST_DIR`, else `None` for OS defaults.
    fn override_root() -> Option<PathBuf> {
        ANDROID_DATA_DIR
            .get()
            .cloned()
            .or_else(|| env::var_os(TEST_DIR_VAR).map(PathBuf::from))
    }

    pub fn dir(kind: DirKind) -> Result<PathBuf> {
        let path = kind
            .locate(Self::override_root().as_deref())
            .with_context(|| format!("Could not determine {} directory", kind.name()))?;
        ensure_dir(path)
    }

    pub fn get_data_dir() -> Result<PathBuf> {
        Self::dir(DirKind::Data)
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Ok(Self::dir(DirKind::Config)?.join(CONFIG_FILE))
    }

    /// Directory holding one private file per secret.
    pub fn get_secure_token_dir() -> Result<PathBuf> {
        ensure_dir(Self::get_data_dir()?.join(SECURE_DIR))
    }

    pub fn get_key_value_path() -> Result<PathBuf> {
        Ok(Self::get_data_dir()?.join(KEY_VALUE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_override_root_separates_kinds() {
        let root = Path::new("/tmp/devscout-root");
        assert_eq!(DirKind::Data.locate(Some(root)), Some(root.join("data")));
        assert_eq!(DirKind::Config.locate(Some(root)), Some(root.join("config")));
    }

    #[test]
    fn test_ensure_dir_creates_nested_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("data").join(SECURE_DIR);
        assert_eq!(ensure_dir(nested.clone()).unwrap(), nested);
        assert!(nested.is_dir());
        assert!(ensure_dir(nested).is_ok());
    }
}
