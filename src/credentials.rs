// File: src/credentials.rs
use crate::error::{Error, Result};
use crate::paths::AppPaths;
use crate::platform::TokenBackend;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[cfg(not(target_os = "android"))]
use fs2::FileExt;

/// Name under which the session token is stored, in every backend.
pub const TOKEN_KEY: &str = "jwt_token";

/// Outcome of reading the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    Present(String),
    Absent,
    ReadError(String),
}

impl TokenLookup {
    fn from_value(value: Option<String>) -> Self {
        match value {
            Some(token) if !token.is_empty() => TokenLookup::Present(token),
            _ => TokenLookup::Absent,
        }
    }
}

/// Durable storage for the single session token.
///
/// Nothing else in the crate touches the persisted token.
pub trait CredentialStore: Send + Sync {
    fn lookup(&self) -> TokenLookup;

    fn save_token(&self, token: &str) -> Result<()>;

    /// Removes the token. Deleting an absent token succeeds.
    fn delete_token(&self) -> Result<()>;

    /// Two-state view of [`CredentialStore::lookup`]: a read failure is
    /// reported as "no token".
    fn get_token(&self) -> Option<String> {
        match self.lookup() {
            TokenLookup::Present(token) => Some(token),
            TokenLookup::Absent => None,
            TokenLookup::ReadError(e) => {
                log::warn!("Error retrieving token: {}", e);
                None
            }
        }
    }
}

const SAVE_FAILED: &str = "Failed to store authentication token.";
const DELETE_FAILED: &str = "Failed to delete authentication token.";

fn write_failure(message: &'static str, e: impl std::fmt::Display) -> Error {
    log::error!("{} ({})", message, e);
    Error::StorageWriteFailure(message.to_string())
}

fn reject_empty(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::StorageWriteFailure(
            "Refusing to store an empty authentication token.".into(),
        ));
    }
    Ok(())
}

/// Sidecar lock file path (e.g., "storage.json.lock")
#[cfg(not(target_os = "android"))]
fn get_lock_path(file_path: &Path) -> PathBuf {
    let mut lock_path = file_path.to_path_buf();
    if let Some(ext) = lock_path.extension() {
        let mut new_ext = ext.to_os_string();
        new_ext.push(".lock");
        lock_path.set_extension(new_ext);
    } else {
        lock_path.set_extension("lock");
    }
    lock_path
}

/// Execute a closure while holding an exclusive lock on the sidecar file.
fn with_lock<F, T>(file_path: &Path, f: F) -> std::io::Result<T>
where
    F: FnOnce() -> std::io::Result<T>,
{
    #[cfg(target_os = "android")]
    {
        // The app sandbox is single-process.
        let _ = file_path;
        f()
    }

    #[cfg(not(target_os = "android"))]
    {
        let lock_path = get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }
}

/// Atomic write: write to a .tmp sibling then rename over the target.
/// The temporary file is owner-only from the moment it exists.
fn atomic_write(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let mut file = private_open_options().open(&tmp_path)?;
    // A stale .tmp keeps its old mode through open.
    restrict_permissions(&file)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp_path, path)
}

fn private_open_options() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

#[cfg(unix)]
fn restrict_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn remove_optional(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

// --- SECURE FILE BACKEND (native platforms) ---

/// One private file per key inside a dedicated directory.
pub struct SecureFileStore {
    dir: PathBuf,
}

impl SecureFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self) -> PathBuf {
        self.dir.join(TOKEN_KEY)
    }
}

impl CredentialStore for SecureFileStore {
    fn lookup(&self) -> TokenLookup {
        let path = self.entry_path();
        if !self.dir.exists() {
            return TokenLookup::Absent;
        }
        match with_lock(&path, || read_optional(&path)) {
            Ok(value) => TokenLookup::from_value(value),
            Err(e) => TokenLookup::ReadError(e.to_string()),
        }
    }

    fn save_token(&self, token: &str) -> Result<()> {
        reject_empty(token)?;
        let path = self.entry_path();
        fs::create_dir_all(&self.dir)
            .and_then(|_| with_lock(&path, || atomic_write(&path, token.as_bytes())))
            .map_err(|e| write_failure(SAVE_FAILED, e))?;
        log::info!("Token stored successfully.");
        Ok(())
    }

    fn delete_token(&self) -> Result<()> {
        let path = self.entry_path();
        if !self.dir.exists() {
            return Ok(());
        }
        with_lock(&path, || remove_optional(&path)).map_err(|e| write_failure(DELETE_FAILED, e))?;
        log::info!("Token deleted successfully.");
        Ok(())
    }
}

// --- KEY-VALUE BACKEND (web) ---

/// A JSON object file shared by several keys; the token is one entry.
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_map(path: &Path) -> std::io::Result<BTreeMap<String, String>> {
        match read_optional(path)? {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(&json)
                .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e)),
            _ => Ok(BTreeMap::new()),
        }
    }

    fn store_map(path: &Path, map: &BTreeMap<String, String>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;
        atomic_write(path, json.as_bytes())
    }

    fn update<F>(&self, f: F) -> std::io::Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        with_lock(&self.path, || {
            let mut map = Self::load_map(&self.path)?;
            if f(&mut map) {
                Self::store_map(&self.path, &map)?;
            }
            Ok(())
        })
    }
}

impl CredentialStore for KeyValueStore {
    fn lookup(&self) -> TokenLookup {
        if !self.path.exists() {
            return TokenLookup::Absent;
        }
        match with_lock(&self.path, || Self::load_map(&self.path)) {
            Ok(mut map) => TokenLookup::from_value(map.remove(TOKEN_KEY)),
            Err(e) => TokenLookup::ReadError(e.to_string()),
        }
    }

    fn save_token(&self, token: &str) -> Result<()> {
        reject_empty(token)?;
        self.update(|map| {
            map.insert(TOKEN_KEY.to_string(), token.to_string());
            true
        })
        .map_err(|e| write_failure(SAVE_FAILED, e))?;
        log::info!("Token stored successfully.");
        Ok(())
    }

    fn delete_token(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| map.remove(TOKEN_KEY).is_some())
            .map_err(|e| write_failure(DELETE_FAILED, e))?;
        log::info!("Token deleted successfully.");
        Ok(())
    }
}

// --- IN-MEMORY BACKEND ---

#[derive(Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn lookup(&self) -> TokenLookup {
        match self.token.lock() {
            Ok(guard) => TokenLookup::from_value(guard.clone()),
            Err(e) => TokenLookup::ReadError(e.to_string()),
        }
    }

    fn save_token(&self, token: &str) -> Result<()> {
        reject_empty(token)?;
        let mut guard = self.token.lock().map_err(|e| write_failure(SAVE_FAILED, e))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn delete_token(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|e| write_failure(DELETE_FAILED, e))?;
        *guard = None;
        Ok(())
    }
}

/// Opens the store matching the platform's backend in the app data dir.
pub fn open_store(backend: TokenBackend) -> anyhow::Result<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match backend {
        TokenBackend::SecureFile => Arc::new(SecureFileStore::new(AppPaths::get_secure_token_dir()?)),
        TokenBackend::KeyValue => Arc::new(KeyValueStore::new(AppPaths::get_key_value_path()?)),
    };
    Ok(store)
}
