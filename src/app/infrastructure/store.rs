use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Keys used by the application. Each one is owned by exactly one component.
pub mod keys {
    pub const PREFERENCES: &str = "preferences";
    pub const FONT_SIZE: &str = "fontSize";
    pub const LAST_READ: &str = "lastRead";
    pub const FAVORITES: &str = "favorites";

    pub const ALL: [&str; 4] = [PREFERENCES, FONT_SIZE, LAST_READ, FAVORITES];
}

const VALUE_EXT: &str = "value";
const TEMP_EXT: &str = "tmp";

/// Whole-value key/value persistence. Values are overwritten, never patched.
pub trait DurableStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
    fn clear(&self) -> StoreResult<()>;
}

fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the default store directory: data_dir/proposito/store/
    pub fn default_dir() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("proposito");
        path.push("store");
        path
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{VALUE_EXT}")))
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let write_err = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write beside the target and rename so readers never see a torn value
        let temp_path = self.dir.join(format!("{key}.{TEMP_EXT}"));
        fs::write(&temp_path, value).map_err(write_err)?;
        if let Err(source) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(source));
        }

        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn clear(&self) -> StoreResult<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(StoreError::Clear(err)),
        };

        for entry in entries {
            let path = entry.map_err(StoreError::Clear)?.path();
            let owned = path
                .extension()
                .is_some_and(|ext| ext == VALUE_EXT || ext == TEMP_EXT);
            if owned && path.is_file() {
                fs::remove_file(&path).map_err(StoreError::Clear)?;
            }
        }

        tracing::info!(dir = %self.dir.display(), "cleared durable store");
        Ok(())
    }
}

/// In-process store for `--ephemeral` runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        validate_key(key)?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        validate_key(key)?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.values.borrow_mut().clear();
        Ok(())
    }
}
