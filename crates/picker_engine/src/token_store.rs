use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use engine_logging::{engine_error, engine_info, engine_warn};
use serde::{Deserialize, Serialize};

use crate::persist::AtomicFileWriter;

/// Namespace the access token is persisted under.
pub const TOKEN_NAMESPACE: &str = "photo_picker_prefs";

/// Holds the single access token the feed client authenticates with.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str);

    /// The stored token; empty or whitespace-only values read as absent.
    fn get(&self) -> Option<String>;

    fn has(&self) -> bool {
        self.get().is_some()
    }

    fn clear(&self);
}

fn non_blank(token: Option<String>) -> Option<String> {
    token.filter(|token| !token.trim().is_empty())
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn get(&self) -> Option<String> {
        let slot = self.token.lock().ok()?;
        non_blank(slot.clone())
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPrefs {
    access_token: Option<String>,
}

/// Token store backed by a RON file in a directory.
///
/// Failures are logged and never surface to the caller; an unreadable file
/// reads as "no token".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
    writer: AtomicFileWriter,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            writer: AtomicFileWriter::new(dir.clone()),
            dir,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(Self::file_name())
    }

    fn file_name() -> String {
        format!("{TOKEN_NAMESPACE}.ron")
    }

    fn load(path: &Path) -> PersistedPrefs {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return PersistedPrefs::default();
            }
            Err(err) => {
                engine_warn!("Failed to read token store {:?}: {}", path, err);
                return PersistedPrefs::default();
            }
        };
        match ron::from_str(&content) {
            Ok(prefs) => prefs,
            Err(err) => {
                engine_warn!("Failed to parse token store {:?}: {}", path, err);
                PersistedPrefs::default()
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) {
        let prefs = PersistedPrefs {
            access_token: Some(token.to_string()),
        };
        let content = match ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::new()) {
            Ok(text) => text,
            Err(err) => {
                engine_error!("Failed to serialize token store: {}", err);
                return;
            }
        };
        match self.writer.write(&Self::file_name(), &content) {
            Ok(path) => engine_info!("Saved access token to {:?}", path),
            Err(err) => engine_error!("Failed to write token store in {:?}: {}", self.dir, err),
        }
    }

    fn get(&self) -> Option<String> {
        non_blank(Self::load(&self.path()).access_token)
    }

    fn clear(&self) {
        match self.writer.remove(&Self::file_name()) {
            Ok(()) => engine_info!("Cleared access token in {:?}", self.dir),
            Err(err) => engine_error!("Failed to clear token store in {:?}: {}", self.dir, err),
        }
    }
}
