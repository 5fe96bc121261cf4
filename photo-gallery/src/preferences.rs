use crate::schema::init_preferences_schema;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Error type for preference storage
#[derive(Debug)]
pub enum PreferencesError {
    Database(rusqlite::Error),
    Io(std::io::Error),
    Other(String),
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::Database(e) => write!(f, "Database error: {}", e),
            PreferencesError::Io(e) => write!(f, "IO error: {}", e),
            PreferencesError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl From<rusqlite::Error> for PreferencesError {
    fn from(err: rusqlite::Error) -> Self {
        PreferencesError::Database(err)
    }
}

impl From<std::io::Error> for PreferencesError {
    fn from(err: std::io::Error) -> Self {
        PreferencesError::Io(err)
    }
}

/// Durable string key-value storage
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferencesError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError>;

    async fn remove(&self, key: &str) -> Result<(), PreferencesError>;
}

/// Preferences stored in a SQLite table
#[derive(Clone)]
pub struct SqlitePreferences {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePreferences {
    /// Open (or create) the preferences database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, PreferencesError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, PreferencesError> {
        init_preferences_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with the connection on a blocking thread
    async fn with_conn<T, F>(&self, f: F) -> Result<T, PreferencesError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| PreferencesError::Other("preferences lock poisoned".to_string()))?;
            f(&guard).map_err(PreferencesError::from)
        })
        .await
        .map_err(|e| PreferencesError::Other(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl MetadataStore for SqlitePreferences {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        let key = key.to_string();
        let value = value.to_string();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
            .map(|_| ())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM preferences WHERE key = ?1", params![key])
                .map(|_| ())
        })
        .await
    }
}

/// In-process preferences, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set`/`remove` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock_values(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, PreferencesError> {
        self.values
            .lock()
            .map_err(|_| PreferencesError::Other("preferences lock poisoned".to_string()))
    }

    fn count_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MetadataStore for MemoryPreferences {
    async fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
        Ok(self.lock_values()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PreferencesError> {
        self.lock_values()?
            .insert(key.to_string(), value.to_string());
        self.count_write();
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        self.lock_values()?.remove(key);
        self.count_write();
        Ok(())
    }
}
