use async_duckdb::ClientBuilder;
use async_duckdb::duckdb::OptionalExt;
use async_duckdb::duckdb::params;
use log::debug;
use std::path::{Path, PathBuf};

use crate::clients::{
    entities::Track,
    errors::{Error, Result},
};

const TABLE: &str = "local_storage";

/// Named keys of persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Queue,
    Theme,
    TimeZone,
}

impl StorageKey {
    /// Key the value is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Queue => "musicQueue",
            StorageKey::Theme => "theme",
            StorageKey::TimeZone => "preferredTimeZone",
        }
    }
}

/// Key/value store backed by a `DuckDB` file.
pub struct LocalStorage {
    client: async_duckdb::Client,
}

impl LocalStorage {
    pub fn new(client: async_duckdb::Client) -> Self {
        LocalStorage { client }
    }

    /// `.mixq_storage.duckdb` in the user cache directory.
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp")) // Fallback to /tmp if cache directory can't be determined
            .join(".mixq_storage.duckdb")
    }

    pub async fn try_default() -> Result<Self> {
        Self::open(&Self::default_path()).await
    }

    /// Open or create the database file, creating parent directories.
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let client = ClientBuilder::new().path(db_path).open().await?;
        debug!("Opened local storage database at {db_path:?}");
        Ok(LocalStorage { client })
    }

    /// Throwaway store, nothing is written to disk.
    pub async fn in_memory() -> Result<Self> {
        let client = ClientBuilder::new().open().await?;
        Ok(LocalStorage { client })
    }

    pub async fn init_db(&self) -> Result<()> {
        let table_query = format!(
            "
            CREATE TABLE IF NOT EXISTS {TABLE} (
                item_key TEXT PRIMARY KEY,
                item_value TEXT NOT NULL
            );
        "
        );
        self.client
            .conn(move |conn| conn.execute_batch(&table_query))
            .await?;

        debug!("Successfully initialized local storage database");
        Ok(())
    }

    pub async fn get_item(&self, key: StorageKey) -> Result<Option<String>> {
        let query = format!("SELECT item_value FROM {TABLE} WHERE item_key = ?;");
        let value = self
            .client
            .conn(move |conn| {
                conn.query_row(&query, [key.as_str()], |row| row.get::<_, String>(0))
                    .optional()
            })
            .await?;
        Ok(value)
    }

    pub async fn set_item(&self, key: StorageKey, value: &str) -> Result<()> {
        let query = format!(
            "INSERT INTO {TABLE} (item_key, item_value) VALUES (?, ?)
             ON CONFLICT (item_key) DO UPDATE SET item_value = excluded.item_value;"
        );
        let value_owned = value.to_string();

        self.client
            .conn(move |conn| conn.execute(&query, params![key.as_str(), value_owned]))
            .await?;

        debug!("Stored {} in local storage", key.as_str());
        Ok(())
    }

    pub async fn remove_item(&self, key: StorageKey) -> Result<()> {
        let query = format!("DELETE FROM {TABLE} WHERE item_key = ?;");
        self.client
            .conn(move |conn| conn.execute(&query, [key.as_str()]))
            .await?;

        debug!("Removed {} from local storage", key.as_str());
        Ok(())
    }

    /// Store the queue as a JSON array under `musicQueue`.
    pub async fn save_queue(&self, queue: &[Track]) -> Result<()> {
        let json = serde_json::to_string(queue)?;
        self.set_item(StorageKey::Queue, &json).await?;
        debug!("Queue saved to local storage ({} tracks)", queue.len());
        Ok(())
    }

    /// Saved queue, if any. A snapshot that does not parse is an error and
    /// is left in place for the caller to discard.
    pub async fn load_queue(&self) -> Result<Option<Vec<Track>>> {
        match self.get_item(StorageKey::Queue).await? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| Error::ParseError(format!("saved queue: {e}"))),
            None => Ok(None),
        }
    }
}
