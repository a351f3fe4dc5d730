#![forbid(unsafe_code)]

pub mod cache;
mod catalogue;
mod error;
mod evidence;
mod review;
pub mod schema;
mod types;

pub use cache::{CacheStats, KnowledgeCache, QueryCache};
pub use error::StoreError;
pub use types::*;

use lr_core::model::FrameworkPart;
use rusqlite::types::Type;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Read-only access to the case knowledge database.
///
/// Every query goes through the attached [`KnowledgeCache`]; the store never writes.
pub struct KnowledgeStore {
    conn: Connection,
    path: PathBuf,
    cache: Arc<KnowledgeCache>,
}

impl KnowledgeStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(StoreError::MissingDatabase(path));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_secs(5))?;
        tracing::info!(path = %path.display(), "knowledge store opened");

        Ok(Self {
            conn,
            path,
            cache: Arc::new(KnowledgeCache::default()),
        })
    }

    /// Replaces the store's private cache with a shared one.
    pub fn with_cache(mut self, cache: Arc<KnowledgeCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cache(&self) -> &Arc<KnowledgeCache> {
        &self.cache
    }
}

fn part_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<FrameworkPart> {
    let value: i64 = row.get(idx)?;
    FrameworkPart::from_number(value)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(err)))
}
