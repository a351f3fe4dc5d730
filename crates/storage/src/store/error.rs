#![forbid(unsafe_code)]

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("knowledge database not found: {}", .0.display())]
    MissingDatabase(PathBuf),
}
