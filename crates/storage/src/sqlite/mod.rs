//! SQLite backend.
//!
//! Accepts `sqlite::memory:`, shared-cache memory URLs (`…?mode=memory`),
//! `sqlite://` URLs, `sqlite:relative/path` and bare paths. File URLs are
//! resolved against the working directory and missing parent directories are
//! created before the pool opens.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{CategoryRepository, QuestionRepository, Storage};

mod category_repo;
mod mapping;
mod migrate;
mod question_repo;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("creating database directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Question and category store over a `SQLite` connection pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

fn is_memory_url(url: &str) -> bool {
    url == "sqlite::memory:" || url.contains("mode=memory")
}

/// Rewrite `sqlite:relative.db` or a bare path as an absolute `sqlite://` URL.
///
/// Memory URLs and URLs already in `sqlite://` form are returned unchanged.
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_memory_url(trimmed) || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn ensure_parent_dir(file: &Path) -> Result<(), SqliteInitError> {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| SqliteInitError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

impl SqliteRepository {
    /// Open a pool on `database_url`, creating the database file if needed.
    ///
    /// Every connection enforces foreign keys and uses WAL journaling.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` for an unparsable URL, an uncreatable
    /// directory, or a failed connection.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let url = normalize_url(database_url);
        let options = SqliteConnectOptions::from_str(&url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);
        if !is_memory_url(&url) {
            ensure_parent_dir(options.get_filename())?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(BUSY_TIMEOUT)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Bring the schema up to the latest version.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration statement fails.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Connect, migrate, and expose both repositories over one pool.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if connecting or migrating fails.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        Ok(Self {
            questions: Arc::new(repo.clone()) as Arc<dyn QuestionRepository>,
            categories: Arc::new(repo) as Arc<dyn CategoryRepository>,
        })
    }
}
