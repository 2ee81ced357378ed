//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `history` - Monthly per-category spending aggregates used as baselines

use chrono::{NaiveDateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod history;

pub use history::HistoryBaselines;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string
pub(crate) fn parse_datetime(s: &str) -> NaiveDateTime {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap_or_else(|_| Utc::now().naive_utc())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) a database file and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("tusu_test_{}_{}.db", std::process::id(), id));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per (month, category); re-recording a month replaces it
            CREATE TABLE IF NOT EXISTS category_monthly_spending (
                month TEXT NOT NULL,
                category TEXT NOT NULL,
                total_amount REAL NOT NULL,
                transaction_count INTEGER NOT NULL DEFAULT 0,
                recorded_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (month, category)
            );

            CREATE INDEX IF NOT EXISTS idx_monthly_spending_category
                ON category_monthly_spending(category);
            "#,
        )?;

        info!("Database migrations complete");
        Ok(())
    }
}
