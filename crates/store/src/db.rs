use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDateTime, Utc};
use duckdb::Connection;
use serde::{Deserialize, Serialize};
use trendline_core::error::{Result, TrendlineError};

use crate::schema::SCHEMA_SQL;

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreStatus {
    pub db_path: String,
    pub db_size_bytes: u64,
    pub metrics_count: usize,
    pub points_count: usize,
    pub oldest_point_ts: Option<DateTime<Utc>>,
    pub newest_point_ts: Option<DateTime<Utc>>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| TrendlineError::Io(format!("failed to create db dir: {e}")))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| TrendlineError::Store(format!("failed to open duckdb: {e}")))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| TrendlineError::Store(format!("failed to initialize schema: {e}")))?;

        tracing::debug!(path = %path.display(), "metric store opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: path.display().to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| TrendlineError::Store(format!("failed to open in-memory db: {e}")))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| TrendlineError::Store(format!("failed to initialize schema: {e}")))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: ":memory:".to_string(),
        })
    }

    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("store mutex poisoned")
    }

    pub fn status(&self) -> Result<StoreStatus> {
        let conn = self.conn();

        let metrics_count = scalar_usize(&conn, "SELECT COUNT(*) FROM metrics")?;
        let points_count = scalar_usize(&conn, "SELECT COUNT(*) FROM metric_points")?;
        let oldest_point_ts = scalar_ts(&conn, "SELECT MIN(created_at) FROM metric_points")?;
        let newest_point_ts = scalar_ts(&conn, "SELECT MAX(created_at) FROM metric_points")?;

        let db_size_bytes = if self.db_path == ":memory:" {
            0
        } else {
            fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStatus {
            db_path: self.db_path.clone(),
            db_size_bytes,
            metrics_count,
            points_count,
            oldest_point_ts,
            newest_point_ts,
        })
    }
}

fn scalar_usize(conn: &Connection, sql: &str) -> Result<usize> {
    conn.query_row(sql, [], |row| row.get::<_, i64>(0))
        .map(|v| v as usize)
        .map_err(|e| TrendlineError::Store(format!("query failed: {e}")))
}

fn scalar_ts(conn: &Connection, sql: &str) -> Result<Option<DateTime<Utc>>> {
    conn.query_row(sql, [], |row| row.get::<_, Option<NaiveDateTime>>(0))
        .map(|opt| opt.map(|dt| dt.and_utc()))
        .map_err(|e| TrendlineError::Store(format!("query failed: {e}")))
}
