use chrono::{DateTime, Local, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::counter::{format_hms, format_tenths};
use crate::error::Result;
use crate::stopwatch::{SessionRecord, SessionSink};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        started_at TEXT NOT NULL,
        duration_ms INTEGER NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_sessions_started_at ON sessions(started_at);
"#;

/// Append-only store of completed stopwatch sessions
#[derive(Debug)]
pub struct SessionDb {
    conn: Connection,
}

const CSV_HEADER: [&str; 3] = ["started_at", "duration", "duration_secs"];

/// One line of the CSV export
#[derive(Debug, Serialize)]
struct CsvRow {
    started_at: String,
    duration: String,
    duration_secs: f64,
}

impl SessionDb {
    /// Open the database at the default state location
    pub fn new() -> Result<Self> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("klok_sessions.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn record_session(&self, record: &SessionRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sessions (started_at, duration_ms) VALUES (?1, ?2)",
            params![
                stored_timestamp(&record.started_at),
                record.duration.as_millis() as i64
            ],
        )?;
        Ok(())
    }

    /// Most recent sessions first
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>> {
        self.query_sessions(
            "SELECT started_at, duration_ms FROM sessions ORDER BY started_at DESC, id DESC LIMIT ?1",
            Some(limit as i64),
        )
    }

    /// Every session in chronological order
    pub fn all_sessions(&self) -> Result<Vec<SessionRecord>> {
        self.query_sessions(
            "SELECT started_at, duration_ms FROM sessions ORDER BY started_at ASC, id ASC",
            None,
        )
    }

    pub fn session_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn total_duration(&self) -> Result<Duration> {
        let total: Option<i64> =
            self.conn
                .query_row("SELECT SUM(duration_ms) FROM sessions", [], |row| row.get(0))?;
        Ok(Duration::from_millis(total.unwrap_or(0).max(0) as u64))
    }

    /// Deletes every session, returning how many were removed
    pub fn clear_all_sessions(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM sessions", [])?)
    }

    /// Write every session to `path` as CSV. Returns the number of rows written.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let sessions = self.all_sessions()?;
        let mut writer = csv::Writer::from_path(path)?;
        // serialize only emits the header along with the first row
        if sessions.is_empty() {
            writer.write_record(CSV_HEADER)?;
        }
        for record in &sessions {
            writer.serialize(CsvRow {
                started_at: record.started_at.to_rfc3339(),
                duration: format!(
                    "{}{}",
                    format_hms(record.duration),
                    format_tenths(record.duration)
                ),
                duration_secs: record.duration.as_secs_f64(),
            })?;
        }
        writer.flush()?;
        Ok(sessions.len())
    }

    fn query_sessions(&self, sql: &str, limit: Option<i64>) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<SessionRecord> {
            let started_at: String = row.get(0)?;
            let started_at = DateTime::parse_from_rfc3339(&started_at)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        0,
                        "started_at".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);
            let duration_ms: i64 = row.get(1)?;
            Ok(SessionRecord {
                started_at,
                duration: Duration::from_millis(duration_ms.max(0) as u64),
            })
        };

        let rows = match limit {
            Some(limit) => stmt.query_map([limit], map_row)?.collect::<Vec<_>>(),
            None => stmt.query_map([], map_row)?.collect::<Vec<_>>(),
        };

        let mut sessions = Vec::with_capacity(rows.len());
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }
}

/// Fixed-width UTC, so ordering by the text column is ordering by time
fn stored_timestamp(at: &DateTime<Local>) -> String {
    at.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl SessionSink for SessionDb {
    fn save_session(&mut self, record: &SessionRecord) -> Result<()> {
        self.record_session(record)
    }
}
