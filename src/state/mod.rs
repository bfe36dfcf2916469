//! SQLite-backed state store
//!
//! Maps resource addresses to the last committed [`TeamRecord`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StateError;
use crate::team::TeamRecord;

/// Schema version stored in `user_version`
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, StateError>;

/// One committed resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub address: String,
    pub record: TeamRecord,
    pub updated_at: DateTime<Utc>,
}

pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    /// Default location (`~/.forgeteam/state.db`)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(StateError::NoHome)?;
        Ok(home.join(".forgeteam").join("state.db"))
    }

    /// Open or create the state database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| StateError::Io(format!("Failed to create state dir: {}", e)))?;
        }

        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Throwaway store for tests and dry runs.
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        let version: i32 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;

        // Unlike a cache, state cannot be rebuilt from scratch
        if version != 0 && version != SCHEMA_VERSION {
            return Err(StateError::Database(format!(
                "Unsupported state schema version {} (expected {})",
                version, SCHEMA_VERSION
            )));
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                address TEXT PRIMARY KEY NOT NULL,
                team_id INTEGER NOT NULL,
                organization TEXT NOT NULL,
                name TEXT NOT NULL,
                record TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_team_id ON resources(team_id);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Committed record for `address`, if any.
    pub fn get(&self, address: &str) -> Result<Option<StateEntry>> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT record, updated_at FROM resources WHERE address = ?1",
                [address],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(record, updated_at)| decode(address.to_string(), &record, updated_at))
            .transpose()
    }

    /// Record `record` as committed for `address`.
    pub fn put(&self, address: &str, record: &TeamRecord) -> Result<()> {
        let json = serde_json::to_string(record).map_err(|e| StateError::Corrupt {
            address: address.to_string(),
            message: e.to_string(),
        })?;

        self.conn.execute(
            "INSERT OR REPLACE INTO resources
             (address, team_id, organization, name, record, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                address,
                record.id.get(),
                record.organization,
                record.name,
                json,
                Utc::now().timestamp()
            ],
        )?;
        Ok(())
    }

    /// Forget `address`. Returns whether an entry was removed.
    pub fn remove(&self, address: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM resources WHERE address = ?1", [address])?;
        Ok(deleted > 0)
    }

    /// Every entry, ordered by address.
    pub fn list(&self) -> Result<Vec<StateEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT address, record, updated_at FROM resources ORDER BY address")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (address, record, updated_at) = row?;
            entries.push(decode(address, &record, updated_at)?);
        }
        Ok(entries)
    }
}

fn decode(address: String, record: &str, updated_at: i64) -> Result<StateEntry> {
    let record: TeamRecord = serde_json::from_str(record).map_err(|e| StateError::Corrupt {
        address: address.clone(),
        message: e.to_string(),
    })?;
    let updated_at = Utc
        .timestamp_opt(updated_at, 0)
        .single()
        .ok_or_else(|| StateError::Corrupt {
            address: address.clone(),
            message: format!("invalid timestamp {}", updated_at),
        })?;

    Ok(StateEntry {
        address,
        record,
        updated_at,
    })
}
