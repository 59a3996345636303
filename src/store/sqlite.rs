use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{DocketError, Result};
use crate::domain::{HearingRecord, LocalBookmark, LocalState};
use crate::store::BookmarkStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;

        conn.execute("PRAGMA foreign_keys = ON", [])?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| DocketError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            DocketError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }

    fn load_hearings(conn: &Connection, court_file_number: &str) -> Result<Vec<HearingRecord>> {
        let mut stmt = conn.prepare(
            "SELECT id, court_file_number, unread FROM bookmark_hearings
             WHERE court_file_number = ?1 ORDER BY position, id",
        )?;

        let hearings = stmt
            .query_map(params![court_file_number], |row| {
                Ok(HearingRecord {
                    id: row.get(0)?,
                    court_file_number: row.get(1)?,
                    unread: row.get::<_, i32>(2)? != 0,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(hearings)
    }

    fn upsert_state(
        conn: &Connection,
        court_file_number: &str,
        state: LocalState,
    ) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO bookmarks (court_file_number, state, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(court_file_number) DO UPDATE SET state = ?2, updated_at = ?3",
            params![court_file_number, state.as_str(), Utc::now().to_rfc3339()],
        )
    }
}

impl BookmarkStore for SqliteStore {
    fn put_bookmarks(&self, court_file_number: &str, records: &[HearingRecord]) -> Result<usize> {
        let mut conn = self.conn()?;

        let tx = conn.transaction()?;
        Self::upsert_state(&tx, court_file_number, LocalState::Subscribed)?;
        tx.execute(
            "DELETE FROM bookmark_hearings WHERE court_file_number = ?1",
            params![court_file_number],
        )?;

        let mut count = 0;
        for (position, record) in records.iter().enumerate() {
            count += tx.execute(
                "INSERT OR REPLACE INTO bookmark_hearings (id, court_file_number, unread, position)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.id,
                    court_file_number,
                    record.unread as i32,
                    position as i64
                ],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    fn mark_unsubscribed(&self, court_file_number: &str) -> Result<()> {
        let mut conn = self.conn()?;

        let tx = conn.transaction()?;
        Self::upsert_state(&tx, court_file_number, LocalState::Unsubscribed)?;
        tx.execute(
            "DELETE FROM bookmark_hearings WHERE court_file_number = ?1",
            params![court_file_number],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn get_bookmark(&self, court_file_number: &str) -> Result<Option<LocalBookmark>> {
        let conn = self.conn()?;

        let row = conn
            .query_row(
                "SELECT state, updated_at FROM bookmarks WHERE court_file_number = ?1",
                params![court_file_number],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        let Some((state, updated_at)) = row else {
            return Ok(None);
        };

        let state = LocalState::parse(&state).ok_or_else(|| {
            DocketError::Database(rusqlite::Error::InvalidColumnType(
                0,
                "state".into(),
                rusqlite::types::Type::Text,
            ))
        })?;

        Ok(Some(LocalBookmark {
            court_file_number: court_file_number.to_string(),
            state,
            hearings: Self::load_hearings(&conn, court_file_number)?,
            updated_at: Self::parse_datetime(&updated_at).unwrap_or_else(Utc::now),
        }))
    }

    fn list_subscribed(&self) -> Result<Vec<LocalBookmark>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT court_file_number, updated_at FROM bookmarks
             WHERE state = ?1 ORDER BY court_file_number",
        )?;

        let rows = stmt
            .query_map(params![LocalState::Subscribed.as_str()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(court_file_number, updated_at)| {
                Ok(LocalBookmark {
                    hearings: Self::load_hearings(&conn, &court_file_number)?,
                    court_file_number,
                    state: LocalState::Subscribed,
                    updated_at: Self::parse_datetime(&updated_at).unwrap_or_else(Utc::now),
                })
            })
            .collect()
    }

    fn mark_viewed(&self, court_file_number: &str) -> Result<usize> {
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE bookmark_hearings SET unread = 0 WHERE court_file_number = ?1 AND unread != 0",
            params![court_file_number],
        )?;

        Ok(updated)
    }
}
