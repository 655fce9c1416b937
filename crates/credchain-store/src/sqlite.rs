//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for Credchain. It uses rusqlite
//! with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use credchain_core::{
    AuditAction, AuditEvent, CredentialFacts, CredentialId, CredentialRecord, CredentialStatus,
    OrgId, Partition, RecordDigest, TxId,
};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{CreateOutcome, Store};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Map a poisoned connection mutex into a StoreError.
fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
        Some(format!("mutex poisoned: {}", e)),
    ))
}

/// Map a spawn_blocking join failure into a StoreError.
fn join_failed(e: tokio::task::JoinError) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

fn column_error(name: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(0, name.into(), rusqlite::types::Type::Text)
}

// Helper to convert a row to a CredentialRecord
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<CredentialRecord> {
    let digest_hex: String = row.get("digest")?;
    let status_text: String = row.get("status")?;
    let owner_text: String = row.get("owner_org")?;
    let shared_text: String = row.get("shared_with_org")?;

    let digest = RecordDigest::from_hex(&digest_hex).map_err(|_| column_error("digest"))?;

    let status = match status_text.as_str() {
        "Issued" => CredentialStatus::Issued,
        "Revoked" => CredentialStatus::Revoked,
        _ => return Err(column_error("status")),
    };

    let owner_org = OrgId::from_str_opt(&owner_text).ok_or_else(|| column_error("owner_org"))?;

    let shared_with_org = if shared_text.is_empty() {
        None
    } else {
        Some(OrgId::from_str_opt(&shared_text).ok_or_else(|| column_error("shared_with_org"))?)
    };

    Ok(CredentialRecord {
        facts: CredentialFacts {
            id: CredentialId::new(row.get::<_, String>("cred_id")?),
            subject_id: row.get("subject_id")?,
            subject_name: row.get("subject_name")?,
            institution: row.get("institution")?,
            program: row.get("program")?,
            score: row.get("score")?,
            issue_date: row.get("issue_date")?,
        },
        digest,
        status,
        owner_org,
        shared_with_org,
    })
}

// Helper to convert a row to an AuditEvent
fn row_to_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<AuditEvent> {
    let action_text: String = row.get("action")?;
    let org_text: String = row.get("acting_org")?;

    let action =
        AuditAction::from_str_opt(&action_text).ok_or_else(|| column_error("action"))?;
    let acting_org = OrgId::from_str_opt(&org_text).ok_or_else(|| column_error("acting_org"))?;

    Ok(AuditEvent {
        record_id: CredentialId::new(row.get::<_, String>("cred_id")?),
        tx_id: TxId::new(row.get::<_, String>("tx_id")?),
        action,
        acting_org,
        timestamp_ms: row.get("timestamp_ms")?,
        note: row.get("note")?,
    })
}

const RECORD_COLUMNS: &str = "cred_id, subject_id, subject_name, institution, program, \
                              score, issue_date, digest, status, owner_org, shared_with_org";

fn record_params(record: &CredentialRecord) -> [String; 11] {
    [
        record.facts.id.as_str().to_string(),
        record.facts.subject_id.clone(),
        record.facts.subject_name.clone(),
        record.facts.institution.clone(),
        record.facts.program.clone(),
        record.facts.score.clone(),
        record.facts.issue_date.clone(),
        record.digest.to_hex(),
        record.status.as_str().to_string(),
        record.owner_org.as_str().to_string(),
        record
            .shared_with_org
            .map(|o| o.as_str().to_string())
            .unwrap_or_default(),
    ]
}

#[async_trait]
impl Store for SqliteStore {
    async fn create_record(
        &self,
        partition: Partition,
        record: &CredentialRecord,
    ) -> Result<CreateOutcome> {
        let record = record.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;
            let p = record_params(&record);

            // INSERT OR IGNORE keeps the existence check and the write in
            // one atomic statement: a racing duplicate loses cleanly.
            let inserted = conn.execute(
                &format!(
                    "INSERT OR IGNORE INTO records (partition, {RECORD_COLUMNS}, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                params![
                    partition.as_str(),
                    p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7], p[8], p[9], p[10],
                    now_millis(),
                ],
            )?;

            if inserted == 0 {
                debug!(partition = %partition, id = %record.id(), "create skipped, id exists");
                return Ok(CreateOutcome::AlreadyExists);
            }

            Ok(CreateOutcome::Created)
        })
        .await
        .map_err(join_failed)?
    }

    async fn put_record(&self, partition: Partition, record: &CredentialRecord) -> Result<()> {
        let record = record.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;
            let p = record_params(&record);

            conn.execute(
                &format!(
                    "INSERT OR REPLACE INTO records (partition, {RECORD_COLUMNS}, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                params![
                    partition.as_str(),
                    p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7], p[8], p[9], p[10],
                    now_millis(),
                ],
            )?;

            Ok(())
        })
        .await
        .map_err(join_failed)?
    }

    async fn get_record(
        &self,
        partition: Partition,
        id: &CredentialId,
    ) -> Result<Option<CredentialRecord>> {
        let id = id.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            conn.query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM records WHERE partition = ?1 AND cred_id = ?2"),
                params![partition.as_str(), id.as_str()],
                row_to_record,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
        .map_err(join_failed)?
    }

    async fn record_exists(&self, partition: Partition, id: &CredentialId) -> Result<bool> {
        let id = id.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM records WHERE partition = ?1 AND cred_id = ?2)",
                params![partition.as_str(), id.as_str()],
                |row| row.get(0),
            )?;

            Ok(exists)
        })
        .await
        .map_err(join_failed)?
    }

    async fn append_event(&self, event: &AuditEvent) -> Result<()> {
        let event = event.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            // Replacing on the (cred_id, tx_id) key mirrors substrate
            // re-commit semantics; distinct tx ids accumulate.
            conn.execute(
                "INSERT INTO audit_events (cred_id, tx_id, action, acting_org, timestamp_ms, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (cred_id, tx_id) DO UPDATE SET
                     action = excluded.action,
                     acting_org = excluded.acting_org,
                     timestamp_ms = excluded.timestamp_ms,
                     note = excluded.note",
                params![
                    event.record_id.as_str(),
                    event.tx_id.as_str(),
                    event.action.as_str(),
                    event.acting_org.as_str(),
                    event.timestamp_ms,
                    event.note,
                ],
            )?;

            debug!(id = %event.record_id, action = %event.action, "audit event appended");
            Ok(())
        })
        .await
        .map_err(join_failed)?
    }

    async fn list_events(&self, record_id: &CredentialId) -> Result<Vec<AuditEvent>> {
        let record_id = record_id.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(poisoned)?;

            let mut stmt = conn.prepare(
                "SELECT cred_id, tx_id, action, acting_org, timestamp_ms, note
                 FROM audit_events WHERE cred_id = ?1
                 ORDER BY seq",
            )?;

            let events = stmt
                .query_map(params![record_id.as_str()], row_to_event)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(events)
        })
        .await
        .map_err(join_failed)?
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
