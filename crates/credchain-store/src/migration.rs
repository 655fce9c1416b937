//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL
//! string that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Get current version
    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Apply migrations
    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Partitioned record storage: one row per (partition, credential).
        -- The two partitions are the issuer and verifier private stores.
        CREATE TABLE records (
            partition TEXT NOT NULL,          -- 'issuer' | 'verifier'
            cred_id TEXT NOT NULL,
            subject_id TEXT NOT NULL,
            subject_name TEXT NOT NULL,
            institution TEXT NOT NULL,
            program TEXT NOT NULL,
            score TEXT NOT NULL,
            issue_date TEXT NOT NULL,
            digest TEXT NOT NULL,             -- lowercase hex SHA-256
            status TEXT NOT NULL,             -- 'Issued' | 'Revoked'
            owner_org TEXT NOT NULL,          -- MSP name
            shared_with_org TEXT NOT NULL,    -- MSP name or '' when unshared
            updated_at INTEGER NOT NULL,      -- local write timestamp (Unix ms)

            PRIMARY KEY (partition, cred_id)
        );

        -- Audit log: append-only, keyed by (record, transaction) so repeated
        -- actions on the same record accumulate. seq (rowid) is commit order.
        CREATE TABLE audit_events (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            cred_id TEXT NOT NULL,
            tx_id TEXT NOT NULL,
            action TEXT NOT NULL,             -- 'ISSUE' | 'SHARE_TO_VERIFIER' | 'REVOKE'
            acting_org TEXT NOT NULL,
            timestamp_ms INTEGER NOT NULL,
            note TEXT NOT NULL,

            UNIQUE (cred_id, tx_id)
        );

        -- Indexes for common queries
        CREATE INDEX idx_records_status ON records(partition, status);
        CREATE INDEX idx_audit_cred ON audit_events(cred_id, seq);
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
