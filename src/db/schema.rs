//! SQL DDL for the BondKeeper tables.
//!
//! Defines the `contacts` and `conversations` tables plus `schema_meta`.
//! All DDL uses `IF NOT EXISTS` for idempotent initialization. The
//! `contact_id` on conversations is a foreign key by convention only; the
//! system never deletes contacts, so no `REFERENCES` clause is enforced.

use rusqlite::Connection;

/// All schema DDL statements for BondKeeper's tables.
const SCHEMA_SQL: &str = r#"
-- People tracked by the system. Duplicate names are allowed; every import
-- creates a fresh contact row.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT ''
);

-- One row per logged communication event. Timestamps are caller-supplied
-- strings; retrieval order relies on a consistent format within a contact.
CREATE TABLE IF NOT EXISTS conversations (
    conv_id INTEGER PRIMARY KEY,
    contact_id INTEGER NOT NULL,
    timestamp TEXT NOT NULL,
    direction TEXT NOT NULL,
    text TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_conversations_contact ON conversations(contact_id, timestamp);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
