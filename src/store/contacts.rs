//! Contact rows — creation and lookup.
//!
//! Contacts are created during ingestion and never updated or deleted by
//! the system. Names carry no uniqueness constraint: re-importing a log
//! under the same name creates a second contact row.

use rusqlite::{params, Connection, OptionalExtension};

use crate::store::types::Contact;
use crate::store::StoreError;

/// Insert a new contact and return its generated ID.
pub fn add_contact(conn: &Connection, name: &str, notes: &str) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO contacts (name, notes) VALUES (?1, ?2)",
        params![name, notes],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a single contact. Fails with [`StoreError::ContactNotFound`] if the
/// ID does not exist.
pub fn get_contact(conn: &Connection, contact_id: i64) -> Result<Contact, StoreError> {
    conn.query_row(
        "SELECT contact_id, name, notes FROM contacts WHERE contact_id = ?1",
        params![contact_id],
        |row| {
            Ok(Contact {
                contact_id: row.get(0)?,
                name: row.get(1)?,
                notes: row.get(2)?,
            })
        },
    )
    .optional()?
    .ok_or(StoreError::ContactNotFound(contact_id))
}

/// List all contacts, newest first.
pub fn list_contacts(conn: &Connection) -> Result<Vec<Contact>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT contact_id, name, notes FROM contacts ORDER BY contact_id DESC")?;
    let contacts = stmt
        .query_map([], |row| {
            Ok(Contact {
                contact_id: row.get(0)?,
                name: row.get(1)?,
                notes: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(contacts)
}
