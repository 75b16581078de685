//! Message rows — bulk insertion and timestamp-ordered retrieval.

use rusqlite::{params, Connection};

use crate::store::types::{Message, NewMessage};
use crate::store::StoreError;

/// Bulk-insert message rows for a contact inside a single transaction.
/// Returns the number of rows inserted.
pub fn add_messages(
    conn: &mut Connection,
    contact_id: i64,
    rows: &[NewMessage],
) -> Result<usize, StoreError> {
    let tx = conn.transaction()?;
    insert_messages(&tx, contact_id, rows)?;
    tx.commit()?;
    Ok(rows.len())
}

/// Insert message rows using the caller's connection or transaction.
/// Used by ingestion so the contact row and its messages commit together.
pub fn insert_messages(
    conn: &Connection,
    contact_id: i64,
    rows: &[NewMessage],
) -> Result<usize, StoreError> {
    let mut stmt = conn.prepare(
        "INSERT INTO conversations (contact_id, timestamp, direction, text) \
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in rows {
        stmt.execute(params![contact_id, row.timestamp, row.direction, row.text])?;
    }
    Ok(rows.len())
}

/// Fetch up to `limit` messages for a contact, most recent first.
///
/// Timestamps are compared as strings, not parsed; ordering is only
/// meaningful when the imported log used one consistent format.
pub fn recent_messages(
    conn: &Connection,
    contact_id: i64,
    limit: usize,
) -> Result<Vec<Message>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT conv_id, contact_id, timestamp, direction, text \
         FROM conversations WHERE contact_id = ?1 \
         ORDER BY timestamp DESC LIMIT ?2",
    )?;
    let messages = stmt
        .query_map(params![contact_id, limit as i64], |row| {
            Ok(Message {
                conv_id: row.get(0)?,
                contact_id: row.get(1)?,
                timestamp: row.get(2)?,
                direction: row.get(3)?,
                text: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(messages)
}

/// Count of stored messages for a contact.
pub fn message_count(conn: &Connection, contact_id: i64) -> Result<i64, StoreError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM conversations WHERE contact_id = ?1",
        params![contact_id],
        |row| row.get(0),
    )?;
    Ok(count)
}
