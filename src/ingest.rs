//! CSV message-log ingestion.
//!
//! Each import creates exactly one new contact and attaches every data row
//! to it. The header must contain `timestamp`, `direction`, and `text`;
//! column order is irrelevant and extra columns are ignored. The contact
//! row and its messages commit in a single transaction, so a malformed row
//! aborts the whole import without leaving an empty contact behind.

use rusqlite::Connection;
use serde::Deserialize;
use std::io::Read;
use thiserror::Error;
use tracing::info;

use crate::store::contacts::add_contact;
use crate::store::messages::insert_messages;
use crate::store::types::NewMessage;
use crate::store::StoreError;

/// Columns every import file must carry.
const REQUIRED_COLUMNS: [&str; 3] = ["timestamp", "direction", "text"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input file is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// One parsed data row. Serde matches fields by header name, so extra
/// columns in the file are skipped.
#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    direction: String,
    text: String,
}

/// Outcome of a successful import.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImportReport {
    pub contact_id: i64,
    pub contact_name: String,
    pub imported: usize,
}

/// Read a CSV message log and store it under a freshly created contact.
pub fn import_csv<R: Read>(
    conn: &mut Connection,
    reader: R,
    contact_name: &str,
) -> Result<ImportReport, IngestError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(IngestError::MissingColumn(col));
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<CsvRow>() {
        let row = record?;
        rows.push(NewMessage {
            timestamp: row.timestamp,
            direction: row.direction,
            text: row.text,
        });
    }

    let tx = conn.transaction()?;
    let contact_id = add_contact(&tx, contact_name, "")?;
    let imported = insert_messages(&tx, contact_id, &rows)?;
    tx.commit()?;

    info!(contact = contact_name, contact_id, imported, "import complete");

    Ok(ImportReport {
        contact_id,
        contact_name: contact_name.to_string(),
        imported,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn missing_column_is_rejected() {
        let mut conn = open_memory_database().unwrap();
        let csv = "timestamp,text\n2024-01-01,hello\n";
        let err = import_csv(&mut conn, csv.as_bytes(), "Ravi").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn("direction")));
    }

    #[test]
    fn failed_import_leaves_no_contact_behind() {
        let mut conn = open_memory_database().unwrap();
        let csv = "timestamp,direction\n2024-01-01,inbound\n";
        assert!(import_csv(&mut conn, csv.as_bytes(), "Ravi").is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
