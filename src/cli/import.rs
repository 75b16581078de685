//! CLI `import` command — ingest a CSV message log under a new contact.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::BondConfig;
use crate::ingest::import_csv;

/// Import a CSV file for the named contact and print the report.
pub fn import(config: &BondConfig, file: &Path, contact_name: &str) -> Result<()> {
    let reader = std::fs::File::open(file)
        .with_context(|| format!("failed to open import file: {}", file.display()))?;

    let db_path = config.resolved_db_path();
    let mut conn = crate::db::open_database(&db_path)?;

    let report = import_csv(&mut conn, reader, contact_name)
        .with_context(|| format!("failed to import {}", file.display()))?;

    println!(
        "Imported {} messages for {} (ID={})",
        report.imported, report.contact_name, report.contact_id
    );
    Ok(())
}
