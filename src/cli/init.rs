//! CLI `init` command — create the database file and tables.

use anyhow::Result;

use crate::config::BondConfig;

/// Create (or open) the database. Safe to run repeatedly.
pub fn init(config: &BondConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    crate::db::open_database(&db_path)?;
    println!("BondKeeper database initialized at {}", db_path.display());
    Ok(())
}
