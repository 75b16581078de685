//! CLI `contacts` command — debug dump of stored contacts and previews.

use anyhow::Result;

use crate::config::BondConfig;
use crate::store::contacts::list_contacts;
use crate::store::messages::{message_count, recent_messages};

/// List every contact with its message count and two latest messages.
pub fn contacts(config: &BondConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let all = list_contacts(&conn)?;
    if all.is_empty() {
        println!("No contacts found. Import messages to populate contacts.");
        return Ok(());
    }

    for contact in all {
        let count = message_count(&conn, contact.contact_id)?;
        println!(
            "[{}] {} ({} messages)",
            contact.contact_id, contact.name, count
        );
        if !contact.notes.is_empty() {
            println!("    notes: {}", contact.notes);
        }
        for m in recent_messages(&conn, contact.contact_id, 2)? {
            let text: String = if m.text.chars().count() > 80 {
                m.text.chars().take(80).chain("...".chars()).collect()
            } else {
                m.text
            };
            println!("    [{}] {}: {}", m.timestamp, m.direction, text);
        }
    }
    Ok(())
}
