//! CLI `suggest` command — generate and print reply suggestions.

use anyhow::{Context, Result};

use crate::config::BondConfig;
use crate::llm::GeminiClient;
use crate::suggest::{generate_suggestions, MockReason, SuggestionOutcome, SuggestionSet};

/// Generate suggestions for one contact and print them.
pub async fn suggest(config: &BondConfig, contact_id: i64) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let client = GeminiClient::from_config(&config.gemini)
        .context("failed to build Gemini client")?;

    let outcome = generate_suggestions(
        &conn,
        client.as_ref(),
        config.gemini.use_mock,
        contact_id,
    )
    .await
    .with_context(|| format!("failed to generate suggestions for contact {contact_id}"))?;

    match outcome {
        SuggestionOutcome::Live { model, suggestions } => {
            println!("Model: {model}");
            print_suggestions(&suggestions)?;
        }
        SuggestionOutcome::Mock { reason, suggestions } => {
            match reason {
                MockReason::Forced => println!("Force-mock enabled, showing mock suggestions."),
                MockReason::MissingApiKey => {
                    println!("GEMINI_API_KEY not set, showing mock suggestions.")
                }
                MockReason::NoModelAvailable => {
                    println!("No suitable model discovered, showing mock suggestions.")
                }
                MockReason::RemoteFailure(class) => {
                    println!("API call failed ({class}), showing mock suggestions.")
                }
            }
            print_suggestions(&suggestions)?;
        }
        SuggestionOutcome::RawText { model, text } => {
            println!("Model: {model}");
            println!("Output did not parse as structured suggestions, raw text follows:");
            println!("{text}");
        }
    }
    Ok(())
}

fn print_suggestions(suggestions: &SuggestionSet) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(suggestions)?);
    Ok(())
}
