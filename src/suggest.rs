//! Suggestion generation — prompt assembly, mode selection, and structured
//! results.
//!
//! [`generate_suggestions`] is the single entry point. It fetches the
//! contact and recent messages, builds the prompt, and runs one of three
//! modes: forced mock, missing capability (no API key or no model), or a
//! live call against the selected model. Remote failures never abort the
//! caller; every path resolves to a displayable [`SuggestionOutcome`].

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::{choose_model, classify_failure, FailureClass, GeminiClient};
use crate::store::contacts::get_contact;
use crate::store::messages::recent_messages;
use crate::store::types::{Contact, Message};
use crate::store::StoreError;

/// How many recent messages feed the prompt.
const CONTEXT_MESSAGES: usize = 5;

/// Fixed system instruction demanding strict four-field JSON output.
pub const SYSTEM_INSTRUCTION: &str = "\
You are BondKeeper, an AI assistant that helps users maintain strong relationships.

Produce STRICT JSON with four fields:
1) short: a short reply (<= 20 words)
2) neutral: a neutral reply (30-60 words)
3) warm: a warm reply (60-120 words)
4) action: one suggested next action (e.g., schedule a call, send an article)

Return JSON only, no extra commentary. Example:
{ \"short\": \"...\", \"neutral\": \"...\", \"warm\": \"...\", \"action\": \"...\" }";

/// The four reply drafts produced for a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub short: String,
    pub neutral: String,
    pub warm: String,
    pub action: String,
}

/// The canned payload used whenever no live model call is made or possible.
pub fn mock_suggestions() -> SuggestionSet {
    SuggestionSet {
        short: "Hey — checking in. Coffee this week?".into(),
        neutral: "I heard you're swamped. If you'd like, I can help break the task into \
                  small steps and assist."
            .into(),
        warm: "I'm really sorry things have been tough. I'm here for you — want to talk \
               Friday evening and make a plan?"
            .into(),
        action: "Propose a 30-minute check-in call and share a 3-step plan.".into(),
    }
}

/// Why a mock payload was returned instead of a live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MockReason {
    /// The force-mock flag was set.
    Forced,
    /// No API key configured.
    MissingApiKey,
    /// Catalog fetch yielded nothing usable.
    NoModelAvailable,
    /// The remote call failed; carries the heuristic failure class.
    RemoteFailure(FailureClass),
}

/// Structured result of a generation request.
///
/// Replaces the print-then-reparse flow of early prototypes: callers get a
/// tagged value instead of scraping stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionOutcome {
    /// Canned payload, with the reason no live call produced one.
    Mock {
        reason: MockReason,
        suggestions: SuggestionSet,
    },
    /// Live model response that parsed as the expected four fields.
    Live {
        model: String,
        suggestions: SuggestionSet,
    },
    /// Live model response that did not parse; surfaced raw.
    RawText { model: String, text: String },
}

/// Generate the four reply drafts for a contact.
///
/// Fails with [`StoreError::ContactNotFound`] before any remote call if the
/// contact does not exist. Contact existence is checked in every mode,
/// including forced mock.
pub async fn generate_suggestions(
    conn: &Connection,
    client: Option<&GeminiClient>,
    use_mock: bool,
    contact_id: i64,
) -> Result<SuggestionOutcome, StoreError> {
    let contact = get_contact(conn, contact_id)?;
    let messages = recent_messages(conn, contact_id, CONTEXT_MESSAGES)?;
    let prompt = build_prompt(&contact, &messages);

    if use_mock {
        info!(contact_id, "force-mock enabled, returning canned suggestions");
        return Ok(SuggestionOutcome::Mock {
            reason: MockReason::Forced,
            suggestions: mock_suggestions(),
        });
    }

    let Some(client) = client else {
        info!(contact_id, prompt = %prompt, "no API key configured, returning canned suggestions");
        return Ok(SuggestionOutcome::Mock {
            reason: MockReason::MissingApiKey,
            suggestions: mock_suggestions(),
        });
    };

    let available = client.list_model_names().await;
    let Some(model) = choose_model(&available) else {
        warn!("no suitable model in catalog, returning canned suggestions");
        return Ok(SuggestionOutcome::Mock {
            reason: MockReason::NoModelAvailable,
            suggestions: mock_suggestions(),
        });
    };

    info!(model = %model, contact_id, "sending generation request");
    let full_prompt = format!("{SYSTEM_INSTRUCTION}\n\n{prompt}");

    match client.generate_content(&model, &full_prompt).await {
        Ok(text) => match parse_suggestions(&text) {
            Some(suggestions) => Ok(SuggestionOutcome::Live { model, suggestions }),
            None => {
                warn!(model = %model, "model output did not parse as the four-field payload");
                Ok(SuggestionOutcome::RawText { model, text })
            }
        },
        Err(e) => {
            let class = classify_failure(&e.to_string());
            match class {
                FailureClass::Quota => {
                    warn!(error = %e, "quota or billing issue, returning canned suggestions")
                }
                FailureClass::Generic => {
                    warn!(error = %e, "generation call failed, returning canned suggestions")
                }
            }
            Ok(SuggestionOutcome::Mock {
                reason: MockReason::RemoteFailure(class),
                suggestions: mock_suggestions(),
            })
        }
    }
}

/// Assemble the user-facing half of the prompt from stored context.
pub fn build_prompt(contact: &Contact, messages: &[Message]) -> String {
    let mut prompt = format!("Contact: {}\nNotes: {}\nRecent messages:\n", contact.name, contact.notes);
    for m in messages {
        prompt.push_str(&format!("[{}] {}: {}\n", m.timestamp, m.direction, m.text));
    }
    prompt.push_str("\nTask: return JSON with short, neutral, warm, action.");
    prompt
}

/// Try to parse model output as the expected four-field payload.
fn parse_suggestions(text: &str) -> Option<SuggestionSet> {
    serde_json::from_str(text.trim()).ok()
}
