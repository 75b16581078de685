//! Record types matching the `contacts` and `conversations` tables.

use serde::{Deserialize, Serialize};

/// A person tracked by the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: i64,
    pub name: String,
    /// Free-text notes shown to the model as context. Empty on import.
    pub notes: String,
}

/// One logged communication event tied to a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub conv_id: i64,
    pub contact_id: i64,
    /// Caller-supplied timestamp string. Compared lexicographically for
    /// ordering, so a consistent format per contact is assumed.
    pub timestamp: String,
    /// Free-text direction tag, e.g. `inbound` or `outbound`.
    pub direction: String,
    pub text: String,
}

/// A message row about to be inserted (no ID assigned yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    pub timestamp: String,
    pub direction: String,
    pub text: String,
}
