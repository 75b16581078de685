//! Heuristic classification of remote-call failures.
//!
//! The Generative Language API does not expose a stable machine-readable
//! error taxonomy across transports, so quota exhaustion is detected by
//! scanning the rendered error text for known substrings. Both classes
//! degrade to mock output; they differ only in the logged explanation.

use serde::Serialize;

/// Broad failure class for a remote generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Quota or billing exhaustion (429-style errors).
    Quota,
    /// Everything else: network failures, bad requests, server errors.
    Generic,
}

impl FailureClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quota => "quota",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for FailureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a rendered error message to a [`FailureClass`].
pub fn classify_failure(message: &str) -> FailureClass {
    let lowered = message.to_lowercase();
    if lowered.contains("quota")
        || lowered.contains("resourceexhausted")
        || lowered.contains("resource_exhausted")
        || lowered.contains("429")
    {
        FailureClass::Quota
    } else {
        FailureClass::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_keyword_is_quota() {
        assert_eq!(
            classify_failure("Quota exceeded for generate_content"),
            FailureClass::Quota
        );
    }

    #[test]
    fn status_429_is_quota() {
        assert_eq!(
            classify_failure("API returned HTTP 429: rate limited"),
            FailureClass::Quota
        );
    }

    #[test]
    fn resource_exhausted_is_quota() {
        assert_eq!(classify_failure("ResourceExhausted"), FailureClass::Quota);
        assert_eq!(
            classify_failure("status RESOURCE_EXHAUSTED"),
            FailureClass::Quota
        );
    }

    #[test]
    fn everything_else_is_generic() {
        assert_eq!(
            classify_failure("connection reset by peer"),
            FailureClass::Generic
        );
        assert_eq!(
            classify_failure("API returned HTTP 500: internal error"),
            FailureClass::Generic
        );
    }
}
