//! Model selection — a priority-ordered fuzzy lookup over the catalog.
//!
//! This is not a scoring algorithm: the first preference entry with a match
//! wins, and ties within one preference break by catalog order.

/// Preferred models, most preferred first, balancing quality against cost.
pub const PREFERRED_MODELS: [&str; 7] = [
    "models/gemini-pro-latest",
    "models/gemini-3-pro-preview",
    "models/gemini-2.5-pro",
    "models/gemini-2.5-flash",
    "models/gemini-flash-latest",
    "models/gemini-2.0-flash",
    "models/text-bison-001",
];

/// Vendor keywords used as a last-resort fallback when no preferred model
/// is present in the catalog.
const VENDOR_KEYWORDS: [&str; 3] = ["gemini", "bison", "text"];

/// Pick the best available model name, or `None` if the catalog is empty or
/// nothing matches.
///
/// For each preference in order, an available name matches if it equals the
/// preference case-insensitively or contains it as a substring. Failing
/// that, the first catalog entry containing a known vendor keyword wins.
pub fn choose_model(available: &[String]) -> Option<String> {
    if available.is_empty() {
        return None;
    }

    for pref in PREFERRED_MODELS {
        let pref_lower = pref.to_lowercase();
        for name in available {
            let name_lower = name.to_lowercase();
            if name_lower == pref_lower || name_lower.contains(&pref_lower) {
                return Some(name.clone());
            }
        }
    }

    for name in available {
        let name_lower = name.to_lowercase();
        if VENDOR_KEYWORDS.iter().any(|kw| name_lower.contains(kw)) {
            return Some(name.clone());
        }
    }

    None
}
