//! Search-term matching used by repository scans.
//!
//! # Invariants
//! - Only the search term is lower-cased; stored values are compared as-is.
//! - Containment is checked as `term.contains(stored)`, not the reverse.
//!   Searching `"Acme S.A"` therefore matches stored trading names that are
//!   substrings of `"acme s.a"`. This is most likely a defect in the
//!   published contract, but existing callers may rely on it, so it is kept
//!   until the intended direction is confirmed.
//! - An empty stored value matches every term.

/// Returns whether the lower-cased `term` contains `stored`.
pub fn term_contains(term: &str, stored: &str) -> bool {
    term.to_lowercase().contains(stored)
}

/// Returns whether the lower-cased `term` contains any of `stored`.
pub fn term_contains_any<'a>(term: &str, stored: impl IntoIterator<Item = &'a str>) -> bool {
    let normalized = term.to_lowercase();
    stored.into_iter().any(|value| normalized.contains(value))
}
