//! Query guard - keyword blocklist for read-only mode
//!
//! A lexical filter, not a Cypher parser. The lowercased query is searched
//! for each keyword followed by a single space. This blocks some harmless
//! queries (a string literal containing "set ") and lets through writes
//! whose keyword is followed by a newline or tab.

/// Write keywords, each including the trailing space that is matched
pub const BLOCKED_KEYWORDS: [&str; 6] = ["delete ", "remove ", "drop ", "create ", "merge ", "set "];

/// Returns the first blocked keyword found in `query`, if any
pub fn find_blocked_keyword(query: &str) -> Option<&'static str> {
    let lowered = query.to_lowercase();
    BLOCKED_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lowered.contains(keyword))
}
