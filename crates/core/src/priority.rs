//! Mapping of raw priority tokens to tracker priority names.

use crate::constants::DEFAULT_PRIORITY;
use std::collections::BTreeMap;

/// Built-in token table used when the caller's overrides do not mention a token.
pub fn builtin_priority(token: &str) -> Option<&'static str> {
    let label = match token {
        "p0" | "critical" | "sev1" => "Highest",
        "p1" | "high" | "sev2" => "High",
        "p2" | "medium" | "sev3" => "Medium",
        "p3" | "low" | "sev4" => "Low",
        _ => return None,
    };
    Some(label)
}

/// Resolves a raw token to a priority name.
///
/// Returns `None` only when no token was seen. Otherwise the lowercased token is looked up in
/// `overrides`, then in [`builtin_priority`], falling back to [`DEFAULT_PRIORITY`].
pub fn map_priority(token: Option<&str>, overrides: &BTreeMap<String, String>) -> Option<String> {
    let token = token?.trim().to_lowercase();
    let label = overrides
        .get(&token)
        .cloned()
        .or_else(|| builtin_priority(&token).map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_PRIORITY.to_owned());
    Some(label)
}
