//! Cleaning of free-form request values.
//!
//! API explorers prefill optional form fields with a placeholder literal (`string` by default);
//! such values, like blanks, are treated as absent.

fn is_placeholder(value: &str, placeholder: &str) -> bool {
    value.eq_ignore_ascii_case(placeholder)
}

/// Splits a comma list, dropping blank tokens and the placeholder literal.
pub fn clean_csv(value: Option<&str>, placeholder: &str) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && !is_placeholder(token, placeholder))
        .map(str::to_owned)
        .collect()
}

/// Normalises a custom-field id; blank or placeholder values become `None`.
pub fn clean_field_id(value: Option<&str>, placeholder: &str) -> Option<String> {
    value
        .map(str::trim)
        .filter(|id| !id.is_empty() && !is_placeholder(id, placeholder))
        .map(str::to_owned)
}
