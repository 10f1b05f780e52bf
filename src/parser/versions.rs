// src/parser/versions.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Maps a dotted numeral ("1", "1.3", "1.3.5", ...) to the WCAG versions it
// appears in. Numbers introduced after 2.0 carry only ["2.1"].
static WCAG_VERSIONS: Lazy<HashMap<String, Vec<String>>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../resources/wcag_versions.json"))
        .expect("Failed to parse embedded wcag_versions.json")
});

/// Looks up the version labels that apply to a dotted numeral. Numbers the
/// table does not know (e.g. from a future revision) simply have no tags.
pub fn for_number(num: &str) -> Option<Vec<String>> {
    WCAG_VERSIONS.get(num).cloned()
}
