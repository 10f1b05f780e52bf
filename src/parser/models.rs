// src/parser/models.rs
use serde::{Deserialize, Serialize};

/// Root of the extracted tree. The field names here (and on every nested
/// struct) are the wire contract consumed by downstream tooling; renaming a
/// key is a breaking change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WcagDocument {
    pub principles: Vec<Principle>,
}

/// Top-level grouping, e.g. "1 Perceivable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principle {
    pub id: Option<String>,
    pub alt_id: Vec<String>,
    pub num: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
    pub handle: String,
    pub text: String,
    pub guidelines: Vec<Guideline>,
}

/// Mid-level grouping, e.g. "1.1 Text Alternatives".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    pub id: Option<String>,
    pub alt_id: Vec<String>,
    pub num: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
    pub handle: String,
    pub text: String,
    #[serde(rename = "successcriteria")]
    pub success_criteria: Vec<SuccessCriterion>,
}

/// Atomic testable requirement, e.g. "1.1.1 Non-text Content".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessCriterion {
    pub id: Option<String>,
    pub alt_id: Vec<String>,
    pub num: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
    pub level: ConformanceLevel,
    pub handle: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Detail>>,
}

/// The three conformance tiers, strictest last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConformanceLevel {
    A,
    AA,
    AAA,
}

impl ConformanceLevel {
    /// Classifies free conformance text. "AAA" must be checked before "AA"
    /// because the keywords overlap as substrings; text carrying neither
    /// keyword falls back to the baseline level.
    pub fn classify(level_text: &str) -> Self {
        if level_text.contains("AAA") {
            ConformanceLevel::AAA
        } else if level_text.contains("AA") {
            ConformanceLevel::AA
        } else {
            ConformanceLevel::A
        }
    }
}

/// One supporting block inside a success criterion, kept in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Detail {
    /// A bulleted list of handle/text pairs (from `<ul>`).
    #[serde(rename = "olist")]
    OrderedList { items: Vec<DetailItem> },

    /// A term/definition list of handle/text pairs (from `<dl>`).
    #[serde(rename = "ulist")]
    DefinitionList { items: Vec<DetailItem> },

    /// A single annotated note; the handle carries a running counter suffix.
    #[serde(rename = "note")]
    Note { handle: String, text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    pub handle: String,
    pub text: String,
}
