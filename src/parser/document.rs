// src/parser/document.rs

// --- Imports ---
use crate::parser::details::extract_details;
use crate::parser::models::{ConformanceLevel, Guideline, Principle, SuccessCriterion, WcagDocument};
use crate::parser::text::{clean_string, normalize_paragraph, split_once_at};
use crate::parser::versions;
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static PRINCIPLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("section.principle").expect("Failed to compile PRINCIPLE_SELECTOR")
});

static GUIDELINE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("section.guideline").expect("Failed to compile GUIDELINE_SELECTOR")
});

static CRITERION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section.sc").expect("Failed to compile CRITERION_SELECTOR"));

static PRINCIPLE_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("Failed to compile PRINCIPLE_HEADING_SELECTOR"));

static GUIDELINE_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3").expect("Failed to compile GUIDELINE_HEADING_SELECTOR"));

static CRITERION_HEADING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h4").expect("Failed to compile CRITERION_HEADING_SELECTOR"));

static PRINCIPLE_BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2 + p").expect("Failed to compile PRINCIPLE_BODY_SELECTOR"));

static GUIDELINE_BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3 + p").expect("Failed to compile GUIDELINE_BODY_SELECTOR"));

static LEVEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p.conformance-level").expect("Failed to compile LEVEL_SELECTOR")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR"));

// --- Regex Patterns (Lazy Static) ---
// One numeral pattern per nesting depth; a heading that fails its pattern
// violates the document convention and aborts the parse.
static PRINCIPLE_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d").expect("Failed to compile PRINCIPLE_NUM_RE"));

static GUIDELINE_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\.\d").expect("Failed to compile GUIDELINE_NUM_RE"));

static CRITERION_NUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\.\d\.\d+").expect("Failed to compile CRITERION_NUM_RE"));

// The permalink glyph that separates a heading's short name from its trailing
// decoration. The published document uses "§"; some translations ship it
// mis-encoded as the pair "ยง", so both byte shapes are accepted.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[§ยง]+").expect("Failed to compile SEPARATOR_RE"));

/// Parses the whole standard document into the typed tree.
///
/// Principles are emitted in document order. A document with no principle
/// sections at all produces an empty tree rather than an error, so partial
/// documents still round-trip.
pub fn parse_document(html: &str) -> Result<WcagDocument, ExtractError> {
    let document = Html::parse_document(html);

    let mut principles = Vec::new();
    for section in document.select(&PRINCIPLE_SELECTOR) {
        principles.push(parse_principle(section)?);
    }

    tracing::debug!("Parsed {} principles", principles.len());
    Ok(WcagDocument { principles })
}

// The shared heading anatomy of all three section depths.
struct HeadingParts {
    num: String,
    handle: String,
}

/// Splits a heading into its dotted numeral and its short name.
///
/// The numeral must match the depth's expected pattern; a heading without one
/// is a structural violation and fails the parse rather than being coerced to
/// a placeholder. The short name is whatever follows the numeral (and an
/// optional trailing period) up to the permalink glyph, whitespace-collapsed.
fn split_heading(
    heading: &str,
    num_re: &Regex,
    level: &'static str,
) -> Result<HeadingParts, ExtractError> {
    let numeral = num_re.find(heading).ok_or_else(|| ExtractError::MissingNumber {
        level,
        heading: clean_string(heading),
    })?;

    let rest = heading[numeral.end()..].trim_start_matches('.');
    let (handle, _) = split_once_at(rest, &SEPARATOR_RE);

    Ok(HeadingParts {
        num: numeral.as_str().to_string(),
        handle: clean_string(handle),
    })
}

// Reads the (section anchor, heading anchor) identifier pair once at parse time.
fn section_anchors(section: ElementRef, heading: Option<ElementRef>) -> (Option<String>, Vec<String>) {
    let id = section.value().attr("id").map(str::to_string);
    let alt_id = heading
        .and_then(|h| h.value().attr("id"))
        .map(str::to_string)
        .into_iter()
        .collect();
    (id, alt_id)
}

fn parse_principle(section: ElementRef) -> Result<Principle, ExtractError> {
    let heading_el = section.select(&PRINCIPLE_HEADING_SELECTOR).next();
    let heading = heading_el
        .map(|h| h.text().collect::<String>())
        .unwrap_or_default();

    let parts = split_heading(&heading, &PRINCIPLE_NUM_RE, "principle")?;
    let (id, alt_id) = section_anchors(section, heading_el);

    let text = section
        .select(&PRINCIPLE_BODY_SELECTOR)
        .next()
        .map(|p| p.text().collect::<String>())
        .unwrap_or_default();

    let mut guidelines = Vec::new();
    for guideline in section.select(&GUIDELINE_SELECTOR) {
        guidelines.push(parse_guideline(guideline)?);
    }

    tracing::trace!("Parsed principle {} '{}'", parts.num, parts.handle);
    Ok(Principle {
        id,
        alt_id,
        versions: versions::for_number(&parts.num),
        num: parts.num,
        handle: parts.handle,
        text,
        guidelines,
    })
}

fn parse_guideline(section: ElementRef) -> Result<Guideline, ExtractError> {
    let heading_el = section.select(&GUIDELINE_HEADING_SELECTOR).next();
    let heading = heading_el
        .map(|h| h.text().collect::<String>())
        .unwrap_or_default();

    let parts = split_heading(&heading, &GUIDELINE_NUM_RE, "guideline")?;
    let (id, alt_id) = section_anchors(section, heading_el);

    let text = section
        .select(&GUIDELINE_BODY_SELECTOR)
        .next()
        .map(|p| p.text().collect::<String>())
        .unwrap_or_default();

    let mut success_criteria = Vec::new();
    for criterion in section.select(&CRITERION_SELECTOR) {
        success_criteria.push(parse_criterion(criterion)?);
    }

    tracing::trace!("Parsed guideline {} '{}'", parts.num, parts.handle);
    Ok(Guideline {
        id,
        alt_id,
        versions: versions::for_number(&parts.num),
        num: parts.num,
        handle: parts.handle,
        text,
        success_criteria,
    })
}

fn parse_criterion(section: ElementRef) -> Result<SuccessCriterion, ExtractError> {
    let heading_el = section.select(&CRITERION_HEADING_SELECTOR).next();
    let heading = heading_el
        .map(|h| h.text().collect::<String>())
        .unwrap_or_default();

    let parts = split_heading(&heading, &CRITERION_NUM_RE, "success criterion")?;
    let (id, alt_id) = section_anchors(section, heading_el);

    let level_text = section
        .select(&LEVEL_SELECTOR)
        .next()
        .map(|p| p.text().collect::<String>())
        .unwrap_or_default();
    let level = ConformanceLevel::classify(&level_text);

    // The requirement text is the first paragraph that is not the
    // conformance-level marker.
    let text = section
        .select(&PARAGRAPH_SELECTOR)
        .find(|p| !p.value().classes().any(|c| c == "conformance-level"))
        .map(|p| normalize_paragraph(&p.text().collect::<String>()))
        .unwrap_or_default();

    tracing::trace!("Parsed criterion {} '{}' ({:?})", parts.num, parts.handle, level);
    Ok(SuccessCriterion {
        id,
        alt_id,
        versions: versions::for_number(&parts.num),
        num: parts.num,
        level,
        handle: parts.handle,
        text,
        details: extract_details(section),
    })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::models::Detail;

    // One principle, one guideline, one criterion, exercising every field.
    const MINIMAL_DOC: &str = r#"
        <!DOCTYPE html>
        <html><body>
        <section class="principle" id="perceivable">
            <h2 id="principle1">1. Example ง Cat</h2>
            <p>Principle intro text.</p>
            <section class="guideline" id="text-alternatives">
                <h3 id="guideline11">1.1 Sub ง Desc</h3>
                <p>Guideline intro text.</p>
                <section class="sc" id="non-text-content">
                    <h4 id="sc111">1.1.1 Item ง Desc</h4>
                    <p class="conformance-level">(Level AA)</p>
                    <p>All non-text content has a text
alternative.</p>
                    <dl>
                        <dt>Term</dt>
                        <dd>Definition text</dd>
                    </dl>
                </section>
            </section>
        </section>
        </body></html>
    "#;

    #[test]
    fn minimal_document_end_to_end() {
        let doc = parse_document(MINIMAL_DOC).expect("parse failed");
        assert_eq!(doc.principles.len(), 1);

        let principle = &doc.principles[0];
        assert_eq!(principle.num, "1");
        assert_eq!(principle.handle, "Example");
        assert_eq!(principle.id.as_deref(), Some("perceivable"));
        assert_eq!(principle.alt_id, vec!["principle1".to_string()]);
        assert_eq!(
            principle.versions,
            Some(vec!["2.0".to_string(), "2.1".to_string()])
        );
        assert_eq!(principle.text, "Principle intro text.");

        let guideline = &principle.guidelines[0];
        assert_eq!(guideline.num, "1.1");
        assert_eq!(guideline.handle, "Sub");

        let criterion = &guideline.success_criteria[0];
        assert_eq!(criterion.num, "1.1.1");
        assert_eq!(criterion.handle, "Item");
        assert_eq!(criterion.level, ConformanceLevel::AA);
        assert_eq!(criterion.text, "All non-text content has a textalternative.");

        let details = criterion.details.as_ref().expect("details missing");
        assert_eq!(details.len(), 1);
        match &details[0] {
            Detail::DefinitionList { items } => {
                assert_eq!(items[0].handle, "Term");
                assert_eq!(items[0].text, "Definition text");
            }
            other => panic!("expected ulist, got {:?}", other),
        }
    }

    #[test]
    fn heading_split_accepts_the_published_permalink_glyph() {
        let html = r#"
            <section class="principle" id="p1">
                <h2>1. Perceivable §</h2>
                <p>Intro.</p>
            </section>
        "#;
        let doc = parse_document(html).unwrap();
        assert_eq!(doc.principles[0].handle, "Perceivable");
    }

    #[test]
    fn empty_document_is_a_valid_empty_tree() {
        let doc = parse_document("<html><body><p>nothing here</p></body></html>").unwrap();
        assert!(doc.principles.is_empty());
    }

    #[test]
    fn heading_without_numeral_fails_the_parse() {
        let html = r#"
            <section class="principle" id="p1">
                <h2>Perceivable without a number</h2>
            </section>
        "#;
        let err = parse_document(html).unwrap_err();
        match err {
            ExtractError::MissingNumber { level, heading } => {
                assert_eq!(level, "principle");
                assert_eq!(heading, "Perceivable without a number");
            }
        }
    }

    #[test]
    fn missing_optional_content_is_tolerated() {
        // No intro paragraph, no conformance text, no details.
        let html = r#"
            <section class="principle">
                <h2>2 Operable</h2>
                <section class="guideline">
                    <h3>2.1 Keyboard Accessible</h3>
                    <section class="sc">
                        <h4>2.1.1 Keyboard</h4>
                    </section>
                </section>
            </section>
        "#;
        let doc = parse_document(html).unwrap();
        let criterion = &doc.principles[0].guidelines[0].success_criteria[0];
        assert_eq!(doc.principles[0].text, "");
        assert_eq!(criterion.level, ConformanceLevel::A);
        assert_eq!(criterion.text, "");
        assert!(criterion.details.is_none());
        assert!(doc.principles[0].id.is_none());
        assert!(doc.principles[0].alt_id.is_empty());
    }

    #[test]
    fn unknown_numeral_has_no_version_tags() {
        let html = r#"
            <section class="principle">
                <h2>8. Futuristic</h2>
            </section>
        "#;
        let doc = parse_document(html).unwrap();
        assert!(doc.principles[0].versions.is_none());
    }

    #[test]
    fn note_counter_resets_between_criteria() {
        let html = r#"
            <section class="principle">
                <h2>1. Perceivable</h2>
                <section class="guideline">
                    <h3>1.2 Time-based Media</h3>
                    <section class="sc">
                        <h4>1.2.1 Audio-only</h4>
                        <div class="note"><p class="note-title">Note</p><p>First item note.</p></div>
                        <div class="note"><p class="note-title">Note</p><p>Second item note.</p></div>
                    </section>
                    <section class="sc">
                        <h4>1.2.2 Captions</h4>
                        <div class="note"><p class="note-title">Note</p><p>Other item note.</p></div>
                    </section>
                </section>
            </section>
        "#;
        let doc = parse_document(html).unwrap();
        let criteria = &doc.principles[0].guidelines[0].success_criteria;

        let first_details = criteria[0].details.as_ref().unwrap();
        match (&first_details[0], &first_details[1]) {
            (Detail::Note { handle: h1, .. }, Detail::Note { handle: h2, .. }) => {
                assert_eq!(h1, "Note 1");
                assert_eq!(h2, "Note 2");
            }
            other => panic!("expected two notes, got {:?}", other),
        }

        let second_details = criteria[1].details.as_ref().unwrap();
        match &second_details[0] {
            Detail::Note { handle, .. } => assert_eq!(handle, "Note 1"),
            other => panic!("expected note, got {:?}", other),
        }
    }

    #[test]
    fn repeated_parses_serialize_identically() {
        let first = serde_json::to_string(&parse_document(MINIMAL_DOC).unwrap()).unwrap();
        let second = serde_json::to_string(&parse_document(MINIMAL_DOC).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
