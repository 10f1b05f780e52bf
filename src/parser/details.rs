// src/parser/details.rs

use crate::parser::models::{Detail, DetailItem};
use crate::parser::text::{clean_string, normalize_paragraph};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

// The three block shapes a criterion's supporting content comes in. Selected
// together so list and note blocks interleave in original document order.
static DETAIL_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul, dl, .note").expect("Failed to compile DETAIL_BLOCK_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR"));

static LEAD_TEXT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("strong").expect("Failed to compile LEAD_TEXT_SELECTOR"));

static TERM_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("dt").expect("Failed to compile TERM_SELECTOR"));

static NOTE_TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".note-title").expect("Failed to compile NOTE_TITLE_SELECTOR"));

/// Extracts the supporting detail blocks of one success-criterion section.
///
/// Returns `None` when the criterion has no detail blocks at all, which
/// downstream consumers treat differently from an empty list. The note
/// counter is local to this call: it runs 1, 2, ... across every annotated
/// note within this criterion and never carries over to a sibling criterion.
pub fn extract_details(section: ElementRef) -> Option<Vec<Detail>> {
    let mut details = Vec::new();
    let mut note_count: u32 = 1;

    for block in section.select(&DETAIL_BLOCK_SELECTOR) {
        match block.value().name() {
            "ul" => {
                let mut items = Vec::new();
                for li in block.select(&LIST_ITEM_SELECTOR) {
                    let handle = clean_string(
                        &li.select(&LEAD_TEXT_SELECTOR)
                            .next()
                            .map(|lead| lead.text().collect::<String>())
                            .unwrap_or_default(),
                    );
                    let raw_text = li.text().collect::<String>();
                    let text = clean_string(&raw_text.replacen(&handle, "", 1));
                    items.push(DetailItem {
                        handle: handle.strip_suffix(':').unwrap_or(&handle).to_string(),
                        text,
                    });
                }
                details.push(Detail::OrderedList { items });
            }

            "dl" => {
                let mut items = Vec::new();
                for term in block.select(&TERM_SELECTOR) {
                    let handle = term.text().collect::<String>();
                    // The definition is the element immediately following the term.
                    let definition = term
                        .next_siblings()
                        .find_map(ElementRef::wrap)
                        .map(|dd| dd.text().collect::<String>())
                        .unwrap_or_default();
                    items.push(DetailItem {
                        handle,
                        text: normalize_paragraph(&definition),
                    });
                }
                details.push(Detail::DefinitionList { items });
            }

            _ => {
                // Anything else matched by the selector is an annotated note.
                let title = clean_string(
                    &block
                        .select(&NOTE_TITLE_SELECTOR)
                        .next()
                        .map(|t| t.text().collect::<String>())
                        .unwrap_or_default(),
                );
                let raw_text = block.text().collect::<String>();
                let text = clean_string(&raw_text.replacen(&title, "", 1));
                details.push(Detail::Note {
                    handle: format!("{} {}", title, note_count),
                    text,
                });
                note_count += 1;
            }
        }
    }

    if details.is_empty() {
        None
    } else {
        Some(details)
    }
}
