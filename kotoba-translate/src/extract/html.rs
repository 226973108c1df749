//! HTML-block extraction for scraped dictionary pages.
//!
//! A [`HtmlBlockProfile`] names the CSS signature of translation blocks on
//! one site. Each matched block is flattened to text (nested tags dropped,
//! entities decoded by the parser), then split on enumeration separators
//! so that `猫、ネコ` yields two sibling candidates.

use scraper::{ElementRef, Html, Selector};

use crate::types::{Candidate, Section, SourceId};

/// Separators that pack several translations into one block.
const ENUMERATION_SEPARATORS: &[char] = &['、', '，', '；', ';'];

/// Inserted where the markup breaks a line inside a block.
const BLOCK_BREAK: char = '、';

/// Elements whose start marks a break between sibling translations.
const BREAKING_ELEMENTS: &[&str] = &["br", "li", "p", "div"];

/// Splits a page into primary and secondary sections.
///
/// Replaces matching a literal "additional translations" string inside the
/// candidate stream: the section is decided per container, and every block
/// inside it carries the tag.
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    /// Selector for a section container (e.g. one results table).
    pub container: &'static str,
    /// Selector, inside the container, for the element naming the section.
    pub header: &'static str,
    /// Lowercased text that marks a header as secondary.
    pub secondary_marker: &'static str,
}

/// CSS signature of translation blocks on one site.
#[derive(Debug, Clone, Copy)]
pub struct HtmlBlockProfile {
    /// Selector matching one translation block.
    pub block: &'static str,
    /// Selector for nested elements whose text is dropped (part-of-speech
    /// markers, usage notes).
    pub skip: Option<&'static str>,
    /// Optional section split.
    pub sections: Option<SectionRule>,
    /// Only the first `max_blocks` blocks are read.
    pub max_blocks: usize,
}

/// Extract candidates from an HTML page.
///
/// Returns an empty list if a selector is invalid or nothing matches;
/// extraction never fails the lookup.
pub fn extract_blocks(html: &str, profile: &HtmlBlockProfile, source: SourceId) -> Vec<Candidate> {
    let Some(block_sel) = parse_selector(profile.block, source) else {
        return Vec::new();
    };
    let skip_sel = profile.skip.and_then(|s| parse_selector(s, source));

    let document = Html::parse_document(html);
    let mut candidates = Vec::new();
    let mut blocks_read = 0usize;

    match profile.sections {
        None => {
            for block in document.select(&block_sel).take(profile.max_blocks) {
                push_block(&mut candidates, block, skip_sel.as_ref(), source, Section::Primary);
                blocks_read += 1;
            }
        }
        Some(rule) => {
            let (Some(container_sel), Some(header_sel)) = (
                parse_selector(rule.container, source),
                parse_selector(rule.header, source),
            ) else {
                return Vec::new();
            };

            'containers: for container in document.select(&container_sel) {
                let section = section_of(container, &header_sel, rule.secondary_marker);
                for block in container.select(&block_sel) {
                    if blocks_read >= profile.max_blocks {
                        break 'containers;
                    }
                    push_block(&mut candidates, block, skip_sel.as_ref(), source, section);
                    blocks_read += 1;
                }
            }
        }
    }

    tracing::debug!(%source, blocks = blocks_read, count = candidates.len(), "HTML blocks extracted");
    candidates
}

/// Split a flattened block on enumeration separators, dropping empty pieces.
pub fn split_enumeration(text: &str) -> impl Iterator<Item = &str> {
    text.split(ENUMERATION_SEPARATORS)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

fn push_block(
    out: &mut Vec<Candidate>,
    block: ElementRef<'_>,
    skip: Option<&Selector>,
    source: SourceId,
    section: Section,
) {
    let text = block_text(block, skip);
    out.extend(
        split_enumeration(&text).map(|piece| Candidate::with_section(piece, source, section)),
    );
}

/// Flatten a block to text, dropping the content of skipped descendants
/// and marking line breaks with [`BLOCK_BREAK`].
fn block_text(block: ElementRef<'_>, skip: Option<&Selector>) -> String {
    let mut out = String::new();
    for node in block.descendants().skip(1) {
        if let Some(element) = node.value().as_element() {
            if BREAKING_ELEMENTS.contains(&element.name()) {
                out.push(BLOCK_BREAK);
            }
            continue;
        }
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = skip.is_some_and(|sel| {
            node.ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| sel.matches(&el))
        });
        if !skipped {
            out.push_str(text);
        }
    }
    out
}

fn section_of(container: ElementRef<'_>, header: &Selector, secondary_marker: &str) -> Section {
    let is_secondary = container.select(header).any(|el| {
        el.text()
            .collect::<String>()
            .to_lowercase()
            .contains(secondary_marker)
    });
    if is_secondary {
        Section::Secondary
    } else {
        Section::Primary
    }
}

fn parse_selector(selector: &str, source: SourceId) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(%source, selector, error = ?e, "invalid block selector");
            None
        }
    }
}
