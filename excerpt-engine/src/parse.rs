//! Line-oriented document parsing into flat section records.
//!
//! The parser walks the document once, top to bottom. A line starting with
//! `#` finalizes the section in progress and opens a new one; every line,
//! heading lines included, runs through the tokenizer and the extraction
//! rules, and harvested annotations are appended to the section in progress.
//! Nesting is not the parser's concern: it emits a flat, document-ordered
//! sequence that [`crate::tree::build_tree`] reconstructs afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::reduce::{extraction_rules, shift_reduce, COMMENT_MARK, HIGHLIGHT_MARK};
use crate::token::{tokenize_for, Token};

/// Matches every delimiter marker occurrence in a heading line. One
/// left-to-right pass, pairing not required: leftovers like `%==%` keep
/// their surviving `%%`.
static MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==|%%").expect("marker alternation compiles"));

/// One heading-delimited region of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// The heading line with delimiter markers removed, trimmed. Empty for
    /// the headless region before the first heading.
    pub heading: String,
    /// Count of leading `#` characters on the cleaned heading. Real
    /// headings are depth 1 or deeper; only the headless leading section
    /// sits at depth 0.
    pub depth: usize,
    /// Annotations extracted from this section's lines, in source order.
    pub annotations: Vec<String>,
}

impl Section {
    fn with_heading(line: &str) -> Self {
        let heading = MARKERS.replace_all(line, "").trim().to_string();
        let depth = heading.chars().take_while(|&c| c == '#').count();
        Section {
            heading,
            depth,
            annotations: Vec::new(),
        }
    }
}

/// Parse `content` into the ordered flat sequence of sections.
///
/// The first element is always the (possibly empty) headless leading
/// section; the in-progress section is finalized by the next heading line
/// or by the end of the document. Unreduced tokens are discarded, so
/// unmatched delimiters extract nothing.
pub fn parse_document(content: &str) -> Vec<Section> {
    let rules = extraction_rules();
    let mut sections = Vec::new();
    let mut current = Section::default();

    for line in content.split('\n') {
        if line.starts_with('#') {
            sections.push(current);
            current = Section::with_heading(line);
        }

        let tokens = tokenize_for(
            COMMENT_MARK,
            tokenize_for(HIGHLIGHT_MARK, vec![Token::text(line)]),
        );
        for token in shift_reduce(&rules, tokens) {
            if let Token::Annotation(annotation) = token {
                current.annotations.push(annotation);
            }
        }
    }

    sections.push(current);
    sections
}
