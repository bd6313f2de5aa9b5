//! CLI-specific inspection transforms.
//!
//! Each transform exposes one stage of the extraction pipeline, named
//! stage-format:
//!
//! 1. **Tokenization** - Raw lines → token stream
//!    - `tokens-json`: per-line token arrays after both delimiter passes
//! 2. **Parsing** - Lines → flat section records
//!    - `sections-json`: the parser's document-ordered output
//! 3. **Tree building** - Flat records → heading outline
//!    - `tree-viz`: indented outline with annotation counts (default)
//! 4. **Rendering** - Outline → citation note
//!    - `note`: the finished note as it would be written

use excerpt_engine::note::render_citation_note;
use excerpt_engine::parse::parse_document;
use excerpt_engine::reduce::{COMMENT_MARK, HIGHLIGHT_MARK};
use excerpt_engine::token::{tokenize_for, Token};
use excerpt_engine::tree::{build_tree, SectionTree, ROOT};

/// All available CLI transforms (pipeline stage + output format).
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tokens-json", "sections-json", "tree-viz", "note"];

/// Execute a named transform over one document's source text.
///
/// `document_path` and `basename` only matter to the `note` transform,
/// which embeds them in wiki links.
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    document_path: &str,
    basename: &str,
) -> Result<String, String> {
    match transform_name {
        "tokens-json" => {
            let lines: Vec<Vec<String>> = source
                .split('\n')
                .map(|line| {
                    tokenize_for(
                        COMMENT_MARK,
                        tokenize_for(HIGHLIGHT_MARK, vec![Token::text(line)]),
                    )
                    .iter()
                    .map(|token| token.as_str().to_string())
                    .collect()
                })
                .collect();
            serde_json::to_string_pretty(&lines)
                .map_err(|err| format!("JSON serialization failed: {err}"))
        }
        "sections-json" => {
            let sections = parse_document(source);
            serde_json::to_string_pretty(&sections)
                .map_err(|err| format!("JSON serialization failed: {err}"))
        }
        "tree-viz" => {
            let tree = build_tree(parse_document(source));
            Ok(tree_to_viz(&tree))
        }
        "note" => {
            let tree = build_tree(parse_document(source));
            Ok(render_citation_note(&tree, document_path, basename))
        }
        other => Err(format!(
            "Unknown transform '{other}'. Use --list-transforms to see options."
        )),
    }
}

/// Indented outline of the section tree, one line per section, with the
/// number of annotations each contributed.
fn tree_to_viz(tree: &SectionTree) -> String {
    let mut out = String::new();
    render_node(tree, ROOT, 0, &mut out);
    out
}

fn render_node(tree: &SectionTree, index: usize, indent: usize, out: &mut String) {
    if index != ROOT {
        let node = tree.node(index);
        let title = if node.section.heading.is_empty() {
            "(leading content)"
        } else {
            node.section.heading.as_str()
        };
        out.push_str(&"  ".repeat(indent));
        out.push_str(title);
        out.push_str(&format!(" [{}]\n", node.section.annotations.len()));
    }
    for &child in &tree.node(index).children {
        let deeper = if index == ROOT { 0 } else { indent + 1 };
        render_node(tree, child, deeper, out);
    }
}
