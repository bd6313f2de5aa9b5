//! Citation note rendering.
//!
//! Walks the section tree depth-first and emits text blocks: for every
//! section that contributed annotations, its heading line, a wiki link back
//! into the source document at that heading, then one block per annotation.
//! Sections without annotations emit nothing of their own but are still
//! descended into. Blocks are joined with a blank line.

use crate::tree::{SectionTree, ROOT};

/// Render the citation note for one parsed document.
///
/// `full_path` is the vault-relative source path embedded in every link;
/// `basename` is the link caption. Leading empty blocks (the headless
/// section's empty heading) are trimmed, and the result carries no trailing
/// newline.
pub fn render_citation_note(tree: &SectionTree, full_path: &str, basename: &str) -> String {
    let mut blocks = Vec::new();
    collect_blocks(tree, ROOT, full_path, basename, &mut blocks);

    let lead = blocks.iter().take_while(|block| block.is_empty()).count();
    blocks[lead..].join("\n\n")
}

fn collect_blocks(
    tree: &SectionTree,
    index: usize,
    full_path: &str,
    basename: &str,
    out: &mut Vec<String>,
) {
    let node = tree.node(index);
    if !node.section.annotations.is_empty() {
        out.push(node.section.heading.clone());
        let anchors = anchor_chain(tree, index);
        out.push(format!("[[{full_path}{anchors}|{basename}]]"));
        out.extend(node.section.annotations.iter().cloned());
    }
    for &child in &node.children {
        collect_blocks(tree, child, full_path, basename, out);
    }
}

/// Wiki-anchor suffix for a node: ancestor headings root-ward to self, each
/// contributing `#` plus its title. The upward walk stops at the first
/// empty heading, so the synthetic root and the headless leading section
/// never contribute.
fn anchor_chain(tree: &SectionTree, index: usize) -> String {
    let mut anchors = Vec::new();
    let mut current = Some(index);
    while let Some(node_index) = current {
        let node = tree.node(node_index);
        if node.section.heading.is_empty() {
            break;
        }
        anchors.push(heading_anchor(&node.section.heading));
        current = node.parent;
    }
    anchors.reverse();
    anchors.concat()
}

/// `"## Heading Two"` anchors as `"#Heading Two"`: the whole leading marker
/// run and the whitespace after it collapse into the one `#` separator.
fn heading_anchor(heading: &str) -> String {
    let title = heading.trim_start_matches('#').trim_start();
    format!("#{title}")
}
