//! Tests for the composed extraction pipeline.

use excerpt_engine::parse::{parse_document, Section};
use excerpt_engine::token::{tokenize_for, Token};
use excerpt_engine::tree::build_tree;
use excerpt_engine::{extract_note, normalize_path};
use proptest::prelude::*;

#[test]
fn kitchensink_note_snapshot() {
    let source = "\
Intro before any heading with ==an early find==.

# Heading One
Prose around ==quote here== and more prose.

## Heading Two
%%a comment%%

## Empty Sibling
Nothing annotated here.

# Heading Three %%inline aside%%
==closing== thought %%with a remark%%
";

    let note = extract_note(source, "Notes/Doc.md", "Doc");
    insta::assert_snapshot!(note, @r"
    [[Notes/Doc.md|Doc]]

    > an early find

    # Heading One

    [[Notes/Doc.md#Heading One|Doc]]

    > quote here

    ## Heading Two

    [[Notes/Doc.md#Heading One#Heading Two|Doc]]

    a comment

    # Heading Three inline aside

    [[Notes/Doc.md#Heading Three inline aside|Doc]]

    inline aside

    > closing

    with a remark
    ");
}

#[test]
fn two_heading_document_blocks_in_order() {
    let source = "# Heading One\n==quote here==\n## Heading Two\n%%a comment%%";
    let note = extract_note(source, "Notes/Doc.md", "Doc");
    assert_eq!(
        note,
        "# Heading One\n\n\
         [[Notes/Doc.md#Heading One|Doc]]\n\n\
         > quote here\n\n\
         ## Heading Two\n\n\
         [[Notes/Doc.md#Heading One#Heading Two|Doc]]\n\n\
         a comment"
    );
}

#[test]
fn plain_document_renders_empty() {
    assert_eq!(extract_note("just prose\nno markers", "Doc.md", "Doc"), "");
}

#[test]
fn pipeline_is_idempotent_on_identical_input() {
    let source = "# A\n==q==\n## B\n%%c%%";
    let first = extract_note(source, "Notes/Doc.md", "Doc");
    let second = extract_note(source, "Notes/Doc.md", "Doc");
    assert_eq!(first, second);
}

proptest! {
    /// The tokenizer only relocates delimiter boundaries; concatenating the
    /// produced tokens reproduces the input line.
    #[test]
    fn tokenizing_preserves_content(line in "[a-z=%# ]{0,40}") {
        let tokens = tokenize_for("%%", tokenize_for("==", vec![Token::text(line.as_str())]));
        let joined: String = tokens.iter().map(Token::as_str).collect();
        prop_assert_eq!(joined, line);
    }

    /// Tree building is order preserving for any depth sequence: the
    /// depth-first flatten reproduces the parser's flat output.
    #[test]
    fn tree_flatten_preserves_order(depths in prop::collection::vec(0usize..6, 0..32)) {
        let sections: Vec<Section> = depths
            .iter()
            .enumerate()
            .map(|(index, &depth)| Section {
                heading: format!("{} h{index}", "#".repeat(depth)),
                depth,
                annotations: Vec::new(),
            })
            .collect();
        let tree = build_tree(sections.clone());
        let flattened: Vec<Section> = tree.flatten().into_iter().cloned().collect();
        prop_assert_eq!(flattened, sections);
    }

    /// Normalization is idempotent.
    #[test]
    fn normalize_path_is_idempotent(path in "[A-Za-z0-9/\\\\. ]{0,40}") {
        let once = normalize_path(&path);
        prop_assert_eq!(normalize_path(&once), once);
    }
}
