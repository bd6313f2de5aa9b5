//! Annotation extraction engine for markdown vaults
//!
//!     This crate turns one markdown document into a "citation note": the
//!     inline `==highlight==` and `%%comment%%` spans it contains, grouped
//!     under the heading they appeared beneath, each group carrying a wiki
//!     link back into the source document at that heading.
//!
//!     This is a pure lib, that is, it powers the excerpt-cli but is shell
//!     agnostic: no code here supposes a shell environment, be it to std
//!     print, env vars or the filesystem. The engine is total for any text
//!     input; failures only exist at the I/O boundary, which belongs to the
//!     caller.
//!
//! Architecture
//!
//!     The pipeline runs in fixed stages, each its own module:
//!
//!     .
//!     ├── token.rs     # Token sum type + delimiter tokenizer
//!     ├── reduce.rs    # Shift-reduce machine + the two extraction rules
//!     ├── parse.rs     # Line-oriented parsing into flat Section records
//!     ├── tree.rs      # Heading outline reconstruction (index arena)
//!     ├── note.rs      # Citation note rendering
//!     └── pathing.rs   # Output path templating ({N:M} slice patterns)
//!
//!     The most delicate part of the work is reconstructing a nested
//!     representation from a flat document in a way that a depth-first walk
//!     of the result reproduces the original order. That algorithm lives in
//!     tree.rs and is property tested; everything downstream (note.rs) only
//!     ever sees the finished tree.
//!
//!     Path templating is logically independent of the extraction pipeline
//!     but belongs to the same unit of work per document: it decides where
//!     the rendered note is written.
//!
//! Testing
//!
//!     Each module carries unit tests for its own contract; tests/pipeline.rs
//!     exercises the composed pipeline with snapshot and property tests.

pub mod note;
pub mod parse;
pub mod pathing;
pub mod reduce;
pub mod token;
pub mod tree;

pub use note::render_citation_note;
pub use parse::{parse_document, Section};
pub use pathing::{build_output_path, normalize_path};
pub use tree::{build_tree, SectionTree};

/// Run the whole pipeline over one document.
///
/// `full_path` is the vault-relative path of the source document as it
/// should appear inside wiki links; `basename` is the link caption,
/// conventionally the filename without extension.
pub fn extract_note(content: &str, full_path: &str, basename: &str) -> String {
    let sections = parse_document(content);
    let tree = build_tree(sections);
    render_citation_note(&tree, full_path, basename)
}
