//! Single-document processing: read, extract, template, write.
//!
//! The engine itself never fails; everything that can go wrong lives here,
//! at the filesystem boundary. Folder extraction reports a [`ProcessError`]
//! per file and keeps going; single-file extraction exits non-zero.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use excerpt_engine::{build_output_path, extract_note, normalize_path};

/// Failure while processing one document.
#[derive(Debug)]
pub enum ProcessError {
    /// The source document could not be read.
    Read(PathBuf, io::Error),
    /// The output directories could not be created.
    CreateDir(PathBuf, io::Error),
    /// The rendered note could not be written.
    Write(PathBuf, io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Read(path, err) => {
                write!(f, "Error reading '{}': {err}", path.display())
            }
            ProcessError::CreateDir(path, err) => {
                write!(f, "Error creating directory '{}': {err}", path.display())
            }
            ProcessError::Write(path, err) => {
                write!(f, "Error writing '{}': {err}", path.display())
            }
        }
    }
}

impl std::error::Error for ProcessError {}

/// The outcome of processing one document.
#[derive(Debug)]
pub struct ProcessedNote {
    /// Vault-relative slash path of the source document.
    pub document_path: String,
    /// Path the note was (or would be) written to.
    pub output_path: PathBuf,
    /// The rendered citation note.
    pub note: String,
}

/// Vault-relative slash form of `input`, as used in links and templating.
pub fn document_path(input: &Path, vault: &Path) -> String {
    let relative = pathdiff::diff_paths(input, vault).unwrap_or_else(|| input.to_path_buf());
    normalize_path(&relative.to_string_lossy())
}

/// Link caption for a document: its filename without the extension.
pub fn basename(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Run the pipeline over one file without touching the filesystem beyond
/// the read. The output path is computed but nothing is written.
pub fn render_note(input: &Path, vault: &Path, pattern: &str) -> Result<ProcessedNote, ProcessError> {
    let content =
        fs::read_to_string(input).map_err(|err| ProcessError::Read(input.to_path_buf(), err))?;

    let doc_path = document_path(input, vault);
    let note = extract_note(&content, &doc_path, &basename(input));
    let output_path = vault.join(build_output_path(pattern, &doc_path));

    Ok(ProcessedNote {
        document_path: doc_path,
        output_path,
        note,
    })
}

/// Process one file end to end: render the note and persist it under the
/// vault root, creating intermediate directories as needed. An existing
/// note at the target path is overwritten.
pub fn process_file(input: &Path, vault: &Path, pattern: &str) -> Result<ProcessedNote, ProcessError> {
    let processed = render_note(input, vault, pattern)?;

    if let Some(parent) = processed.output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| ProcessError::CreateDir(parent.to_path_buf(), err))?;
    }
    fs::write(&processed.output_path, &processed.note)
        .map_err(|err| ProcessError::Write(processed.output_path.clone(), err))?;

    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_path_is_vault_relative() {
        let path = document_path(Path::new("/vault/Folder/Note.md"), Path::new("/vault"));
        assert_eq!(path, "Folder/Note.md");
    }

    #[test]
    fn document_path_outside_the_vault_keeps_parent_segments() {
        let path = document_path(Path::new("/elsewhere/Note.md"), Path::new("/vault"));
        assert_eq!(path, "../elsewhere/Note.md");
    }

    #[test]
    fn basename_drops_the_extension() {
        assert_eq!(basename(Path::new("Folder/Doc.md")), "Doc");
        assert_eq!(basename(Path::new("Doc")), "Doc");
    }

    #[test]
    fn read_failure_reports_the_offending_path() {
        let err = render_note(
            Path::new("/nonexistent/missing.md"),
            Path::new("/nonexistent"),
            "Extract/{2:}",
        )
        .expect_err("missing file must fail");
        assert!(err.to_string().contains("missing.md"));
    }
}
