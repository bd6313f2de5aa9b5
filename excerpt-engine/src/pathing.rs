//! Output path templating.
//!
//! A pattern like `Extract/{2:}` decides where a document's citation note
//! is written: placeholders select 1-based slices of the source document's
//! path segments and everything else is copied through literally. The
//! default pattern drops the top-level folder and mirrors the rest of the
//! path under `Extract/`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Placeholder grammar: `{N}`, `{N:}`, `{:M}`, `{N:M}`, `{:}` and bare
/// `{}`. Both bounds are optional digits; anything else (`{a}`, `{1:2:3}`)
/// is not a placeholder and stays literal text.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)?(:(\d+)?)?\}").expect("placeholder grammar compiles"));

/// Collapse a path to the vault's canonical slash-separated form: forward
/// slashes only, no duplicate separators, no leading or trailing separator.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Expand `pattern` over the segments of `original_path`.
///
/// Slice bounds are 1-based and inclusive. Out-of-range bounds clamp to the
/// available segments, a single-element `{N}` past the end expands to the
/// empty string, and malformed placeholders are left untouched rather than
/// treated as errors.
pub fn build_output_path(pattern: &str, original_path: &str) -> String {
    let normalized = normalize_path(original_path);
    let segments: Vec<&str> = normalized.split('/').collect();

    PLACEHOLDER
        .replace_all(pattern, |caps: &Captures| expand(caps, &segments))
        .into_owned()
}

fn expand(caps: &Captures, segments: &[&str]) -> String {
    let start = caps
        .get(1)
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX));
    let end = caps
        .get(3)
        .map(|m| m.as_str().parse::<usize>().unwrap_or(usize::MAX));
    let ranged = caps.get(2).is_some();

    let from = start.map_or(0, |n| n.saturating_sub(1));

    if start.is_some() && !ranged {
        // {N}: copy a single segment, empty when out of range.
        return segments.get(from).copied().unwrap_or_default().to_string();
    }

    // Inclusive 1-based end is exactly the exclusive 0-based end.
    let to = end.unwrap_or(segments.len()).min(segments.len());
    let from = from.min(to);
    segments[from..to].join("/")
}
