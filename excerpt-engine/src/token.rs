//! Token stream primitives for the annotation extractor.
//!
//! A line of source text is broken into a flat sequence of [`Token`]s before
//! reduction. Delimiter markers are ordinary text tokens: the reducer matches
//! them by content, and a marker that never finds its closing partner simply
//! stays on the stack and is discarded at harvest time.

/// A single entry on the tokenizer/reducer stack.
///
/// The reducer must distinguish raw text, which the wildcard pattern slot may
/// match, from annotations it has already produced, which a delimiter pair
/// must not absorb. The two cases are separate variants matched by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A raw text fragment, including standalone delimiter markers.
    Text(String),
    /// An extracted annotation in its final rendered form.
    Annotation(String),
}

impl Token {
    pub fn text(value: impl Into<String>) -> Self {
        Token::Text(value.into())
    }

    /// The carried string, whichever variant.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Text(text) => text,
            Token::Annotation(annotation) => annotation,
        }
    }
}

/// Split every text token on `delimiter`, interleaving the delimiter itself
/// as a standalone token and dropping empty fragments.
///
/// Applying this for `"=="` and then `"%%"` over `[Token::text(line)]`
/// produces the mixed stream the reducer consumes, in left-to-right order.
/// There is no escaping: a delimiter occurrence is always a boundary, even
/// inside what was meant as plain text.
pub fn tokenize_for(delimiter: &str, tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Text(text) => {
                let parts: Vec<&str> = text.split(delimiter).collect();
                let last = parts.len() - 1;
                for (index, part) in parts.into_iter().enumerate() {
                    if !part.is_empty() {
                        out.push(Token::Text(part.to_string()));
                    }
                    if index < last {
                        out.push(Token::Text(delimiter.to_string()));
                    }
                }
            }
            other => out.push(other),
        }
    }
    out
}
