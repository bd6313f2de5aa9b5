//! Shift-reduce extraction over token streams.
//!
//! The machine shifts one input token at a time onto a stack. After every
//! shift the rules are tried in declaration order against the top of the
//! stack; the first rule whose pattern matches replaces the matched window
//! with its reduction, and no further rule is tried until the next shift.
//! Two reducible windows sitting back to back therefore reduce on later
//! shifts rather than in one step: the contract is one match attempt per
//! shift, not reduction to a fixpoint, and downstream output depends on
//! that timing.

use crate::token::Token;

/// Highlight span delimiter. A `==quoted==` pair becomes a block quote.
pub const HIGHLIGHT_MARK: &str = "==";
/// Comment span delimiter. A `%%note%%` pair becomes a plain comment.
pub const COMMENT_MARK: &str = "%%";

/// One slot of a rule pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Matches a text token with exactly this content.
    Literal(&'static str),
    /// Matches any text token. Never an already-reduced annotation, so a
    /// delimiter pair cannot absorb an annotation produced earlier on the
    /// same line.
    AnyText,
}

/// A reduction rule: a fixed-length window pattern and the replacement
/// produced for a matched window.
pub struct Rule {
    pattern: &'static [Pattern],
    reduce: fn(Vec<Token>) -> Vec<Token>,
}

impl Rule {
    pub const fn new(pattern: &'static [Pattern], reduce: fn(Vec<Token>) -> Vec<Token>) -> Self {
        Rule { pattern, reduce }
    }
}

/// Run the shift-reduce loop over `input` and return the final stack.
///
/// The stack may still hold unmatched delimiter markers and plain fragments;
/// callers harvest the [`Token::Annotation`] entries and discard the rest.
pub fn shift_reduce(rules: &[Rule], input: Vec<Token>) -> Vec<Token> {
    let mut stack: Vec<Token> = Vec::new();
    for token in input {
        stack.push(token);
        for rule in rules {
            if rule.pattern.len() > stack.len() {
                continue;
            }
            let start = stack.len() - rule.pattern.len();
            if window_matches(rule.pattern, &stack[start..]) {
                let window = stack.split_off(start);
                stack.extend((rule.reduce)(window));
                break;
            }
        }
    }
    stack
}

fn window_matches(pattern: &[Pattern], window: &[Token]) -> bool {
    pattern
        .iter()
        .zip(window)
        .all(|(slot, token)| match (slot, token) {
            (Pattern::AnyText, Token::Text(_)) => true,
            (Pattern::Literal(literal), Token::Text(text)) => text == literal,
            (_, Token::Annotation(_)) => false,
        })
}

static QUOTE_PATTERN: [Pattern; 3] = [
    Pattern::Literal(HIGHLIGHT_MARK),
    Pattern::AnyText,
    Pattern::Literal(HIGHLIGHT_MARK),
];

static COMMENT_PATTERN: [Pattern; 3] = [
    Pattern::Literal(COMMENT_MARK),
    Pattern::AnyText,
    Pattern::Literal(COMMENT_MARK),
];

/// The two extraction rules, in match priority order.
pub fn extraction_rules() -> [Rule; 2] {
    [
        Rule::new(&QUOTE_PATTERN, reduce_quote),
        Rule::new(&COMMENT_PATTERN, reduce_comment),
    ]
}

fn reduce_quote(window: Vec<Token>) -> Vec<Token> {
    if let Some(Token::Text(middle)) = window.get(1) {
        return vec![Token::Annotation(format!("> {}", middle.trim()))];
    }
    window
}

fn reduce_comment(window: Vec<Token>) -> Vec<Token> {
    if let Some(Token::Text(middle)) = window.get(1) {
        return vec![Token::Annotation(middle.trim().to_string())];
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<Token> {
        values.iter().map(|v| Token::text(*v)).collect()
    }

    #[test]
    fn reduces_highlight_pair_to_block_quote() {
        let stack = shift_reduce(&extraction_rules(), texts(&["==", "quoted text", "=="]));
        assert_eq!(stack, vec![Token::Annotation("> quoted text".to_string())]);
    }

    #[test]
    fn reduces_comment_pair_to_plain_text() {
        let stack = shift_reduce(&extraction_rules(), texts(&["%%", "a note", "%%"]));
        assert_eq!(stack, vec![Token::Annotation("a note".to_string())]);
    }

    #[test]
    fn trims_the_extracted_span() {
        let stack = shift_reduce(&extraction_rules(), texts(&["==", "  padded  ", "=="]));
        assert_eq!(stack, vec![Token::Annotation("> padded".to_string())]);
    }

    #[test]
    fn unmatched_delimiters_stay_on_the_stack() {
        let stack = shift_reduce(&extraction_rules(), texts(&["==", "no closing mark"]));
        assert_eq!(stack, texts(&["==", "no closing mark"]));
    }

    #[test]
    fn wildcard_matches_delimiter_tokens_too() {
        // The middle slot only requires a text token, and a bare delimiter is
        // one, so `==%%==` extracts the inner marker as the quote body.
        let stack = shift_reduce(&extraction_rules(), texts(&["==", "%%", "=="]));
        assert_eq!(stack, vec![Token::Annotation("> %%".to_string())]);
    }

    #[test]
    fn annotations_are_not_absorbed_by_later_pairs() {
        let input = vec![
            Token::text("=="),
            Token::Annotation("> already reduced".to_string()),
            Token::text("=="),
        ];
        let stack = shift_reduce(&extraction_rules(), input.clone());
        assert_eq!(stack, input);
    }

    #[test]
    fn both_spans_on_one_line_reduce() {
        let stack = shift_reduce(
            &extraction_rules(),
            texts(&["==", "q", "==", " ", "%%", "c", "%%"]),
        );
        assert_eq!(
            stack,
            vec![
                Token::Annotation("> q".to_string()),
                Token::text(" "),
                Token::Annotation("c".to_string()),
            ]
        );
    }

    #[test]
    fn reduction_is_not_retried_until_next_shift() {
        static PAIR: [Pattern; 2] = [Pattern::Literal("x"), Pattern::Literal("y")];
        static DOUBLE: [Pattern; 2] = [Pattern::Literal("z"), Pattern::Literal("z")];
        fn to_z(_window: Vec<Token>) -> Vec<Token> {
            vec![Token::text("z")]
        }
        fn to_w(_window: Vec<Token>) -> Vec<Token> {
            vec![Token::text("w")]
        }
        let rules = [Rule::new(&PAIR, to_z), Rule::new(&DOUBLE, to_w)];

        // The second x/y pair reduces to z, leaving z z on top, but the z z
        // rule is not attempted until another token is shifted; none is, so
        // the stack keeps both.
        let stack = shift_reduce(&rules, texts(&["x", "y", "x", "y"]));
        assert_eq!(stack, texts(&["z", "z"]));
    }
}
