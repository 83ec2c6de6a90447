//! Parse error types.

use crate::tokenizer::TokenizerState;
use source_loc::Position;
use thiserror::Error;

/// An error that aborted a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Where in the template the error was detected.
    pub loc: Position,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, loc: Position) -> Self {
        Self { kind, loc }
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An end tag did not match the innermost open element.
    #[error(
        "closing tag `{found}` (on line {line}) did not match last open tag `{expected}` (on line {open_line})"
    )]
    MismatchedClosingTag {
        /// The name of the open element.
        expected: String,
        /// The name on the end tag.
        found: String,
        /// The line of the end tag.
        line: u32,
        /// The line of the open element's start tag.
        open_line: u32,
    },

    /// An end tag arrived while no element was open.
    #[error("closing tag `{found}` has no matching open tag")]
    UnexpectedClosingTag {
        /// The name on the end tag.
        found: String,
    },

    /// The token stream ended with an element still open.
    #[error("unclosed tag: <{tag_name}>")]
    UnclosedTag {
        /// The name of the innermost open element.
        tag_name: String,
    },

    /// A block appeared inside a start tag.
    #[error("a block may only be used inside an HTML element or another block (found in {state} state)")]
    MisplacedBlock {
        /// The tokenizer sub-state when the block arrived.
        state: TokenizerState,
    },

    /// A component's `as |...|` declaration is malformed.
    #[error("{message}")]
    InvalidBlockParams {
        /// A description of the problem.
        message: String,
    },

    /// The tokenizer reported a tag-internal sub-state without a start tag
    /// in progress.
    #[error("tokenizer is in {state} state but has no start tag in progress")]
    NoPendingTag {
        /// The tokenizer sub-state.
        state: TokenizerState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display() {
        let error = ParseError::new(
            ParseErrorKind::MismatchedClosingTag {
                expected: "div".to_string(),
                found: "span".to_string(),
                line: 3,
                open_line: 1,
            },
            Position::new(3, 1),
        );
        assert_eq!(
            error.to_string(),
            "closing tag `span` (on line 3) did not match last open tag `div` (on line 1)"
        );
    }

    #[test]
    fn test_misplaced_block_display() {
        let error = ParseError::new(
            ParseErrorKind::MisplacedBlock {
                state: TokenizerState::AttributeName,
            },
            Position::new(1, 6),
        );
        assert_eq!(
            error.to_string(),
            "a block may only be used inside an HTML element or another block (found in attributeName state)"
        );
    }

    #[test]
    fn test_unclosed_display() {
        let kind = ParseErrorKind::UnclosedTag {
            tag_name: "p".to_string(),
        };
        assert_eq!(kind.to_string(), "unclosed tag: <p>");
    }
}
