//! Tree builder for HTML templates with embedded mustache expressions.
//!
//! This crate turns the token stream of a markup tokenizer into a template
//! tree:
//! - Element nesting with void-element auto-closing
//! - SVG namespace propagation and HTML integration points
//! - Tag helpers and mixed attribute values, routed by tokenizer sub-state
//! - Hyphenated tags promoted to component invocations with block params
//!
//! The tokenizer itself lives outside this crate and plugs in through the
//! [`Tokenizer`] and [`TokenSource`] traits. [`Replay`] is a scripted token
//! source for tests and tooling.
//!
//! # Example
//!
//! ```
//! use template_parser::{parse, Node, Replay};
//!
//! let mut tokens = Replay::new()
//!     .start_tag("my-widget")
//!     .mustache("title")
//!     .end_tag("my-widget");
//!
//! let program = parse(&mut tokens).unwrap();
//! assert!(matches!(program.body[0], Node::Component(_)));
//! ```

mod ast;
pub mod builders;
mod error;
mod parser;
pub mod policy;
mod replay;
mod token;
mod tokenizer;
pub mod utils;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
pub use replay::{Quote, Replay};
pub use source_loc::{Position, SourceLocation};
pub use token::{EndTag, TagToken, Token};
pub use tokenizer::{TokenSource, Tokenizer, TokenizerState};

/// Options for building a template tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ParseOptions {
    /// Keep hyphenated tags as plain elements instead of components.
    pub disable_component_generation: bool,
}

/// Builds a template tree from every token `source` produces.
///
/// Fails on the first structural error, or if the stream ends with an
/// element still open.
pub fn parse<S: TokenSource + ?Sized>(source: &mut S) -> Result<Program, ParseError> {
    parse_with_options(source, ParseOptions::default())
}

/// Builds a template tree with custom options.
pub fn parse_with_options<S: TokenSource + ?Sized>(
    source: &mut S,
    options: ParseOptions,
) -> Result<Program, ParseError> {
    let mut parser = Parser::new(options);
    while let Some(token) = source.next_token() {
        parser.accept(token, source)?;
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let program = parse(&mut Replay::new()).unwrap();
        assert!(program.body.is_empty());
        assert!(program.block_params.is_empty());
    }

    #[test]
    fn test_parse_simple_element() {
        let mut tokens = Replay::new().start_tag("div").chars("hello").end_tag("div");
        let program = parse(&mut tokens).unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_stops_at_first_error() {
        let mut tokens = Replay::new()
            .start_tag("div")
            .end_tag("span")
            .chars("never read");
        let error = parse(&mut tokens).unwrap_err();
        assert!(matches!(
            error.kind,
            ParseErrorKind::MismatchedClosingTag { .. }
        ));
        assert!(!tokens.is_exhausted());
    }

    #[test]
    fn test_options_default_enables_components() {
        assert!(!ParseOptions::default().disable_component_generation);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"disableComponentGeneration": true}"#).unwrap();
        assert!(options.disable_component_generation);

        let options: ParseOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn test_program_serializes_with_node_tags() {
        let mut tokens = Replay::new().start_tag("svg").end_tag("svg");
        let program = parse(&mut tokens).unwrap();
        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["body"][0]["type"], "Element");
        assert_eq!(json["body"][0]["tag"], "svg");
        assert_eq!(json["body"][0]["namespace"], "http://www.w3.org/2000/svg");
    }
}
