//! A token source that plays back a scripted tokenizer session.
//!
//! `Replay` is built step by step, in the order a tokenizer would see the
//! template written out canonically (`<div class="a">`, `{{expr}}`, ...).
//! Locations are computed from that canonical text. During playback the
//! replay keeps a real sub-state and start tag in progress, so the parser's
//! state rewrites and tag edits behave as they would against a live
//! tokenizer.
//!
//! ```
//! use template_parser::{parse, Node, Replay};
//!
//! let mut replay = Replay::new()
//!     .begin_tag("div")
//!     .mustache("action 'save'")
//!     .emit_tag()
//!     .chars("Save")
//!     .end_tag("div");
//!
//! let program = parse(&mut replay).unwrap();
//! let Node::Element(div) = &program.body[0] else { panic!() };
//! assert_eq!(div.helpers[0].source, "action 'save'");
//! ```

use crate::ast::Program;
use crate::builders::{build_block, build_expression, build_mustache};
use crate::token::{EndTag, TagToken, Token};
use crate::tokenizer::{TokenSource, Tokenizer, TokenizerState};
use smol_str::SmolStr;
use source_loc::{Position, SourceLocation};
use std::collections::VecDeque;

/// The quote character around an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `"`
    Double,
    /// `'`
    Single,
}

impl Quote {
    fn as_str(self) -> &'static str {
        match self {
            Quote::Double => "\"",
            Quote::Single => "'",
        }
    }

    fn value_state(self) -> TokenizerState {
        match self {
            Quote::Double => TokenizerState::AttributeValueDoubleQuoted,
            Quote::Single => TokenizerState::AttributeValueSingleQuoted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    SetState(TokenizerState),
    BeginTag(TagToken),
    BeginAttribute(SmolStr),
    Equals,
    OpenQuote(Quote),
    AttributeText(String, SourceLocation),
    CloseQuote,
    EmitTag { self_closing: bool, end: Position },
    Emit(Token),
}

/// A scripted [`TokenSource`].
#[derive(Debug, Clone)]
pub struct Replay {
    steps: VecDeque<Step>,
    cursor: Position,
    state: TokenizerState,
    tag: Option<TagToken>,
}

impl Default for Replay {
    fn default() -> Self {
        Self::new()
    }
}

impl Replay {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            cursor: Position::START,
            state: TokenizerState::BeforeData,
            tag: None,
        }
    }

    /// Creates a script that plays the given tokens in order.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut replay = Self::new();
        replay.steps.extend(tokens.into_iter().map(Step::Emit));
        replay
    }

    /// Returns true if every step has been played.
    pub fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }

    /// Moves the cursor over `text` and returns the covered location.
    fn advance(&mut self, text: &str) -> SourceLocation {
        let start = self.cursor;
        for c in text.chars() {
            if c == '\n' {
                self.cursor.line += 1;
                self.cursor.column = 1;
            } else {
                self.cursor.column += 1;
            }
        }
        SourceLocation::new(start, self.cursor)
    }

    fn push(mut self, step: Step) -> Self {
        self.steps.push_back(step);
        self
    }

    /// Emits a run of characters.
    pub fn chars(mut self, text: &str) -> Self {
        let loc = self.advance(text);
        self.push(Step::Emit(Token::Chars {
            chars: text.to_string(),
            loc,
        }))
    }

    /// Emits a comment.
    pub fn comment(mut self, value: &str) -> Self {
        let loc = self.advance(&format!("<!--{}-->", value));
        self.push(Step::Emit(Token::Comment {
            value: value.to_string(),
            loc,
        }))
    }

    /// Emits an end tag.
    pub fn end_tag(mut self, name: &str) -> Self {
        let loc = self.advance(&format!("</{}>", name));
        self.push(Step::Emit(Token::EndTag(EndTag::new(name, loc))))
    }

    /// Emits a start tag with no attributes.
    pub fn start_tag(self, name: &str) -> Self {
        self.begin_tag(name).emit_tag()
    }

    /// Emits a start tag written `<name />`.
    pub fn self_closing_tag(self, name: &str) -> Self {
        self.begin_tag(name).emit_self_closing_tag()
    }

    /// Emits an escaped mustache `{{source}}` in whatever state the replay
    /// is in when it is played.
    pub fn mustache(self, source: &str) -> Self {
        self.mustache_with(source, true)
    }

    /// Emits an unescaped mustache `{{{source}}}`.
    pub fn unescaped_mustache(self, source: &str) -> Self {
        self.mustache_with(source, false)
    }

    fn mustache_with(mut self, source: &str, escaped: bool) -> Self {
        let delimiter = if escaped { "{{" } else { "{{{" };
        let open = self.advance(delimiter);
        let expression = build_expression(source, self.advance(source));
        let close = self.advance(if escaped { "}}" } else { "}}}" });
        let mustache = build_mustache(expression, escaped, open.cover(close));
        self.push(Step::Emit(Token::Mustache(mustache)))
    }

    /// Emits a block `{{#source}}...{{/source}}` whose bodies were built
    /// separately.
    pub fn block(mut self, source: &str, program: Program, inverse: Option<Program>) -> Self {
        let open = self.advance("{{#");
        let expression = build_expression(source, self.advance(source));
        let close = self.advance("}}");
        let block = build_block(expression, program, inverse, open.cover(close));
        self.push(Step::Emit(Token::Block(block)))
    }

    /// Emits an arbitrary token.
    pub fn token(self, token: Token) -> Self {
        self.push(Step::Emit(token))
    }

    /// Forces the sub-state when this step is played.
    pub fn set_state(self, state: TokenizerState) -> Self {
        self.push(Step::SetState(state))
    }

    /// Starts lexing a start tag. The replay enters `tagName`.
    pub fn begin_tag(mut self, name: &str) -> Self {
        let loc = self.advance(&format!("<{}", name));
        self.push(Step::BeginTag(TagToken::new(
            name,
            SourceLocation::point(loc.start),
        )))
    }

    /// Starts an attribute on the tag being lexed. The replay enters
    /// `attributeName`.
    pub fn attribute(mut self, name: &str) -> Self {
        self.advance(&format!(" {}", name));
        self.push(Step::BeginAttribute(SmolStr::new(name)))
    }

    /// Lexes `=`. The replay enters `beforeAttributeValue`.
    pub fn equals(mut self) -> Self {
        self.advance("=");
        self.push(Step::Equals)
    }

    /// Lexes an opening quote. The replay enters the matching quoted-value
    /// state.
    pub fn open_quote(mut self, quote: Quote) -> Self {
        self.advance(quote.as_str());
        self.push(Step::OpenQuote(quote))
    }

    /// Lexes literal attribute value text. Text right after `=` starts an
    /// unquoted value.
    pub fn attribute_text(mut self, text: &str) -> Self {
        let loc = self.advance(text);
        self.push(Step::AttributeText(text.to_string(), loc))
    }

    /// Lexes a closing quote. The replay enters `afterAttributeValueQuoted`.
    pub fn close_quote(mut self, quote: Quote) -> Self {
        self.advance(quote.as_str());
        self.push(Step::CloseQuote)
    }

    /// Lexes `name="value"`.
    pub fn attribute_with_value(self, name: &str, value: &str) -> Self {
        self.attribute(name)
            .equals()
            .open_quote(Quote::Double)
            .attribute_text(value)
            .close_quote(Quote::Double)
    }

    /// Lexes `>` and emits the tag being lexed.
    pub fn emit_tag(mut self) -> Self {
        let end = self.advance(">").end;
        self.push(Step::EmitTag {
            self_closing: false,
            end,
        })
    }

    /// Lexes ` />` and emits the tag being lexed.
    pub fn emit_self_closing_tag(mut self) -> Self {
        let end = self.advance(" />").end;
        self.push(Step::EmitTag {
            self_closing: true,
            end,
        })
    }

    /// Plays one step, returning a token if the step emits one.
    fn play(&mut self, step: Step) -> Option<Token> {
        match step {
            Step::SetState(state) => {
                self.state = state;
                None
            }
            Step::BeginTag(tag) => {
                self.tag = Some(tag);
                self.state = TokenizerState::TagName;
                None
            }
            Step::BeginAttribute(name) => {
                if let Some(tag) = &mut self.tag {
                    tag.begin_attribute(name);
                }
                self.state = TokenizerState::AttributeName;
                None
            }
            Step::Equals => {
                self.state = TokenizerState::BeforeAttributeValue;
                None
            }
            Step::OpenQuote(quote) => {
                if let Some(tag) = &mut self.tag {
                    tag.mark_attribute_quoted(true);
                }
                self.state = quote.value_state();
                None
            }
            Step::AttributeText(text, loc) => {
                if self.state == TokenizerState::BeforeAttributeValue {
                    self.state = TokenizerState::AttributeValueUnquoted;
                    if let Some(tag) = &mut self.tag {
                        tag.mark_attribute_quoted(false);
                    }
                }
                if let Some(tag) = &mut self.tag {
                    tag.add_text_to_attribute_value(&text, loc);
                }
                None
            }
            Step::CloseQuote => {
                self.state = TokenizerState::AfterAttributeValueQuoted;
                None
            }
            Step::EmitTag { self_closing, end } => {
                let mut tag = self.tag.take()?;
                tag.finalize_attribute_value();
                tag.self_closing = self_closing;
                tag.loc = tag.loc.with_end(end);
                self.state = TokenizerState::Data;
                Some(Token::StartTag(tag))
            }
            Step::Emit(token) => {
                if matches!(
                    token,
                    Token::Chars { .. } | Token::Comment { .. } | Token::EndTag(_)
                ) {
                    self.state = TokenizerState::Data;
                }
                Some(token)
            }
        }
    }
}

impl Tokenizer for Replay {
    fn state(&self) -> TokenizerState {
        self.state
    }

    fn set_state(&mut self, state: TokenizerState) {
        self.state = state;
    }

    fn current_tag(&mut self) -> Option<&mut TagToken> {
        self.tag.as_mut()
    }
}

impl TokenSource for Replay {
    fn next_token(&mut self) -> Option<Token> {
        while let Some(step) = self.steps.pop_front() {
            if let Some(token) = self.play(step) {
                return Some(token);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AttrValue;
    use pretty_assertions::assert_eq;

    fn drain(replay: &mut Replay) -> Vec<Token> {
        std::iter::from_fn(|| replay.next_token()).collect()
    }

    #[test]
    fn test_locations_follow_canonical_text() {
        let mut replay = Replay::new().start_tag("p").chars("hi\n").end_tag("p");
        let tokens = drain(&mut replay);

        match &tokens[0] {
            Token::StartTag(tag) => assert_eq!(
                tag.loc,
                SourceLocation::new(Position::new(1, 1), Position::new(1, 4))
            ),
            other => panic!("Expected StartTag, got {:?}", other),
        }
        match &tokens[2] {
            Token::EndTag(tag) => assert_eq!(
                tag.loc,
                SourceLocation::new(Position::new(2, 1), Position::new(2, 5))
            ),
            other => panic!("Expected EndTag, got {:?}", other),
        }
        assert!(replay.is_exhausted());
    }

    #[test]
    fn test_states_during_tag() {
        let mut replay = Replay::new()
            .begin_tag("a")
            .attribute("href")
            .equals()
            .open_quote(Quote::Single)
            .attribute_text("/")
            .close_quote(Quote::Single)
            .emit_tag();

        assert_eq!(replay.state(), TokenizerState::BeforeData);
        let token = replay.next_token().unwrap();
        assert_eq!(replay.state(), TokenizerState::Data);
        assert!(replay.current_tag().is_none());

        let Token::StartTag(tag) = token else {
            panic!("Expected StartTag");
        };
        assert_eq!(tag.attributes.len(), 1);
        match &tag.attributes[0].value {
            AttrValue::Text(text) => assert_eq!(text.chars, "/"),
            other => panic!("Expected Text value, got {:?}", other),
        }
    }

    #[test]
    fn test_unquoted_text_value() {
        let mut replay = Replay::new()
            .begin_tag("td")
            .attribute("colspan")
            .equals()
            .attribute_text("2")
            .emit_tag();
        let Some(Token::StartTag(tag)) = replay.next_token() else {
            panic!("Expected StartTag");
        };
        assert!(matches!(&tag.attributes[0].value, AttrValue::Text(t) if t.chars == "2"));
    }

    #[test]
    fn test_mustache_location() {
        let mut replay = Replay::new().chars("a").mustache("name");
        let tokens = drain(&mut replay);
        let Token::Mustache(mustache) = &tokens[1] else {
            panic!("Expected Mustache");
        };
        assert_eq!(
            mustache.loc,
            SourceLocation::new(Position::new(1, 2), Position::new(1, 10))
        );
        assert_eq!(
            mustache.expression.loc,
            SourceLocation::new(Position::new(1, 4), Position::new(1, 8))
        );
    }

    #[test]
    fn test_from_tokens() {
        let tokens = vec![Token::Chars {
            chars: "x".to_string(),
            loc: SourceLocation::default(),
        }];
        let mut replay = Replay::from_tokens(tokens.clone());
        assert_eq!(drain(&mut replay), tokens);
    }
}
