//! The seam between the parser and the tokenizer that feeds it.
//!
//! The parser never scans characters. It reads the tokenizer's sub-state to
//! decide what an expression means, and in a few cases rewrites that state
//! or edits the start tag being lexed.

use crate::token::{TagToken, Token};
use std::fmt;

/// The tokenizer's lexical sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TokenizerState {
    /// Before any content has been seen.
    #[default]
    BeforeData,
    /// Plain content.
    Data,
    /// After `<`.
    TagOpen,
    /// After `<!`.
    MarkupDeclaration,
    /// After `<!--`.
    CommentStart,
    /// After `<!---`.
    CommentStartDash,
    /// Inside a comment.
    Comment,
    /// After `-` inside a comment.
    CommentEndDash,
    /// After `--` inside a comment.
    CommentEnd,
    /// Inside a start tag's name.
    TagName,
    /// Inside an end tag's name.
    EndTagName,
    /// After `</`.
    EndTagOpen,
    /// Inside a start tag, between attributes.
    BeforeAttributeName,
    /// Inside an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside a `"`-quoted value.
    AttributeValueDoubleQuoted,
    /// Inside a `'`-quoted value.
    AttributeValueSingleQuoted,
    /// Inside an unquoted value.
    AttributeValueUnquoted,
    /// After the closing quote of a value.
    AfterAttributeValueQuoted,
    /// After `/` inside a start tag.
    SelfClosingStartTag,
}

impl TokenizerState {
    /// Returns the state's conventional camelCase name.
    pub fn name(self) -> &'static str {
        match self {
            TokenizerState::BeforeData => "beforeData",
            TokenizerState::Data => "data",
            TokenizerState::TagOpen => "tagOpen",
            TokenizerState::MarkupDeclaration => "markupDeclaration",
            TokenizerState::CommentStart => "commentStart",
            TokenizerState::CommentStartDash => "commentStartDash",
            TokenizerState::Comment => "comment",
            TokenizerState::CommentEndDash => "commentEndDash",
            TokenizerState::CommentEnd => "commentEnd",
            TokenizerState::TagName => "tagName",
            TokenizerState::EndTagName => "endTagName",
            TokenizerState::EndTagOpen => "endTagOpen",
            TokenizerState::BeforeAttributeName => "beforeAttributeName",
            TokenizerState::AttributeName => "attributeName",
            TokenizerState::AfterAttributeName => "afterAttributeName",
            TokenizerState::BeforeAttributeValue => "beforeAttributeValue",
            TokenizerState::AttributeValueDoubleQuoted => "attributeValueDoubleQuoted",
            TokenizerState::AttributeValueSingleQuoted => "attributeValueSingleQuoted",
            TokenizerState::AttributeValueUnquoted => "attributeValueUnquoted",
            TokenizerState::AfterAttributeValueQuoted => "afterAttributeValueQuoted",
            TokenizerState::SelfClosingStartTag => "selfClosingStartTag",
        }
    }
}

impl fmt::Display for TokenizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Access to a tokenizer's state, as needed while handling one token.
pub trait Tokenizer {
    /// Returns the current sub-state.
    fn state(&self) -> TokenizerState;

    /// Overrides the current sub-state. Lexing continues from `state`.
    fn set_state(&mut self, state: TokenizerState);

    /// Returns the start tag being lexed, if any.
    fn current_tag(&mut self) -> Option<&mut TagToken>;

    /// Finalizes the attribute value being lexed, if any.
    fn finalize_attribute_value(&mut self) {
        if let Some(tag) = self.current_tag() {
            tag.finalize_attribute_value();
        }
    }
}

/// A tokenizer that can be driven to produce a complete token stream.
pub trait TokenSource: Tokenizer {
    /// Returns the next token, or `None` at the end of input.
    fn next_token(&mut self) -> Option<Token>;
}
