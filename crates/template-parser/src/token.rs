//! Tokens consumed by the parser.
//!
//! A tokenizer turns template source into these tokens. While it is lexing a
//! start tag it keeps the tag in progress as a [`TagToken`], which the parser
//! may edit when an expression shows up inside the tag.

use crate::ast::{AttrPart, AttrValue, Attribute, BlockStatement, Expression, MustacheStatement};
use crate::builders::{build_attribute, build_concat, build_text};
use smol_str::SmolStr;
use source_loc::SourceLocation;

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub enum Token {
    /// A complete comment.
    Comment {
        /// The comment content.
        value: String,
        /// The location of the comment.
        loc: SourceLocation,
    },
    /// A run of character data.
    Chars {
        /// The characters.
        chars: String,
        /// The location of the run.
        loc: SourceLocation,
    },
    /// A complete start tag.
    StartTag(TagToken),
    /// An end tag.
    EndTag(EndTag),
    /// A mustache expression.
    Mustache(MustacheStatement),
    /// A block statement with its bodies already built.
    Block(BlockStatement),
}

impl Token {
    /// A short name for the kind of token, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Comment { .. } => "Comment",
            Token::Chars { .. } => "Chars",
            Token::StartTag(_) => "StartTag",
            Token::EndTag(_) => "EndTag",
            Token::Mustache(_) => "MustacheStatement",
            Token::Block(_) => "BlockStatement",
        }
    }
}

/// An end tag `</name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EndTag {
    /// The tag name.
    pub name: SmolStr,
    /// The location of the end tag.
    pub loc: SourceLocation,
}

impl EndTag {
    /// Creates a new end tag.
    pub fn new(name: impl Into<SmolStr>, loc: SourceLocation) -> Self {
        Self {
            name: name.into(),
            loc,
        }
    }
}

/// A start tag, either still being lexed or complete.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TagToken {
    /// The tag name.
    pub name: SmolStr,
    /// Attributes finalized so far.
    pub attributes: Vec<Attribute>,
    /// Tag helpers registered so far.
    pub helpers: Vec<Expression>,
    /// Whether the tag was written `<name />`.
    pub self_closing: bool,
    /// The location of the start tag.
    pub loc: SourceLocation,
    #[cfg_attr(feature = "serde", serde(skip))]
    current_attribute: Option<PendingAttribute>,
}

/// An attribute whose value is still being lexed.
#[derive(Debug, Clone, PartialEq)]
struct PendingAttribute {
    name: SmolStr,
    parts: Vec<AttrPart>,
    quoted: bool,
}

impl TagToken {
    /// Creates a start tag with no attributes.
    pub fn new(name: impl Into<SmolStr>, loc: SourceLocation) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            helpers: Vec::new(),
            self_closing: false,
            loc,
            current_attribute: None,
        }
    }

    /// Sets the self-closing flag.
    pub fn with_self_closing(mut self, self_closing: bool) -> Self {
        self.self_closing = self_closing;
        self
    }

    /// Adds an already finalized attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.finalize_attribute_value();
        self.attributes.push(attribute);
        self
    }

    /// Returns true if an attribute is being lexed.
    pub fn has_pending_attribute(&self) -> bool {
        self.current_attribute.is_some()
    }

    /// Starts a new attribute, finalizing any attribute still pending.
    pub fn begin_attribute(&mut self, name: impl Into<SmolStr>) {
        self.finalize_attribute_value();
        self.current_attribute = Some(PendingAttribute {
            name: name.into(),
            parts: Vec::new(),
            quoted: false,
        });
    }

    /// Registers an expression as a tag helper.
    pub fn add_tag_helper(&mut self, expression: Expression) {
        self.helpers.push(expression);
    }

    /// Marks whether the pending attribute's value is quoted.
    ///
    /// Does nothing when no attribute is pending.
    pub fn mark_attribute_quoted(&mut self, quoted: bool) {
        if let Some(attribute) = &mut self.current_attribute {
            attribute.quoted = quoted;
        }
    }

    /// Appends literal text to the pending attribute's value.
    ///
    /// Consecutive text is merged into a single part. Does nothing when no
    /// attribute is pending.
    pub fn add_text_to_attribute_value(&mut self, text: &str, loc: SourceLocation) {
        let Some(attribute) = &mut self.current_attribute else {
            return;
        };
        if let Some(AttrPart::Text(last)) = attribute.parts.last_mut() {
            last.chars.push_str(text);
            last.loc = last.loc.cover(loc);
        } else {
            attribute.parts.push(AttrPart::Text(build_text(text, loc)));
        }
    }

    /// Appends an expression to the pending attribute's value.
    ///
    /// Does nothing when no attribute is pending.
    pub fn add_to_attribute_value(&mut self, mustache: MustacheStatement) {
        if let Some(attribute) = &mut self.current_attribute {
            attribute.parts.push(AttrPart::Mustache(mustache));
        }
    }

    /// Turns the pending attribute, if any, into a finished [`Attribute`].
    pub fn finalize_attribute_value(&mut self) {
        let Some(pending) = self.current_attribute.take() else {
            return;
        };
        let value = assemble_attribute_value(pending.parts, pending.quoted, self.loc);
        self.attributes.push(build_attribute(pending.name, value));
    }
}

fn assemble_attribute_value(
    mut parts: Vec<AttrPart>,
    quoted: bool,
    tag_loc: SourceLocation,
) -> AttrValue {
    let single = parts.len() == 1;
    let first_is_text = matches!(parts.first(), Some(AttrPart::Text(_)));

    if parts.is_empty() {
        AttrValue::Text(build_text("", SourceLocation::point(tag_loc.start)))
    } else if single && (first_is_text || !quoted) {
        match parts.remove(0) {
            AttrPart::Text(text) => AttrValue::Text(text),
            AttrPart::Mustache(mustache) => AttrValue::Mustache(mustache),
        }
    } else {
        build_concat(parts)
    }
}
