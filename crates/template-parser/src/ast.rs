//! AST types for parsed templates.
//!
//! A parse produces a [`Program`] whose body is a sequence of [`Node`]s.
//! Expressions embedded in the template are carried as opaque
//! [`Expression`] payloads; this crate never looks inside them.

use smol_str::SmolStr;
use source_loc::SourceLocation;

/// The SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A sequence of nodes: the template root, a component body or a block body.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Program {
    /// The child nodes.
    pub body: Vec<Node>,
    /// Names bound by the enclosing component or block (`as |a b|`).
    pub block_params: Vec<SmolStr>,
}

/// A node in the template tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub enum Node {
    /// A plain element.
    Element(ElementNode),
    /// A custom (hyphenated) tag invocation.
    Component(ComponentNode),
    /// A run of text.
    Text(TextNode),
    /// An HTML comment.
    Comment(CommentNode),
    /// An expression `{{expr}}` in content position.
    Mustache(MustacheStatement),
    /// A block `{{#name}}...{{/name}}`.
    Block(BlockStatement),
}

impl Node {
    /// Returns the source location of this node.
    pub fn loc(&self) -> SourceLocation {
        match self {
            Node::Element(n) => n.loc,
            Node::Component(n) => n.loc,
            Node::Text(n) => n.loc,
            Node::Comment(n) => n.loc,
            Node::Mustache(n) => n.loc,
            Node::Block(n) => n.loc,
        }
    }

    /// Returns true if the renderer materializes this node dynamically.
    ///
    /// Two such nodes must never be direct siblings without a text node
    /// between them.
    pub fn is_morph(&self) -> bool {
        match self {
            Node::Mustache(_) | Node::Block(_) | Node::Component(_) => true,
            Node::Element(_) | Node::Text(_) | Node::Comment(_) => false,
        }
    }

    /// A short name for the kind of node, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Component(_) => "component",
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
            Node::Mustache(_) => "mustache",
            Node::Block(_) => "block",
        }
    }
}

/// A namespace an element can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Namespace {
    /// `http://www.w3.org/2000/svg`
    #[cfg_attr(feature = "serde", serde(rename = "http://www.w3.org/2000/svg"))]
    Svg,
}

impl Namespace {
    /// Returns the namespace URI.
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Svg => SVG_NAMESPACE,
        }
    }
}

/// A plain element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementNode {
    /// The tag name.
    pub tag: SmolStr,
    /// The attributes, in source order.
    pub attributes: Vec<Attribute>,
    /// Tag helpers: expressions written inside the start tag outside any
    /// attribute value, e.g. `<div {{bind-attr foo}}>`.
    pub helpers: Vec<Expression>,
    /// The child nodes.
    pub children: Vec<Node>,
    /// The namespace, or `None` for plain HTML.
    pub namespace: Option<Namespace>,
    /// Whether this element re-opens HTML parsing inside foreign content.
    pub is_html_integration_point: bool,
    /// Location from the start tag to the end tag.
    pub loc: SourceLocation,
}

/// A custom tag invocation such as `<my-widget>`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentNode {
    /// The tag name.
    pub tag: SmolStr,
    /// The attributes, without any block-parameter declaration.
    pub attributes: Vec<Attribute>,
    /// The component body.
    pub program: Program,
    /// The namespace the component was opened in, or `None` for plain HTML.
    pub namespace: Option<Namespace>,
    /// Whether the tag name is an HTML integration point.
    pub is_html_integration_point: bool,
    /// Location from the start tag to the end tag.
    pub loc: SourceLocation,
}

/// A run of text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextNode {
    /// The text content.
    pub chars: String,
    /// The location of the text.
    pub loc: SourceLocation,
}

/// An HTML comment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommentNode {
    /// The comment content (without `<!--` and `-->`).
    pub value: String,
    /// The location of the comment.
    pub loc: SourceLocation,
}

/// An embedded expression, opaque to the tree builder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Expression {
    /// The raw expression source, without delimiters.
    pub source: String,
    /// The location of the expression.
    pub loc: SourceLocation,
}

/// A mustache `{{expr}}` (or `{{{expr}}}` when unescaped).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MustacheStatement {
    /// The expression.
    pub expression: Expression,
    /// Whether the output is HTML-escaped.
    pub escaped: bool,
    /// The location of the whole mustache including delimiters.
    pub loc: SourceLocation,
}

/// A block statement with its already built bodies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockStatement {
    /// The opening expression (`each items`).
    pub expression: Expression,
    /// The main body.
    pub program: Program,
    /// The `{{else}}` body.
    pub inverse: Option<Program>,
    /// The location of the whole block.
    pub loc: SourceLocation,
}

/// An attribute on an element or component.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attribute {
    /// The attribute name.
    pub name: SmolStr,
    /// The attribute value.
    pub value: AttrValue,
}

/// An attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttrValue {
    /// A literal value (empty for a valueless attribute).
    Text(TextNode),
    /// A single expression, `class={{cls}}`.
    Mustache(MustacheStatement),
    /// A quoted mix of literals and expressions, `class="a {{b}}"`.
    Concat(Vec<AttrPart>),
}

/// A part of a concatenated attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AttrPart {
    /// A literal part.
    Text(TextNode),
    /// An expression part.
    Mustache(MustacheStatement),
}
