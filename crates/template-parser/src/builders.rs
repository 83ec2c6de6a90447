//! Node constructors.
//!
//! Every builder returns a fresh node with empty child collections. No
//! validation happens here; the parser decides what is legal.

use crate::ast::*;
use smol_str::SmolStr;
use source_loc::SourceLocation;

/// Builds a program from a list of nodes.
pub fn build_program(body: Vec<Node>) -> Program {
    Program {
        body,
        block_params: Vec::new(),
    }
}

/// Builds an element with no children and no namespace.
pub fn build_element(
    tag: impl Into<SmolStr>,
    attributes: Vec<Attribute>,
    helpers: Vec<Expression>,
    loc: SourceLocation,
) -> ElementNode {
    ElementNode {
        tag: tag.into(),
        attributes,
        helpers,
        children: Vec::new(),
        namespace: None,
        is_html_integration_point: false,
        loc,
    }
}

/// Builds a component invocation with no namespace.
pub fn build_component(
    tag: impl Into<SmolStr>,
    attributes: Vec<Attribute>,
    program: Program,
    loc: SourceLocation,
) -> ComponentNode {
    ComponentNode {
        tag: tag.into(),
        attributes,
        program,
        namespace: None,
        is_html_integration_point: false,
        loc,
    }
}

/// Builds a text node.
pub fn build_text(chars: impl Into<String>, loc: SourceLocation) -> TextNode {
    TextNode {
        chars: chars.into(),
        loc,
    }
}

/// Builds a comment node.
pub fn build_comment(value: impl Into<String>, loc: SourceLocation) -> CommentNode {
    CommentNode {
        value: value.into(),
        loc,
    }
}

/// Builds an opaque expression.
pub fn build_expression(source: impl Into<String>, loc: SourceLocation) -> Expression {
    Expression {
        source: source.into(),
        loc,
    }
}

/// Builds a mustache statement.
pub fn build_mustache(
    expression: Expression,
    escaped: bool,
    loc: SourceLocation,
) -> MustacheStatement {
    MustacheStatement {
        expression,
        escaped,
        loc,
    }
}

/// Builds a block statement.
pub fn build_block(
    expression: Expression,
    program: Program,
    inverse: Option<Program>,
    loc: SourceLocation,
) -> BlockStatement {
    BlockStatement {
        expression,
        program,
        inverse,
        loc,
    }
}

/// Builds an attribute.
pub fn build_attribute(name: impl Into<SmolStr>, value: AttrValue) -> Attribute {
    Attribute {
        name: name.into(),
        value,
    }
}

/// Builds a concatenated attribute value.
pub fn build_concat(parts: Vec<AttrPart>) -> AttrValue {
    AttrValue::Concat(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use source_loc::Position;

    #[test]
    fn test_build_element_defaults() {
        let loc = SourceLocation::point(Position::new(3, 1));
        let element = build_element("div", vec![], vec![], loc);
        assert_eq!(element.tag.as_str(), "div");
        assert!(element.children.is_empty());
        assert!(element.helpers.is_empty());
        assert_eq!(element.namespace, None);
        assert!(!element.is_html_integration_point);
        assert_eq!(element.loc, loc);
    }

    #[test]
    fn test_build_program_has_no_block_params() {
        let text = build_text("hi", SourceLocation::default());
        let program = build_program(vec![Node::Text(text)]);
        assert_eq!(program.body.len(), 1);
        assert!(program.block_params.is_empty());
    }

    #[test]
    fn test_build_component_keeps_program() {
        let mut program = build_program(vec![]);
        program.block_params.push(SmolStr::new("item"));
        let component = build_component("x-list", vec![], program, SourceLocation::default());
        assert_eq!(component.tag.as_str(), "x-list");
        assert_eq!(component.program.block_params, vec![SmolStr::new("item")]);
        assert_eq!(component.namespace, None);
        assert!(!component.is_html_integration_point);
    }
}
