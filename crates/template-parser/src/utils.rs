//! Tree utilities shared by the parser.

use crate::ast::{ElementNode, Node, Program};
use crate::builders::build_text;
use crate::error::{ParseError, ParseErrorKind};
use smol_str::SmolStr;
use source_loc::SourceLocation;

/// Characters that may not appear in a block parameter name.
const INVALID_IDENTIFIER_CHARS: &str = "!\"#%&'()*+,./;<=>@[\\]^`{|}~";

/// A node that owns an ordered list of children.
pub trait ParentNode {
    /// Returns the child list.
    fn children_mut(&mut self) -> &mut Vec<Node>;
}

impl ParentNode for Program {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.body
    }
}

impl ParentNode for ElementNode {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }
}

/// Appends `node` to `parent`'s children.
///
/// Text appended right after text is merged into the existing node, so a
/// child list never holds two adjacent text nodes. Two adjacent morph nodes
/// get an empty text node between them.
pub fn append_child<P: ParentNode + ?Sized>(parent: &mut P, node: Node) {
    let children = parent.children_mut();

    if let (Some(Node::Text(last)), Node::Text(text)) = (children.last_mut(), &node) {
        last.chars.push_str(&text.chars);
        last.loc = last.loc.cover(text.loc);
        return;
    }

    if let Some(last) = children.last() {
        if last.is_morph() && node.is_morph() {
            let boundary = SourceLocation::point(last.loc().end);
            children.push(Node::Text(build_text("", boundary)));
        }
    }
    children.push(node);
}

/// Extracts a component's block parameters.
///
/// The declaration `as |item index|` reaches the parser as the attribute
/// names `as`, `|item` and `index|`. When present and well formed, those
/// attributes are removed from `element` and the names are stored on
/// `program`.
pub fn parse_component_block_params(
    element: &mut ElementNode,
    program: &mut Program,
) -> Result<(), ParseError> {
    let names: Vec<&str> = element.attributes.iter().map(|a| a.name.as_str()).collect();

    let Some(as_index) = names.iter().position(|name| *name == "as") else {
        return Ok(());
    };
    if !names
        .get(as_index + 1)
        .is_some_and(|name| name.starts_with('|'))
    {
        return Ok(());
    }

    let error = |message: String| {
        ParseError::new(
            ParseErrorKind::InvalidBlockParams { message },
            element.loc.start,
        )
    };

    let params_string = names[as_index..].join(" ");
    if !params_string.ends_with('|') || params_string.matches('|').count() != 2 {
        return Err(error(format!(
            "invalid block parameters syntax: '{}'",
            params_string
        )));
    }

    let mut params = Vec::new();
    for name in &names[as_index + 1..] {
        let param = name.replace('|', "");
        if param.is_empty() {
            continue;
        }
        if param.chars().any(|c| INVALID_IDENTIFIER_CHARS.contains(c)) {
            return Err(error(format!(
                "invalid identifier for block parameters: '{}' in '{}'",
                param, params_string
            )));
        }
        params.push(SmolStr::new(param));
    }

    if params.is_empty() {
        return Err(error(format!(
            "cannot use zero block parameters: '{}'",
            params_string
        )));
    }

    element.attributes.truncate(as_index);
    program.block_params = params;
    Ok(())
}

/// Pads a freshly closed component body with empty text nodes so that it
/// neither starts nor ends with a morph node. Idempotent.
pub fn postprocess_program(program: &mut Program) {
    let body = &mut program.body;

    if let Some(first) = body.first() {
        if first.is_morph() {
            let boundary = SourceLocation::point(first.loc().start);
            body.insert(0, Node::Text(build_text("", boundary)));
        }
    }

    if let Some(last) = body.last() {
        if last.is_morph() {
            let boundary = SourceLocation::point(last.loc().end);
            body.push(Node::Text(build_text("", boundary)));
        }
    }
}
