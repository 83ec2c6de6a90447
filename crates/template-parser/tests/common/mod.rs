//! Compact text rendering of template trees for snapshot tests.

use template_parser::{AttrPart, AttrValue, MustacheStatement, Node, Program};

pub fn render(program: &Program) -> String {
    let mut lines = Vec::new();
    render_params(&program.block_params, 0, &mut lines);
    render_nodes(&program.body, 0, &mut lines);
    lines.join("\n")
}

fn render_params(params: &[smol_str::SmolStr], depth: usize, lines: &mut Vec<String>) {
    if !params.is_empty() {
        let names: Vec<&str> = params.iter().map(|p| p.as_str()).collect();
        lines.push(format!("{}as |{}|", indent(depth), names.join(" ")));
    }
}

fn render_nodes(nodes: &[Node], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        render_node(node, depth, lines);
    }
}

fn render_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);
    match node {
        Node::Element(element) => {
            let mut line = format!("{}<{}>", pad, element.tag);
            if element.namespace.is_some() {
                line.push_str(" [svg]");
            }
            if element.is_html_integration_point {
                line.push_str(" [integration-point]");
            }
            lines.push(line);
            for attribute in &element.attributes {
                lines.push(format!(
                    "{}@{}={}",
                    indent(depth + 1),
                    attribute.name,
                    render_value(&attribute.value)
                ));
            }
            for helper in &element.helpers {
                lines.push(format!("{}helper({})", indent(depth + 1), helper.source));
            }
            render_nodes(&element.children, depth + 1, lines);
        }
        Node::Component(component) => {
            let mut line = format!("{}component <{}>", pad, component.tag);
            if component.namespace.is_some() {
                line.push_str(" [svg]");
            }
            lines.push(line);
            for attribute in &component.attributes {
                lines.push(format!(
                    "{}@{}={}",
                    indent(depth + 1),
                    attribute.name,
                    render_value(&attribute.value)
                ));
            }
            render_params(&component.program.block_params, depth + 1, lines);
            render_nodes(&component.program.body, depth + 1, lines);
        }
        Node::Text(text) => lines.push(format!("{}text {:?}", pad, text.chars)),
        Node::Comment(comment) => lines.push(format!("{}comment {:?}", pad, comment.value)),
        Node::Mustache(mustache) => lines.push(format!("{}{}", pad, render_mustache(mustache))),
        Node::Block(block) => {
            lines.push(format!("{}{{{{#{}}}}}", pad, block.expression.source));
            render_nodes(&block.program.body, depth + 1, lines);
            if let Some(inverse) = &block.inverse {
                lines.push(format!("{}{{{{else}}}}", pad));
                render_nodes(&inverse.body, depth + 1, lines);
            }
        }
    }
}

fn render_mustache(mustache: &MustacheStatement) -> String {
    if mustache.escaped {
        format!("{{{{{}}}}}", mustache.expression.source)
    } else {
        format!("{{{{{{{}}}}}}}", mustache.expression.source)
    }
}

fn render_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Text(text) => format!("{:?}", text.chars),
        AttrValue::Mustache(mustache) => render_mustache(mustache),
        AttrValue::Concat(parts) => {
            let parts: Vec<String> = parts
                .iter()
                .map(|part| match part {
                    AttrPart::Text(text) => format!("{:?}", text.chars),
                    AttrPart::Mustache(mustache) => render_mustache(mustache),
                })
                .collect();
            format!("concat({})", parts.join(", "))
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
