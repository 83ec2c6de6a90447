//! Namespace and void-element rules.

use crate::ast::{ElementNode, Namespace};

/// Elements that never have content and close themselves whether or not the
/// start tag ends in `/>`.
/// See: http://www.w3.org/TR/html-markup/syntax.html#syntax-elements
const VOID_TAG_NAMES: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// SVG elements whose content is parsed as HTML again.
/// See: http://www.w3.org/html/wg/drafts/html/master/syntax.html#html-integration-point
const SVG_HTML_INTEGRATION_POINTS: &[&str] = &["foreignObject", "desc", "title"];

/// Returns true if the given tag name is a void element. Case-sensitive.
pub fn is_void_tag(name: &str) -> bool {
    VOID_TAG_NAMES.contains(&name)
}

/// Returns true if the given tag name is an HTML integration point.
pub fn is_html_integration_point(name: &str) -> bool {
    SVG_HTML_INTEGRATION_POINTS.contains(&name)
}

/// Returns true if the tag name denotes a custom component.
pub fn is_component_tag(name: &str) -> bool {
    name.contains('-')
}

/// Resolves the namespace for a new element named `tag` opened inside
/// `parent` (`None` at the template root).
pub fn resolve_namespace(tag: &str, parent: Option<&ElementNode>) -> Option<Namespace> {
    if tag == "svg" {
        return Some(Namespace::Svg);
    }
    parent
        .filter(|parent| !parent.is_html_integration_point)
        .and_then(|parent| parent.namespace)
}

/// Applies the namespace and integration-point rules to a freshly built
/// element.
pub fn apply_namespace(element: &mut ElementNode, parent: Option<&ElementNode>) {
    element.namespace = resolve_namespace(&element.tag, parent);
    if is_html_integration_point(&element.tag) {
        element.is_html_integration_point = true;
    }
}
