//! Token-driven tree builder.
//!
//! The parser keeps a stack of open elements. Leaf tokens are appended to the
//! innermost open element (or the root program), start tags push, end tags
//! pop and attach the finished element to its parent. Mustaches are routed by
//! the tokenizer's sub-state, because the same `{{expr}}` is a tag helper, an
//! attribute value or content depending on where it was written.

use crate::ast::{BlockStatement, ElementNode, MustacheStatement, Namespace, Node, Program};
use crate::builders::{build_comment, build_component, build_element, build_program, build_text};
use crate::error::{ParseError, ParseErrorKind};
use crate::policy::{apply_namespace, is_component_tag, is_void_tag};
use crate::token::{TagToken, Token};
use crate::tokenizer::{Tokenizer, TokenizerState};
use crate::utils::{append_child, parse_component_block_params, postprocess_program};
use crate::ParseOptions;
use source_loc::{Position, SourceLocation};

const LOG_TARGET: &str = "template_parser";

/// The tree-building automaton.
#[derive(Debug, Default)]
pub struct Parser {
    /// The template root.
    root: Program,
    /// Open elements, innermost last.
    stack: Vec<ElementNode>,
    /// Parser options.
    options: ParseOptions,
}

impl Parser {
    /// Creates a parser with an empty tree.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            root: Program::default(),
            stack: Vec::new(),
            options,
        }
    }

    /// Returns the number of open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the names of the open elements, outermost first.
    pub fn open_elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.stack.iter().map(|element| element.tag.as_str())
    }

    /// Handles one token.
    ///
    /// `tokenizer` must be the tokenizer that produced `token`, still in the
    /// state it was in when the token was emitted.
    pub fn accept<T: Tokenizer + ?Sized>(
        &mut self,
        token: Token,
        tokenizer: &mut T,
    ) -> Result<(), ParseError> {
        log::trace!(
            target: LOG_TARGET,
            "accept {} in {} state at depth {}",
            token.kind_name(),
            tokenizer.state(),
            self.stack.len()
        );

        match token {
            Token::Comment { value, loc } => {
                self.append(Node::Comment(build_comment(value, loc)));
                Ok(())
            }
            Token::Chars { chars, loc } => {
                self.append(Node::Text(build_text(chars, loc)));
                Ok(())
            }
            Token::StartTag(tag) => self.start_tag(tag),
            Token::EndTag(tag) => self.end_tag(&tag.name, tag.loc),
            Token::Mustache(mustache) => self.mustache(mustache, tokenizer),
            Token::Block(block) => self.block(block, tokenizer),
        }
    }

    /// Finishes the parse and returns the root program.
    ///
    /// Fails if any element is still open.
    pub fn finish(self) -> Result<Program, ParseError> {
        if let Some(open) = self.stack.last() {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedTag {
                    tag_name: open.tag.to_string(),
                },
                open.loc.start,
            ));
        }
        Ok(self.root)
    }

    /// Appends a node to the innermost open element, or the root.
    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(element) => append_child(element, node),
            None => append_child(&mut self.root, node),
        }
    }

    fn start_tag(&mut self, mut tag: TagToken) -> Result<(), ParseError> {
        tag.finalize_attribute_value();
        let loc = tag.loc;
        let self_closing = tag.self_closing;

        let mut element = build_element(tag.name, tag.attributes, tag.helpers, loc);
        apply_namespace(&mut element, self.stack.last());
        log::trace!(
            target: LOG_TARGET,
            "open <{}> in namespace {}",
            element.tag,
            element.namespace.map_or("(none)", Namespace::uri)
        );

        let close_now = self_closing || is_void_tag(&element.tag);
        let tag_name = element.tag.clone();
        self.stack.push(element);

        if close_now {
            self.end_tag(&tag_name, loc)?;
        }
        Ok(())
    }

    fn end_tag(&mut self, name: &str, loc: SourceLocation) -> Result<(), ParseError> {
        let Some(mut element) = self.stack.pop() else {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedClosingTag {
                    found: name.to_string(),
                },
                loc.start,
            ));
        };

        if element.tag.as_str() != name {
            return Err(ParseError::new(
                ParseErrorKind::MismatchedClosingTag {
                    expected: element.tag.to_string(),
                    found: name.to_string(),
                    line: loc.start.line,
                    open_line: element.loc.start.line,
                },
                loc.start,
            ));
        }

        element.loc = element.loc.with_end(loc.end);

        if self.options.disable_component_generation || !is_component_tag(&element.tag) {
            self.append(Node::Element(element));
            return Ok(());
        }

        let mut program = build_program(std::mem::take(&mut element.children));
        parse_component_block_params(&mut element, &mut program)?;
        postprocess_program(&mut program);
        log::debug!(
            target: LOG_TARGET,
            "promoted <{}> to a component with {} block params",
            element.tag,
            program.block_params.len()
        );

        let mut component = build_component(element.tag, element.attributes, program, element.loc);
        component.namespace = element.namespace;
        component.is_html_integration_point = element.is_html_integration_point;
        self.append(Node::Component(component));
        Ok(())
    }

    fn block<T: Tokenizer + ?Sized>(
        &mut self,
        block: BlockStatement,
        tokenizer: &mut T,
    ) -> Result<(), ParseError> {
        match tokenizer.state() {
            TokenizerState::Comment => {
                log::trace!(target: LOG_TARGET, "dropping block inside a comment");
                Ok(())
            }
            // `beforeData` is content position before the first token.
            TokenizerState::Data | TokenizerState::BeforeData => {
                self.append(Node::Block(block));
                Ok(())
            }
            state => Err(ParseError::new(
                ParseErrorKind::MisplacedBlock { state },
                block.loc.start,
            )),
        }
    }

    fn mustache<T: Tokenizer + ?Sized>(
        &mut self,
        mustache: MustacheStatement,
        tokenizer: &mut T,
    ) -> Result<(), ParseError> {
        let state = tokenizer.state();
        let at = mustache.loc.start;

        match state {
            // Tag helpers
            TokenizerState::TagName | TokenizerState::AfterAttributeValueQuoted => {
                pending_tag(tokenizer, state, at)?.add_tag_helper(mustache.expression);
                rewrite_state(tokenizer, TokenizerState::BeforeAttributeName);
            }
            TokenizerState::BeforeAttributeName => {
                pending_tag(tokenizer, state, at)?.add_tag_helper(mustache.expression);
            }
            TokenizerState::AttributeName | TokenizerState::AfterAttributeName => {
                tokenizer.finalize_attribute_value();
                pending_tag(tokenizer, state, at)?.add_tag_helper(mustache.expression);
                rewrite_state(tokenizer, TokenizerState::BeforeAttributeName);
            }

            // Attribute values
            TokenizerState::BeforeAttributeValue => {
                let tag = pending_tag(tokenizer, state, at)?;
                tag.mark_attribute_quoted(false);
                tag.add_to_attribute_value(mustache);
                rewrite_state(tokenizer, TokenizerState::AttributeValueUnquoted);
            }
            TokenizerState::AttributeValueDoubleQuoted
            | TokenizerState::AttributeValueSingleQuoted
            | TokenizerState::AttributeValueUnquoted => {
                pending_tag(tokenizer, state, at)?.add_to_attribute_value(mustache);
            }

            // Content
            _ => self.append(Node::Mustache(mustache)),
        }
        Ok(())
    }
}

fn pending_tag<T: Tokenizer + ?Sized>(
    tokenizer: &mut T,
    state: TokenizerState,
    at: Position,
) -> Result<&mut TagToken, ParseError> {
    tokenizer
        .current_tag()
        .ok_or_else(|| ParseError::new(ParseErrorKind::NoPendingTag { state }, at))
}

fn rewrite_state<T: Tokenizer + ?Sized>(tokenizer: &mut T, state: TokenizerState) {
    log::trace!(
        target: LOG_TARGET,
        "tokenizer state {} -> {}",
        tokenizer.state(),
        state
    );
    tokenizer.set_state(state);
}
