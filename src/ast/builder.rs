//! Turns a token stream into the flat node array (spec.md §4.2).
//!
//! One cursor, `current_idx`, tracks the most recently created or closed
//! node. Where the next node attaches is derived from it rather than
//! tracked separately: if the node at `current_idx` is still open, the
//! next node becomes its child; otherwise it becomes the next sibling
//! after it, under the same parent. End tags are matched structurally by
//! walking the chain of open ancestors outward from that point.

use crate::ast::{Ast, Language, Node, NodeKind};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::elements::{self, ElementKind};
use crate::model::Model;
use crate::span::Span;
use crate::token::{TagKind, Token};
use crate::tokenizer::Tokenizer;
use crate::validator::{self, RawAttr};

/// Build an [`Ast`] by driving a [`Tokenizer`] in `return_attrs` mode, so
/// every tag's attributes are available for eager validation (spec.md
/// §4.4, "runs as the builder materializes each start tag").
pub fn build(source: &[u8], language: Language) -> Ast<'_> {
    let mut ast = Ast {
        source,
        nodes: vec![Node::new_at(NodeKind::Root, 0)],
        syntax_errors: Vec::new(),
        diagnostics: Vec::new(),
        language,
        has_syntax_errors: false,
    };
    let mut last_child: Vec<u32> = vec![0];

    let mut tokenizer = Tokenizer::new_with_return_attrs(source);
    let mut current_idx: u32 = 0;
    let mut foreign_depth: u32 = 0;

    let mut pending_attrs: Vec<RawAttr> = Vec::new();

    while let Some(token) = tokenizer.next() {
        match token {
            Token::ParseError { kind, span } => {
                ast.syntax_errors.push((kind, span));
                ast.has_syntax_errors = true;
            }
            Token::TagName { .. } => {
                pending_attrs.clear();
            }
            Token::Attr { name, value } => {
                pending_attrs.push(RawAttr { name, value });
            }
            Token::Tag { kind, span, name } => {
                if kind.is_start() {
                    handle_start_tag(
                        &mut ast,
                        &mut last_child,
                        &mut current_idx,
                        &mut foreign_depth,
                        &mut tokenizer,
                        kind,
                        span,
                        name,
                        &pending_attrs,
                    );
                } else {
                    handle_end_tag(&mut ast, &mut current_idx, &mut foreign_depth, span, name);
                }
                pending_attrs.clear();
            }
            Token::Text { span } => {
                insert_leaf(&mut ast, &mut last_child, &mut current_idx, NodeKind::Text, span, Span::ZERO);
            }
            Token::Comment { span } => {
                insert_leaf(&mut ast, &mut last_child, &mut current_idx, NodeKind::Comment, span, Span::ZERO);
            }
            Token::Doctype { span, name, .. } => {
                insert_leaf(&mut ast, &mut last_child, &mut current_idx, NodeKind::Doctype, span, name.unwrap_or(Span::ZERO));
            }
        }
    }

    finalize_unclosed(&mut ast, current_idx);

    if validator::strict_validation_applies(language, ast.has_syntax_errors) {
        let mut diagnostics = std::mem::take(&mut ast.diagnostics);
        validator::validate_content(&ast, &mut diagnostics);
        ast.diagnostics = diagnostics;
    }

    ast
}

/// Where the next node attaches: `current_idx` itself if still open
/// (becomes its child), otherwise `current_idx`'s parent (becomes the
/// next sibling after it).
fn insertion_parent(ast: &Ast<'_>, current_idx: u32) -> u32 {
    if ast.nodes[current_idx as usize].is_unclosed() {
        current_idx
    } else {
        ast.nodes[current_idx as usize].parent_idx
    }
}

fn append_child(nodes: &mut [Node], last_child: &mut Vec<u32>, parent_idx: u32, new_idx: u32) {
    nodes[new_idx as usize].parent_idx = parent_idx;
    match last_child[parent_idx as usize] {
        0 => nodes[parent_idx as usize].first_child_idx = new_idx,
        lc => nodes[lc as usize].next_idx = new_idx,
    }
    last_child[parent_idx as usize] = new_idx;
}

fn insert_leaf(ast: &mut Ast<'_>, last_child: &mut Vec<u32>, current_idx: &mut u32, kind: NodeKind, open: Span, name: Span) {
    let parent_idx = insertion_parent(ast, *current_idx);
    let new_idx = ast.nodes.len() as u32;
    let mut node = Node::new_at(kind, parent_idx);
    node.open = open;
    node.close = open;
    node.name = name;
    node.closed = true;
    ast.nodes.push(node);
    last_child.push(0);
    append_child(&mut ast.nodes, last_child, parent_idx, new_idx);
    *current_idx = new_idx;
}

fn ascii_lower(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).to_ascii_lowercase()
}

/// Resolve a start tag's name to a [`NodeKind`], pushing an
/// `invalid_html_tag_name` diagnostic when `language` rejects it outright
/// (spec.md §4.2: unknown names become opaque, with an error unless they
/// look like a custom element or, under `super_html`, a recognized
/// template directive).
fn resolve_kind(ast: &mut Ast<'_>, new_idx: u32, in_foreign: bool, raw_name: &[u8], lowered: &str, name_span: Span) -> (NodeKind, Option<ElementKind>) {
    if in_foreign {
        return (NodeKind::Opaque, None);
    }
    match ast.language {
        Language::Xml => (NodeKind::Opaque, None),
        Language::Html | Language::SuperHtml => {
            if let Some(kind) = elements::lookup(raw_name) {
                (NodeKind::Element(kind), Some(kind))
            } else if lowered.contains('-') {
                (NodeKind::Opaque, None)
            } else if ast.language == Language::SuperHtml && matches!(lowered, "extend" | "super" | "ctx") {
                (NodeKind::Opaque, None)
            } else {
                ast.diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidHtmlTagName, name_span, new_idx));
                (NodeKind::Opaque, None)
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_start_tag(
    ast: &mut Ast<'_>,
    last_child: &mut Vec<u32>,
    current_idx: &mut u32,
    foreign_depth: &mut u32,
    tokenizer: &mut Tokenizer<'_>,
    tag_kind: TagKind,
    tag_span: Span,
    name_span: Span,
    pending_attrs: &[RawAttr],
) {
    let raw_name = name_span.slice(ast.source);
    let lowered = ascii_lower(raw_name);
    let is_foreign_root = lowered == "svg" || lowered == "math";
    let in_foreign = *foreign_depth > 0 || is_foreign_root;

    let new_idx = ast.nodes.len() as u32;
    let (node_kind, resolved) = resolve_kind(ast, new_idx, in_foreign, raw_name, &lowered, name_span);

    let is_void = resolved.map(|k| elements::info(k).is_void).unwrap_or(false);
    let self_closing_syntax = tag_kind.is_self_closing();
    let effectively_self_closing = is_void || (in_foreign && self_closing_syntax);

    if self_closing_syntax && !is_void && !in_foreign {
        ast.diagnostics.push(Diagnostic::new(DiagnosticKind::HtmlElementsCantSelfClose, tag_span, new_idx));
    }

    let parent_idx = insertion_parent(ast, *current_idx);
    let mut node = Node::new_at(node_kind, parent_idx);
    node.open = tag_span;
    node.name = name_span;
    node.self_closing = effectively_self_closing;
    node.closed = effectively_self_closing;

    if let Some(kind) = resolved {
        if !in_foreign {
            node.model = validator::validate_attributes(ast.source, kind, pending_attrs, new_idx, &mut ast.diagnostics);
            if !effectively_self_closing {
                match kind {
                    ElementKind::Script => tokenizer.goto_script_data(),
                    ElementKind::Style | ElementKind::Noscript | ElementKind::Iframe => tokenizer.goto_raw_text(raw_name),
                    ElementKind::Textarea | ElementKind::Title => tokenizer.goto_rc_data(raw_name),
                    _ => {}
                }
            }
        }
    } else {
        node.model = Model::default();
    }

    ast.nodes.push(node);
    last_child.push(0);
    append_child(&mut ast.nodes, last_child, parent_idx, new_idx);

    if is_foreign_root && !effectively_self_closing {
        *foreign_depth += 1;
    }

    *current_idx = new_idx;
}

/// Walk outward from `current_idx`'s nearest open ancestor, collecting
/// every still-open element/opaque node (nearest first) up to and
/// including the root's children.
fn open_chain(ast: &Ast<'_>, start: u32) -> Vec<u32> {
    let mut chain = Vec::new();
    let mut probe = start;
    loop {
        if ast.nodes[probe as usize].is_unclosed() {
            chain.push(probe);
        }
        if probe == 0 {
            break;
        }
        probe = ast.nodes[probe as usize].parent_idx;
    }
    chain
}

fn handle_end_tag(ast: &mut Ast<'_>, current_idx: &mut u32, foreign_depth: &mut u32, tag_span: Span, name_span: Span) {
    let end_name = name_span.slice(ast.source);
    let probe_start = insertion_parent(ast, *current_idx);
    let chain = open_chain(ast, probe_start);

    let match_pos = chain.iter().position(|&idx| ast.nodes[idx as usize].name.slice(ast.source).eq_ignore_ascii_case(end_name));

    match match_pos {
        None => {
            let is_void = elements::lookup(end_name).map(|k| elements::info(k).is_void).unwrap_or(false);
            let kind = if is_void { DiagnosticKind::VoidEndTag } else { DiagnosticKind::ErroneousEndTag };
            ast.diagnostics.push(Diagnostic::new(kind, tag_span, *current_idx));
        }
        Some(pos) => {
            for &idx in &chain[..pos] {
                ast.diagnostics.push(Diagnostic::new(DiagnosticKind::MissingEndTag, ast.nodes[idx as usize].open, idx));
                ast.nodes[idx as usize].closed = true;
            }
            let matched = chain[pos];
            ast.nodes[matched as usize].closed = true;
            ast.nodes[matched as usize].close = tag_span;

            let matched_name = ascii_lower(ast.nodes[matched as usize].name.slice(ast.source));
            if (matched_name == "svg" || matched_name == "math") && *foreign_depth > 0 {
                *foreign_depth -= 1;
            }

            *current_idx = matched;
        }
    }
}

fn finalize_unclosed(ast: &mut Ast<'_>, current_idx: u32) {
    let chain = open_chain(ast, current_idx);
    for idx in chain {
        ast.diagnostics.push(Diagnostic::new(DiagnosticKind::MissingEndTag, ast.nodes[idx as usize].open, idx));
        ast.nodes[idx as usize].closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn simple_tree_has_correct_parent_links() {
        let ast = Ast::parse(b"<div><p>hi</p></div>", Language::Html);
        let div_idx = ast.children(0).next().unwrap();
        assert!(matches!(ast.nodes[div_idx as usize].kind, NodeKind::Element(ElementKind::Div)));
        let p_idx = ast.children(div_idx).next().unwrap();
        assert!(matches!(ast.nodes[p_idx as usize].kind, NodeKind::Element(ElementKind::P)));
        let text_idx = ast.children(p_idx).next().unwrap();
        assert!(matches!(ast.nodes[text_idx as usize].kind, NodeKind::Text));
    }

    #[test]
    fn void_elements_accept_no_children() {
        let ast = Ast::parse(b"<div><br>after</div>", Language::Html);
        let div_idx = ast.children(0).next().unwrap();
        let children: Vec<u32> = ast.children(div_idx).collect();
        assert_eq!(children.len(), 2);
        let br_idx = children[0];
        assert!(matches!(ast.nodes[br_idx as usize].kind, NodeKind::Element(ElementKind::Br)));
        assert!(ast.nodes[br_idx as usize].closed);
        assert_eq!(ast.children(br_idx).count(), 0);
    }

    #[test]
    fn unclosed_ancestor_gets_missing_end_tag_on_mismatched_close() {
        let ast = Ast::parse(b"<div><span>x</div>", Language::Html);
        assert!(ast.diagnostics.iter().any(|d| d.kind == DiagnosticKind::MissingEndTag));
        let div_idx = ast.children(0).next().unwrap();
        assert!(ast.nodes[div_idx as usize].closed);
    }

    #[test]
    fn end_tag_with_no_matching_ancestor_is_erroneous() {
        let ast = Ast::parse(b"<div>x</span></div>", Language::Html);
        assert!(ast.diagnostics.iter().any(|d| d.kind == DiagnosticKind::ErroneousEndTag));
    }

    #[test]
    fn unknown_name_without_hyphen_is_flagged() {
        let ast = Ast::parse(b"<frobnicate>x</frobnicate>", Language::Html);
        assert!(ast.diagnostics.iter().any(|d| d.kind == DiagnosticKind::InvalidHtmlTagName));
    }

    #[test]
    fn custom_element_name_is_not_flagged() {
        let ast = Ast::parse(b"<my-widget>x</my-widget>", Language::Html);
        assert!(!ast.diagnostics.iter().any(|d| d.kind == DiagnosticKind::InvalidHtmlTagName));
        let idx = ast.children(0).next().unwrap();
        assert!(matches!(ast.nodes[idx as usize].kind, NodeKind::Opaque));
    }

    #[test]
    fn self_closing_non_void_html_element_is_flagged_but_stays_open() {
        let ast = Ast::parse(b"<div/><p>x</p>", Language::Html);
        let div_idx = ast.children(0).next().unwrap();
        assert!(ast.diagnostics.iter().any(|d| d.kind == DiagnosticKind::HtmlElementsCantSelfClose));
        // `<p>` attached inside `<div>`, since the self-closing flag was ignored.
        let inside = ast.children(div_idx).next();
        assert!(inside.is_some());
    }

    #[test]
    fn svg_content_is_opaque_and_not_attribute_validated() {
        let ast = Ast::parse(br#"<svg><circle bogus-attr="1"/></svg>"#, Language::Html);
        let svg_idx = ast.children(0).next().unwrap();
        assert!(matches!(ast.nodes[svg_idx as usize].kind, NodeKind::Opaque));
        assert!(ast.diagnostics.iter().all(|d| d.kind != DiagnosticKind::InvalidAttr));
    }

    #[test]
    fn script_body_is_not_tokenized_as_markup() {
        let ast = Ast::parse(b"<script>if (1 < 2) { x() }</script>", Language::Html);
        let script_idx = ast.children(0).next().unwrap();
        let text_idx = ast.children(script_idx).next().unwrap();
        assert!(matches!(ast.nodes[text_idx as usize].kind, NodeKind::Text));
    }
}
