//! C6: canonical reformatting (spec.md §4.5).
//!
//! Re-emits an error-free [`Ast`] with canonical whitespace. Two signals
//! are read back from the source rather than invented: whether a parent
//! was already laid out vertically (inter-tag whitespace before its first
//! child), and whether its attributes were already one per line
//! (whitespace before `>` plus two or more attributes). Everything else
//! about the original formatting is discarded.

use crate::ast::{Ast, NodeKind};
use crate::elements::ElementKind;
use crate::ide;
use crate::span::Span;
use crate::token::AttrValue;

/// Formatting is refused when the AST carries syntax errors (spec.md §7,
/// class 1: "disables the formatter").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotFormattable;

impl std::fmt::Display for NotFormattable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AST has syntax errors; refusing to format")
    }
}

impl std::error::Error for NotFormattable {}

/// Format `ast` back to canonical source text.
///
/// # Errors
/// Returns [`NotFormattable`] if the AST has any tokenizer-level syntax
/// errors (spec.md §7, class 1).
pub fn format(ast: &Ast<'_>) -> Result<String, NotFormattable> {
    if ast.has_syntax_errors {
        return Err(NotFormattable);
    }
    let mut out = String::new();
    render_children(ast, Ast::ROOT, 0, &mut out);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

fn node_start(ast: &Ast<'_>, idx: u32) -> u32 {
    ast.nodes[idx as usize].open.start
}

fn node_end(ast: &Ast<'_>, idx: u32) -> u32 {
    let node = &ast.nodes[idx as usize];
    if !node.close.is_empty() {
        node.close.end
    } else {
        node.open.end
    }
}

fn push_tabs(out: &mut String, indent: u32) {
    for _ in 0..indent {
        out.push('\t');
    }
}

fn render_children(ast: &Ast<'_>, parent_idx: u32, indent: u32, out: &mut String) {
    let top_level = parent_idx == Ast::ROOT;
    let mut prev_end: Option<u32> = None;
    for child_idx in ast.children(parent_idx) {
        if top_level {
            if let Some(prev) = prev_end {
                let gap = Span::new(prev, node_start(ast, child_idx)).slice(ast.source);
                out.push('\n');
                if gap.iter().filter(|&&b| b == b'\n').count() >= 2 {
                    out.push('\n');
                }
            }
        }
        render_node(ast, child_idx, indent, out);
        prev_end = Some(node_end(ast, child_idx));
    }
}

fn render_node(ast: &Ast<'_>, idx: u32, indent: u32, out: &mut String) {
    match ast.nodes[idx as usize].kind {
        NodeKind::Text => out.push_str(text_of(ast.nodes[idx as usize].open.slice(ast.source))),
        NodeKind::Comment => out.push_str(text_of(ast.nodes[idx as usize].open.slice(ast.source))),
        NodeKind::Doctype => render_doctype(ast, idx, out),
        NodeKind::Element(_) | NodeKind::Opaque => render_element(ast, idx, indent, out),
        NodeKind::Root => {}
    }
}

fn text_of(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or("")
}

fn render_doctype(ast: &Ast<'_>, idx: u32, out: &mut String) {
    let node = &ast.nodes[idx as usize];
    out.push_str("<!DOCTYPE");
    if !node.name.is_empty() {
        out.push(' ');
        out.push_str(text_of(node.name.slice(ast.source)));
    }
    out.push('>');
}

fn render_element(ast: &Ast<'_>, idx: u32, indent: u32, out: &mut String) {
    let node = &ast.nodes[idx as usize];
    let resolved = match node.kind {
        NodeKind::Element(kind) => Some(kind),
        _ => None,
    };

    render_open_tag(ast, idx, indent, out);

    if node.self_closing || resolved.map(crate::elements::is_void).unwrap_or(false) {
        return;
    }

    if resolved == Some(ElementKind::Pre) {
        let content_end = if node.close.is_empty() { ast.source.len() as u32 } else { node.close.start };
        out.push_str(text_of(Span::new(node.open.end, content_end).slice(ast.source)));
        render_close_tag(ast, idx, out);
        return;
    }

    if matches!(resolved, Some(ElementKind::Script | ElementKind::Style)) {
        render_raw_text_content(ast, idx, indent, out);
        render_close_tag(ast, idx, out);
        return;
    }

    let first_child = node.first_child_idx;
    if first_child == 0 {
        render_close_tag(ast, idx, out);
        return;
    }

    let vertical = Span::new(node.open.end, node_start(ast, first_child)).len() > 0;
    if vertical {
        let child_indent = indent + 1;
        for child_idx in ast.children(idx) {
            out.push('\n');
            push_tabs(out, child_indent);
            render_node(ast, child_idx, child_indent, out);
        }
        out.push('\n');
        push_tabs(out, indent);
    } else {
        for child_idx in ast.children(idx) {
            render_node(ast, child_idx, indent, out);
        }
    }
    render_close_tag(ast, idx, out);
}

fn render_raw_text_content(ast: &Ast<'_>, idx: u32, indent: u32, out: &mut String) {
    let node = &ast.nodes[idx as usize];
    let Some(text_idx) = ast.children(idx).next() else { return };
    let text = text_of(ast.nodes[text_idx as usize].open.slice(ast.source));
    if text.trim().is_empty() {
        return;
    }
    let body = reformat_braces(text, indent + 1);
    if body.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(&body);
    out.push('\n');
    push_tabs(out, indent);
    let _ = node;
}

/// Lines ending in `{` increase a CSS-style indent; lines consisting of
/// `}` decrease it; empty lines collapse to at most one (spec.md §4.5).
fn reformat_braces(text: &str, base_indent: u32) -> String {
    let mut out = String::new();
    let mut indent = base_indent;
    let mut prev_blank = false;
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            if !prev_blank && !out.is_empty() {
                out.push('\n');
            }
            prev_blank = true;
            continue;
        }
        prev_blank = false;
        if line.starts_with('}') && indent > base_indent {
            indent -= 1;
        }
        push_tabs(&mut out, indent);
        out.push_str(line);
        out.push('\n');
        if line.ends_with('{') {
            indent += 1;
        }
    }
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn render_close_tag(ast: &Ast<'_>, idx: u32, out: &mut String) {
    let node = &ast.nodes[idx as usize];
    if node.close.is_empty() && node.is_unclosed() {
        // Unreachable under `format`'s contract (syntax-error-free AST
        // implies every element is closed, structurally or implicitly),
        // kept as a defensive no-op rather than a panic.
        return;
    }
    out.push_str("</");
    out.push_str(text_of(node.name.slice(ast.source)));
    out.push('>');
}

fn render_open_tag(ast: &Ast<'_>, idx: u32, indent: u32, out: &mut String) {
    let node = &ast.nodes[idx as usize];
    out.push('<');
    out.push_str(text_of(node.name.slice(ast.source)));

    let attrs = ide::rescan_tag_attrs(ast, node);
    let whitespace_before_gt = node.open.len() >= 2 && {
        let byte = Span::new(node.open.end - 2, node.open.end - 1).slice(ast.source)[0];
        byte.is_ascii_whitespace()
    };

    if attrs.is_empty() {
        // nothing
    } else if whitespace_before_gt && attrs.len() >= 2 {
        let attr_indent = indent + 1;
        for (name, value) in &attrs {
            out.push('\n');
            push_tabs(out, attr_indent);
            out.push_str(&attr_text(ast, *name, *value));
        }
        out.push('\n');
        push_tabs(out, indent);
    } else {
        for (name, value) in &attrs {
            out.push(' ');
            out.push_str(&attr_text(ast, *name, *value));
        }
    }

    let is_void = match node.kind {
        NodeKind::Element(kind) => crate::elements::is_void(kind),
        _ => false,
    };
    if node.self_closing && !is_void {
        out.push_str("/>");
    } else {
        out.push('>');
    }
}

fn attr_text(ast: &Ast<'_>, name: Span, value: Option<AttrValue>) -> String {
    let end = match value {
        Some(v) => v.span.end + u32::from(v.quote != crate::token::Quote::None),
        None => name.end,
    };
    text_of(Span::new(name.start, end).slice(ast.source)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Language;

    fn fmt(src: &[u8]) -> String {
        let ast = Ast::parse(src, Language::Html);
        format(&ast).expect("formattable")
    }

    #[test]
    fn already_horizontal_is_unchanged() {
        assert_eq!(fmt(b"<div><p>x</p></div>"), "<div><p>x</p></div>\n");
    }

    #[test]
    fn inter_tag_whitespace_forces_vertical_layout() {
        assert_eq!(fmt(b"<div>\n<p>x</p></div>"), "<div>\n\t<p>x</p>\n</div>\n");
    }

    #[test]
    fn pre_content_passes_through_verbatim() {
        assert_eq!(fmt(b"<pre>  a\n  b</pre>"), "<pre>  a\n  b</pre>\n");
    }

    #[test]
    fn doctype_is_canonicalized() {
        assert_eq!(fmt(b"<!doctype HTML >"), "<!DOCTYPE HTML>\n");
    }

    #[test]
    fn multiple_attributes_with_trailing_whitespace_go_one_per_line() {
        let out = fmt(br#"<div id="a" class="b" >x</div>"#);
        assert_eq!(out, "<div\n\tid=\"a\"\n\tclass=\"b\"\n>x</div>\n");
    }

    #[test]
    fn syntax_errors_disable_formatting() {
        let ast = Ast::parse(b"<div", Language::Html);
        assert!(ast.has_syntax_errors);
        assert!(format(&ast).is_err());
    }

    #[test]
    fn format_is_idempotent() {
        let once = fmt(b"<div>\n<p   class=\"a\"  >x</p></div>");
        let ast2 = Ast::parse(once.as_bytes(), Language::Html);
        let twice = format(&ast2).expect("formattable");
        assert_eq!(once, twice);
    }

    #[test]
    fn blank_lines_between_top_level_nodes_collapse_to_one() {
        let out = fmt(b"<!doctype html>\n\n\n\n<html lang=\"en\"></html>");
        assert_eq!(out, "<!DOCTYPE html>\n\n<html lang=\"en\"></html>\n");
    }

    #[test]
    fn single_newline_between_top_level_nodes_stays_single() {
        let out = fmt(b"<!doctype html>\n<html lang=\"en\"></html>");
        assert_eq!(out, "<!DOCTYPE html>\n<html lang=\"en\"></html>\n");
    }
}
