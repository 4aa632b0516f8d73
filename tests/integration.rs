//! End-to-end tests spanning parse, validate and format together, the way
//! a host embedding this crate actually calls it: one `Ast::parse`, then
//! read off `diagnostics`/`syntax_errors`, then (optionally) `format`.

use htmlcheck::{Ast, DiagnosticKind, Language};
use pretty_assertions::assert_eq;

#[test]
fn well_formed_document_parses_clean_and_formats_idempotently() {
    let source = b"<!doctype html>\n<html>\n\t<body>\n\t\t<p>hello</p>\n\t</body>\n</html>\n";
    let ast = Ast::parse(source, Language::Html);
    assert!(!ast.has_syntax_errors);
    assert!(ast.diagnostics.is_empty());

    let once = htmlcheck::format(&ast).expect("well-formed document is formattable");
    let reparsed = Ast::parse(once.as_bytes(), Language::Html);
    let twice = htmlcheck::format(&reparsed).expect("formatted output is itself formattable");
    assert_eq!(once, twice);
}

#[test]
fn unclosed_elements_are_diagnosed_and_still_formattable() {
    let ast = Ast::parse(b"<ul>\n<li>One\n<li>Two\n</ul>", Language::Html);
    assert!(!ast.has_syntax_errors);
    let kinds: Vec<_> = ast.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::MissingEndTag, DiagnosticKind::MissingEndTag]);

    assert!(htmlcheck::format(&ast).is_ok());
}

#[test]
fn duplicate_attribute_points_at_both_occurrences() {
    let ast = Ast::parse(br#"<div id="a" id="b">x</div>"#, Language::Html);
    let diag = ast
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::DuplicateAttributeName)
        .expect("expected a duplicate_attribute_name diagnostic");
    let secondary = diag.secondary.expect("duplicate_attribute_name carries a secondary span");
    assert_eq!(diag.main_location.slice(ast.source), b"id");
    assert_eq!(secondary.slice(ast.source), b"id");
    assert!(secondary.start < diag.main_location.start);
}

#[test]
fn tokenizer_syntax_errors_disable_formatting() {
    let ast = Ast::parse(b"<div", Language::Html);
    assert!(ast.has_syntax_errors);
    assert!(htmlcheck::format(&ast).is_err());
}
