//! C5: the validator. Attribute validation runs eagerly as the builder
//! materializes each start tag (spec.md §4.4, "Attribute validation");
//! content-model validation walks the finished tree once, only in strict
//! HTML mode with no syntax errors (spec.md §4.2, "Finalization").

use crate::ast::{Ast, Language, Node, NodeKind};
use crate::attributes::{self, AttrRef, Attributes, ListCount, Rule};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::elements::{self, ContentSpec, ElementKind};
use crate::model::{Categories, Category, Extra, Model};
use crate::span::Span;

/// One attribute as the builder sees it before deduplication: its name
/// span and optional value, in source order.
#[derive(Clone, Copy)]
pub struct RawAttr {
    pub name: Span,
    pub value: Option<crate::token::AttrValue>,
}

/// Eagerly validate one start tag's attributes (spec.md §4.4, points 1-4).
/// Returns the element's runtime [`Model`] (baseline, possibly widened or
/// narrowed by a `Dynamic` validator) and appends diagnostics for every
/// attribute-level problem found. `node_idx` is the not-yet-inserted
/// node's eventual index, used to anchor diagnostics.
pub fn validate_attributes(
    source: &[u8],
    kind: ElementKind,
    raw: &[RawAttr],
    node_idx: u32,
    diagnostics: &mut Vec<Diagnostic>,
) -> Model {
    let mut seen: Vec<(&[u8], Span)> = Vec::with_capacity(raw.len());
    let mut unique: Vec<RawAttr> = Vec::with_capacity(raw.len());

    for attr in raw {
        let name = attr.name.slice(source);
        if let Some(&(_, first_span)) = seen.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            diagnostics.push(
                Diagnostic::new(DiagnosticKind::DuplicateAttributeName, attr.name, node_idx)
                    .with_secondary(first_span),
            );
            continue;
        }
        seen.push((name, attr.name));
        unique.push(*attr);
    }

    for attr in &unique {
        let name = attr.name.slice(source);
        if attributes::is_data_attr(name) {
            continue;
        }
        match attributes::resolve_rule(kind, name) {
            None => {
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttr, attr.name, node_idx));
            }
            Some(rule) => {
                let value = attr.value.map(|v| v.span.slice(source));
                check_rule(rule, value, attr, node_idx, diagnostics);
            }
        }
    }

    let info = elements::info(kind);
    let mut model = match info.attributes {
        Attributes::Dynamic(validator) => {
            let refs: Vec<AttrRef<'_>> = unique
                .iter()
                .map(|a| AttrRef {
                    source,
                    name: a.name,
                    value: a.value,
                })
                .collect();
            let outcome = validator(&refs);
            if let Some(reason) = outcome.invalid_combination {
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::InvalidAttrCombination, unique.first().map(|a| a.name).unwrap_or(Span::ZERO), node_idx)
                        .with_reason(reason),
                );
            }
            outcome.model
        }
        _ => info.baseline,
    };
    // Runtime-visible regardless of how attributes are otherwise validated,
    // since `tabindex` is a global attribute and `meta.extra_reject` needs
    // to see it on any element, not just `Dynamic` ones.
    if unique.iter().any(|a| a.name.slice(source).eq_ignore_ascii_case(b"tabindex")) {
        model.extra = model.extra.merge(Extra::Tabindex);
    }
    model
}

fn check_rule(
    rule: Rule,
    value: Option<&[u8]>,
    attr: &RawAttr,
    node_idx: u32,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let span = attr.name;
    match rule {
        Rule::Manual | Rule::Any | Rule::Custom => {}
        Rule::Bool => {
            if value.is_some() {
                diagnostics.push(Diagnostic::new(DiagnosticKind::BooleanAttr, span, node_idx));
            }
        }
        Rule::NotEmpty => {
            if value.is_none_or_empty() {
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
            }
        }
        Rule::Id => {
            if value.is_none_or_empty() || value.unwrap().iter().any(u8::is_ascii_whitespace) {
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
            }
        }
        Rule::Class => {
            if let Some(v) = value {
                let mut seen: Vec<&[u8]> = Vec::new();
                for tok in v.split(u8::is_ascii_whitespace).filter(|t| !t.is_empty()) {
                    if seen.iter().any(|s| *s == tok) {
                        diagnostics.push(Diagnostic::new(DiagnosticKind::DuplicateClass, span, node_idx));
                    } else {
                        seen.push(tok);
                    }
                }
            }
        }
        Rule::Cors => {
            check_list(value, &["anonymous", "use-credentials"], ListCount::One, span, node_idx, diagnostics);
        }
        Rule::Mime => {
            if value.is_none_or_empty() || !value.unwrap().contains(&b'/') {
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
            }
        }
        Rule::Lang => {
            if let Some(v) = value {
                if let Some(rejection) = crate::langtag::validate(v) {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::InvalidAttrValue,
                            Span::new(attr.value.unwrap().span.start + rejection.offset, attr.value.unwrap().span.start + rejection.offset + rejection.length),
                            node_idx,
                        )
                        .with_reason(rejection.reason),
                    );
                }
            }
        }
        Rule::NonNegInt { min, max } => match value.and_then(|v| std::str::from_utf8(v).ok()).and_then(|s| s.parse::<i64>().ok()) {
            Some(n) if n >= min && n <= max => {}
            _ => diagnostics.push(Diagnostic::new(DiagnosticKind::IntOutOfBounds, span, node_idx)),
        },
        Rule::HashNameRef => {
            if value.is_none_or_empty() {
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
            }
        }
        Rule::List { set, count } => check_list(value, set, count, span, node_idx, diagnostics),
        Rule::Url { required } => {
            if required && value.is_none_or_empty() {
                diagnostics.push(Diagnostic::new(DiagnosticKind::MissingAttrValue, span, node_idx));
            }
        }
    }
}

fn check_list(
    value: Option<&[u8]>,
    set: &[&str],
    count: ListCount,
    span: Span,
    node_idx: u32,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(v) = value else {
        diagnostics.push(Diagnostic::new(DiagnosticKind::MissingAttrValue, span, node_idx));
        return;
    };
    let Ok(text) = std::str::from_utf8(v) else {
        diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
        return;
    };
    let in_set = |tok: &str| set.iter().any(|s| s.eq_ignore_ascii_case(tok));
    match count {
        ListCount::One => {
            if !in_set(text) {
                diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
            }
        }
        ListCount::Many => {
            for tok in text.split_ascii_whitespace() {
                if !in_set(tok) {
                    diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
                }
            }
        }
        ListCount::ManyUnique | ListCount::ManyUniqueComma => {
            let sep: fn(char) -> bool = if count == ListCount::ManyUniqueComma {
                |c: char| c == ','
            } else {
                |c: char| c.is_ascii_whitespace()
            };
            let mut seen: Vec<&str> = Vec::new();
            for tok in text.split(sep).map(str::trim).filter(|t| !t.is_empty()) {
                if !in_set(tok) {
                    diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidAttrValue, span, node_idx));
                } else if seen.contains(&tok) {
                    diagnostics.push(Diagnostic::new(DiagnosticKind::DuplicateClass, span, node_idx));
                } else {
                    seen.push(tok);
                }
            }
        }
    }
}

trait NoneOrEmpty {
    fn is_none_or_empty(&self) -> bool;
}

impl NoneOrEmpty for Option<&[u8]> {
    fn is_none_or_empty(&self) -> bool {
        self.map_or(true, <[u8]>::is_empty)
    }
}

/// Content-model validation (spec.md §4.4, "Content model validation").
/// Runs once over the finished tree; only called when `language == Html`
/// and `!has_syntax_errors` (spec.md §4.2, "Finalization").
pub fn validate_content(ast: &Ast<'_>, diagnostics: &mut Vec<Diagnostic>) {
    for idx in 0..ast.nodes.len() as u32 {
        let node = &ast.nodes[idx as usize];
        let NodeKind::Element(kind) = node.kind else {
            continue;
        };
        if elements::is_deprecated(kind) {
            diagnostics.push(Diagnostic::new(DiagnosticKind::DeprecatedAndUnsupported, node.open, idx));
        }
        if kind == ElementKind::Main {
            check_main_position(ast, idx, diagnostics);
        }
        validate_children(ast, idx, diagnostics);
    }
}

fn check_main_position(ast: &Ast<'_>, idx: u32, diagnostics: &mut Vec<Diagnostic>) {
    let allowed = |k: ElementKind| matches!(k, ElementKind::Html | ElementKind::Body | ElementKind::Div | ElementKind::Form);
    let parent_idx = ast.nodes[idx as usize].parent_idx;
    let ok = match ast.nodes[parent_idx as usize].kind {
        NodeKind::Element(k) => allowed(k),
        NodeKind::Root => true,
        _ => false,
    };
    if !ok {
        diagnostics.push(
            Diagnostic::new(DiagnosticKind::WrongPosition, ast.nodes[idx as usize].open, idx)
                .with_reason("`<main>` must nest directly under html/body/div/form"),
        );
    }
}

fn validate_children(ast: &Ast<'_>, parent_idx: u32, diagnostics: &mut Vec<Diagnostic>) {
    let NodeKind::Element(parent_kind) = ast.nodes[parent_idx as usize].kind else {
        return;
    };
    let info = elements::info(parent_kind);
    let parent_model = ast.nodes[parent_idx as usize].model;

    for child_idx in ast.children(parent_idx) {
        let child = &ast.nodes[child_idx as usize];
        match child.kind {
            NodeKind::Comment | NodeKind::Doctype => continue,
            NodeKind::Text => {
                if !parent_model.accepts(Categories::Flow | Categories::Phrasing | Categories::Text) {
                    diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidNesting, parent_aware_span(ast, parent_idx), parent_idx));
                }
                continue;
            }
            NodeKind::Opaque | NodeKind::Root => continue,
            NodeKind::Element(child_kind) => {
                if let ContentSpec::Simple(simple) = info.content {
                    if simple.extra_children.contains(&child_kind) {
                        continue;
                    }
                    if simple.forbidden_children.contains(&child_kind) {
                        diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidNesting, child.open, child_idx));
                        continue;
                    }
                }
                if matches!(info.content, ContentSpec::Anything | ContentSpec::Custom) {
                    continue;
                }
                model_rejects(ast, parent_idx, child_idx, diagnostics);
            }
        }
    }

    if let ContentSpec::Simple(simple) = info.content {
        if !simple.forbidden_descendants.is_empty() || !simple.forbidden_descendants_extra.is_empty() {
            check_descendants(ast, parent_idx, simple.forbidden_descendants, simple.forbidden_descendants_extra, diagnostics);
        }
    }
}

fn parent_aware_span(ast: &Ast<'_>, parent_idx: u32) -> Span {
    ast.nodes[parent_idx as usize].open
}

/// `modelRejects(parent, child)` (spec.md §4.4).
fn model_rejects(ast: &Ast<'_>, parent_idx: u32, child_idx: u32, diagnostics: &mut Vec<Diagnostic>) {
    let parent = &ast.nodes[parent_idx as usize];
    let child = &ast.nodes[child_idx as usize];
    let NodeKind::Element(parent_kind) = parent.kind else { return };
    let parent_info = elements::info(parent_kind);

    if !parent.model.accepts(child.model.categories) {
        let static_overlap = parent_info.baseline.accepts(child.model.categories);
        if !static_overlap {
            let reason = parent_info
                .reasons
                .iter()
                .find(|(cat, _)| child.model.categories.has(*cat))
                .map(|(_, text)| *text);
            diagnostics.push(push_reason(
                Diagnostic::new(DiagnosticKind::InvalidNesting, child.open, child_idx),
                reason,
            ));
        } else {
            // The parent's transparent content model has been narrowed by
            // an ancestor; walk up to find the first true rejector.
            let mut blame = parent_idx;
            for anc in ast.ancestors(parent_idx) {
                let NodeKind::Element(anc_kind) = ast.nodes[anc as usize].kind else { break };
                if !elements::info(anc_kind).baseline.accepts(child.model.categories) {
                    blame = anc;
                    break;
                }
            }
            diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidNesting, ast.nodes[blame as usize].open, child_idx));
        }
        return;
    }

    if parent_info.meta.content_reject.overlap(child.model.categories) {
        let reason = parent_info
            .reasons
            .iter()
            .find(|(cat, _)| child.model.categories.has(*cat))
            .map(|(_, text)| *text);
        diagnostics.push(push_reason(
            Diagnostic::new(DiagnosticKind::InvalidNesting, child.open, child_idx),
            reason,
        ));
        return;
    }

    if parent_info.meta.extra_reject.has(crate::model::ExtraField::Tabindex) && child.model.extra.has(crate::model::ExtraField::Tabindex) {
        diagnostics.push(
            Diagnostic::new(DiagnosticKind::InvalidNesting, child.open, child_idx)
                .with_reason("presence of tabindex attribute"),
        );
    }
}

fn push_reason(d: Diagnostic, reason: Option<&'static str>) -> Diagnostic {
    match reason {
        Some(r) => d.with_reason(r),
        None => d,
    }
}

fn check_descendants(
    ast: &Ast<'_>,
    root: u32,
    forbidden: &[ElementKind],
    forbidden_extra: crate::model::Extra,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut stack: Vec<u32> = ast.children(root).collect();
    while let Some(idx) = stack.pop() {
        let node = &ast.nodes[idx as usize];
        match node.kind {
            NodeKind::Opaque => continue,
            NodeKind::Element(kind) => {
                if forbidden.contains(&kind) {
                    diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidNesting, node.open, idx));
                }
                if !forbidden_extra.is_empty() && node.model.extra.overlap(forbidden_extra) {
                    diagnostics.push(Diagnostic::new(DiagnosticKind::InvalidNesting, node.open, idx));
                }
            }
            _ => {}
        }
        stack.extend(ast.children(idx));
    }
}

/// True when `language` disables strict content validation (spec.md §4.2,
/// "Finalization": syntax errors or a non-HTML language skip it).
#[must_use]
pub fn strict_validation_applies(language: Language, has_syntax_errors: bool) -> bool {
    language == Language::Html && !has_syntax_errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Ast;

    #[test]
    fn duplicate_attribute_name_points_at_first_occurrence() {
        let source = br#"<div id="a" id="b">x</div>"#;
        let ast = Ast::parse(source, Language::Html);
        let dup = ast
            .diagnostics
            .iter()
            .find(|d| d.kind == DiagnosticKind::DuplicateAttributeName)
            .expect("expected a duplicate_attribute_name diagnostic");
        assert!(dup.secondary.is_some());
    }

    #[test]
    fn deprecated_element_is_flagged() {
        let ast = Ast::parse(b"<center>x</center>", Language::Html);
        assert!(ast.diagnostics.iter().any(|d| d.kind == DiagnosticKind::DeprecatedAndUnsupported));
    }

    #[test]
    fn transparent_content_interactive_nesting_is_rejected() {
        let ast = Ast::parse(b"<a href='#'><button>x</button></a>", Language::Html);
        let found = ast.diagnostics.iter().find(|d| d.kind == DiagnosticKind::InvalidNesting);
        assert!(found.is_some());
        assert!(found.unwrap().reason.unwrap_or("").contains("interactive"));
    }
}
