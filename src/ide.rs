//! C7: editor-facing queries over a parsed [`Ast`] (spec.md §4.6):
//! locating the node under the cursor, completions, and hover text.

use crate::ast::{Ast, NodeKind};
use crate::attributes::{self, Attributes, Rule};
use crate::elements::{self, ContentSpec, ElementKind};
use crate::span::Span;
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// One completion candidate: the text to insert and a short description
/// for the editor to show alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub desc: &'static str,
}

/// `findNodeTagsIdx(offset)` (spec.md §4.6): DFS over the tree, descending
/// into `first_child` while `offset` lies strictly within a node's
/// content region, otherwise advancing to `next`.
#[must_use]
pub fn find_node_tags_idx(ast: &Ast<'_>, offset: u32) -> u32 {
    let mut idx = ast.nodes[0].first_child_idx;
    while idx != 0 {
        let node = &ast.nodes[idx as usize];
        if node.open.contains(offset) || node.close.contains(offset) {
            return idx;
        }
        let past_open = offset >= node.open.end;
        let before_close = node.close.is_empty() || offset < node.close.start;
        if past_open && before_close && node.first_child_idx != 0 {
            idx = node.first_child_idx;
            continue;
        }
        idx = node.next_idx;
    }
    0
}

/// `description(offset)` (spec.md §4.6): the static description for the
/// element or attribute name at `offset`, if any.
#[must_use]
pub fn description(ast: &Ast<'_>, offset: u32) -> Option<&'static str> {
    let idx = find_node_tags_idx(ast, offset);
    if idx == 0 {
        return None;
    }
    let node = &ast.nodes[idx as usize];
    let NodeKind::Element(kind) = node.kind else { return None };
    if node.name.contains(offset) {
        return Some(elements::info(kind).desc);
    }
    if !node.open.contains(offset) {
        return None;
    }
    for (name_span, _) in rescan_tag_attrs(ast, node) {
        if name_span.contains(offset) {
            let name = name_span.slice(ast.source);
            return attributes::resolve_rule(kind, name).map(rule_desc);
        }
    }
    None
}

fn rule_desc(rule: Rule) -> &'static str {
    match rule {
        Rule::Manual => "Validated by this element's container.",
        Rule::Bool => "Boolean attribute: presence alone turns it on.",
        Rule::Any => "Free-form value.",
        Rule::NotEmpty => "A non-empty value is required.",
        Rule::Id => "A unique identifier, with no whitespace.",
        Rule::Class => "A whitespace-separated list of class names.",
        Rule::Cors => "One of `anonymous` or `use-credentials`.",
        Rule::Mime => "A MIME type, e.g. `text/css`.",
        Rule::Lang => "A BCP 47 language tag, e.g. `en-US`.",
        Rule::NonNegInt { .. } => "A non-negative integer.",
        Rule::HashNameRef => "A reference to another element's `id`.",
        Rule::List { .. } => "One or more values from a fixed set.",
        Rule::Url { .. } => "A URL.",
        Rule::Custom => "Validated by a bespoke rule.",
    }
}

/// `completions(offset)` (spec.md §4.6): element completions just after an
/// opening `<`/`</`, attribute-name completions inside a tag, or
/// attribute-value completions inside a quoted value.
#[must_use]
pub fn completions(ast: &Ast<'_>, offset: u32) -> Vec<CompletionItem> {
    if let Some(parent_idx) = tag_open_context(ast, offset) {
        return content_completions(ast, parent_idx);
    }

    let idx = find_node_tags_idx(ast, offset);
    if idx == 0 {
        return Vec::new();
    }
    let node = &ast.nodes[idx as usize];
    let NodeKind::Element(kind) = node.kind else { return Vec::new() };
    if !node.open.contains(offset) {
        return Vec::new();
    }

    let attrs = rescan_tag_attrs(ast, node);
    for (name_span, value) in &attrs {
        if let Some(v) = value {
            if v.span.contains(offset) {
                let name = name_span.slice(ast.source);
                if let Some(rule) = attributes::resolve_rule(kind, name) {
                    return value_completions(rule);
                }
                return Vec::new();
            }
        }
    }
    attribute_completions(ast, kind, &attrs)
}

/// Detects `<` or `</` immediately (modulo whitespace/partial name bytes)
/// before `offset`, returning the node whose content the new tag would
/// join. A coarse heuristic over well-formed prefixes; good enough for an
/// editor's "what can I type here" query.
fn tag_open_context(ast: &Ast<'_>, offset: u32) -> Option<u32> {
    let src = ast.source;
    let mut i = offset as usize;
    if i == 0 || i > src.len() {
        return None;
    }
    while i > 0 {
        let b = src[i - 1];
        if b == b'<' {
            let lt = i - 1;
            return Some(find_node_tags_idx(ast, lt as u32));
        }
        if b == b'/' && i >= 2 && src[i - 2] == b'<' {
            let lt = i - 2;
            return Some(find_node_tags_idx(ast, lt as u32));
        }
        if !(b.is_ascii_alphanumeric() || b == b'-') {
            return None;
        }
        i -= 1;
    }
    None
}

fn content_completions(ast: &Ast<'_>, parent_idx: u32) -> Vec<CompletionItem> {
    let NodeKind::Element(parent_kind) = ast.nodes[parent_idx as usize].kind else {
        return Vec::new();
    };
    let parent_info = elements::info(parent_kind);
    let parent_model = ast.nodes[parent_idx as usize].model;

    if matches!(parent_info.content, ContentSpec::Anything | ContentSpec::Custom) {
        return elements::ALL.iter().map(|&k| item_for(k)).collect();
    }

    let mut items = Vec::new();
    for &kind in elements::ALL {
        let info = elements::info(kind);
        let mut allowed = parent_model.accepts(info.meta.categories_superset);
        if let ContentSpec::Simple(simple) = parent_info.content {
            if simple.forbidden_children.contains(&kind) {
                allowed = false;
            }
            if simple.extra_children.contains(&kind) {
                allowed = true;
            }
        }
        if allowed {
            items.push(item_for(kind));
        }
    }
    items
}

fn item_for(kind: ElementKind) -> CompletionItem {
    CompletionItem {
        label: kind.name().to_string(),
        desc: elements::info(kind).desc,
    }
}

fn attribute_completions(
    ast: &Ast<'_>,
    kind: ElementKind,
    present: &[(Span, Option<crate::token::AttrValue>)],
) -> Vec<CompletionItem> {
    let is_present = |name: &str| present.iter().any(|(s, _)| s.slice(ast.source).eq_ignore_ascii_case(name.as_bytes()));

    let mut items = Vec::new();
    if let Attributes::Static(names) = elements::info(kind).attributes {
        for &name in names {
            if !is_present(name) {
                items.push(CompletionItem {
                    label: name.to_string(),
                    desc: "Element-specific attribute.",
                });
            }
        }
    }
    for (&name, _) in &attributes::GLOBAL_ATTRS {
        if !is_present(name) {
            items.push(CompletionItem {
                label: name.to_string(),
                desc: "Global attribute.",
            });
        }
    }
    if !is_present("data-") {
        items.push(CompletionItem {
            label: "data-".to_string(),
            desc: "Custom data attribute.",
        });
    }
    items
}

fn value_completions(rule: Rule) -> Vec<CompletionItem> {
    match rule {
        Rule::Cors => vec![
            CompletionItem { label: "anonymous".to_string(), desc: "No credentials sent." },
            CompletionItem { label: "use-credentials".to_string(), desc: "Credentials sent." },
        ],
        Rule::List { set, .. } => set
            .iter()
            .map(|s| CompletionItem { label: (*s).to_string(), desc: "Enumerated value." })
            .collect(),
        Rule::Bool => vec![],
        _ => vec![],
    }
}

/// Re-tokenize a single already-parsed tag's bytes in `return_attrs` mode
/// to recover each attribute's name and value spans (absolute offsets).
/// The node's own `open` span is always a syntactically complete tag, so
/// this is a cheap, allocation-light way to answer per-attribute queries
/// without widening [`crate::ast::Node`] to carry an attribute list.
pub(crate) fn rescan_tag_attrs(ast: &Ast<'_>, node: &crate::ast::Node) -> Vec<(Span, Option<crate::token::AttrValue>)> {
    let base = node.open.start;
    let bytes = node.open.slice(ast.source);
    let mut tokenizer = Tokenizer::new_with_return_attrs(bytes);
    let mut out = Vec::new();
    while let Some(tok) = tokenizer.next() {
        if let Token::Attr { name, value } = tok {
            let shifted_name = Span::new(name.start + base, name.end + base);
            let shifted_value = value.map(|v| crate::token::AttrValue {
                span: Span::new(v.span.start + base, v.span.end + base),
                quote: v.quote,
            });
            out.push((shifted_name, shifted_value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Language;

    #[test]
    fn finds_node_by_offset_in_open_tag() {
        let ast = Ast::parse(b"<div><p>hi</p></div>", Language::Html);
        let idx = find_node_tags_idx(&ast, 2);
        assert!(idx != 0);
        assert!(matches!(ast.nodes[idx as usize].kind, NodeKind::Element(ElementKind::Div)));
    }

    #[test]
    fn description_resolves_element_and_attribute() {
        let ast = Ast::parse(br#"<a href="#">x</a>"#, Language::Html);
        let a_idx = ast.children(0).next().unwrap();
        let name_offset = ast.nodes[a_idx as usize].name.start;
        assert_eq!(description(&ast, name_offset), Some(elements::info(ElementKind::A).desc));
    }

    #[test]
    fn content_completions_exclude_forbidden_children() {
        let ast = Ast::parse(b"<ol></ol>", Language::Html);
        let ol_idx = ast.children(0).next().unwrap();
        // Position just inside "<ol>" but before "</ol>" isn't a tag-open
        // context, so drive content_completions directly.
        let items = content_completions(&ast, ol_idx);
        assert!(items.iter().any(|i| i.label == "li"));
        assert!(!items.iter().any(|i| i.label == "tr"));
    }

    #[test]
    fn attribute_completions_skip_present_names() {
        let ast = Ast::parse(br#"<a href="#">x</a>"#, Language::Html);
        let a_idx = ast.children(0).next().unwrap();
        let node = &ast.nodes[a_idx as usize];
        let attrs = rescan_tag_attrs(&ast, node);
        let items = attribute_completions(&ast, ElementKind::A, &attrs);
        assert!(!items.iter().any(|i| i.label == "href"));
        assert!(items.iter().any(|i| i.label == "id"));
    }
}
