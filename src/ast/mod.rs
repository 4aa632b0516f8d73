//! C3: the AST builder. Consumes a token stream, produces a flat,
//! index-addressed node array (spec.md §3, §4.2).

mod builder;

use crate::diagnostic::Diagnostic;
use crate::elements::ElementKind;
use crate::error::ParseErrorKind;
use crate::model::Model;
use crate::span::Span;

/// Which dialect governs tag-name resolution (spec.md §4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    /// Unknown names become `opaque`, with an error unless they look like
    /// a custom element (`-` in the name).
    Html,
    /// `html`, plus the template-directive names `extend`, `super`, `ctx`
    /// are recognized.
    SuperHtml,
    /// Every tag is `opaque`.
    Xml,
}

/// What a node is (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The single node at index 0.
    Root,
    Doctype,
    Comment,
    Text,
    /// A recognized HTML element.
    Element(ElementKind),
    /// A web component, foreign-content descendant, or (depending on
    /// `Language`) an unrecognized tag.
    Opaque,
}

/// One entry in the flat AST node array (spec.md §3).
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// Span of the opening tag/construct, from `<` to `>` inclusive.
    pub open: Span,
    /// Span of the closing tag, zero when unset (void, self-closing,
    /// text, comment, doctype, or an unclosed element).
    pub close: Span,
    pub parent_idx: u32,
    pub first_child_idx: u32,
    pub next_idx: u32,
    pub self_closing: bool,
    /// True once this node can accept no more children: an explicit
    /// matching end tag, a void/self-closing tag, or implicit closure by
    /// an ancestor's end tag (spec.md §4.2, "structural recovery"). Kept
    /// separate from `close` because implicit closure leaves no literal
    /// closing-tag span to record.
    pub closed: bool,
    /// Tag name span, for `Element`/`Opaque` nodes (zero otherwise); used
    /// by the formatter and IDE services without a second table lookup.
    pub name: Span,
    /// Runtime content model after attribute-driven widening/narrowing
    /// (spec.md §3, "Content model").
    pub model: Model,
}

impl Node {
    pub(crate) fn new_at(kind: NodeKind, parent_idx: u32) -> Self {
        Node {
            kind,
            open: Span::ZERO,
            close: Span::ZERO,
            parent_idx,
            first_child_idx: 0,
            next_idx: 0,
            self_closing: false,
            closed: false,
            name: Span::ZERO,
            model: Model::default(),
        }
    }

    /// True if this node still awaits a matching end tag.
    #[must_use]
    pub fn is_unclosed(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_) | NodeKind::Opaque) && !self.closed
    }
}

/// The result of parsing a document: the node array, accumulated
/// diagnostics, and the language it was parsed under (spec.md §3,
/// "Lifecycle").
#[derive(Debug)]
pub struct Ast<'s> {
    pub source: &'s [u8],
    pub nodes: Vec<Node>,
    /// Tokenizer-level parse errors (spec.md §7, class 1).
    pub syntax_errors: Vec<(ParseErrorKind, Span)>,
    /// Structural/attribute diagnostics (spec.md §7, class 2).
    pub diagnostics: Vec<Diagnostic>,
    pub language: Language,
    pub has_syntax_errors: bool,
}

impl<'s> Ast<'s> {
    /// Parse `source` under the given language. The only fatal condition
    /// (allocation failure) is not representable in safe Rust as a
    /// recoverable error, so this returns `Ast` directly rather than
    /// `Result<Ast, _>` (spec.md §7.3).
    #[must_use]
    pub fn parse(source: &'s [u8], language: Language) -> Self {
        builder::build(source, language)
    }

    /// Index of the root node. Always 0 (spec.md §3, "Invariants").
    pub const ROOT: u32 = 0;

    /// Find the node whose open or close tag contains `offset` (C7,
    /// `findNodeTagsIdx`).
    #[must_use]
    pub fn find_node_tags_idx(&self, offset: u32) -> u32 {
        crate::ide::find_node_tags_idx(self, offset)
    }

    fn node(&self, idx: u32) -> &Node {
        &self.nodes[idx as usize]
    }

    /// Iterate the direct children of `idx`, in document order.
    pub fn children(&self, idx: u32) -> impl Iterator<Item = u32> + '_ {
        let mut cur = self.node(idx).first_child_idx;
        std::iter::from_fn(move || {
            if cur == 0 {
                return None;
            }
            let this = cur;
            cur = self.node(this).next_idx;
            Some(this)
        })
    }

    /// Iterate `idx`'s ancestors, nearest first, not including `idx` but
    /// including the root.
    pub fn ancestors(&self, idx: u32) -> impl Iterator<Item = u32> + '_ {
        let mut cur = idx;
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            if cur == 0 {
                done = true;
                return None;
            }
            cur = self.node(cur).parent_idx;
            Some(cur)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_index_zero() {
        let ast = Ast::parse(b"<p>hi</p>", Language::Html);
        assert_eq!(ast.nodes[0].kind, NodeKind::Root);
        assert!(ast.nodes[0].open.is_empty());
    }
}
