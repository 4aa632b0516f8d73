//! C4: the static element catalog (spec.md §4.3).
//!
//! A compile-time table, keyed by [`ElementKind`], giving each known HTML
//! element its baseline content [`crate::model::Model`], attribute
//! validation mode, content-model shape, and a human-readable description
//! for IDE hover. Element-name lookup is a `phf` perfect-hash map, the same
//! technique the pack's `renato-zannon-html5ever` example uses for its
//! string-interned tag tables.
//!
//! The table below covers a representative, extensible majority of HTML5
//! (document metadata, sectioning, grouping, text-level semantics, forms,
//! tables, embedded content, scripting, and the deprecated elements
//! spec.md §4.4 calls out by name) rather than the full ~110-element set;
//! see `DESIGN.md` for the scope note. Adding an element is one more row in
//! the `elements!` invocation below.

use phf::phf_map;

use crate::attributes::Attributes;
use crate::model::{Categories, Category, Content, Extra, Model};

/// Default content acceptance derived from an element's own categories:
/// flow containers accept flow (which subsumes phrasing/text), pure
/// phrasing containers accept phrasing and text only, everything else
/// accepts nothing by default (spec.md §4.3). This is only a default —
/// an element's own category membership (what it *is*) and what it
/// *accepts as content* are different questions that happen to coincide
/// for ordinary flow/phrasing elements but diverge for elements like
/// `<li>` or `<td>`, which aren't flow content themselves yet plainly
/// accept it. Catalog rows for which they diverge set `accepts`
/// explicitly, overriding this derivation. `ContentSpec::Custom`/
/// `Anything` entries ignore the resulting `content` for element
/// children (the validator bypasses the check directly) but still rely
/// on it for the bare text-child check, since that check runs
/// unconditionally regardless of `ContentSpec`.
fn baseline_content_for(categories: Categories) -> Content {
    if categories.has(Category::Flow) {
        Content::Flow | Content::Phrasing | Content::Text
    } else if categories.has(Category::Phrasing) {
        Content::Phrasing | Content::Text
    } else {
        Content::NONE
    }
}

/// Categories a parent unconditionally refuses as children, and the
/// runtime `extra` facts it refuses in descendants (spec.md §4.3,
/// `meta.content_reject` / `meta.extra_reject`).
#[derive(Clone, Copy, Debug, Default)]
pub struct Meta {
    /// The widest set of categories this element could ever report (used
    /// to drive completions without running attribute validation).
    pub categories_superset: Categories,
    /// Categories rejected as children regardless of the transparent
    /// content model.
    pub content_reject: Categories,
    /// Extra facts (e.g. `tabindex` presence) forbidden anywhere in the
    /// subtree.
    pub extra_reject: Extra,
}

/// A fixed child/descendant exception list layered on top of the baseline
/// content model (spec.md §4.3, `content: simple { ... }`).
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleContent {
    /// Child element kinds always accepted, overriding the baseline model.
    pub extra_children: &'static [ElementKind],
    /// Child element kinds always rejected, overriding the baseline model.
    pub forbidden_children: &'static [ElementKind],
    /// Element kinds forbidden anywhere in the subtree (not just direct
    /// children).
    pub forbidden_descendants: &'static [ElementKind],
    /// Runtime `extra` facts forbidden anywhere in the subtree.
    pub forbidden_descendants_extra: Extra,
}

/// How an element's content model is checked (spec.md §4.3, `content`).
#[derive(Clone, Copy, Debug)]
pub enum ContentSpec {
    /// Use the baseline model only.
    Model,
    /// No child restrictions at all (e.g. `<script>`, `<template>`).
    Anything,
    /// Baseline model plus a fixed exception list.
    Simple(SimpleContent),
    /// A bespoke validator/completer pair lives in `validator`/`ide`,
    /// keyed off this element's kind (e.g. `<select>`/`<option>`).
    Custom,
}

/// One row of the element catalog.
#[derive(Clone, Copy, Debug)]
pub struct ElementInfo {
    /// The element kind this entry describes.
    pub kind: ElementKind,
    /// Baseline `{categories, content, extra}` before attribute-driven
    /// widening/narrowing.
    pub baseline: Model,
    pub meta: Meta,
    /// How this element's attributes are validated.
    pub attributes: Attributes,
    /// How this element's content is validated.
    pub content: ContentSpec,
    /// Markdown-formatted description, surfaced by `ide::description`.
    pub desc: &'static str,
    /// Short reasons keyed by category, used in `invalid_nesting`
    /// diagnostics ("`<a>` with `href` is interactive").
    pub reasons: &'static [(Category, &'static str)],
    /// True for elements with no closing tag and no content (`<br>`,
    /// `<img>`, ...).
    pub is_void: bool,
}

macro_rules! elements {
    ($(
        $name:literal => $variant:ident {
            categories: [$($cat:ident),* $(,)?],
            content: $content_spec:expr,
            attrs: $attrs:expr,
            void: $void:literal,
            desc: $desc:literal,
            $(accepts: $accepts:expr,)?
            $(content_reject: $content_reject:expr,)?
            $(extra_reject: $extra_reject:expr,)?
            $(reasons: [$(($rcat:ident, $rtext:literal)),* $(,)?],)?
        }
    ),* $(,)?) => {
        /// Which of the known HTML elements a node is (spec.md §3, "one of
        /// ~110 known element kinds").
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ElementKind {
            $($variant),*
        }

        impl ElementKind {
            /// The lowercase tag name this kind was matched from.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $( ElementKind::$variant => $name, )*
                }
            }
        }

        /// Case-sensitive (already-lowercased by the caller) tag name to
        /// element kind. Tag names are matched case-insensitively against
        /// this table by lowercasing first (spec.md §4.2).
        static NAME_TO_KIND: phf::Map<&'static str, ElementKind> = phf_map! {
            $( $name => ElementKind::$variant, )*
        };

        /// Every known element kind, in catalog order. Used to drive
        /// content completions (spec.md §4.6) without a separate registry.
        pub static ALL: &[ElementKind] = &[$(ElementKind::$variant),*];

        /// Full catalog entry for a given kind.
        #[must_use]
        pub fn info(kind: ElementKind) -> ElementInfo {
            match kind {
                $(
                    ElementKind::$variant => {
                        let categories = Categories::from_fields(&[$(Category::$cat),*]);
                        #[allow(unused_mut)]
                        let mut content = baseline_content_for(categories);
                        $( content = $accepts; )?
                        #[allow(unused_mut)]
                        let mut content_reject = Categories::NONE;
                        $( content_reject = $content_reject; )?
                        #[allow(unused_mut)]
                        let mut extra_reject = Extra::NONE;
                        $( extra_reject = $extra_reject; )?
                        ElementInfo {
                            kind: ElementKind::$variant,
                            baseline: Model { categories, content, extra: Extra::NONE },
                            meta: Meta { categories_superset: categories, content_reject, extra_reject },
                            attributes: $attrs,
                            content: $content_spec,
                            desc: $desc,
                            reasons: &[$($(( Category::$rcat, $rtext )),*)?],
                            is_void: $void,
                        }
                    }
                )*
            }
        }
    };
}

/// Look up an element kind by its (already-lowercased) tag name.
#[must_use]
pub fn lookup(name: &[u8]) -> Option<ElementKind> {
    // Element names are ASCII; a stack buffer avoids allocating for the
    // lowercase copy on the hot path.
    let mut buf = [0u8; 32];
    if name.len() > buf.len() {
        return None;
    }
    for (i, &b) in name.iter().enumerate() {
        buf[i] = b.to_ascii_lowercase();
    }
    let lowered = std::str::from_utf8(&buf[..name.len()]).ok()?;
    NAME_TO_KIND.get(lowered).copied()
}

const TABLE_CONTENT: ContentSpec = ContentSpec::Simple(SimpleContent {
    extra_children: &[ElementKind::Caption, ElementKind::Colgroup, ElementKind::Thead, ElementKind::Tbody, ElementKind::Tfoot, ElementKind::Tr],
    forbidden_children: &[],
    forbidden_descendants: &[],
    forbidden_descendants_extra: Extra::NONE,
});

elements! {
    "html" => Html {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Head, ElementKind::Body], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["lang"]),
        void: false,
        desc: "The root element of an HTML document.",
    },
    "head" => Head {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Title, ElementKind::Base, ElementKind::Link, ElementKind::Meta, ElementKind::Style, ElementKind::Script, ElementKind::Noscript, ElementKind::Template], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Container for document metadata.",
    },
    "title" => Title {
        categories: [Metadata],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The document's title, shown in the browser chrome.",
    },
    "base" => Base {
        categories: [Metadata],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["href", "target"]),
        void: true,
        desc: "Sets the base URL for relative links in the document.",
    },
    "link" => Link {
        categories: [Metadata],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["href", "rel", "type", "media", "crossorigin", "as"]),
        void: true,
        desc: "A link to an external resource (stylesheet, icon, ...).",
    },
    "meta" => Meta_ {
        categories: [Metadata],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["name", "content", "charset", "http-equiv"]),
        void: true,
        desc: "Document-level metadata (charset, viewport, ...).",
    },
    "style" => Style {
        categories: [Metadata],
        content: ContentSpec::Anything,
        attrs: Attributes::Static(&["media"]),
        void: false,
        desc: "Embedded CSS.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "body" => Body {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Body], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The document's content.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "article" => Article {
        categories: [Flow, Sectioning],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A self-contained composition (a forum post, article, widget).",
    },
    "section" => Section {
        categories: [Flow, Sectioning],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A generic standalone section of a document.",
    },
    "nav" => Nav {
        categories: [Flow, Sectioning],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section of navigation links.",
    },
    "aside" => Aside {
        categories: [Flow, Sectioning],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Content tangentially related to the content around it.",
    },
    "h1" => H1 {
        categories: [Flow, Heading],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section heading, level 1.",
    },
    "h2" => H2 {
        categories: [Flow, Heading],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section heading, level 2.",
    },
    "h3" => H3 {
        categories: [Flow, Heading],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section heading, level 3.",
    },
    "h4" => H4 {
        categories: [Flow, Heading],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section heading, level 4.",
    },
    "h5" => H5 {
        categories: [Flow, Heading],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section heading, level 5.",
    },
    "h6" => H6 {
        categories: [Flow, Heading],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A section heading, level 6.",
    },
    "header" => Header {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[], forbidden_children: &[ElementKind::Header, ElementKind::Footer], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Introductory content for its nearest sectioning ancestor.",
    },
    "footer" => Footer {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[], forbidden_children: &[ElementKind::Header, ElementKind::Footer], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Footer content for its nearest sectioning ancestor.",
    },
    "address" => Address {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[], forbidden_children: &[], forbidden_descendants: &[ElementKind::Header, ElementKind::Footer], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Contact information for its nearest article/body ancestor.",
    },
    "p" => P {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A paragraph.",
    },
    "hr" => Hr {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: true,
        desc: "A thematic break between paragraph-level content.",
    },
    "pre" => Pre {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Preformatted text; whitespace is significant.",
    },
    "blockquote" => Blockquote {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["cite"]),
        void: false,
        desc: "An extended quotation.",
    },
    "ol" => Ol {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Li], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["reversed", "start", "type"]),
        void: false,
        desc: "An ordered list.",
    },
    "ul" => Ul {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Li], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "An unordered list.",
    },
    "li" => Li {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Li], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["value"]),
        void: false,
        desc: "A list item.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "dl" => Dl {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Dt, ElementKind::Dd, ElementKind::Div], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A description list.",
    },
    "dt" => Dt {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Dt, ElementKind::Dd], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A term in a description list.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "dd" => Dd {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Dt, ElementKind::Dd], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A description in a description list.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "figure" => Figure {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Figcaption], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Self-contained content, optionally with a caption.",
    },
    "figcaption" => Figcaption {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Figcaption], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A caption for its parent `<figure>`.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "main" => Main {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The dominant content of the document. Strict mode requires it nest only under html/body/div/form.",
    },
    "div" => Div {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A generic flow container with no semantic meaning.",
    },
    "a" => A {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Dynamic(crate::attributes::validate_a),
        void: false,
        desc: "A hyperlink. Becomes interactive when it has an `href` attribute.",
        // Transparent content model, but no interactive descendant and no
        // descendant with `tabindex` specified (WHATWG "a" content model).
        content_reject: Categories::Interactive,
        extra_reject: Extra::Tabindex,
        reasons: [(Interactive, "`<a>` with `href` is interactive")],
    },
    "em" => Em {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Stress emphasis.",
    },
    "strong" => Strong {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Strong importance.",
    },
    "small" => Small {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Side comments, fine print.",
    },
    "s" => S {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Content no longer accurate or relevant.",
    },
    "cite" => Cite {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The title of a cited work.",
    },
    "q" => Q {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["cite"]),
        void: false,
        desc: "An inline quotation.",
    },
    "dfn" => Dfn {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The defining instance of a term.",
    },
    "abbr" => Abbr {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "An abbreviation or acronym.",
    },
    "code" => Code {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A fragment of computer code.",
    },
    "var" => Var {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A variable, in a mathematical expression or programming context.",
    },
    "samp" => Samp {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Sample output from a program.",
    },
    "kbd" => Kbd {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "User input, typically keyboard input.",
    },
    "sub" => Sub {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Subscript text.",
    },
    "sup" => Sup {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Superscript text.",
    },
    "i" => I {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Text offset from its surroundings without conveying importance.",
    },
    "b" => B {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Text stylistically offset without conveying importance.",
    },
    "u" => U {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Text with an unarticulated, non-textual annotation.",
    },
    "mark" => Mark {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Text highlighted for reference purposes.",
    },
    "span" => Span_ {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A generic phrasing container with no semantic meaning.",
    },
    "br" => Br {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: true,
        desc: "A line break.",
    },
    "wbr" => Wbr {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: true,
        desc: "A line break opportunity.",
    },
    "ins" => Ins {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["cite", "datetime"]),
        void: false,
        desc: "An insertion to the document.",
    },
    "del" => Del {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["cite", "datetime"]),
        void: false,
        desc: "A deletion from the document.",
    },
    "picture" => Picture {
        categories: [Flow, Phrasing],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Source, ElementKind::Img], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A container offering multiple image sources to the UA.",
    },
    "source" => Source {
        categories: [],
        content: ContentSpec::Model,
        attrs: Attributes::Manual,
        void: true,
        desc: "A media or image source, validated by its picture/audio/video parent.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "img" => Img {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Dynamic(crate::attributes::validate_img),
        void: true,
        desc: "An image. Becomes interactive when it has a `usemap` attribute.",
        reasons: [(Interactive, "`<img>` with `usemap` is interactive")],
    },
    "iframe" => Iframe {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["src", "srcdoc", "name", "sandbox", "allow", "width", "height", "loading"]),
        void: false,
        desc: "A nested browsing context.",
    },
    "embed" => Embed {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["src", "type", "width", "height"]),
        void: true,
        desc: "An integration point for external content or a plugin.",
    },
    "object" => Object {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Param], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["data", "type", "width", "height", "usemap"]),
        void: false,
        desc: "An external resource treated as an image, nested context, or plugin.",
    },
    "param" => Param {
        categories: [],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["name", "value"]),
        void: true,
        desc: "A parameter for its parent `<object>`.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "video" => Video {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Source, ElementKind::Track], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["src", "poster", "controls", "autoplay", "loop", "muted", "width", "height"]),
        void: false,
        desc: "A video player.",
    },
    "audio" => Audio {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Source, ElementKind::Track], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["src", "controls", "autoplay", "loop", "muted"]),
        void: false,
        desc: "An audio player.",
    },
    "track" => Track {
        categories: [],
        content: ContentSpec::Model,
        attrs: Attributes::Manual,
        void: true,
        desc: "Timed text for its parent audio/video, validated by that parent.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "map" => Map_ {
        categories: [Flow, Phrasing],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Area], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["name"]),
        void: false,
        desc: "A client-side image map.",
    },
    "area" => Area {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["shape", "coords", "href", "alt", "target"]),
        void: true,
        desc: "A clickable region inside a `<map>`.",
    },
    "table" => Table {
        categories: [Flow],
        content: TABLE_CONTENT,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Tabular data.",
    },
    "caption" => Caption {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Caption], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A table's caption.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "colgroup" => Colgroup {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Col], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["span"]),
        void: false,
        desc: "A group of columns in a table.",
    },
    "col" => Col {
        categories: [],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["span"]),
        void: true,
        desc: "A column in a `<colgroup>`.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "thead" => Thead {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Tr], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The header rows of a table.",
    },
    "tbody" => Tbody {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Tr], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The body rows of a table.",
    },
    "tfoot" => Tfoot {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Tr], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "The footer rows of a table.",
    },
    "tr" => Tr {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Td, ElementKind::Th], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A table row.",
    },
    "td" => Td {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Td, ElementKind::Th], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["colspan", "rowspan", "headers"]),
        void: false,
        desc: "A table data cell.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "th" => Th {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Td, ElementKind::Th], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["colspan", "rowspan", "headers", "scope"]),
        void: false,
        desc: "A table header cell.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "form" => Form {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["action", "method", "enctype", "target", "novalidate", "autocomplete"]),
        void: false,
        desc: "A user-submittable form.",
    },
    "label" => Label {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["for"]),
        void: false,
        desc: "A caption for a form control.",
    },
    "input" => Input {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Model,
        attrs: Attributes::Dynamic(crate::attributes::validate_input),
        void: true,
        desc: "A form control whose behavior depends on its `type`.",
    },
    "button" => Button {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["type", "name", "value", "disabled", "form", "autofocus"]),
        void: false,
        desc: "A clickable button.",
    },
    "select" => Select {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Custom,
        attrs: Attributes::Static(&["name", "multiple", "size", "disabled", "required", "autofocus"]),
        void: false,
        desc: "A dropdown of options.",
    },
    "datalist" => Datalist {
        categories: [Flow, Phrasing],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Option_], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A set of predefined options for an `<input>`.",
    },
    "optgroup" => Optgroup {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Option_], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Manual,
        void: false,
        desc: "A group of options, validated by its `<select>` parent.",
    },
    "option" => Option_ {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Option_], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["value", "selected", "disabled", "label"]),
        void: false,
        desc: "One selectable option.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "textarea" => Textarea {
        categories: [Flow, Phrasing, Interactive],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["name", "rows", "cols", "placeholder", "required", "disabled", "readonly", "maxlength"]),
        void: false,
        desc: "A multi-line plain-text form control.",
    },
    "output" => Output {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["for", "name"]),
        void: false,
        desc: "The result of a calculation performed by a script.",
    },
    "progress" => Progress {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["value", "max"]),
        void: false,
        desc: "The completion progress of a task.",
    },
    "meter" => Meter {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["value", "min", "max", "low", "high", "optimum"]),
        void: false,
        desc: "A scalar measurement within a known range.",
    },
    "fieldset" => Fieldset {
        categories: [Flow],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Legend], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&["disabled", "name", "form"]),
        void: false,
        desc: "A group of form controls.",
    },
    "legend" => Legend {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Legend], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "A caption for its parent `<fieldset>`.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "script" => Script {
        categories: [Metadata, Flow, Phrasing],
        content: ContentSpec::Anything,
        attrs: Attributes::Static(&["src", "type", "async", "defer", "crossorigin", "integrity", "nomodule"]),
        void: false,
        desc: "Embedded or linked script, not executed by this tool.",
    },
    "noscript" => Noscript {
        categories: [Metadata, Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Content shown when scripting is disabled.",
    },
    "template" => Template {
        categories: [Metadata, Flow, Phrasing],
        content: ContentSpec::Anything,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Inert content cloned by script at runtime.",
    },
    "canvas" => Canvas {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["width", "height"]),
        void: false,
        desc: "A bitmap area for scripted rendering.",
    },
    "ruby" => Ruby {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Ruby annotations for East Asian typography.",
    },
    "rt" => Rt {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Rt, ElementKind::Rp], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Ruby annotation text.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "rp" => Rp {
        categories: [],
        content: ContentSpec::Simple(SimpleContent { extra_children: &[ElementKind::Rt, ElementKind::Rp], forbidden_children: &[], forbidden_descendants: &[], forbidden_descendants_extra: Extra::NONE }),
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Fallback punctuation for ruby annotations.",
        accepts: Content::Flow | Content::Phrasing | Content::Text,
    },
    "time" => Time {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["datetime"]),
        void: false,
        desc: "A machine-readable date or time.",
    },
    "data" => Data_ {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["value"]),
        void: false,
        desc: "A machine-readable translation of its content.",
    },
    "bdi" => Bdi {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Text isolated from its surroundings for bidirectional formatting.",
    },
    "bdo" => Bdo {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["dir"]),
        void: false,
        desc: "Explicit text directionality override.",
    },
    "applet" => Applet {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Deprecated: a Java applet. Use `<object>` instead.",
    },
    "center" => Center {
        categories: [Flow],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Deprecated: centered content. Use CSS instead.",
    },
    "font" => Font {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&["color", "face", "size"]),
        void: false,
        desc: "Deprecated: font styling. Use CSS instead.",
    },
    "nobr" => Nobr {
        categories: [Flow, Phrasing],
        content: ContentSpec::Model,
        attrs: Attributes::Static(&[]),
        void: false,
        desc: "Deprecated: prevents line wrapping. Use CSS `white-space` instead.",
    },
}

/// Element kinds spec.md §4.4 calls out by name as "deprecated and
/// unsupported" in strict mode.
#[must_use]
pub fn is_deprecated(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Applet | ElementKind::Center | ElementKind::Font | ElementKind::Nobr
    )
}

/// Element kinds that never have content or a closing tag (spec.md
/// GLOSSARY, "Void element").
#[must_use]
pub fn is_void(kind: ElementKind) -> bool {
    info(kind).is_void
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup(b"DIV"), Some(ElementKind::Div));
        assert_eq!(lookup(b"Div"), Some(ElementKind::Div));
        assert_eq!(lookup(b"div"), Some(ElementKind::Div));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(lookup(b"my-widget"), None);
    }

    #[test]
    fn br_is_void() {
        assert!(is_void(ElementKind::Br));
        assert!(!is_void(ElementKind::Div));
    }

    #[test]
    fn deprecated_elements_are_flagged() {
        assert!(is_deprecated(ElementKind::Center));
        assert!(!is_deprecated(ElementKind::Div));
    }

    #[test]
    fn a_is_dynamic_and_div_is_static() {
        assert!(matches!(info(ElementKind::A).attributes, Attributes::Dynamic(_)));
        assert!(matches!(info(ElementKind::Div).attributes, Attributes::Static(_)));
    }
}
