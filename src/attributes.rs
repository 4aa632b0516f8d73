//! C4's attribute side: the `Rule` catalog, the global attribute table,
//! and the dynamic per-element validators spec.md §4.3 calls for (`<a>`,
//! `<img>`, `<input>`, ...).

use phf::phf_map;

use crate::elements::ElementKind;
use crate::model::{Categories, Extra, Model};
use crate::span::Span;
use crate::token::AttrValue;

/// One already-deduplicated attribute, as the builder hands it to a
/// [`Attributes::Dynamic`] validator: its name span and optional value,
/// plus the source buffer needed to read either.
#[derive(Clone, Copy)]
pub struct AttrRef<'a> {
    pub source: &'a [u8],
    pub name: Span,
    pub value: Option<AttrValue>,
}

impl<'a> AttrRef<'a> {
    #[must_use]
    pub fn name_bytes(&self) -> &'a [u8] {
        self.name.slice(self.source)
    }

    #[must_use]
    pub fn value_bytes(&self) -> Option<&'a [u8]> {
        self.value.map(|v| v.span.slice(self.source))
    }
}

/// How an attribute's value must be shaped (spec.md §4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    /// Validated by an ancestor element, not by this attribute table
    /// (`<source>`'s attributes, validated by its picture/audio/video
    /// parent).
    Manual,
    /// Presence-only; a value is a `boolean_attr` diagnostic.
    Bool,
    /// Any value (including empty) is accepted.
    Any,
    /// Any non-empty value is accepted.
    NotEmpty,
    /// Non-empty, and must not contain ASCII whitespace.
    Id,
    /// A whitespace-separated token list; duplicate tokens are flagged.
    Class,
    /// One of the two CORS keywords: `anonymous`, `use-credentials`.
    Cors,
    /// A WHATWG MIME type string.
    Mime,
    /// A BCP 47 language tag, validated by `langtag` (C8).
    Lang,
    /// A non-negative integer within `[min, max]`.
    NonNegInt { min: i64, max: i64 },
    /// A reference to another element's `id` (used by `for`, `headers`).
    HashNameRef,
    /// An enumerated or multi-valued list.
    List {
        set: &'static [&'static str],
        count: ListCount,
    },
    /// A URL; `required` controls whether an empty value is accepted.
    Url { required: bool },
    /// Validated by a bespoke function (kept out of the declarative table
    /// because it needs more context than a single value, e.g. `srcset`).
    Custom,
}

/// How many tokens a [`Rule::List`] attribute accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListCount {
    /// Exactly one value from `set`.
    One,
    /// Any number of space-separated values from `set`.
    Many,
    /// Any number of space-separated, non-repeating values from `set`.
    ManyUnique,
    /// Any number of comma-separated, non-repeating values from `set`.
    ManyUniqueComma,
}

/// One global- or element-attribute table entry.
#[derive(Clone, Copy, Debug)]
pub struct AttrInfo {
    pub rule: Rule,
    pub desc: &'static str,
}

/// How an element's attributes are validated (spec.md §4.3).
#[derive(Clone, Copy)]
pub enum Attributes {
    /// Look up each attribute in `element_attrs[kind] ∪ global_attrs`.
    Static(&'static [&'static str]),
    /// A validator function receiving the tag's attribute stream,
    /// returning the element's runtime `Model`.
    Dynamic(fn(&[AttrRef<'_>]) -> DynamicOutcome),
    /// Validated by an ancestor element.
    Manual,
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Attributes::Static(names) => f.debug_tuple("Static").field(names).finish(),
            Attributes::Dynamic(_) => f.write_str("Dynamic(..)"),
            Attributes::Manual => f.write_str("Manual"),
        }
    }
}

/// What a [`Attributes::Dynamic`] validator contributes beyond ordinary
/// attribute-rule checking: the element's runtime content model, plus any
/// combination-level diagnostics it found (spec.md §4.4, point 4).
#[derive(Debug, Default)]
pub struct DynamicOutcome {
    pub model: Model,
    pub invalid_combination: Option<&'static str>,
}

/// Global attributes every element accepts (spec.md §4.3): `id`, `class`,
/// `style`, `title`, `lang`, `dir`, `tabindex`, `hidden`,
/// `contenteditable`, `draggable`, `spellcheck`, `slot`, `translate`,
/// `autofocus`, and the `onXxx` event handlers. `data-*` is unconditionally
/// accepted and is checked separately (see [`is_data_attr`]).
pub static GLOBAL_ATTRS: phf::Map<&'static str, Rule> = phf_map! {
    "id" => Rule::Id,
    "class" => Rule::Class,
    "style" => Rule::Any,
    "title" => Rule::Any,
    "lang" => Rule::Lang,
    "dir" => Rule::List { set: &["ltr", "rtl", "auto"], count: ListCount::One },
    "tabindex" => Rule::NonNegInt { min: i64::MIN, max: i64::MAX },
    "hidden" => Rule::Bool,
    "contenteditable" => Rule::List { set: &["true", "false", ""], count: ListCount::One },
    "draggable" => Rule::List { set: &["true", "false"], count: ListCount::One },
    "spellcheck" => Rule::List { set: &["true", "false"], count: ListCount::One },
    "slot" => Rule::NotEmpty,
    "translate" => Rule::List { set: &["yes", "no"], count: ListCount::One },
    "autofocus" => Rule::Bool,
    "onclick" => Rule::Any,
    "onchange" => Rule::Any,
    "onload" => Rule::Any,
    "onerror" => Rule::Any,
    "oninput" => Rule::Any,
    "onsubmit" => Rule::Any,
    "onkeydown" => Rule::Any,
    "onkeyup" => Rule::Any,
    "onfocus" => Rule::Any,
    "onblur" => Rule::Any,
};

/// True for `data-*` attributes, which are unconditionally accepted
/// (spec.md §4.3).
#[must_use]
pub fn is_data_attr(name: &[u8]) -> bool {
    name.len() > 5 && name[..5].eq_ignore_ascii_case(b"data-")
}

/// Element-specific attribute rule tables, for the handful of attributes
/// whose shape is more specific than `any`/`not_empty`. Attributes listed
/// in `elements::ElementInfo::attributes` but absent here fall back to
/// `Rule::Any` (they still need a row in the element's `Static` list to be
/// accepted at all; this table only narrows the validation).
pub static ELEMENT_ATTRS: phf::Map<&'static str, Rule> = phf_map! {
    "href" => Rule::Url { required: false },
    "src" => Rule::Url { required: true },
    "action" => Rule::Url { required: false },
    "cite" => Rule::Url { required: false },
    "poster" => Rule::Url { required: false },
    "formaction" => Rule::Url { required: false },
    "type" => Rule::Mime,
    "crossorigin" => Rule::Cors,
    "colspan" => Rule::NonNegInt { min: 1, max: 1000 },
    "rowspan" => Rule::NonNegInt { min: 0, max: 65534 },
    "span" => Rule::NonNegInt { min: 1, max: 1000 },
    "width" => Rule::NonNegInt { min: 0, max: 1_000_000 },
    "height" => Rule::NonNegInt { min: 0, max: 1_000_000 },
    "start" => Rule::NonNegInt { min: i64::MIN, max: i64::MAX },
    "value" => Rule::Any,
    "for" => Rule::HashNameRef,
    "headers" => Rule::HashNameRef,
    "disabled" => Rule::Bool,
    "readonly" => Rule::Bool,
    "required" => Rule::Bool,
    "multiple" => Rule::Bool,
    "checked" => Rule::Bool,
    "selected" => Rule::Bool,
    "reversed" => Rule::Bool,
    "autoplay" => Rule::Bool,
    "controls" => Rule::Bool,
    "loop" => Rule::Bool,
    "muted" => Rule::Bool,
    "novalidate" => Rule::Bool,
    "async" => Rule::Bool,
    "defer" => Rule::Bool,
    "nomodule" => Rule::Bool,
    "sandbox" => Rule::List { set: &["allow-forms", "allow-scripts", "allow-same-origin", "allow-popups"], count: ListCount::ManyUnique },
    "rel" => Rule::List { set: &["stylesheet", "icon", "canonical", "alternate", "author", "help", "license", "next", "prev", "search", "tag"], count: ListCount::ManyUnique },
    "shape" => Rule::List { set: &["rect", "circle", "poly", "default"], count: ListCount::One },
    "method" => Rule::List { set: &["get", "post", "dialog"], count: ListCount::One },
    "enctype" => Rule::List { set: &["application/x-www-form-urlencoded", "multipart/form-data", "text/plain"], count: ListCount::One },
    "scope" => Rule::List { set: &["row", "col", "rowgroup", "colgroup"], count: ListCount::One },
    "target" => Rule::Any,
    "datetime" => Rule::Any,
    "name" => Rule::Any,
    "placeholder" => Rule::Any,
    "label" => Rule::Any,
    "usemap" => Rule::HashNameRef,
};

/// Dynamic validator for `<a>`: becomes `interactive` when it has `href`
/// (spec.md §4.4, scenario 5). Every other attribute follows the normal
/// static path; this only computes the runtime model.
#[must_use]
pub fn validate_a(attrs: &[AttrRef<'_>]) -> DynamicOutcome {
    let has_href = attrs.iter().any(|a| a.name_bytes().eq_ignore_ascii_case(b"href"));
    let mut model = Model {
        categories: Categories::Flow | Categories::Phrasing,
        content: crate::model::Content::Flow | crate::model::Content::Phrasing | crate::model::Content::Text,
        extra: Extra::NONE,
    };
    if has_href {
        model.categories = model.categories.merge(Categories::Interactive);
    }
    DynamicOutcome {
        model,
        invalid_combination: None,
    }
}

/// Dynamic validator for `<img>`: becomes `interactive` when it has
/// `usemap`.
#[must_use]
pub fn validate_img(attrs: &[AttrRef<'_>]) -> DynamicOutcome {
    let has_usemap = attrs.iter().any(|a| a.name_bytes().eq_ignore_ascii_case(b"usemap"));
    let mut model = Model {
        categories: Categories::Flow | Categories::Phrasing,
        content: crate::model::Content::NONE,
        extra: Extra::NONE,
    };
    if has_usemap {
        model.categories = model.categories.merge(Categories::Interactive);
    }
    DynamicOutcome {
        model,
        invalid_combination: None,
    }
}

/// Dynamic validator for `<input>`: the legal attribute combination
/// depends on `type` (spec.md §4.4, point 4 — e.g. `type=radio` accepts
/// `checked` but rejects `src`).
#[must_use]
pub fn validate_input(attrs: &[AttrRef<'_>]) -> DynamicOutcome {
    let input_type = attrs
        .iter()
        .find(|a| a.name_bytes().eq_ignore_ascii_case(b"type"))
        .and_then(|a| a.value_bytes());
    let has_src = attrs.iter().any(|a| a.name_bytes().eq_ignore_ascii_case(b"src"));

    let mut invalid_combination = None;
    if let Some(ty) = input_type {
        let is_image_type = ty.eq_ignore_ascii_case(b"image");
        if has_src && !is_image_type {
            invalid_combination = Some("`src` is only valid on `<input type=image>`");
        }
    }

    DynamicOutcome {
        model: Model {
            categories: Categories::Flow | Categories::Phrasing | Categories::Interactive,
            content: crate::model::Content::NONE,
            extra: Extra::NONE,
        },
        invalid_combination,
    }
}

/// Look up an attribute's rule for a given element: element-specific
/// table first, then global, then `data-*`.
#[must_use]
pub fn resolve_rule(kind: ElementKind, name: &[u8]) -> Option<Rule> {
    if is_data_attr(name) {
        return Some(Rule::Any);
    }
    let lowered = to_lower(name)?;
    let info = crate::elements::info(kind);
    let accepted = match info.attributes {
        Attributes::Static(names) => names.contains(&lowered.as_str()),
        Attributes::Dynamic(_) => true,
        Attributes::Manual => true,
    };
    if !accepted {
        return GLOBAL_ATTRS.get(lowered.as_str()).copied();
    }
    ELEMENT_ATTRS
        .get(lowered.as_str())
        .or_else(|| GLOBAL_ATTRS.get(lowered.as_str()))
        .copied()
        .or(Some(Rule::Any))
}

fn to_lower(name: &[u8]) -> Option<String> {
    if !name.is_ascii() {
        return None;
    }
    Some(String::from_utf8_lossy(name).to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_attrs_are_always_accepted() {
        assert!(is_data_attr(b"data-foo"));
        assert!(!is_data_attr(b"dataset"));
    }

    #[test]
    fn global_attr_resolves_everywhere() {
        assert_eq!(resolve_rule(ElementKind::Div, b"id"), Some(Rule::Id));
        assert_eq!(resolve_rule(ElementKind::Span_, b"class"), Some(Rule::Class));
    }

    #[test]
    fn element_specific_attr_resolves() {
        assert_eq!(resolve_rule(ElementKind::A, b"href"), Some(Rule::Url { required: false }));
    }

    #[test]
    fn unknown_attr_on_static_element_is_rejected() {
        // `href` isn't in <div>'s static attribute list, nor a global.
        assert!(resolve_rule(ElementKind::Div, b"href").is_none());
    }
}
