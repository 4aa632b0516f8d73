//! The tokenizer's output: a tagged union of token kinds (spec.md §3).

use crate::error::ParseErrorKind;
use crate::span::Span;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which of the four tag shapes a [`Token::Tag`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TagKind {
    /// `<name>`
    Start,
    /// `<name/>`
    StartSelf,
    /// `</name>`
    End,
    /// `</name/>` (malformed, but tokenized; `set_self_closing` on an end
    /// tag raises `EndTagWithTrailingSolidus`-shaped diagnostics upstream).
    EndSelf,
}

impl TagKind {
    /// True for `Start`/`StartSelf`.
    #[must_use]
    pub fn is_start(self) -> bool {
        matches!(self, TagKind::Start | TagKind::StartSelf)
    }

    /// True for `StartSelf`/`EndSelf`.
    #[must_use]
    pub fn is_self_closing(self) -> bool {
        matches!(self, TagKind::StartSelf | TagKind::EndSelf)
    }
}

/// The quoting style an attribute value was written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Quote {
    /// Unquoted attribute value.
    None,
    /// `'...'`
    Single,
    /// `"..."`
    Double,
}

/// An attribute value: its span (the value content only, quotes excluded)
/// and the quoting style it was written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttrValue {
    /// Span of the value content, excluding quote characters.
    pub span: Span,
    /// How the value was quoted.
    pub quote: Quote,
}

/// One token produced by [`crate::tokenizer::Tokenizer::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// `<!DOCTYPE ...>`. `span` covers the whole bracketed construct.
    Doctype {
        /// Span from `<` to `>` inclusive.
        span: Span,
        /// Span of the name, if one was given.
        name: Option<Span>,
        /// Any unparsed content between the name and `>` (public/system
        /// identifiers and the like). Opaque: not further decomposed.
        extra: Option<Span>,
    },
    /// A start or end tag. In the default (non-`return_attrs`) mode this is
    /// the only token emitted per tag; attributes are skipped over but
    /// still consumed from the byte stream.
    Tag {
        /// Which tag shape this is.
        kind: TagKind,
        /// Span from `<` to `>` inclusive.
        span: Span,
        /// Span of the tag name.
        name: Span,
    },
    /// Emitted only in `return_attrs` mode: the name of the tag currently
    /// being rescanned for attributes, before its `Attr` tokens.
    TagName {
        /// Span of the tag name.
        name: Span,
    },
    /// Emitted only in `return_attrs` mode, once per attribute, after a
    /// `TagName` and before the terminating `Tag` token.
    Attr {
        /// Span of the attribute name.
        name: Span,
        /// The attribute's value, if any was given.
        value: Option<AttrValue>,
    },
    /// A run of non-whitespace-only text. Purely-whitespace runs are never
    /// emitted (spec.md §4.1 "Whitespace policy in text"); trailing
    /// whitespace is stripped from the span.
    Text {
        /// Span of the text content.
        span: Span,
    },
    /// `<!-- ... -->`, `span` inclusive of the delimiters.
    Comment {
        /// Span from `<!--` to `-->` inclusive (or the bogus-comment
        /// equivalent bracket).
        span: Span,
    },
    /// A recoverable tokenizer-level parse error.
    ParseError {
        /// Which named error occurred.
        kind: ParseErrorKind,
        /// Span of the offending byte(s).
        span: Span,
    },
}

impl Token {
    /// The span every token carries, regardless of kind.
    #[must_use]
    pub fn span(&self) -> Span {
        match *self {
            Token::Doctype { span, .. }
            | Token::Tag { span, .. }
            | Token::Text { span }
            | Token::Comment { span }
            | Token::ParseError { span, .. } => span,
            Token::TagName { name } | Token::Attr { name, .. } => name,
        }
    }
}
