//! Structural and attribute diagnostics (spec.md §6, §7): everything C3/C5
//! surface beyond tokenizer-level [`crate::error::ParseErrorKind`].

use crate::span::Span;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! impl_diagnostic {
    ($(
        $string:literal <=> $variant:ident,
    )*) => {
        /// A named structural or attribute diagnostic kind (spec.md §6).
        #[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum DiagnosticKind {
            $(
                #[doc = concat!("Corresponds to the `", $string, "` diagnostic.")]
                $variant
            ),*
        }

        impl DiagnosticKind {
            /// The snake_case name as written in spec.md §6.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $string, )*
                }
            }
        }

        impl std::str::FromStr for DiagnosticKind {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $string => Ok(Self::$variant), )*
                    _ => Err(()),
                }
            }
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl_diagnostic! {
    "unsupported_doctype" <=> UnsupportedDoctype,
    "invalid_attr" <=> InvalidAttr,
    "invalid_attr_nesting" <=> InvalidAttrNesting,
    "invalid_attr_value" <=> InvalidAttrValue,
    "int_out_of_bounds" <=> IntOutOfBounds,
    "missing_attr_value" <=> MissingAttrValue,
    "boolean_attr" <=> BooleanAttr,
    "invalid_attr_combination" <=> InvalidAttrCombination,
    "duplicate_class" <=> DuplicateClass,
    "missing_required_attr" <=> MissingRequiredAttr,
    "wrong_position" <=> WrongPosition,
    "missing_ancestor" <=> MissingAncestor,
    "missing_child" <=> MissingChild,
    "duplicate_child" <=> DuplicateChild,
    "wrong_sibling_sequence" <=> WrongSiblingSequence,
    "invalid_nesting" <=> InvalidNesting,
    "invalid_html_tag_name" <=> InvalidHtmlTagName,
    "html_elements_cant_self_close" <=> HtmlElementsCantSelfClose,
    "missing_end_tag" <=> MissingEndTag,
    "erroneous_end_tag" <=> ErroneousEndTag,
    "void_end_tag" <=> VoidEndTag,
    "duplicate_attribute_name" <=> DuplicateAttributeName,
    "duplicate_sibling_attr" <=> DuplicateSiblingAttr,
    "deprecated_and_unsupported" <=> DeprecatedAndUnsupported,
}

/// One structural/attribute diagnostic (spec.md §7.2): a kind, the span it
/// anchors to, the node it belongs to (0 when pre-structural), an optional
/// secondary span (e.g. `duplicate_attribute_name`'s first occurrence),
/// and a short human-readable reason string (spec.md §4.4, `reasons`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub main_location: Span,
    pub node_idx: u32,
    pub secondary: Option<Span>,
    pub reason: Option<&'static str>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(kind: DiagnosticKind, main_location: Span, node_idx: u32) -> Self {
        Diagnostic {
            kind,
            main_location,
            node_idx,
            secondary: None,
            reason: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: Span) -> Self {
        self.secondary = Some(secondary);
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: &'static str) -> Self {
        self.reason = Some(reason);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for kind in [
            DiagnosticKind::MissingEndTag,
            DiagnosticKind::DuplicateAttributeName,
            DiagnosticKind::InvalidNesting,
        ] {
            assert_eq!(kind.as_str().parse::<DiagnosticKind>().unwrap(), kind);
        }
    }

    #[test]
    fn builder_methods_chain() {
        let d = Diagnostic::new(DiagnosticKind::InvalidNesting, Span::new(1, 2), 3)
            .with_secondary(Span::new(4, 5))
            .with_reason("interactive");
        assert_eq!(d.secondary, Some(Span::new(4, 5)));
        assert_eq!(d.reason, Some("interactive"));
    }
}
