//! Tokenizer-level parse errors (spec.md §4.1).
//!
//! These mirror the WHATWG HTML5 tokenization section's named parse
//! errors. Each is emitted as a [`crate::token::Token::ParseError`] with a
//! span pointing at the offending byte(s).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! impl_error {
    ($(
        $string:literal <=> $variant:ident,
    )*) => {
        /// A named tokenizer parse error, stable across tokenizer versions.
        #[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum ParseErrorKind {
            $(
                #[doc = concat!("Corresponds to the `", $string, "` WHATWG named parse error.")]
                $variant
            ),*
        }

        impl ParseErrorKind {
            /// The kebab-case name as written in the WHATWG spec / spec.md §4.1.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $string, )*
                }
            }
        }

        impl std::str::FromStr for ParseErrorKind {
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

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl_error! {
    "abrupt-closing-of-empty-comment" <=> AbruptClosingOfEmptyComment,
    "eof-before-tag-name" <=> EofBeforeTagName,
    "eof-in-attribute-value" <=> EofInAttributeValue,
    "eof-in-comment" <=> EofInComment,
    "eof-in-doctype" <=> EofInDoctype,
    "eof-in-tag" <=> EofInTag,
    "incorrectly-opened-comment" <=> IncorrectlyOpenedComment,
    "invalid-first-character-of-tag-name" <=> InvalidFirstCharacterOfTagName,
    "missing-attribute-value" <=> MissingAttributeValue,
    "missing-end-tag-name" <=> MissingEndTagName,
    "missing-whitespace-before-doctype-name" <=> MissingWhitespaceBeforeDoctypeName,
    "missing-whitespace-between-attributes" <=> MissingWhitespaceBetweenAttributes,
    "unexpected-character-in-attribute-name" <=> UnexpectedCharacterInAttributeName,
    "unexpected-character-in-unquoted-attribute-value" <=> UnexpectedCharacterInUnquotedAttributeValue,
    "unexpected-equals-sign-before-attribute-name" <=> UnexpectedEqualsSignBeforeAttributeName,
    "unexpected-null-character" <=> UnexpectedNullCharacter,
    "unexpected-solidus-in-tag" <=> UnexpectedSolidusInTag,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for kind in [
            ParseErrorKind::EofInTag,
            ParseErrorKind::UnexpectedNullCharacter,
            ParseErrorKind::MissingEndTagName,
        ] {
            let s = kind.as_str();
            assert_eq!(s.parse::<ParseErrorKind>().unwrap(), kind);
        }
    }
}
