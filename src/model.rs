//! Content-model bit-sets (spec.md §3, §9): `Categories`, `Content`,
//! `Extra`, and the `Model` they combine into.
//!
//! Represented as packed unsigned integers with bitwise `overlap`,
//! `intersect`, `merge`, and a `has` helper keyed by a field enum, per
//! spec.md §9 ("Packed bit-sets").

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

macro_rules! bitset {
    ($name:ident, $field:ident { $($variant:ident = $bit:expr),* $(,)? }) => {
        /// A field selector for [`$name`], used with [`$name::has`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $field {
            $($variant),*
        }

        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(u16);

        impl $name {
            /// The empty set.
            pub const NONE: $name = $name(0);

            $(
                #[allow(missing_docs)]
                pub const $variant: $name = $name(1 << $bit);
            )*

            /// Build a set from a slice of fields.
            #[must_use]
            pub fn from_fields(fields: &[$field]) -> Self {
                fields.iter().fold($name::NONE, |acc, f| acc.merge(Self::of(*f)))
            }

            fn of(field: $field) -> Self {
                match field {
                    $( $field::$variant => Self::$variant, )*
                }
            }

            /// True if `field` is a member of this set.
            #[must_use]
            pub fn has(self, field: $field) -> bool {
                self.overlap(Self::of(field))
            }

            /// Union of two sets.
            #[must_use]
            pub fn merge(self, other: Self) -> Self {
                $name(self.0 | other.0)
            }

            /// Intersection of two sets.
            #[must_use]
            pub fn intersect(self, other: Self) -> Self {
                $name(self.0 & other.0)
            }

            /// True if the two sets share any member.
            #[must_use]
            pub fn overlap(self, other: Self) -> bool {
                self.intersect(other).0 != 0
            }

            /// True if this set has no members.
            #[must_use]
            pub fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Remove `other`'s members from this set.
            #[must_use]
            pub fn without(self, other: Self) -> Self {
                $name(self.0 & !other.0)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            fn bitor(self, rhs: Self) -> Self {
                self.merge(rhs)
            }
        }

        impl std::ops::BitAnd for $name {
            type Output = Self;
            fn bitand(self, rhs: Self) -> Self {
                self.intersect(rhs)
            }
        }
    };
}

bitset!(Categories, Category {
    Metadata = 0,
    Flow = 1,
    Phrasing = 2,
    Text = 3,
    Sectioning = 4,
    Heading = 5,
    Interactive = 6,
});

bitset!(Content, Category2 {
    Metadata = 0,
    Flow = 1,
    Phrasing = 2,
    Text = 3,
    Sectioning = 4,
    Heading = 5,
    Interactive = 6,
});

bitset!(Extra, ExtraField {
    Tabindex = 0,
    ImgAutosizes = 1,
});

/// The full content-model record a node or element table entry carries
/// (spec.md §3): which categories an element belongs to, which categories
/// it accepts as children, and a handful of runtime-visible attribute
/// facts other elements care about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Model {
    /// Which categories this element currently belongs to.
    pub categories: Categories,
    /// Which categories this element currently accepts as children.
    pub content: Content,
    /// Runtime-visible attribute facts (spec.md §3: `tabindex` presence,
    /// `img autosizes` allowed).
    pub extra: Extra,
}

impl Model {
    /// True if `self.content` overlaps the given child categories, i.e.
    /// this element (in its current runtime state) would accept a child
    /// with those categories.
    #[must_use]
    pub fn accepts(self, child_categories: Categories) -> bool {
        // `Content` and `Categories` share the same bit layout (spec.md
        // §3: "Content: the categories this element accepts as
        // children"), so the comparison is a plain intersection.
        Categories(self.content.0).overlap(child_categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_and_overlap() {
        let a = Categories::Flow;
        let b = Categories::Interactive;
        let merged = a.merge(b);
        assert!(merged.has(Category::Flow));
        assert!(merged.has(Category::Interactive));
        assert!(!merged.has(Category::Metadata));
        assert!(merged.overlap(a));
    }

    #[test]
    fn without_removes_members() {
        let both = Categories::Flow.merge(Categories::Phrasing);
        let just_flow = both.without(Categories::Phrasing);
        assert!(just_flow.has(Category::Flow));
        assert!(!just_flow.has(Category::Phrasing));
    }

    #[test]
    fn empty_set_has_nothing() {
        assert!(Categories::NONE.is_empty());
        assert!(!Categories::NONE.has(Category::Flow));
    }

    #[test]
    fn model_accepts_checks_content_against_child_categories() {
        let model = Model {
            categories: Categories::Flow,
            content: Content::Phrasing | Content::Text,
            extra: Extra::NONE,
        };
        assert!(model.accepts(Categories::Phrasing));
        assert!(!model.accepts(Categories::Interactive));
    }
}
