use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString, FromRepr, IntoStaticStr};

/// How one search step consumes input relative to the dictionary trie.
///
/// The discriminants are stable so host bridges can pass raw tags
/// (see [`EditOperation::from_tag`]).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCount,
    EnumString,
    Display,
    IntoStaticStr,
    FromRepr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EditOperation {
    Omission = 0,
    AdditionalProximity = 1,
    Substitution = 2,
    NewWord = 3,
    Match = 4,
    Completion = 5,
    Terminal = 6,
    SpaceSubstitution = 7,
    Insertion = 8,
    Transposition = 9,
}

impl EditOperation {
    #[inline(always)]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Decodes a raw tag. Unknown tags yield `None`.
    #[inline(always)]
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }

    /// Counts against the hard edit-distance budget.
    #[inline]
    pub fn is_edit_correction(self) -> bool {
        match self {
            Self::Omission => true,
            // Not counted as edits, although both depart from the typed key.
            Self::AdditionalProximity => false,
            Self::Substitution => false,
            Self::NewWord => false,
            Self::Match => false,
            Self::Completion => false,
            Self::Terminal => false,
            Self::SpaceSubstitution => false,
            Self::Insertion => true,
            Self::Transposition => true,
        }
    }

    /// Number of input positions the step consumes.
    #[inline]
    pub fn forward_input_count(self) -> usize {
        match self {
            Self::Omission => 0,
            Self::AdditionalProximity => 0,
            Self::Substitution => 0,
            Self::NewWord => 0,
            Self::Match => 1,
            Self::Completion => 0,
            Self::Terminal => 0,
            Self::SpaceSubstitution => 1,
            Self::Insertion => 2,
            Self::Transposition => 2,
        }
    }

    /// Only word boundaries carry a language cost.
    #[inline]
    pub fn has_language_cost(self) -> bool {
        matches!(self, Self::NewWord | Self::Terminal)
    }

    /// Operations that only make sense for tap typing.
    #[inline]
    pub fn is_typing_only(self) -> bool {
        matches!(
            self,
            Self::AdditionalProximity | Self::Substitution | Self::SpaceSubstitution
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn tags_round_trip_and_stay_dense() {
        assert_eq!(EditOperation::COUNT, 10);
        for (i, op) in EditOperation::iter().enumerate() {
            assert_eq!(op.tag() as usize, i);
            assert_eq!(EditOperation::from_tag(op.tag()), Some(op));
        }
        assert_eq!(EditOperation::from_tag(10), None);
        assert_eq!(EditOperation::from_tag(u8::MAX), None);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(EditOperation::SpaceSubstitution.to_string(), "space_substitution");
        assert_eq!(
            "additional_proximity".parse::<EditOperation>().ok(),
            Some(EditOperation::AdditionalProximity)
        );
    }
}
