use serde::{Deserialize, Serialize};

/// A Unicode scalar value as stored on trie edges and keys.
pub type CodePoint = u32;

/// Position of a node inside the dictionary trie.
/// Terminal positions double as word identifiers for bigram lookups.
pub type DictPos = u32;

/// Index of a `SearchNode` inside the driver's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One ranked output of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub word: String,
    pub cost: f32,
    pub spatial_distance: f32,
    pub language_distance: f32,
    pub edit_count: u16,
    pub proximity_count: u16,
}

#[inline(always)]
pub fn to_base_lower(c: CodePoint) -> CodePoint {
    char::from_u32(c)
        .and_then(|ch| ch.to_lowercase().next())
        .map(|ch| ch as CodePoint)
        .unwrap_or(c)
}

#[inline(always)]
pub fn is_upper(c: CodePoint) -> bool {
    char::from_u32(c).is_some_and(|ch| ch.is_uppercase())
}

/// Apostrophe and hyphen can be left out by the user on purpose ("dont", "email").
#[inline(always)]
pub fn is_intentional_omission(c: CodePoint) -> bool {
    c == '\'' as CodePoint || c == '-' as CodePoint
}
