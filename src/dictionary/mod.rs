pub mod loader;
pub mod memory;

pub use self::memory::MemoryDictionary;

use crate::core_types::{CodePoint, DictPos};

/// One outgoing edge of a trie position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieEdge {
    pub code_point: CodePoint,
    pub target: DictPos,
    pub is_terminal: bool,
    /// Unigram probability of the word ending at `target` (0 when not terminal).
    pub probability: u8,
}

/// Read-only access to an already loaded dictionary trie.
pub trait Dictionary {
    fn root(&self) -> DictPos;

    /// Appends the children of `pos` to `out`, in code point order.
    fn children(&self, pos: DictPos, out: &mut Vec<TrieEdge>);

    /// Unigram probability of the word ending at `word`, if it is terminal.
    fn probability(&self, word: DictPos) -> Option<u8>;

    /// Contextual probability of `word` following `prev`, if the pair is known.
    fn bigram_probability(&self, prev: DictPos, word: DictPos) -> Option<u8>;

    /// Spelling of the word ending at `pos`. Used to echo resolved context
    /// words; search results are spelled from the node path instead.
    fn word_at(&self, pos: DictPos) -> Option<String>;
}
