use super::{Dictionary, TrieEdge};
use crate::consts::{MAX_BIGRAM_ENCODED_PROBABILITY, MAX_PROBABILITY, NOT_A_CODE_POINT};
use crate::core_types::{CodePoint, DictPos};
use crate::error::{SgResult, SuggestError};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct TrieNode {
    code_point: CodePoint,
    parent: Option<DictPos>,
    // Sorted by code point
    children: Vec<(CodePoint, DictPos)>,
    probability: Option<u8>,
}

/// Pointer-free trie kept in a flat vector; positions are vector indices.
#[derive(Debug, Clone)]
pub struct MemoryDictionary {
    nodes: Vec<TrieNode>,
    // (prev word, word) -> encoded bigram step 0..=15
    bigrams: HashMap<(DictPos, DictPos), u8>,
}

impl Default for MemoryDictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Blends the unigram probability with an encoded bigram step.
pub fn probability_for_bigram(unigram: u8, encoded: u8) -> u8 {
    let unigram = unigram as f32;
    let step = (MAX_PROBABILITY as f32 - unigram) / (1.5 + MAX_BIGRAM_ENCODED_PROBABILITY as f32);
    let p = unigram + (encoded as f32 + 1.0) * step;
    (p as i32).clamp(0, MAX_PROBABILITY) as u8
}

impl MemoryDictionary {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode {
                code_point: NOT_A_CODE_POINT,
                parent: None,
                children: Vec::new(),
                probability: None,
            }],
            bigrams: HashMap::new(),
        }
    }

    pub fn from_words<'a, I>(words: I) -> SgResult<Self>
    where
        I: IntoIterator<Item = (&'a str, u8)>,
    {
        let mut dict = Self::new();
        for (word, probability) in words {
            dict.insert(word, probability)?;
        }
        Ok(dict)
    }

    /// Adds `word`, keeping the higher probability when it already exists.
    pub fn insert(&mut self, word: &str, probability: u8) -> SgResult<DictPos> {
        if word.is_empty() {
            return Err(SuggestError::Dictionary("Cannot insert an empty word".to_string()));
        }
        let mut pos: DictPos = 0;
        for ch in word.chars() {
            let code = ch as CodePoint;
            let node = &self.nodes[pos as usize];
            pos = match node.children.binary_search_by_key(&code, |&(c, _)| c) {
                Ok(i) => node.children[i].1,
                Err(i) => {
                    let next = self.nodes.len() as DictPos;
                    self.nodes[pos as usize].children.insert(i, (code, next));
                    self.nodes.push(TrieNode {
                        code_point: code,
                        parent: Some(pos),
                        children: Vec::new(),
                        probability: None,
                    });
                    next
                }
            };
        }
        let slot = &mut self.nodes[pos as usize].probability;
        *slot = Some(slot.map_or(probability, |p| p.max(probability)));
        Ok(pos)
    }

    pub fn add_bigram(&mut self, prev: &str, word: &str, encoded: u8) -> SgResult<()> {
        let p = self
            .lookup(prev)
            .ok_or_else(|| SuggestError::Dictionary(format!("Unknown word '{}'", prev)))?;
        let w = self
            .lookup(word)
            .ok_or_else(|| SuggestError::Dictionary(format!("Unknown word '{}'", word)))?;
        let encoded = encoded.min(MAX_BIGRAM_ENCODED_PROBABILITY as u8);
        self.bigrams.insert((p, w), encoded);
        Ok(())
    }

    /// Terminal position of `word`, if present.
    pub fn lookup(&self, word: &str) -> Option<DictPos> {
        let mut pos: DictPos = 0;
        for ch in word.chars() {
            let node = &self.nodes[pos as usize];
            let i = node
                .children
                .binary_search_by_key(&(ch as CodePoint), |&(c, _)| c)
                .ok()?;
            pos = node.children[i].1;
        }
        self.nodes[pos as usize].probability.map(|_| pos)
    }

    pub fn word_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.probability.is_some()).count()
    }

    pub fn bigram_count(&self) -> usize {
        self.bigrams.len()
    }
}

impl Dictionary for MemoryDictionary {
    fn root(&self) -> DictPos {
        0
    }

    fn children(&self, pos: DictPos, out: &mut Vec<TrieEdge>) {
        let Some(node) = self.nodes.get(pos as usize) else {
            return;
        };
        out.extend(node.children.iter().map(|&(code_point, target)| {
            let probability = self.nodes[target as usize].probability;
            TrieEdge {
                code_point,
                target,
                is_terminal: probability.is_some(),
                probability: probability.unwrap_or(0),
            }
        }));
    }

    fn probability(&self, word: DictPos) -> Option<u8> {
        self.nodes.get(word as usize).and_then(|n| n.probability)
    }

    fn bigram_probability(&self, prev: DictPos, word: DictPos) -> Option<u8> {
        let encoded = *self.bigrams.get(&(prev, word))?;
        let unigram = self.probability(word)?;
        Some(probability_for_bigram(unigram, encoded))
    }

    fn word_at(&self, pos: DictPos) -> Option<String> {
        self.nodes.get(pos as usize)?.probability?;
        let mut chars = Vec::new();
        let mut cur = Some(pos);
        while let Some(p) = cur {
            let node = &self.nodes[p as usize];
            if node.parent.is_some() {
                chars.push(char::from_u32(node.code_point)?);
            }
            cur = node.parent;
        }
        Some(chars.into_iter().rev().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup_share_prefixes() {
        let dict = MemoryDictionary::from_words([("cat", 200), ("car", 150), ("ca", 10)]).unwrap();
        assert_eq!(dict.word_count(), 3);
        let cat = dict.lookup("cat").unwrap();
        assert_eq!(dict.word_at(cat).as_deref(), Some("cat"));
        assert_eq!(dict.probability(cat), Some(200));
        assert!(dict.lookup("c").is_none());

        let mut edges = Vec::new();
        dict.children(dict.lookup("ca").unwrap(), &mut edges);
        let codes: Vec<char> = edges.iter().filter_map(|e| char::from_u32(e.code_point)).collect();
        assert_eq!(codes, vec!['r', 't']);
    }

    #[test]
    fn bigram_probability_is_above_unigram() {
        let mut dict = MemoryDictionary::from_words([("the", 250), ("cat", 100)]).unwrap();
        dict.add_bigram("the", "cat", 15).unwrap();
        let the = dict.lookup("the").unwrap();
        let cat = dict.lookup("cat").unwrap();
        let p = dict.bigram_probability(the, cat).unwrap();
        assert!(p > 100 && p as i32 <= MAX_PROBABILITY);
        assert!(dict.bigram_probability(cat, the).is_none());
    }

    #[test]
    fn empty_word_is_rejected() {
        let mut dict = MemoryDictionary::new();
        assert!(dict.insert("", 10).is_err());
    }
}
