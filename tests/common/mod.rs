#![allow(dead_code)]

use keysuggest::core_types::{CodePoint, DictPos, NodeId};
use keysuggest::dictionary::{Dictionary, MemoryDictionary, TrieEdge};
use keysuggest::geometry::KeyboardLayout;
use keysuggest::input::InputSequence;
use keysuggest::node::{NodeArena, SearchNode};
use keysuggest::policy::{update_node, CostPolicy};
use keysuggest::{EditOperation, SearchSession};
use std::cell::Cell;

pub const EPS: f32 = 1e-5;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn dict(words: &[(&str, u8)]) -> MemoryDictionary {
    MemoryDictionary::from_words(words.iter().copied()).expect("valid word list")
}

/// Key-centre taps on the built-in QWERTY layout.
pub fn typed(text: &str) -> InputSequence {
    InputSequence::from_text(&KeyboardLayout::qwerty(), text).expect("typeable text")
}

pub fn edge_for(dict: &dyn Dictionary, pos: DictPos, ch: char) -> TrieEdge {
    let mut edges = Vec::new();
    dict.children(pos, &mut edges);
    edges
        .into_iter()
        .find(|e| e.code_point == ch as CodePoint)
        .unwrap_or_else(|| panic!("no edge '{}' below {}", ch, pos))
}

/// Walks a search path by hand: one trie step below `parent`, scored with `op`.
pub struct Walker {
    pub arena: NodeArena,
    pub root: NodeId,
}

impl Walker {
    pub fn new(dict: &dyn Dictionary) -> Self {
        Self::with_prev_word(dict, None)
    }

    pub fn with_prev_word(dict: &dyn Dictionary, prev: Option<DictPos>) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root(dict.root(), prev));
        Self { arena, root }
    }

    pub fn node(&self, id: NodeId) -> &SearchNode {
        self.arena.get(id)
    }

    /// Unscored child, as used for the first letter of a transposition or omission.
    pub fn raw_child(&mut self, session: &SearchSession, parent: NodeId, ch: char) -> NodeId {
        let edge = edge_for(session.dictionary(), self.arena.get(parent).dict_pos, ch);
        let node = SearchNode::child_of(self.arena.get(parent), parent, &edge);
        self.arena.push(node)
    }

    pub fn step(
        &mut self,
        policy: &dyn CostPolicy,
        session: &mut SearchSession,
        parent: NodeId,
        ch: char,
        op: EditOperation,
    ) -> NodeId {
        let edge = edge_for(session.dictionary(), self.arena.get(parent).dict_pos, ch);
        let mut node = SearchNode::child_of(self.arena.get(parent), parent, &edge);
        update_node(policy, op, session, self.arena.get(parent), &mut node);
        self.arena.push(node)
    }

    /// Scores a copy of `parent` in place (terminal acceptance, follow-up match).
    pub fn settle(
        &mut self,
        policy: &dyn CostPolicy,
        session: &mut SearchSession,
        parent: NodeId,
        op: EditOperation,
    ) -> NodeId {
        let mut node = SearchNode::copy_of(self.arena.get(parent), parent);
        update_node(policy, op, session, self.arena.get(parent), &mut node);
        self.arena.push(node)
    }

    pub fn spell_path(
        &mut self,
        policy: &dyn CostPolicy,
        session: &mut SearchSession,
        word: &str,
    ) -> NodeId {
        let mut cur = self.root;
        for ch in word.chars() {
            cur = self.step(policy, session, cur, ch, EditOperation::Match);
        }
        cur
    }
}

/// Wraps a dictionary and counts bigram lookups.
pub struct CountingDictionary {
    pub inner: MemoryDictionary,
    pub bigram_calls: Cell<usize>,
}

impl CountingDictionary {
    pub fn new(inner: MemoryDictionary) -> Self {
        Self {
            inner,
            bigram_calls: Cell::new(0),
        }
    }
}

impl Dictionary for CountingDictionary {
    fn root(&self) -> DictPos {
        self.inner.root()
    }

    fn children(&self, pos: DictPos, out: &mut Vec<TrieEdge>) {
        self.inner.children(pos, out)
    }

    fn probability(&self, word: DictPos) -> Option<u8> {
        self.inner.probability(word)
    }

    fn bigram_probability(&self, prev: DictPos, word: DictPos) -> Option<u8> {
        self.bigram_calls.set(self.bigram_calls.get() + 1);
        self.inner.bigram_probability(prev, word)
    }

    fn word_at(&self, pos: DictPos) -> Option<String> {
        self.inner.word_at(pos)
    }
}
