use crate::consts::NOT_A_CODE_POINT;
use crate::core_types::{CodePoint, DictPos, NodeId};
use crate::dictionary::TrieEdge;

/// Replacement cursor state a policy may hand back from the spatial cost
/// step when the default forward count does not fit (e.g. several gesture
/// samples collapsing into one letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputStateOverride {
    pub input_index: usize,
    pub prev_code_point: CodePoint,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeScoring {
    pub spatial_distance: f32,
    pub language_distance: f32,
    pub accumulated_cost: f32,
    pub edit_count: u16,
    pub proximity_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInput {
    pub input_index: usize,
    pub prev_code_point: CodePoint,
    pub derived_from_swap: bool,
}

impl Default for NodeInput {
    fn default() -> Self {
        Self {
            input_index: 0,
            prev_code_point: NOT_A_CODE_POINT,
            derived_from_swap: false,
        }
    }
}

/// One partial match of the input against one trie path.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    pub parent: Option<NodeId>,
    pub dict_pos: DictPos,
    pub code_point: CodePoint,
    /// Code points consumed from the trie in the current word.
    pub code_point_count: u16,
    pub is_terminal: bool,
    pub probability: u8,
    /// Terminal position of the previous word of a multi-word phrase.
    pub prev_word_pos: Option<DictPos>,
    /// Code point count of the previous word (0 for the first word).
    pub prev_word_len: u16,
    pub word_count: u8,
    pub scoring: NodeScoring,
    pub input: NodeInput,
}

impl SearchNode {
    /// Root of a search: the trie root with nothing consumed.
    pub fn root(dict_root: DictPos, prev_word_pos: Option<DictPos>) -> Self {
        Self {
            parent: None,
            dict_pos: dict_root,
            code_point: NOT_A_CODE_POINT,
            code_point_count: 0,
            is_terminal: false,
            probability: 0,
            prev_word_pos,
            prev_word_len: 0,
            word_count: 1,
            scoring: NodeScoring::default(),
            input: NodeInput::default(),
        }
    }

    /// The parent advanced along one trie edge. Cost and cursor still
    /// hold the parent's values until the node is updated.
    pub fn child_of(parent: &SearchNode, parent_id: NodeId, edge: &TrieEdge) -> Self {
        Self {
            parent: Some(parent_id),
            dict_pos: edge.target,
            code_point: edge.code_point,
            code_point_count: parent.code_point_count.saturating_add(1),
            is_terminal: edge.is_terminal,
            probability: edge.probability,
            prev_word_pos: parent.prev_word_pos,
            prev_word_len: parent.prev_word_len,
            word_count: parent.word_count,
            scoring: parent.scoring,
            input: parent.input,
        }
    }

    /// Same trie position as the parent, used for terminal acceptance.
    pub fn copy_of(parent: &SearchNode, parent_id: NodeId) -> Self {
        Self {
            parent: Some(parent_id),
            ..parent.clone()
        }
    }

    /// Trie root of the following word. `parent` must be terminal; its
    /// position becomes the bigram context of the new word.
    pub fn next_word_of(parent: &SearchNode, parent_id: NodeId, dict_root: DictPos) -> Self {
        debug_assert!(parent.is_terminal, "new word started from a non-terminal node");
        Self {
            parent: Some(parent_id),
            dict_pos: dict_root,
            code_point: NOT_A_CODE_POINT,
            code_point_count: 0,
            is_terminal: false,
            probability: 0,
            prev_word_pos: Some(parent.dict_pos),
            prev_word_len: parent.code_point_count,
            word_count: parent.word_count.saturating_add(1),
            scoring: parent.scoring,
            input: parent.input,
        }
    }

    #[inline(always)]
    pub fn input_index(&self) -> usize {
        self.input.input_index
    }

    #[inline(always)]
    pub fn accumulated_cost(&self) -> f32 {
        self.scoring.accumulated_cost
    }

    #[inline(always)]
    pub fn edit_count(&self) -> u16 {
        self.scoring.edit_count
    }

    #[inline(always)]
    pub fn proximity_count(&self) -> u16 {
        self.scoring.proximity_count
    }

    #[inline(always)]
    pub fn has_multiple_words(&self) -> bool {
        self.word_count > 1
    }

    /// Two single-letter words in a row are never offered as a phrase.
    #[inline]
    pub fn is_valid_multiple_word_suggestion(&self) -> bool {
        self.prev_word_len != 1 || self.code_point_count != 1
    }

    #[inline(always)]
    pub fn is_same_code_point(&self, other: &SearchNode) -> bool {
        self.code_point == other.code_point
    }

    /// Writes the outcome of one update in one go.
    #[inline]
    pub(crate) fn commit(&mut self, scoring: NodeScoring, input: NodeInput) {
        self.scoring = scoring;
        self.input = input;
    }
}

/// Owns every node of one search; children refer to parents by index.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline(always)]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks parent links back to the root, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        let mut cur = Some(id);
        std::iter::from_fn(move || {
            let node = self.get(cur?);
            cur = node.parent;
            Some(node)
        })
    }

    /// Reconstructs the dictionary text spelled along the path to `id`,
    /// with a space between words.
    pub fn spell(&self, id: NodeId) -> String {
        let mut chars: Vec<char> = Vec::new();
        let mut last: Option<&SearchNode> = None;
        for node in self.ancestors(id) {
            if let Some(child) = last {
                if child.word_count != node.word_count {
                    chars.push(' ');
                } else if child.dict_pos != node.dict_pos {
                    if let Some(ch) = char::from_u32(child.code_point) {
                        chars.push(ch);
                    }
                }
            }
            last = Some(node);
        }
        chars.iter().rev().collect()
    }
}
