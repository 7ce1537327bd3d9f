use crate::config::{Modality, SearchParams};
use crate::consts::MAX_VALUE_FOR_WEIGHTING;
use crate::core_types::{to_base_lower, CodePoint, NodeId, Suggestion};
use crate::dictionary::TrieEdge;
use crate::input::ProximityKind;
use crate::node::{NodeArena, SearchNode};
use crate::operation::EditOperation;
use crate::policy::{update_node, CostPolicy};
use crate::session::SearchSession;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

/// Longest phrase the driver builds from one input.
pub const MAX_WORDS_PER_SUGGESTION: u8 = 2;

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f32,
    id: NodeId,
    accepted: bool,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Min-heap on cost; older nodes first on ties.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

struct Searcher<'p, 's, 'a> {
    policy: &'p dyn CostPolicy,
    session: &'s mut SearchSession<'a>,
    params: &'p SearchParams,
    arena: NodeArena,
    frontier: BinaryHeap<Frontier>,
}

/// Best-first search for the cheapest dictionary words explaining the session input.
pub fn suggest(
    policy: &dyn CostPolicy,
    session: &mut SearchSession,
    params: &SearchParams,
) -> Vec<Suggestion> {
    let mut searcher = Searcher {
        policy,
        session,
        params,
        arena: NodeArena::with_capacity(1024),
        frontier: BinaryHeap::new(),
    };
    searcher.run()
}

impl<'p, 's, 'a> Searcher<'p, 's, 'a> {
    fn run(&mut self) -> Vec<Suggestion> {
        let root = SearchNode::root(self.session.dictionary().root(), self.session.prev_word());
        let root_id = self.arena.push(root);
        self.enqueue(root_id, false);

        let mut results: HashMap<String, Suggestion> = HashMap::new();
        let mut expansions = 0usize;

        while let Some(entry) = self.frontier.pop() {
            if results.len() >= self.params.max_results {
                break;
            }
            if expansions >= self.params.max_expansions {
                debug!("Expansion budget of {} exhausted.", self.params.max_expansions);
                break;
            }
            expansions += 1;

            if entry.accepted {
                let node = self.arena.get(entry.id);
                let word = self.arena.spell(entry.id);
                results.entry(word.clone()).or_insert_with(|| Suggestion {
                    word,
                    cost: node.accumulated_cost(),
                    spatial_distance: node.scoring.spatial_distance,
                    language_distance: node.scoring.language_distance,
                    edit_count: node.edit_count(),
                    proximity_count: node.proximity_count(),
                });
                continue;
            }
            self.expand(entry.id);
            self.prune_frontier();
        }

        debug!(
            "Search done: {} expansions, {} nodes, {} cached bigrams.",
            expansions,
            self.arena.len(),
            self.session.cache().len()
        );

        let mut out: Vec<Suggestion> = results.into_values().collect();
        out.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.word.cmp(&b.word)));
        out.truncate(self.params.max_results);
        out
    }

    fn expand(&mut self, id: NodeId) {
        let node = self.arena.get(id).clone();
        let index = node.input_index();
        let size = self.session.input_size();

        if node.is_terminal && node.code_point_count > 0 {
            if index == size {
                let accept = SearchNode::copy_of(&node, id);
                self.apply(EditOperation::Terminal, id, accept, true);
            } else if node.word_count < MAX_WORDS_PER_SUGGESTION {
                self.start_next_word(id, &node);
            }
        }

        let mut edges = Vec::new();
        self.session.dictionary().children(node.dict_pos, &mut edges);

        if index == size {
            if self.completion_depth(id) < self.params.max_completion {
                for edge in &edges {
                    let op = if self.is_doubled_letter(&node, edge) {
                        EditOperation::Match
                    } else {
                        EditOperation::Completion
                    };
                    let child = SearchNode::child_of(&node, id, edge);
                    self.apply(op, id, child, false);
                }
            }
            return;
        }

        for edge in &edges {
            self.expand_typed(id, &node, edge);
        }
    }

    /// All operations that consume a touch at the node's cursor.
    fn expand_typed(&mut self, id: NodeId, node: &SearchNode, edge: &TrieEdge) {
        let index = node.input_index();
        let size = self.session.input_size();
        let kind = self
            .session
            .input()
            .point(index)
            .and_then(|p| p.kind_of(edge.code_point));

        if kind == Some(ProximityKind::Near) || self.is_doubled_letter(node, edge) {
            let child = SearchNode::child_of(node, id, edge);
            self.apply(EditOperation::Match, id, child, false);
        } else if let Some(kind) = kind {
            let op = match kind {
                ProximityKind::Additional => EditOperation::AdditionalProximity,
                _ => EditOperation::Substitution,
            };
            if self.policy.supports(op) {
                let child = SearchNode::child_of(node, id, edge);
                if let Some(corrected) = self.apply_unqueued(op, id, child) {
                    let matched = SearchNode::copy_of(self.arena.get(corrected), corrected);
                    self.apply(EditOperation::Match, corrected, matched, false);
                }
            }
        }

        if node.edit_count() >= self.params.max_edits {
            return;
        }

        let mut grandchildren = Vec::new();
        self.session.dictionary().children(edge.target, &mut grandchildren);

        if self.policy.supports(EditOperation::Omission) {
            let omitted = self.arena.push(SearchNode::child_of(node, id, edge));
            for next in &grandchildren {
                if !self.is_near(index, next.code_point) {
                    continue;
                }
                let child = SearchNode::child_of(self.arena.get(omitted), omitted, next);
                if let Some(skipped) = self.apply_unqueued(EditOperation::Omission, omitted, child) {
                    let matched = SearchNode::copy_of(self.arena.get(skipped), skipped);
                    self.apply(EditOperation::Match, skipped, matched, false);
                }
            }
        }

        if index + 1 >= size {
            return;
        }

        if self.policy.supports(EditOperation::Insertion) && self.primary_is(index + 1, edge.code_point)
        {
            let child = SearchNode::child_of(node, id, edge);
            self.apply(EditOperation::Insertion, id, child, false);
        }

        if self.policy.supports(EditOperation::Transposition)
            && self.primary_is(index + 1, edge.code_point)
            && !self.primary_is(index, edge.code_point)
        {
            let first = self.arena.push(SearchNode::child_of(node, id, edge));
            for second in &grandchildren {
                if !self.primary_is(index, second.code_point) {
                    continue;
                }
                let child = SearchNode::child_of(self.arena.get(first), first, second);
                self.apply(EditOperation::Transposition, first, child, false);
            }
        }
    }

    fn start_next_word(&mut self, id: NodeId, node: &SearchNode) {
        let root = self.session.dictionary().root();
        if self.policy.supports(EditOperation::NewWord) {
            let next = SearchNode::next_word_of(node, id, root);
            self.apply(EditOperation::NewWord, id, next, false);
        }
        let index = node.input_index();
        if self.policy.supports(EditOperation::SpaceSubstitution) && index + 1 < self.session.input_size() {
            let next = SearchNode::next_word_of(node, id, root);
            self.apply(EditOperation::SpaceSubstitution, id, next, false);
        }
    }

    /// Scores `node` against `parent_id` and queues it if it stays within budget.
    fn apply(&mut self, op: EditOperation, parent_id: NodeId, node: SearchNode, accepted: bool) {
        if let Some(id) = self.apply_unqueued(op, parent_id, node) {
            self.enqueue(id, accepted);
        }
    }

    fn apply_unqueued(
        &mut self,
        op: EditOperation,
        parent_id: NodeId,
        mut node: SearchNode,
    ) -> Option<NodeId> {
        let parent = self.arena.get(parent_id);
        update_node(self.policy, op, self.session, parent, &mut node);

        if node.edit_count() > self.params.max_edits
            || node.proximity_count() > self.params.max_proximity
            || node.accumulated_cost() >= MAX_VALUE_FOR_WEIGHTING
        {
            return None;
        }
        Some(self.arena.push(node))
    }

    fn enqueue(&mut self, id: NodeId, accepted: bool) {
        self.frontier.push(Frontier {
            cost: self.arena.get(id).accumulated_cost(),
            id,
            accepted,
        });
    }

    fn prune_frontier(&mut self) {
        let beam = self.params.beam_width.max(1);
        if self.frontier.len() <= beam * 2 {
            return;
        }
        // Ascending by `Ord`, so the cheapest entries sit at the end.
        let mut sorted = std::mem::take(&mut self.frontier).into_sorted_vec();
        sorted.drain(..sorted.len() - beam);
        self.frontier = BinaryHeap::from(sorted);
    }

    /// Letters of the current word already spelled past the end of the input.
    fn completion_depth(&self, id: NodeId) -> usize {
        let size = self.session.input_size();
        let mut depth = 0;
        let mut last: Option<&SearchNode> = None;
        for node in self.arena.ancestors(id) {
            if let Some(child) = last {
                if child.word_count != node.word_count || node.input_index() != size {
                    break;
                }
                if child.dict_pos != node.dict_pos {
                    depth += 1;
                }
            }
            last = Some(node);
        }
        depth
    }

    fn is_doubled_letter(&self, node: &SearchNode, edge: &TrieEdge) -> bool {
        self.policy.modality() == Modality::Gesture
            && node.code_point_count > 0
            && node.code_point == edge.code_point
    }

    fn is_near(&self, index: usize, code: CodePoint) -> bool {
        self.session
            .input()
            .point(index)
            .is_some_and(|p| p.contains(code))
    }

    fn primary_is(&self, index: usize, code: CodePoint) -> bool {
        index < self.session.input_size()
            && to_base_lower(self.session.input().primary_code_point_at(index)) == to_base_lower(code)
    }
}
