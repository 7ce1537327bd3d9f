use super::CostPolicy;
use crate::config::{GestureWeights, Modality};
use crate::consts::MAX_VALUE_FOR_WEIGHTING;
use crate::node::{InputStateOverride, SearchNode};
use crate::operation::EditOperation;
use crate::session::SearchSession;

/// Costs for gesture input, where one letter spans a run of trace samples.
#[derive(Debug, Clone, Default)]
pub struct GesturePolicy {
    w: GestureWeights,
}

impl GesturePolicy {
    pub fn new(weights: GestureWeights) -> Self {
        Self { w: weights }
    }
}

impl CostPolicy for GesturePolicy {
    fn modality(&self) -> Modality {
        Modality::Gesture
    }

    fn supports(&self, op: EditOperation) -> bool {
        !op.is_typing_only()
    }

    fn omission_cost(&self, _parent: &SearchNode, _node: &SearchNode) -> f32 {
        self.w.gesture_omission_cost
    }

    fn additional_proximity_cost(&self) -> f32 {
        MAX_VALUE_FOR_WEIGHTING
    }

    fn substitution_cost(&self) -> f32 {
        MAX_VALUE_FOR_WEIGHTING
    }

    fn new_word_cost(&self, _session: &SearchSession, _node: &SearchNode) -> f32 {
        self.w.gesture_new_word_cost
    }

    fn matched_cost(
        &self,
        session: &SearchSession,
        parent: &SearchNode,
        node: &SearchNode,
    ) -> (f32, Option<InputStateOverride>) {
        let index = node.input_index();
        let input = session.input();

        // A doubled letter is drawn once; it reuses the samples already consumed.
        // A copy on the parent's own trie position (the match after an omission)
        // is the same letter, not a second one.
        if parent.code_point_count > 0
            && parent.dict_pos != node.dict_pos
            && node.is_same_code_point(parent)
        {
            return (
                self.w.gesture_double_letter_cost,
                Some(InputStateOverride {
                    input_index: index,
                    prev_code_point: node.code_point,
                }),
            );
        }

        let run = input.same_key_run(index, node.code_point).max(1);
        let cost = input.point_to_key_length(index, node.code_point) * self.w.gesture_distance_weight;
        (
            cost,
            Some(InputStateOverride {
                input_index: (index + run).min(input.len()),
                prev_code_point: node.code_point,
            }),
        )
    }

    fn is_proximity_node(&self, _session: &SearchSession, _node: &SearchNode) -> bool {
        false
    }

    fn completion_cost(&self, session: &SearchSession, node: &SearchNode) -> f32 {
        if node.input_index() == session.input_size() {
            self.w.gesture_first_completion_cost
        } else {
            self.w.gesture_completion_cost
        }
    }

    fn terminal_spatial_cost(&self, _session: &SearchSession, node: &SearchNode) -> f32 {
        let mut cost = 0.0;
        if node.has_multiple_words() {
            cost += self.w.gesture_multi_word_terminal_cost;
        }
        if node.edit_count() > 0 {
            cost += self.w.gesture_edit_terminal_cost;
        }
        cost
    }

    fn space_substitution_cost(&self, _session: &SearchSession, _node: &SearchNode) -> f32 {
        MAX_VALUE_FOR_WEIGHTING
    }

    fn insertion_cost(
        &self,
        session: &SearchSession,
        parent: &SearchNode,
        node: &SearchNode,
    ) -> f32 {
        let distance = session
            .input()
            .point_to_key_length(parent.input_index() + 1, node.code_point);
        self.w.gesture_insertion_cost + distance * self.w.gesture_distance_weight
    }

    fn transposition_cost(
        &self,
        _session: &SearchSession,
        _parent: &SearchNode,
        _node: &SearchNode,
    ) -> f32 {
        self.w.gesture_transposition_cost
    }

    fn new_word_bigram_cost(&self, improbability: f32) -> f32 {
        improbability * self.w.gesture_language_weight
    }

    fn terminal_language_cost(&self, improbability: f32) -> f32 {
        improbability * self.w.gesture_language_weight
    }

    fn needs_to_normalize_compound_distance(&self) -> bool {
        true
    }
}
