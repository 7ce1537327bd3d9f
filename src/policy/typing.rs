use super::CostPolicy;
use crate::config::{Modality, TypingWeights};
use crate::core_types::{is_intentional_omission, is_upper, to_base_lower};
use crate::node::{InputStateOverride, SearchNode};
use crate::operation::EditOperation;
use crate::session::SearchSession;

/// Costs for tap typing, one touch per intended letter.
#[derive(Debug, Clone, Default)]
pub struct TypingPolicy {
    w: TypingWeights,
}

impl TypingPolicy {
    pub fn new(weights: TypingWeights) -> Self {
        Self { w: weights }
    }

    #[inline(always)]
    fn weighted_length(&self, session: &SearchSession, index: usize, code: u32) -> f32 {
        session.input().point_to_key_length(index, code) * self.w.distance_weight_length
    }
}

impl CostPolicy for TypingPolicy {
    fn modality(&self) -> Modality {
        Modality::Typing
    }

    fn supports(&self, _op: EditOperation) -> bool {
        true
    }

    fn omission_cost(&self, parent: &SearchNode, node: &SearchNode) -> f32 {
        if is_intentional_omission(parent.code_point) {
            self.w.intentional_omission_cost
        } else if node.code_point_count == 2 {
            // The omitted letter was the first of the word.
            self.w.omission_cost_first_char
        } else if node.is_same_code_point(parent) {
            self.w.omission_cost_same_char
        } else {
            self.w.omission_cost
        }
    }

    fn additional_proximity_cost(&self) -> f32 {
        self.w.additional_proximity_cost
    }

    fn substitution_cost(&self) -> f32 {
        self.w.substitution_cost
    }

    fn new_word_cost(&self, _session: &SearchSession, _node: &SearchNode) -> f32 {
        self.w.cost_new_word * self.w.multi_word_cost_multiplier
    }

    fn matched_cost(
        &self,
        session: &SearchSession,
        _parent: &SearchNode,
        node: &SearchNode,
    ) -> (f32, Option<InputStateOverride>) {
        let index = node.input_index();
        let mut cost = self.weighted_length(session, index, node.code_point);

        if self.is_proximity_node(session, node) {
            cost += if index == 0 {
                self.w.first_char_proximity_cost
            } else {
                self.w.proximity_cost
            };
            if node.proximity_count() == 0 {
                cost += self.w.first_proximity_cost;
            }
        }
        if node.has_multiple_words() && node.code_point_count == 1 && is_upper(node.code_point) {
            cost += self.w.cost_later_word_uppercase;
        }
        (cost, None)
    }

    fn is_proximity_node(&self, session: &SearchSession, node: &SearchNode) -> bool {
        let primary = session.input().primary_code_point_at(node.input_index());
        to_base_lower(primary) != to_base_lower(node.code_point)
    }

    fn completion_cost(&self, session: &SearchSession, node: &SearchNode) -> f32 {
        if node.input_index() == session.input_size() {
            self.w.cost_first_completion
        } else {
            self.w.cost_completion
        }
    }

    fn terminal_spatial_cost(&self, _session: &SearchSession, node: &SearchNode) -> f32 {
        let mut cost = 0.0;
        if node.has_multiple_words() {
            cost += self.w.has_multi_word_terminal_cost;
        }
        if node.proximity_count() > 0 {
            cost += self.w.has_proximity_terminal_cost;
        }
        if node.edit_count() > 0 {
            cost += self.w.has_edit_correction_terminal_cost;
        }
        cost
    }

    fn space_substitution_cost(&self, _session: &SearchSession, _node: &SearchNode) -> f32 {
        (self.w.space_substitution_cost + self.w.cost_new_word) * self.w.multi_word_cost_multiplier
    }

    fn insertion_cost(
        &self,
        session: &SearchSession,
        parent: &SearchNode,
        node: &SearchNode,
    ) -> f32 {
        let inserted = parent.input_index();
        let input = session.input();
        let same_char =
            to_base_lower(input.primary_code_point_at(inserted)) == to_base_lower(node.code_point);

        let mut cost = if node.code_point_count == 1 {
            self.w.insertion_cost_first_char
        } else {
            0.0
        };
        cost += if same_char {
            self.w.insertion_cost_same_char
        } else if input.exists_adjacent_proximity_chars(inserted) {
            self.w.insertion_cost_proximity_char
        } else {
            self.w.insertion_cost
        };
        cost + self.weighted_length(session, inserted + 1, node.code_point)
    }

    fn transposition_cost(
        &self,
        session: &SearchSession,
        parent: &SearchNode,
        node: &SearchNode,
    ) -> f32 {
        let index = parent.input_index();
        let first = self.weighted_length(session, index + 1, parent.code_point);
        let second = self.weighted_length(session, index, node.code_point);
        self.w.transposition_cost + first + second
    }

    fn new_word_bigram_cost(&self, improbability: f32) -> f32 {
        improbability * self.w.distance_weight_language
    }

    fn terminal_language_cost(&self, improbability: f32) -> f32 {
        improbability * self.w.distance_weight_language
    }

    fn needs_to_normalize_compound_distance(&self) -> bool {
        false
    }
}
