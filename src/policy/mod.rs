pub mod gesture;
pub mod typing;
pub mod weighting;

pub use self::gesture::GesturePolicy;
pub use self::typing::TypingPolicy;
pub use self::weighting::{
    forward_input_count, is_edit_correction, is_proximity_correction, update_node,
    update_node_with_tag,
};

use crate::config::{Modality, PolicyConfig};
use crate::node::{InputStateOverride, SearchNode};
use crate::operation::EditOperation;
use crate::session::SearchSession;

/// Modality-specific cost constants and predicates.
///
/// Every cost must be finite and non-negative; node costs only ever grow
/// along a path. Operations a policy does not support report
/// [`MAX_VALUE_FOR_WEIGHTING`](crate::consts::MAX_VALUE_FOR_WEIGHTING).
pub trait CostPolicy {
    fn modality(&self) -> Modality;

    /// Whether a driver should try `op` at all under this policy.
    fn supports(&self, op: EditOperation) -> bool;

    /// `parent` is the omitted letter, `node` the letter after it.
    fn omission_cost(&self, parent: &SearchNode, node: &SearchNode) -> f32;

    fn additional_proximity_cost(&self) -> f32;

    fn substitution_cost(&self) -> f32;

    fn new_word_cost(&self, session: &SearchSession, node: &SearchNode) -> f32;

    /// Cost of matching `node`'s letter against the touch at its cursor.
    /// May replace the default cursor advance.
    fn matched_cost(
        &self,
        session: &SearchSession,
        parent: &SearchNode,
        node: &SearchNode,
    ) -> (f32, Option<InputStateOverride>);

    /// The touch at `node`'s cursor resolved to a different key than `node`'s letter.
    fn is_proximity_node(&self, session: &SearchSession, node: &SearchNode) -> bool;

    fn completion_cost(&self, session: &SearchSession, node: &SearchNode) -> f32;

    fn terminal_spatial_cost(&self, session: &SearchSession, node: &SearchNode) -> f32;

    fn space_substitution_cost(&self, session: &SearchSession, node: &SearchNode) -> f32;

    /// `parent` still sits before the extra touch.
    fn insertion_cost(&self, session: &SearchSession, parent: &SearchNode, node: &SearchNode)
        -> f32;

    /// `parent` is the first trie letter of the swapped pair, `node` the second.
    fn transposition_cost(
        &self,
        session: &SearchSession,
        parent: &SearchNode,
        node: &SearchNode,
    ) -> f32;

    fn new_word_bigram_cost(&self, improbability: f32) -> f32;

    fn terminal_language_cost(&self, improbability: f32) -> f32;

    /// Divide each step's cost by the input length before accumulating.
    fn needs_to_normalize_compound_distance(&self) -> bool;
}

pub fn build_policy(config: &PolicyConfig) -> Box<dyn CostPolicy + Send + Sync> {
    match config.modality {
        Modality::Typing => Box::new(TypingPolicy::new(config.typing.clone())),
        Modality::Gesture => Box::new(GesturePolicy::new(config.gesture.clone())),
    }
}
