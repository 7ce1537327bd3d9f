use super::CostPolicy;
use crate::node::{InputStateOverride, NodeInput, NodeScoring, SearchNode};
use crate::operation::EditOperation;
use crate::session::SearchSession;
use tracing::trace;

#[inline(always)]
pub fn is_edit_correction(op: EditOperation) -> bool {
    op.is_edit_correction()
}

#[inline(always)]
pub fn forward_input_count(op: EditOperation) -> usize {
    op.forward_input_count()
}

/// Only a MATCH against a key other than the touched one is a proximity correction.
#[inline]
pub fn is_proximity_correction(
    policy: &dyn CostPolicy,
    session: &SearchSession,
    node: &SearchNode,
    op: EditOperation,
) -> bool {
    match op {
        EditOperation::Match => policy.is_proximity_node(session, node),
        _ => false,
    }
}

/// Geometric penalty of applying `op` to reach `node` from `parent`.
pub fn spatial_cost(
    policy: &dyn CostPolicy,
    op: EditOperation,
    session: &SearchSession,
    parent: &SearchNode,
    node: &SearchNode,
) -> (f32, Option<InputStateOverride>) {
    let cost = match op {
        EditOperation::Omission => policy.omission_cost(parent, node),
        EditOperation::AdditionalProximity => policy.additional_proximity_cost(),
        EditOperation::Substitution => policy.substitution_cost(),
        EditOperation::NewWord => policy.new_word_cost(session, node),
        EditOperation::Match => return policy.matched_cost(session, parent, node),
        EditOperation::Completion => policy.completion_cost(session, node),
        EditOperation::Terminal => policy.terminal_spatial_cost(session, node),
        EditOperation::SpaceSubstitution => policy.space_substitution_cost(session, node),
        EditOperation::Insertion => policy.insertion_cost(session, parent, node),
        EditOperation::Transposition => policy.transposition_cost(session, parent, node),
    };
    (cost, None)
}

/// Frequency penalty of `op`. Only word boundaries pay one.
pub fn language_cost(
    policy: &dyn CostPolicy,
    op: EditOperation,
    session: &mut SearchSession,
    parent: &SearchNode,
    node: &SearchNode,
) -> f32 {
    match op {
        // The word that just ended is the parent.
        EditOperation::NewWord => policy.new_word_bigram_cost(session.node_improbability(parent)),
        EditOperation::Terminal => policy.terminal_language_cost(session.node_improbability(node)),
        EditOperation::Omission
        | EditOperation::AdditionalProximity
        | EditOperation::Substitution
        | EditOperation::Match
        | EditOperation::Completion
        | EditOperation::SpaceSubstitution
        | EditOperation::Insertion
        | EditOperation::Transposition => 0.0,
    }
}

/// Scores `node` as the result of applying `op` to `parent` and advances its cursor.
///
/// `node` must have been derived from `parent` (see [`SearchNode::child_of`]).
/// Only `node`, the session's bigram cache and its profiler are written.
pub fn update_node(
    policy: &dyn CostPolicy,
    op: EditOperation,
    session: &mut SearchSession,
    parent: &SearchNode,
    node: &mut SearchNode,
) {
    let (spatial, input_override) = spatial_cost(policy, op, session, parent, node);
    let language = language_cost(policy, op, session, parent, node);
    let edit = is_edit_correction(op);
    let proximity = is_proximity_correction(policy, session, node, op);
    session.profile(op, node);

    let input = match input_override {
        Some(state) => NodeInput {
            input_index: state.input_index,
            prev_code_point: state.prev_code_point,
            derived_from_swap: false,
        },
        None => {
            let swapped = op == EditOperation::Transposition;
            NodeInput {
                input_index: parent.input_index() + forward_input_count(op),
                prev_code_point: if swapped {
                    node.code_point
                } else {
                    parent.input.prev_code_point
                },
                derived_from_swap: swapped,
            }
        }
    };
    debug_assert!(
        input.input_index >= parent.input_index() && input.input_index <= session.input_size(),
        "{} moved cursor from {} to {} (input size {})",
        op,
        parent.input_index(),
        input.input_index,
        session.input_size()
    );
    debug_assert!(
        spatial >= 0.0 && language >= 0.0,
        "{} produced negative cost ({}, {})",
        op,
        spatial,
        language
    );

    let divisor = if policy.needs_to_normalize_compound_distance() {
        session.input_size().max(1) as f32
    } else {
        1.0
    };
    let spatial = spatial / divisor;
    let language = language / divisor;

    let prev = &parent.scoring;
    let scoring = NodeScoring {
        spatial_distance: prev.spatial_distance + spatial,
        language_distance: prev.language_distance + language,
        accumulated_cost: prev.accumulated_cost + spatial + language,
        edit_count: prev.edit_count + u16::from(edit),
        proximity_count: prev.proximity_count + u16::from(proximity),
    };
    node.commit(scoring, input);
}

/// Raw-tag entry point for hosts that store operations as integers.
/// Unknown tags cost nothing and leave `node` at the parent's state.
pub fn update_node_with_tag(
    policy: &dyn CostPolicy,
    tag: u8,
    session: &mut SearchSession,
    parent: &SearchNode,
    node: &mut SearchNode,
) {
    match EditOperation::from_tag(tag) {
        Some(op) => update_node(policy, op, session, parent, node),
        None => {
            trace!("Unknown operation tag {}; node left unscored.", tag);
            node.commit(parent.scoring, parent.input);
        }
    }
}
