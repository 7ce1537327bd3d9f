mod common;

use common::{assert_close, dict, typed, Walker};
use keysuggest::cache::BigramKey;
use keysuggest::config::{GestureWeights, TypingWeights};
use keysuggest::consts::MAX_PROBABILITY;
use keysuggest::dictionary::memory::probability_for_bigram;
use keysuggest::dictionary::Dictionary;
use keysuggest::input::InputSequence;
use keysuggest::node::SearchNode;
use keysuggest::policy::weighting::language_cost;
use keysuggest::policy::{update_node, update_node_with_tag, GesturePolicy, TypingPolicy};
use keysuggest::profiler::OperationCounter;
use keysuggest::{CostPolicy, EditOperation, SearchSession};
use rstest::rstest;
use strum::IntoEnumIterator;

#[test]
fn test_language_cost_is_zero_away_from_word_boundaries() {
    let d = dict(&[("cat", 100)]);
    let policy = TypingPolicy::default();
    let mut session = SearchSession::new(&d, typed("cat"));
    let mut walker = Walker::new(&d);
    let cat = walker.spell_path(&policy, &mut session, "cat");
    let parent = walker.node(cat).clone();
    let node = SearchNode::copy_of(&parent, cat);

    for op in EditOperation::iter() {
        let cost = language_cost(&policy, op, &mut session, &parent, &node);
        if op.has_language_cost() {
            assert!(cost > 0.0, "{} should pay for a p=100 word", op);
        } else {
            assert_eq!(cost, 0.0, "{} must not carry language cost", op);
        }
    }
}

#[rstest]
#[case(10)]
#[case(42)]
#[case(255)]
fn test_unknown_tag_fails_open(#[case] tag: u8) {
    let d = dict(&[("cat", 100)]);
    let policy = TypingPolicy::default();
    let mut counter = OperationCounter::new();
    {
        let mut session = SearchSession::new(&d, typed("cat")).with_profiler(&mut counter);
        let mut walker = Walker::new(&d);
        let c = walker.spell_path(&policy, &mut session, "c");
        let parent = walker.node(c).clone();
        let edge = common::edge_for(&d, parent.dict_pos, 'a');
        let mut node = SearchNode::child_of(&parent, c, &edge);
        node.scoring.accumulated_cost = 99.0;

        update_node_with_tag(&policy, tag, &mut session, &parent, &mut node);

        assert_eq!(node.scoring, parent.scoring);
        assert_eq!(node.input, parent.input);
    }
    // Only the single MATCH on 'c' reached the profiler.
    assert_eq!(counter.total(), 1);
    assert_eq!(counter.count(EditOperation::Match), 1);
}

#[test]
fn test_known_tag_matches_typed_entry_point() {
    let d = dict(&[("cat", 100)]);
    let policy = TypingPolicy::default();
    let mut session = SearchSession::new(&d, typed("cat"));
    let walker = Walker::new(&d);
    let root = walker.node(walker.root).clone();
    let edge = common::edge_for(&d, root.dict_pos, 'c');

    let mut by_tag = SearchNode::child_of(&root, walker.root, &edge);
    update_node_with_tag(&policy, EditOperation::Match.tag(), &mut session, &root, &mut by_tag);
    assert_eq!(by_tag.input_index(), 1);
    assert_eq!(by_tag.accumulated_cost(), 0.0);
}

#[test]
fn test_gesture_normalizes_by_input_length() {
    let d = dict(&[("abc", 100)]);
    let typing = TypingPolicy::default();
    let gesture = GesturePolicy::default();
    let input = typed("abcd");

    let mut session = SearchSession::new(&d, input.clone());
    let mut walker = Walker::new(&d);
    let a = walker.raw_child(&session, walker.root, 'a');
    let omitted = walker.step(&gesture, &mut session, a, 'b', EditOperation::Omission);
    assert_close(
        walker.node(omitted).accumulated_cost(),
        GestureWeights::default().gesture_omission_cost / 4.0,
    );

    let mut session = SearchSession::new(&d, input);
    let mut walker = Walker::new(&d);
    let a = walker.raw_child(&session, walker.root, 'a');
    let omitted = walker.step(&typing, &mut session, a, 'b', EditOperation::Omission);
    // 'b' is the second letter of the word, so the first letter was skipped.
    assert_close(
        walker.node(omitted).accumulated_cost(),
        TypingWeights::default().omission_cost_first_char,
    );
    assert_eq!(walker.node(omitted).edit_count(), 1);
    assert_eq!(walker.node(omitted).input_index(), 0);
}

#[test]
fn test_normalization_guards_empty_input() {
    let d = dict(&[("a", 100)]);
    let gesture = GesturePolicy::default();
    let mut session = SearchSession::new(&d, InputSequence::default());
    let mut walker = Walker::new(&d);
    let a = walker.step(&gesture, &mut session, walker.root, 'a', EditOperation::Completion);
    let node = walker.node(a);
    assert!(node.accumulated_cost().is_finite());
    assert_close(
        node.accumulated_cost(),
        GestureWeights::default().gesture_first_completion_cost,
    );
}

#[test]
fn test_substitution_is_not_counted_as_edit() {
    let d = dict(&[("cat", 100)]);
    let policy = TypingPolicy::default();
    let mut session = SearchSession::new(&d, typed("cpt"));
    let mut walker = Walker::new(&d);
    let c = walker.spell_path(&policy, &mut session, "c");
    let sub = walker.step(&policy, &mut session, c, 'a', EditOperation::Substitution);
    let node = walker.node(sub);
    assert_eq!(node.edit_count(), 0);
    assert_eq!(node.input_index(), 1);
    assert_close(
        node.accumulated_cost(),
        TypingWeights::default().substitution_cost,
    );

    // The follow-up match is where the typed key is charged as a proximity correction.
    let matched = walker.settle(&policy, &mut session, sub, EditOperation::Match);
    assert_eq!(walker.node(matched).proximity_count(), 1);
    assert_eq!(walker.node(matched).input_index(), 2);
}

#[test]
fn test_gesture_rejects_typing_only_operations() {
    let gesture = GesturePolicy::default();
    for op in EditOperation::iter() {
        assert_eq!(gesture.supports(op), !op.is_typing_only(), "{}", op);
    }
    assert!(gesture.substitution_cost() >= keysuggest::consts::MAX_VALUE_FOR_WEIGHTING);
    assert!(gesture.additional_proximity_cost() >= keysuggest::consts::MAX_VALUE_FOR_WEIGHTING);
}

#[test]
fn test_proximity_match_pays_first_proximity_once() {
    let d = dict(&[("rat", 100), ("ray", 100)]);
    let policy = TypingPolicy::default();
    let w = TypingWeights::default();
    // 't' typed where 'r' is in the word, then 't' typed where 'y' is.
    let mut session = SearchSession::new(&d, typed("tat"));
    let mut walker = Walker::new(&d);
    let r = walker.step(&policy, &mut session, walker.root, 'r', EditOperation::Match);
    let first = w.distance_weight_length + w.first_char_proximity_cost + w.first_proximity_cost;
    assert_close(walker.node(r).accumulated_cost(), first);
    assert_eq!(walker.node(r).proximity_count(), 1);

    let a = walker.step(&policy, &mut session, r, 'a', EditOperation::Match);
    let y = walker.step(&policy, &mut session, a, 'y', EditOperation::Match);
    let second = w.distance_weight_length + w.proximity_cost;
    assert_close(walker.node(y).accumulated_cost(), first + second);
    assert_eq!(walker.node(y).proximity_count(), 2);
}

#[test]
fn test_new_word_pays_for_the_finished_word_in_context() {
    let mut d = dict(&[("good", 200), ("the", 150), ("cat", 100)]);
    d.add_bigram("good", "the", 10).unwrap();
    let good = d.lookup("good");
    let the_pos = d.lookup("the").unwrap();
    let policy = TypingPolicy::default();
    let w = TypingWeights::default();
    let mut session = SearchSession::new(&d, typed("thecat")).with_prev_word(good);
    let mut walker = Walker::with_prev_word(&d, good);

    let the = walker.spell_path(&policy, &mut session, "the");
    let parent = walker.node(the).clone();
    assert!(parent.is_terminal);
    assert!(session.cache().is_empty());

    let mut next = SearchNode::next_word_of(&parent, the, d.root());
    update_node(&policy, EditOperation::NewWord, &mut session, &parent, &mut next);

    let p = probability_for_bigram(150, 10) as i32;
    let language = (MAX_PROBABILITY - p) as f32 / MAX_PROBABILITY as f32 * w.distance_weight_language;
    let spatial = w.cost_new_word * w.multi_word_cost_multiplier;
    assert_close(next.scoring.language_distance, language);
    assert_close(next.scoring.spatial_distance, spatial);
    assert_close(next.accumulated_cost(), spatial + language);
    assert_eq!(next.input_index(), 3);
    assert_eq!(next.word_count, 2);
    assert_eq!(next.prev_word_pos, Some(the_pos));

    // One lookup, keyed by the finished word and its own context.
    assert_eq!(session.cache().len(), 1);
    let key = BigramKey {
        prev: good,
        word: the_pos,
    };
    assert_eq!(session.cache().get(&key), Some(p as i16));
}

#[test]
fn test_space_substitution_consumes_one_touch() {
    let d = dict(&[("the", 150), ("cat", 100)]);
    let policy = TypingPolicy::default();
    let w = TypingWeights::default();
    let mut session = SearchSession::new(&d, typed("thexcat"));
    let mut walker = Walker::new(&d);

    let the = walker.spell_path(&policy, &mut session, "the");
    let parent = walker.node(the).clone();
    let mut next = SearchNode::next_word_of(&parent, the, d.root());
    update_node(&policy, EditOperation::SpaceSubstitution, &mut session, &parent, &mut next);

    let expected = (w.space_substitution_cost + w.cost_new_word) * w.multi_word_cost_multiplier;
    assert_close(next.scoring.spatial_distance, expected);
    assert_close(next.scoring.language_distance, 0.0);
    assert_eq!(next.input_index(), parent.input_index() + 1);
    assert_eq!(next.edit_count(), 0);
    assert!(session.cache().is_empty());
}

#[test]
fn test_additional_proximity_keeps_cursor() {
    let d = dict(&[("cat", 100)]);
    let policy = TypingPolicy::default();
    let w = TypingWeights::default();
    let mut session = SearchSession::new(&d, typed("cgt"));
    let mut walker = Walker::new(&d);

    let c = walker.spell_path(&policy, &mut session, "c");
    let a = walker.step(&policy, &mut session, c, 'a', EditOperation::AdditionalProximity);
    let node = walker.node(a);
    assert_close(node.accumulated_cost(), w.additional_proximity_cost);
    assert_eq!(node.input_index(), 1);
    assert_eq!(node.edit_count(), 0);
    assert_eq!(node.proximity_count(), 0);
}

#[test]
fn test_gesture_match_after_omission_is_not_a_doubled_letter() {
    let d = dict(&[("cat", 100)]);
    let gesture = GesturePolicy::default();
    let w = GestureWeights::default();
    let mut session = SearchSession::new(&d, typed("ct"));
    let mut walker = Walker::new(&d);

    let c = walker.spell_path(&gesture, &mut session, "c");
    assert_eq!(walker.node(c).input_index(), 1);
    let a = walker.raw_child(&session, c, 'a');
    let t = walker.step(&gesture, &mut session, a, 't', EditOperation::Omission);
    assert_eq!(walker.node(t).input_index(), 1);

    // The copy sits on the same trie position as its parent and must consume the 't' touch.
    let matched = walker.settle(&gesture, &mut session, t, EditOperation::Match);
    let node = walker.node(matched);
    assert_eq!(node.input_index(), 2);
    assert_close(node.scoring.spatial_distance, w.gesture_omission_cost / 2.0);
}
