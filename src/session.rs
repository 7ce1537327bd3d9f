use crate::cache::{BigramCostCache, BigramKey};
use crate::consts::{MAX_PROBABILITY, MAX_VALUE_FOR_WEIGHTING};
use crate::core_types::DictPos;
use crate::dictionary::Dictionary;
use crate::input::InputSequence;
use crate::node::SearchNode;
use crate::operation::EditOperation;
use crate::profiler::{NoopProfiler, OperationProfiler};

/// State shared by every node update of one suggestion request.
///
/// A session owns its bigram cache and is never shared between threads;
/// parallel requests each build their own.
pub struct SearchSession<'a> {
    input: InputSequence,
    dictionary: &'a dyn Dictionary,
    prev_word: Option<DictPos>,
    cache: BigramCostCache,
    profiler: Box<dyn OperationProfiler + 'a>,
}

impl<'a> SearchSession<'a> {
    pub fn new(dictionary: &'a dyn Dictionary, input: InputSequence) -> Self {
        Self {
            input,
            dictionary,
            prev_word: None,
            cache: BigramCostCache::new(),
            profiler: Box::new(NoopProfiler),
        }
    }

    /// Word typed before this input, used as bigram context of the first word.
    pub fn with_prev_word(mut self, prev_word: Option<DictPos>) -> Self {
        self.prev_word = prev_word;
        self
    }

    pub fn with_profiler<P: OperationProfiler + 'a>(mut self, profiler: P) -> Self {
        self.profiler = Box::new(profiler);
        self
    }

    #[inline(always)]
    pub fn input(&self) -> &InputSequence {
        &self.input
    }

    #[inline(always)]
    pub fn input_size(&self) -> usize {
        self.input.len()
    }

    pub fn dictionary(&self) -> &'a dyn Dictionary {
        self.dictionary
    }

    pub fn prev_word(&self) -> Option<DictPos> {
        self.prev_word
    }

    pub fn cache(&self) -> &BigramCostCache {
        &self.cache
    }

    pub(crate) fn profile(&mut self, op: EditOperation, node: &SearchNode) {
        self.profiler.record(op, node);
    }

    /// Probability of the word ending at `node` given the word before it.
    /// Unknown pairs and first words back off to the unigram probability.
    pub fn node_probability(&mut self, node: &SearchNode) -> i16 {
        let key = BigramKey {
            prev: node.prev_word_pos,
            word: node.dict_pos,
        };
        let dictionary = self.dictionary;
        let unigram = node.probability as i16;
        self.cache.get_or_insert_with(key, || match key.prev {
            Some(prev) => dictionary
                .bigram_probability(prev, key.word)
                .map_or(unigram, i16::from),
            None => unigram,
        })
    }

    /// `(MAX - p) / MAX` for the word ending at `node`. Phrases made of two
    /// one-letter words get [`MAX_VALUE_FOR_WEIGHTING`].
    pub fn node_improbability(&mut self, node: &SearchNode) -> f32 {
        if node.has_multiple_words() && !node.is_valid_multiple_word_suggestion() {
            return MAX_VALUE_FOR_WEIGHTING;
        }
        let probability = self.node_probability(node) as i32;
        (MAX_PROBABILITY - probability) as f32 / MAX_PROBABILITY as f32
    }
}
