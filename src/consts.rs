/// Highest unigram / bigram probability a dictionary can report.
pub const MAX_PROBABILITY: i32 = 255;

/// Highest encoded bigram step stored next to a word.
pub const MAX_BIGRAM_ENCODED_PROBABILITY: i32 = 15;

/// Cost returned for operations a policy does not support, and for
/// multi-word phrases the dictionary does not know.
pub const MAX_VALUE_FOR_WEIGHTING: f32 = 10_000_000.0;

/// Normalized squared length reported for keys that are not near a touch point.
pub const MAX_POINT_TO_KEY_LENGTH: f32 = 10_000_000.0;

/// Marker for "no code point" (e.g. the root of the trie).
pub const NOT_A_CODE_POINT: u32 = 0;

/// Default radius, in key widths, inside which a key counts as "nearby".
pub const DEFAULT_PROXIMITY_RADIUS: f32 = 1.5;
