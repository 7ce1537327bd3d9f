use crate::error::{SgResult, SuggestError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

/// Input modality. Selects the cost policy and the enabled operation set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumString, Display, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    #[default]
    Typing,
    Gesture,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolicyConfig {
    #[arg(long, default_value_t = Modality::Typing)]
    #[serde(default)]
    pub modality: Modality,
    #[command(flatten)]
    #[serde(default)]
    pub search: SearchParams,
    #[command(flatten)]
    #[serde(default)]
    pub typing: TypingWeights,
    #[command(flatten)]
    #[serde(default)]
    pub gesture: GestureWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 2)]
    pub max_edits: u16,
    #[arg(long, default_value_t = 3)]
    pub max_proximity: u16,
    #[arg(long, default_value_t = 200)]
    pub beam_width: usize,
    #[arg(long, default_value_t = 50_000)]
    pub max_expansions: usize,
    #[arg(long, default_value_t = 5)]
    pub max_results: usize,
    // How many trie characters may follow the typed input.
    #[arg(long, default_value_t = 4)]
    pub max_completion: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_edits: 2,
            max_proximity: 3,
            beam_width: 200,
            max_expansions: 50_000,
            max_results: 5,
            max_completion: 4,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingWeights {
    // === DISTANCE ===
    #[arg(long, default_value_t = 0.132)]
    pub distance_weight_length: f32,
    #[arg(long, default_value_t = 1.123)]
    pub distance_weight_language: f32,

    // === PROXIMITY ===
    #[arg(long, default_value_t = 0.095)]
    pub proximity_cost: f32,
    #[arg(long, default_value_t = 0.102)]
    pub first_char_proximity_cost: f32,
    #[arg(long, default_value_t = 0.019)]
    pub first_proximity_cost: f32,
    #[arg(long, default_value_t = 0.380)]
    pub additional_proximity_cost: f32,
    #[arg(long, default_value_t = 0.363)]
    pub substitution_cost: f32,

    // === OMISSION ===
    #[arg(long, default_value_t = 0.458)]
    pub omission_cost: f32,
    #[arg(long, default_value_t = 0.491)]
    pub omission_cost_same_char: f32,
    #[arg(long, default_value_t = 0.582)]
    pub omission_cost_first_char: f32,
    #[arg(long, default_value_t = 0.1)]
    pub intentional_omission_cost: f32,

    // === INSERTION / TRANSPOSITION ===
    #[arg(long, default_value_t = 0.730)]
    pub insertion_cost: f32,
    #[arg(long, default_value_t = 0.586)]
    pub insertion_cost_same_char: f32,
    #[arg(long, default_value_t = 0.70)]
    pub insertion_cost_proximity_char: f32,
    #[arg(long, default_value_t = 0.623)]
    pub insertion_cost_first_char: f32,
    #[arg(long, default_value_t = 0.516)]
    pub transposition_cost: f32,

    // === WORD BOUNDARIES ===
    #[arg(long, default_value_t = 0.319)]
    pub space_substitution_cost: f32,
    #[arg(long, default_value_t = 0.054)]
    pub cost_new_word: f32,
    #[arg(long, default_value_t = 0.001)]
    pub cost_later_word_uppercase: f32,
    #[arg(long, default_value_t = 1.0)]
    pub multi_word_cost_multiplier: f32,

    // === COMPLETION / TERMINAL ===
    #[arg(long, default_value_t = 0.598)]
    pub cost_first_completion: f32,
    #[arg(long, default_value_t = 0.12)]
    pub cost_completion: f32,
    #[arg(long, default_value_t = 0.144)]
    pub has_proximity_terminal_cost: f32,
    #[arg(long, default_value_t = 0.045)]
    pub has_edit_correction_terminal_cost: f32,
    #[arg(long, default_value_t = 0.444)]
    pub has_multi_word_terminal_cost: f32,
}

macro_rules! named_fields {
    ($self:ident; $($field:ident),* $(,)?) => {
        vec![$((stringify!($field), $self.$field)),*]
    };
}

impl TypingWeights {
    /// Every weight with its field name, in declaration order.
    pub fn fields(&self) -> Vec<(&'static str, f32)> {
        named_fields!(self;
            distance_weight_length,
            distance_weight_language,
            proximity_cost,
            first_char_proximity_cost,
            first_proximity_cost,
            additional_proximity_cost,
            substitution_cost,
            omission_cost,
            omission_cost_same_char,
            omission_cost_first_char,
            intentional_omission_cost,
            insertion_cost,
            insertion_cost_same_char,
            insertion_cost_proximity_char,
            insertion_cost_first_char,
            transposition_cost,
            space_substitution_cost,
            cost_new_word,
            cost_later_word_uppercase,
            multi_word_cost_multiplier,
            cost_first_completion,
            cost_completion,
            has_proximity_terminal_cost,
            has_edit_correction_terminal_cost,
            has_multi_word_terminal_cost,
        )
    }
}

impl Default for TypingWeights {
    fn default() -> Self {
        Self {
            distance_weight_length: 0.132,
            distance_weight_language: 1.123,
            proximity_cost: 0.095,
            first_char_proximity_cost: 0.102,
            first_proximity_cost: 0.019,
            additional_proximity_cost: 0.380,
            substitution_cost: 0.363,
            omission_cost: 0.458,
            omission_cost_same_char: 0.491,
            omission_cost_first_char: 0.582,
            intentional_omission_cost: 0.1,
            insertion_cost: 0.730,
            insertion_cost_same_char: 0.586,
            insertion_cost_proximity_char: 0.70,
            insertion_cost_first_char: 0.623,
            transposition_cost: 0.516,
            space_substitution_cost: 0.319,
            cost_new_word: 0.054,
            cost_later_word_uppercase: 0.001,
            multi_word_cost_multiplier: 1.0,
            cost_first_completion: 0.598,
            cost_completion: 0.12,
            has_proximity_terminal_cost: 0.144,
            has_edit_correction_terminal_cost: 0.045,
            has_multi_word_terminal_cost: 0.444,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureWeights {
    #[arg(long, default_value_t = 0.2)]
    pub gesture_distance_weight: f32,
    #[arg(long, default_value_t = 1.0)]
    pub gesture_language_weight: f32,
    #[arg(long, default_value_t = 0.6)]
    pub gesture_omission_cost: f32,
    #[arg(long, default_value_t = 0.8)]
    pub gesture_insertion_cost: f32,
    #[arg(long, default_value_t = 0.7)]
    pub gesture_transposition_cost: f32,
    #[arg(long, default_value_t = 0.05)]
    pub gesture_double_letter_cost: f32,
    #[arg(long, default_value_t = 0.4)]
    pub gesture_first_completion_cost: f32,
    #[arg(long, default_value_t = 0.1)]
    pub gesture_completion_cost: f32,
    #[arg(long, default_value_t = 0.1)]
    pub gesture_new_word_cost: f32,
    #[arg(long, default_value_t = 0.3)]
    pub gesture_multi_word_terminal_cost: f32,
    #[arg(long, default_value_t = 0.05)]
    pub gesture_edit_terminal_cost: f32,
}

impl GestureWeights {
    pub fn fields(&self) -> Vec<(&'static str, f32)> {
        named_fields!(self;
            gesture_distance_weight,
            gesture_language_weight,
            gesture_omission_cost,
            gesture_insertion_cost,
            gesture_transposition_cost,
            gesture_double_letter_cost,
            gesture_first_completion_cost,
            gesture_completion_cost,
            gesture_new_word_cost,
            gesture_multi_word_terminal_cost,
            gesture_edit_terminal_cost,
        )
    }
}

impl Default for GestureWeights {
    fn default() -> Self {
        Self {
            gesture_distance_weight: 0.2,
            gesture_language_weight: 1.0,
            gesture_omission_cost: 0.6,
            gesture_insertion_cost: 0.8,
            gesture_transposition_cost: 0.7,
            gesture_double_letter_cost: 0.05,
            gesture_first_completion_cost: 0.4,
            gesture_completion_cost: 0.1,
            gesture_new_word_cost: 0.1,
            gesture_multi_word_terminal_cost: 0.3,
            gesture_edit_terminal_cost: 0.05,
        }
    }
}

impl PolicyConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SgResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects negative or non-finite per-operation constants. Either would
    /// let the accumulated cost of a path decrease or stop ordering.
    pub fn validate(&self) -> SgResult<()> {
        let sections = [("typing", self.typing.fields()), ("gesture", self.gesture.fields())];
        for (section, fields) in &sections {
            if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
                return Err(SuggestError::Config(format!(
                    "{}.{} must be a finite non-negative number, got {}",
                    section, name, v
                )));
            }
        }
        if self.search.max_results == 0 {
            return Err(SuggestError::Config(
                "search.max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays values the user passed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &PolicyConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        if matches.value_source("modality") == Some(ValueSource::CommandLine) {
            self.modality = cli.modality;
        }

        update_if_present!(search.max_edits);
        update_if_present!(search.max_proximity);
        update_if_present!(search.beam_width);
        update_if_present!(search.max_expansions);
        update_if_present!(search.max_results);
        update_if_present!(search.max_completion);

        update_if_present!(typing.distance_weight_length);
        update_if_present!(typing.distance_weight_language);
        update_if_present!(typing.proximity_cost);
        update_if_present!(typing.first_char_proximity_cost);
        update_if_present!(typing.first_proximity_cost);
        update_if_present!(typing.additional_proximity_cost);
        update_if_present!(typing.substitution_cost);
        update_if_present!(typing.omission_cost);
        update_if_present!(typing.omission_cost_same_char);
        update_if_present!(typing.omission_cost_first_char);
        update_if_present!(typing.intentional_omission_cost);
        update_if_present!(typing.insertion_cost);
        update_if_present!(typing.insertion_cost_same_char);
        update_if_present!(typing.insertion_cost_proximity_char);
        update_if_present!(typing.insertion_cost_first_char);
        update_if_present!(typing.transposition_cost);
        update_if_present!(typing.space_substitution_cost);
        update_if_present!(typing.cost_new_word);
        update_if_present!(typing.cost_later_word_uppercase);
        update_if_present!(typing.multi_word_cost_multiplier);
        update_if_present!(typing.cost_first_completion);
        update_if_present!(typing.cost_completion);
        update_if_present!(typing.has_proximity_terminal_cost);
        update_if_present!(typing.has_edit_correction_terminal_cost);
        update_if_present!(typing.has_multi_word_terminal_cost);

        update_if_present!(gesture.gesture_distance_weight);
        update_if_present!(gesture.gesture_language_weight);
        update_if_present!(gesture.gesture_omission_cost);
        update_if_present!(gesture.gesture_insertion_cost);
        update_if_present!(gesture.gesture_transposition_cost);
        update_if_present!(gesture.gesture_double_letter_cost);
        update_if_present!(gesture.gesture_first_completion_cost);
        update_if_present!(gesture.gesture_completion_cost);
        update_if_present!(gesture.gesture_new_word_cost);
        update_if_present!(gesture.gesture_multi_word_terminal_cost);
        update_if_present!(gesture.gesture_edit_terminal_cost);
    }
}
