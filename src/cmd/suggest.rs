use crate::reports;
use clap::Args;
use keysuggest::core_types::Suggestion;
use keysuggest::dictionary::{Dictionary, MemoryDictionary};
use keysuggest::geometry::KeyboardLayout;
use keysuggest::input::InputSequence;
use keysuggest::profiler::OperationCounter;
use keysuggest::search::suggest;
use keysuggest::{build_policy, PolicyConfig, SearchSession, SgResult};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub config: PolicyConfig,

    /// Typed words to correct; each runs in its own session.
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Word typed before the inputs, used as bigram context.
    #[arg(short, long)]
    pub prev_word: Option<String>,

    /// Print how often each operation was applied.
    #[arg(long, default_value_t = false)]
    pub profile: bool,
}

struct InputReport {
    input: String,
    suggestions: Vec<Suggestion>,
    counter: OperationCounter,
}

pub fn run(
    args: SuggestArgs,
    config: &PolicyConfig,
    dictionary: &MemoryDictionary,
    layout: &KeyboardLayout,
) -> SgResult<()> {
    let policy = build_policy(config);
    let prev_word = args.prev_word.as_deref().and_then(|w| {
        let pos = dictionary.lookup(w);
        match pos.and_then(|p| dictionary.word_at(p)) {
            Some(word) => info!("Bigram context: '{}'.", word),
            None => info!("Context word '{}' is not in the dictionary; ignoring it.", w),
        }
        pos
    });

    info!(
        "🔎 Suggesting for {} input(s) with the {} policy...",
        args.inputs.len(),
        config.modality
    );
    let start = Instant::now();

    let reports: Vec<InputReport> = args
        .inputs
        .par_iter()
        .map(|text| -> SgResult<InputReport> {
            let input = InputSequence::from_text(layout, text)?;
            let mut counter = OperationCounter::new();
            let suggestions = {
                let mut session = SearchSession::new(dictionary, input)
                    .with_prev_word(prev_word)
                    .with_profiler(&mut counter);
                suggest(policy.as_ref(), &mut session, &config.search)
            };
            debug!("'{}': {} node updates.", text, counter.total());
            Ok(InputReport {
                input: text.clone(),
                suggestions,
                counter,
            })
        })
        .collect::<SgResult<_>>()?;

    info!("Done in {:.2?}.", start.elapsed());

    for report in &reports {
        reports::print_suggestions(&report.input, &report.suggestions);
        if args.profile {
            reports::print_operation_counts(&report.counter);
        }
    }
    Ok(())
}
