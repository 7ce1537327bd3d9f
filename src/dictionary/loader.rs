use super::MemoryDictionary;
use crate::error::{SgResult, SuggestError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct RawWords {
    pub entries: Vec<(String, u8)>,
    pub skipped: usize,
}

pub struct RawBigrams {
    pub entries: Vec<(String, String, u8)>,
    pub skipped: usize,
}

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader)
}

/// Reads `word<TAB>probability` rows. Probabilities are clamped to 0..=255.
pub fn load_words<R: Read>(reader: R) -> SgResult<RawWords> {
    let mut rdr = tsv_reader(reader);
    let mut entries = Vec::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("[Row {}] TSV parse error: {}", row_idx + 1, e);
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 2 {
            skipped += 1;
            continue;
        }
        let word = rec[0].trim();
        if word.is_empty() {
            skipped += 1;
            continue;
        }
        let probability: i64 = match rec[1].trim().parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        entries.push((word.to_string(), probability.clamp(0, 255) as u8));
    }

    Ok(RawWords { entries, skipped })
}

/// Reads `prev<TAB>word<TAB>encoded` rows, `encoded` in 0..=15.
pub fn load_bigrams<R: Read>(reader: R) -> SgResult<RawBigrams> {
    let mut rdr = tsv_reader(reader);
    let mut entries = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let Ok(rec) = result else {
            skipped += 1;
            continue;
        };
        if rec.len() < 3 {
            skipped += 1;
            continue;
        }
        let encoded: u8 = match rec[2].trim().parse() {
            Ok(v) => v,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        entries.push((rec[0].trim().to_string(), rec[1].trim().to_string(), encoded));
    }

    Ok(RawBigrams { entries, skipped })
}

pub fn build_dictionary(words: RawWords, bigrams: Option<RawBigrams>) -> SgResult<MemoryDictionary> {
    if words.entries.is_empty() {
        return Err(SuggestError::Validation(
            "Word list resulted in 0 valid words.".to_string(),
        ));
    }

    let mut dict = MemoryDictionary::new();
    for (word, probability) in &words.entries {
        dict.insert(word, *probability)?;
    }

    let mut orphan_bigrams = 0;
    if let Some(bigrams) = bigrams {
        for (prev, word, encoded) in &bigrams.entries {
            if dict.add_bigram(prev, word, *encoded).is_err() {
                orphan_bigrams += 1;
            }
        }
        if bigrams.skipped > 0 || orphan_bigrams > 0 {
            warn!(
                "Skipped {} malformed and {} unknown-word bigram rows.",
                bigrams.skipped, orphan_bigrams
            );
        }
    }

    if words.skipped > 0 {
        warn!("Skipped {} invalid rows in word list.", words.skipped);
    }

    info!(
        "Dictionary ready: {} words, {} bigrams.",
        dict.word_count(),
        dict.bigram_count()
    );
    Ok(dict)
}

pub fn load_dictionary<P: AsRef<Path>>(
    words_path: P,
    bigrams_path: Option<P>,
) -> SgResult<MemoryDictionary> {
    info!("Loading words from: {}", words_path.as_ref().display());
    let words = load_words(File::open(words_path.as_ref())?)?;

    let bigrams = match bigrams_path {
        Some(p) => {
            info!("Loading bigrams from: {}", p.as_ref().display());
            Some(load_bigrams(File::open(p.as_ref())?)?)
        }
        None => None,
    };

    build_dictionary(words, bigrams)
}
