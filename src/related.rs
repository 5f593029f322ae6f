//! Related-name scoring
//!
//! Ranks other records of the canonical dataset as alternatives to a target
//! name. Scoring is additive:
//!
//! | Signal | Points |
//! |---|---|
//! | same gender | +10 |
//! | different gender, one side Unisex | +5 |
//! | last three letters match (case-insensitive) | +20 |
//! | identical non-empty origin string | +5 |
//! | same first letter (case-insensitive) | +3 |
//!
//! Boy/Girl pairs are excluded outright. Only candidates scoring above
//! [`MIN_SCORE`] are returned, so gender compatibility alone never qualifies.
//! Ties keep canonical dataset order; there is no randomness here.

use serde::Serialize;

use crate::merge::CanonicalDataset;
use crate::normalize::name_key;
use crate::schema::{Gender, NameRecord};

pub const SAME_GENDER: u32 = 10;
pub const UNISEX_GENDER: u32 = 5;
pub const RHYME: u32 = 20;
pub const SAME_ORIGIN: u32 = 5;
pub const SAME_INITIAL: u32 = 3;

/// Candidates must score strictly more than this
pub const MIN_SCORE: u32 = 10;

/// Default number of related names per record
pub const DEFAULT_LIMIT: usize = 6;

/// Length of the suffix compared for the rhyme bonus
const RHYME_CHARS: usize = 3;

/// A candidate with its score
#[derive(Debug, Clone, Serialize)]
pub struct RelatedName<'a> {
    pub record: &'a NameRecord,
    pub score: u32,
}

fn gender_points(target: Gender, candidate: Gender) -> Option<u32> {
    if target == candidate {
        Some(SAME_GENDER)
    } else if target == Gender::Unisex || candidate == Gender::Unisex {
        Some(UNISEX_GENDER)
    } else {
        None
    }
}

/// Last three characters, lowercased (the whole name if shorter)
fn rhyme_suffix(name: &str) -> String {
    let lower: Vec<char> = name.to_lowercase().chars().collect();
    let start = lower.len().saturating_sub(RHYME_CHARS);
    lower[start..].iter().collect()
}

fn initial(name: &str) -> Option<String> {
    name.chars().next().map(|c| c.to_lowercase().collect())
}

/// Score `candidate` against `target`; `None` when the genders are incompatible
pub fn score(target: &NameRecord, candidate: &NameRecord) -> Option<u32> {
    let mut total = gender_points(target.gender, candidate.gender)?;

    if rhyme_suffix(&target.name) == rhyme_suffix(&candidate.name) {
        total += RHYME;
    }

    if !target.origin.is_empty() && target.origin == candidate.origin {
        total += SAME_ORIGIN;
    }

    if initial(&target.name).is_some() && initial(&target.name) == initial(&candidate.name) {
        total += SAME_INITIAL;
    }

    Some(total)
}

/// Up to `limit` related names for `target`, best first
pub fn related_names<'a>(
    target: &NameRecord,
    dataset: &'a CanonicalDataset,
    limit: usize,
) -> Vec<RelatedName<'a>> {
    let target_key = name_key(&target.name);

    let mut scored: Vec<RelatedName<'a>> = dataset
        .iter()
        .filter(|c| name_key(&c.name) != target_key)
        .filter_map(|c| {
            score(target, c)
                .filter(|s| *s > MIN_SCORE)
                .map(|score| RelatedName { record: c, score })
        })
        .collect();

    // Stable: equal scores keep dataset order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}
