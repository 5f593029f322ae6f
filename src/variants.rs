//! Spelling variant expansion
//!
//! Transliterated names have common alternate spellings (Yusuf / Yoosuf,
//! Amina / Aminah). Each rule rewrites a whole name; a variant inherits the
//! source record's meaning and points back at it through `variant_of`.

use std::collections::BTreeMap;

use crate::merge::CanonicalDataset;
use crate::normalize::{canonical_name, name_key};
use crate::schema::NameRecord;

/// Substring rewrites, applied one at a time (case-sensitive)
const REWRITES: &[(&str, &str)] = &[("oo", "u"), ("u", "oo"), ("ee", "i"), ("i", "ee")];

/// Raw spelling variants of one name, in rule order
pub fn spelling_variants(name: &str) -> Vec<String> {
    let mut out: Vec<String> = REWRITES
        .iter()
        .filter(|(from, _)| name.contains(from))
        .map(|(from, to)| name.replace(from, to))
        .collect();

    if name.ends_with('a') {
        out.push(format!("{}h", name));
    }

    out
}

/// Variant records for the whole dataset.
///
/// Variants that collide with an existing name (or with their own source) are
/// dropped. Two sources producing the same variant keep the later one. Output
/// is sorted by name.
pub fn expand_variants(dataset: &CanonicalDataset) -> Vec<NameRecord> {
    let mut unique: BTreeMap<String, NameRecord> = BTreeMap::new();

    for source in dataset.iter() {
        for variant in spelling_variants(&source.name) {
            let variant = canonical_name(&variant);
            if dataset.contains(&variant) {
                continue;
            }

            let mut record = source.clone();
            record.name = variant.clone();
            record.variant_of = Some(source.name.clone());
            record.id = source.id.as_ref().map(|id| format!("{}_var", id));
            unique.insert(name_key(&variant), record);
        }
    }

    let mut variants: Vec<NameRecord> = unique.into_values().collect();
    variants.sort_by(|a, b| a.name.cmp(&b.name));
    variants
}
