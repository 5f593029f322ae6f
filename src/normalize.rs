//! Record normalization
//!
//! Turns one raw JSON object into a well-formed [`NameRecord`]. Pure: no I/O,
//! no logging. The caller decides whether a [`VaultError::Validation`] skips the
//! record or aborts.

use serde_json::{Map, Value};

use crate::error::{Result, VaultError};
use crate::schema::{Gender, NameRecord, VerifiedDefault};

/// Fields interpreted by the normalizer; everything else lands in `extra`
const KNOWN_FIELDS: &[&str] = &[
    "name",
    "meaning",
    "gender",
    "origin",
    "transliteration",
    "arabic_spelling",
    "tags",
    "verified",
    "id",
    "variant_of",
];

/// Canonical display form of a name.
///
/// Collapses whitespace runs, trims, and title-cases each word: the first
/// letter after a space or hyphen is uppercased and the rest lowercased, so
/// "ALI", "ali" and " Ali " all become "Ali". Apostrophes do not start a new
/// word ("shu'aib" -> "Shu'aib").
pub fn canonical_name(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut in_word = false;

    for c in collapsed.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphanumeric() || c == '\'' || c == '\u{2019}';
    }

    out
}

/// Deduplication key: two names are the same entry iff their keys are equal
pub fn name_key(raw: &str) -> String {
    canonical_name(raw).to_lowercase()
}

/// Normalize a raw JSON value into a [`NameRecord`]
pub fn normalize_record(raw: &Value, verified_default: VerifiedDefault) -> Result<NameRecord> {
    let obj = raw
        .as_object()
        .ok_or_else(|| VaultError::validation(format!("expected an object, got {}", kind_of(raw))))?;

    let name = match obj.get("name") {
        Some(Value::String(s)) => canonical_name(s),
        Some(other) => {
            return Err(VaultError::validation(format!(
                "'name' must be a string, got {}",
                kind_of(other)
            )))
        }
        None => return Err(VaultError::validation("missing 'name' field")),
    };

    if name.is_empty() {
        return Err(VaultError::validation("'name' is empty"));
    }

    let gender = string_field(obj, "gender")
        .and_then(|g| Gender::parse(&g))
        .unwrap_or_default();

    let extra: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| !KNOWN_FIELDS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(NameRecord {
        name,
        meaning: string_field(obj, "meaning").unwrap_or_default(),
        gender,
        origin: origin_field(obj),
        transliteration: string_field(obj, "transliteration"),
        arabic_spelling: string_field(obj, "arabic_spelling"),
        tags: tags_field(obj),
        verified: obj
            .get("verified")
            .and_then(Value::as_bool)
            .unwrap_or_else(|| verified_default.value()),
        id: id_field(obj),
        variant_of: string_field(obj, "variant_of"),
        extra,
    })
}

/// Trimmed, non-empty string field
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Origin may arrive as a string or as a list of strings
fn origin_field(obj: &Map<String, Value>) -> String {
    match obj.get("origin") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Tags may arrive as a list or a single string; non-string entries are dropped
fn tags_field(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

fn id_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
