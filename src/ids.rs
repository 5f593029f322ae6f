//! Record ID assignment
//!
//! IDs look like `aa101`: a two-letter prefix taken from the name, followed by
//! a sequence number. A new ID is always one past the largest numeric suffix
//! already used under the same prefix.

use std::cmp::Ordering;

use crate::error::{Result, VaultError};
use crate::schema::NameRecord;

/// Two-character lowercase prefix for a name ("Aaliyah" -> "aa").
///
/// Names shorter than two characters have no prefix.
pub fn id_prefix(name: &str) -> Option<String> {
    let prefix: String = name.trim().chars().take(2).collect();
    if prefix.chars().count() < 2 {
        return None;
    }
    Some(prefix.to_lowercase())
}

/// Digit suffix of `id` under `prefix` with leading zeros stripped, if `id`
/// is a plain `<prefix><digits>` ID
fn suffix_digits<'a>(id: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = id.strip_prefix(prefix)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = rest.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed })
}

/// Numeric order of two normalized digit strings
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Decimal increment of a digit string, with no width limit
fn increment(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    let mut i = out.len();
    loop {
        if i == 0 {
            out.insert(0, '1');
            break;
        }
        i -= 1;
        match out[i].to_digit(10) {
            Some(9) => out[i] = '0',
            Some(d) => {
                out[i] = char::from_digit(d + 1, 10).unwrap_or('0');
                break;
            }
            None => break,
        }
    }
    out.into_iter().collect()
}

/// Next free ID under `prefix`, scanning every existing record.
///
/// Suffixes are compared as decimal strings, so the result is greater than
/// every existing suffix however long it is. IDs that carry the prefix but no
/// plain numeric suffix (e.g. `aa101_var`) are ignored.
pub fn next_id<'a, I>(records: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a NameRecord>,
{
    let max = records
        .into_iter()
        .filter_map(|r| r.id.as_deref())
        .filter_map(|id| suffix_digits(id, prefix))
        .max_by(|a, b| cmp_digits(a, b))
        .unwrap_or("0");

    format!("{}{}", prefix, increment(max))
}

/// Fail if `id` is already carried by any record
pub fn ensure_unused<'a, I>(records: I, id: &str) -> Result<()>
where
    I: IntoIterator<Item = &'a NameRecord>,
{
    if records.into_iter().any(|r| r.id.as_deref() == Some(id)) {
        return Err(VaultError::DuplicateId { id: id.to_string() });
    }
    Ok(())
}
