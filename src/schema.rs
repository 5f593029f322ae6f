//! Data model for the name directory
//!
//! [`NameRecord`] is the single typed shape every consumer reads. Defaults are
//! applied once by the normalizer, so downstream code never inspects raw JSON.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Gender classification of a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    Boy,
    Girl,
    #[default]
    Unisex,
}

impl Gender {
    /// Parse a raw gender label (case-insensitive). Unknown labels yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "boy" | "male" | "m" => Some(Self::Boy),
            "girl" | "female" | "f" => Some(Self::Girl),
            "unisex" | "both" | "u" => Some(Self::Unisex),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boy => "Boy",
            Self::Girl => "Girl",
            Self::Unisex => "Unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which default applies to a record that carries no `verified` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifiedDefault {
    /// Bulk shard import: unverified unless stated
    Import,
    /// Manually added through update mode: verified unless stated
    ManualAdd,
}

impl VerifiedDefault {
    pub fn value(self) -> bool {
        matches!(self, Self::ManualAdd)
    }
}

/// A single name entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    /// Canonical (trimmed, title-cased) name; identity key
    pub name: String,

    #[serde(default)]
    pub meaning: String,

    #[serde(default)]
    pub gender: Gender,

    /// Free-form origin, possibly multi-valued ("Arabic, Persian", "Arabic/Urdu")
    #[serde(default)]
    pub origin: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_spelling: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub verified: bool,

    /// `<two-letter-prefix><sequence>`, e.g. "aa101"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Set on generated spelling variants; points at the source name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<String>,

    /// Fields this crate does not interpret, carried through re-sharding untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NameRecord {
    /// Minimal record with every optional field at its default
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            meaning: String::new(),
            gender,
            origin: String::new(),
            transliteration: None,
            arabic_spelling: None,
            tags: Vec::new(),
            verified: false,
            id: None,
            variant_of: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = meaning.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Identity key used for deduplication
    pub fn key(&self) -> String {
        crate::normalize::name_key(&self.name)
    }

    /// Letter bucket this record belongs to
    pub fn bucket(&self) -> Bucket {
        Bucket::for_name(&self.name)
    }
}

/// First-letter grouping of the canonical dataset
///
/// Ordering puts every letter bucket before `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    /// Uppercased first character of the name
    Letter(String),
    /// Names starting with a non-alphabetic character
    Other,
}

impl Bucket {
    pub fn for_name(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_alphabetic() => Self::Letter(c.to_uppercase().collect()),
            _ => Self::Other,
        }
    }

    /// Lowercase stem used in shard and page file names ("a", "other")
    pub fn file_stem(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(l) => f.write_str(l),
            Self::Other => f.write_str("Other"),
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
