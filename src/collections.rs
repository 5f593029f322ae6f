//! Curated collections, keyword themes and origin groups
//!
//! All three are filters over the canonical dataset, so results always come
//! back in canonical iteration order regardless of how a spec lists its names.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::merge::CanonicalDataset;
use crate::normalize::{canonical_name, name_key};
use crate::schema::NameRecord;

/// A named, curated list of target names
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub names: &'static [&'static str],
}

/// A named keyword set matched against meanings
#[derive(Debug, Clone, Serialize)]
pub struct ThemeSpec {
    pub slug: &'static str,
    pub title: &'static str,
    pub keywords: &'static [&'static str],
}

/// Records whose name matches one of `spec.names`; unknown names are ignored
pub fn resolve_collection<'a>(
    spec: &CollectionSpec,
    dataset: &'a CanonicalDataset,
) -> Vec<&'a NameRecord> {
    let wanted: HashSet<String> = spec.names.iter().map(|n| name_key(n)).collect();
    dataset
        .iter()
        .filter(|r| wanted.contains(&name_key(&r.name)))
        .collect()
}

/// Records whose meaning contains at least one keyword (case-insensitive)
pub fn resolve_theme<'a>(spec: &ThemeSpec, dataset: &'a CanonicalDataset) -> Vec<&'a NameRecord> {
    let keywords: Vec<String> = spec
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    dataset
        .iter()
        .filter(|r| {
            let meaning = r.meaning.to_lowercase();
            keywords.iter().any(|k| meaning.contains(k.as_str()))
        })
        .collect()
}

/// Shortest origin label that counts as a group
pub const MIN_ORIGIN_CHARS: usize = 3;

/// Split an origin field on `,` and `/`, trimming and dropping short parts
pub fn origin_parts(origin: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = Vec::new();
    for part in origin.split([',', '/']).map(str::trim) {
        if part.chars().count() >= MIN_ORIGIN_CHARS && !parts.contains(&part) {
            parts.push(part);
        }
    }
    parts
}

/// Records grouped by origin label, case-folded to title case
#[derive(Debug, Default, Serialize)]
pub struct OriginGroups<'a> {
    groups: BTreeMap<String, Vec<&'a NameRecord>>,
}

impl<'a> OriginGroups<'a> {
    /// Add every record to each of its origin groups
    pub fn build(dataset: &'a CanonicalDataset) -> Self {
        let mut groups: BTreeMap<String, Vec<&'a NameRecord>> = BTreeMap::new();
        for record in dataset.iter() {
            for part in origin_parts(&record.origin) {
                let members = groups.entry(canonical_name(part)).or_default();
                // "Arabic, arabic" on one record counts once
                if !members.last().is_some_and(|last| std::ptr::eq(*last, record)) {
                    members.push(record);
                }
            }
        }
        Self { groups }
    }

    pub fn get(&self, origin: &str) -> &[&'a NameRecord] {
        self.groups
            .get(&canonical_name(origin))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a NameRecord])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Groups with at least `min_members` records
    pub fn publishable(&self, min_members: usize) -> impl Iterator<Item = (&str, &[&'a NameRecord])> {
        self.iter().filter(move |(_, members)| members.len() >= min_members)
    }
}

pub const PROPHETS: CollectionSpec = CollectionSpec {
    slug: "prophets",
    title: "Names of Prophets",
    description: "Names of the prophets mentioned in the Quran and Islamic tradition.",
    names: &[
        "Adam", "Idris", "Nuh", "Hud", "Saleh", "Ibrahim", "Ismail", "Ishaq", "Yaqub", "Yusuf",
        "Ayyub", "Shu'aib", "Musa", "Harun", "Dawud", "Sulaiman", "Ilyas", "Alyasa", "Yunus",
        "Zakariya", "Yahya", "Isa", "Muhammad", "Dhul-Kifl", "Uzair", "Luqman", "Khidr",
    ],
};

pub const SAHABA: CollectionSpec = CollectionSpec {
    slug: "sahaba",
    title: "Names of the Companions",
    description: "Names of the Sahaba and Sahabiyat, the companions of the Prophet.",
    names: &[
        "Abu Bakr", "Umar", "Uthman", "Ali", "Talha", "Zubair", "Abdur-Rahman", "Sa'd", "Saeed",
        "Abu Ubaidah", "Bilal", "Khalid", "Hamza", "Hassan", "Hussain", "Abbas", "Ja'far", "Usama",
        "Zayd", "Ammar", "Salman", "Suhaib", "Muadh", "Anas", "Jabir", "Mus'ab", "Yasir",
        "Abu Dharr", "Amr", "Tamim", "Khadija", "Aisha", "Fatima", "Hafsa", "Asma", "Sumayyah",
        "Nusaybah", "Umm Salama", "Zainab", "Ruqayya", "Umm Kulthum", "Mariya", "Juwayriya",
        "Safiyya", "Sawda", "Umm Habiba", "Barakah", "Halima", "Hind", "Laila",
    ],
};

pub const TRENDING: CollectionSpec = CollectionSpec {
    slug: "trending",
    title: "Trending Names",
    description: "Popular modern names for boys and girls.",
    names: &[
        "Ayaan", "Zayd", "Rayyan", "Idris", "Eesa", "Zayan", "Arham", "Aahil", "Ameer", "Danish",
        "Ehan", "Fahad", "Faiz", "Haider", "Hamdan", "Junaid", "Kayan", "Maaz", "Mikail", "Nael",
        "Rehan", "Ruhan", "Sahil", "Sarim", "Shayaan", "Shazil", "Taimur", "Uzair", "Umair",
        "Yazan", "Zavian", "Zayyan", "Zameer", "Farhan", "Saif", "Shahab", "Mirza", "Aaliyah",
        "Maryam", "Inaya", "Safa", "Zoya", "Aleena", "Areesha", "Amani", "Anaya", "Dua", "Daniya",
        "Eira", "Eliza", "Eshal", "Faria", "Haniya", "Hiba", "Iqra", "Jannat", "Liyana", "Laiba",
        "Mahira", "Maira", "Mishal", "Naira", "Noor", "Nimra", "Rania", "Reem", "Rimsha", "Sana",
        "Sara", "Sumaiya", "Tazeen", "Yusra", "Zaina", "Zahra", "Zunaira", "Zimal", "Hoorain",
        "Ayat", "Manal", "Sidra",
    ],
};

pub const QURANIC: CollectionSpec = CollectionSpec {
    slug: "quranic",
    title: "Names from the Quran",
    description: "Names that appear directly in the text of the Quran.",
    names: &[
        "Maryam", "Yusuf", "Ibrahim", "Musa", "Isa", "Muhammad", "Ahmed", "Taha", "Yasin",
        "Luqman", "Jibreel", "Mikail", "Harut", "Marut", "Qarun", "Haman", "Iram", "Salsabil",
        "Tasnim", "Kawthar", "Sidra", "Afanan", "Ala", "Dunya", "Hoor", "Ikhlas", "Iman", "Jannah",
        "Lulu", "Marjan", "Misk", "Noor", "Qamar", "Rahma", "Shams", "Sundus", "Yusra", "Zahra",
        "Zina",
    ],
};

/// Every curated collection, in display order
pub const COLLECTIONS: &[CollectionSpec] = &[PROPHETS, SAHABA, TRENDING, QURANIC];

/// Built-in meaning themes
pub const THEMES: &[ThemeSpec] = &[
    ThemeSpec {
        slug: "light",
        title: "Light",
        keywords: &["light", "bright", "shine", "shining", "radiant", "illuminat", "glow"],
    },
    ThemeSpec {
        slug: "strength",
        title: "Strength",
        keywords: &["strong", "strength", "power", "mighty", "brave", "courage", "lion"],
    },
    ThemeSpec {
        slug: "nature",
        title: "Nature",
        keywords: &["flower", "rose", "garden", "rain", "moon", "star", "sun", "sea", "river"],
    },
    ThemeSpec {
        slug: "wisdom",
        title: "Wisdom",
        keywords: &["wise", "wisdom", "knowledge", "learned", "intelligent", "scholar"],
    },
    ThemeSpec {
        slug: "faith",
        title: "Faith",
        keywords: &["faith", "pious", "devout", "worship", "believer", "righteous", "god"],
    },
    ThemeSpec {
        slug: "beauty",
        title: "Beauty",
        keywords: &["beauty", "beautiful", "pretty", "lovely", "elegant", "graceful"],
    },
    ThemeSpec {
        slug: "peace",
        title: "Peace",
        keywords: &["peace", "calm", "tranquil", "serene", "gentle"],
    },
];
