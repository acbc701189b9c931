//! Section-name and venue-name normalization.
//!
//! Ticket listings carry free-text section names ("Main Stand Lower") while
//! venue maps mark shapes with kebab-case keys (`longside-lower-tier`).
//! These tables translate between the two, and map stadium names to the SVG
//! file key of their venue map.

use serde::{Deserialize, Serialize};

/// One SVG key and the listing names that refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub key: String,
    pub aliases: Vec<String>,
}

/// Ordered alias table. Order matters for partial matches: the first entry
/// whose alias overlaps the input wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new(entries: Vec<AliasEntry>) -> Self {
        Self { entries }
    }

    fn from_static(table: &[(&str, &[&str])]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(key, aliases)| AliasEntry {
                    key: key.to_string(),
                    aliases: aliases.iter().map(|a| a.to_string()).collect(),
                })
                .collect(),
        }
    }

    /// Built-in section-name aliases.
    pub fn sections() -> Self {
        Self::from_static(SECTION_ALIASES)
    }

    /// Built-in stadium-name → venue-key table.
    pub fn stadiums() -> Self {
        Self::from_static(STADIUM_KEYS)
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    fn exact(&self, needle: &str) -> Option<&str> {
        self.entries.iter().find_map(|e| {
            e.aliases
                .iter()
                .any(|a| a.to_lowercase() == needle)
                .then_some(e.key.as_str())
        })
    }

    /// Map a listing section name to its SVG `data-section` key.
    ///
    /// Tries an exact alias match, then containment in either direction,
    /// and finally falls back to kebab-casing the name.
    pub fn normalize_section_name(&self, name: &str) -> Option<String> {
        let clean = name.trim().to_lowercase();
        if clean.is_empty() {
            return None;
        }
        if let Some(key) = self.exact(&clean) {
            return Some(key.to_string());
        }
        let partial = self.entries.iter().find_map(|e| {
            e.aliases
                .iter()
                .map(|a| a.to_lowercase())
                .any(|a| clean.contains(&a) || a.contains(&clean))
                .then_some(e.key.as_str())
        });
        if let Some(key) = partial {
            return Some(key.to_string());
        }
        Some(clean.replace([' ', '_'], "-"))
    }

    /// Map a stadium name to the key of its SVG venue map.
    pub fn venue_key(&self, stadium_name: &str) -> Option<String> {
        let clean = stadium_name.trim().to_lowercase();
        if clean.is_empty() {
            return None;
        }
        if let Some(key) = self.exact(&clean) {
            return Some(key.to_string());
        }
        self.entries
            .iter()
            .find_map(|e| {
                e.aliases
                    .iter()
                    .any(|a| clean.contains(&a.to_lowercase()))
                    .then_some(e.key.clone())
            })
    }
}

/// Map a listing section name using the built-in aliases.
pub fn normalize_section_name(name: &str) -> Option<String> {
    AliasTable::sections().normalize_section_name(name)
}

/// Map a stadium name using the built-in venue table.
pub fn venue_key_for_stadium(stadium_name: &str) -> Option<String> {
    AliasTable::stadiums().venue_key(stadium_name)
}

// ─── Built-in tables ─────────────────────────────────────────────────────

const SECTION_ALIASES: &[(&str, &[&str])] = &[
    (
        "longside-lower-tier",
        &[
            "Longside Lower Tier",
            "Main Stand Lower",
            "East Stand Lower",
            "West Stand Lower",
            "Central Lower Longside",
        ],
    ),
    (
        "longside-upper-tier",
        &[
            "Longside Upper Tier",
            "Main Stand Upper",
            "East Stand Upper",
            "West Stand Upper",
        ],
    ),
    (
        "shortside-lower-tier",
        &[
            "Shortside Lower Tier",
            "North Stand Lower",
            "South Stand Lower",
            "Anfield Road Lower",
        ],
    ),
    (
        "shortside-upper-tier",
        &[
            "Shortside Upper Tier",
            "North Stand Upper",
            "South Stand Upper",
            "Anfield Road Upper",
        ],
    ),
    (
        "vip-club-level",
        &[
            "VIP Packages",
            "VIP Club Level",
            "Premium Seating",
            "Club Level Longside",
            "Club Level Shortside",
        ],
    ),
    (
        "premium-level-hospitality",
        &[
            "Premium Level Hospitality",
            "Hospitality",
            "Premium Seating",
            "Centenary Club",
            "Premier Club",
        ],
    ),
    (
        "vip-hospitality-package",
        &[
            "VIP Hospitality Package",
            "Brodies Lounge",
            "Executive Lounge",
            "Dugout Hospitality",
            "Joe's West",
            "Joe's East",
            "Legends",
            "1894 Club Bar",
            "Citizens",
            "The Mancunian",
            "The Chairman's Club",
            "The Tunnel Club",
            "Commonwealth Bar",
        ],
    ),
    ("vip-93-20", &["93:20", "93:20 Lounge", "93 20", "The 93:20"]),
    (
        "away-fans-section",
        &["Away Fan Section", "Away Fans", "Away Section", "Away Supporters Only"],
    ),
    ("kop-grandstand", &["Kop Grandstand", "The Kop"]),
    ("category-1-gol", &["Category 1 Gol", "Cat 1 Gol", "Gol"]),
    ("category-2-fondo", &["Category 2 Fondo", "Cat 2 Fondo", "Fondo"]),
    ("category-1-premium", &["Category 1 Premium", "Cat 1 Premium"]),
    ("category-1-silver", &["Category 1 Silver", "Cat 1 Silver"]),
    ("category-1", &["Category 1", "Cat 1"]),
    (
        "category-2-lateral",
        &["Category 2 Lateral", "Cat 2 Lateral", "Lateral"],
    ),
    ("category-3", &["Category 3", "Cat 3"]),
    ("category-1-superior", &["Category 1 Superior", "Cat 1 Superior"]),
    ("category-2-superior", &["Category 2 Superior", "Cat 2 Superior"]),
];

const STADIUM_KEYS: &[(&str, &[&str])] = &[
    ("villaParkStadium", &["villa park"]),
    ("oldTraffordStadium", &["old trafford"]),
    ("emiratesStadium", &["emirates"]),
    ("anfieldStadium", &["anfield"]),
    ("ellandStadium", &["elland", "elland road"]),
    ("tottenhamHotspurStadium", &["tottenham", "spurs"]),
    ("hillDickinsonStadium", &["hill dickinson"]),
    ("sanSiro", &["san siro"]),
    ("molineux", &["molineux"]),
    ("cravenCottage", &["craven cottage"]),
    ("etihadStadium", &["etihad", "etihad stadium"]),
    (
        "santiagoBernabeuStadium",
        &["santiago bernabéu", "santiago bernabeu"],
    ),
    (
        "riyadhMetropolitanoStadium",
        &["riyadh metropolitano", "riyadh metropolitano stadium"],
    ),
];
