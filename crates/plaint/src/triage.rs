//! Keyword triage: urgency detection and department routing
//!
//! Complements the statistical category with the rule-based signals the
//! complaint desk relies on. Matching is plain substring search on the
//! lowercased text, so `"fire"` also matches `"firework"`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumString};

/// Department for categories missing from the routing table
pub const FALLBACK_DEPARTMENT: &str = "General";

const HIGH_URGENCY_WORDS: &[&str] = &[
    "fire",
    "electrocution",
    "electric shock",
    "accident",
    "injured",
    "injury",
    "bleeding",
    "emergency",
    "danger",
    "dangerous",
    "flood",
    "leaking",
    "burst",
    "exposed wire",
    "sparks",
    "gas leak",
    "collapse",
    "fallen",
    "blocked road",
];

const MEDIUM_URGENCY_WORDS: &[&str] = &[
    "pothole",
    "broken",
    "damaged",
    "overflow",
    "smell",
    "odor",
    "noise",
    "crack",
    "leak",
    "vandalism",
    "graffiti",
];

const DEPARTMENTS: &[(&str, &str)] = &[
    ("Infrastructure", "Public Works"),
    ("Sanitation", "Health Dept"),
    ("Safety", "Police/Fire"),
    ("Water", "Water Authority"),
    ("Electricity", "Power Dept"),
];

/// Urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Urgency {
    High,
    Medium,
}

/// Triage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Phrases that mark a complaint as high urgency, checked first
    pub high_urgency_words: Vec<String>,

    /// Phrases that mark a complaint as medium urgency
    pub medium_urgency_words: Vec<String>,

    /// Category -> department
    pub departments: BTreeMap<String, String>,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            high_urgency_words: HIGH_URGENCY_WORDS.iter().map(|w| w.to_string()).collect(),
            medium_urgency_words: MEDIUM_URGENCY_WORDS.iter().map(|w| w.to_string()).collect(),
            departments: DEPARTMENTS
                .iter()
                .map(|(c, d)| (c.to_string(), d.to_string()))
                .collect(),
        }
    }
}

/// Rule-based triage
#[derive(Debug, Clone)]
pub struct Triage {
    high: Vec<String>,
    medium: Vec<String>,
    departments: BTreeMap<String, String>,
}

impl Triage {
    pub fn new(config: &TriageConfig) -> Self {
        let lower = |words: &[String]| -> Vec<String> {
            words.iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            high: lower(&config.high_urgency_words),
            medium: lower(&config.medium_urgency_words),
            departments: config.departments.clone(),
        }
    }

    /// Urgency implied by keywords, if any
    pub fn detect_urgency(&self, text: &str) -> Option<Urgency> {
        let text = text.to_lowercase();
        if self.high.iter().any(|w| text.contains(w.as_str())) {
            return Some(Urgency::High);
        }
        if self.medium.iter().any(|w| text.contains(w.as_str())) {
            return Some(Urgency::Medium);
        }
        None
    }

    /// Department responsible for a category
    pub fn department_for(&self, category: &str) -> &str {
        self.departments
            .get(category)
            .map(String::as_str)
            .unwrap_or(FALLBACK_DEPARTMENT)
    }
}

impl Default for Triage {
    fn default() -> Self {
        Self::new(&TriageConfig::default())
    }
}
