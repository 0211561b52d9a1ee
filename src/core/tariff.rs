//! Tariff update merging: duplicate suppression, newest-first ordering, and
//! source-company extraction for the attribution list.

use crate::core::dataset::{TariffData, TariffUpdate};
use std::collections::{BTreeSet, HashSet};

/// Known publishers, matched as substrings of a source title.
const KNOWN_PUBLISHERS: [(&str, &str); 20] = [
    ("bbc", "BBC"),
    ("cnn", "CNN"),
    ("reuters", "Reuters"),
    ("bloomberg", "Bloomberg"),
    ("wall street journal", "Wall Street Journal"),
    ("wsj", "Wall Street Journal"),
    ("new york times", "New York Times"),
    ("washington post", "Washington Post"),
    ("politico", "Politico"),
    ("axios", "Axios"),
    ("associated press", "Associated Press"),
    ("ap news", "Associated Press"),
    ("npr", "NPR"),
    ("cnbc", "CNBC"),
    ("marketwatch", "MarketWatch"),
    ("yahoo finance", "Yahoo Finance"),
    ("financial times", "Financial Times"),
    ("the economist", "The Economist"),
    ("forbes", "Forbes"),
    ("business insider", "Business Insider"),
];

/// Aggregators and social platforms that never count as a source.
const UNWANTED_SOURCES: [&str; 8] = [
    "wikipedia",
    "wikimedia",
    "reddit",
    "twitter",
    "facebook",
    "instagram",
    "youtube",
    "tiktok",
];

/// Duplicate-detection key: lowercased title plus announcement date.
pub fn normalize_update(update: &TariffUpdate) -> String {
    format!(
        "{}|{}",
        update.title.to_lowercase().trim(),
        update.announcement_date.as_deref().unwrap_or("")
    )
}

/// Merges `incoming` updates into `existing`, skipping duplicates, and returns
/// the union sorted newest first. Updates without a date sort last.
pub fn merge_updates(existing: Vec<TariffUpdate>, incoming: Vec<TariffUpdate>) -> Vec<TariffUpdate> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<TariffUpdate> = Vec::with_capacity(existing.len() + incoming.len());

    for update in existing.into_iter().chain(incoming) {
        if seen.insert(normalize_update(&update)) {
            merged.push(update);
        }
    }

    merged.sort_by(|a, b| {
        let da = a.announcement_date.as_deref().unwrap_or("");
        let db = b.announcement_date.as_deref().unwrap_or("");
        db.cmp(da)
    });
    merged
}

/// Extracts the publishing company from a source title. Returns `None` for
/// unknown or unwanted sources.
pub fn source_company(source_title: &str) -> Option<String> {
    if source_title.is_empty() {
        return None;
    }
    let lower = source_title.to_lowercase();

    for (pattern, company) in KNOWN_PUBLISHERS {
        if lower.contains(pattern) {
            return Some(company.to_string());
        }
    }
    for unwanted in UNWANTED_SOURCES {
        if lower.contains(unwanted) {
            return None;
        }
    }

    // "Company Name - Article Title"
    if let Some((company, _)) = source_title.split_once(" - ") {
        let company = company.trim();
        let lead_word = company
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        let question_lead = ["how", "what", "when", "where", "why", "the", "a", "an"];
        if company.len() > 2 && !question_lead.contains(&lead_word.as_str()) {
            return Some(company.to_string());
        }
    }

    // "Article Title | Company Name"
    if let Some((_, company)) = source_title.rsplit_once(" | ") {
        let company = company.trim();
        if company.len() > 2 {
            return Some(company.to_string());
        }
    }

    None
}

/// Sorted, deduplicated list of source companies across all updates.
pub fn collect_sources(updates: &[TariffUpdate]) -> Vec<String> {
    updates
        .iter()
        .flat_map(|u| u.source_titles.iter())
        .filter_map(|title| source_company(title))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

impl TariffData {
    /// Canonical form as rendered and served: updates deduplicated and sorted
    /// newest first, sources derived from update attributions when the
    /// document carries none.
    pub fn normalized(mut self) -> Self {
        self.updates = merge_updates(Vec::new(), self.updates);
        if self.sources.is_empty() {
            self.sources = collect_sources(&self.updates);
        }
        self
    }
}
