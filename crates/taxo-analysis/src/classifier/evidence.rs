//! Evidence extraction — an external collaborator seam.
//!
//! Evidence attaches only to the primary assignment. The classifier is
//! fully functional with no extractor configured; an empty evidence list is
//! a valid, non-error state.

use serde::{Deserialize, Serialize};

use crate::taxonomy::Taxonomy;

use super::types::{CategoryAssignment, SourceRecord};

/// Excerpt plus rationale supporting a primary assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub excerpt: String,
    pub source: String,
    pub rationale: String,
}

/// Collaborator capability: attach evidence to a primary assignment.
pub trait EvidenceExtractor: Send + Sync {
    fn extract(
        &self,
        record: &SourceRecord,
        primary: &CategoryAssignment,
        taxonomy: &Taxonomy,
    ) -> Vec<Evidence>;
}

/// Extractor that excerpts a window around the first matched taxonomy
/// keyword of the primary category.
pub struct KeywordEvidenceExtractor {
    /// Characters of context kept on each side of the match.
    window: usize,
}

impl KeywordEvidenceExtractor {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    fn excerpt_around(&self, text: &str, start: usize, len: usize) -> String {
        let mut lo = start.saturating_sub(self.window);
        let mut hi = (start + len + self.window).min(text.len());
        while lo > 0 && !text.is_char_boundary(lo) {
            lo -= 1;
        }
        while hi < text.len() && !text.is_char_boundary(hi) {
            hi += 1;
        }
        text[lo..hi].trim().to_string()
    }
}

impl Default for KeywordEvidenceExtractor {
    fn default() -> Self {
        Self::new(80)
    }
}

impl EvidenceExtractor for KeywordEvidenceExtractor {
    fn extract(
        &self,
        record: &SourceRecord,
        primary: &CategoryAssignment,
        taxonomy: &Taxonomy,
    ) -> Vec<Evidence> {
        let Some(area) = taxonomy.area(&primary.category) else {
            return Vec::new();
        };

        for keyword in &area.keywords {
            let needle = keyword.to_lowercase();
            if needle.is_empty() {
                continue;
            }
            for (source, text) in [
                ("title", record.title.as_str()),
                ("abstract", record.abstract_text.as_str()),
            ] {
                if let Some(pos) = text.to_lowercase().find(&needle) {
                    return vec![Evidence {
                        excerpt: self.excerpt_around(text, pos, needle.len()),
                        source: source.to_string(),
                        rationale: format!(
                            "matched taxonomy keyword '{}' for category {}",
                            keyword, area.id
                        ),
                    }];
                }
            }
        }
        Vec::new()
    }
}
