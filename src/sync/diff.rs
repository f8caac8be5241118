//! Section-level change detection
//!
//! Compares two rendered documents by their `## ` section headings. The
//! heading marker is shared with the renderer; the two sides of the wire
//! format must agree on it.

use std::collections::HashSet;

use super::SECTION_MARKER;

/// Named sections added and removed between two documents.
///
/// Detection is name-keyed on purpose: a body edit under an unchanged
/// heading is invisible here, which keeps cosmetic re-renders from producing
/// remote writes. Duplicate headings collapse to one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Headings present in the candidate but not the previous document,
    /// in first-appearance order.
    pub added: Vec<String>,
    /// Headings present in the previous document but not the candidate.
    pub removed: Vec<String>,
}

impl ChangeSet {
    /// True when no section was added or removed; the sync run stops here.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// One-line summary for commit messages and diagnostics.
    pub fn summary(&self) -> String {
        if self.is_noop() {
            return "no section changes".to_string();
        }

        let mut parts = Vec::new();
        if !self.added.is_empty() {
            parts.push(format!("added: {}", self.added.join(", ")));
        }
        if !self.removed.is_empty() {
            parts.push(format!("removed: {}", self.removed.join(", ")));
        }
        parts.join("; ")
    }
}

/// Diff two rendered documents by section heading.
pub fn diff(previous: &str, candidate: &str) -> ChangeSet {
    let previous_headings = section_headings(previous);
    let candidate_headings = section_headings(candidate);

    let previous_set: HashSet<&String> = previous_headings.iter().collect();
    let candidate_set: HashSet<&String> = candidate_headings.iter().collect();

    ChangeSet {
        added: candidate_headings
            .iter()
            .filter(|h| !previous_set.contains(h))
            .cloned()
            .collect(),
        removed: previous_headings
            .iter()
            .filter(|h| !candidate_set.contains(h))
            .cloned()
            .collect(),
    }
}

/// Extract section headings in order, collapsing duplicates.
fn section_headings(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut headings = Vec::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
            let heading = rest.trim().to_string();
            if seen.insert(heading.clone()) {
                headings.push(heading);
            }
        }
    }
    headings
}
