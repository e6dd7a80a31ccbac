// SPDX-License-Identifier: MIT

//! Study activity record model and its normalization step.
//!
//! Records are append-only: they come into existence when a study
//! action completes (focus session, planner task, flashcard session)
//! and are never updated afterwards. All derived values (streak, XP,
//! level) are recomputed from the full record set on every read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time_utils::parse_calendar_day;

/// Fallback subject for records that carry none.
pub const DEFAULT_SUBJECT: &str = "General";

/// Activity category. Anything that is not a task is aggregated on
/// the flashcard/generic branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Task,
    Flashcard,
    #[serde(other)]
    Other,
}

impl Category {
    pub fn is_task(self) -> bool {
        matches!(self, Category::Task)
    }

    /// Label used in the CSV export; absent categories export as
    /// "flashcard".
    pub fn export_label(cat: Option<Category>) -> &'static str {
        match cat {
            Some(Category::Task) => "task",
            Some(Category::Flashcard) | None => "flashcard",
            Some(Category::Other) => "other",
        }
    }
}

/// Stored activity record, one per completed study action.
///
/// `date` is carried verbatim as RFC3339 text so the CSV export can
/// reproduce it exactly; parsing happens in [`ActivityRecord::normalize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Store-assigned id, monotonically increasing per user
    pub id: u64,
    /// Owning user id
    pub user_id: String,
    /// When the study action completed (RFC3339)
    pub date: String,
    /// Free-text subject label
    pub subject: Option<String>,
    /// Elapsed minutes attributed to the action
    pub minutes: Option<f64>,
    /// Score amount for tasks, count-like mastery amount otherwise
    pub accuracy: Option<f64>,
    pub category: Option<Category>,
}

/// A record after the single normalization pass: date parsed to a
/// calendar day, defaults applied, subject cleaned up.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub day: NaiveDate,
    pub subject: String,
    pub minutes: f64,
    pub accuracy: f64,
    pub is_task: bool,
}

impl ActivityRecord {
    /// Normalize a raw record for aggregation.
    ///
    /// Returns `None` when the date is unparsable; the caller skips
    /// such records rather than aborting the whole computation.
    pub fn normalize(&self) -> Option<NormalizedRecord> {
        let day = parse_calendar_day(&self.date)?;

        Some(NormalizedRecord {
            day,
            subject: normalize_subject(self.subject.as_deref()),
            minutes: self.minutes.unwrap_or(0.0),
            accuracy: self.accuracy.unwrap_or(0.0),
            is_task: self.category.is_some_and(Category::is_task),
        })
    }
}

/// Clean up a subject label: trim, fall back to "General" when blank,
/// and uppercase the first character of labels longer than 2 chars.
///
/// Only the first character changes; "PHYSICS" stays "PHYSICS", so
/// differently-cased subjects remain distinct keys on purpose. Short
/// labels (acronyms like "CS") are left exactly as trimmed.
pub fn normalize_subject(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return DEFAULT_SUBJECT.to_string();
    }

    if trimmed.chars().count() <= 2 {
        return trimmed.to_string();
    }

    let mut chars = trimmed.chars();
    let first = chars.next().unwrap_or_default();
    first.to_uppercase().chain(chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> ActivityRecord {
        ActivityRecord {
            id: 1,
            user_id: "u1".to_string(),
            date: date.to_string(),
            subject: Some("math".to_string()),
            minutes: Some(30.0),
            accuracy: Some(5.0),
            category: Some(Category::Task),
        }
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let mut rec = record("2024-01-15T10:00:00Z");
        rec.subject = None;
        rec.minutes = None;
        rec.accuracy = None;
        rec.category = None;

        let norm = rec.normalize().unwrap();
        assert_eq!(norm.subject, "General");
        assert_eq!(norm.minutes, 0.0);
        assert_eq!(norm.accuracy, 0.0);
        assert!(!norm.is_task);
    }

    #[test]
    fn test_normalize_skips_malformed_date() {
        assert!(record("yesterday-ish").normalize().is_none());
    }

    #[test]
    fn test_subject_capitalizes_first_char_only() {
        assert_eq!(normalize_subject(Some("  physics")), "Physics");
        assert_eq!(normalize_subject(Some("Physics")), "Physics");
        // Rest of the label is untouched; this is intentional, not a
        // missing lowercase pass. "PHYSICS" and "Physics" stay
        // distinct aggregation keys.
        assert_eq!(normalize_subject(Some("PHYSICS")), "PHYSICS");
        assert_eq!(normalize_subject(Some("pHYSICS")), "PHYSICS");
    }

    #[test]
    fn test_subject_short_labels_left_alone() {
        assert_eq!(normalize_subject(Some("cs")), "cs");
        assert_eq!(normalize_subject(Some(" ai ")), "ai");
    }

    #[test]
    fn test_subject_blank_falls_back_to_general() {
        assert_eq!(normalize_subject(None), "General");
        assert_eq!(normalize_subject(Some("   ")), "General");
    }

    #[test]
    fn test_category_other_takes_flashcard_branch() {
        let mut rec = record("2024-01-15T10:00:00Z");
        rec.category = Some(Category::Other);
        assert!(!rec.normalize().unwrap().is_task);
    }

    #[test]
    fn test_category_deserializes_unknown_as_other() {
        let cat: Category = serde_json::from_str("\"chat\"").unwrap();
        assert_eq!(cat, Category::Other);
    }
}
