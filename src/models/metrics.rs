// SPDX-License-Identifier: MIT

//! Derived study metrics view model.
//!
//! Everything here is recomputed from the full record set on every
//! read; nothing in this module is ever persisted. A denormalized XP
//! number a client may hold is a cache at most, never ground truth.

use chrono::NaiveDate;
use serde::Serialize;

/// One charting bucket per active calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    /// The calendar day this bucket covers
    pub day: NaiveDate,
    /// Chart label, e.g. "Jan 5"
    pub label: String,
    /// Flashcard units (mastery counts) recorded that day
    pub flashcard_units: f64,
    /// Completed tasks recorded that day
    pub task_count: u32,
}

/// Per-subject time total for the subject-distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectMinutes {
    pub subject: String,
    pub minutes: f64,
}

/// Complete derived view of a user's study history.
#[derive(Debug, Clone, Serialize)]
pub struct StudyMetrics {
    /// Consecutive active days ending today or yesterday
    pub streak: u32,
    pub total_xp: f64,
    pub level: u32,
    /// XP required to have reached the current level
    pub prev_level_xp: u64,
    /// XP required to reach the next level
    pub next_level_xp: u64,
    /// Fraction of the current level completed, in [0, 1]
    pub level_progress: f64,
    pub rank_title: &'static str,
    pub total_minutes: f64,
    pub total_flashcard_units: f64,
    /// Nonzero subjects, sorted descending by minutes
    pub subjects: Vec<SubjectMinutes>,
    /// Most recent 14 active days, chronological
    pub daily: Vec<DayBucket>,
}
