// SPDX-License-Identifier: MIT

//! XP aggregation over normalized activity records.
//!
//! The multipliers below are the single definition of the gamification
//! economy; no other module derives XP. Task records earn a flat score
//! plus doubled minutes, everything else earns doubled mastery counts
//! plus doubled minutes. Both rules are strictly increasing in both
//! inputs.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::NormalizedRecord;

/// XP per minute of a completed task.
pub const TASK_MINUTE_XP: f64 = 2.0;
/// XP per mastery unit of a flashcard/generic session.
pub const CARD_ACCURACY_XP: f64 = 2.0;
/// XP per minute of a flashcard/generic session.
pub const CARD_MINUTE_XP: f64 = 2.0;

/// Per-day accumulator feeding the daily activity chart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayTotals {
    pub flashcard_units: f64,
    pub task_count: u32,
}

/// Result of one aggregation pass over a user's records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityTotals {
    pub total_xp: f64,
    pub total_minutes: f64,
    pub total_flashcard_units: f64,
    /// Minutes per normalized subject
    pub per_subject_minutes: BTreeMap<String, f64>,
    /// Daily counters keyed by calendar day (ordered)
    pub per_day: BTreeMap<NaiveDate, DayTotals>,
}

/// XP contributed by a single record.
pub fn record_xp(record: &NormalizedRecord) -> f64 {
    if record.is_task {
        record.accuracy + record.minutes * TASK_MINUTE_XP
    } else {
        record.accuracy * CARD_ACCURACY_XP + record.minutes * CARD_MINUTE_XP
    }
}

/// Fold all records into totals in one left-to-right pass.
///
/// The fold is order-independent: every contribution is additive, so
/// shuffling the input changes nothing in the output.
pub fn aggregate(records: &[NormalizedRecord]) -> ActivityTotals {
    let mut totals = ActivityTotals::default();

    for record in records {
        totals.total_xp += record_xp(record);
        totals.total_minutes += record.minutes;

        let bucket = totals.per_day.entry(record.day).or_default();
        if record.is_task {
            bucket.task_count += 1;
        } else {
            bucket.flashcard_units += record.accuracy;
            totals.total_flashcard_units += record.accuracy;
        }

        *totals
            .per_subject_minutes
            .entry(record.subject.clone())
            .or_insert(0.0) += record.minutes;
    }

    totals
}
