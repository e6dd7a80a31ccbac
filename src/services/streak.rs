// SPDX-License-Identifier: MIT

//! Consecutive-day streak detection over activity days.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::NormalizedRecord;

/// Reduce records to the set of distinct calendar days with activity.
pub fn activity_days(records: &[NormalizedRecord]) -> BTreeSet<NaiveDate> {
    records.iter().map(|r| r.day).collect()
}

/// Length in days of the streak ending today or yesterday.
///
/// The streak survives while the current day is still in progress: a
/// most-recent activity day of yesterday counts ("at risk"), two days
/// ago does not (broken). Days before the first gap in the run are
/// ignored entirely.
pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut recent = days.iter().rev().copied();

    let Some(most_recent) = recent.next() else {
        return 0;
    };

    let yesterday = today.pred_opt().unwrap_or(today);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut expected = most_recent.pred_opt();
    for day in recent {
        if Some(day) != expected {
            break;
        }
        streak += 1;
        expected = day.pred_opt();
    }

    streak
}
