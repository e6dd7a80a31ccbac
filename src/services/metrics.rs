// SPDX-License-Identifier: MIT

//! Derived metrics composition.
//!
//! `compute_study_metrics` is the one entry point the handlers call:
//! records in, view model out. It is pure and synchronous; the caller
//! re-invokes it on every read instead of trusting any stored total.

use chrono::NaiveDate;

use crate::models::{ActivityRecord, DayBucket, StudyMetrics, SubjectMinutes};
use crate::services::{level, streak, xp};
use crate::time_utils::day_label;

/// Day buckets kept for the daily-activity chart.
const MAX_DAY_BUCKETS: usize = 14;

/// Compute the full derived view of a user's study history.
///
/// `today` is the caller's current calendar day, passed explicitly so
/// the streak policy ("today or yesterday keeps it alive") is
/// deterministic and testable. Records with unparsable dates are
/// skipped with a warning and do not affect any total.
pub fn compute_study_metrics(records: &[ActivityRecord], today: NaiveDate) -> StudyMetrics {
    let normalized: Vec<_> = records
        .iter()
        .filter_map(|record| match record.normalize() {
            Some(norm) => Some(norm),
            None => {
                tracing::warn!(
                    record_id = record.id,
                    date = %record.date,
                    "Skipping record with unparsable date"
                );
                None
            }
        })
        .collect();

    let streak = streak::current_streak(&streak::activity_days(&normalized), today);
    let totals = xp::aggregate(&normalized);

    let info = level::resolve(totals.total_xp);
    let level_progress = level::progress(totals.total_xp, info);

    let mut subjects: Vec<SubjectMinutes> = totals
        .per_subject_minutes
        .into_iter()
        .filter(|(_, minutes)| *minutes > 0.0)
        .map(|(subject, minutes)| SubjectMinutes { subject, minutes })
        .collect();
    subjects.sort_by(|a, b| {
        b.minutes
            .total_cmp(&a.minutes)
            .then_with(|| a.subject.cmp(&b.subject))
    });

    // per_day is keyed by NaiveDate, so iteration is already
    // chronological; keep only the most recent buckets.
    let daily: Vec<DayBucket> = totals
        .per_day
        .into_iter()
        .map(|(day, bucket)| DayBucket {
            day,
            label: day_label(day),
            flashcard_units: bucket.flashcard_units,
            task_count: bucket.task_count,
        })
        .collect();
    let daily = if daily.len() > MAX_DAY_BUCKETS {
        daily[daily.len() - MAX_DAY_BUCKETS..].to_vec()
    } else {
        daily
    };

    StudyMetrics {
        streak,
        total_xp: totals.total_xp,
        level: info.level,
        prev_level_xp: info.prev_level_xp,
        next_level_xp: info.next_level_xp,
        level_progress,
        rank_title: level::rank_title(info.level),
        total_minutes: totals.total_minutes,
        total_flashcard_units: totals.total_flashcard_units,
        subjects,
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn record(
        id: u64,
        date: &str,
        subject: &str,
        minutes: f64,
        accuracy: f64,
        task: bool,
    ) -> ActivityRecord {
        ActivityRecord {
            id,
            user_id: "u1".to_string(),
            date: date.to_string(),
            subject: Some(subject.to_string()),
            minutes: Some(minutes),
            accuracy: Some(accuracy),
            category: Some(if task { Category::Task } else { Category::Flashcard }),
        }
    }

    #[test]
    fn test_empty_records() {
        let metrics = compute_study_metrics(&[], today());
        assert_eq!(metrics.streak, 0);
        assert_eq!(metrics.total_xp, 0.0);
        assert_eq!(metrics.level, 1);
        assert_eq!(metrics.rank_title, "Novice");
        assert!(metrics.subjects.is_empty());
        assert!(metrics.daily.is_empty());
    }

    #[test]
    fn test_same_day_records_dedup_for_streak() {
        let records = vec![
            record(1, "2024-03-15T08:00:00Z", "Math", 10.0, 5.0, false),
            record(2, "2024-03-15T12:00:00Z", "Math", 10.0, 5.0, false),
            record(3, "2024-03-15T20:00:00Z", "Math", 10.0, 5.0, false),
        ];
        assert_eq!(compute_study_metrics(&records, today()).streak, 1);
    }

    #[test]
    fn test_malformed_date_is_skipped_not_fatal() {
        let records = vec![
            record(1, "2024-03-15T08:00:00Z", "Math", 30.0, 10.0, true),
            record(2, "last tuesday", "Math", 999.0, 999.0, true),
        ];
        let metrics = compute_study_metrics(&records, today());
        assert_eq!(metrics.total_minutes, 30.0);
        assert_eq!(metrics.total_xp, 10.0 + 30.0 * 2.0);
        assert_eq!(metrics.streak, 1);
    }

    #[test]
    fn test_subjects_sorted_descending_and_zero_filtered() {
        let records = vec![
            record(1, "2024-03-15T08:00:00Z", "Math", 10.0, 0.0, false),
            record(2, "2024-03-15T09:00:00Z", "Physics", 40.0, 0.0, false),
            record(3, "2024-03-15T10:00:00Z", "Chemistry", 0.0, 5.0, false),
        ];
        let metrics = compute_study_metrics(&records, today());
        let names: Vec<_> = metrics.subjects.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(names, vec!["Physics", "Math"]);
    }

    #[test]
    fn test_daily_buckets_chronological_and_truncated() {
        let mut records = Vec::new();
        for d in 1..=20u64 {
            records.push(record(
                d,
                &format!("2024-03-{:02}T10:00:00Z", d),
                "Math",
                5.0,
                2.0,
                false,
            ));
        }
        let metrics = compute_study_metrics(&records, today());

        assert_eq!(metrics.daily.len(), 14);
        assert_eq!(metrics.daily.first().unwrap().label, "Mar 7");
        assert_eq!(metrics.daily.last().unwrap().label, "Mar 20");
        for pair in metrics.daily.windows(2) {
            assert!(pair[0].day < pair[1].day);
        }
    }

    #[test]
    fn test_differently_cased_subjects_stay_distinct() {
        let mut a = record(1, "2024-03-15T08:00:00Z", "  physics", 10.0, 0.0, false);
        a.subject = Some("  physics".to_string());
        let b = record(2, "2024-03-15T09:00:00Z", "Physics", 10.0, 0.0, false);
        let c = record(3, "2024-03-15T10:00:00Z", "PHYSICS", 10.0, 0.0, false);

        let metrics = compute_study_metrics(&[a, b, c], today());
        let names: Vec<_> = metrics.subjects.iter().map(|s| s.subject.as_str()).collect();

        // "  physics" and "Physics" collapse; "PHYSICS" does not,
        // because only the first character is ever capitalized.
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Physics"));
        assert!(names.contains(&"PHYSICS"));
        let physics = metrics
            .subjects
            .iter()
            .find(|s| s.subject == "Physics")
            .unwrap();
        assert_eq!(physics.minutes, 20.0);
    }

    #[test]
    fn test_level_fields_are_consistent() {
        let records = vec![record(1, "2024-03-15T08:00:00Z", "Math", 100.0, 50.0, true)];
        let metrics = compute_study_metrics(&records, today());

        assert!(metrics.prev_level_xp as f64 <= metrics.total_xp);
        assert!(metrics.total_xp < metrics.next_level_xp as f64);
        assert!((0.0..=1.0).contains(&metrics.level_progress));
    }
}
