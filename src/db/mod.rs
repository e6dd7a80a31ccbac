// SPDX-License-Identifier: MIT

//! Storage boundary.
//!
//! Persistence proper belongs to an external managed store; this
//! in-process store keeps the same boundary shape (append records,
//! snapshot reads per user) so handlers never see storage details.
//! Reads hand out cloned snapshots, so a caller can iterate while
//! writers append concurrently.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::models::{ActivityRecord, Category};
use crate::time_utils::parse_rfc3339;

/// Fields of a record as supplied by the caller; the store assigns
/// the id.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub date: String,
    pub subject: Option<String>,
    pub minutes: Option<f64>,
    pub accuracy: Option<f64>,
    pub category: Option<Category>,
}

/// Append-only per-user activity log.
#[derive(Debug, Default)]
pub struct ActivityStore {
    records: DashMap<String, Vec<ActivityRecord>>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a user, returning the stored copy.
    ///
    /// Ids are monotonically increasing within a user's log, which is
    /// what cursor pagination orders by.
    pub fn insert_activity(&self, user_id: &str, new: NewActivity) -> ActivityRecord {
        let mut log = self.records.entry(user_id.to_string()).or_default();
        let id = log.last().map(|r| r.id + 1).unwrap_or(1);

        let record = ActivityRecord {
            id,
            user_id: user_id.to_string(),
            date: new.date,
            subject: new.subject,
            minutes: new.minutes,
            accuracy: new.accuracy,
            category: new.category,
        };
        log.push(record.clone());
        record
    }

    /// Snapshot of all records for a user, in insertion order.
    pub fn activities_for_user(&self, user_id: &str) -> Vec<ActivityRecord> {
        self.records
            .get(user_id)
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Page of records newer-first, starting strictly below
    /// `before_id` when given.
    ///
    /// The `after` date constraint applies before the page is cut, so
    /// a page of non-matching records never hides matches deeper in
    /// the log behind a missing cursor.
    pub fn activities_page(
        &self,
        user_id: &str,
        before_id: Option<u64>,
        after: Option<DateTime<Utc>>,
        limit: usize,
    ) -> Vec<ActivityRecord> {
        let Some(log) = self.records.get(user_id) else {
            return Vec::new();
        };

        log.iter()
            .rev()
            .filter(|r| before_id.is_none_or(|cursor| r.id < cursor))
            .filter(|r| {
                after.is_none_or(|after| {
                    parse_rfc3339(&r.date).is_some_and(|date| date >= after)
                })
            })
            .take(limit)
            .cloned()
            .collect()
    }
}
