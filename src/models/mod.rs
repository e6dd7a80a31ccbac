// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod activity;
pub mod metrics;

pub use activity::{ActivityRecord, Category, NormalizedRecord};
pub use metrics::{DayBucket, StudyMetrics, SubjectMinutes};
