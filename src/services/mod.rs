// SPDX-License-Identifier: MIT

//! Services module - the pure computation core.

pub mod export;
pub mod level;
pub mod metrics;
pub mod streak;
pub mod xp;

pub use level::{rank_title, LevelInfo};
pub use metrics::compute_study_metrics;
