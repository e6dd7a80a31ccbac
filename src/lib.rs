// SPDX-License-Identifier: MIT

//! Study-Metrics: gamified study analytics API
//!
//! This crate provides the backend API for study activity records and
//! the derived gamification metrics (streaks, XP, levels, ranks) that
//! dashboards render. The computation core under [`services`] is pure
//! and recomputes everything from the record set on each read.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::ActivityStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: ActivityStore,
}
