// SPDX-License-Identifier: MIT

use std::sync::Arc;

use study_metrics::config::Config;
use study_metrics::db::ActivityStore;
use study_metrics::middleware::auth::create_jwt;
use study_metrics::routes::create_router;
use study_metrics::AppState;

/// Create a test app with an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = ActivityStore::new();

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Create a signed session token for a test user.
#[allow(dead_code)]
pub fn test_token(state: &AppState, user_id: &str) -> String {
    create_jwt(user_id, &state.config.jwt_signing_key).expect("Failed to sign test JWT")
}
