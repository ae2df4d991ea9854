//! Liveness responder for the hosting platform.
//!
//! Every route answers 200 with a short plain-text body; these exist
//! solely so the host can tell the process is alive (and poke it
//! awake), so an error status is never returned.

use axum::{extract::State, routing::get, Router};
use chrono::{DateTime, Utc};

use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
    pub started_at: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(store: RecordStore) -> Self {
        let state = AppState {
            store,
            started_at: Utc::now(),
        };

        let router = Router::new()
            .route("/", get(status_text))
            .route("/health", get(status_text))
            .route("/ping", get(status_text))
            .route("/wakeup", get(wakeup))
            .with_state(state);

        Self { router }
    }
}

async fn status_text(State(state): State<AppState>) -> String {
    let uptime_secs = Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds();
    format!(
        "OK - StudyBuddy v{} alive - {} users - up {}s",
        env!("CARGO_PKG_VERSION"),
        state.store.user_count(),
        uptime_secs
    )
}

async fn wakeup() -> &'static str {
    "Awake! StudyBuddy is running."
}
