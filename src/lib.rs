pub mod appresult;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod messages;
pub mod participants;
pub mod store;
pub mod sweeper;
pub mod user;

use axum::{extract::FromRef, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};

use crate::{clock::Clock, store::Store};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Store,
    pub clock: Clock,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(participants::router())
        .merge(messages::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
