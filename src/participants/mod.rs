pub mod registry;
mod join;
mod list;
mod status;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(list::list_participants).post(join::join))
        .route("/status", post(status::heartbeat))
}
