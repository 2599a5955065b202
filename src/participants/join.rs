use axum::{debug_handler, extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use serde::Deserialize;

use crate::{clock::Clock, store::Store, AppResult, AppState};

use super::registry;

#[derive(Debug, Deserialize)]
pub(crate) struct JoinBody {
    #[serde(default)]
    name: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn join(
    State(store): State<Store>,
    State(clock): State<Clock>,
    body: Result<Json<JoinBody>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(JoinBody { name }) = body?;
    registry::register(&store, &clock, name.as_deref().unwrap_or_default()).await?;

    Ok(StatusCode::CREATED)
}
