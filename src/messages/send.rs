use axum::{debug_handler, extract::{rejection::JsonRejection, State}, http::StatusCode, Json};

use crate::{clock::Clock, store::Store, user::User, AppResult, AppState};

use super::{board, body::MessageBody};

#[debug_handler(state = AppState)]
pub(crate) async fn send_message(
    State(store): State<Store>,
    State(clock): State<Clock>,
    user: User,
    body: Result<Json<MessageBody>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(body) = body?;
    board::post(&store, &clock, user.name(), body).await?;

    Ok(StatusCode::CREATED)
}
