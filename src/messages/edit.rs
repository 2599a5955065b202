use axum::{debug_handler, extract::{rejection::JsonRejection, Path, State}, http::StatusCode, Json};

use crate::{store::Store, user::User, AppResult, AppState};

use super::{board, body::MessageBody};

#[debug_handler(state = AppState)]
pub(crate) async fn edit_message(
    Path(id): Path<String>,
    State(store): State<Store>,
    user: User,
    body: Result<Json<MessageBody>, JsonRejection>,
) -> AppResult<StatusCode> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            // existence and ownership are reported before a malformed body
            board::owned_message(&store, &id, user.name()).await?;
            return Err(rejection.into());
        }
    };

    board::update(&store, &id, user.name(), body).await?;
    Ok(StatusCode::OK)
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete_message(
    Path(id): Path<String>,
    State(store): State<Store>,
    user: User,
) -> AppResult<StatusCode> {
    board::delete(&store, &id, user.name()).await?;
    Ok(StatusCode::OK)
}
