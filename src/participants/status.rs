use axum::{debug_handler, extract::State, http::StatusCode};

use crate::{clock::Clock, store::Store, user::User, AppError, AppResult, AppState};

use super::registry;

/// Heartbeat: keeps the sender from being swept.
#[debug_handler(state = AppState)]
pub(crate) async fn heartbeat(
    State(store): State<Store>,
    State(clock): State<Clock>,
    user: User,
) -> AppResult<StatusCode> {
    let Some(name) = user.name() else {
        return Err(AppError::NotFound("no user header".to_owned()));
    };

    registry::touch(&store, &clock, name).await?;
    Ok(StatusCode::OK)
}
