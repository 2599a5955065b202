use axum::{debug_handler, extract::{rejection::QueryRejection, Query, State}, Json};
use serde::Deserialize;

use crate::{db::Message, store::Store, user::User, AppError, AppResult, AppState};

use super::board;

#[derive(Debug, Deserialize)]
pub(crate) struct ReadQuery {
    limit: Option<String>,
}

fn parse_limit(raw: Option<&str>) -> AppResult<Option<usize>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(Some(limit)),
        _ => Err(AppError::Validation(format!("\"limit\" must be a positive integer, got {raw:?}"))),
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn read_messages(
    State(store): State<Store>,
    user: User,
    query: Result<Query<ReadQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Message>>> {
    let Query(ReadQuery { limit }) = query?;
    let limit = parse_limit(limit.as_deref())?;
    Ok(Json(board::list(&store, user.name(), limit).await?))
}
