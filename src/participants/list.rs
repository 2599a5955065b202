use axum::{debug_handler, extract::State, Json};

use crate::{db::Participant, store::Store, AppResult, AppState};

use super::registry;

#[debug_handler(state = AppState)]
pub(crate) async fn list_participants(State(store): State<Store>) -> AppResult<Json<Vec<Participant>>> {
    Ok(Json(registry::list(&store).await?))
}
