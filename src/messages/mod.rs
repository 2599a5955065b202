pub mod board;
pub mod body;
pub mod visibility;
mod edit;
mod read;
mod send;

use axum::{routing::{get, put}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(read::read_messages).post(send::send_message))
        .route("/messages/{id}", put(edit::edit_message).delete(edit::delete_message))
}
