use uuid::Uuid;

use crate::{clock::Clock, db::Message, participants::registry, store::Store, AppError, AppResult};

use super::{body::MessageBody, visibility};

pub async fn list(store: &Store, viewer: Option<&str>, limit: Option<usize>) -> AppResult<Vec<Message>> {
    let messages = store.find_messages().await?;
    Ok(visibility::visible_tail(messages, viewer, limit))
}

pub async fn post(store: &Store, clock: &Clock, sender: Option<&str>, body: MessageBody) -> AppResult<Message> {
    let body = body.validate()?;

    let Some(sender) = sender else {
        return Err(AppError::NotFound("no user header".to_owned()));
    };
    if !registry::exists(store, sender).await? {
        return Err(AppError::NotFound(format!("{sender} is not in the room")));
    }

    let message = Message {
        id: Uuid::now_v7(),
        from: sender.to_owned(),
        to: body.to,
        text: body.text,
        kind: body.kind,
        time: clock.format_hms(clock.now_millis()),
    };
    store.insert_message(&message).await?;

    Ok(message)
}

pub async fn update(store: &Store, id: &str, requester: Option<&str>, body: MessageBody) -> AppResult<()> {
    let message = owned_message(store, id, requester).await?;
    let body = body.validate()?;

    if !store.update_message(message.id, &body.to, &body.text, body.kind).await? {
        return Err(not_found(id));
    }
    Ok(())
}

pub async fn delete(store: &Store, id: &str, requester: Option<&str>) -> AppResult<()> {
    let message = owned_message(store, id, requester).await?;

    if !store.delete_message(message.id).await? {
        return Err(not_found(id));
    }
    Ok(())
}

/// The message `id` if `requester` sent it.
pub async fn owned_message(store: &Store, id: &str, requester: Option<&str>) -> AppResult<Message> {
    let id = Uuid::parse_str(id).map_err(|_| not_found(id))?;
    let Some(message) = store.find_message(id).await? else {
        return Err(not_found(&id.to_string()));
    };

    if requester != Some(message.from.as_str()) {
        return Err(AppError::Unauthorized(format!("message {id} belongs to {}", message.from)));
    }

    Ok(message)
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("no message {id}"))
}
