use crate::{clock::Clock, db::Participant, store::Store, AppError, AppResult};

pub async fn register(store: &Store, clock: &Clock, name: &str) -> AppResult<Participant> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("\"name\" must not be empty".to_owned()));
    }

    if exists(store, name).await? {
        return Err(AppError::Conflict(format!("{name} is already in the room")));
    }

    let participant = Participant {
        name: name.to_owned(),
        last_status: clock.now_millis(),
    };
    // a racing registration surfaces as a unique violation, mapped to Conflict
    store.insert_participant(&participant).await?;

    tracing::info!(name = %participant.name, "participant joined");
    Ok(participant)
}

pub async fn list(store: &Store) -> AppResult<Vec<Participant>> {
    Ok(store.find_participants().await?)
}

pub async fn exists(store: &Store, name: &str) -> AppResult<bool> {
    Ok(store.find_participant(name).await?.is_some())
}

pub async fn touch(store: &Store, clock: &Clock, name: &str) -> AppResult<()> {
    if store.update_last_status(name, clock.now_millis()).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{name} is not in the room")))
    }
}
