use sqlx::{Executor, Sqlite};
use uuid::Uuid;

use crate::db::{Message, MessageKind};

use super::Store;

type MessageRow = (String, String, String, String, String, String);

fn from_row((id, from, to, text, kind, time): MessageRow) -> Result<Message, sqlx::Error> {
    Ok(Message {
        id: Uuid::parse_str(&id).map_err(|e| sqlx::Error::Decode(e.into()))?,
        from,
        to,
        text,
        kind: kind.parse::<MessageKind>().map_err(|e| sqlx::Error::Decode(e.into()))?,
        time,
    })
}

impl Store {
    /// Every message, oldest first.
    pub async fn find_messages(&self) -> Result<Vec<Message>, sqlx::Error> {
        let rows: Vec<MessageRow> =
            sqlx::query_as("SELECT id,sender,recipient,text,kind,time FROM messages ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(from_row).collect()
    }

    pub async fn find_message(&self, id: Uuid) -> Result<Option<Message>, sqlx::Error> {
        let row: Option<MessageRow> =
            sqlx::query_as("SELECT id,sender,recipient,text,kind,time FROM messages WHERE id=?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(from_row).transpose()
    }

    pub async fn insert_message(&self, message: &Message) -> Result<(), sqlx::Error> {
        Self::insert_message_with(&self.pool, message).await
    }

    pub(super) async fn insert_message_with<'e, E>(executor: E, message: &Message) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO messages (id,sender,recipient,text,kind,time) VALUES (?,?,?,?,?,?)")
            .bind(message.id.to_string())
            .bind(&message.from)
            .bind(&message.to)
            .bind(&message.text)
            .bind(message.kind.as_str())
            .bind(&message.time)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Overwrites recipient, text and kind. Sender, time and id are kept.
    pub async fn update_message(
        &self,
        id: Uuid,
        to: &str,
        text: &str,
        kind: MessageKind,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE messages SET recipient=?, text=?, kind=? WHERE id=?")
            .bind(to)
            .bind(text)
            .bind(kind.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_message(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM messages WHERE id=?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
