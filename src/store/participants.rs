use crate::db::{Message, Participant};

use super::Store;

impl Store {
    pub async fn find_participants(&self) -> Result<Vec<Participant>, sqlx::Error> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT name,last_status FROM participants ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(name, last_status)| Participant { name, last_status })
            .collect())
    }

    pub async fn find_participant(&self, name: &str) -> Result<Option<Participant>, sqlx::Error> {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT name,last_status FROM participants WHERE name=?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(name, last_status)| Participant { name, last_status }))
    }

    /// Fails with a unique violation if the name is taken.
    pub async fn insert_participant(&self, participant: &Participant) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO participants (name,last_status) VALUES (?,?)")
            .bind(&participant.name)
            .bind(participant.last_status)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Returns false when no participant has that name.
    pub async fn update_last_status(&self, name: &str, last_status: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE participants SET last_status=? WHERE name=?")
            .bind(last_status)
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes `name` and appends `notice` in one transaction, but only if the
    /// participant's `last_status` is still `seen_last_status`. Returns whether
    /// the eviction happened.
    pub async fn evict_participant(
        &self,
        name: &str,
        seen_last_status: i64,
        notice: &Message,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM participants WHERE name=? AND last_status=?")
            .bind(name)
            .bind(seen_last_status)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        Self::insert_message_with(&mut *tx, notice).await?;
        tx.commit().await?;
        Ok(true)
    }
}
