//! Repository for the `contact_messages` table.

use sitecms_core::contact::MessageFilter;
use sitecms_core::pagination::PageRequest;
use sitecms_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_message::{ContactMessage, CreateContactMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, email, phone, message, is_read, is_sent, created_at";

/// Provides inbox operations for contact messages.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Store a submitted message. New messages are unread and unsent.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (first_name, last_name, email, phone, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages WHERE id = $1");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of messages matching `filter`, newest first, plus the total
    /// number of matching messages.
    pub async fn list_page(
        pool: &PgPool,
        filter: MessageFilter,
        page: PageRequest,
    ) -> Result<(Vec<ContactMessage>, i64), sqlx::Error> {
        let condition = filter_condition(filter);

        let count_query = format!("SELECT COUNT(*) FROM contact_messages WHERE {condition}");
        let total: i64 = sqlx::query_scalar(&count_query).fetch_one(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages
             WHERE {condition}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ContactMessage>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Number of unread messages, shown as a badge in the admin console.
    pub async fn count_unread(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages WHERE is_read = FALSE")
            .fetch_one(pool)
            .await
    }

    /// Mark a message as read. Idempotent.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_read(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_messages SET is_read = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record that a notification email went out for this message.
    pub async fn mark_sent(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!(
            "UPDATE contact_messages SET is_sent = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a message. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn filter_condition(filter: MessageFilter) -> &'static str {
    match filter {
        MessageFilter::All => "TRUE",
        MessageFilter::Unread => "is_read = FALSE",
        MessageFilter::Sent => "is_sent = TRUE",
    }
}
