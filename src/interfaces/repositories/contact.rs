use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::contact::{Contact, ContactInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, msg: &ContactInsert) -> Result<Contact, AppError>;
    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Contact, AppError>;
    /// Newest first.
    async fn list_contacts(&self) -> Result<Vec<Contact>, AppError>;
    async fn update_contact_status(&self, id: &Uuid, status: &str) -> Result<Contact, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

#[async_trait]
impl<T> ContactRepository for Arc<T>
where
    T: ContactRepository + ?Sized,
{
    async fn create_contact(&self, msg: &ContactInsert) -> Result<Contact, AppError> {
        (**self).create_contact(msg).await
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Contact, AppError> {
        (**self).get_contact_by_id(id).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        (**self).list_contacts().await
    }

    async fn update_contact_status(&self, id: &Uuid, status: &str) -> Result<Contact, AppError> {
        (**self).update_contact_status(id, status).await
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact(&self, msg: &ContactInsert) -> Result<Contact, AppError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (id, name, email, subject, message, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, subject, message, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&msg.name)
        .bind(&msg.email)
        .bind(&msg.subject)
        .bind(&msg.message)
        .bind(&msg.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Contact, AppError> {
        sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, email, subject, message, status, created_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, email, subject, message, status, created_at
            FROM contacts
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    async fn update_contact_status(&self, id: &Uuid, status: &str) -> Result<Contact, AppError> {
        sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts SET status = $2
            WHERE id = $1
            RETURNING id, name, email, subject, message, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
