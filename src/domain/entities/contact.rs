use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;

const MAX_NAME_LENGTH: u64 = 100;
const MAX_SUBJECT_LENGTH: u64 = 200;
const MAX_MESSAGE_LENGTH: u64 = 5000;
const MAX_STATUS_LENGTH: u64 = 50;

/// Inbound contact form. Every field defaults to empty so that a missing
/// key surfaces as a field-level validation error instead of a JSON error.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewContactForm {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name is required (max 100 characters)"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: String,

    #[validate(length(min = 1, max = MAX_SUBJECT_LENGTH, message = "Subject is required (max 200 characters)"))]
    pub subject: String,

    #[validate(length(min = 1, max = MAX_MESSAGE_LENGTH, message = "Message is required (max 5000 characters)"))]
    pub message: String,
}

impl NewContactForm {
    fn normalized(self) -> Self {
        NewContactForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Validates the trimmed form without consuming it.
    pub fn check(&self) -> Result<(), AppError> {
        self.clone().normalized().validate()?;
        Ok(())
    }
}

/// A validated submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
}

impl TryFrom<NewContactForm> for ContactInsert {
    type Error = AppError;

    fn try_from(form: NewContactForm) -> Result<Self, Self::Error> {
        let form = form.normalized();
        form.validate()?;

        Ok(ContactInsert {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            status: crate::constants::CONTACT_STATUS_NEW.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateContactStatusRequest {
    #[validate(length(min = 1, max = MAX_STATUS_LENGTH, message = "Status is required (max 50 characters)"))]
    pub status: String,
}

impl UpdateContactStatusRequest {
    /// Returns the trimmed status once it passes validation.
    pub fn into_status(self) -> Result<String, AppError> {
        let request = UpdateContactStatusRequest { status: self.status.trim().to_string() };
        request.validate()?;
        Ok(request.status)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreatedResponse {
    pub message: String,
    pub contact_id: Uuid,
}
