use std::sync::Arc;

use async_trait::async_trait;

use crate::{entities::contact::Contact, errors::NotifyError};

#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Announces a freshly stored contact message to the site owner.
    async fn notify_new_contact(&self, contact: &Contact) -> Result<(), NotifyError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T> NotificationService for Arc<T>
where
    T: NotificationService + ?Sized,
{
    async fn notify_new_contact(&self, contact: &Contact) -> Result<(), NotifyError> {
        (**self).notify_new_contact(contact).await
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

/// Stand-in used when outbound email is not configured.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

#[async_trait]
impl NotificationService for NoopNotifier {
    async fn notify_new_contact(&self, contact: &Contact) -> Result<(), NotifyError> {
        tracing::debug!(contact_id = %contact.id, "Email notifications disabled, skipping");
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
