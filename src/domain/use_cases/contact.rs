use crate::{
    entities::contact::{Contact, ContactCreatedResponse, ContactInsert, NewContactForm, UpdateContactStatusRequest},
    errors::AppError,
    repositories::{contact::ContactRepository, notifier::NotificationService},
    utils::valid_uuid::valid_uuid,
};

pub struct ContactHandler<R, N>
where
    R: ContactRepository,
    N: NotificationService,
{
    pub contact_repo: R,
    pub notifier: N,
}

impl<R, N> ContactHandler<R, N>
where
    R: ContactRepository,
    N: NotificationService,
{
    pub fn new(contact_repo: R, notifier: N) -> Self {
        ContactHandler { contact_repo, notifier }
    }

    /// Validates and stores a submission, then notifies the site owner.
    /// A failed notification is logged and does not fail the submission.
    pub async fn create_contact_message(
        &self,
        request: NewContactForm
    ) -> Result<ContactCreatedResponse, AppError> {
        let new_msg = ContactInsert::try_from(request)?;

        let contact = self.contact_repo.create_contact(&new_msg).await?;

        if let Err(e) = self.notifier.notify_new_contact(&contact).await {
            tracing::warn!(contact_id = %contact.id, "Contact notification failed: {}", e);
        }

        Ok(ContactCreatedResponse {
            message: "Message sent successfully!".to_string(),
            contact_id: contact.id,
        })
    }

    /// Retrieves a contact message by its ID
    pub async fn get_contact_message_by_id(&self, id: &str) -> Result<Contact, AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo.get_contact_by_id(&valid_id).await
    }

    /// Lists all contact messages, newest first
    pub async fn list_contact_messages(&self) -> Result<Vec<Contact>, AppError> {
        self.contact_repo.list_contacts().await
    }

    pub async fn update_contact_status(
        &self,
        id: &str,
        request: UpdateContactStatusRequest,
    ) -> Result<Contact, AppError> {
        let valid_id = valid_uuid(id)?;
        let status = request.into_status()?;

        self.contact_repo.update_contact_status(&valid_id, &status).await
    }
}
