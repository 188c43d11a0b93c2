use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use zeroize::Zeroizing;

use crate::{
    entities::contact::Contact,
    errors::NotifyError,
    repositories::notifier::NotificationService,
    settings::AppConfig,
};

#[derive(Debug, Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    html: String,
}

/// Sends contact notifications through a transactional-mail HTTP API
/// (`POST {endpoint}` with a bearer key and a JSON body).
#[derive(Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: Zeroizing<String>,
    from: String,
    to: String,
}

impl HttpMailer {
    /// Returns `Ok(None)` when the email settings are incomplete.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, NotifyError> {
        let (Some(endpoint), Some(api_key), Some(from), Some(to)) = (
            config.email_api_url.as_ref(),
            config.email_api_key.as_ref(),
            config.email_from.as_ref(),
            config.email_to.as_ref(),
        ) else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.email_timeout_secs))
            .build()
            .map_err(|e| NotifyError::ClientSetup(e.to_string()))?;

        Ok(Some(HttpMailer {
            client,
            endpoint: endpoint.clone(),
            api_key: Zeroizing::new(api_key.clone()),
            from: from.clone(),
            to: to.clone(),
        }))
    }
}

#[async_trait]
impl NotificationService for HttpMailer {
    async fn notify_new_contact(&self, contact: &Contact) -> Result<(), NotifyError> {
        let email = OutgoingEmail {
            from: &self.from,
            to: &self.to,
            subject: super::template::contact_subject(contact),
            html: super::template::contact_html(contact),
        };

        let response = self.client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.as_str())
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status: status.as_u16(), body });
        }

        tracing::info!(contact_id = %contact.id, "Contact notification sent");
        Ok(())
    }
}
