use std::{sync::Arc, time::Duration};

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, limiter, mail, utils};

use errors::AppError;
use limiter::rate_limiter::SubmissionLimiter;
use mail::mailer::HttpMailer;
use repositories::{
    contact::ContactRepository,
    notifier::{NoopNotifier, NotificationService},
    project::ProjectRepository,
};
use shared_repos::{SharedRepositories, StoreBackend};
use use_cases::{contact::ContactHandler, project::ProjectHandler};

pub type AppContactHandler = ContactHandler<Arc<dyn ContactRepository>, Arc<dyn NotificationService>>;
pub type AppProjectHandler = ProjectHandler<Arc<dyn ProjectRepository>>;

pub struct AppState {
    pub contact_handler: AppContactHandler,
    pub project_handler: AppProjectHandler,
    pub submission_limiter: SubmissionLimiter,
    pub store_backend: StoreBackend,
    pub trust_forwarded_for: bool,
}

impl AppState {
    pub fn new(
        config: &settings::AppConfig,
        repos: SharedRepositories,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        let submission_limiter = SubmissionLimiter::new(
            config.contact_ip_limit,
            Duration::from_secs(config.contact_ip_window_secs),
            config.contact_email_limit,
            Duration::from_secs(config.contact_email_window_secs),
        );

        AppState {
            contact_handler: ContactHandler::new(repos.contact_repo, notifier),
            project_handler: ProjectHandler::new(repos.project_repo),
            submission_limiter,
            store_backend: repos.backend,
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }

    pub async fn check_store(&self) -> Result<(), AppError> {
        self.contact_handler.contact_repo.check_connection().await
    }
}

/// Picks the HTTP mailer when email is fully configured, otherwise a no-op.
/// A mailer that cannot be built is logged and disabled.
pub fn build_notifier(config: &settings::AppConfig) -> Arc<dyn NotificationService> {
    match HttpMailer::from_config(config) {
        Ok(Some(mailer)) => {
            tracing::info!("Email notifications enabled");
            Arc::new(mailer)
        }
        Ok(None) => {
            tracing::info!("Email settings incomplete; notifications disabled");
            Arc::new(NoopNotifier)
        }
        Err(e) => {
            tracing::error!("Email notifications disabled: {}", e);
            Arc::new(NoopNotifier)
        }
    }
}
