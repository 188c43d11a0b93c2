use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::NormalizePath,
    web, App,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use portfolio_api::{
    entities::{contact::Contact, project::{NewProject, ProjectCategory}},
    errors::NotifyError,
    repositories::{
        memory::{MemoryContactRepo, MemoryProjectRepo},
        notifier::NotificationService,
    },
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    shared_repos::{SharedRepositories, StoreBackend},
    AppState,
};
use serde_json::{json, Value};
use uuid::Uuid;

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio API Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        database_url: None,
        cors_allowed_origins: vec!["*".to_string()],
        email_api_url: None,
        email_api_key: None,
        email_from: None,
        email_to: None,
        email_timeout_secs: 1,
        contact_email_limit: 100,
        contact_email_window_secs: 3600,
        contact_ip_limit: 100,
        contact_ip_window_secs: 60,
        trust_forwarded_for: false,
    }
}

/// Records every notification and optionally fails them all.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<Uuid>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        RecordingNotifier { fail: true, ..Default::default() }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    async fn notify_new_contact(&self, contact: &Contact) -> Result<(), NotifyError> {
        self.sent.lock().push(contact.id);
        if self.fail {
            return Err(NotifyError::Rejected { status: 503, body: "mail API down".into() });
        }
        Ok(())
    }
}

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub contacts: MemoryContactRepo,
    pub projects: MemoryProjectRepo,
    pub notifier: RecordingNotifier,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(test_config(), RecordingNotifier::default())
    }

    pub fn with(config: AppConfig, notifier: RecordingNotifier) -> Self {
        let contacts = MemoryContactRepo::new();
        let projects = MemoryProjectRepo::new();

        let repos = SharedRepositories {
            contact_repo: Arc::new(contacts.clone()),
            project_repo: Arc::new(projects.clone()),
            backend: StoreBackend::Memory,
        };

        let state = web::Data::new(AppState::new(&config, repos, Arc::new(notifier.clone())));

        TestApp { state, contacts, projects, notifier }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(NormalizePath::trim())
            .configure(configure_routes)
    }

    pub async fn seed_project(&self, title: &str, category: ProjectCategory, technologies: &[&str]) -> Uuid {
        self.state
            .project_handler
            .create_project(NewProject {
                title: title.to_string(),
                description: format!("{title} description"),
                features: vec!["Responsive layout".to_string()],
                technologies: technologies.iter().map(|t| t.to_string()).collect(),
                category,
                ..Default::default()
            })
            .await
            .expect("Failed to seed project")
    }
}

pub fn valid_contact() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subject": "Collaboration",
        "message": "I would love to work together on a project."
    })
}
