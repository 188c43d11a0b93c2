//! Process-local record store used when no database is configured, and by the
//! test-suite. Records live for the lifetime of the process.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::{
    entities::{
        contact::{Contact, ContactInsert},
        project::{Project, ProjectInsert},
    },
    errors::AppError,
    repositories::{contact::ContactRepository, project::ProjectRepository},
};

/// Insertion order is preserved; readers reverse it for newest-first listings.
#[derive(Clone, Default)]
pub struct MemoryContactRepo {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl MemoryContactRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.read().is_empty()
    }
}

#[async_trait]
impl ContactRepository for MemoryContactRepo {
    async fn create_contact(&self, msg: &ContactInsert) -> Result<Contact, AppError> {
        let contact = Contact {
            id: Uuid::new_v4(),
            name: msg.name.clone(),
            email: msg.email.clone(),
            subject: msg.subject.clone(),
            message: msg.message.clone(),
            status: msg.status.clone(),
            created_at: Utc::now(),
        };

        self.contacts.write().push(contact.clone());
        Ok(contact)
    }

    async fn get_contact_by_id(&self, id: &Uuid) -> Result<Contact, AppError> {
        self.contacts
            .read()
            .iter()
            .find(|c| c.id == *id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, AppError> {
        let mut contacts: Vec<Contact> = self.contacts.read().iter().rev().cloned().collect();
        // Stable: equal timestamps keep the newest-inserted first
        contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contacts)
    }

    async fn update_contact_status(&self, id: &Uuid, status: &str) -> Result<Contact, AppError> {
        let mut contacts = self.contacts.write();
        let contact = contacts
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))?;

        contact.status = status.to_string();
        Ok(contact.clone())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryProjectRepo {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl MemoryProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        self.projects.write().push(Project {
            id,
            title: project.title.clone(),
            description: project.description.clone(),
            features: project.features.clone(),
            technologies: project.technologies.clone(),
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone(),
            image: project.image.clone(),
            category: project.category,
            featured: project.featured,
            created_at: project.created_at,
            updated_at: project.updated_at,
        });

        Ok(id)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        self.projects
            .read()
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let mut projects: Vec<Project> = self.projects.read().iter().rev().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }
}
