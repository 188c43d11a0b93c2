use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::AppError;

// ───── Constants ──────────────────────────────────────────────────────
const MAX_TITLE_LENGTH: u64 = 150;
const MAX_DESCRIPTION_LENGTH: u64 = 2000;
const MAX_LIST_ITEM_LENGTH: usize = 200;
const MAX_URL_LENGTH: u64 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    #[default]
    Web,
    Mobile,
    Ai,
    Fullstack,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Ai => "ai",
            ProjectCategory::Fullstack => "fullstack",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(ProjectCategory::Web),
            "mobile" => Ok(ProjectCategory::Mobile),
            "ai" => Ok(ProjectCategory::Ai),
            "fullstack" => Ok(ProjectCategory::Fullstack),
            other => Err(AppError::InvalidInput(format!("Unknown project category: {}", other))),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

/// Row shape as stored; `category` is kept as text in the table.
#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image: Option<String>,
    pub category: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<ProjectCategory>().map_err(|_| {
            AppError::InternalError(format!("Stored project {} has unknown category '{}'", row.id, row.category))
        })?;

        Ok(Project {
            id: row.id,
            title: row.title,
            description: row.description,
            features: row.features,
            technologies: row.technologies,
            github_url: row.github_url,
            live_url: row.live_url,
            image: row.image,
            category,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ───── API Models ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required (max 150 characters)"))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_DESCRIPTION_LENGTH, message = "Description is required (max 2000 characters)"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_list_items"))]
    pub features: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_list_items"))]
    pub technologies: Vec<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub github_url: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub live_url: Option<String>,

    #[validate(length(max = MAX_URL_LENGTH))]
    pub image: Option<String>,

    #[serde(default)]
    pub category: ProjectCategory,

    #[serde(default)]
    pub featured: bool,
}

/// A validated project, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<NewProject> for ProjectInsert {
    type Error = AppError;

    fn try_from(project: NewProject) -> Result<Self, Self::Error> {
        let project = NewProject {
            title: project.title.trim().to_string(),
            github_url: trim_optional(project.github_url),
            live_url: trim_optional(project.live_url),
            image: trim_optional(project.image),
            ..project
        };
        project.validate()?;

        let now = Utc::now();

        Ok(ProjectInsert {
            title: project.title,
            description: project.description,
            features: project.features,
            technologies: project.technologies,
            github_url: project.github_url,
            live_url: project.live_url,
            image: project.image,
            category: project.category,
            featured: project.featured,
            created_at: now,
            updated_at: now,
        })
    }
}

// ───── Validation Helpers ───────────────────────────────────────────

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_list_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(new_validation_error("empty_item", "List entries cannot be empty"));
    }
    if items.iter().any(|item| item.chars().count() > MAX_LIST_ITEM_LENGTH) {
        return Err(new_validation_error("item_too_long", "List entries must be at most 200 characters"));
    }
    Ok(())
}

fn new_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project() -> NewProject {
        NewProject {
            title: "  Portfolio  ".into(),
            description: "My site".into(),
            features: vec!["Contact form".into()],
            technologies: vec!["Rust".into(), "actix-web".into()],
            github_url: Some("  ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn category_defaults_to_web_and_parses_lowercase() {
        assert_eq!(ProjectCategory::default(), ProjectCategory::Web);
        assert_eq!("AI".parse::<ProjectCategory>().unwrap(), ProjectCategory::Ai);
        assert!("desktop".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn unknown_category_is_rejected_at_parse_time() {
        let json = r#"{"title":"x","description":"y","category":"desktop"}"#;
        assert!(serde_json::from_str::<NewProject>(json).is_err());
    }

    #[test]
    fn insert_trims_title_and_drops_blank_links() {
        let insert = ProjectInsert::try_from(new_project()).unwrap();
        assert_eq!(insert.title, "Portfolio");
        assert_eq!(insert.github_url, None);
        assert_eq!(insert.category, ProjectCategory::Web);
        assert!(!insert.featured);
        assert_eq!(insert.created_at, insert.updated_at);
    }

    #[test]
    fn empty_list_entries_are_rejected() {
        let mut project = new_project();
        project.technologies.push("   ".into());

        match ProjectInsert::try_from(project) {
            Err(AppError::ValidationError(fields)) => assert_eq!(fields[0].field, "technologies"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn row_with_unknown_category_is_an_internal_error() {
        let now = Utc::now();
        let row = ProjectRow {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            features: vec![],
            technologies: vec![],
            github_url: None,
            live_url: None,
            image: None,
            category: "desktop".into(),
            featured: false,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(Project::try_from(row), Err(AppError::InternalError(_))));
    }
}
