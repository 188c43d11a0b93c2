//! Display-side view of the catalog: fallback substitution, filtering and the
//! aggregates the projects section charts.

use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    constants::TOP_TECHNOLOGIES_DEFAULT,
    entities::project::{Project, ProjectCategory},
    errors::AppError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProjectCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: ProjectCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ShowcaseQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub top: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: ProjectCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyCount {
    pub technology: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseResponse {
    pub projects: Vec<Project>,
    pub category_counts: Vec<CategoryCount>,
    pub top_technologies: Vec<TechnologyCount>,
    pub using_fallback: bool,
}

/// Substitutes the built-in list when the fetch failed or came back empty.
/// The flag reports whether the substitution happened.
pub fn with_fallback(fetched: Result<Vec<Project>, AppError>) -> (Vec<Project>, bool) {
    match fetched {
        Ok(projects) if !projects.is_empty() => (projects, false),
        Ok(_) => (fallback_projects(), true),
        Err(e) => {
            tracing::warn!("Project fetch failed, serving fallback list: {}", e);
            (fallback_projects(), true)
        }
    }
}

/// Keeps projects in the selected category whose title, description or any
/// technology contains `search`, case-insensitively. Order is preserved.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    filter: CategoryFilter,
    search: &str,
) -> Vec<&'a Project> {
    let needle = search.to_lowercase();

    projects
        .iter()
        .filter(|p| filter.matches(p.category))
        .filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.technologies.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Projects per category, in order of first appearance.
pub fn category_counts(projects: &[Project]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for project in projects {
        match counts.iter_mut().find(|c| c.category == project.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount { category: project.category, count: 1 }),
        }
    }

    counts
}

/// The `n` most used technologies. Ties keep first-appearance order.
pub fn top_technologies(projects: &[Project], n: usize) -> Vec<TechnologyCount> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TechnologyCount> = Vec::new();

    for tech in projects.iter().flat_map(|p| p.technologies.iter()) {
        match first_seen.get(tech.as_str()) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                first_seen.insert(tech.as_str(), counts.len());
                counts.push(TechnologyCount { technology: tech.clone(), count: 1 });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(n);
    counts
}

pub fn build_showcase(
    fetched: Result<Vec<Project>, AppError>,
    query: &ShowcaseQuery,
) -> Result<ShowcaseResponse, AppError> {
    let filter = query.category.as_deref().unwrap_or("all").parse::<CategoryFilter>()?;
    let search = query.search.as_deref().unwrap_or("");
    let top = query.top.unwrap_or(TOP_TECHNOLOGIES_DEFAULT);

    let (projects, using_fallback) = with_fallback(fetched);

    let category_counts = category_counts(&projects);
    let top_technologies = top_technologies(&projects, top);
    let filtered = filter_projects(&projects, filter, search)
        .into_iter()
        .cloned()
        .collect();

    Ok(ShowcaseResponse {
        projects: filtered,
        category_counts,
        top_technologies,
        using_fallback,
    })
}

fn fallback_project(
    n: u128,
    title: &str,
    description: &str,
    features: &[&str],
    technologies: &[&str],
    category: ProjectCategory,
) -> Project {
    Project {
        id: Uuid::from_u128(n),
        title: title.to_string(),
        description: description.to_string(),
        features: features.iter().map(|s| s.to_string()).collect(),
        technologies: technologies.iter().map(|s| s.to_string()).collect(),
        github_url: Some("#".to_string()),
        live_url: Some("#".to_string()),
        image: None,
        category,
        featured: true,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// The fixed three-project list shown when the catalog is empty or unreachable.
pub fn fallback_projects() -> Vec<Project> {
    vec![
        fallback_project(
            1,
            "Train Booking Website",
            "A comprehensive train ticket booking platform with real-time availability, secure payments, and user management.",
            &[
                "Online train ticket reservation system",
                "Real-time ticket availability and pricing",
                "Secure payment processing",
                "User authentication and profile management",
                "Ticket cancellation and refund system",
                "Travel insurance options",
            ],
            &["React.js", "Node.js", "MongoDB", "Express.js", "Payment Gateway"],
            ProjectCategory::Web,
        ),
        fallback_project(
            2,
            "Food Delivery Website",
            "A modern food delivery platform connecting users with local restaurants for seamless meal ordering experience.",
            &[
                "Restaurant browsing and menu display",
                "Online food ordering system",
                "Real-time order tracking",
                "Payment integration",
                "Delivery coordination",
                "User reviews and ratings",
            ],
            &["React.js", "Node.js", "MongoDB", "Express.js", "Real-time APIs"],
            ProjectCategory::Web,
        ),
        fallback_project(
            3,
            "Graphical Password Authentication",
            "An innovative authentication system using visual memory patterns for enhanced security and user experience.",
            &[
                "Visual password selection system",
                "Image-based authentication",
                "Enhanced security through visual memory",
                "User-friendly interface",
                "Pattern recognition algorithms",
                "Secure session management",
            ],
            &["JavaScript", "HTML5 Canvas", "CSS3", "Computer Vision", "Security"],
            ProjectCategory::Ai,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, category: ProjectCategory, technologies: &[&str]) -> Project {
        fallback_project(0, title, "", &[], technologies, category)
    }

    #[test]
    fn empty_or_failed_fetch_yields_three_fallback_projects() {
        let (projects, used) = with_fallback(Ok(vec![]));
        assert!(used);
        assert_eq!(projects.len(), 3);

        let (projects, used) = with_fallback(Err(AppError::InternalError("down".into())));
        assert!(used);
        assert_eq!(projects, fallback_projects());
    }

    #[test]
    fn non_empty_fetch_is_used_as_is() {
        let fetched = vec![project("Mine", ProjectCategory::Mobile, &[])];
        let (projects, used) = with_fallback(Ok(fetched.clone()));
        assert!(!used);
        assert_eq!(projects, fetched);
    }

    #[test]
    fn ai_filter_with_empty_search_returns_exactly_the_ai_subset() {
        let projects = fallback_projects();
        let filtered = filter_projects(&projects, "ai".parse().unwrap(), "");

        assert_eq!(filtered.len(), 1);
        assert!(filtered.iter().all(|p| p.category == ProjectCategory::Ai));
    }

    #[test]
    fn search_matches_title_description_and_technologies_case_insensitively() {
        let projects = fallback_projects();

        let by_tech: Vec<_> = filter_projects(&projects, CategoryFilter::All, "mongodb")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(by_tech, vec![Uuid::from_u128(1), Uuid::from_u128(2)]);

        let by_title = filter_projects(&projects, CategoryFilter::All, "FOOD");
        assert_eq!(by_title.len(), 1);

        let by_description = filter_projects(&projects, CategoryFilter::All, "visual memory");
        assert_eq!(by_description[0].category, ProjectCategory::Ai);

        assert!(filter_projects(&projects, CategoryFilter::Only(ProjectCategory::Ai), "mongodb").is_empty());
    }

    #[test]
    fn search_whitespace_is_part_of_the_needle() {
        let projects = vec![project("Rust API", ProjectCategory::Web, &[])];

        assert_eq!(filter_projects(&projects, CategoryFilter::All, "rust ").len(), 1);
        assert!(filter_projects(&projects, CategoryFilter::All, " rust").is_empty());
    }

    #[test]
    fn category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "fullstack".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(ProjectCategory::Fullstack)
        );
        assert!("games".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn counts_categories_in_first_appearance_order() {
        let counts = category_counts(&fallback_projects());
        assert_eq!(counts, vec![
            CategoryCount { category: ProjectCategory::Web, count: 2 },
            CategoryCount { category: ProjectCategory::Ai, count: 1 },
        ]);
    }

    #[test]
    fn top_technologies_ranks_by_frequency_then_first_seen() {
        let projects = vec![
            project("a", ProjectCategory::Web, &["Rust", "Postgres"]),
            project("b", ProjectCategory::Web, &["Go", "Postgres"]),
            project("c", ProjectCategory::Ai, &["Python", "Postgres", "Go"]),
        ];

        let top = top_technologies(&projects, 3);
        let names: Vec<_> = top.iter().map(|t| (t.technology.as_str(), t.count)).collect();
        assert_eq!(names, vec![("Postgres", 3), ("Go", 2), ("Rust", 1)]);
    }

    #[test]
    fn showcase_aggregates_cover_the_unfiltered_list() {
        let query = ShowcaseQuery {
            category: Some("ai".into()),
            search: None,
            top: Some(2),
        };
        let view = build_showcase(Ok(vec![]), &query).unwrap();

        assert!(view.using_fallback);
        assert_eq!(view.projects.len(), 1);
        assert_eq!(view.category_counts.len(), 2);
        assert_eq!(view.top_technologies.len(), 2);
        assert_eq!(view.top_technologies[0].technology, "React.js");
    }

    #[test]
    fn showcase_rejects_unknown_category() {
        let query = ShowcaseQuery { category: Some("desktop".into()), ..Default::default() };
        assert!(matches!(build_showcase(Ok(vec![]), &query), Err(AppError::InvalidInput(_))));
    }
}
