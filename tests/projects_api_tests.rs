mod test_utils;

use actix_web::{http::StatusCode, test};
use portfolio_api::entities::project::{Project, ProjectCategory};
use serde_json::Value;
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn empty_store_lists_no_projects() {
    let app = TestApp::new();
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let projects: Vec<Project> = test::call_and_read_body_json(&service, req).await;

    assert!(projects.is_empty());
}

#[actix_rt::test]
async fn empty_store_showcase_serves_the_three_fallback_projects() {
    let app = TestApp::new();
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/projects/showcase").to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    assert_eq!(body["usingFallback"], true);
    let titles: Vec<_> = body["projects"].as_array().unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec![
        "Train Booking Website",
        "Food Delivery Website",
        "Graphical Password Authentication",
    ]);
}

#[actix_rt::test]
async fn seeded_projects_are_listed_with_camel_case_fields() {
    let app = TestApp::new();
    app.seed_project("Portfolio", ProjectCategory::Fullstack, &["Rust", "actix-web"]).await;

    let service = test::init_service(app.app()).await;
    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    let project = &body[0];
    assert_eq!(project["title"], "Portfolio");
    assert_eq!(project["category"], "fullstack");
    assert_eq!(project["featured"], false);
    assert!(project.get("createdAt").is_some());
    assert!(project.get("githubUrl").is_some());
}

#[actix_rt::test]
async fn showcase_filters_by_category_and_search() {
    let app = TestApp::new();
    app.seed_project("Chat Bot", ProjectCategory::Ai, &["Python", "PyTorch"]).await;
    app.seed_project("Shop", ProjectCategory::Web, &["React", "Node"]).await;
    app.seed_project("Vision", ProjectCategory::Ai, &["Python", "OpenCV"]).await;

    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/projects/showcase?category=ai&search=").to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;

    assert_eq!(body["usingFallback"], false);
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p["category"] == "ai"));

    assert_eq!(body["topTechnologies"][0]["technology"], "Python");
    assert_eq!(body["topTechnologies"][0]["count"], 2);

    let req = test::TestRequest::get().uri("/api/projects/showcase?search=opencv").to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "Vision");
}

#[actix_rt::test]
async fn showcase_rejects_unknown_category() {
    let app = TestApp::new();
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/projects/showcase?category=desktop").to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/projects/showcase?top=many").to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn project_lookup_by_id() {
    let app = TestApp::new();
    let id = app.seed_project("Portfolio", ProjectCategory::Web, &["Rust"]).await;
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri(&format!("/api/projects/{}/", id)).to_request();
    let project: Project = test::call_and_read_body_json(&service, req).await;
    assert_eq!(project.id, id);

    let req = test::TestRequest::get().uri(&format!("/api/projects/{}", Uuid::new_v4())).to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn health_reports_the_memory_store() {
    let app = TestApp::new();
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["database"], "OK");
    assert_eq!(body["email"], "Enabled");
}

#[actix_rt::test]
async fn home_banner_is_served() {
    let app = TestApp::new();
    let service = test::init_service(app.app()).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(body["status"], "Ok");
}
