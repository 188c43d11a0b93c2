use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::list_projects))
            )
            // Registered before /{project_id} so it is not captured as an id
            .service(
                web::resource("/showcase")
                    .route(web::get().to(projects::get_showcase))
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(projects::get_project))
            )
    );
}
