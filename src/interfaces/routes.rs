use actix_web::web;

use crate::handlers::home::home;

mod admin;
mod contact;
mod projects;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(admin::config_routes)
            .configure(contact::config_routes)
            .configure(projects::config_routes)
    );

    cfg.configure(json_error::config_routes);
}
