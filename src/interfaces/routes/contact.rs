use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .service(
                web::resource("")
                    .route(web::post().to(contact::create_contact))
                    .route(web::get().to(contact::list_contacts))
            )
            .service(
                web::resource("/{contact_id}")
                    .route(web::get().to(contact::get_contact))
            )
            .service(
                web::resource("/{contact_id}/status")
                    .route(web::put().to(contact::update_contact_status))
            )
    );
}
