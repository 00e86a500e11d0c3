//! HTTP handlers and route configuration.

pub mod form;
mod health;
mod noticias;
mod uploads;

use actix_web::web;

use crate::pages;

/// Configure all application routes. `upload_prefix` is the URL path images are served from.
pub fn configure_routes(cfg: &mut web::ServiceConfig, upload_prefix: &str) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/noticias")
                    .route("", web::get().to(noticias::list))
                    .route("", web::post().to(noticias::create))
                    .route("/{id}", web::get().to(noticias::get))
                    .route("/{id}", web::put().to(noticias::update))
                    .route("/{id}", web::delete().to(noticias::delete)),
            ),
    )
    .configure(pages::configure_pages)
    .route(
        &format!("{}/{{file_name}}", upload_prefix.trim_end_matches('/')),
        web::get().to(uploads::serve),
    );
}
