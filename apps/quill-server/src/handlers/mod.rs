//! HTTP handlers and route configuration.

mod archive;
mod auth;
mod categories;
mod editor;
mod health;
mod posts;
mod search;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/search", web::get().to(search::search))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/session", web::get().to(auth::session)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list_categories))
                    .route("", web::post().to(categories::create_category))
                    .route("/{name}", web::put().to(categories::rename_category))
                    .route("/{name}", web::delete().to(categories::delete_category)),
            )
            .service(
                web::scope("/editor")
                    .route("/preview", web::post().to(editor::preview))
                    .route("/wrap", web::post().to(editor::wrap)),
            )
            .route("/admin/archive", web::get().to(archive::archive)),
    );
}
