//! HTTP handlers and route configuration.

mod auth;
mod catalog;
mod health;
mod metrics;
mod orders;
mod users;

use actix_web::web;

use bookshop_core::domain::{Account, Bundle};
use bookshop_shared::dto::{AuthResponse, UserResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/metrics", web::get().to(metrics::export))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me))
                    .route("/password/change", web::post().to(auth::change_password))
                    .route(
                        "/password/reset-request",
                        web::post().to(auth::request_password_reset),
                    )
                    .route("/password/reset", web::post().to(auth::reset_password))
                    .route("/impersonate/{id}", web::post().to(auth::impersonate)),
            )
            // Catalog routes
            .service(
                web::scope("/catalog")
                    .route("/books", web::get().to(catalog::search))
                    .route("/books/list", web::get().to(catalog::list))
                    .route("/books/{id}", web::get().to(catalog::get)),
            )
            // Order routes
            .service(
                web::scope("/orders")
                    .route("", web::post().to(orders::place))
                    .route("", web::get().to(orders::mine))
                    .route("/{id}/cancel", web::post().to(orders::cancel)),
            )
            // User routes
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list))
                    .route("/{id}", web::get().to(users::get)),
            ),
    );
}

/// Public view of an account. Never carries the hash or reset key.
fn user_response(account: Account) -> UserResponse {
    UserResponse {
        id: account.id.to_string(),
        email: account.email,
        is_active: account.is_active,
        created_at: account.created_at.to_rfc3339(),
    }
}

fn auth_response(bundle: Bundle) -> AuthResponse {
    AuthResponse {
        access_token: bundle.access_token,
        refresh_token: bundle.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: bundle.expires_in,
    }
}
