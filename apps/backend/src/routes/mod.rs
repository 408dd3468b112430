use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod cards;
pub mod game;
pub mod health;

/// Configure application routes.
///
/// `main.rs` and the test app builder both register these; middleware is
/// wrapped around the whole app by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed query strings render as Problem Details like malformed bodies.
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Game routes: /api/game/**
    cfg.service(web::scope("/api/game").configure(game::configure_routes));

    // Card lookup routes: /api/cards/**
    cfg.service(web::scope("/api/cards").configure(cards::configure_routes));
}

/// Fallback for unmatched paths, registered with `App::default_service`.
pub async fn not_found(req: HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        format!("No route for {} {}", req.method(), req.path()),
    ))
}
