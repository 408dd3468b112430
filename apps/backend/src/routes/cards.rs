//! Card lookup by name.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct NamedQuery {
    name: Option<String>,
}

/// GET /api/cards/named?name=<card name>
async fn named_card(
    app_state: web::Data<AppState>,
    query: web::Query<NamedQuery>,
) -> Result<HttpResponse, AppError> {
    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, "Query parameter 'name' is required"))?;

    debug!(name = %name, "Card lookup");
    let card = app_state.cards.fetch_card_by_name(name).await?;
    Ok(HttpResponse::Ok().json(card.summary()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/named", web::get().to(named_card));
}
