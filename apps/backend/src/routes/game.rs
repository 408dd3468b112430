//! Game HTTP routes: thin adapters from JSON to the round engine.
//!
//! Every route answers with a [`GameResponse`] body. Malformed bodies are
//! rejected by [`ValidatedJson`] with Problem Details before reaching here.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::middleware::OutcomeLabel;
use crate::protocol::{GameResponse, GuessRequest, SessionRequest};
use crate::services::round_engine::GameOutcome;
use crate::state::app_state::AppState;

fn status_for(outcome: &GameOutcome) -> StatusCode {
    match outcome {
        GameOutcome::RoundStarted(_)
        | GameOutcome::Scored(_)
        | GameOutcome::GameOver { .. }
        | GameOutcome::State(_) => StatusCode::OK,
        GameOutcome::NoActiveRound(_) => StatusCode::CONFLICT,
        GameOutcome::SourceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        GameOutcome::InvalidSession => StatusCode::NOT_FOUND,
    }
}

fn respond(outcome: GameOutcome) -> HttpResponse {
    let mut resp = HttpResponse::build(status_for(&outcome)).json(GameResponse::from(&outcome));
    // Picked up by RequestTrace for the completion log.
    resp.extensions_mut().insert(OutcomeLabel(outcome.label()));
    resp
}

/// POST /api/game/start
///
/// Creates a session and opens its first round.
async fn start_game(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(respond(app_state.engine.create_session().await))
}

/// POST /api/game/round
async fn next_round(
    app_state: web::Data<AppState>,
    body: ValidatedJson<SessionRequest>,
) -> Result<HttpResponse, AppError> {
    Ok(respond(app_state.engine.start_round(&body.session_id).await))
}

/// POST /api/game/guess
async fn submit_guess(
    app_state: web::Data<AppState>,
    body: ValidatedJson<GuessRequest>,
) -> Result<HttpResponse, AppError> {
    let GuessRequest { session_id, guess } = body.into_inner();
    Ok(respond(app_state.engine.process_guess(&session_id, guess).await))
}

/// POST /api/game/end
async fn end_game(
    app_state: web::Data<AppState>,
    body: ValidatedJson<SessionRequest>,
) -> Result<HttpResponse, AppError> {
    Ok(respond(app_state.engine.end_game(&body.session_id).await))
}

/// GET /api/game/{session_id}
async fn get_state(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    Ok(respond(app_state.engine.get_state(&path.into_inner()).await))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/start", web::post().to(start_game))
        .route("/round", web::post().to(next_round))
        .route("/guess", web::post().to(submit_guess))
        .route("/end", web::post().to(end_game))
        .route("/{session_id}", web::get().to(get_state));
}
