//! Per-request trace id, span and completion log.
//!
//! Generates a UUID trace id, scopes it into [`crate::trace_ctx`] so error
//! bodies can quote it, and instruments the downstream future with a
//! `request` span carrying trace_id, method and path. The id is echoed as
//! `x-request-id`.
//!
//! When the request finishes one `request_completed` event is logged, levelled
//! by status class. Game routes attach an [`OutcomeLabel`] to their response
//! and it is logged as `game.outcome`, so a 200 that ended a game can be told
//! apart from one that scored.
//!
//! Wrap this outermost:
//!
//! App::new()
//!     .wrap(RequestTrace)
//!     // routes...

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::Error;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::trace_ctx;

/// Response extension naming the game outcome a route produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeLabel(pub &'static str);

/// Severity of the completion event for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionLevel {
    Info,
    Warn,
    Error,
}

impl CompletionLevel {
    pub fn for_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            CompletionLevel::Error
        } else if status.is_client_error() {
            CompletionLevel::Warn
        } else {
            CompletionLevel::Info
        }
    }
}

struct Completion<'a> {
    trace_id: &'a str,
    method: &'a str,
    path: &'a str,
    status: StatusCode,
    outcome: Option<&'static str>,
    started: Instant,
}

impl Completion<'_> {
    fn log(&self) {
        let status_code = self.status.as_u16();
        let duration_us = self.started.elapsed().as_micros() as u64;
        let outcome = self.outcome.unwrap_or("-");
        let (trace_id, method, path) = (self.trace_id, self.method, self.path);

        match CompletionLevel::for_status(self.status) {
            CompletionLevel::Error => error!(%trace_id, http.method = %method, url.path = %path, http.status_code = status_code, game.outcome = outcome, duration_us, "request_completed"),
            CompletionLevel::Warn => warn!(%trace_id, http.method = %method, url.path = %path, http.status_code = status_code, game.outcome = outcome, duration_us, "request_completed"),
            CompletionLevel::Info => info!(%trace_id, http.method = %method, url.path = %path, http.status_code = status_code, game.outcome = outcome, duration_us, "request_completed"),
        }
    }
}

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let trace_id = Uuid::new_v4().to_string();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %method,
            path = %path
        );
        let fut = self.service.call(req);

        Box::pin(
            trace_ctx::with_trace_id(trace_id.clone(), async move {
                let result = fut.await;

                let (status, outcome) = match &result {
                    Ok(res) => (
                        res.status(),
                        res.response()
                            .extensions()
                            .get::<OutcomeLabel>()
                            .map(|label| label.0),
                    ),
                    Err(err) => (err.as_response_error().status_code(), None),
                };
                Completion {
                    trace_id: &trace_id,
                    method: &method,
                    path: &path,
                    status,
                    outcome,
                    started,
                }
                .log();

                let mut res = result?;
                if let Ok(value) = HeaderValue::from_str(&trace_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static("x-request-id"), value);
                }
                Ok::<_, Error>(res)
            })
            .instrument(span),
        )
    }
}
