//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; anything running inside the handler
//! future (extractors, error rendering) can read the id back. Outside a
//! request the id is `"unknown"`.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
