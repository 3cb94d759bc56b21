use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;

use crate::routes::error;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    add_with_response(router, || {
        error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })
}

/// Catch panics of the wrapped routes and answer with `response` instead.
pub fn add_with_response<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    response: fn() -> Response,
) -> Router<S> {
    router.layer(from_fn(move |request: Request, next: Next| {
        middleware(request, next, response)
    }))
}

async fn middleware(request: Request, next: Next, response: fn() -> Response) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!("internal server error: request handler panicked");
            response()
        }
    }
}
