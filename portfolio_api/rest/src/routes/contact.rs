use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactOutcome, ContactSendMessageError,
};
use portfolio_models::contact::ContactSubmission;
use tracing::debug;

use crate::{
    middlewares::panic_handler,
    models::contact::{
        ApiContactResponse, ApiContactValidationError, INVALID_REQUEST_BODY, MESSAGE_RECEIVED_DEMO,
        MESSAGE_SENT, SEND_FAILED,
    },
};

pub const PATH: &str = "/api/contact";

struct ContactState<Contact> {
    service: Arc<Contact>,
    expose_error_details: bool,
}

pub fn router<Contact: ContactFeatureService>(
    service: Arc<Contact>,
    expose_error_details: bool,
) -> Router<()> {
    let router = Router::new()
        .route(PATH, routing::post(send_message::<Contact>))
        .with_state(Arc::new(ContactState {
            service,
            expose_error_details,
        }));

    panic_handler::add_with_response(router, send_failed)
}

fn send_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiContactResponse::failed(SEND_FAILED, None)),
    )
        .into_response()
}

async fn send_message<Contact: ContactFeatureService>(
    State(state): State<Arc<ContactState<Contact>>>,
    submission: Result<Json<ContactSubmission>, JsonRejection>,
) -> Response {
    let Json(submission) = match submission {
        Ok(submission) => submission,
        Err(rejection) => {
            debug!("Rejected contact request body: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiContactResponse::failed(INVALID_REQUEST_BODY, None)),
            )
                .into_response();
        }
    };

    match state.service.send_message(submission).await {
        Ok(ContactOutcome::Delivered) => Json(ApiContactResponse::ok(MESSAGE_SENT)).into_response(),
        Ok(ContactOutcome::Demo) => {
            Json(ApiContactResponse::ok(MESSAGE_RECEIVED_DEMO)).into_response()
        }
        Err(ContactSendMessageError::Invalid(violations)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiContactValidationError::from(violations)),
        )
            .into_response(),
        Err(err @ (ContactSendMessageError::Dispatch(_) | ContactSendMessageError::Other(_))) => {
            if !state.expose_error_details {
                return send_failed();
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiContactResponse::failed(SEND_FAILED, Some(err.to_string()))),
            )
                .into_response()
        }
    }
}
