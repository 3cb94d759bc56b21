use std::{future::poll_fn, task::Poll};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use portfolio_core_contact_contracts::{
    ContactDispatchError, ContactOutcome, ContactSendMessageError, MockContactFeatureService,
};
use portfolio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use portfolio_demo::contact::{INVALID_SUBMISSION, SUBMISSION};
use portfolio_models::contact::ContactSubmission;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{RestServer, RestServerConfig};

fn router(
    health: MockHealthFeatureService,
    contact: MockContactFeatureService,
    expose_error_details: bool,
) -> Router {
    RestServer::new(
        health,
        contact,
        RestServerConfig {
            addr: ([127, 0, 0, 1], 0).into(),
            allowed_origins: vec![],
            expose_error_details,
        },
    )
    .router()
}

fn contact_router(contact: MockContactFeatureService, expose_error_details: bool) -> Router {
    router(MockHealthFeatureService::new(), contact, expose_error_details)
}

fn post_contact(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn submission_json(submission: &ContactSubmission) -> String {
    json!({
        "name": submission.name,
        "email": submission.email,
        "subject": submission.subject,
        "message": submission.message,
    })
    .to_string()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn contact_delivered() {
    // Arrange
    let contact = MockContactFeatureService::new()
        .with_send_message(SUBMISSION.clone(), Ok(ContactOutcome::Delivered));
    let sut = contact_router(contact, false);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Message sent successfully! I'll get back to you soon.",
        })
    );
}

#[tokio::test]
async fn contact_demo() {
    // Arrange
    let contact = MockContactFeatureService::new()
        .with_send_message(SUBMISSION.clone(), Ok(ContactOutcome::Demo));
    let sut = contact_router(contact, false);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Message received! (Demo mode - email service not configured)",
        })
    );
}

#[tokio::test]
async fn contact_invalid() {
    // Arrange
    let violations = INVALID_SUBMISSION.clone().validate().unwrap_err();
    let contact = MockContactFeatureService::new().with_send_message(
        INVALID_SUBMISSION.clone(),
        Err(ContactSendMessageError::Invalid(violations)),
    );
    let sut = contact_router(contact, false);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&INVALID_SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "errors": [
                {"field": "name", "message": "Name must be at least 2 characters"},
                {"field": "email", "message": "Invalid email address"},
                {"field": "subject", "message": "Subject must be at least 3 characters"},
                {"field": "message", "message": "Message must be at least 10 characters"},
            ],
        })
    );
}

#[tokio::test]
async fn contact_missing_fields_are_empty() {
    // Arrange
    let violations = ContactSubmission::default().validate().unwrap_err();
    let contact = MockContactFeatureService::new().with_send_message(
        ContactSubmission::default(),
        Err(ContactSendMessageError::Invalid(violations)),
    );
    let sut = contact_router(contact, false);

    // Act
    let (status, body) = send(sut, post_contact("{}")).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn contact_malformed_body() {
    // Arrange
    let sut = contact_router(MockContactFeatureService::new(), false);

    // Act
    let (status, body) = send(sut, post_contact("{\"name\": ")).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid request body"})
    );
}

#[tokio::test]
async fn contact_dispatch_failed() {
    // Arrange
    let contact = MockContactFeatureService::new().with_send_message(
        SUBMISSION.clone(),
        Err(ContactDispatchError::Owner("connection refused".into()).into()),
    );
    let sut = contact_router(contact, false);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Failed to send message. Please try again later.",
        })
    );
}

#[tokio::test]
async fn contact_dispatch_failed_with_details() {
    // Arrange
    let contact = MockContactFeatureService::new().with_send_message(
        SUBMISSION.clone(),
        Err(ContactDispatchError::Both {
            owner: "connection refused".into(),
            sender: "mailbox unavailable".into(),
        }
        .into()),
    );
    let sut = contact_router(contact, true);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["message"],
        json!("Failed to send message. Please try again later.")
    );
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("connection refused"));
    assert!(error.contains("mailbox unavailable"));
}

#[tokio::test]
async fn contact_other_error_with_details() {
    // Arrange
    let contact = MockContactFeatureService::new().with_send_message(
        SUBMISSION.clone(),
        Err(anyhow::anyhow!("template not found").into()),
    );
    let sut = contact_router(contact, true);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("template not found"));
}

#[tokio::test]
async fn contact_panic_uses_contact_response() {
    // Arrange
    let mut contact = MockContactFeatureService::new();
    contact.expect_send_message().once().return_once(|_| {
        Box::pin(poll_fn(
            |_| -> Poll<Result<ContactOutcome, ContactSendMessageError>> {
                panic!("contact handler failed")
            },
        ))
    });
    let sut = contact_router(contact, false);

    // Act
    let (status, body) = send(sut, post_contact(submission_json(&SUBMISSION))).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Failed to send message. Please try again later.",
        })
    );
}

#[tokio::test]
async fn contact_response_has_request_id() {
    // Arrange
    let contact = MockContactFeatureService::new()
        .with_send_message(SUBMISSION.clone(), Ok(ContactOutcome::Delivered));
    let sut = contact_router(contact, false);

    // Act
    let response = sut
        .oneshot(post_contact(submission_json(&SUBMISSION)))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_ok() {
    // Arrange
    let health =
        MockHealthFeatureService::new().with_get_status(HealthStatus { email: Some(true) });
    let sut = router(health, MockContactFeatureService::new(), false);

    // Act
    let (status, body) = send(sut, Request::get("/health").body(Body::empty()).unwrap()).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"http": true, "email": true}));
}

#[tokio::test]
async fn health_email_disabled() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus { email: None });
    let sut = router(health, MockContactFeatureService::new(), false);

    // Act
    let (status, body) = send(sut, Request::get("/health").body(Body::empty()).unwrap()).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"http": true, "email": null}));
}

#[tokio::test]
async fn health_smtp_unreachable() {
    // Arrange
    let health =
        MockHealthFeatureService::new().with_get_status(HealthStatus { email: Some(false) });
    let sut = router(health, MockContactFeatureService::new(), false);

    // Act
    let (status, body) = send(sut, Request::get("/health").body(Body::empty()).unwrap()).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"http": true, "email": false}));
}
