//! Unit tests for backend response interpretation

use reqwest::StatusCode;

use paneer::amusement::resolver::parse_lookup_body;
use paneer::transaction::client::parse_response;
use paneer::{GameClientError, NetworkError};

use crate::mocks::lookup_listing_body;

#[test]
fn lookup_listing_resolves_fixture_record() {
    let amusement =
        parse_lookup_body("enter paneer", StatusCode::OK, &lookup_listing_body()).unwrap();

    assert_eq!(amusement.id, 11);
    assert_eq!(amusement.name, "Enter Paneer");
    assert_eq!(amusement.group_id, 8);
}

#[test]
fn lookup_empty_body_is_not_found() {
    let err = parse_lookup_body("Enter Paneer", StatusCode::OK, "").unwrap_err();
    assert!(matches!(err, GameClientError::AmusementNotFound(_)));
}

#[test]
fn lookup_error_prefers_message_over_status() {
    let err = parse_lookup_body(
        "Enter Paneer",
        StatusCode::NOT_FOUND,
        r#"{"error":"Amusement not found"}"#,
    )
    .unwrap_err();

    match err {
        GameClientError::Network {
            source: NetworkError::BackendError { message, .. },
            ..
        } => assert_eq!(message, "Amusement not found"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn transaction_errors_array_yields_first_entry() {
    let result = parse_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"errors":["stake too low","second problem"]}"#,
    );

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("stake too low"));
}

#[test]
fn transaction_errors_string_is_used_verbatim() {
    let result = parse_response(StatusCode::BAD_REQUEST, r#"{"errors":"missing amusement_id"}"#);
    assert_eq!(result.error.as_deref(), Some("missing amusement_id"));
}

#[test]
fn transaction_empty_success_body_still_succeeds() {
    let result = parse_response(StatusCode::OK, "");

    assert!(result.success);
    assert!(result.transaction_id.is_none());
}

#[test]
fn transaction_402_with_unreadable_body_flags_balance() {
    let result = parse_response(StatusCode::PAYMENT_REQUIRED, "Payment Required");

    assert!(!result.success);
    assert!(!result.has_sufficient_balance);
}
