//! Tests for construction and serialisation of domain errors.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("login required"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("Unauthorized action"), ErrorCode::Forbidden)]
#[case(Error::not_found("Idea not found"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("pool down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_the_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InvalidRequest, message);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn no_trace_id_is_captured_outside_a_request() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn trace_id_in_scope_is_captured(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_as_failure_envelope() {
    let error = Error::invalid_request("Please provide all fields")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "name" }));

    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "success": false,
            "code": "invalid_request",
            "message": "Please provide all fields",
            "traceId": TRACE_ID,
            "details": { "field": "name" },
        })
    );
}

#[rstest]
fn optional_fields_are_omitted_when_absent() {
    let value = serde_json::to_value(Error::forbidden("Unauthorized action")).expect("serialise");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
#[tokio::test]
async fn decoding_ignores_the_ambient_trace_id(trace_id: TraceId) {
    let payload = json!({ "success": false, "code": "not_found", "message": "gone" });
    let decoded = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("decode error payload")
    })
    .await;

    assert_eq!(decoded.code(), ErrorCode::NotFound);
    assert!(decoded.trace_id().is_none());
}

#[rstest]
fn decoding_rejects_blank_messages() {
    let payload = json!({ "code": "internal_error", "message": "" });
    assert!(serde_json::from_value::<Error>(payload).is_err());
}
