//! Success envelope shared by every handler.
//!
//! Successful responses are `{ "success": true, "message": ..., ...data }`
//! where `data` is flattened into the top-level object.

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    message: &'a str,
    #[serde(flatten)]
    data: T,
}

#[derive(Serialize)]
struct NoData {}

/// `200 OK` with `data` merged into the envelope. `data` must serialise to a
/// JSON object.
pub(crate) fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        success: true,
        message,
        data,
    })
}

/// `200 OK` carrying only a message.
pub(crate) fn ok_message(message: &str) -> HttpResponse {
    ok(message, NoData {})
}
