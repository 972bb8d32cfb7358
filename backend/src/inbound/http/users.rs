//! User profile handler.
//!
//! ```text
//! GET /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::domain::{UserProfile, resolve_user_id};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{ErrorSchema, UserProfileEnvelopeSchema};
use crate::inbound::http::state::HttpState;

#[derive(Serialize)]
struct UserData<'a> {
    user: &'a UserProfile,
}

/// Fetch a user with their authored ideas expanded.
///
/// Ideas follow the order of the user's back-reference list; ideas the list
/// does not mention are appended.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User profile", body = UserProfileEnvelopeSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserProfile",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = resolve_user_id(Some(path.as_str()))?;
    let profile = state.feed.user_profile(&user_id).await?;
    Ok(envelope::ok("User fetched", UserData { user: &profile }))
}
