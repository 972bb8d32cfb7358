//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their serialised shape for documentation only.

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in failure envelopes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No authenticated principal.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Failure envelope shared by every endpoint.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Always `false`.
    #[schema(example = false)]
    success: bool,
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Please provide all fields")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f1c1d9e-4a52-4f7c-9d0e-2b1a3c4d5e6f")]
    trace_id: Option<String>,
    /// Supplementary details for clients.
    details: Option<serde_json::Value>,
}

/// Author of ideas.
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(format = "uuid", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    display_name: String,
    /// Identifiers of authored ideas in the order they were pitched.
    #[schema(value_type = Vec<uuid::Uuid>)]
    ideas: Vec<String>,
}

/// Idea with its owner expanded.
#[derive(ToSchema)]
#[schema(as = Idea)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdeaSchema {
    #[schema(format = "uuid")]
    id: String,
    #[schema(example = "Rocket Launcher")]
    name: String,
    description: String,
    pitch: String,
    #[schema(example = "Space")]
    category: String,
    #[schema(format = "uri")]
    cover_image: String,
    /// Owner; a bare id on create, the expanded user elsewhere.
    user: UserSchema,
    /// Users who liked the idea.
    #[schema(value_type = Vec<uuid::Uuid>)]
    likes: Vec<String>,
    #[schema(format = "date-time")]
    created_at: String,
}

/// User profile with authored ideas expanded.
#[derive(ToSchema)]
#[schema(as = UserProfile)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserProfileSchema {
    #[schema(format = "uuid")]
    id: String,
    display_name: String,
    ideas: Vec<IdeaSchema>,
}

/// `{ success, message, idea }` envelope.
#[derive(ToSchema)]
#[schema(as = IdeaEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdeaEnvelopeSchema {
    success: bool,
    message: String,
    idea: IdeaSchema,
}

/// `{ success, message, ideas }` envelope.
#[derive(ToSchema)]
#[schema(as = IdeaListEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct IdeaListEnvelopeSchema {
    success: bool,
    message: String,
    ideas: Vec<IdeaSchema>,
}

/// `{ success, message, results }` envelope.
#[derive(ToSchema)]
#[schema(as = SearchEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SearchEnvelopeSchema {
    success: bool,
    message: String,
    results: Vec<IdeaSchema>,
}

/// `{ success, message, user }` envelope.
#[derive(ToSchema)]
#[schema(as = UserProfileEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserProfileEnvelopeSchema {
    success: bool,
    message: String,
    user: UserProfileSchema,
}

/// `{ success, message, liked, totalLikes }` envelope.
#[derive(ToSchema)]
#[schema(as = LikeEnvelope)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LikeEnvelopeSchema {
    success: bool,
    #[schema(example = "Idea liked")]
    message: String,
    liked: bool,
    total_likes: u64,
}

/// `{ success, message }` envelope.
#[derive(ToSchema)]
#[schema(as = MessageEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MessageEnvelopeSchema {
    success: bool,
    #[schema(example = "Startup Idea deleted successfully")]
    message: String,
}

/// Multipart form accepted by `POST /api/v1/ideas`.
#[derive(ToSchema)]
#[schema(as = CreateIdeaForm)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CreateIdeaFormSchema {
    name: String,
    description: String,
    pitch: String,
    category: String,
    #[schema(value_type = String, format = Binary)]
    cover_image: Vec<u8>,
}
