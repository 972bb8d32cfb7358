//! Idea HTTP handlers.
//!
//! ```text
//! POST   /api/v1/ideas                (multipart)
//! GET    /api/v1/ideas?sortBy=newest
//! GET    /api/v1/ideas/mine
//! GET    /api/v1/ideas/search?query=rocket&sortBy=oldest
//! GET    /api/v1/ideas/{id}
//! DELETE /api/v1/ideas/{id}
//! PUT    /api/v1/ideas/{id}/like
//! ```
//!
//! `/ideas/mine` and `/ideas/search` must be registered before
//! `/ideas/{id}`; see [`configure`].

use actix_multipart::form::{
    MultipartForm, MultipartFormConfig, bytes::Bytes as FilePart, text::Text,
};
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::ports::{
    CoverImageUpload, CreateIdeaRequest, DeleteIdeaRequest, SearchIdeasRequest,
};
use crate::domain::{Error, Idea, IdeaWithOwner, SortBy, UserId, resolve_idea_id};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope;
use crate::inbound::http::schemas::{
    CreateIdeaFormSchema, ErrorSchema, IdeaEnvelopeSchema, IdeaListEnvelopeSchema,
    LikeEnvelopeSchema, MessageEnvelopeSchema, SearchEnvelopeSchema,
};
use crate::inbound::http::session::Principal;
use crate::inbound::http::state::HttpState;

/// Fallback file name when the client omits one.
const DEFAULT_COVER_FILENAME: &str = "cover";

/// Multipart body of `POST /api/v1/ideas`.
///
/// Every part is optional at the extractor level so missing parts surface as
/// domain validation errors rather than extractor rejections.
#[derive(Debug, MultipartForm)]
pub struct CreateIdeaForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub pitch: Option<Text<String>>,
    pub category: Option<Text<String>>,
    #[multipart(rename = "coverImage")]
    pub cover_image: Option<FilePart>,
}

impl CreateIdeaForm {
    fn into_request(self, owner: UserId) -> CreateIdeaRequest {
        let text = |part: Option<Text<String>>| part.map(Text::into_inner).unwrap_or_default();
        CreateIdeaRequest {
            owner,
            name: text(self.name),
            description: text(self.description),
            pitch: text(self.pitch),
            category: text(self.category),
            cover_image: self.cover_image.map(|file| CoverImageUpload {
                bytes: file.data.to_vec(),
                filename: file
                    .file_name
                    .filter(|name| !name.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_COVER_FILENAME.to_owned()),
                content_type: file.content_type.map(|mime| mime.to_string()),
            }),
        }
    }
}

/// Multipart limits for idea creation, with failures rendered as the
/// standard failure envelope.
pub fn multipart_config(max_upload_bytes: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(max_upload_bytes)
        .error_handler(|err, _req: &HttpRequest| {
            debug!(error = %err, "multipart form rejected");
            Error::invalid_request(format!("Invalid idea form: {err}")).into()
        })
}

/// `sortBy` query parameter shared by listing and search.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListIdeasQuery {
    /// `newest`, `oldest` or `popular`; anything else ranks by popularity.
    pub sort_by: Option<String>,
}

/// Query parameters for `GET /api/v1/ideas/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchIdeasQuery {
    /// Case-insensitive substring matched against name, description, pitch
    /// and category.
    pub query: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Serialize)]
struct IdeaData<'a, T: Serialize> {
    idea: &'a T,
}

#[derive(Serialize)]
struct IdeaListData<'a> {
    ideas: &'a [IdeaWithOwner],
}

#[derive(Serialize)]
struct SearchData<'a> {
    results: &'a [IdeaWithOwner],
}

/// Pitch a new idea.
#[utoipa::path(
    post,
    path = "/api/v1/ideas",
    request_body(content = CreateIdeaFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Idea created", body = IdeaEnvelopeSchema),
        (status = 400, description = "Missing field or cover image", body = ErrorSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 500, description = "Upload or persistence failure", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "createIdea"
)]
#[post("/ideas")]
pub async fn create_idea(
    principal: Principal,
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<CreateIdeaForm>,
) -> ApiResult<HttpResponse> {
    let request = form.into_request(principal.0);
    let idea: Idea = state.ideas.create_idea(request).await?;
    Ok(envelope::ok(
        "Startup Idea Added Successfully",
        IdeaData { idea: &idea },
    ))
}

/// List every idea.
#[utoipa::path(
    get,
    path = "/api/v1/ideas",
    params(ListIdeasQuery),
    responses(
        (status = 200, description = "Ideas", body = IdeaListEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "listIdeas",
    security([])
)]
#[get("/ideas")]
pub async fn list_ideas(
    state: web::Data<HttpState>,
    query: web::Query<ListIdeasQuery>,
) -> ApiResult<HttpResponse> {
    let sort_by = SortBy::parse(query.sort_by.as_deref());
    let ideas = state.feed.list_ideas(sort_by).await?;
    Ok(envelope::ok(
        "All startup Ideas fetched successfully",
        IdeaListData { ideas: &ideas },
    ))
}

/// List the caller's own ideas.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/mine",
    responses(
        (status = 200, description = "Ideas owned by the caller", body = IdeaListEnvelopeSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "listMyIdeas"
)]
#[get("/ideas/mine")]
pub async fn my_ideas(
    principal: Principal,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let ideas = state.feed.user_ideas(principal.user_id()).await?;
    Ok(envelope::ok(
        "User ideas fetched successfully",
        IdeaListData { ideas: &ideas },
    ))
}

/// Search ideas.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/search",
    params(SearchIdeasQuery),
    responses(
        (status = 200, description = "Matching ideas", body = SearchEnvelopeSchema),
        (status = 400, description = "Missing query", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "searchIdeas",
    security([])
)]
#[get("/ideas/search")]
pub async fn search_ideas(
    state: web::Data<HttpState>,
    query: web::Query<SearchIdeasQuery>,
) -> ApiResult<HttpResponse> {
    let SearchIdeasQuery { query, sort_by } = query.into_inner();
    let results = state
        .feed
        .search_ideas(SearchIdeasRequest {
            query,
            sort_by: SortBy::parse(sort_by.as_deref()),
        })
        .await?;
    Ok(envelope::ok(
        "Search results fetched successfully",
        SearchData { results: &results },
    ))
}

/// Fetch one idea with its owner.
#[utoipa::path(
    get,
    path = "/api/v1/ideas/{id}",
    params(("id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Idea", body = IdeaEnvelopeSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Idea not found", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "getIdea",
    security([])
)]
#[get("/ideas/{id}")]
pub async fn get_idea(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let idea_id = resolve_idea_id(Some(path.as_str()))?;
    let idea = state.feed.get_idea(&idea_id).await?;
    Ok(envelope::ok("Idea fetched", IdeaData { idea: &idea }))
}

/// Delete one of the caller's ideas.
#[utoipa::path(
    delete,
    path = "/api/v1/ideas/{id}",
    params(("id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Idea deleted", body = MessageEnvelopeSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 403, description = "Caller does not own the idea", body = ErrorSchema),
        (status = 404, description = "Idea not found", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "deleteIdea"
)]
#[delete("/ideas/{id}")]
pub async fn delete_idea(
    principal: Principal,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let idea_id = resolve_idea_id(Some(path.as_str()))?;
    state
        .ideas
        .delete_idea(DeleteIdeaRequest {
            principal: principal.0,
            idea_id,
        })
        .await?;
    Ok(envelope::ok_message("Startup Idea deleted successfully"))
}

/// Like or unlike an idea.
#[utoipa::path(
    put,
    path = "/api/v1/ideas/{id}/like",
    params(("id" = String, Path, description = "Idea identifier")),
    responses(
        (status = 200, description = "Like toggled", body = LikeEnvelopeSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 404, description = "Idea not found", body = ErrorSchema)
    ),
    tags = ["ideas"],
    operation_id = "toggleIdeaLike"
)]
#[put("/ideas/{id}/like")]
pub async fn toggle_like(
    principal: Principal,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let idea_id = resolve_idea_id(Some(path.as_str()))?;
    let outcome = state.likes.toggle_like(principal.user_id(), &idea_id).await?;
    let message = if outcome.liked {
        "Idea liked"
    } else {
        "Idea unliked"
    };
    Ok(envelope::ok(message, outcome))
}

/// Register idea routes in matching order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_idea)
        .service(list_ideas)
        .service(my_ideas)
        .service(search_ideas)
        .service(get_idea)
        .service(delete_idea)
        .service(toggle_like);
}

#[cfg(test)]
#[path = "ideas_tests.rs"]
mod tests;
