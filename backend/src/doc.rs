//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the inbound layer together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa derives. Swagger UI serves it in debug builds.

use crate::inbound::http::schemas::{
    CreateIdeaFormSchema, ErrorCodeSchema, ErrorSchema, IdeaEnvelopeSchema,
    IdeaListEnvelopeSchema, IdeaSchema, LikeEnvelopeSchema, MessageEnvelopeSchema,
    SearchEnvelopeSchema, UserProfileEnvelopeSchema, UserProfileSchema, UserSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Signed session cookie issued by the authentication service.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pitchfeed API",
        description = "Post startup ideas, browse and search the feed, and like ideas.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::ideas::create_idea,
        crate::inbound::http::ideas::list_ideas,
        crate::inbound::http::ideas::my_ideas,
        crate::inbound::http::ideas::search_ideas,
        crate::inbound::http::ideas::get_idea,
        crate::inbound::http::ideas::delete_idea,
        crate::inbound::http::ideas::toggle_like,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        UserProfileSchema,
        IdeaSchema,
        IdeaEnvelopeSchema,
        IdeaListEnvelopeSchema,
        SearchEnvelopeSchema,
        UserProfileEnvelopeSchema,
        LikeEnvelopeSchema,
        MessageEnvelopeSchema,
        CreateIdeaFormSchema,
    )),
    tags(
        (name = "ideas", description = "Creating, browsing and liking ideas"),
        (name = "users", description = "User profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
