//! Tests for idea HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{MockFeedQuery, MockIdeaCommand, MockLikeCommand};
use crate::domain::{CoverImageUrl, IdeaDetails, IdeaDraft, IdeaId, LikeToggle, User};
use crate::inbound::http::test_utils::{login_cookie, test_login, test_session_middleware};

const OWNER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const IDEA_ID: &str = "9b2e3c1a-7d4f-4e8a-b6c5-0a1b2c3d4e5f";
const BOUNDARY: &str = "pitchfeed-test-boundary";

fn owner() -> User {
    User::try_from_strings(OWNER_ID, "Ada Lovelace").expect("valid user")
}

fn sample_idea(owner: &UserId) -> Idea {
    Idea::new(IdeaDraft {
        id: IdeaId::new(IDEA_ID).expect("valid idea id"),
        details: IdeaDetails::new("Rocket Launcher", "Reusable boosters", "Cheap orbit", "Space")
            .expect("valid details"),
        cover_image: CoverImageUrl::new("https://covers.example.com/rocket.png")
            .expect("valid url"),
        owner: *owner,
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    })
}

fn sample_entry() -> IdeaWithOwner {
    let owner = owner();
    IdeaWithOwner::new(sample_idea(owner.id()), owner)
}

fn test_app(
    ideas: MockIdeaCommand,
    feed: MockFeedQuery,
    likes: MockLikeCommand,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(ideas), Arc::new(feed), Arc::new(likes));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(multipart_config(1024 * 1024))
        .wrap(test_session_middleware())
        .service(test_login)
        .service(web::scope("/api/v1").configure(configure))
}

fn multipart_body(fields: &[(&str, &str)], cover: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\
                 Content-Type: text/plain\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = cover {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"coverImage\"; \
                 filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn complete_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Rocket Launcher"),
        ("description", "Reusable boosters"),
        ("pitch", "Cheap orbit"),
        ("category", "Space"),
    ]
}

fn multipart_request(body: Vec<u8>) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/ideas")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn create_idea_requires_a_session() {
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        MockFeedQuery::new(),
        MockLikeCommand::new(),
    ))
    .await;

    let body = multipart_body(&complete_fields(), Some(("rocket.png", b"png")));
    let response = actix_test::call_service(&app, multipart_request(body).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["message"], "Unauthorized - No token provided");
}

#[actix_web::test]
async fn create_idea_forwards_form_to_command() {
    let mut ideas = MockIdeaCommand::new();
    ideas
        .expect_create_idea()
        .withf(|request| {
            request.owner.to_string() == OWNER_ID
                && request.name == "Rocket Launcher"
                && request.category == "Space"
                && request.cover_image.as_ref().is_some_and(|upload| {
                    upload.filename == "rocket.png"
                        && upload.bytes == b"png-bytes"
                        && upload.content_type.as_deref() == Some("image/png")
                })
        })
        .times(1)
        .returning(|request| Ok(sample_idea(&request.owner)));
    let app = actix_test::init_service(test_app(
        ideas,
        MockFeedQuery::new(),
        MockLikeCommand::new(),
    ))
    .await;
    let cookie = login_cookie(&app, OWNER_ID).await;

    let body = multipart_body(&complete_fields(), Some(("rocket.png", b"png-bytes")));
    let response = actix_test::call_service(
        &app,
        multipart_request(body).cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["message"], "Startup Idea Added Successfully");
    assert_eq!(body["idea"]["name"], "Rocket Launcher");
    assert_eq!(body["idea"]["user"], OWNER_ID);
    assert_eq!(body["idea"]["likes"], serde_json::json!([]));
}

#[actix_web::test]
async fn create_idea_passes_missing_parts_as_blank() {
    let mut ideas = MockIdeaCommand::new();
    ideas
        .expect_create_idea()
        .withf(|request| request.pitch.is_empty() && request.cover_image.is_none())
        .times(1)
        .returning(|_| Err(Error::invalid_request("Please provide all fields")));
    let app = actix_test::init_service(test_app(
        ideas,
        MockFeedQuery::new(),
        MockLikeCommand::new(),
    ))
    .await;
    let cookie = login_cookie(&app, OWNER_ID).await;

    let body = multipart_body(
        &[
            ("name", "Rocket Launcher"),
            ("description", "Reusable boosters"),
            ("category", "Space"),
        ],
        None,
    );
    let response = actix_test::call_service(
        &app,
        multipart_request(body).cookie(cookie).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], "Please provide all fields");
}

#[actix_web::test]
async fn create_idea_rejects_non_multipart_body() {
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        MockFeedQuery::new(),
        MockLikeCommand::new(),
    ))
    .await;
    let cookie = login_cookie(&app, OWNER_ID).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/ideas")
        .cookie(cookie)
        .set_json(serde_json::json!({ "name": "Rocket Launcher" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], Value::Bool(false));
}

#[rstest]
#[case(Some("newest"), SortBy::Newest)]
#[case(Some("oldest"), SortBy::Oldest)]
#[case(Some("popular"), SortBy::Popular)]
#[case(Some("trending"), SortBy::Popular)]
#[case(None, SortBy::Popular)]
#[actix_web::test]
async fn list_ideas_parses_sort_order(#[case] raw: Option<&str>, #[case] expected: SortBy) {
    let mut feed = MockFeedQuery::new();
    feed.expect_list_ideas()
        .withf(move |sort_by| *sort_by == expected)
        .times(1)
        .returning(|_| Ok(vec![sample_entry()]));
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;

    let uri = match raw {
        Some(value) => format!("/api/v1/ideas?sortBy={value}"),
        None => "/api/v1/ideas".to_owned(),
    };
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(&uri).to_request())
            .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "All startup Ideas fetched successfully");
    let ideas = body["ideas"].as_array().expect("ideas array");
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0]["user"]["displayName"], "Ada Lovelace");
}

#[actix_web::test]
async fn my_ideas_is_not_captured_by_id_route() {
    let mut feed = MockFeedQuery::new();
    feed.expect_user_ideas()
        .withf(|owner| owner.to_string() == OWNER_ID)
        .times(1)
        .returning(|_| Ok(vec![sample_entry()]));
    feed.expect_get_idea().never();
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;
    let cookie = login_cookie(&app, OWNER_ID).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/ideas/mine")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "User ideas fetched successfully");
    assert_eq!(body["ideas"][0]["id"], IDEA_ID);
}

#[actix_web::test]
async fn my_ideas_requires_a_session() {
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        MockFeedQuery::new(),
        MockLikeCommand::new(),
    ))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/ideas/mine")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn search_ideas_forwards_query_and_sort() {
    let mut feed = MockFeedQuery::new();
    feed.expect_search_ideas()
        .withf(|request| {
            request.query.as_deref() == Some("rocket") && request.sort_by == SortBy::Oldest
        })
        .times(1)
        .returning(|_| Ok(vec![sample_entry()]));
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/ideas/search?query=rocket&sortBy=oldest")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["results"][0]["name"], "Rocket Launcher");
}

#[actix_web::test]
async fn search_without_query_surfaces_bad_request() {
    let mut feed = MockFeedQuery::new();
    feed.expect_search_ideas()
        .withf(|request| request.query.is_none())
        .times(1)
        .returning(|_| Err(Error::invalid_request("Search query is required")));
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/ideas/search")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Search query is required");
}

#[actix_web::test]
async fn get_idea_returns_expanded_owner() {
    let mut feed = MockFeedQuery::new();
    feed.expect_get_idea()
        .withf(|idea_id| idea_id.to_string() == IDEA_ID)
        .times(1)
        .returning(|_| Ok(sample_entry()));
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/ideas/{IDEA_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Idea fetched");
    assert_eq!(body["idea"]["user"]["id"], OWNER_ID);
}

#[actix_web::test]
async fn get_idea_rejects_malformed_id_without_lookup() {
    let mut feed = MockFeedQuery::new();
    feed.expect_get_idea().never();
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/ideas/not-a-uuid")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Invalid idea ID format");
}

#[actix_web::test]
async fn get_idea_maps_not_found() {
    let mut feed = MockFeedQuery::new();
    feed.expect_get_idea()
        .times(1)
        .returning(|_| Err(Error::not_found("Idea not found")));
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        feed,
        MockLikeCommand::new(),
    ))
    .await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/ideas/{IDEA_ID}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(Ok(()), StatusCode::OK)]
#[case(Err(Error::forbidden("Unauthorized action")), StatusCode::FORBIDDEN)]
#[case(Err(Error::not_found("Startup Idea not found")), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn delete_idea_maps_command_outcome(
    #[case] outcome: Result<(), Error>,
    #[case] expected: StatusCode,
) {
    let mut ideas = MockIdeaCommand::new();
    ideas
        .expect_delete_idea()
        .withf(|request| {
            request.principal.to_string() == OWNER_ID && request.idea_id.to_string() == IDEA_ID
        })
        .times(1)
        .return_once(move |_| outcome);
    let app = actix_test::init_service(test_app(
        ideas,
        MockFeedQuery::new(),
        MockLikeCommand::new(),
    ))
    .await;
    let cookie = login_cookie(&app, OWNER_ID).await;

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/v1/ideas/{IDEA_ID}"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
    if expected == StatusCode::OK {
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Startup Idea deleted successfully");
    }
}

#[rstest]
#[case(true, 3, "Idea liked")]
#[case(false, 2, "Idea unliked")]
#[actix_web::test]
async fn toggle_like_reports_new_state(
    #[case] liked: bool,
    #[case] total_likes: usize,
    #[case] message: &str,
) {
    let mut likes = MockLikeCommand::new();
    likes
        .expect_toggle_like()
        .withf(|principal, idea_id| {
            principal.to_string() == OWNER_ID && idea_id.to_string() == IDEA_ID
        })
        .times(1)
        .returning(move |_, _| Ok(LikeToggle { liked, total_likes }));
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        MockFeedQuery::new(),
        likes,
    ))
    .await;
    let cookie = login_cookie(&app, OWNER_ID).await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/ideas/{IDEA_ID}/like"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], message);
    assert_eq!(body["liked"], Value::Bool(liked));
    assert_eq!(body["totalLikes"], Value::from(total_likes));
}

#[actix_web::test]
async fn toggle_like_requires_a_session() {
    let mut likes = MockLikeCommand::new();
    likes.expect_toggle_like().never();
    let app = actix_test::init_service(test_app(
        MockIdeaCommand::new(),
        MockFeedQuery::new(),
        likes,
    ))
    .await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/ideas/{IDEA_ID}/like"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
