use chrono::{TimeZone, Utc};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::TestBackend;

use ideaboard_client::workflows::ideas::MyIdeasView;
use ideaboard_client::ApiError;
use ideaboard_protocol::model::idea::{Draft, Filter, IdeaUpdate};
use ideaboard_protocol::test_utils::make_test_idea;

async fn mount_user_ideas(backend: &TestBackend, user_id: &str, ideas: ::serde_json::Value) {
    backend
        .mount_json(&format!("/ideas/userideas/{}/", user_id), ideas)
        .await;
}

#[tokio::test]
async fn test_owner_create_and_update_roundtrip() {
    let backend = TestBackend::new().await;
    backend.sign_in_as("u1", "ana").await;

    let existing = make_test_idea("idea1", "u1");
    mount_user_ideas(
        &backend,
        "u1",
        ::serde_json::json!([::serde_json::to_value(&existing).unwrap()]),
    )
    .await;

    let mut created = make_test_idea("idea2", "u1");
    created.title = "Nova ideja".to_string();
    Mock::given(method("POST"))
        .and(path("/ideas/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut renamed = existing.clone();
    renamed.title = "Preimenovana".to_string();
    Mock::given(method("PATCH"))
        .and(path("/ideas/idea1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&renamed))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let mut view = MyIdeasView::load(&client).await.expect("load");
    assert_eq!(view.ideas().len(), 1);
    let first = view.ideas()[0].clone();
    assert!(view.is_owner(&first));

    let draft = Draft {
        title: "Nova ideja".to_string(),
        description: "d".to_string(),
        market: "m".to_string(),
        target_audience: "t".to_string(),
    };
    let idea = view.create(&client, &draft).await.expect("create");
    assert_eq!(idea.id, "idea2");
    assert_eq!(view.ideas().len(), 2);

    let update = IdeaUpdate {
        title: Some("Preimenovana".to_string()),
        ..Default::default()
    };
    let updated = view.update(&client, "idea1", &update).await.expect("update");
    assert!(updated);
    assert_eq!(view.ideas()[0].title, "Preimenovana");
}

#[tokio::test]
async fn test_delete_requires_explicit_confirmation() {
    let backend = TestBackend::new().await;
    backend.sign_in_as("u1", "ana").await;

    let existing = make_test_idea("idea1", "u1");
    mount_user_ideas(
        &backend,
        "u1",
        ::serde_json::json!([::serde_json::to_value(&existing).unwrap()]),
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/ideas/idea1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let mut view = MyIdeasView::load(&client).await.expect("load");

    // Confirming with nothing pending is a no-op.
    assert!(!view.confirm_delete(&client).await.expect("noop confirm"));

    assert!(view.request_delete("idea1"));
    assert_eq!(view.pending_delete(), Some("idea1"));

    let deleted = view.confirm_delete(&client).await.expect("confirm");
    assert!(deleted);
    assert!(view.ideas().is_empty());
    assert_eq!(view.pending_delete(), None);
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let backend = TestBackend::new().await;
    backend.sign_in_as("u1", "ana").await;

    let existing = make_test_idea("idea1", "u1");
    mount_user_ideas(
        &backend,
        "u1",
        ::serde_json::json!([::serde_json::to_value(&existing).unwrap()]),
    )
    .await;

    Mock::given(method("DELETE"))
        .and(path("/ideas/idea1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let mut view = MyIdeasView::load(&client).await.expect("load");

    assert!(view.request_delete("idea1"));
    view.cancel_delete();
    assert!(!view.confirm_delete(&client).await.expect("confirm"));
    assert_eq!(view.ideas().len(), 1);
}

#[tokio::test]
async fn test_edit_is_blocked_while_delete_confirmation_is_pending() {
    let backend = TestBackend::new().await;
    backend.sign_in_as("u1", "ana").await;

    let existing = make_test_idea("idea1", "u1");
    mount_user_ideas(
        &backend,
        "u1",
        ::serde_json::json!([::serde_json::to_value(&existing).unwrap()]),
    )
    .await;

    Mock::given(method("PATCH"))
        .and(path("/ideas/idea1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let mut view = MyIdeasView::load(&client).await.expect("load");

    view.request_delete("idea1");
    assert!(view.is_busy("idea1"));

    let update = IdeaUpdate {
        title: Some("x".to_string()),
        ..Default::default()
    };
    let updated = view.update(&client, "idea1", &update).await.expect("update");
    assert!(!updated, "busy idea must reject a concurrent edit");
}

#[tokio::test]
async fn test_anonymous_create_is_rejected_locally() {
    let backend = TestBackend::new().await;
    backend.anonymous().await;

    Mock::given(method("POST"))
        .and(path("/ideas/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let mut view = MyIdeasView::load(&client).await.expect("load");
    assert!(view.ideas().is_empty());

    let draft = Draft::default();
    let error = view.create(&client, &draft).await.unwrap_err();
    assert!(matches!(error, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn test_user_with_no_ideas_gets_an_empty_list() {
    let backend = TestBackend::new().await;
    backend.sign_in_as("u1", "ana").await;
    backend
        .mount_empty_collection("/ideas/userideas/u1/", "nema ideja tog korisnika")
        .await;

    let client = backend.client();
    let view = MyIdeasView::load(&client).await.expect("load");
    assert!(view.ideas().is_empty());
}

#[tokio::test]
async fn test_filter_ideas_sends_only_set_query_params() {
    let backend = TestBackend::new().await;

    Mock::given(method("GET"))
        .and(path("/ideas/filter-ideje/"))
        .and(query_param("min_created_at", "2024-05-01T00:00:00+00:00"))
        .and(query_param("min_likes", "3"))
        .and(query_param("min_score", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(::serde_json::json!([])))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.client();
    let filter = Filter {
        min_created_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
        min_likes: Some(3),
        min_score: Some(4.0),
        ..Default::default()
    };
    let ideas = client.filter_ideas(&filter).await.expect("filter");
    assert!(ideas.is_empty());
}
