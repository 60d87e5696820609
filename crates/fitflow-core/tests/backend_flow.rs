//! Integration tests for the backend client and the habit toggle flow,
//! with the hosted backend mocked at the HTTP layer.

use chrono::NaiveDate;
use mockito::Matcher;

use fitflow_core::habits::HabitTracker;
use fitflow_core::{AuthState, BackendClient, BackendError, CoreError};

fn day() -> NaiveDate {
    "2026-08-07".parse().unwrap()
}

fn logged_in() -> AuthState {
    AuthState::LoggedIn {
        user_id: "u1".into(),
    }
}

#[tokio::test]
async fn ensure_profile_creates_on_first_sight() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();

    let missing = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "id".into(),
            "eq.u1".into(),
        )]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let created = server
        .mock("POST", "/rest/v1/profiles")
        .match_header("prefer", "return=representation")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"u1","email":"a@b.c","xp":0,"level":1}]"#)
        .expect(1)
        .create_async()
        .await;

    let profile = client.ensure_profile("u1", Some("a@b.c")).await.unwrap();
    assert_eq!(profile.id, "u1");
    assert_eq!(profile.xp, 0);
    missing.assert_async().await;
    created.assert_async().await;
}

#[tokio::test]
async fn toggle_create_awards_xp_and_levels_up() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();
    let auth = logged_in();

    let no_logs = server
        .mock("GET", "/rest/v1/habit_logs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "eq.u1".into()),
            Matcher::UrlEncoded("date_logged".into(), "eq.2026-08-07".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let log_created = server
        .mock("POST", "/rest/v1/habit_logs")
        .match_body(Matcher::PartialJson(serde_json::json!([{
            "habit_id": "h1",
            "user_id": "u1",
            "date_logged": "2026-08-07",
        }])))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"l1","habit_id":"h1","user_id":"u1","date_logged":"2026-08-07"}]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let profile = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "id".into(),
            "eq.u1".into(),
        )]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"u1","xp":95,"level":1,"current_streak":2,"last_activity_date":"2026-08-06"}]"#)
        .expect(1)
        .create_async()
        .await;

    let patched = server
        .mock("PATCH", "/rest/v1/profiles")
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "id".into(),
            "eq.u1".into(),
        )]))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "xp": 105,
            "level": 2,
            "current_streak": 3,
            "last_activity_date": "2026-08-07",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":"u1","xp":105,"level":2,"current_streak":3,"last_activity_date":"2026-08-07"}]"#)
        .expect(1)
        .create_async()
        .await;

    let tracker = HabitTracker::new(&client, &auth);
    let outcome = tracker.toggle("h1", day()).await.unwrap().unwrap();

    assert!(outcome.completed);
    let granted = outcome.granted.expect("completion grants XP");
    assert_eq!(granted.amount, 10);
    assert_eq!(granted.award.new_xp, 105);
    assert_eq!(granted.award.new_level, 2);
    assert!(granted.award.leveled_up);
    assert_eq!(granted.profile.current_streak, 3);

    no_logs.assert_async().await;
    log_created.assert_async().await;
    profile.assert_async().await;
    patched.assert_async().await;
}

#[tokio::test]
async fn toggle_delete_removes_log_without_touching_xp() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();
    let auth = logged_in();

    let existing_log = server
        .mock("GET", "/rest/v1/habit_logs")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "eq.u1".into()),
            Matcher::UrlEncoded("date_logged".into(), "eq.2026-08-07".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"id":"l1","habit_id":"h1","user_id":"u1","date_logged":"2026-08-07"}]"#,
        )
        .expect(1)
        .create_async()
        .await;

    let deleted = server
        .mock("DELETE", "/rest/v1/habit_logs")
        .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
            "id".into(),
            "eq.l1".into(),
        )]))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    // No profile mocks: the XP path must never be reached on un-complete.
    let tracker = HabitTracker::new(&client, &auth);
    let outcome = tracker.toggle("h1", day()).await.unwrap().unwrap();

    assert!(!outcome.completed);
    assert!(outcome.granted.is_none());
    existing_log.assert_async().await;
    deleted.assert_async().await;
}

#[tokio::test]
async fn logged_out_toggle_is_a_noop_without_any_request() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();

    let never_called = server
        .mock("GET", "/rest/v1/habit_logs")
        .expect(0)
        .create_async()
        .await;

    let tracker = HabitTracker::new(&client, &AuthState::LoggedOut);
    let outcome = tracker.toggle("h1", day()).await.unwrap();
    assert!(outcome.is_none());
    never_called.assert_async().await;
}

#[tokio::test]
async fn backend_failure_surfaces_as_api_error() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();

    let _m = server
        .mock("GET", "/rest/v1/habits")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("storage exploded")
        .create_async()
        .await;

    let err = client.list_habits("u1").await.unwrap_err();
    match err {
        BackendError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("storage exploded"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn toggle_propagates_backend_failure_unchanged() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();
    let auth = logged_in();

    let _m = server
        .mock("GET", "/rest/v1/habit_logs")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("down")
        .create_async()
        .await;

    let err = HabitTracker::new(&client, &auth)
        .toggle("h1", day())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Backend(BackendError::Api { status: 503, .. })));
}

#[tokio::test]
async fn sign_in_returns_a_usable_session() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();

    let token = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded(
            "grant_type".into(),
            "password".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"access_token":"jwt-abc","user":{"id":"u1","email":"a@b.c"}}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let session = client.sign_in("a@b.c", "hunter2").await.unwrap();
    assert_eq!(session.user_id, "u1");
    assert_eq!(session.email, "a@b.c");
    assert_eq!(session.access_token, "jwt-abc");
    token.assert_async().await;
}

#[tokio::test]
async fn sign_in_with_bad_credentials_fails() {
    let mut server = mockito::Server::new_async().await;
    let client = BackendClient::new(&server.url(), "anon-key").unwrap();

    let _m = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let err = client.sign_in("a@b.c", "wrong").await.unwrap_err();
    assert!(matches!(err, BackendError::Api { status: 400, .. }));
}
