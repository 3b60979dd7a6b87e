use arena_client::arena_core::models::{ActionKind, TokenPair};
use arena_client::arena_core::{
    FetchTarget, FilterField, FilterSet, MemoryTokenStore, RegistrationForm, TokenStore,
};
use arena_client::{ArenaClient, ArenaClientError, ClientConfig};
use httpmock::prelude::*;
use serde_json::json;

fn tokens() -> TokenPair {
    TokenPair {
        access: "A".to_string(),
        refresh: "B".to_string(),
    }
}

fn anonymous_client(server: &MockServer) -> ArenaClient {
    ArenaClient::new(ClientConfig::new(server.base_url()), MemoryTokenStore::new())
        .expect("client must build")
}

fn authed_client(server: &MockServer) -> ArenaClient {
    ArenaClient::new(
        ClientConfig::new(server.base_url()),
        MemoryTokenStore::with_tokens(tokens()),
    )
    .expect("client must build")
}

#[tokio::test]
async fn login_stores_both_tokens() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/access/login/")
                .json_body(json!({"username": "ana", "password": "secret"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"access": "A", "refresh": "B"}));
        })
        .await;

    let mut client = anonymous_client(&server);
    assert!(!client.is_authenticated());

    let pair = client.login("ana", "secret").await.expect("login must succeed");
    mock.assert_async().await;

    assert_eq!(pair, tokens());
    assert!(client.is_authenticated());
    let stored = client
        .session()
        .store()
        .load()
        .expect("store readable")
        .expect("tokens stored");
    assert_eq!(stored, tokens());
}

#[tokio::test]
async fn wrong_credentials_leave_session_untouched() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/access/login/");
            then.status(401)
                .header("content-type", "application/json")
                .json_body(json!({"detail": "No active account found"}));
        })
        .await;

    let mut client = anonymous_client(&server);
    let result = client.login("ana", "wrong").await;

    assert!(matches!(result, Err(ArenaClientError::Unauthorized)));
    assert!(!client.is_authenticated());
    assert!(client.session().access_token().is_none());
}

#[tokio::test]
async fn register_with_mismatched_passwords_sends_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/access/register/");
            then.status(201);
        })
        .await;

    let mut client = anonymous_client(&server);
    let form = RegistrationForm {
        username: String::new(),
        email: String::new(),
        password: String::new(),
        confirm_password: "other".to_string(),
    };

    let err = client.register(&form).await.expect_err("must be rejected");
    assert_eq!(err.to_string(), "Las contraseñas no coinciden");
    mock.assert_calls_async(0).await;
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn register_then_obtains_token_pair() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST).path("/access/register/").json_body(json!({
                "username": "ana",
                "email": "ana@example.com",
                "password": "secret"
            }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({"id": 1, "username": "ana"}));
        })
        .await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/token/")
                .json_body(json!({"username": "ana", "password": "secret"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"access": "A", "refresh": "B"}));
        })
        .await;

    let mut client = anonymous_client(&server);
    let form = RegistrationForm {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
    };

    client.register(&form).await.expect("register must succeed");
    register.assert_async().await;
    token.assert_async().await;
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn logout_forgets_tokens_and_blocks_protected_calls() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/access/top-users/");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut client = authed_client(&server);
    client.logout().expect("logout must succeed");

    assert!(!client.is_authenticated());
    let result = client.top_users().await;
    assert!(matches!(result, Err(ArenaClientError::Unauthorized)));
    mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn list_sends_filters_and_bearer_token() {
    let server = MockServer::start_async().await;
    let next_url = server.url("/challenges/challenges/?page=2&language=python");
    let body = json!({
        "results": [
            {"id": 1, "title": "Suma", "language": "python", "likes_count": null},
            {"id": 2, "title": "Resta", "language": "python", "likes_count": 4, "user_liked": true}
        ],
        "next": next_url,
        "previous": null
    });
    let mock = server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/challenges/challenges/")
                .header("authorization", "Bearer A")
                .query_param("language", "python")
                .query_param("favorites", "true");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(body);
        })
        .await;

    let client = authed_client(&server);
    let mut filters = FilterSet::default();
    filters.set(FilterField::Language, "python");
    filters.toggle_favorites();

    let page = client
        .list_challenges(&FetchTarget::Filtered(filters))
        .await
        .expect("list must succeed");
    mock.assert_async().await;

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].likes_count, 0);
    assert!(!page.results[0].user_liked);
    assert_eq!(page.results[1].likes_count, 4);
    assert!(page.cursor.next.is_some());
    assert!(page.cursor.previous.is_none());
}

#[tokio::test]
async fn cursor_url_is_replayed_verbatim() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/challenges/challenges/")
                .query_param("page", "2")
                .query_param("language", "python")
                .header("authorization", "Bearer A");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"results": [{"id": 5}], "next": null, "previous": "P1"}));
        })
        .await;

    let client = authed_client(&server);
    let url = server.url("/challenges/challenges/?page=2&language=python");
    let page = client
        .list_challenges(&FetchTarget::Cursor(url))
        .await
        .expect("cursor fetch must succeed");

    mock.assert_async().await;
    assert_eq!(page.results[0].id, 5);
    assert_eq!(page.cursor.previous.as_deref(), Some("P1"));
}

#[tokio::test]
async fn like_posts_once_to_action_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/challenges/challenges/7/action/like/")
                .header("authorization", "Bearer A");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "user_liked": true,
                    "user_disliked": false,
                    "user_favorited": false,
                    "likes_count": 5,
                    "dislikes_count": 0
                }));
        })
        .await;

    let client = authed_client(&server);
    let snapshot = client
        .challenge_action(7, ActionKind::Like)
        .await
        .expect("action must succeed");

    mock.assert_calls_async(1).await;
    assert!(snapshot.user_liked);
    assert_eq!(snapshot.likes_count, 5);
}

#[tokio::test]
async fn failed_action_surfaces_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/challenges/challenges/7/action/favorite/");
            then.status(500);
        })
        .await;

    let client = authed_client(&server);
    let result = client.challenge_action(7, ActionKind::Favorite).await;
    assert!(matches!(result, Err(ArenaClientError::InvalidRequest(_))));
}

#[tokio::test]
async fn detail_execute_test_and_save() {
    let server = MockServer::start_async().await;
    let detail = server
        .mock_async(|when, then| {
            when.method(GET).path("/challenges/challenges/4/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "id": 4,
                    "title": "Suma",
                    "language": "Python",
                    "categories": [{"name": "math"}],
                    "solution": "print(1)"
                }));
        })
        .await;
    let execute = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/challenges/execute/")
                .json_body(json!({"language": "Python", "code": "print(1)"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"run": {"stdout": "1\n"}}));
        })
        .await;
    let tests = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/challenges/code-test/")
                .json_body(json!({"challenge_id": 4, "solution": "print(1)"}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "message": "Todos los tests pasaron",
                    "test_results": [
                        {"test_name": "test_one", "status": "passed", "output": ""},
                        {"test_name": "test_two", "status": "failed", "output": "AssertionError"}
                    ],
                    "points_awarded": 10
                }));
        })
        .await;
    let save = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/challenges/challenges/4/save-solution/")
                .json_body(json!({"solution": "print(1)"}));
            then.status(200);
        })
        .await;

    let client = authed_client(&server);
    let challenge = client.get_challenge(4).await.expect("detail must load");
    detail.assert_async().await;
    assert_eq!(challenge.solution.as_deref(), Some("print(1)"));

    let code = challenge.solution.clone().unwrap_or_default();
    let run = client
        .execute(&challenge.language, &code)
        .await
        .expect("execute must succeed");
    execute.assert_async().await;
    assert_eq!(run.display_output(), "1\n");

    let report = client.run_tests(4, &code).await.expect("tests must run");
    tests.assert_async().await;
    assert_eq!(report.points_awarded, Some(10));
    assert!(report.test_results[0].passed());
    assert!(!report.test_results[1].passed());

    client.save_solution(4, &code).await.expect("save must succeed");
    save.assert_async().await;
}

#[tokio::test]
async fn missing_challenge_maps_to_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/challenges/challenges/404/");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(json!({"detail": "Not found."}));
        })
        .await;

    let client = authed_client(&server);
    let result = client.get_challenge(404).await;
    assert!(matches!(result, Err(ArenaClientError::NotFound)));
}

#[tokio::test]
async fn comments_first_page_next_page_and_add() {
    let server = MockServer::start_async().await;
    let next_url = server.url("/challenges/challenges/3/comments/?page=2");
    let first = server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/challenges/challenges/3/comments/")
                .query_param("page", "1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "results": [{"user": "ana", "content": "primero", "timestamp": "2024-10-01T12:00:00Z"}],
                    "next": next_url
                }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/challenges/challenges/3/comments/")
                .query_param("page", "2");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "results": [{"user": "luis", "content": "segundo", "timestamp": "2024-09-30T08:00:00Z"}],
                    "next": null
                }));
        })
        .await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/challenges/challenges/3/comments/add")
                .json_body(json!({"content": "hello"}));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({"user": "me", "content": "hello", "timestamp": "2024-10-02T09:00:00Z"}));
        })
        .await;

    let client = authed_client(&server);
    let page = client.comments_page(3, 1).await.expect("first page");
    first.assert_async().await;
    assert_eq!(page.results[0].content, "primero");

    let cursor = page.cursor.next.expect("next cursor");
    let more = client.comments_at(&cursor).await.expect("second page");
    second.assert_async().await;
    assert_eq!(more.results[0].user, "luis");
    assert!(more.cursor.next.is_none());

    let created = client.add_comment(3, "hello").await.expect("comment added");
    add.assert_async().await;
    assert_eq!(created.content, "hello");
    assert_eq!(created.user, "me");
}

#[tokio::test]
async fn filter_options_and_leaderboard() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/challenges/filters/");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"filters": {
                    "categories": [{"name": "arrays"}],
                    "languages": [{"name": "python"}, {"name": "javascript"}],
                    "difficulties": [{"grado": "fácil"}]
                }}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/access/top-users/")
                .header("authorization", "Bearer A");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([
                    {"username": "ana", "points": 120},
                    {"username": "luis", "points": 90}
                ]));
        })
        .await;

    let client = authed_client(&server);
    let options = client.filter_options().await.expect("filters must load");
    assert_eq!(options.languages, vec!["python", "javascript"]);
    assert_eq!(options.difficulties, vec!["fácil"]);

    let users = client.top_users().await.expect("leaderboard must load");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "ana");
    assert_eq!(users[0].points, 120);
}
