use std::time::{SystemTime, UNIX_EPOCH};

use arena_client::arena_core::models::ActionKind;
use arena_client::arena_core::{FetchTarget, FilterSet, MemoryTokenStore, RegistrationForm};
use arena_client::{ArenaClient, ClientConfig};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running challenge API"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("ARENA_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000/beta".to_string());
    let mut client = ArenaClient::new(ClientConfig::new(base_url), MemoryTokenStore::new())
        .expect("client must build");

    let suffix = unique_suffix();
    let form = RegistrationForm {
        username: format!("smoke_{suffix}"),
        email: format!("smoke_{suffix}@example.com"),
        password: "password123".to_string(),
        confirm_password: "password123".to_string(),
    };

    client.register(&form).await.expect("register must succeed");
    assert!(client.is_authenticated());

    client
        .login(&form.username, &form.password)
        .await
        .expect("login must succeed");

    let page = client
        .list_challenges(&FetchTarget::Filtered(FilterSet::default()))
        .await
        .expect("list must succeed");

    if let Some(first) = page.results.first() {
        let detail = client
            .get_challenge(first.id)
            .await
            .expect("detail must load");
        assert_eq!(detail.id, first.id);

        let snapshot = client
            .challenge_action(first.id, ActionKind::Favorite)
            .await
            .expect("favorite must succeed");
        assert_ne!(snapshot.user_favorited, first.user_favorited);

        client
            .comments_page(first.id, 1)
            .await
            .expect("comments must load");
    }

    client.top_users().await.expect("leaderboard must load");

    client.logout().expect("logout must succeed");
    assert!(!client.is_authenticated());
}
