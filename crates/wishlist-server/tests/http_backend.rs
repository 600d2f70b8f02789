use std::sync::Arc;
use tempfile::TempDir;
use wishlist_core::{AppCore, ItemPatch, ItemSpec, WishlistError};
use wishlist_server::api::state::AppState;
use wishlist_server::auth::SessionGate;
use wishlist_server::backend::{HttpBackend, LocalBackend, WishlistBackend};
use wishlist_server::build_router;

async fn spawn_server() -> (String, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let core = Arc::new(AppCore::new(temp_dir.path().join("wishlist.redb")).unwrap());
    let state = AppState {
        backend: Arc::new(LocalBackend::new(core.clone())),
        gate: Arc::new(SessionGate::new("pw", "secret", 1)),
        core,
    };

    // Use port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    (format!("http://{}", address), temp_dir)
}

#[tokio::test]
async fn http_backend_round_trip() {
    let (base_url, _tmp) = spawn_server().await;
    let backend = HttpBackend::new(&base_url).unwrap();

    let (wanted, owned) = backend.partition().await.unwrap();
    assert!(wanted.is_empty() && owned.is_empty());

    let created = backend
        .create(
            "item 1",
            ItemSpec {
                description: Some("first".to_string()),
                owned: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.key, "item 1");
    assert!(!created.owned);

    let err = backend
        .create("item 1", ItemSpec::default())
        .await
        .unwrap_err();
    assert!(matches!(err, WishlistError::Conflict(_)));

    let updated = backend
        .update(
            "item 1",
            ItemPatch {
                picture_url: Some("https://shop.example/1.png".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "first");
    assert_eq!(updated.picture_url, "https://shop.example/1.png");

    assert_eq!(backend.pick_random_unowned().await.unwrap().key, "item 1");

    assert!(backend.toggle_owned("item 1").await.unwrap().owned);
    let (wanted, owned) = backend.partition().await.unwrap();
    assert!(wanted.is_empty());
    assert_eq!(owned.len(), 1);

    assert!(matches!(
        backend.pick_random_unowned().await.unwrap_err(),
        WishlistError::NotFound(_)
    ));

    backend.delete("item 1").await.unwrap();
    assert!(matches!(
        backend.delete("item 1").await.unwrap_err(),
        WishlistError::NotFound(_)
    ));
}

#[tokio::test]
async fn http_backend_reports_unreachable_api() {
    let backend = HttpBackend::new("http://127.0.0.1:9").unwrap();

    let err = backend.partition().await.unwrap_err();
    assert!(matches!(err, WishlistError::Upstream(_)));
}

#[tokio::test]
async fn http_backend_handles_dot_keys() {
    let (base_url, _tmp) = spawn_server().await;
    let backend = HttpBackend::new(&base_url).unwrap();

    for key in [".", ".."] {
        let err = backend.create(key, ItemSpec::default()).await.unwrap_err();
        assert!(matches!(err, WishlistError::InvalidKey(_)), "key {:?}", key);

        let err = backend.toggle_owned(key).await.unwrap_err();
        assert!(matches!(err, WishlistError::NotFound(_)), "key {:?}", key);
    }
    let (wanted, owned) = backend.partition().await.unwrap();
    assert!(wanted.is_empty() && owned.is_empty());

    let created = backend.create("...", ItemSpec::default()).await.unwrap();
    assert_eq!(created.key, "...");
    assert!(backend.toggle_owned("...").await.unwrap().owned);
    backend.delete("...").await.unwrap();
}
