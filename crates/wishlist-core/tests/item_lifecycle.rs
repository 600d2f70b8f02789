use wishlist_core::{AppCore, ItemPatch, ItemSpec, WishlistError};

#[test]
fn item_lifecycle_scenario() {
    let temp_dir = tempfile::tempdir().unwrap();
    let core = AppCore::new(temp_dir.path().join("wishlist.redb")).unwrap();

    let created = core
        .items
        .create(
            "item-1",
            ItemSpec {
                description: Some("d".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(!created.owned);
    assert_eq!(core.items.get("item-1").unwrap(), created);

    let toggled = core.items.toggle_owned("item-1").unwrap();
    assert!(toggled.owned);

    assert!(matches!(
        core.items.pick_random_unowned().unwrap_err(),
        WishlistError::NotFound(_)
    ));

    core.items.delete("item-1").unwrap();
    assert!(matches!(
        core.items.get("item-1").unwrap_err(),
        WishlistError::NotFound(_)
    ));
}

#[test]
fn items_survive_reopen() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("wishlist.redb");

    {
        let core = AppCore::new(&db_path).unwrap();
        core.items.create("kettle", ItemSpec::default()).unwrap();
        core.items
            .update(
                "kettle",
                &ItemPatch {
                    link: Some("https://shop.example/kettle".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        core.items.toggle_owned("kettle").unwrap();
    }

    let core = AppCore::new(&db_path).unwrap();
    let item = core.items.get("kettle").unwrap();
    assert!(item.owned);
    assert_eq!(item.link, "https://shop.example/kettle");
}
