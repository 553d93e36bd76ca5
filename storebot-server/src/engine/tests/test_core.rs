//! Core navigation: start, catalog browsing, profile, admin menu.

use super::*;

#[tokio::test]
async fn test_start_welcomes_and_shows_menu() {
    let (engine, _rx) = test_engine().await;

    let screen = start(&engine, ALICE).await;
    assert!(screen.text.contains("Hello, Tester"));
    assert!(screen.has_token("catalog"));
    assert!(screen.has_token("cart"));
    assert!(screen.has_token("profile"));
    assert!(!screen.has_token("admin"));
    assert_eq!(state_of(&engine, ALICE).await, DialogState::MainMenu);
}

#[tokio::test]
async fn test_start_shows_admin_entry_for_admins() {
    let (engine, _rx) = test_engine().await;
    let screen = start(&engine, ADMIN_ID).await;
    assert!(screen.has_token("admin"));
}

#[tokio::test]
async fn test_catalog_lists_seeded_categories() {
    let (engine, _rx) = test_engine().await;
    start(&engine, ALICE).await;

    let screen = press(&engine, ALICE, "catalog").await;
    assert!(screen.has_token("category:Sofas"));
    assert!(screen.has_token("category:Dressers"));
    assert!(screen.has_token("main_menu"));
    assert_eq!(state_of(&engine, ALICE).await, DialogState::Catalog);
}

#[tokio::test]
async fn test_category_listing_opens_product_detail() {
    let (engine, _rx) = test_engine().await;
    let id = seed_product(&engine, "Oak chair", "750", "Chairs").await;
    start(&engine, ALICE).await;

    press(&engine, ALICE, "catalog").await;
    let listing = press(&engine, ALICE, "category:Chairs").await;
    assert!(listing.has_token(&format!("product:{id}")));

    let detail = press(&engine, ALICE, &format!("product:{id}")).await;
    assert!(detail.text.contains("Oak chair"));
    assert!(detail.text.contains("750 ₽"));
    assert!(detail.has_token(&format!("cart_add:{id}")));
    assert!(!detail.has_token(&format!("edit:{id}")));
    assert_eq!(
        state_of(&engine, ALICE).await,
        DialogState::ProductView {
            product_id: id,
            category: Some("Chairs".to_string())
        }
    );
}

#[tokio::test]
async fn test_product_detail_attaches_media() {
    let (engine, _rx) = test_engine().await;
    let images = vec!["file_1".to_string(), "file_2".to_string()];
    let id = repository::product::insert(
        &engine.db.pool,
        "Photo sofa",
        "Sofa with two photos",
        &Decimal::from(9000),
        "Sofas",
        &images,
    )
    .await
    .unwrap();
    start(&engine, ALICE).await;
    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Sofas").await;

    let detail = press(&engine, ALICE, &format!("product:{id}")).await;
    assert_eq!(detail.media, images);
}

#[tokio::test]
async fn test_back_to_products_returns_to_listing() {
    let (engine, _rx) = test_engine().await;
    let id = seed_product(&engine, "Oak chair", "750", "Chairs").await;
    start(&engine, ALICE).await;
    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Chairs").await;
    press(&engine, ALICE, &format!("product:{id}")).await;

    let listing = press(&engine, ALICE, "back_to_products").await;
    assert!(listing.has_token(&format!("product:{id}")));
    assert_eq!(
        state_of(&engine, ALICE).await,
        DialogState::CategoryView {
            category: "Chairs".to_string(),
            page: 0
        }
    );
}

#[tokio::test]
async fn test_profile_shows_saved_phone() {
    let (engine, _rx) = test_engine().await;
    start(&engine, ALICE).await;
    repository::user::set_phone(&engine.db.pool, ALICE, "+71234567890")
        .await
        .unwrap();

    let screen = press(&engine, ALICE, "profile").await;
    assert!(screen.text.contains("Tester"));
    assert!(screen.text.contains("+71234567890"));
    assert_eq!(state_of(&engine, ALICE).await, DialogState::Profile);

    press(&engine, ALICE, "main_menu").await;
    assert_eq!(state_of(&engine, ALICE).await, DialogState::MainMenu);
}

#[tokio::test]
async fn test_cancel_resets_from_a_deep_state() {
    let (engine, _rx) = test_engine().await;
    let id = seed_product(&engine, "Sofa", "1000", "Sofas").await;
    start(&engine, ALICE).await;
    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Sofas").await;
    press(&engine, ALICE, &format!("product:{id}")).await;
    press(&engine, ALICE, &format!("cart_add:{id}")).await;
    press(&engine, ALICE, "cart").await;
    press(&engine, ALICE, "checkout").await;
    assert!(matches!(
        state_of(&engine, ALICE).await,
        DialogState::OrderPhone { .. }
    ));

    let screen = engine.process(InboundEvent::command(ALICE, "cancel")).await;
    assert!(screen.text.contains("Cancelled"));
    assert_eq!(state_of(&engine, ALICE).await, DialogState::MainMenu);
    // The cart itself survives a cancelled checkout.
    assert_eq!(cart_items(&engine, ALICE).await.len(), 1);
}

#[tokio::test]
async fn test_admin_menu_stats_and_orders() {
    let (engine, _rx) = test_engine().await;
    seed_product(&engine, "Sofa", "1000", "Sofas").await;
    start(&engine, ADMIN_ID).await;

    press(&engine, ADMIN_ID, "admin").await;
    assert_eq!(state_of(&engine, ADMIN_ID).await, DialogState::AdminMenu);

    let stats = press(&engine, ADMIN_ID, "admin_stats").await;
    assert!(stats.text.contains("Store stats"));
    assert!(stats.text.contains("Active products: 1"));
    assert!(stats.text.contains("Sofas: 1"));
    assert_eq!(state_of(&engine, ADMIN_ID).await, DialogState::AdminMenu);

    let orders = press(&engine, ADMIN_ID, "admin_orders").await;
    assert!(orders.text.contains("No orders yet"));
    assert_eq!(state_of(&engine, ADMIN_ID).await, DialogState::AdminMenu);
}

#[tokio::test]
async fn test_sessions_are_independent_per_user() {
    let (engine, _rx) = test_engine().await;
    start(&engine, ALICE).await;
    start(&engine, BOB).await;

    press(&engine, ALICE, "catalog").await;
    assert_eq!(state_of(&engine, ALICE).await, DialogState::Catalog);
    assert_eq!(state_of(&engine, BOB).await, DialogState::MainMenu);
}
