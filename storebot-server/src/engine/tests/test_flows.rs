//! Full conversational flows, start to finish.

use super::*;

#[tokio::test]
async fn test_full_checkout_flow_with_comment_and_notice() {
    let (engine, mut rx) = test_engine().await;
    let sofa = seed_product(&engine, "Sofa", "1000", "Sofas").await;
    let chair = seed_product(&engine, "Chair", "500", "Chairs").await;
    start(&engine, ALICE).await;

    // One sofa, two chairs.
    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Sofas").await;
    press(&engine, ALICE, &format!("product:{sofa}")).await;
    press(&engine, ALICE, &format!("cart_add:{sofa}")).await;
    press(&engine, ALICE, "back_to_products").await;
    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Chairs").await;
    press(&engine, ALICE, &format!("product:{chair}")).await;
    press(&engine, ALICE, &format!("cart_add:{chair}")).await;
    press(&engine, ALICE, &format!("cart_add:{chair}")).await;

    let cart = press(&engine, ALICE, "cart").await;
    assert!(cart.text.contains("Total: 2 000 ₽"));

    // Checkout with one bad phone attempt on the way.
    press(&engine, ALICE, "checkout").await;
    let retry = say(&engine, ALICE, "123").await;
    assert!(retry.text.starts_with("❌"));
    let address_prompt = say(&engine, ALICE, "+71234567890").await;
    assert!(address_prompt.text.contains("address"));
    let comment_choice = say(&engine, ALICE, "Moscow, Lenina 1, apt 5").await;
    assert!(comment_choice.has_token("comment_add"));
    assert!(comment_choice.has_token("order_finish"));

    press(&engine, ALICE, "comment_add").await;
    let saved = say(&engine, ALICE, "Call before delivery").await;
    assert!(saved.has_token("order_finish"));

    let confirmed = press(&engine, ALICE, "order_finish").await;
    assert!(confirmed.text.contains("Order #1 placed"));
    assert!(confirmed.text.contains("2 000 ₽"));
    assert_eq!(state_of(&engine, ALICE).await, DialogState::MainMenu);

    // Stored order matches the dialog.
    let order = repository::order::find(&engine.db.pool, 1).await.unwrap().unwrap();
    assert_eq!(order.total, Decimal::from(2000));
    assert_eq!(order.lines.len(), 2);
    assert_eq!(order.phone, "+71234567890");
    assert_eq!(order.address, "Moscow, Lenina 1, apt 5");
    assert_eq!(order.comment.as_deref(), Some("Call before delivery"));
    assert!(cart_items(&engine, ALICE).await.is_empty());

    // The admin notice is already queued.
    let notice = rx.try_recv().unwrap();
    assert_eq!(notice.order_id, 1);
    assert_eq!(notice.user_id, ALICE);
    assert_eq!(notice.buyer, "Tester");
    assert_eq!(notice.total, Decimal::from(2000));
}

#[tokio::test]
async fn test_admin_creates_a_product_with_two_photos() {
    let (engine, _rx) = test_engine().await;
    start(&engine, ADMIN_ID).await;

    press(&engine, ADMIN_ID, "admin").await;
    let name_prompt = press(&engine, ADMIN_ID, "admin_add_product").await;
    assert!(name_prompt.text.contains("name"));

    say(&engine, ADMIN_ID, "Oak table").await;
    say(&engine, ADMIN_ID, "Solid oak dining table").await;
    let category_prompt = say(&engine, ADMIN_ID, "15 000,50").await;
    assert!(category_prompt.has_token("pick_category:Tables"));

    let images_prompt = press(&engine, ADMIN_ID, "pick_category:Tables").await;
    assert!(images_prompt.has_token("images_done"));

    let first = upload(&engine, ADMIN_ID, "photo_1").await;
    assert!(first.text.contains("Photo 1"));
    let second = upload(&engine, ADMIN_ID, "photo_2").await;
    assert!(second.text.contains("Photo 2"));

    let done = press(&engine, ADMIN_ID, "images_done").await;
    assert!(done.text.contains("Oak table saved"));
    assert_eq!(state_of(&engine, ADMIN_ID).await, DialogState::AdminMenu);

    let products = repository::product::list_active_by_category(&engine.db.pool, "Tables")
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Oak table");
    assert_eq!(products[0].price, "15000.5".parse().unwrap());
    assert_eq!(products[0].images, vec!["photo_1".to_string(), "photo_2".to_string()]);
}

#[tokio::test]
async fn test_admin_edits_a_product_keeping_old_images() {
    let (engine, _rx) = test_engine().await;
    let id = repository::product::insert(
        &engine.db.pool,
        "Pine chair",
        "Simple pine chair",
        &Decimal::from(500),
        "Chairs",
        &["old_photo".to_string()],
    )
    .await
    .unwrap();
    start(&engine, ADMIN_ID).await;

    press(&engine, ADMIN_ID, "catalog").await;
    press(&engine, ADMIN_ID, "category:Chairs").await;
    press(&engine, ADMIN_ID, &format!("product:{id}")).await;

    let name_prompt = press(&engine, ADMIN_ID, &format!("edit:{id}")).await;
    assert!(name_prompt.text.contains("Current: Pine chair"));

    say(&engine, ADMIN_ID, "Walnut chair").await;
    say(&engine, ADMIN_ID, "Solid walnut chair, oiled finish").await;
    say(&engine, ADMIN_ID, "750").await;
    press(&engine, ADMIN_ID, "pick_category:Chairs").await;
    upload(&engine, ADMIN_ID, "new_photo").await;
    let done = press(&engine, ADMIN_ID, "images_done").await;
    assert!(done.text.contains("Walnut chair updated"));

    let product = repository::product::find(&engine.db.pool, id).await.unwrap().unwrap();
    assert_eq!(product.name, "Walnut chair");
    assert_eq!(product.price, Decimal::from(750));
    // Uploads append to what the product already had.
    assert_eq!(
        product.images,
        vec!["old_photo".to_string(), "new_photo".to_string()]
    );
}

#[tokio::test]
async fn test_admin_deletes_a_product_via_confirmation() {
    let (engine, _rx) = test_engine().await;
    let id = seed_product(&engine, "Sofa", "1000", "Sofas").await;
    start(&engine, ADMIN_ID).await;

    press(&engine, ADMIN_ID, "catalog").await;
    press(&engine, ADMIN_ID, "category:Sofas").await;
    press(&engine, ADMIN_ID, &format!("product:{id}")).await;

    let confirm = press(&engine, ADMIN_ID, &format!("delete:{id}")).await;
    assert!(confirm.has_token(&format!("delete_confirm:{id}")));
    assert!(confirm.has_token(&format!("product:{id}")));

    let after = press(&engine, ADMIN_ID, &format!("delete_confirm:{id}")).await;
    assert!(after.text.contains("Sofa deleted"));
    assert!(after.text.contains("Nothing in Sofas yet"));
    assert_eq!(
        state_of(&engine, ADMIN_ID).await,
        DialogState::CategoryView {
            category: "Sofas".to_string(),
            page: 0
        }
    );

    let product = repository::product::find(&engine.db.pool, id).await.unwrap().unwrap();
    assert!(!product.is_active);
}

#[tokio::test]
async fn test_cart_management_flow() {
    let (engine, _rx) = test_engine().await;
    let sofa = seed_product(&engine, "Sofa", "1000", "Sofas").await;
    let chair = seed_product(&engine, "Chair", "500", "Chairs").await;
    start(&engine, ALICE).await;

    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Sofas").await;
    press(&engine, ALICE, &format!("product:{sofa}")).await;
    press(&engine, ALICE, &format!("cart_add:{sofa}")).await;
    press(&engine, ALICE, "catalog").await;
    press(&engine, ALICE, "category:Chairs").await;
    press(&engine, ALICE, &format!("product:{chair}")).await;
    press(&engine, ALICE, &format!("cart_add:{chair}")).await;

    let cart = press(&engine, ALICE, "cart").await;
    assert!(cart.has_token(&format!("cart_remove:{sofa}")));

    let after_remove = press(&engine, ALICE, &format!("cart_remove:{sofa}")).await;
    assert!(after_remove.text.contains("Chair"));
    assert!(!after_remove.text.contains("Sofa"));
    assert_eq!(cart_items(&engine, ALICE).await.len(), 1);

    let cleared = press(&engine, ALICE, "cart_clear").await;
    assert!(cleared.text.contains("Cart cleared"));
    assert!(cart_items(&engine, ALICE).await.is_empty());
}
