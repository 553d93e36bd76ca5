//! Engine behavior tests.
//!
//! Every test drives a real engine over an in-memory database with raw
//! inbound events, the same way the dispatcher does in production. The
//! themed files split coverage: core navigation, boundary handling,
//! business rules, full flows.

use super::*;

use rust_decimal::Decimal;
use tokio::sync::mpsc;

use shared::event::Sender;
use shared::models::cart::CartItem;

const ADMIN_ID: i64 = 9_000;
const ALICE: i64 = 101;
const BOB: i64 = 102;

// ========== Harness ==========

async fn test_engine() -> (DialogEngine, mpsc::Receiver<OrderNotice>) {
    let db = DbService::in_memory().await.unwrap();
    let (notifier, rx) = AdminNotifier::channel(8);
    let engine = DialogEngine::new(
        db,
        SessionManager::new(),
        Arc::new(HashSet::from([ADMIN_ID])),
        notifier,
    );
    (engine, rx)
}

fn named(user_id: i64, first_name: &str) -> Sender {
    Sender {
        username: Some(format!("user{user_id}")),
        first_name: Some(first_name.to_string()),
        last_name: None,
    }
}

async fn start(engine: &DialogEngine, user_id: i64) -> Screen {
    engine
        .process(InboundEvent::command(user_id, "start").with_sender(named(user_id, "Tester")))
        .await
}

async fn press(engine: &DialogEngine, user_id: i64, token: &str) -> Screen {
    engine.process(InboundEvent::button(user_id, token)).await
}

async fn say(engine: &DialogEngine, user_id: i64, text: &str) -> Screen {
    engine.process(InboundEvent::text(user_id, text)).await
}

async fn upload(engine: &DialogEngine, user_id: i64, reference: &str) -> Screen {
    engine.process(InboundEvent::media(user_id, reference)).await
}

async fn seed_product(engine: &DialogEngine, name: &str, price: &str, category: &str) -> i64 {
    repository::product::insert(
        &engine.db.pool,
        name,
        "Seeded product description",
        &price.parse::<Decimal>().unwrap(),
        category,
        &[],
    )
    .await
    .unwrap()
}

async fn cart_items(engine: &DialogEngine, user_id: i64) -> Vec<CartItem> {
    repository::cart::items(&engine.db.pool, user_id).await.unwrap()
}

async fn state_of(engine: &DialogEngine, user_id: i64) -> DialogState {
    engine.sessions.session(user_id).lock().await.state.clone()
}

mod test_core;
mod test_flows;
