use std::env;
use std::sync::Arc;

use tracing::info;

use storebot_server::transport::{ChatTransport, MemoryTransport};
use storebot_server::{AppState, Config, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Logger first, so configuration warnings are visible.
    let log_level = env::var("LOG_LEVEL").ok();
    let log_dir = env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    print_banner();

    let config = Config::from_env();
    info!(
        db = %config.database_path,
        admins = config.admin_ids.len(),
        "configuration loaded"
    );

    // Stand-in transport until a chat network adapter is plugged in.
    // Inbound events enter through AppState::inbound() either way.
    let transport: Arc<dyn ChatTransport> = Arc::new(MemoryTransport::new());

    let state = AppState::initialize(&config, transport).await?;
    state.start_background_tasks().await;
    info!("✅ StoreBot server ready, press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    info!("🛑 shutdown signal received");
    state.shutdown().await;
    Ok(())
}
