//! StoreBot Server - conversational storefront service
//!
//! A chat-driven furniture store: customers browse a catalog, fill a cart
//! and place delivery orders; admins manage products and watch orders come
//! in, all through the same dialog engine.
//!
//! # Module structure
//!
//! ```text
//! storebot-server/src/
//! ├── core/       # configuration, app state, background tasks
//! ├── db/         # SQLite pool, migrations, repositories
//! ├── session/    # per-user dialog state
//! ├── engine/     # the dialog state machine
//! ├── render/     # screens and keyboards
//! ├── notify/     # admin order notifications
//! ├── dispatch/   # inbound event fan-out
//! ├── transport/  # chat delivery seam
//! └── utils/      # logging
//! ```

pub mod core;
pub mod db;
pub mod dispatch;
pub mod engine;
pub mod notify;
pub mod render;
pub mod session;
pub mod transport;
pub mod utils;

// Re-export common types
pub use self::core::{AppState, Config};
pub use db::DbService;
pub use dispatch::Dispatcher;
pub use engine::{ActionToken, DialogEngine, DialogError, DialogResult};
pub use notify::{AdminNotifier, NotifyWorker, OrderNotice};
pub use session::{DialogSession, DialogState, SessionManager};
pub use transport::{ChatTransport, MemoryTransport, TransportError};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
    ____        __
   / __ )____  / /_
  / __  / __ \/ __/
 / /_/ / /_/ / /_
/_____/\____/\__/
    "#
    );
}
