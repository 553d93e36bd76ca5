//! Application state.
//!
//! Wires the database, sessions, engine, queues and transport together,
//! and owns the background task registry. Cloning is cheap; every clone
//! shares the same underlying services.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{Mutex, mpsc};
use tracing::info;

use shared::event::InboundEvent;

use crate::core::config::Config;
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::db::DbService;
use crate::dispatch::Dispatcher;
use crate::engine::DialogEngine;
use crate::notify::{AdminNotifier, NotifyWorker, OrderNotice};
use crate::session::SessionManager;
use crate::transport::ChatTransport;

/// Inbound events waiting for the dispatcher.
pub const INBOUND_QUEUE_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    db: DbService,
    sessions: SessionManager,
    engine: Arc<DialogEngine>,
    transport: Arc<dyn ChatTransport>,
    admin_ids: Arc<HashSet<i64>>,
    inbound_tx: mpsc::Sender<InboundEvent>,
    // Receivers are taken exactly once, when the background tasks start.
    inbound_rx: Arc<Mutex<Option<mpsc::Receiver<InboundEvent>>>>,
    notify_rx: Arc<Mutex<Option<mpsc::Receiver<OrderNotice>>>>,
    tasks: Arc<Mutex<BackgroundTasks>>,
}

impl AppState {
    /// Open the database and build every service. Nothing runs yet; call
    /// [`AppState::start_background_tasks`] afterwards.
    pub async fn initialize(config: &Config, transport: Arc<dyn ChatTransport>) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let sessions = SessionManager::new();
        let admin_ids: Arc<HashSet<i64>> = Arc::new(config.admin_ids.iter().copied().collect());

        let (notifier, notify_rx) = AdminNotifier::channel(config.notify_queue_capacity);
        let engine = Arc::new(DialogEngine::new(
            db.clone(),
            sessions.clone(),
            admin_ids.clone(),
            notifier,
        ));
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_QUEUE_CAPACITY);

        info!(admins = admin_ids.len(), "🚀 application state initialized");
        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            sessions,
            engine,
            transport,
            admin_ids,
            inbound_tx,
            inbound_rx: Arc::new(Mutex::new(Some(inbound_rx))),
            notify_rx: Arc::new(Mutex::new(Some(notify_rx))),
            tasks: Arc::new(Mutex::new(BackgroundTasks::new())),
        })
    }

    /// Start the notify worker and the dispatcher. Calling this twice is a
    /// no-op; the receivers are gone after the first call.
    pub async fn start_background_tasks(&self) {
        let mut tasks = self.tasks.lock().await;
        let token = tasks.shutdown_token();

        if let Some(rx) = self.notify_rx.lock().await.take() {
            let worker = NotifyWorker::new(self.admin_ids.clone(), self.transport.clone());
            tasks.spawn("notify-worker", TaskKind::Worker, worker.run(rx, token.clone()));
        }

        if let Some(rx) = self.inbound_rx.lock().await.take() {
            let dispatcher = Dispatcher::new(self.engine.clone(), self.transport.clone());
            tasks.spawn("dispatcher", TaskKind::Listener, dispatcher.run(rx, token));
        }

        tasks.log_summary();
    }

    /// Sender the chat adapter pushes inbound events into.
    pub fn inbound(&self) -> mpsc::Sender<InboundEvent> {
        self.inbound_tx.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db(&self) -> &DbService {
        &self.db
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn engine(&self) -> Arc<DialogEngine> {
        self.engine.clone()
    }

    /// Stop background tasks, then close the pool.
    pub async fn shutdown(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock().await);
        tasks.shutdown().await;
        self.db.close().await;
        info!("👋 shutdown complete");
    }
}
