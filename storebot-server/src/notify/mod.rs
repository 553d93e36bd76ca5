//! Admin order notifications.
//!
//! Placing an order must never wait on admin chats, so the engine drops a
//! notice onto a bounded queue and a background worker fans it out. A full
//! queue loses the notice with a warning; the order itself is already
//! committed at that point.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::render;
use crate::transport::ChatTransport;

#[derive(Debug, Clone)]
pub struct OrderNotice {
    pub order_id: i64,
    pub user_id: i64,
    pub buyer: String,
    pub username: Option<String>,
    pub total: Decimal,
}

/// Sending half: owned by the engine, non-blocking.
#[derive(Debug, Clone)]
pub struct AdminNotifier {
    tx: mpsc::Sender<OrderNotice>,
}

impl AdminNotifier {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<OrderNotice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Best-effort enqueue; a full or closed queue drops the notice.
    pub fn notify(&self, notice: OrderNotice) {
        if let Err(e) = self.tx.try_send(notice) {
            warn!("order notice dropped: {e}");
        }
    }
}

/// Receiving half: fans each notice out to every configured admin.
pub struct NotifyWorker {
    admin_ids: Arc<HashSet<i64>>,
    transport: Arc<dyn ChatTransport>,
}

impl NotifyWorker {
    pub fn new(admin_ids: Arc<HashSet<i64>>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { admin_ids, transport }
    }

    pub async fn run(self, mut rx: mpsc::Receiver<OrderNotice>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                notice = rx.recv() => match notice {
                    Some(notice) => self.fan_out(notice).await,
                    None => break,
                },
            }
        }
        debug!("notify worker stopped");
    }

    async fn fan_out(&self, notice: OrderNotice) {
        let screen = render::order_notice(
            notice.order_id,
            &notice.buyer,
            notice.username.as_deref(),
            notice.user_id,
            &notice.total,
        );
        for &admin_id in self.admin_ids.iter() {
            if let Err(e) = self.transport.deliver(admin_id, screen.clone()).await {
                warn!(admin_id, "failed to notify admin: {e}");
            }
        }
    }
}
