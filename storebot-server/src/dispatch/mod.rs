//! Inbound event dispatch.
//!
//! Pulls events off the inbound queue and hands each to the engine on its
//! own task, so one slow conversation never stalls the others. Mutual
//! exclusion per user comes from the session lock inside the engine.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use shared::event::InboundEvent;

use crate::engine::DialogEngine;
use crate::transport::ChatTransport;

pub struct Dispatcher {
    engine: Arc<DialogEngine>,
    transport: Arc<dyn ChatTransport>,
}

impl Dispatcher {
    pub fn new(engine: Arc<DialogEngine>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { engine, transport }
    }

    pub async fn run(self, mut rx: mpsc::Receiver<InboundEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = rx.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
            }
        }
        debug!("dispatcher stopped");
    }

    fn dispatch(&self, event: InboundEvent) {
        let engine = self.engine.clone();
        let transport = self.transport.clone();
        tokio::spawn(async move {
            let user_id = event.user_id;
            let screen = engine.process(event).await;
            if let Err(e) = transport.deliver(user_id, screen).await {
                warn!(user_id, "reply delivery failed: {e}");
            }
        });
    }
}
