//! Typed action bus with kind-keyed handler registration.
//!
//! Delivery is serial: one action at a time, one handler at a time, each
//! awaited before the next. Observers such as the owning store receive
//! every dispatched and emitted action through a broadcast channel.

use super::{ArchivalCoordinator, CompletionSyncTranslator, RelocationCoordinator};
use crate::config::LifecycleConfig;
use crate::task::{
    domain::{TaskAction, TaskActionKind},
    ports::{PersistenceGateway, ReminderGateway, TaskActionHandler, TaskActionHandlerError},
};
use mockable::Clock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, trace};

/// Upper bound on actions processed for one dispatched action, emitted
/// actions included.
pub const MAX_CASCADE: usize = 64;

/// Errors returned by [`ActionDispatcher::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed; later handlers and emitted actions were skipped.
    #[error(transparent)]
    Handler(#[from] TaskActionHandlerError),
    /// Handlers kept emitting actions past [`MAX_CASCADE`].
    #[error("action cascade exceeded {0} actions")]
    CascadeLimit(usize),
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Routes lifecycle actions to registered handlers.
pub struct ActionDispatcher {
    routes: HashMap<TaskActionKind, Vec<Arc<dyn TaskActionHandler>>>,
    sender: broadcast::Sender<TaskAction>,
}

impl ActionDispatcher {
    /// Creates a dispatcher with no handlers.
    #[must_use]
    pub fn new(config: &LifecycleConfig) -> Self {
        let (sender, _) = broadcast::channel(config.bus_capacity.max(1));
        Self {
            routes: HashMap::new(),
            sender,
        }
    }

    /// Creates a dispatcher with the archival, relocation, and completion
    /// sync handlers registered over the given gateways.
    #[must_use]
    pub fn with_lifecycle_handlers<R, P, C>(
        reminders: Arc<R>,
        persistence: Arc<P>,
        clock: Arc<C>,
        config: &LifecycleConfig,
    ) -> Self
    where
        R: ReminderGateway + 'static,
        P: PersistenceGateway + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let mut dispatcher = Self::new(config);
        dispatcher
            .register(Arc::new(ArchivalCoordinator::with_config(
                Arc::clone(&reminders),
                Arc::clone(&persistence),
                Arc::clone(&clock),
                config,
            )))
            .register(Arc::new(RelocationCoordinator::with_config(
                reminders,
                persistence,
                clock,
                config,
            )))
            .register(Arc::new(CompletionSyncTranslator::new()));
        dispatcher
    }

    /// Registers `handler` for every kind it declares.
    ///
    /// Handlers for the same kind run in registration order.
    pub fn register(&mut self, handler: Arc<dyn TaskActionHandler>) -> &mut Self {
        for kind in handler.handles() {
            self.routes
                .entry(*kind)
                .or_default()
                .push(Arc::clone(&handler));
        }
        debug!(handler = handler.name(), kinds = handler.handles().len(), "handler registered");
        self
    }

    /// Returns how many handlers are registered for `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: TaskActionKind) -> usize {
        self.routes.get(&kind).map_or(0, Vec::len)
    }

    /// Subscribes to every action seen by the dispatcher.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskAction> {
        self.sender.subscribe()
    }

    /// Dispatches one action and everything its handlers emit.
    ///
    /// Emitted actions are routed in FIFO order after the triggering action
    /// finished. Returns every emitted action in emission order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Handler`] on the first handler failure and
    /// [`DispatchError::CascadeLimit`] when the cascade does not settle.
    pub async fn dispatch(&self, action: TaskAction) -> DispatchResult<Vec<TaskAction>> {
        let mut pending = VecDeque::from([action]);
        let mut emitted = Vec::new();
        let mut processed = 0_usize;

        while let Some(current) = pending.pop_front() {
            processed += 1;
            if processed > MAX_CASCADE {
                return Err(DispatchError::CascadeLimit(MAX_CASCADE));
            }
            self.publish(current.clone());

            let Some(handlers) = self.routes.get(&current.kind()) else {
                trace!(kind = %current.kind(), "no handler registered");
                continue;
            };
            for handler in handlers {
                let produced = handler.handle(&current).await?;
                debug!(
                    handler = handler.name(),
                    kind = %current.kind(),
                    emitted = produced.len(),
                    "action handled"
                );
                emitted.extend(produced.iter().cloned());
                pending.extend(produced);
            }
        }

        Ok(emitted)
    }

    /// Consumes actions until every sender is dropped.
    ///
    /// A failing action is logged and does not stop the loop.
    pub async fn run(&self, mut actions: mpsc::Receiver<TaskAction>) {
        while let Some(action) = actions.recv().await {
            let kind = action.kind();
            if let Err(err) = self.dispatch(action).await {
                error!(kind = %kind, error = %err, "action dispatch failed");
            }
        }
        debug!("action channel closed");
    }

    fn publish(&self, action: TaskAction) {
        // Sending only fails when nobody is subscribed.
        if self.sender.send(action).is_err() {
            trace!("no bus subscribers");
        }
    }
}
