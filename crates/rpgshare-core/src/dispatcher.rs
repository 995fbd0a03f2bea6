//! Dispatcher — fans a [`ShareEvent`] out to every registered consumer.
//!
//! Handlers are called in registration order; each returned future is spawned
//! as its own task so a slow consumer never holds up the next line. A handler
//! that errors or panics is logged and otherwise ignored.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio_util::task::TaskTracker;

use crate::error::HandlerError;
use crate::types::ShareEvent;

pub type HandlerFuture = BoxFuture<'static, Result<(), HandlerError>>;

/// A consumer of share events, e.g. a chat-embed renderer.
pub trait ShareHandler: Send + Sync + 'static {
    /// Identifies the handler in diagnostics.
    fn name(&self) -> &str;

    /// Called once per dispatched event. Work done before the returned future
    /// is first polled happens synchronously, in registration order.
    fn handle(&self, event: Arc<ShareEvent>) -> HandlerFuture;
}

pub type BoxedHandler = Arc<dyn ShareHandler>;

/// Returned by [`Dispatcher::register`]; pass to [`Dispatcher::unregister`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Adapter turning an async closure into a [`ShareHandler`].
pub struct FnHandler<F> {
    name: String,
    f: F,
}

/// Wrap `f` as a named handler.
///
/// ```rust,ignore
/// monitor.register(handler_fn("log", |event| async move {
///     tracing::info!(player = %event.player, "shared");
///     Ok(())
/// }));
/// ```
pub fn handler_fn<F, Fut>(name: impl Into<String>, f: F) -> FnHandler<F>
where
    F: Fn(Arc<ShareEvent>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    FnHandler {
        name: name.into(),
        f,
    }
}

impl<F, Fut> ShareHandler for FnHandler<F>
where
    F: Fn(Arc<ShareEvent>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, event: Arc<ShareEvent>) -> HandlerFuture {
        Box::pin((self.f)(event))
    }
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: RwLock<Vec<(HandlerId, BoxedHandler)>>,
    next_id: AtomicU64,
    tasks: TaskTracker,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handler: impl ShareHandler) -> HandlerId {
        self.register_arc(Arc::new(handler))
    }

    pub fn register_arc(&self, handler: BoxedHandler) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(handler = handler.name(), "registered share handler");
        self.handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, handler));
        id
    }

    /// Remove a handler. Events already dispatched to it still run.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = handlers.len();
        handlers.retain(|(hid, _)| *hid != id);
        handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .map(|h| h.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every handler with `event` and return how many were started.
    ///
    /// Never blocks on handler work and never fails. Must be called from
    /// within a Tokio runtime; without one the event is dropped with an error
    /// log.
    pub fn dispatch(&self, event: Arc<ShareEvent>) -> usize {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(
                player = %event.player,
                item = %event.item.name,
                "no tokio runtime available, share event dropped"
            );
            return 0;
        };

        let handlers: Vec<BoxedHandler> = self
            .handlers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, h)| h.clone())
            .collect();

        let mut started = 0;
        for handler in handlers {
            let name = handler.name().to_string();
            let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| {
                handler.handle(event.clone())
            })) {
                Ok(fut) => fut,
                Err(panic) => {
                    report_panic(&name, &event, panic.as_ref());
                    continue;
                }
            };

            let event = event.clone();
            self.tasks.spawn_on(
                async move {
                    match AssertUnwindSafe(fut).catch_unwind().await {
                        Ok(Ok(())) => {
                            tracing::trace!(handler = %name, player = %event.player, "handler finished")
                        }
                        Ok(Err(e)) => tracing::error!(
                            handler = %name,
                            player = %event.player,
                            item = %event.item.name,
                            error = %e,
                            "share handler failed"
                        ),
                        Err(panic) => report_panic(&name, &event, panic.as_ref()),
                    }
                },
                &runtime,
            );
            started += 1;
        }
        started
    }

    /// Wait until every handler task spawned so far has finished.
    pub async fn wait_idle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
    }

    /// Handler tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.len())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

fn report_panic(handler: &str, event: &ShareEvent, panic: &(dyn std::any::Any + Send)) {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    tracing::error!(
        handler = %handler,
        player = %event.player,
        item = %event.item.name,
        panic = %message,
        "share handler panicked"
    );
}
