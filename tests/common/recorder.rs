//! RecordingHandler — a [`ShareHandler`] that remembers what it was given.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rpgshare::dispatcher::HandlerFuture;
use rpgshare::{HandlerError, ShareEvent, ShareHandler};

/// Shared log of `"<handler>:<player>:<item>"` entries, in call order.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// What the handler's future does after the call is recorded.
#[derive(Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Fail,
    Panic,
    /// Sleep before succeeding; completion is logged as `"<handler>:done"`.
    Sleep(Duration),
}

/// Records each call synchronously (so registration order is observable),
/// then runs its [`Behaviour`].
pub struct RecordingHandler {
    name: String,
    log: CallLog,
    behaviour: Behaviour,
    events: Arc<Mutex<Vec<Arc<ShareEvent>>>>,
}

impl RecordingHandler {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self::with(name, log, Behaviour::Succeed)
    }

    pub fn with(name: &str, log: &CallLog, behaviour: Behaviour) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            behaviour,
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to every event this handler has received.
    pub fn events(&self) -> Arc<Mutex<Vec<Arc<ShareEvent>>>> {
        self.events.clone()
    }
}

impl ShareHandler for RecordingHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, event: Arc<ShareEvent>) -> HandlerFuture {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}:{}", self.name, event.player, event.item.name));
        self.events.lock().unwrap().push(event);

        let behaviour = self.behaviour;
        let name = self.name.clone();
        let log = self.log.clone();
        Box::pin(async move {
            match behaviour {
                Behaviour::Succeed => Ok(()),
                Behaviour::Fail => Err(HandlerError::msg(format!("{name} refused the event"))),
                Behaviour::Panic => panic!("{name} blew up"),
                Behaviour::Sleep(d) => {
                    tokio::time::sleep(d).await;
                    log.lock().unwrap().push(format!("{name}:done"));
                    Ok(())
                }
            }
        })
    }
}
