//! Monitor — runs one log line through every pipeline stage.
//!
//! `process_line` is synchronous up to and including the cooldown decision;
//! only handler work is deferred to background tasks. Every failure drops the
//! current line and leaves the monitor ready for the next one.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::ItemSharingConfig;
use crate::cooldown::{CooldownDecision, CooldownGate};
use crate::decoder::decode;
use crate::dispatcher::{handler_fn, BoxedHandler, Dispatcher, HandlerId, ShareHandler};
use crate::error::{ConfigError, DecodeError, HandlerError, ValidationError};
use crate::normalizer::{normalize, DisplayLimits};
use crate::scanner::TagScanner;
use crate::types::ShareEvent;

/// What happened to a single line.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// Accepted and handed to every registered handler.
    Dispatched(Arc<ShareEvent>),
    /// No marker in the line. The common case.
    SkippedNoMatch,
    SkippedDecodeError(DecodeError),
    SkippedValidationError(ValidationError),
    /// Rate limited. Not an error.
    SkippedCooldown { player: String, remaining: Duration },
    /// Sharing is turned off in config; the line was not looked at.
    Disabled,
}

impl ProcessOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, ProcessOutcome::Dispatched(_))
    }

    /// The dispatched event, if any.
    pub fn event(&self) -> Option<&Arc<ShareEvent>> {
        match self {
            ProcessOutcome::Dispatched(event) => Some(event),
            _ => None,
        }
    }
}

/// Per-outcome line counts since the monitor was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub lines: u64,
    pub dispatched: u64,
    pub no_match: u64,
    pub decode_errors: u64,
    pub validation_errors: u64,
    pub cooldown_skips: u64,
    pub disabled: u64,
}

#[derive(Debug, Default)]
struct Counters {
    lines: AtomicU64,
    dispatched: AtomicU64,
    no_match: AtomicU64,
    decode_errors: AtomicU64,
    validation_errors: AtomicU64,
    cooldown_skips: AtomicU64,
    disabled: AtomicU64,
}

impl Counters {
    fn record(&self, outcome: &ProcessOutcome) {
        self.lines.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            ProcessOutcome::Dispatched(_) => &self.dispatched,
            ProcessOutcome::SkippedNoMatch => &self.no_match,
            ProcessOutcome::SkippedDecodeError(_) => &self.decode_errors,
            ProcessOutcome::SkippedValidationError(_) => &self.validation_errors,
            ProcessOutcome::SkippedCooldown { .. } => &self.cooldown_skips,
            ProcessOutcome::Disabled => &self.disabled,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> MonitorStats {
        MonitorStats {
            lines: self.lines.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            no_match: self.no_match.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            cooldown_skips: self.cooldown_skips.load(Ordering::Relaxed),
            disabled: self.disabled.load(Ordering::Relaxed),
        }
    }
}

/// Item-share log monitor. Cheap to share behind an `Arc` between several
/// line sources; each instance owns its own cooldown state.
#[derive(Debug)]
pub struct Monitor {
    enabled: bool,
    scanner: TagScanner,
    limits: DisplayLimits,
    source_tag: String,
    enhanced_embeds: bool,
    gate: CooldownGate,
    dispatcher: Dispatcher,
    counters: Counters,
}

impl Monitor {
    pub fn new(config: &ItemSharingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            enabled: config.enabled,
            scanner: TagScanner::new(config.marker.clone()),
            limits: config.display_limits(),
            source_tag: config.source_tag.clone(),
            enhanced_embeds: config.show_enhanced_embeds,
            gate: CooldownGate::with_capacity(config.cooldown(), config.max_tracked_players),
            dispatcher: Dispatcher::new(),
            counters: Counters::default(),
        })
    }

    pub fn register(&self, handler: impl ShareHandler) -> HandlerId {
        self.dispatcher.register(handler)
    }

    pub fn register_arc(&self, handler: BoxedHandler) -> HandlerId {
        self.dispatcher.register_arc(handler)
    }

    pub fn unregister(&self, id: HandlerId) -> bool {
        self.dispatcher.unregister(id)
    }

    /// Callback-style registration.
    pub fn on_share<F, Fut>(&self, name: impl Into<String>, f: F) -> HandlerId
    where
        F: Fn(Arc<ShareEvent>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
    {
        self.dispatcher.register(handler_fn(name, f))
    }

    /// Process one line using the current time.
    pub fn process_line(&self, raw: &str) -> ProcessOutcome {
        self.process_line_at(raw, Instant::now())
    }

    /// Process one line as if it arrived at `now`.
    pub fn process_line_at(&self, raw: &str, now: Instant) -> ProcessOutcome {
        let outcome = self.run(raw, now);
        self.counters.record(&outcome);
        outcome
    }

    fn run(&self, raw: &str, now: Instant) -> ProcessOutcome {
        if !self.enabled {
            return ProcessOutcome::Disabled;
        }

        let Some(payload) = self.scanner.scan(raw) else {
            tracing::trace!("line has no share marker");
            return ProcessOutcome::SkippedNoMatch;
        };

        let decoded = match decode(payload) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(reason = %e.reason, payload = %e.excerpt, "dropping malformed share payload");
                return ProcessOutcome::SkippedDecodeError(e);
            }
        };

        let item = match normalize(&decoded, self.limits) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(field = e.field(), error = %e, "dropping invalid share payload");
                return ProcessOutcome::SkippedValidationError(e);
            }
        };

        if let CooldownDecision::Rejected { remaining } = self.gate.check(&item.player, now) {
            tracing::info!(
                player = %item.player,
                item = %item.name,
                remaining_secs = remaining.as_secs_f64(),
                "share skipped: player on cooldown"
            );
            return ProcessOutcome::SkippedCooldown {
                player: item.player,
                remaining,
            };
        }

        let event = Arc::new(ShareEvent {
            player: item.player.clone(),
            item,
            source: self.source_tag.clone(),
            received_at: chrono::Utc::now(),
            enhanced_embeds: self.enhanced_embeds,
        });
        let handlers = self.dispatcher.dispatch(event.clone());
        tracing::info!(
            player = %event.player,
            item = %event.item.name,
            rarity = %event.item.rarity,
            handlers,
            "share dispatched"
        );
        ProcessOutcome::Dispatched(event)
    }

    /// Wait for every handler task started so far.
    pub async fn wait_idle(&self) {
        self.dispatcher.wait_idle().await;
    }

    pub fn stats(&self) -> MonitorStats {
        self.counters.snapshot()
    }

    pub fn cooldown(&self) -> &CooldownGate {
        &self.gate
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
