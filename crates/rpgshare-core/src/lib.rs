//! rpgshare-core — item-share log monitor.
//!
//! This crate exposes each pipeline stage as a public module, plus the shared
//! types that flow between them.
//!
//! # Architecture
//!
//! ```text
//! line ──► scanner ──► decoder ──► normalizer ──► cooldown ──► dispatcher ──► handlers
//!                                                                  │
//!                                                                  └──► (spawned tasks)
//! ```
//!
//! [`Monitor`] wires the stages together behind a single
//! [`Monitor::process_line`] entry point. Everything up to the cooldown gate
//! runs inline on the caller; handlers run on background tasks.

pub mod config;
pub mod cooldown;
pub mod decoder;
pub mod dispatcher;
pub mod error;
pub mod monitor;
pub mod normalizer;
pub mod scanner;
pub mod types;

pub use config::{Config, ItemSharingConfig};
pub use cooldown::{CooldownDecision, CooldownGate};
pub use dispatcher::{handler_fn, BoxedHandler, Dispatcher, HandlerId, ShareHandler};
pub use error::{ConfigError, DecodeError, HandlerError, ValidationError};
pub use monitor::{Monitor, MonitorStats, ProcessOutcome};
pub use normalizer::DisplayLimits;
pub use types::{NormalizedItem, Rarity, ShareEvent, SharePayload};
