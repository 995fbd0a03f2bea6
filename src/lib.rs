//! rpgshare — item-share log monitor.
//!
//! Watches log lines from a game process for `[RPGShare] {json}` entries,
//! normalizes the shared item, rate-limits per player and hands the result to
//! registered consumers. The pipeline itself lives in [`rpgshare_core`]; this
//! crate adds the pieces the binary wires around it so that integration
//! tests and benches can import them directly.
//!
//! # Architecture
//!
//! ```text
//! feed ──► Monitor::process_line ──► Dispatcher ──► handlers (console embed, JSON lines, …)
//! ```

pub mod feed;
pub mod handlers;
pub mod simulate;

pub use rpgshare_core::*;
