//! Shared test utilities for rpgshare integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Timing-sensitive helpers are deterministic under
//! `tokio::time::pause()`.

pub mod assertions;
pub mod builders;
pub mod fake_process;
pub mod fixtures;
pub mod recorder;

pub use assertions::*;
pub use builders::*;
pub use fake_process::*;
pub use fixtures::*;
pub use recorder::*;
