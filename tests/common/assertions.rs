//! Domain-specific assertion macros for rpgshare harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! pipeline stage produced an unexpected outcome.

/// Assert that an outcome is `Dispatched` and evaluate to the event.
///
/// ```rust
/// let event = assert_dispatched!(monitor.process_line(&line));
/// assert_eq!(event.player, "P1");
/// ```
#[macro_export]
macro_rules! assert_dispatched {
    ($outcome:expr) => {{
        match $outcome {
            rpgshare::ProcessOutcome::Dispatched(event) => event,
            other => panic!(
                "assert_dispatched! failed: expected Dispatched\n  actual: {:?}",
                other
            ),
        }
    }};
}

/// Assert that an outcome is a cooldown skip for `player`, evaluating to the
/// remaining time.
#[macro_export]
macro_rules! assert_cooldown {
    ($outcome:expr, $player:expr) => {{
        match $outcome {
            rpgshare::ProcessOutcome::SkippedCooldown { player, remaining } => {
                assert_eq!(player, $player, "cooldown skip for unexpected player");
                remaining
            }
            other => panic!(
                "assert_cooldown! failed: expected SkippedCooldown for {:?}\n  actual: {:?}",
                $player, other
            ),
        }
    }};
}

/// Assert that an outcome is a validation failure naming `field`.
#[macro_export]
macro_rules! assert_invalid_field {
    ($outcome:expr, $field:expr) => {{
        match $outcome {
            rpgshare::ProcessOutcome::SkippedValidationError(err) => {
                assert_eq!(err.field(), $field, "validation failed on unexpected field: {err}");
            }
            other => panic!(
                "assert_invalid_field! failed: expected SkippedValidationError({:?})\n  actual: {:?}",
                $field, other
            ),
        }
    }};
}

/// Assert that an outcome is a decode failure.
#[macro_export]
macro_rules! assert_decode_error {
    ($outcome:expr) => {{
        match $outcome {
            rpgshare::ProcessOutcome::SkippedDecodeError(err) => err,
            other => panic!(
                "assert_decode_error! failed: expected SkippedDecodeError\n  actual: {:?}",
                other
            ),
        }
    }};
}
