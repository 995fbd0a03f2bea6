//! Cooldown gate — per-player rate limit on accepted shares.
//!
//! The gate owns the only copy of the player → last-accepted map. The
//! read-then-write for a decision happens under one lock acquisition, so two
//! concurrent shares from the same player can't both be accepted.
//!
//! Time is [`tokio::time::Instant`] so tests can drive it with
//! `tokio::time::pause()` / `advance()`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Default cap on the number of players tracked at once.
pub const DEFAULT_MAX_TRACKED_PLAYERS: usize = 10_000;

/// Result of asking the gate whether a share may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    Accepted,
    Rejected { remaining: Duration },
}

impl CooldownDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CooldownDecision::Accepted)
    }
}

#[derive(Debug)]
pub struct CooldownGate {
    threshold: Duration,
    max_tracked: usize,
    last_accepted: Mutex<HashMap<String, Instant>>,
}

impl CooldownGate {
    /// A zero `threshold` disables the cooldown entirely.
    pub fn new(threshold: Duration) -> Self {
        Self::with_capacity(threshold, DEFAULT_MAX_TRACKED_PLAYERS)
    }

    pub fn with_capacity(threshold: Duration, max_tracked: usize) -> Self {
        Self {
            threshold,
            max_tracked: max_tracked.max(1),
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Decide whether `player` may share at `now`. Accepting records `now` as
    /// the player's last share; rejecting leaves the state untouched.
    pub fn check(&self, player: &str, now: Instant) -> CooldownDecision {
        if self.threshold.is_zero() {
            return CooldownDecision::Accepted;
        }

        let mut map = self
            .last_accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(&last) = map.get(player) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.threshold {
                return CooldownDecision::Rejected {
                    remaining: self.threshold - elapsed,
                };
            }
        } else if map.len() >= self.max_tracked {
            self.make_room(&mut map, now);
        }

        map.insert(player.to_string(), now);
        CooldownDecision::Accepted
    }

    /// Time left on `player`'s cooldown at `now`, without changing state.
    pub fn remaining(&self, player: &str, now: Instant) -> Option<Duration> {
        let map = self
            .last_accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let last = *map.get(player)?;
        self.threshold
            .checked_sub(now.saturating_duration_since(last))
            .filter(|d| !d.is_zero())
    }

    /// Number of players currently tracked.
    pub fn tracked(&self) -> usize {
        self.last_accepted
            .lock()
            .map(|map| map.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    /// Drop expired entries. An expired entry and an absent one both accept,
    /// so this never changes a decision.
    pub fn prune_expired(&self, now: Instant) -> usize {
        let mut map = self
            .last_accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.prune_locked(&mut map, now)
    }

    fn prune_locked(&self, map: &mut HashMap<String, Instant>, now: Instant) -> usize {
        let before = map.len();
        map.retain(|_, last| now.saturating_duration_since(*last) < self.threshold);
        before - map.len()
    }

    fn make_room(&self, map: &mut HashMap<String, Instant>, now: Instant) {
        let pruned = self.prune_locked(map, now);
        if pruned > 0 {
            tracing::debug!(pruned, "pruned expired cooldown entries");
        }
        while map.len() >= self.max_tracked {
            let Some(oldest) = map
                .iter()
                .min_by_key(|(_, last)| **last)
                .map(|(player, _)| player.clone())
            else {
                break;
            };
            map.remove(&oldest);
            tracing::debug!(player = %oldest, "evicted cooldown entry early: player cap reached");
        }
    }
}
