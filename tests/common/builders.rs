//! Test builders — ergonomic constructors for share payloads, log lines and
//! monitors.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use rpgshare::{ItemSharingConfig, Monitor};
use serde_json::{json, Map, Value};

pub const MARKER: &str = "[RPGShare]";

// ---------------------------------------------------------------------------
// PayloadBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for share payload JSON, starting from a complete valid item.
///
/// # Example
///
/// ```rust
/// let line = PayloadBuilder::new("P1")
///     .set("rarity", "Mythical")
///     .affixes(&["A", "B", "C", "D"])
///     .line();
/// ```
pub struct PayloadBuilder {
    fields: Map<String, Value>,
}

impl PayloadBuilder {
    pub fn new(player: &str) -> Self {
        let Value::Object(fields) = json!({
            "name": "AK47",
            "rarity": "Legendary",
            "quality": 480,
            "tier": 5,
            "class": "rifle",
            "manufacturer": "Vladof",
            "element": "electric",
            "damage": 142.6,
            "crit": 0.21,
            "mods": 4,
            "affixes": ["A", "B", "C", "D"],
            "parts": ["X", "Y"],
            "player": player
        }) else {
            unreachable!()
        };
        Self { fields }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn affixes(self, affixes: &[&str]) -> Self {
        self.set("affixes", json!(affixes))
    }

    pub fn parts(self, parts: &[&str]) -> Self {
        self.set("parts", json!(parts))
    }

    pub fn json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }

    /// `[RPGShare] {json}` exactly as the game writes it.
    pub fn line(&self) -> String {
        format!("{MARKER} {}", self.json())
    }
}

/// A valid share line for `player`.
pub fn share_line(player: &str) -> String {
    PayloadBuilder::new(player).line()
}

// ---------------------------------------------------------------------------
// Monitor constructors
// ---------------------------------------------------------------------------

/// Default config with the given cooldown.
pub fn sharing_config(cooldown_seconds: f64) -> ItemSharingConfig {
    ItemSharingConfig {
        cooldown_seconds,
        ..ItemSharingConfig::default()
    }
}

pub fn monitor_with_cooldown(cooldown_seconds: f64) -> Monitor {
    Monitor::new(&sharing_config(cooldown_seconds)).expect("test config must be valid")
}
