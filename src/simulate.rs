//! Demo session — replays a short multiplayer sharing session through a
//! [`Monitor`] without a game server attached.
//!
//! Three players share weapons; two of the five shares land inside their
//! player's cooldown window and are skipped.

use std::time::Duration;

use rpgshare_core::{Monitor, ProcessOutcome};
use serde_json::{json, Value};

/// Weapons the demo players can share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWeapon {
    Rifle,
    Pistol,
    Shotgun,
}

/// One scripted share attempt.
#[derive(Debug, Clone, Copy)]
pub struct SessionStep {
    pub player: &'static str,
    pub weapon: SampleWeapon,
    pub comment: &'static str,
}

pub const DEMO_SESSION: &[SessionStep] = &[
    SessionStep { player: "Player1", weapon: SampleWeapon::Rifle, comment: "Found an awesome legendary rifle!" },
    SessionStep { player: "Player2", weapon: SampleWeapon::Pistol, comment: "This revolver is sick!" },
    SessionStep { player: "Player1", weapon: SampleWeapon::Shotgun, comment: "Just got this from a boss!" },
    SessionStep { player: "Player3", weapon: SampleWeapon::Rifle, comment: "My first legendary weapon!" },
    SessionStep { player: "Player2", weapon: SampleWeapon::Shotgun, comment: "Another epic drop!" },
];

/// Payload the game mod would emit for `weapon` shared by `player`.
pub fn sample_payload(player: &str, weapon: SampleWeapon) -> Value {
    let mut payload = match weapon {
        SampleWeapon::Rifle => json!({
            "name": "Pearlescent_Vladof_AK47_T5Q480",
            "rarity": "Legendary",
            "quality": 480,
            "tier": 5,
            "class": "rifle",
            "manufacturer": "Vladof",
            "element": "electric",
            "damage": 142.6,
            "crit": 0.21,
            "mods": 4,
            "affixes": [
                "Brutal +32% damage",
                "Keen +6% crit chance",
                "Shocking +15% electric damage",
                "Rapid +10% fire rate",
                "Piercing +20% armor penetration"
            ],
            "parts": [
                "Heavy Barrel (Advanced)",
                "Drum Magazine (Master)",
                "Electric Sight (Epic)",
                "Tactical Stock (Rare)"
            ]
        }),
        SampleWeapon::Pistol => json!({
            "name": "Crimson_Torgue_Revolver_T3Q320",
            "rarity": "Epic",
            "quality": 320,
            "tier": 3,
            "class": "pistol",
            "manufacturer": "Torgue",
            "element": "fire",
            "damage": 89.2,
            "crit": 0.35,
            "mods": 2,
            "affixes": ["Incendiary +25% fire damage", "Critical +15% crit damage"],
            "parts": ["Long Barrel (Rare)", "Speed Loader (Advanced)"]
        }),
        SampleWeapon::Shotgun => json!({
            "name": "Devastating_Jakobs_Shotgun_T4Q400",
            "rarity": "Epic",
            "quality": 400,
            "tier": 4,
            "class": "shotgun",
            "manufacturer": "Jakobs",
            "element": "none",
            "damage": 256.8,
            "crit": 0.18,
            "mods": 3,
            "affixes": [
                "Devastating +40% damage",
                "Wide Spread +3 pellets",
                "Knockback +50% knockback"
            ],
            "parts": [
                "Sawed-off Barrel (Master)",
                "Shell Holder (Advanced)",
                "Wooden Stock (Vintage)"
            ]
        }),
    };
    payload["player"] = Value::String(player.to_string());
    payload
}

/// The log line the game would write for this payload.
pub fn share_line(marker: &str, payload: &Value) -> String {
    format!("{marker} {payload}")
}

/// Run [`DEMO_SESSION`] through `monitor`, pausing `delay` between steps.
/// Returns each step's outcome in order.
pub async fn run_session(monitor: &Monitor, marker: &str, delay: Duration) -> Vec<ProcessOutcome> {
    let mut outcomes = Vec::with_capacity(DEMO_SESSION.len());
    for (i, step) in DEMO_SESSION.iter().enumerate() {
        let line = share_line(marker, &sample_payload(step.player, step.weapon));
        tracing::info!(event = i + 1, player = step.player, comment = step.comment, "simulated share");
        outcomes.push(monitor.process_line(&line));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    monitor.wait_idle().await;
    outcomes
}
