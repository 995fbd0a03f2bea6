//! Core types for rpgshare-core.
//!
//! This module defines the data structures shared across the pipeline
//! stages: the decoded [`SharePayload`], the validated [`NormalizedItem`], the
//! [`ShareEvent`] handed to consumers, and the [`Rarity`] table.

use serde::{Deserialize, Serialize};

/// Color used for rarities that are not in the table.
pub const DEFAULT_DISPLAY_COLOR: u32 = 0x808080;

/// Rarity name → tier. Keys are lowercase; lookups must lowercase first.
static RARITIES: phf::Map<&'static str, Rarity> = phf::phf_map! {
    "legendary" => Rarity::Legendary,
    "epic" => Rarity::Epic,
    "rare" => Rarity::Rare,
    "uncommon" => Rarity::Uncommon,
    "common" => Rarity::Common,
};

/// The shared-item payload as decoded from JSON, before validation.
///
/// Every field is optional so the normalizer can name exactly which required
/// field is missing. Unknown keys are ignored by serde.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SharePayload {
    pub name: Option<String>,
    pub rarity: Option<String>,
    /// Integer-valued, but JSON producers may emit `480.0`.
    pub quality: Option<f64>,
    pub tier: Option<f64>,
    pub class: Option<String>,
    pub manufacturer: Option<String>,
    pub element: Option<String>,
    pub damage: Option<f64>,
    /// Fraction in `[0, 1]`, not a percentage.
    pub crit: Option<f64>,
    pub mods: Option<f64>,
    pub affixes: Option<Vec<String>>,
    pub parts: Option<Vec<String>>,
    pub player: Option<String>,
}

/// Known rarity tiers. Anything else is carried through as text and rendered
/// with [`DEFAULT_DISPLAY_COLOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Legendary,
    Epic,
    Rare,
    Uncommon,
    Common,
}

impl Rarity {
    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Rarity> {
        RARITIES.get(name.trim().to_lowercase().as_str()).copied()
    }

    /// RGB display color for embeds.
    pub fn color(self) -> u32 {
        match self {
            Rarity::Legendary => 0xFF8000,
            Rarity::Epic => 0xA335EE,
            Rarity::Rare => 0x0070DD,
            Rarity::Uncommon => 0x1EFF00,
            Rarity::Common => 0x9D9D9D,
        }
    }

    /// Display color for an arbitrary rarity string, falling back to the
    /// default entry.
    pub fn color_for(name: &str) -> u32 {
        Rarity::from_name(name)
            .map(Rarity::color)
            .unwrap_or(DEFAULT_DISPLAY_COLOR)
    }
}

/// A validated, display-ready item record produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedItem {
    pub name: String,
    /// Rarity exactly as sent by the game, e.g. `"Legendary"`.
    pub rarity: String,
    pub quality: u32,
    pub tier: u32,
    /// Item category as sent, e.g. `"Rifle"`.
    pub class: String,
    /// `class` lower-cased, for display.
    #[serde(rename = "type")]
    pub item_type: String,
    pub manufacturer: String,
    pub element: String,
    pub damage: f64,
    /// Critical-hit chance as a fraction (`0.21` means 21%).
    pub crit_chance: f64,
    pub mod_count: u32,
    pub affixes: Vec<String>,
    pub parts: Vec<String>,
    pub player: String,
    pub display_color: u32,
    pub affixes_shown: Vec<String>,
    pub affixes_overflow: usize,
    pub parts_shown: Vec<String>,
    pub parts_overflow: usize,
}

/// The unit handed to every registered consumer. Immutable once built;
/// consumers receive it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareEvent {
    pub player: String,
    pub item: NormalizedItem,
    /// Tag identifying the detector that produced the event.
    pub source: String,
    pub received_at: chrono::DateTime<chrono::Utc>,
    /// Rendering hint from config; the core never interprets it.
    pub enhanced_embeds: bool,
}
