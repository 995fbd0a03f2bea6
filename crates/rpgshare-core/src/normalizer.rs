//! Item normalizer — validates a [`SharePayload`] into a [`NormalizedItem`].
//!
//! Pure and deterministic: the same payload and limits always produce the same
//! item. Absent fields are reported, never defaulted, so a missing `damage`
//! can't masquerade as `0`.

use crate::error::ValidationError;
use crate::types::{NormalizedItem, Rarity, SharePayload};

/// How many affixes and parts a consumer should render before collapsing the
/// rest into an overflow count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub max_affixes: usize,
    pub max_parts: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            max_affixes: 3,
            max_parts: 3,
        }
    }
}

/// Validate `payload` and derive its display attributes.
pub fn normalize(
    payload: &SharePayload,
    limits: DisplayLimits,
) -> Result<NormalizedItem, ValidationError> {
    let player = non_empty("player", &payload.player)?;
    let name = non_empty("name", &payload.name)?;
    let rarity = text("rarity", &payload.rarity)?;
    let class = text("class", &payload.class)?;
    let manufacturer = text("manufacturer", &payload.manufacturer)?;
    let element = text("element", &payload.element)?;

    let quality = whole("quality", payload.quality)?;
    let tier = whole("tier", payload.tier)?;
    let mod_count = whole("mods", payload.mods)?;

    let damage = required("damage", payload.damage)?;
    if !damage.is_finite() || damage < 0.0 {
        return Err(invalid("damage", format!("{damage} is not a non-negative number")));
    }
    let crit_chance = required("crit", payload.crit)?;
    if !(0.0..=1.0).contains(&crit_chance) {
        return Err(invalid("crit", format!("{crit_chance} is outside [0, 1]")));
    }

    let affixes = required("affixes", payload.affixes.clone())?;
    let parts = required("parts", payload.parts.clone())?;
    let (affixes_shown, affixes_overflow) = cap(&affixes, limits.max_affixes);
    let (parts_shown, parts_overflow) = cap(&parts, limits.max_parts);

    Ok(NormalizedItem {
        display_color: Rarity::color_for(&rarity),
        item_type: class.to_lowercase(),
        name,
        rarity,
        quality,
        tier,
        class,
        manufacturer,
        element,
        damage,
        crit_chance,
        mod_count,
        affixes,
        parts,
        player,
        affixes_shown,
        affixes_overflow,
        parts_shown,
        parts_overflow,
    })
}

/// First `limit` entries in original order, plus how many were left out.
pub fn cap(items: &[String], limit: usize) -> (Vec<String>, usize) {
    let shown = items.len().min(limit);
    (items[..shown].to_vec(), items.len() - shown)
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

fn text(field: &'static str, value: &Option<String>) -> Result<String, ValidationError> {
    required(field, value.clone())
}

fn non_empty(field: &'static str, value: &Option<String>) -> Result<String, ValidationError> {
    let value = text(field, value)?;
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(value)
}

fn whole(field: &'static str, value: Option<f64>) -> Result<u32, ValidationError> {
    let value = required(field, value)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(invalid(field, format!("{value} is not a non-negative integer")));
    }
    Ok(value as u32)
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::Invalid {
        field,
        reason: reason.into(),
    }
}
