//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative lines from a
//! dedicated server log.

/// The AK47 share from the end-to-end scenario.
pub const AK47_LINE: &str = r#"[RPGShare] {"name":"AK47","rarity":"Legendary","quality":480,"tier":5,"class":"rifle","manufacturer":"Vladof","element":"electric","damage":142.6,"crit":0.21,"mods":4,"affixes":["A","B","C","D"],"parts":["X","Y"],"player":"P1"}"#;

/// Ordinary server chatter with no share marker.
pub const CORPUS_NOISE: &[&str] = &[
    "2024-01-15T10:00:00 12.345 INF Loading chunk 12,-4",
    "2024-01-15T10:00:01 12.901 INF [RPG Overhaul] === WEAPON INSPECTION ===",
    "2024-01-15T10:00:01 12.902 INF [RPG Overhaul] Pearlescent_Vladof_AK47_T5Q480 (Legendary)",
    "2024-01-15T10:00:02 13.100 WRN [RPG Overhaul] Share cooldown active. Wait 42 seconds",
    "2024-01-15T10:00:03 13.400 INF [RPG Overhaul] Shared AK47 to Discord!",
    "2024-01-15T10:00:04 14.000 ERR NullReferenceException: Object reference not set",
    "",
    r#"{"name":"AK47","player":"P1"}"#,
];

/// Lines that carry the marker but whose payload is not a JSON object.
pub const CORPUS_MALFORMED: &[&str] = &[
    "[RPGShare] {not valid",
    "[RPGShare]",
    "[RPGShare] ",
    r#"[RPGShare] {"name":"AK47","rarity":"#,
    "[RPGShare] [1,2,3]",
    "[RPGShare] null",
    r#"[RPGShare] {"name":"AK47"} }"#,
    r#"[RPGShare] {"damage":"high"}"#,
];

/// Unity player-log style: timestamp and level in front of the marker.
pub const UNITY_PREFIXED_SHARE: &str = r#"2024-01-15T10:00:05 15.222 INF [RPGShare] {"name":"Crimson_Torgue_Revolver_T3Q320","rarity":"Epic","quality":320,"tier":3,"class":"Pistol","manufacturer":"Torgue","element":"fire","damage":89.2,"crit":0.35,"mods":2,"affixes":["Incendiary +25% fire damage","Critical +15% crit damage"],"parts":["Long Barrel (Rare)","Speed Loader (Advanced)"],"player":"Player2","seed":991}"#;
