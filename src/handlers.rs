//! Share handlers shipped with the binary.
//!
//! - [`ConsoleEmbedHandler`] renders an embed-style text block, the way a chat
//!   bot would lay the item out.
//! - [`JsonLinesHandler`] writes each event as one JSON object per line for a
//!   downstream bot to pick up.

use std::io::Write;
use std::sync::{Arc, Mutex};

use rpgshare_core::dispatcher::HandlerFuture;
use rpgshare_core::{HandlerError, NormalizedItem, ShareEvent, ShareHandler};

const RULE: &str = "============================================================";

// ---------------------------------------------------------------------------
// Console embed
// ---------------------------------------------------------------------------

pub struct ConsoleEmbedHandler<W> {
    out: Arc<Mutex<W>>,
}

impl ConsoleEmbedHandler<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(Arc::new(Mutex::new(std::io::stdout())))
    }
}

impl<W: Write + Send + 'static> ConsoleEmbedHandler<W> {
    pub fn with_writer(out: Arc<Mutex<W>>) -> Self {
        Self { out }
    }
}

impl<W: Write + Send + 'static> ShareHandler for ConsoleEmbedHandler<W> {
    fn name(&self) -> &str {
        "console-embed"
    }

    fn handle(&self, event: Arc<ShareEvent>) -> HandlerFuture {
        let text = if event.enhanced_embeds {
            render_embed(&event)
        } else {
            render_compact(&event)
        };
        Box::pin(write_blocking(self.out.clone(), text.into_bytes()))
    }
}

/// Full embed: header, stat grid, capped affix and part lists.
pub fn render_embed(event: &ShareEvent) -> String {
    let item = &event.item;
    let mut s = String::new();
    s.push_str(RULE);
    s.push('\n');
    s.push_str(&format!("WEAPON: {}  [#{:06X}]\n", item.name, item.display_color));
    s.push_str(&format!(
        "PLAYER: {} shared their {} {}!\n\n",
        event.player,
        item.rarity.to_lowercase(),
        item.item_type
    ));
    s.push_str(&format!(
        "Quality: {:<8} Manufacturer: {:<10} Damage: {:.1}\n",
        item.quality, item.manufacturer, item.damage
    ));
    s.push_str(&format!(
        "Tier: {:<11} Element: {:<15} Crit: {:.1}%\n",
        item.tier,
        title_case(&item.element),
        item.crit_chance * 100.0
    ));
    s.push_str(&format!(
        "Class: {:<10} Mods: {:<18} Rarity: {}\n",
        title_case(&item.item_type),
        item.mod_count,
        item.rarity
    ));
    push_list(&mut s, "Affixes", &item.affixes_shown, item.affixes_overflow);
    push_list(&mut s, "Parts", &item.parts_shown, item.parts_overflow);
    s.push_str(&format!("\nshared via {} at {}\n", event.source, event.received_at.format("%H:%M:%S")));
    s.push_str(RULE);
    s.push('\n');
    s
}

/// One-line summary used when enhanced embeds are turned off.
pub fn render_compact(event: &ShareEvent) -> String {
    let item: &NormalizedItem = &event.item;
    format!(
        "{} shared {} ({} {}, Q{} T{}, {:.1} dmg)\n",
        event.player, item.name, item.rarity, item.item_type, item.quality, item.tier, item.damage
    )
}

fn push_list(s: &mut String, title: &str, shown: &[String], overflow: usize) {
    if shown.is_empty() {
        return;
    }
    s.push_str(&format!("\n{title}:\n"));
    for entry in shown {
        s.push_str(&format!("  - {entry}\n"));
    }
    if overflow > 0 {
        s.push_str(&format!("  *...and {overflow} more*\n"));
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Write and flush `bytes` on the blocking pool; the writer may be a pipe
/// that stalls.
async fn write_blocking<W>(out: Arc<Mutex<W>>, bytes: Vec<u8>) -> Result<(), HandlerError>
where
    W: Write + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut out = out
            .lock()
            .map_err(|_| HandlerError::msg("output writer lock poisoned"))?;
        out.write_all(&bytes)
            .and_then(|()| out.flush())
            .map_err(|e| HandlerError::Other(e.into()))
    })
    .await
    .map_err(|e| HandlerError::Other(e.into()))?
}

// ---------------------------------------------------------------------------
// JSON lines
// ---------------------------------------------------------------------------

pub struct JsonLinesHandler<W> {
    out: Arc<Mutex<W>>,
}

impl JsonLinesHandler<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(Arc::new(Mutex::new(std::io::stdout())))
    }
}

impl<W: Write + Send + 'static> JsonLinesHandler<W> {
    pub fn with_writer(out: Arc<Mutex<W>>) -> Self {
        Self { out }
    }
}

impl<W: Write + Send + 'static> ShareHandler for JsonLinesHandler<W> {
    fn name(&self) -> &str {
        "json-lines"
    }

    fn handle(&self, event: Arc<ShareEvent>) -> HandlerFuture {
        let out = self.out.clone();
        Box::pin(async move {
            let mut line = serde_json::to_vec(event.as_ref()).map_err(anyhow::Error::from)?;
            line.push(b'\n');
            write_blocking(out, line).await
        })
    }
}
