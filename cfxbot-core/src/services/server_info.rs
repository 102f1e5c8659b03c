//! Rendering of cfx.re directory records into Discord embeds.
//!
//! The primary embed is driven by [`SERVER_FIELDS`]: one row per displayed field, each
//! with an extractor that returns `None` when the payload value is missing or has the
//! wrong shape. Every `None` renders as [`UNKNOWN`].

use cfxbot_common::models::cfx::{display_number, value_text};
use cfxbot_common::models::discord::MAX_EMBED_FIELDS;
use cfxbot_common::models::{DiscordColor, DiscordEmbed, DiscordEmbedField, PlayerRecord, ServerRecord};

use crate::Error;

pub const UNKNOWN: &str = "Unknown";

pub const SERVER_TITLE: &str = "FiveM Server Information";
pub const PLAYERS_TITLE: &str = "Players Online";

pub const FAILURE_LEAD: &str =
    "Failed to fetch server information. Please ensure the cfx.re code is correct and try again.";

type Extractor = fn(&ServerRecord) -> Option<String>;

/// Displayed fields of the primary embed, in display order.
pub const SERVER_FIELDS: [(&str, Extractor); 5] = [
    ("Max Slots", max_slots),
    ("Current Players", current_players),
    ("Connect End Points", connect_endpoints),
    ("Upvote Power", upvote_power),
    ("Owner Profile", owner_profile),
];

fn max_slots(rec: &ServerRecord) -> Option<String> {
    rec.max_slots.as_ref().map(display_number)
}

fn current_players(rec: &ServerRecord) -> Option<String> {
    match (&rec.current_clients, &rec.max_slots) {
        (Some(clients), Some(max)) => Some(format!(
            "{} / {}",
            display_number(clients),
            display_number(max)
        )),
        _ => None,
    }
}

fn connect_endpoints(rec: &ServerRecord) -> Option<String> {
    rec.connect_endpoints
        .as_ref()
        .filter(|eps| !eps.is_empty())
        .map(|eps| {
            eps.iter()
                .map(|ep| format!("- {}", value_text(ep)))
                .collect::<Vec<_>>()
                .join("\n")
        })
}

fn upvote_power(rec: &ServerRecord) -> Option<String> {
    rec.upvote_power.as_ref().map(display_number)
}

fn owner_profile(rec: &ServerRecord) -> Option<String> {
    rec.owner_profile
        .as_ref()
        .filter(|p| !p.trim().is_empty())
        .cloned()
}

pub fn server_embed(rec: &ServerRecord) -> DiscordEmbed {
    let mut embed = DiscordEmbed::new();
    embed.title = Some(SERVER_TITLE.to_string());
    embed.description = Some(format!(
        "Details for server: **{}**",
        rec.hostname_text()
    ));
    embed.color = Some(DiscordColor::GREEN);

    for (label, extract) in SERVER_FIELDS {
        embed.fields.push(DiscordEmbedField {
            name: label.to_string(),
            value: extract(rec).unwrap_or_else(|| UNKNOWN.to_string()),
            inline: false,
        });
    }
    embed
}

pub fn player_line(player: &PlayerRecord) -> String {
    let name = player.name.as_deref().unwrap_or(UNKNOWN);
    match &player.ping {
        Some(ping) => format!("{name} | {}ms", display_number(ping)),
        None => format!("{name} | {UNKNOWN}"),
    }
}

/// The player list embed, or `None` when nobody is online.
///
/// Only the first [`MAX_EMBED_FIELDS`] players are listed; anyone beyond that is
/// not shown.
// TODO: emit one embed per page of MAX_EMBED_FIELDS players once truncation is confirmed unintended.
pub fn players_embed(players: &[PlayerRecord]) -> Option<DiscordEmbed> {
    if players.is_empty() {
        return None;
    }

    let mut embed = DiscordEmbed::new();
    embed.title = Some(PLAYERS_TITLE.to_string());
    embed.color = Some(DiscordColor::ORANGE);
    embed.description = Some(
        players
            .iter()
            .take(MAX_EMBED_FIELDS)
            .map(player_line)
            .collect::<Vec<_>>()
            .join("\n"),
    );
    Some(embed)
}

/// Everything sent back for a successful lookup: the server embed, then the player
/// embed if anyone is online.
pub fn render_server(rec: &ServerRecord) -> Vec<DiscordEmbed> {
    let mut embeds = vec![server_embed(rec)];
    embeds.extend(players_embed(rec.online_players()));
    embeds
}

/// User-facing text for a failed lookup.
pub fn failure_message(err: &Error) -> String {
    let detail = match err {
        Error::HttpStatus(code) => format!("Server responded with status code: {code}"),
        Error::NoResponse(_) => "No response received from the server.".to_string(),
        other => format!("Error: {other}"),
    };
    format!("{FAILURE_LEAD}\n{detail}")
}
