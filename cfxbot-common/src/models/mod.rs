pub mod cfx;
pub mod discord;

pub use cfx::{PlayerRecord, ServerRecord};
pub use discord::{DiscordColor, DiscordEmbed, DiscordEmbedField};
