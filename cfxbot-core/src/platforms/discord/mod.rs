pub mod embed;
pub mod runtime;

pub use runtime::DiscordPlatform;
