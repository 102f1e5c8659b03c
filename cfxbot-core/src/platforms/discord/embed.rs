// File: cfxbot-core/src/platforms/discord/embed.rs

use twilight_model::channel::message::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};

use cfxbot_common::models::DiscordEmbed;

use crate::Error;

/// Build a twilight embed, validating it against Discord's embed limits.
pub fn to_twilight_embed(embed: &DiscordEmbed) -> Result<Embed, Error> {
    let mut builder = EmbedBuilder::new();
    if let Some(title) = &embed.title {
        builder = builder.title(title.as_str());
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description.as_str());
    }
    if let Some(color) = embed.color {
        builder = builder.color(color.0);
    }
    for field in &embed.fields {
        let mut f = EmbedFieldBuilder::new(field.name.as_str(), field.value.as_str());
        if field.inline {
            f = f.inline();
        }
        builder = builder.field(f);
    }

    builder
        .validate()
        .map(EmbedBuilder::build)
        .map_err(|e| Error::Embed(e.to_string()))
}

pub fn to_twilight_embeds(embeds: &[DiscordEmbed]) -> Result<Vec<Embed>, Error> {
    embeds.iter().map(to_twilight_embed).collect()
}
