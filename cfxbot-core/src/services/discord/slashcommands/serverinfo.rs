// File: cfxbot-core/src/services/discord/slashcommands/serverinfo.rs

use async_trait::async_trait;
use tracing::{error, info, warn};
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::{application_command::CommandOptionValue, Interaction, InteractionData},
    },
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_http::client::InteractionClient;
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use cfxbot_common::models::DiscordEmbed;

use crate::platforms::cfx::CfxClient;
use crate::platforms::discord::embed::to_twilight_embeds;
use crate::services::discord::slashcommands::{InteractionContext, SlashCommand};
use crate::services::server_info::{failure_message, render_server};
use crate::Error;

pub const SERVERINFO_COMMAND: &str = "serverinfo";
pub const CFX_CODE_OPTION: &str = "cfxcode";

/// Result of one `/serverinfo` lookup, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerInfoReply {
    /// Server embed, optionally followed by the player embed.
    Embeds(Vec<DiscordEmbed>),
    /// Ephemeral failure text.
    Failure(String),
}

/// `/serverinfo cfxcode:<code>`: look a FiveM server up in the cfx.re directory.
pub struct ServerInfoCommand {
    cfx: CfxClient,
}

impl ServerInfoCommand {
    pub fn new(cfx: CfxClient) -> Self {
        Self { cfx }
    }

    pub fn create_command() -> CommandBuilder {
        CommandBuilder::new(
            SERVERINFO_COMMAND,
            "Fetches information about a FiveM server using its cfx.re code.",
            CommandType::ChatInput,
        )
        .option(
            StringBuilder::new(CFX_CODE_OPTION, "The cfx.re code of the FiveM server.")
                .required(true),
        )
    }

    /// Look `code` up and turn the outcome into a reply. Never fails: every error,
    /// including embeds Discord would reject, becomes [`ServerInfoReply::Failure`].
    pub async fn respond(&self, code: &str) -> ServerInfoReply {
        match self.lookup(code).await {
            Ok(embeds) => ServerInfoReply::Embeds(embeds),
            Err(e) => {
                error!("Error fetching server information for '{code}': {e}");
                ServerInfoReply::Failure(failure_message(&e))
            }
        }
    }

    async fn lookup(&self, code: &str) -> Result<Vec<DiscordEmbed>, Error> {
        let record = self.cfx.fetch_server(code).await?;
        let embeds = render_server(&record);
        to_twilight_embeds(&embeds)?;
        Ok(embeds)
    }
}

async fn send_embeds(
    client: &InteractionClient<'_>,
    token: &str,
    embeds: &[DiscordEmbed],
) -> Result<(), Error> {
    let embeds = to_twilight_embeds(embeds)?;
    client
        .update_response(token)
        .embeds(Some(&embeds))
        .await
        .map_err(|e| Error::Platform(format!("Error responding to `/serverinfo`: {e}")))?;
    Ok(())
}

/// A deferred public reply can't become ephemeral, so it is deleted and the failure
/// goes out as an ephemeral follow-up.
async fn send_failure(client: &InteractionClient<'_>, token: &str, text: &str) -> Result<(), Error> {
    if let Err(e) = client.delete_response(token).await {
        warn!("Could not delete deferred `/serverinfo` reply: {e}");
    }
    client
        .create_followup(token)
        .content(text)
        .flags(MessageFlags::EPHEMERAL)
        .await
        .map_err(|e| Error::Platform(format!("Error reporting `/serverinfo` failure: {e}")))?;
    Ok(())
}

fn cfx_code(interaction: &Interaction) -> Result<String, Error> {
    let Some(InteractionData::ApplicationCommand(data)) = &interaction.data else {
        return Err(Error::Parse("interaction carries no command data".into()));
    };

    data.options
        .iter()
        .find(|opt| opt.name == CFX_CODE_OPTION)
        .and_then(|opt| match &opt.value {
            CommandOptionValue::String(code) => Some(code.clone()),
            _ => None,
        })
        .ok_or_else(|| Error::Parse(format!("missing `{CFX_CODE_OPTION}` option")))
}

#[async_trait]
impl SlashCommand for ServerInfoCommand {
    fn name(&self) -> &str {
        SERVERINFO_COMMAND
    }

    fn definition(&self) -> Command {
        Self::create_command().build()
    }

    async fn execute(&self, ctx: &InteractionContext, interaction: &Interaction) -> Result<(), Error> {
        let code = cfx_code(interaction)?;
        info!(
            "/serverinfo '{code}' requested by {:?}",
            interaction.author_id()
        );

        let client = ctx.http.interaction(ctx.application_id);
        client
            .create_response(
                interaction.id,
                &interaction.token,
                &InteractionResponse {
                    kind: InteractionResponseType::DeferredChannelMessageWithSource,
                    data: None,
                },
            )
            .await
            .map_err(|e| Error::Platform(format!("Error deferring `/serverinfo`: {e}")))?;

        let token = interaction.token.as_str();
        let sent = match self.respond(&code).await {
            ServerInfoReply::Embeds(embeds) => send_embeds(&client, token, &embeds).await,
            ServerInfoReply::Failure(text) => return send_failure(&client, token, &text).await,
        };

        if let Err(e) = sent {
            error!("Error sending `/serverinfo` embeds for '{code}': {e}");
            send_failure(&client, token, &failure_message(&e)).await?;
        }

        Ok(())
    }
}
