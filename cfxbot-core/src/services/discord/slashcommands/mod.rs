// File: cfxbot-core/src/services/discord/slashcommands/mod.rs

pub mod serverinfo;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};
use twilight_http::Client as HttpClient;
use twilight_model::{
    application::{
        command::Command,
        interaction::{Interaction, InteractionData},
    },
    channel::message::MessageFlags,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::marker::ApplicationMarker,
    id::Id,
};

use crate::Error;

pub use serverinfo::{ServerInfoCommand, ServerInfoReply};

/// Sent when a command handler fails outright.
pub const INTERACTION_FAILED: &str = "There was an error while handling this interaction!";

/// What a handler needs to answer an interaction.
#[derive(Clone)]
pub struct InteractionContext {
    pub http: Arc<HttpClient>,
    pub application_id: Id<ApplicationMarker>,
}

#[async_trait]
pub trait SlashCommand: Send + Sync {
    /// Name users invoke. Select menus owned by the command use it as their `custom_id`.
    fn name(&self) -> &str;

    /// The definition registered with Discord.
    fn definition(&self) -> Command;

    async fn execute(&self, ctx: &InteractionContext, interaction: &Interaction) -> Result<(), Error>;

    /// Select-menu interactions whose `custom_id` equals [`SlashCommand::name`].
    ///
    /// Commands without menus fail, so the user gets the generic error reply.
    async fn select_menu(&self, _ctx: &InteractionContext, _interaction: &Interaction) -> Result<(), Error> {
        Err(Error::Platform(format!("`{}` has no select menu", self.name())))
    }
}

/// Which handler of a command an interaction goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionRoute {
    Command,
    SelectMenu,
}

/// Commands known to this bot, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn SlashCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Arc<dyn SlashCommand>) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            debug!("CommandRegistry: replaced existing command '{name}'");
        }
        info!("Loaded command: {name}");
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SlashCommand>> {
        self.commands.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Definitions of every registered command, sorted by name.
    pub fn definitions(&self) -> Vec<Command> {
        let mut defs: Vec<Command> = self.commands.values().map(|c| c.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Bulk-overwrite the application's global commands with this registry.
    pub async fn register_global(
        &self,
        http: &HttpClient,
        application_id: Id<ApplicationMarker>,
    ) -> Result<(), Error> {
        let commands = self.definitions();
        http.interaction(application_id)
            .set_global_commands(&commands)
            .await
            .map_err(|e| Error::Platform(format!("Failed to register global slash commands: {e}")))?;

        info!("Successfully registered {} application commands globally.", commands.len());
        Ok(())
    }

    /// Find the command an interaction belongs to: slash commands by name, select
    /// menus by `custom_id`. `None` for anything unknown.
    pub fn route(&self, interaction: &Interaction) -> Option<(InteractionRoute, Arc<dyn SlashCommand>)> {
        let (route, key) = match &interaction.data {
            Some(InteractionData::ApplicationCommand(data)) => (InteractionRoute::Command, data.name.as_str()),
            Some(InteractionData::MessageComponent(data)) => {
                (InteractionRoute::SelectMenu, data.custom_id.as_str())
            }
            _ => return None,
        };

        match self.get(key) {
            Some(cmd) => Some((route, cmd)),
            None => {
                debug!("Ignoring interaction for unknown command '{key}'");
                None
            }
        }
    }

    /// Run the routed handler. Unknown interactions are ignored; handler errors are
    /// logged and answered with a generic ephemeral message.
    pub async fn dispatch(&self, ctx: &InteractionContext, interaction: &Interaction) {
        let Some((route, cmd)) = self.route(interaction) else {
            return;
        };

        debug!("Dispatching {route:?} for '{}' (interaction {})", cmd.name(), interaction.id);
        let outcome = match route {
            InteractionRoute::Command => cmd.execute(ctx, interaction).await,
            InteractionRoute::SelectMenu => cmd.select_menu(ctx, interaction).await,
        };

        if let Err(e) = outcome {
            error!("Error handling interaction: {e:?}");
            reply_generic_failure(ctx, interaction).await;
        }
    }
}

async fn reply_generic_failure(ctx: &InteractionContext, interaction: &Interaction) {
    let client = ctx.http.interaction(ctx.application_id);
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(InteractionResponseData {
            content: Some(INTERACTION_FAILED.to_string()),
            flags: Some(MessageFlags::EPHEMERAL),
            ..Default::default()
        }),
    };

    if client
        .create_response(interaction.id, &interaction.token, &response)
        .await
        .is_ok()
    {
        return;
    }

    // Already acknowledged (e.g. deferred), so only a follow-up is possible.
    if let Err(e) = client
        .create_followup(&interaction.token)
        .content(INTERACTION_FAILED)
        .flags(MessageFlags::EPHEMERAL)
        .await
    {
        error!("Failed to report interaction error to user: {e}");
    }
}
