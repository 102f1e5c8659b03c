use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use twilight_gateway::{
    self as gateway,
    CloseFrame,
    Config,
    Event,
    EventTypeFlags,
    Intents,
    MessageSender,
    Shard,
    StreamExt,
};
use twilight_http::Client as HttpClient;
use twilight_http::client::ClientBuilder;
use twilight_model::gateway::payload::incoming::Ready as ReadyPayload;

use crate::Error;
use crate::platforms::{ConnectionStatus, PlatformAuth, PlatformIntegration};
use crate::services::discord::slashcommands::{CommandRegistry, InteractionContext};

/// Per-shard event loop:
///   - on READY, bulk-registers the registry's commands globally
///   - spawns one task per interaction so slow lookups never block the shard.
async fn shard_runner(mut shard: Shard, http: Arc<HttpClient>, registry: Arc<CommandRegistry>) {
    let shard_id = shard.id().number();
    info!("(ShardRunner) Shard {shard_id} started. Listening for events.");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        match item {
            Ok(Event::Ready(ready)) => {
                let data: &ReadyPayload = ready.as_ref();
                info!(
                    "Shard {shard_id} => READY as {} (ID={})",
                    data.user.name, data.user.id
                );
                // Every shard sees READY; registration is global, so one is enough.
                if shard_id == 0 {
                    if let Err(e) = registry.register_global(&http, data.application.id).await {
                        error!("Error registering application commands globally: {e}");
                    }
                }
            }
            Ok(Event::InteractionCreate(event)) => {
                let ctx = InteractionContext {
                    http: http.clone(),
                    application_id: event.application_id,
                };
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry.dispatch(&ctx, &event.0).await;
                });
            }
            Ok(other) => {
                trace!("Shard {shard_id} => unhandled event: {:?}", other.kind());
            }
            Err(err) => {
                error!("Shard {shard_id} => error receiving event: {err:?}");
            }
        }
    }

    warn!("(ShardRunner) Shard {shard_id} event loop ended.");
}

/// One bot session: construct, `authenticate`, `connect`, and finally `disconnect`.
pub struct DiscordPlatform {
    token: String,
    connection_status: ConnectionStatus,
    registry: Arc<CommandRegistry>,

    shard_tasks: Vec<JoinHandle<()>>,
    shard_senders: Vec<MessageSender>,

    http: Option<Arc<HttpClient>>,
}

impl DiscordPlatform {
    pub fn new(token: String, registry: CommandRegistry) -> Self {
        Self {
            token,
            connection_status: ConnectionStatus::Disconnected,
            registry: Arc::new(registry),
            shard_tasks: Vec::new(),
            shard_senders: Vec::new(),
            http: None,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn http(&self) -> Option<Arc<HttpClient>> {
        self.http.clone()
    }
}

#[async_trait]
impl PlatformAuth for DiscordPlatform {
    async fn authenticate(&mut self) -> Result<(), Error> {
        if self.token.trim().is_empty() {
            return Err(Error::Auth("Discord token is empty".into()));
        }
        Ok(())
    }

    async fn is_authenticated(&self) -> Result<bool, Error> {
        Ok(!self.token.trim().is_empty())
    }
}

#[async_trait]
impl PlatformIntegration for DiscordPlatform {
    async fn connect(&mut self) -> Result<(), Error> {
        if matches!(self.connection_status, ConnectionStatus::Connected) {
            info!("(DiscordPlatform) Already connected => skipping");
            return Ok(());
        }
        self.authenticate().await?;

        let http_client = Arc::new(
            ClientBuilder::new()
                .token(self.token.clone())
                .timeout(Duration::from_secs(30))
                .build(),
        );
        self.http = Some(http_client.clone());

        let config = Config::new(self.token.clone(), Intents::GUILDS | Intents::GUILD_MESSAGES);

        let shards = gateway::create_recommended(&http_client, config, |_, b| b.build())
            .await
            .map_err(|e| {
                self.connection_status = ConnectionStatus::Error(e.to_string());
                Error::Platform(format!("create_recommended error: {e}"))
            })?;

        for shard in shards {
            self.shard_senders.push(shard.sender());

            let http_for_shard = http_client.clone();
            let registry_for_shard = self.registry.clone();
            let handle = tokio::spawn(async move {
                shard_runner(shard, http_for_shard, registry_for_shard).await;
            });
            self.shard_tasks.push(handle);
        }
        debug!("(DiscordPlatform) Spawned {} shard(s)", self.shard_tasks.len());

        self.connection_status = ConnectionStatus::Connected;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), Error> {
        self.connection_status = ConnectionStatus::Disconnected;

        for sender in &self.shard_senders {
            let _ = sender.close(CloseFrame::NORMAL);
        }
        for task in &mut self.shard_tasks {
            let _ = task.await;
        }

        self.shard_senders.clear();
        self.shard_tasks.clear();
        self.http = None;

        info!("(DiscordPlatform) Disconnected.");
        Ok(())
    }

    async fn get_connection_status(&self) -> Result<ConnectionStatus, Error> {
        Ok(self.connection_status.clone())
    }
}
