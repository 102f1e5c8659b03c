use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use cfxbot_core::platforms::cfx::{CfxClient, CfxClientConfig, DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use cfxbot_core::platforms::discord::DiscordPlatform;
use cfxbot_core::platforms::PlatformIntegration;
use cfxbot_core::services::discord::slashcommands::{CommandRegistry, ServerInfoCommand};
use cfxbot_core::DefaultHttpClient;

#[derive(Parser, Clone)]
#[command(name = "cfxbot")]
#[command(author, version, about = "cfxbot - Discord bot that looks up FiveM servers by cfx.re code")]
struct Args {
    /// Discord bot token
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    token: String,

    /// Lookup endpoint; the cfx.re code is appended as the last path segment
    #[arg(long, env = "CFX_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// User-Agent sent to the server directory
    #[arg(long, env = "CFX_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_log::LogTracer::init()?;
    let filter = EnvFilter::from_default_env().add_directive("cfxbot=info".parse::<Directive>()?);
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)?;
    Ok(())
}

fn build_registry(args: &Args) -> CommandRegistry {
    let cfx = CfxClient::new(
        Arc::new(DefaultHttpClient::new()),
        CfxClientConfig {
            api_base: args.api_base.clone(),
            user_agent: args.user_agent.clone(),
        },
    );

    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(ServerInfoCommand::new(cfx)));
    registry
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; everything can come from the real environment.
    dotenv::dotenv().ok();
    init_tracing()?;
    let args = Args::parse();
    info!("cfxbot starting. api_base={}", args.api_base);

    let registry = build_registry(&args);
    let mut discord = DiscordPlatform::new(args.token.clone(), registry);

    if let Err(e) = discord.connect().await {
        error!("Failed to login to Discord: {e}");
        return Err(e.into());
    }
    info!("Bot is ready! Press Ctrl-C to stop.");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Error waiting for Ctrl-C: {e}");
    }

    info!("Shutting down...");
    discord.disconnect().await?;
    info!("Main finished. Goodbye!");
    Ok(())
}
