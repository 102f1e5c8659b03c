// tests/platform_tests.rs

use std::sync::Arc;

use cfxbot_core::platforms::cfx::{CfxClient, CfxClientConfig};
use cfxbot_core::platforms::discord::DiscordPlatform;
use cfxbot_core::platforms::{ConnectionStatus, PlatformAuth, PlatformIntegration};
use cfxbot_core::services::discord::slashcommands::{CommandRegistry, ServerInfoCommand};
use cfxbot_core::{DefaultHttpClient, Error};

fn registry() -> CommandRegistry {
    let cfx = CfxClient::new(Arc::new(DefaultHttpClient::new()), CfxClientConfig::default());
    let mut registry = CommandRegistry::new();
    registry.register(Arc::new(ServerInfoCommand::new(cfx)));
    registry
}

#[tokio::test]
async fn test_new_session_is_disconnected() -> Result<(), Error> {
    let discord = DiscordPlatform::new("token".into(), registry());

    let status = discord.get_connection_status().await?;
    assert_eq!(status, ConnectionStatus::Disconnected);
    assert!(discord.http().is_none());
    assert!(discord.registry().get("serverinfo").is_some());
    Ok(())
}

#[tokio::test]
async fn test_empty_token_fails_before_connecting() -> Result<(), Error> {
    let mut discord = DiscordPlatform::new("   ".into(), registry());

    assert!(!discord.is_authenticated().await?);
    assert!(matches!(discord.authenticate().await, Err(Error::Auth(_))));
    assert!(matches!(discord.connect().await, Err(Error::Auth(_))));

    let status = discord.get_connection_status().await?;
    assert_eq!(status, ConnectionStatus::Disconnected);
    Ok(())
}

#[tokio::test]
async fn test_disconnect_without_connect_is_harmless() -> Result<(), Error> {
    let mut discord = DiscordPlatform::new("token".into(), registry());
    discord.disconnect().await?;

    let status = discord.get_connection_status().await?;
    assert_eq!(status, ConnectionStatus::Disconnected);
    Ok(())
}

#[test]
fn test_registry_definitions_include_serverinfo() {
    let defs = registry().definitions();
    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].name, "serverinfo");
    assert_eq!(defs[0].options[0].name, "cfxcode");
}
