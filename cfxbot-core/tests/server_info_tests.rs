// tests/server_info_tests.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use cfxbot_core::platforms::cfx::{CfxClient, CfxClientConfig};
use cfxbot_core::services::discord::slashcommands::{ServerInfoCommand, ServerInfoReply};
use cfxbot_core::services::server_info::{FAILURE_LEAD, PLAYERS_TITLE, SERVER_TITLE, UNKNOWN};
use cfxbot_core::{Error, HttpClient, HttpResponse};

/// Replays one canned outcome and records the URLs it was asked for.
struct StubHttpClient {
    outcome: Box<dyn Fn() -> Result<HttpResponse, Error> + Send + Sync>,
    requested: Mutex<Vec<String>>,
}

impl StubHttpClient {
    fn json(status: u16, body: Value) -> Arc<Self> {
        let body = body.to_string();
        Arc::new(Self {
            outcome: Box::new(move || Ok(HttpResponse { status, body: body.clone() })),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            outcome: Box::new(|| Err(Error::NoResponse("connection refused".into()))),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn get(&self, url: String, _headers: HashMap<String, String>) -> Result<HttpResponse, Error> {
        self.requested.lock().unwrap().push(url);
        (self.outcome)()
    }
}

fn command(stub: Arc<StubHttpClient>) -> ServerInfoCommand {
    let config = CfxClientConfig {
        api_base: "http://directory.test/api/servers/single".into(),
        ..Default::default()
    };
    ServerInfoCommand::new(CfxClient::new(stub, config))
}

fn players(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| json!({"name": format!("player{i}"), "ping": 10 + i}))
            .collect(),
    )
}

fn expect_embeds(reply: ServerInfoReply) -> Vec<cfxbot_common::models::DiscordEmbed> {
    match reply {
        ServerInfoReply::Embeds(embeds) => embeds,
        ServerInfoReply::Failure(text) => panic!("expected embeds, got failure: {text}"),
    }
}

fn expect_failure(reply: ServerInfoReply) -> String {
    match reply {
        ServerInfoReply::Failure(text) => text,
        ServerInfoReply::Embeds(embeds) => panic!("expected failure, got {} embed(s)", embeds.len()),
    }
}

#[tokio::test]
async fn test_requests_code_once() {
    let stub = StubHttpClient::json(200, json!({"Data": {"hostname": "x"}}));
    let cmd = command(stub.clone());

    cmd.respond("q4x8ab").await;
    assert_eq!(stub.requests(), ["http://directory.test/api/servers/single/q4x8ab"]);
}

#[tokio::test]
async fn test_missing_fields_render_unknown() {
    let stub = StubHttpClient::json(200, json!({"Data": {"hostname": "Bare Server"}}));
    let embeds = expect_embeds(command(stub).respond("bare").await);

    assert_eq!(embeds.len(), 1);
    let server = &embeds[0];
    assert_eq!(server.title.as_deref(), Some(SERVER_TITLE));
    assert_eq!(server.description.as_deref(), Some("Details for server: **Bare Server**"));
    for label in ["Max Slots", "Current Players", "Connect End Points", "Upvote Power", "Owner Profile"] {
        assert_eq!(server.field(label), Some(UNKNOWN), "field {label}");
    }
}

#[tokio::test]
async fn test_current_players_composite() {
    let stub = StubHttpClient::json(200, json!({"Data": {"clients": 17, "sv_maxclients": 128}}));
    let embeds = expect_embeds(command(stub).respond("full").await);
    assert_eq!(embeds[0].field("Current Players"), Some("17 / 128"));

    let stub = StubHttpClient::json(200, json!({"Data": {"clients": 17, "sv_maxclients": "128"}}));
    let embeds = expect_embeds(command(stub).respond("half").await);
    assert_eq!(embeds[0].field("Current Players"), Some(UNKNOWN));
    assert_eq!(embeds[0].field("Max Slots"), Some(UNKNOWN));
}

#[tokio::test]
async fn test_empty_player_list_gives_single_embed() {
    let stub = StubHttpClient::json(200, json!({"Data": {"hostname": "Quiet", "players": players(0)}}));
    let embeds = expect_embeds(command(stub).respond("quiet").await);
    assert_eq!(embeds.len(), 1);
}

#[tokio::test]
async fn test_ten_players_listed_in_order() {
    let stub = StubHttpClient::json(200, json!({"Data": {"hostname": "Busy", "players": players(10)}}));
    let embeds = expect_embeds(command(stub).respond("busy").await);

    assert_eq!(embeds.len(), 2);
    assert_eq!(embeds[1].title.as_deref(), Some(PLAYERS_TITLE));
    let lines: Vec<&str> = embeds[1].description.as_deref().unwrap().lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "player0 | 10ms");
    assert_eq!(lines[9], "player9 | 19ms");
}

#[tokio::test]
async fn test_thirty_players_truncated_to_first_page() {
    let stub = StubHttpClient::json(200, json!({"Data": {"hostname": "Packed", "players": players(30)}}));
    let embeds = expect_embeds(command(stub).respond("packed").await);

    assert_eq!(embeds.len(), 2);
    let description = embeds[1].description.as_deref().unwrap();
    let lines: Vec<&str> = description.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[24], "player24 | 34ms");
    assert!(!description.contains("player25"));
}

#[tokio::test]
async fn test_missing_data_is_single_failure() {
    let stub = StubHttpClient::json(200, json!({"EndPoint": "gone", "Data": null}));
    let text = expect_failure(command(stub).respond("gone").await);
    assert!(text.starts_with(FAILURE_LEAD));
    assert!(text.ends_with("Error: Invalid server data."));

    let stub = StubHttpClient::json(200, json!({}));
    let text = expect_failure(command(stub).respond("gone").await);
    assert!(text.starts_with(FAILURE_LEAD));
}

#[tokio::test]
async fn test_non_2xx_reports_status_code() {
    let stub = StubHttpClient::json(404, json!({"error": "Not Found"}));
    let text = expect_failure(command(stub).respond("nope").await);
    assert!(text.starts_with(FAILURE_LEAD));
    assert!(text.contains("404"));
}

#[tokio::test]
async fn test_unreachable_directory() {
    let text = expect_failure(command(StubHttpClient::unreachable()).respond("any").await);
    assert_eq!(
        text,
        format!("{FAILURE_LEAD}\nNo response received from the server.")
    );
}

#[tokio::test]
async fn test_oversized_embed_is_reported_as_failure() {
    let endpoints: Vec<String> = (0..80).map(|i| format!("10.0.0.{i}:30120")).collect();
    let stub = StubHttpClient::json(200, json!({"Data": {"hostname": "Sprawl", "connectEndPoints": endpoints}}));
    let text = expect_failure(command(stub).respond("sprawl").await);

    assert!(text.starts_with(FAILURE_LEAD));
    assert!(text.contains("\nError: Embed error:"));
}

#[tokio::test]
async fn test_non_object_data_renders_unknown_fields() {
    let stub = StubHttpClient::json(200, json!({"Data": "down"}));
    let embeds = expect_embeds(command(stub).respond("down").await);

    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0].description.as_deref(), Some("Details for server: ****"));
    assert!(embeds[0].fields.iter().all(|f| f.value == UNKNOWN));
}

#[tokio::test]
async fn test_falsy_data_is_invalid_server_data() {
    for data in [json!(false), json!(0), json!("")] {
        let stub = StubHttpClient::json(200, json!({"Data": data}));
        let text = expect_failure(command(stub).respond("empty").await);
        assert_eq!(text, format!("{FAILURE_LEAD}\nError: Invalid server data."));
    }
}
