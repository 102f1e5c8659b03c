//! Records returned by the cfx.re server directory (`/api/servers/single/{code}`).
//!
//! The directory payload is not schema-guaranteed, so every field is optional and
//! decoded through `lenient`: a value of the wrong JSON type is dropped to `None`
//! rather than failing the whole record.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

/// The `Data` object of a single-server lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerRecord {
    /// Shown as sent, whatever its JSON type.
    #[serde(default)]
    pub hostname: Option<Value>,

    #[serde(rename = "sv_maxclients", default, deserialize_with = "lenient")]
    pub max_slots: Option<Number>,

    #[serde(rename = "clients", default, deserialize_with = "lenient")]
    pub current_clients: Option<Number>,

    #[serde(rename = "connectEndPoints", default, deserialize_with = "lenient")]
    pub connect_endpoints: Option<Vec<Value>>,

    #[serde(rename = "upvotePower", default, deserialize_with = "lenient")]
    pub upvote_power: Option<Number>,

    #[serde(rename = "ownerProfile", default, deserialize_with = "lenient")]
    pub owner_profile: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub players: Option<Vec<PlayerRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    /// Round-trip latency in milliseconds.
    #[serde(default, deserialize_with = "lenient")]
    pub ping: Option<Number>,
}

impl ServerRecord {
    /// Extract the record from a full directory response body.
    ///
    /// Returns `Ok(None)` when the top-level `Data` container is absent or empty-ish
    /// (`null`, `false`, `0`, `""`). Any other non-object `Data` yields a record with
    /// every field missing.
    pub fn from_envelope(envelope: &Value) -> Result<Option<Self>, serde_json::Error> {
        match envelope.get("Data") {
            Some(data) if data.is_object() => ServerRecord::deserialize(data).map(Some),
            Some(data) if is_present(data) => Ok(Some(ServerRecord::default())),
            _ => Ok(None),
        }
    }

    /// Hostname text for display; empty when the directory sent none.
    pub fn hostname_text(&self) -> String {
        match &self.hostname {
            Some(value) => value_text(value),
            None => String::new(),
        }
    }

    /// The player list, treating an empty list the same as a missing one.
    pub fn online_players(&self) -> &[PlayerRecord] {
        self.players.as_deref().unwrap_or(&[])
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings render without quotes, numbers via [`display_number`], anything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => display_number(n),
        other => other.to_string(),
    }
}

/// Decode `T` if the value has the right shape, otherwise `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Render a JSON number the way the directory sends it: integral values have no
/// fractional part (`48.0` renders `48`).
pub fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
