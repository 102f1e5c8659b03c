/// Per-message cap Discord places on embed fields; also the page size used for player lists.
pub const MAX_EMBED_FIELDS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscordColor(pub u32);

impl DiscordColor {
    pub const GREEN: DiscordColor = DiscordColor(0x00FF00);
    pub const ORANGE: DiscordColor = DiscordColor(0xFFA500);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordEmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-neutral embed; converted to a twilight `Embed` right before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscordEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<DiscordColor>,
    pub fields: Vec<DiscordEmbedField>,
}

impl DiscordEmbed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value by its label.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}
