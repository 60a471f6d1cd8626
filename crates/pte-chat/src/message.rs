//! Inbound and outbound chat message types.

use serde::Serialize;
use serde_json::{Value, json};

use crate::limits::{
    EMBED_DESCRIPTION_LIMIT, EMBED_FIELD_NAME_LIMIT, EMBED_FIELD_VALUE_LIMIT, EMBED_FOOTER_LIMIT,
    EMBED_MAX_FIELDS, EMBED_TITLE_LIMIT, MESSAGE_LIMIT, truncate,
};

/// Accent colour for ordinary cards.
pub const COLOR_INFO: u32 = 3_447_003;
/// Accent colour for error cards.
pub const COLOR_ERROR: u32 = 15_158_332;

/// A message read from the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Platform id; ids increase monotonically with send time.
    pub id: u64,
    pub author_id: String,
    pub author_is_bot: bool,
    pub content: String,
}

/// One field of a rich card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    #[must_use]
    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: true,
        }
    }

    #[must_use]
    pub fn block(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }
}

/// A rich card: title, description, accent colour, fields, footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl Embed {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: COLOR_INFO,
            fields: Vec::new(),
            footer: None,
        }
    }

    #[must_use]
    pub const fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Wire form with every part cut to its platform limit.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let fields: Vec<EmbedField> = self
            .fields
            .iter()
            .take(EMBED_MAX_FIELDS)
            .map(|f| EmbedField {
                name: truncate(&f.name, EMBED_FIELD_NAME_LIMIT),
                value: truncate(&f.value, EMBED_FIELD_VALUE_LIMIT),
                inline: f.inline,
            })
            .collect();

        let mut payload = json!({
            "title": truncate(&self.title, EMBED_TITLE_LIMIT),
            "description": truncate(&self.description, EMBED_DESCRIPTION_LIMIT),
            "color": self.color,
            "fields": fields,
        });
        if let Some(footer) = &self.footer {
            payload["footer"] = json!({ "text": truncate(footer, EMBED_FOOTER_LIMIT) });
        }
        payload
    }
}

/// A reply: plain text, a rich card, or text above a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub content: Option<String>,
    pub embed: Option<Embed>,
}

impl OutboundMessage {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embed: None,
        }
    }

    #[must_use]
    pub const fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }

    /// Put `content` above the card (used for mentions).
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// JSON body for the create-message endpoint. Text beyond the message
    /// limit is truncated with a marker.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({});
        if let Some(content) = &self.content {
            payload["content"] = Value::String(truncate(content, MESSAGE_LIMIT));
        }
        if let Some(embed) = &self.embed {
            payload["embeds"] = json!([embed.to_payload()]);
        }
        payload
    }
}
