use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Side of the conversation a message is placed on.
/// Ignored when rendering system and custom messages, but still used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub alignment: Alignment,
}

impl Sender {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            alignment,
        }
    }

    /// Up to two uppercase initials from the display name, falling back to the id
    pub fn initials(&self) -> String {
        let source = if self.display_name.trim().is_empty() {
            &self.id
        } else {
            &self.display_name
        };

        source
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextItem {
    pub text: String,
    /// Bubble color, as a CSS-style hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Payload for messages drawn by a host-registered renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomItem {
    /// Selects the renderer in the dispatcher
    pub type_id: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageKind {
    Text(TextItem),
    System { text: String },
    Image(ImageItem),
    Custom(CustomItem),
}

impl MessageKind {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextItem {
            text: text.into(),
            background: None,
        })
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::System { text: text.into() }
    }

    pub fn custom(type_id: impl Into<String>, data: serde_json::Value) -> Self {
        Self::Custom(CustomItem {
            type_id: type_id.into(),
            data,
        })
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::System { .. } => "system",
            Self::Image(_) => "image",
            Self::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    #[serde(default)]
    pub alignment: Alignment,
    /// Needed only by sender-keyed boundary predicates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Sender>,
    /// Custom header text shown when the container renders a header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Custom footer text shown when the container renders a footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        kind: MessageKind,
        alignment: Alignment,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            kind,
            alignment,
            sender: None,
            header: None,
            footer: None,
        }
    }

    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn is_system(&self) -> bool {
        self.kind.is_system()
    }

    /// Name shown in headers: sender display name, or the alignment side
    pub fn display_name(&self) -> &str {
        match &self.sender {
            Some(sender) if !sender.display_name.is_empty() => &sender.display_name,
            Some(sender) => &sender.id,
            None => match self.alignment {
                Alignment::Left => "left",
                Alignment::Right => "right",
            },
        }
    }
}
