use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use msgkit_core::Message;
use serde::Deserialize;

/// Accepted message file layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageFile {
    Wrapped { messages: Vec<Message> },
    Bare(Vec<Message>),
}

pub fn parse_messages(json: &str) -> Result<Vec<Message>> {
    let file: MessageFile = serde_json::from_str(json).context("Failed to parse messages")?;
    Ok(match file {
        MessageFile::Wrapped { messages } => messages,
        MessageFile::Bare(messages) => messages,
    })
}

/// Read messages from a JSON file, or from stdin when `path` is `-`
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read messages from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file: {}", path.display()))?
    };

    let messages = parse_messages(&content)
        .with_context(|| format!("Invalid message file: {}", path.display()))?;
    tracing::debug!(count = messages.len(), path = %path.display(), "loaded messages");
    Ok(messages)
}
