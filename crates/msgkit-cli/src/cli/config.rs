use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use msgkit_core::models::CustomItem;
use msgkit_core::{DefaultBoundary, RenderDispatcher, ViewConfig};
use serde::{Deserialize, Serialize};

/// CLI configuration that can be loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    #[serde(default)]
    pub view: ViewConfig,

    /// Text templates keyed by custom type id, e.g. `"poll": "Poll: {data.question}"`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_renderers: BTreeMap<String, String>,

    /// Split groups on `sender.id` instead of alignment
    #[serde(default)]
    pub group_by_sender: bool,

    /// Override the five minute gap that ends a group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_secs: Option<i64>,
}

impl CliConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: CliConfig = serde_json::from_str(json).context("Failed to deserialize config")?;
        config.view.validate()?;
        if let Some(secs) = config.max_gap_secs {
            anyhow::ensure!(secs >= 0, "maxGapSecs must not be negative, got {}", secs);
            anyhow::ensure!(
                Duration::try_seconds(secs).is_some(),
                "maxGapSecs is out of range, got {}",
                secs
            );
        }
        Ok(config)
    }

    pub fn boundary(&self) -> DefaultBoundary {
        let boundary = if self.group_by_sender {
            DefaultBoundary::by_sender()
        } else {
            DefaultBoundary::new()
        };

        match self.max_gap_secs.and_then(Duration::try_seconds) {
            Some(max_gap) => boundary.with_max_gap(max_gap),
            None => boundary,
        }
    }

    /// Build a dispatcher with one template renderer per configured type id
    pub fn dispatcher(&self) -> RenderDispatcher<String> {
        let mut dispatcher = RenderDispatcher::new();
        for (type_id, template) in &self.custom_renderers {
            let template = template.clone();
            dispatcher.register(type_id.clone(), move |_, item, _| fill_template(&template, item));
        }
        dispatcher
    }
}

/// Expand `{typeId}`, `{data}` and `{data.<field>}` placeholders.
/// Unknown placeholders are left as written.
pub fn fill_template(template: &str, item: &CustomItem) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match resolve_placeholder(key, item) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn resolve_placeholder(key: &str, item: &CustomItem) -> Option<String> {
    let value = match key {
        "typeId" => return Some(item.type_id.clone()),
        "data" => &item.data,
        _ => item.data.get(key.strip_prefix("data.")?)?,
    };

    Some(match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use msgkit_core::models::TimestampAnchor;
    use msgkit_core::BoundaryKey;
    use std::io::Write;

    fn poll() -> CustomItem {
        CustomItem {
            type_id: "poll".to_string(),
            data: serde_json::json!({"question": "Lunch?", "votes": 3}),
        }
    }

    #[test]
    fn test_parse_config_minimal() {
        let config = CliConfig::from_json("{}").unwrap();
        assert_eq!(config.view, ViewConfig::default());
        assert!(config.custom_renderers.is_empty());
        assert!(!config.group_by_sender);
    }

    #[test]
    fn test_parse_config_full() {
        let json = r#"{
            "view": {
                "grouping": {"collapseEnclosingViews": true, "collapseTimestamps": "top"},
                "timestampFormat": "%H:%M",
                "width": 50
            },
            "customRenderers": {"poll": "Poll: {data.question}"},
            "groupBySender": true,
            "maxGapSecs": 60
        }"#;
        let config = CliConfig::from_json(json).unwrap();
        assert!(config.view.grouping.collapse_enclosing_views);
        assert_eq!(config.view.grouping.collapse_timestamps, Some(TimestampAnchor::Top));
        assert_eq!(config.view.width, 50);

        let boundary = config.boundary();
        assert_eq!(boundary.key, BoundaryKey::Sender);
        assert_eq!(boundary.max_gap, Duration::seconds(60));
        assert!(config.dispatcher().contains("poll"));
    }

    #[test]
    fn test_invalid_view_rejected() {
        let json = r#"{"view": {"timestampFormat": "%Q"}}"#;
        assert!(CliConfig::from_json(json).is_err());
        assert!(CliConfig::from_json(r#"{"maxGapSecs": -5}"#).is_err());

        let err = CliConfig::from_json(r#"{"maxGapSecs": 9223372036854775807}"#).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_unchecked_gap_falls_back_to_default() {
        let config = CliConfig {
            max_gap_secs: Some(i64::MAX),
            ..CliConfig::default()
        };
        assert_eq!(config.boundary(), DefaultBoundary::new());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"view": {{"cornerRadius": 8.0}}}}"#).unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.view.corner_radius, 8.0);
    }

    #[test]
    fn test_demo_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/config.json");
        let config = CliConfig::load(&path).unwrap();
        assert!(config.group_by_sender);
        assert!(config.view.grouping.collapse_profile_picture);
        assert!(config.dispatcher().contains("poll"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_fill_template() {
        let item = poll();
        assert_eq!(fill_template("Poll: {data.question}", &item), "Poll: Lunch?");
        assert_eq!(fill_template("{typeId} ({data.votes} votes)", &item), "poll (3 votes)");
        assert_eq!(
            fill_template("{data}", &item),
            r#"{"question":"Lunch?","votes":3}"#
        );
        assert_eq!(fill_template("{unknown} {data.nope}", &item), "{unknown} {data.nope}");
        assert_eq!(fill_template("dangling {brace", &item), "dangling {brace");
    }

    #[test]
    fn test_dispatcher_uses_templates() {
        let config = CliConfig::from_json(r#"{"customRenderers": {"poll": "Q: {data.question}"}}"#).unwrap();
        let dispatcher = config.dispatcher();
        let renderer = dispatcher.lookup("poll").unwrap();

        let message = msgkit_core::Message::new(
            "c1",
            chrono::TimeZone::timestamp_opt(&chrono::Utc, 0, 0).unwrap(),
            msgkit_core::MessageKind::Custom(poll()),
            msgkit_core::Alignment::Left,
        );
        let info = msgkit_core::CustomRendererInfo::for_width(80.0, &config.view);
        assert_eq!(renderer(&message, &poll(), &info), "Q: Lunch?");
    }
}
