//! Renderer lookup for custom message kinds.
//!
//! The grouping engine only decides which chrome to show. Drawing a `Custom`
//! message is delegated to whatever the host registered for its type id; this
//! module performs the lookup and reports hit or miss.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::config::ViewConfig;
use crate::constants::MESSAGE_WIDTH_RATIO;
use crate::models::{CustomItem, Message, MessageKind};

/// Layout hints handed to custom renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomRendererInfo {
    pub suggested_width: f32,
    pub corner_radius: f32,
}

impl CustomRendererInfo {
    /// Hints for a message list laid out in `available_width`
    pub fn for_width(available_width: f32, config: &ViewConfig) -> Self {
        Self {
            suggested_width: available_width * MESSAGE_WIDTH_RATIO,
            corner_radius: config.corner_radius,
        }
    }
}

pub type Renderer<R> = Box<dyn Fn(&Message, &CustomItem, &CustomRendererInfo) -> R + Send + Sync>;

/// Outcome of rendering a custom message
#[derive(Debug, Clone, PartialEq)]
pub enum CustomRender<R> {
    Rendered(R),
    /// No renderer registered for `type_id`; show a placeholder instead
    Missing { type_id: String },
}

impl<R> CustomRender<R> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Rendered output, or the placeholder text mapped through `placeholder`
    pub fn unwrap_or_placeholder(self, placeholder: impl FnOnce(String) -> R) -> R {
        match self {
            Self::Rendered(output) => output,
            Self::Missing { type_id } => placeholder(missing_renderer_text(&type_id)),
        }
    }
}

pub fn missing_renderer_text(type_id: &str) -> String {
    format!("No renderer found for ID {}", type_id)
}

/// Registry of custom renderers keyed by type id
pub struct RenderDispatcher<R> {
    renderers: HashMap<String, Renderer<R>>,
}

impl<R> RenderDispatcher<R> {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Register a renderer; replaces any earlier renderer for the same id
    pub fn register<F>(&mut self, type_id: impl Into<String>, renderer: F)
    where
        F: Fn(&Message, &CustomItem, &CustomRendererInfo) -> R + Send + Sync + 'static,
    {
        let type_id = type_id.into();
        if self.renderers.insert(type_id.clone(), Box::new(renderer)).is_some() {
            debug!(%type_id, "replaced custom renderer");
        }
    }

    pub fn with_renderer<F>(mut self, type_id: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&Message, &CustomItem, &CustomRendererInfo) -> R + Send + Sync + 'static,
    {
        self.register(type_id, renderer);
        self
    }

    pub fn lookup(&self, type_id: &str) -> Option<&Renderer<R>> {
        self.renderers.get(type_id)
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.renderers.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render a custom message. Returns `None` for non-custom kinds.
    pub fn render_custom(&self, message: &Message, info: &CustomRendererInfo) -> Option<CustomRender<R>> {
        let MessageKind::Custom(item) = &message.kind else {
            return None;
        };

        match self.lookup(&item.type_id) {
            Some(renderer) => Some(CustomRender::Rendered(renderer(message, item, info))),
            None => {
                debug!(type_id = %item.type_id, message_id = %message.id, "no custom renderer registered");
                Some(CustomRender::Missing {
                    type_id: item.type_id.clone(),
                })
            }
        }
    }
}

impl<R> Default for RenderDispatcher<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for RenderDispatcher<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.renderers.keys().collect();
        ids.sort();
        f.debug_struct("RenderDispatcher").field("renderers", &ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Alignment;
    use chrono::{TimeZone, Utc};

    fn custom(type_id: &str, data: serde_json::Value) -> Message {
        Message::new(
            "c1",
            Utc.timestamp_opt(0, 0).unwrap(),
            MessageKind::custom(type_id, data),
            Alignment::Left,
        )
    }

    fn info() -> CustomRendererInfo {
        CustomRendererInfo::for_width(400.0, &ViewConfig::default())
    }

    #[test]
    fn test_renderer_info_from_config() {
        let info = info();
        assert_eq!(info.suggested_width, 300.0);
        assert_eq!(info.corner_radius, 4.0);
    }

    #[test]
    fn test_render_hit() {
        let dispatcher = RenderDispatcher::new().with_renderer("poll", |_, item: &CustomItem, info: &CustomRendererInfo| {
            format!("{} @ {}", item.data["question"].as_str().unwrap_or(""), info.suggested_width)
        });
        let msg = custom("poll", serde_json::json!({"question": "Lunch?"}));

        let rendered = dispatcher.render_custom(&msg, &info());
        assert_eq!(rendered, Some(CustomRender::Rendered("Lunch? @ 300".to_string())));
    }

    #[test]
    fn test_render_miss_is_placeholder() {
        let dispatcher: RenderDispatcher<String> = RenderDispatcher::new();
        let msg = custom("location", serde_json::Value::Null);

        let rendered = dispatcher.render_custom(&msg, &info()).unwrap();
        assert!(rendered.is_missing());
        assert_eq!(
            rendered.unwrap_or_placeholder(|text| text),
            "No renderer found for ID location"
        );
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut dispatcher = RenderDispatcher::new();
        dispatcher.register("poll", |_: &Message, _: &CustomItem, _: &CustomRendererInfo| 1);
        dispatcher.register("poll", |_: &Message, _: &CustomItem, _: &CustomRendererInfo| 2);
        assert_eq!(dispatcher.len(), 1);

        let msg = custom("poll", serde_json::Value::Null);
        assert_eq!(dispatcher.render_custom(&msg, &info()), Some(CustomRender::Rendered(2)));
    }

    #[test]
    fn test_non_custom_kind_is_not_dispatched() {
        let dispatcher: RenderDispatcher<String> = RenderDispatcher::new();
        let msg = Message::new(
            "t1",
            Utc.timestamp_opt(0, 0).unwrap(),
            MessageKind::text("hi"),
            Alignment::Left,
        );
        assert!(dispatcher.render_custom(&msg, &info()).is_none());
    }
}
