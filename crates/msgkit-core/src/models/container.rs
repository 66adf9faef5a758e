use serde::Serialize;

use super::flags::{GroupFlag, GroupFlags, TimestampFlag};
use super::message::Message;

/// Size measured by the host UI. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MeasuredSize {
    pub width: f32,
    pub height: f32,
}

/// A message paired with the chrome decisions computed for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContainer<'a> {
    pub message: &'a Message,
    /// `None` means ungrouped mode: every piece of chrome is rendered.
    /// `Some(empty)` is a computed result and renders nothing.
    pub group_flags: Option<GroupFlags>,
    pub timestamp_flag: TimestampFlag,
    #[serde(skip)]
    pub size: MeasuredSize,
}

impl<'a> MessageContainer<'a> {
    /// Container whose chrome was decided by the grouping engine
    pub fn grouped(message: &'a Message, flags: GroupFlags, timestamp_flag: TimestampFlag) -> Self {
        Self {
            message,
            group_flags: Some(flags),
            timestamp_flag,
            size: MeasuredSize::default(),
        }
    }

    /// Container for hosts that bypass grouping altogether
    pub fn ungrouped(message: &'a Message) -> Self {
        Self {
            message,
            group_flags: None,
            timestamp_flag: TimestampFlag::Normal,
            size: MeasuredSize::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.message.id
    }

    pub fn is_ungrouped(&self) -> bool {
        self.group_flags.is_none()
    }

    /// Computed flags; ungrouped containers report an empty set
    pub fn flags(&self) -> GroupFlags {
        self.group_flags.unwrap_or_default()
    }

    pub fn has_flag(&self, flag: GroupFlag) -> bool {
        self.flags().contains(flag)
    }

    /// Whether the rendering layer should draw the chrome named by `flag`
    pub fn shows(&self, flag: GroupFlag) -> bool {
        self.group_flags.map_or(true, |flags| flags.contains(flag))
    }

    pub fn with_size(mut self, size: MeasuredSize) -> Self {
        self.size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alignment, MessageKind};
    use chrono::{TimeZone, Utc};

    fn message() -> Message {
        Message::new(
            "m1",
            Utc.timestamp_opt(0, 0).unwrap(),
            MessageKind::text("hi"),
            Alignment::Left,
        )
    }

    #[test]
    fn test_ungrouped_shows_everything() {
        let msg = message();
        let container = MessageContainer::ungrouped(&msg);
        assert!(container.is_ungrouped());
        for flag in GroupFlag::ALL {
            assert!(container.shows(flag));
            assert!(!container.has_flag(flag));
        }
    }

    #[test]
    fn test_computed_empty_shows_nothing() {
        let msg = message();
        let container = MessageContainer::grouped(&msg, GroupFlags::empty(), TimestampFlag::Hidden);
        assert!(!container.is_ungrouped());
        for flag in GroupFlag::ALL {
            assert!(!container.shows(flag));
        }
    }

    #[test]
    fn test_serialize_container() {
        let msg = message();
        let container = MessageContainer::grouped(
            &msg,
            GroupFlags::from([GroupFlag::StartGroup]),
            TimestampFlag::Top,
        );
        let value = serde_json::to_value(&container).unwrap();
        assert_eq!(value["message"]["id"], "m1");
        assert_eq!(value["groupFlags"], serde_json::json!(["startGroup"]));
        assert_eq!(value["timestampFlag"], "top");
        assert!(value.get("size").is_none());
    }
}
