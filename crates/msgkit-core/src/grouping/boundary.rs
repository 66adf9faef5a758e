use chrono::Duration;

use crate::constants::GROUP_GAP_SECS;
use crate::models::Message;

/// Decides whether the message at `index` is the last of its visual group.
///
/// `messages` is the stably sorted list the engine is walking, so "next message"
/// is always `messages[index + 1]`.
pub trait GroupBoundary {
    fn ends_group(&self, index: usize, messages: &[&Message]) -> bool;

    /// Whether every message must carry a [`Sender`](crate::models::Sender)
    fn requires_sender(&self) -> bool {
        false
    }
}

impl<F> GroupBoundary for F
where
    F: Fn(usize, &[&Message]) -> bool,
{
    fn ends_group(&self, index: usize, messages: &[&Message]) -> bool {
        self(index, messages)
    }
}

/// What counts as a "sender change" for [`DefaultBoundary`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryKey {
    /// Compare message alignment (left/right side)
    #[default]
    Alignment,
    /// Compare `sender.id`; every message needs a sender
    Sender,
}

/// Splits groups on the last message, on a time gap, or on a sender change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBoundary {
    pub max_gap: Duration,
    pub key: BoundaryKey,
}

impl DefaultBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_sender() -> Self {
        Self {
            key: BoundaryKey::Sender,
            ..Self::default()
        }
    }

    pub fn with_max_gap(mut self, max_gap: Duration) -> Self {
        self.max_gap = max_gap;
        self
    }

    fn same_author(&self, current: &Message, next: &Message) -> bool {
        match self.key {
            BoundaryKey::Alignment => current.alignment == next.alignment,
            BoundaryKey::Sender => {
                let current_id = current.sender.as_ref().map(|s| s.id.as_str());
                let next_id = next.sender.as_ref().map(|s| s.id.as_str());
                current_id == next_id
            }
        }
    }
}

impl Default for DefaultBoundary {
    fn default() -> Self {
        Self {
            max_gap: Duration::seconds(GROUP_GAP_SECS),
            key: BoundaryKey::Alignment,
        }
    }
}

impl GroupBoundary for DefaultBoundary {
    fn ends_group(&self, index: usize, messages: &[&Message]) -> bool {
        let (Some(current), Some(next)) = (messages.get(index), messages.get(index + 1)) else {
            return true;
        };

        next.timestamp - current.timestamp > self.max_gap || !self.same_author(current, next)
    }

    fn requires_sender(&self) -> bool {
        self.key == BoundaryKey::Sender
    }
}
