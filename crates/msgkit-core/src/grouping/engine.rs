use tracing::{debug, trace};

use super::boundary::{DefaultBoundary, GroupBoundary};
use crate::error::LayoutError;
use crate::models::{
    GroupFlag, GroupFlags, GroupingOptions, Message, MessageContainer, TimestampAnchor,
    TimestampFlag,
};

/// Stable sort by timestamp; equal timestamps keep their input order
pub fn sort_messages(messages: &[Message]) -> Vec<&Message> {
    let mut sorted: Vec<&Message> = messages.iter().collect();
    sorted.sort_by_key(|m| m.timestamp);
    sorted
}

/// Compute chrome flags for every message in one left-to-right pass.
///
/// `messages` must already be in display order (see [`sort_messages`]).
/// The only state carried between iterations is the footer-fallthrough latch:
/// a system message that opens a group cannot host the group's footer, so the
/// next non-system message in that group renders it instead.
pub fn group_messages<'a, B>(
    messages: &[&'a Message],
    options: &GroupingOptions,
    boundary: &B,
) -> Vec<MessageContainer<'a>>
where
    B: GroupBoundary + ?Sized,
{
    let mut containers: Vec<MessageContainer<'a>> = Vec::with_capacity(messages.len());
    let mut footer_fallthrough = false;

    for (i, &message) in messages.iter().enumerate() {
        let mut flags = GroupFlags::empty();
        let mut timestamp_flag = TimestampFlag::Hidden;

        let starts_group = containers
            .last()
            .map_or(true, |prev| prev.has_flag(GroupFlag::EndGroup));
        if starts_group {
            flags.insert(GroupFlag::StartGroup);
            if options.collapse_timestamps == Some(TimestampAnchor::Top) {
                timestamp_flag = TimestampFlag::Top;
            }
        }

        let ends_group = boundary.ends_group(i, messages);
        if ends_group {
            flags.insert(GroupFlag::EndGroup);
            if options.collapse_timestamps == Some(TimestampAnchor::Bottom) {
                timestamp_flag = TimestampFlag::Bottom;
            }
        }

        if options.collapse_timestamps.is_none() {
            timestamp_flag = TimestampFlag::Normal;
        }

        if message.is_system() {
            if ends_group && !starts_group {
                // The system message closes a group it cannot draw a footer for
                if let Some(prev) = containers.last_mut() {
                    if !prev.message.is_system() {
                        if let Some(prev_flags) = prev.group_flags.as_mut() {
                            prev_flags.insert(GroupFlag::RenderFooter);
                        }
                    }
                }
            } else if starts_group && !ends_group {
                footer_fallthrough = true;
            }
        } else {
            if options.collapse_enclosing_views {
                if starts_group {
                    flags.insert(GroupFlag::RenderHeader);
                }
                if ends_group || footer_fallthrough {
                    flags.insert(GroupFlag::RenderFooter);
                    footer_fallthrough = false;
                }
            } else {
                flags.insert(GroupFlag::RenderHeader);
                flags.insert(GroupFlag::RenderFooter);
            }

            if options.collapse_profile_picture {
                if ends_group {
                    flags.insert(GroupFlag::RenderProfile);
                } else {
                    flags.insert(GroupFlag::RenderClearProfile);
                }
            } else {
                flags.insert(GroupFlag::RenderProfile);
            }
        }

        // A deferred footer never leaks into the next group
        if ends_group {
            footer_fallthrough = false;
        }

        trace!(message_id = %message.id, ?flags, ?timestamp_flag, "grouped message");
        containers.push(MessageContainer::grouped(message, flags, timestamp_flag));
    }

    containers
}

/// Grouping options bound to a boundary predicate.
///
/// Holds no state between calls: every [`layout`](Self::layout) recomputes all containers.
#[derive(Debug, Clone, Default)]
pub struct MessageLayout<B = DefaultBoundary> {
    options: GroupingOptions,
    boundary: B,
}

impl MessageLayout<DefaultBoundary> {
    pub fn new(options: GroupingOptions) -> Self {
        Self {
            options,
            boundary: DefaultBoundary::default(),
        }
    }
}

impl<B: GroupBoundary> MessageLayout<B> {
    pub fn with_boundary<C: GroupBoundary>(self, boundary: C) -> MessageLayout<C> {
        MessageLayout {
            options: self.options,
            boundary,
        }
    }

    pub fn options(&self) -> &GroupingOptions {
        &self.options
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// Check that every message carries what the boundary predicate reads
    pub fn validate(&self, messages: &[Message]) -> Result<(), LayoutError> {
        if self.boundary.requires_sender() {
            if let Some(message) = messages.iter().find(|m| m.sender.is_none()) {
                return Err(LayoutError::MissingSender {
                    message_id: message.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Sort `messages` and compute a container for each one
    #[tracing::instrument(level = "debug", skip_all, fields(messages = messages.len()))]
    pub fn layout<'a>(&self, messages: &'a [Message]) -> Result<Vec<MessageContainer<'a>>, LayoutError> {
        self.validate(messages)?;

        let sorted = sort_messages(messages);
        let containers = group_messages(&sorted, &self.options, &self.boundary);

        debug!(
            groups = containers
                .iter()
                .filter(|c| c.has_flag(GroupFlag::EndGroup))
                .count(),
            "computed message layout"
        );
        Ok(containers)
    }

    /// Containers in display order with grouping bypassed entirely
    pub fn layout_ungrouped<'a>(&self, messages: &'a [Message]) -> Vec<MessageContainer<'a>> {
        sort_messages(messages)
            .into_iter()
            .map(MessageContainer::ungrouped)
            .collect()
    }
}
