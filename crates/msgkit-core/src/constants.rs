//! Layout constants shared by the grouping engine and the rendering layer.

/// Gap after which the next message starts a new group, in seconds
pub const GROUP_GAP_SECS: i64 = 5 * 60; // 5 minutes

/// Default corner radius for message bubbles
pub const DEFAULT_CORNER_RADIUS: f32 = 4.0;

/// Default scale applied to image messages
pub const DEFAULT_IMAGE_SCALE: f32 = 1.0;

/// Share of the available width a message bubble may occupy
pub const MESSAGE_WIDTH_RATIO: f32 = 3.0 / 4.0;

/// Default timestamp label pattern (chrono strftime syntax), e.g. "Nov 23, 4:05 PM"
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Default width, in columns, of a rendered transcript
pub const DEFAULT_VIEW_WIDTH: usize = 72;
