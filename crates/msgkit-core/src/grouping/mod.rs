pub mod boundary;
pub mod engine;
pub mod groups;

pub use boundary::{BoundaryKey, DefaultBoundary, GroupBoundary};
pub use engine::{group_messages, sort_messages, MessageLayout};
pub use groups::split_groups;
