pub mod container;
pub mod flags;
pub mod message;
pub mod options;

pub use container::{MeasuredSize, MessageContainer};
pub use flags::{GroupFlag, GroupFlags, TimestampFlag};
pub use message::{Alignment, CustomItem, ImageItem, Message, MessageKind, Sender, TextItem};
pub use options::{GroupingOption, GroupingOptions, TimestampAnchor};
