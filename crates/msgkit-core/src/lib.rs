pub mod config;
pub mod constants;
pub mod error;
pub mod grouping;
pub mod models;
pub mod render;
pub mod timestamp;

pub use config::ViewConfig;
pub use error::LayoutError;
pub use grouping::{
    group_messages, sort_messages, split_groups, BoundaryKey, DefaultBoundary, GroupBoundary,
    MessageLayout,
};
pub use models::{
    Alignment, CustomItem, GroupFlag, GroupFlags, GroupingOption, GroupingOptions, ImageItem,
    MessageContainer, MeasuredSize, Message, MessageKind, Sender, TextItem, TimestampAnchor,
    TimestampFlag,
};
pub use render::{CustomRender, CustomRendererInfo, RenderDispatcher};
pub use timestamp::TimestampFormatter;
