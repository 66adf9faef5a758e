#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Message {message_id} has no sender, but the grouping predicate compares senders")]
    MissingSender { message_id: String },

    #[error("Invalid timestamp format '{format}'")]
    InvalidTimestampFormat { format: String },

    #[error("Invalid view configuration: {message}")]
    InvalidConfig { message: String },
}
