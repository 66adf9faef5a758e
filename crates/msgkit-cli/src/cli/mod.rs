pub mod config;
pub mod input;
pub mod output;
pub mod transcript;

pub use config::CliConfig;
pub use input::load_messages;
pub use output::{group_summaries, GroupSummary};
pub use transcript::Transcript;
