use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::constants::DEFAULT_TIMESTAMP_FORMAT;
use crate::error::LayoutError;

/// Formats timestamp labels with a chrono strftime pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormatter {
    pattern: String,
}

impl TimestampFormatter {
    /// Validate `pattern` up front so formatting can never fail later
    pub fn new(pattern: impl Into<String>) -> Result<Self, LayoutError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LayoutError::InvalidTimestampFormat { format: pattern });
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(&self.pattern).to_string()
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}
