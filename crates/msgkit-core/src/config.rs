use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CORNER_RADIUS, DEFAULT_IMAGE_SCALE, DEFAULT_TIMESTAMP_FORMAT, DEFAULT_VIEW_WIDTH,
};
use crate::error::LayoutError;
use crate::models::GroupingOptions;
use crate::timestamp::TimestampFormatter;

/// View settings passed explicitly to the grouping engine and renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    pub grouping: GroupingOptions,
    /// chrono strftime pattern for timestamp labels
    pub timestamp_format: String,
    pub corner_radius: f32,
    pub image_scale: f32,
    /// Reveal per-message timestamps on a horizontal swipe
    pub show_timestamp_on_swipe: bool,
    /// Available width, in columns
    pub width: usize,
}

impl ViewConfig {
    pub fn new(grouping: GroupingOptions) -> Self {
        Self {
            grouping,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        self.timestamp_formatter()?;

        if !(self.corner_radius.is_finite() && self.corner_radius >= 0.0) {
            return Err(LayoutError::InvalidConfig {
                message: format!("corner radius must be non-negative, got {}", self.corner_radius),
            });
        }
        if !(self.image_scale.is_finite() && self.image_scale > 0.0) {
            return Err(LayoutError::InvalidConfig {
                message: format!("image scale must be positive, got {}", self.image_scale),
            });
        }
        if self.width == 0 {
            return Err(LayoutError::InvalidConfig {
                message: "width must be at least one column".to_string(),
            });
        }
        Ok(())
    }

    pub fn timestamp_formatter(&self) -> Result<TimestampFormatter, LayoutError> {
        TimestampFormatter::new(self.timestamp_format.clone())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            grouping: GroupingOptions::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            corner_radius: DEFAULT_CORNER_RADIUS,
            image_scale: DEFAULT_IMAGE_SCALE,
            show_timestamp_on_swipe: false,
            width: DEFAULT_VIEW_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimestampAnchor;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.grouping.is_empty());
        assert_eq!(config.corner_radius, 4.0);
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{"grouping": {"collapseTimestamps": "bottom"}, "width": 40}"#;
        let config: ViewConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grouping.collapse_timestamps, Some(TimestampAnchor::Bottom));
        assert_eq!(config.width, 40);
        assert_eq!(config.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_radius = ViewConfig {
            corner_radius: -1.0,
            ..ViewConfig::default()
        };
        assert!(matches!(bad_radius.validate(), Err(LayoutError::InvalidConfig { .. })));

        let bad_format = ViewConfig {
            timestamp_format: "%Q".to_string(),
            ..ViewConfig::default()
        };
        assert!(matches!(
            bad_format.validate(),
            Err(LayoutError::InvalidTimestampFormat { .. })
        ));

        let zero_width = ViewConfig {
            width: 0,
            ..ViewConfig::default()
        };
        assert!(zero_width.validate().is_err());
    }
}
