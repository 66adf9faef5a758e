use serde::{Deserialize, Serialize};

/// Where a group's single timestamp label is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampAnchor {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupingOption {
    /// Hides the profile picture for all but the last message of a group
    CollapseProfilePicture,
    /// Uses the first header and last footer for the whole group
    CollapseEnclosingViews,
    /// Shows one timestamp per group at the given anchor
    CollapseTimestamps(TimestampAnchor),
}

/// Grouping policies applied by the engine. All-off means every message
/// renders its own chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupingOptions {
    pub collapse_profile_picture: bool,
    pub collapse_enclosing_views: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapse_timestamps: Option<TimestampAnchor>,
}

impl GroupingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn insert(&mut self, option: GroupingOption) {
        match option {
            GroupingOption::CollapseProfilePicture => self.collapse_profile_picture = true,
            GroupingOption::CollapseEnclosingViews => self.collapse_enclosing_views = true,
            GroupingOption::CollapseTimestamps(anchor) => self.collapse_timestamps = Some(anchor),
        }
    }

    pub fn with(mut self, option: GroupingOption) -> Self {
        self.insert(option);
        self
    }

    pub fn contains(&self, option: GroupingOption) -> bool {
        match option {
            GroupingOption::CollapseProfilePicture => self.collapse_profile_picture,
            GroupingOption::CollapseEnclosingViews => self.collapse_enclosing_views,
            GroupingOption::CollapseTimestamps(anchor) => self.collapse_timestamps == Some(anchor),
        }
    }

    pub fn to_vec(&self) -> Vec<GroupingOption> {
        let mut options = Vec::new();
        if self.collapse_profile_picture {
            options.push(GroupingOption::CollapseProfilePicture);
        }
        if self.collapse_enclosing_views {
            options.push(GroupingOption::CollapseEnclosingViews);
        }
        if let Some(anchor) = self.collapse_timestamps {
            options.push(GroupingOption::CollapseTimestamps(anchor));
        }
        options
    }
}

/// Later `CollapseTimestamps` entries replace earlier ones
impl FromIterator<GroupingOption> for GroupingOptions {
    fn from_iter<I: IntoIterator<Item = GroupingOption>>(iter: I) -> Self {
        let mut options = Self::default();
        for option in iter {
            options.insert(option);
        }
        options
    }
}
