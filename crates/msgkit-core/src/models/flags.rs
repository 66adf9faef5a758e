use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Structural chrome decision attached to a message container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupFlag {
    /// First message of a group (adds pre-group spacing)
    StartGroup,
    /// Last message of a group (adds post-group spacing)
    EndGroup,
    RenderHeader,
    RenderFooter,
    /// Draw the sender's profile picture
    RenderProfile,
    /// Reserve the profile picture's space without drawing it
    RenderClearProfile,
}

impl GroupFlag {
    pub const ALL: [GroupFlag; 6] = [
        GroupFlag::StartGroup,
        GroupFlag::EndGroup,
        GroupFlag::RenderHeader,
        GroupFlag::RenderFooter,
        GroupFlag::RenderProfile,
        GroupFlag::RenderClearProfile,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Bitset over [`GroupFlag`], keyed by ordinal
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GroupFlags(u8);

impl GroupFlags {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, flag: GroupFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: GroupFlag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: GroupFlag) {
        self.0 &= !flag.bit();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = GroupFlag> + '_ {
        GroupFlag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl FromIterator<GroupFlag> for GroupFlags {
    fn from_iter<I: IntoIterator<Item = GroupFlag>>(iter: I) -> Self {
        let mut flags = Self::empty();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl<const N: usize> From<[GroupFlag; N]> for GroupFlags {
    fn from(flags: [GroupFlag; N]) -> Self {
        flags.into_iter().collect()
    }
}

impl fmt::Debug for GroupFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for GroupFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for flag in self.iter() {
            seq.serialize_element(&flag)?;
        }
        seq.end()
    }
}

/// Where a message's timestamp label is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampFlag {
    /// Timestamp shown per message
    #[default]
    Normal,
    /// Group timestamp shown above this message
    Top,
    /// Group timestamp shown below this message
    Bottom,
    Hidden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_contains_remove() {
        let mut flags = GroupFlags::empty();
        assert!(flags.is_empty());

        flags.insert(GroupFlag::RenderFooter);
        flags.insert(GroupFlag::StartGroup);
        flags.insert(GroupFlag::RenderFooter);
        assert_eq!(flags.len(), 2);
        assert!(flags.contains(GroupFlag::StartGroup));
        assert!(!flags.contains(GroupFlag::EndGroup));

        flags.remove(GroupFlag::StartGroup);
        assert_eq!(flags, GroupFlags::from([GroupFlag::RenderFooter]));
    }

    #[test]
    fn test_iter_follows_declaration_order() {
        let flags = GroupFlags::from([GroupFlag::RenderProfile, GroupFlag::StartGroup]);
        let collected: Vec<_> = flags.iter().collect();
        assert_eq!(collected, vec![GroupFlag::StartGroup, GroupFlag::RenderProfile]);
    }

    #[test]
    fn test_serialize_as_flag_names() {
        let flags = GroupFlags::from([GroupFlag::EndGroup, GroupFlag::RenderClearProfile]);
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"["endGroup","renderClearProfile"]"#);
    }
}
