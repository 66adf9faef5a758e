use crate::models::{GroupFlag, MessageContainer};

/// Split containers into one slice per visual group.
///
/// Boundaries come from the computed `StartGroup`/`EndGroup` flags, so this never
/// re-runs the boundary predicate. Ungrouped containers each form their own group.
pub fn split_groups<'c, 'a>(containers: &'c [MessageContainer<'a>]) -> Vec<&'c [MessageContainer<'a>]> {
    let mut groups = Vec::new();
    let mut start = 0;

    for (i, container) in containers.iter().enumerate() {
        if i > start && container.has_flag(GroupFlag::StartGroup) {
            groups.push(&containers[start..i]);
            start = i;
        }
        if container.is_ungrouped() || container.has_flag(GroupFlag::EndGroup) {
            groups.push(&containers[start..=i]);
            start = i + 1;
        }
    }

    if start < containers.len() {
        groups.push(&containers[start..]);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Alignment, GroupFlags, Message, MessageKind, TimestampFlag};
    use chrono::{TimeZone, Utc};

    fn message(id: &str) -> Message {
        Message::new(
            id,
            Utc.timestamp_opt(0, 0).unwrap(),
            MessageKind::text(id),
            Alignment::Left,
        )
    }

    fn container<'a>(message: &'a Message, flags: &[GroupFlag]) -> MessageContainer<'a> {
        MessageContainer::grouped(
            message,
            flags.iter().copied().collect::<GroupFlags>(),
            TimestampFlag::Normal,
        )
    }

    #[test]
    fn test_split_groups() {
        let (a, b, c, d) = (message("a"), message("b"), message("c"), message("d"));
        let containers = vec![
            container(&a, &[GroupFlag::StartGroup]),
            container(&b, &[GroupFlag::EndGroup]),
            container(&c, &[GroupFlag::StartGroup, GroupFlag::EndGroup]),
            container(&d, &[GroupFlag::StartGroup]),
        ];

        let groups = split_groups(&containers);
        let ids: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|c| c.id()).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn test_split_ungrouped() {
        let (a, b) = (message("a"), message("b"));
        let containers = vec![MessageContainer::ungrouped(&a), MessageContainer::ungrouped(&b)];
        assert_eq!(split_groups(&containers).len(), 2);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_groups(&[]).is_empty());
    }
}
