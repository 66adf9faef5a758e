use chrono::{DateTime, Utc};
use msgkit_core::models::MessageContainer;
use msgkit_core::split_groups;
use serde::Serialize;

/// One visual group, as reported by `msgkit groups`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub message_ids: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

pub fn group_summaries(containers: &[MessageContainer<'_>]) -> Vec<GroupSummary> {
    split_groups(containers)
        .into_iter()
        .filter_map(|group| {
            let first = group.first()?;
            let last = group.last()?;
            Some(GroupSummary {
                message_ids: group.iter().map(|c| c.message.id.clone()).collect(),
                started_at: first.message.timestamp,
                ended_at: last.message.timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use msgkit_core::{Alignment, GroupingOptions, Message, MessageKind, MessageLayout};

    #[test]
    fn test_group_summaries() {
        let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();
        let messages = vec![
            Message::new("a", at(0), MessageKind::text("a"), Alignment::Left),
            Message::new("b", at(20), MessageKind::text("b"), Alignment::Left),
            Message::new("c", at(30), MessageKind::text("c"), Alignment::Right),
        ];
        let containers = MessageLayout::new(GroupingOptions::default())
            .layout(&messages)
            .unwrap();

        let summaries = group_summaries(&containers);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].message_ids, vec!["a", "b"]);
        assert_eq!(summaries[0].started_at, at(0));
        assert_eq!(summaries[0].ended_at, at(20));
        assert_eq!(summaries[1].message_ids, vec!["c"]);
    }
}
