use std::collections::HashMap;

use crate::models::{Reaction, ReactionSummary};

/// Fold raw reaction rows into one entry per emoji.
///
/// Emojis appear in order of their first row, and users in row order. Rows are expected to be
/// unique per (user, emoji); no deduplication happens here.
pub fn summarize_reactions(rows: &[Reaction]) -> Vec<ReactionSummary> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<ReactionSummary> = Vec::new();

    for row in rows {
        let slot = *slots.entry(row.emoji.as_str()).or_insert_with(|| {
            summaries.push(ReactionSummary {
                emoji: row.emoji.clone(),
                count: 0,
                users: Vec::new(),
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.users.push(row.user_id.clone());
        summary.count = summary.users.len();
    }

    summaries
}

/// Split rows of many messages by message id, keeping row order within each message.
pub fn group_by_message(rows: Vec<Reaction>) -> HashMap<String, Vec<Reaction>> {
    let mut grouped: HashMap<String, Vec<Reaction>> = HashMap::new();
    for row in rows {
        grouped.entry(row.message_id.clone()).or_default().push(row);
    }
    grouped
}
