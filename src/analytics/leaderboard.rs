use std::collections::HashMap;

use serde::Serialize;

use crate::analytics::ledger::Ledger;
use crate::models::matches::Match;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerEntry {
    pub player_id: String,
    pub name: Option<String>,
    pub goals: u32,
}

/// Goals per player across every event of every match, in first-scored order.
pub fn count_goals(matches: &[Match]) -> Ledger<u32> {
    let mut ledger: Ledger<u32> = Ledger::new();
    for scorer in matches.iter().flat_map(|m| &m.events).filter_map(|e| e.scorer()) {
        *ledger.row(scorer) += 1;
    }
    ledger
}

/// Orders scorers by goals (ties unordered) and keeps the first `limit`.
/// A non-positive limit gives an empty board.
pub fn rank_scorers(
    counts: Ledger<u32>,
    names: &HashMap<String, Option<String>>,
    limit: i64,
) -> Vec<ScorerEntry> {
    let mut leaders: Vec<ScorerEntry> = counts
        .into_rows()
        .into_iter()
        .map(|(player_id, goals)| ScorerEntry {
            name: names.get(&player_id).cloned().flatten(),
            player_id,
            goals,
        })
        .collect();
    leaders.sort_by(|a, b| b.goals.cmp(&a.goals));
    leaders.truncate(usize::try_from(limit).unwrap_or(0));
    leaders
}
