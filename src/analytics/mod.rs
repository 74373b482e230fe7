//! Match-derived analytics: league tables, scorer boards, streaks and
//! head-to-head history.
//!
//! Everything is recomputed per request from whatever the store returns for
//! the requested scope; nothing is cached between calls.

pub mod head_to_head;
pub mod leaderboard;
pub mod ledger;
pub mod score;
pub mod standings;
pub mod streaks;

use std::sync::Arc;

use crate::database::filter::{DateOrder, MatchFilter};
use crate::database::store::MatchStore;
use crate::errors::Result;

use head_to_head::MatchSummary;
use leaderboard::ScorerEntry;
use standings::TableRow;
use streaks::{StreakKind, StreakRow};

#[derive(Clone)]
pub struct AnalyticsEngine {
    store: Arc<dyn MatchStore>,
}

impl AnalyticsEngine {
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        AnalyticsEngine { store }
    }

    pub async fn league_table(&self, scope: MatchFilter) -> Result<Vec<TableRow>> {
        let matches = self.store.find_matches(&scope).await?;
        tracing::debug!("   → {} matches in table scope", matches.len());
        Ok(standings::build_table(&matches))
    }

    /// Skips the player lookup entirely when nobody scored in scope.
    pub async fn top_scorers(&self, scope: MatchFilter, limit: i64) -> Result<Vec<ScorerEntry>> {
        let matches = self.store.find_matches(&scope).await?;
        let counts = leaderboard::count_goals(&matches);
        if counts.is_empty() {
            tracing::debug!("   → no goals across {} matches", matches.len());
            return Ok(Vec::new());
        }

        let ids: Vec<String> = counts.keys().map(str::to_string).collect();
        let names = self.store.find_player_names(&ids).await?;
        tracing::debug!("   → resolved {} of {} scorer names", names.len(), ids.len());
        Ok(leaderboard::rank_scorers(counts, &names, limit))
    }

    pub async fn streaks(&self, scope: MatchFilter, kind: StreakKind) -> Result<Vec<StreakRow>> {
        let matches = self.store.find_matches(&scope.sorted(DateOrder::Ascending)).await?;
        tracing::debug!("   → {} matches for {} streaks", matches.len(), kind);
        Ok(streaks::build_streaks(&matches, kind))
    }

    pub async fn head_to_head(&self, team_a: &str, team_b: &str, limit: i64) -> Result<Vec<MatchSummary>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let filter = MatchFilter {
            between: Some((team_a.to_string(), team_b.to_string())),
            limit: Some(limit),
            ..Default::default()
        }
        .sorted(DateOrder::Descending);

        let matches = self.store.find_matches(&filter).await?;
        Ok(head_to_head::summarize(&matches, team_a, team_b, limit))
    }
}
