use serde::Serialize;

use crate::analytics::head_to_head::MatchSummary;
use crate::analytics::leaderboard::ScorerEntry;
use crate::analytics::standings::TableRow;
use crate::analytics::streaks::{StreakKind, StreakRow};

#[derive(Debug, Serialize)]
pub struct LeagueTableResponse {
    pub competition_id: String,
    pub season_id: String,
    pub table: Vec<TableRow>,
}

#[derive(Debug, Serialize)]
pub struct LeadersResponse {
    pub leaders: Vec<ScorerEntry>,
}

#[derive(Debug, Serialize)]
pub struct StreaksResponse {
    #[serde(rename = "type")]
    pub kind: StreakKind,
    pub streaks: Vec<StreakRow>,
}

#[derive(Debug, Serialize)]
pub struct HeadToHeadResponse {
    pub team_a: String,
    pub team_b: String,
    pub matches: Vec<MatchSummary>,
}
