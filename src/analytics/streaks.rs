use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analytics::ledger::Ledger;
use crate::models::matches::Match;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakKind {
    Win,
    Loss,
    CleanSheet,
}

impl StreakKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreakKind::Win => "win",
            StreakKind::Loss => "loss",
            StreakKind::CleanSheet => "clean_sheet",
        }
    }

    fn target(self) -> Outcome {
        match self {
            StreakKind::Win => Outcome::Win,
            StreakKind::Loss => Outcome::Loss,
            StreakKind::CleanSheet => Outcome::CleanSheet,
        }
    }

    /// Outcome of one match from one side's point of view.
    fn outcome(self, goals_for: i64, goals_against: i64) -> Outcome {
        match self {
            StreakKind::CleanSheet if goals_against == 0 => Outcome::CleanSheet,
            StreakKind::CleanSheet => Outcome::Conceded,
            StreakKind::Win | StreakKind::Loss => Outcome::from_goals(goals_for, goals_against),
        }
    }
}

impl fmt::Display for StreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStreakKind(pub String);

impl FromStr for StreakKind {
    type Err = UnknownStreakKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(StreakKind::Win),
            "loss" => Ok(StreakKind::Loss),
            "clean_sheet" => Ok(StreakKind::CleanSheet),
            other => Err(UnknownStreakKind(other.to_string())),
        }
    }
}

/// Per-match result symbol: W, D, L, or C/N for clean sheet / conceded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
    CleanSheet,
    Conceded,
}

impl Outcome {
    pub fn from_goals(goals_for: i64, goals_against: i64) -> Self {
        if goals_for > goals_against {
            Outcome::Win
        } else if goals_for < goals_against {
            Outcome::Loss
        } else {
            Outcome::Draw
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
            Outcome::CleanSheet => 'C',
            Outcome::Conceded => 'N',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakRow {
    pub team_id: String,
    pub streak: u32,
}

pub fn longest_streak(sequence: &[Outcome], target: Outcome) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    for &outcome in sequence {
        if outcome == target {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Result sequence per team, in kickoff order.
///
/// Matches are ordered by date here (undated first) regardless of the order
/// they were fetched in, since streaks only mean anything chronologically.
pub fn team_sequences(matches: &[Match], kind: StreakKind) -> Vec<(String, Vec<Outcome>)> {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|m| m.date);

    let mut ledger: Ledger<Vec<Outcome>> = Ledger::new();
    for m in ordered {
        let Some((home, away)) = m.teams() else {
            continue;
        };
        let score = m.final_score();
        ledger.row(home).push(kind.outcome(score.home, score.away));
        ledger.row(away).push(kind.outcome(score.away, score.home));
    }
    ledger.into_rows()
}

pub fn build_streaks(matches: &[Match], kind: StreakKind) -> Vec<StreakRow> {
    let target = kind.target();
    let mut rows: Vec<StreakRow> = team_sequences(matches, kind)
        .into_iter()
        .map(|(team_id, sequence)| {
            let streak = longest_streak(&sequence, target);
            tracing::debug!(
                "   → {} {} run {} from {}",
                team_id,
                kind,
                streak,
                sequence.iter().map(|o| o.symbol()).collect::<String>()
            );
            StreakRow { team_id, streak }
        })
        .collect();
    rows.sort_by(|a, b| b.streak.cmp(&a.streak));
    rows
}
