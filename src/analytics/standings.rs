use std::cmp::{Ordering, Reverse};

use serde::Serialize;

use crate::analytics::ledger::Ledger;
use crate::models::matches::Match;

/// Running totals for one team. Goal difference and points are derived on
/// demand and never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamStanding {
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: i64,
    pub goals_against: i64,
}

impl TeamStanding {
    pub fn goal_difference(&self) -> i64 {
        self.goals_for.saturating_sub(self.goals_against)
    }

    pub fn points(&self) -> i64 {
        i64::from(self.wins) * 3 + i64::from(self.draws)
    }

    fn record(&mut self, goals_for: i64, goals_against: i64) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(goals_for);
        self.goals_against = self.goals_against.saturating_add(goals_against);
        match goals_for.cmp(&goals_against) {
            Ordering::Greater => self.wins = self.wins.saturating_add(1),
            Ordering::Less => self.losses = self.losses.saturating_add(1),
            Ordering::Equal => self.draws = self.draws.saturating_add(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub team_id: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

impl From<(String, TeamStanding)> for TableRow {
    fn from((team_id, standing): (String, TeamStanding)) -> Self {
        TableRow {
            team_id,
            played: standing.played,
            wins: standing.wins,
            draws: standing.draws,
            losses: standing.losses,
            goals_for: standing.goals_for,
            goals_against: standing.goals_against,
            goal_difference: standing.goal_difference(),
            points: standing.points(),
        }
    }
}

/// Builds the league table for a set of matches.
///
/// Ranked by points, then goal difference, then goals scored. Teams still
/// level after that are unordered relative to each other (in practice they
/// keep first-seen order). Matches missing either team are skipped.
pub fn build_table(matches: &[Match]) -> Vec<TableRow> {
    let mut ledger: Ledger<TeamStanding> = Ledger::new();

    for m in matches {
        let Some((home, away)) = m.teams() else {
            continue;
        };
        let score = m.final_score();
        ledger.row(home).record(score.home, score.away);
        ledger.row(away).record(score.away, score.home);
    }

    let mut table: Vec<TableRow> = ledger.into_rows().into_iter().map(TableRow::from).collect();
    table.sort_by_key(|row| {
        (
            Reverse(row.points),
            Reverse(row.goal_difference),
            Reverse(row.goals_for),
        )
    });
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn fixture(home: &str, away: &str, score: &str) -> Match {
        Match::from(&doc! {
            "home_team_id": home,
            "away_team_id": away,
            "score": { "fulltime": score },
        })
    }

    fn row<'a>(table: &'a [TableRow], team: &str) -> &'a TableRow {
        table.iter().find(|r| r.team_id == team).expect("team in table")
    }

    #[test]
    fn two_match_league() {
        let table = build_table(&[fixture("X", "Y", "3-1"), fixture("Y", "X", "2-2")]);

        assert_eq!(table.len(), 2);
        assert_eq!(
            table[0],
            TableRow {
                team_id: "X".into(),
                played: 2,
                wins: 1,
                draws: 1,
                losses: 0,
                goals_for: 5,
                goals_against: 3,
                goal_difference: 2,
                points: 4,
            }
        );
        assert_eq!(table[1].team_id, "Y");
        assert_eq!(table[1].points, 1);
        assert_eq!(table[1].goal_difference, -2);
    }

    #[test]
    fn goals_are_symmetric_per_match() {
        let table = build_table(&[fixture("A", "B", "4-1")]);
        let a = row(&table, "A");
        let b = row(&table, "B");

        assert_eq!(a.goals_against, b.goals_for);
        assert_eq!(a.goals_for, b.goals_against);
        assert_eq!((a.wins, b.losses), (1, 1));
    }

    #[test]
    fn matches_missing_a_team_are_skipped() {
        let orphan = Match::from(&doc! { "home_team_id": "A", "score": "5-0" });
        let table = build_table(&[orphan, fixture("A", "B", "0-0")]);

        assert_eq!(row(&table, "A").played, 1);
        assert_eq!(row(&table, "A").draws, 1);
        assert_eq!(row(&table, "B").draws, 1);
    }

    #[test]
    fn malformed_score_counts_as_goalless_draw() {
        let bad = Match::from(&doc! { "home_team_id": "A", "away_team_id": "B", "score": "abandoned" });
        let table = build_table(&[bad]);

        assert!(table.iter().all(|r| r.draws == 1 && r.goals_for == 0));
    }

    #[test]
    fn ties_break_on_goal_difference_then_goals_for() {
        // A, B and C all finish on 3 points.
        let table = build_table(&[
            fixture("A", "D", "5-0"),
            fixture("B", "D", "3-0"),
            fixture("C", "E", "4-1"),
        ]);
        let order: Vec<&str> = table.iter().map(|r| r.team_id.as_str()).collect();

        // A: +5; B and C: +3, C scored more.
        assert_eq!(&order[..3], &["A", "C", "B"]);
    }

    #[test]
    fn more_wins_outranks_draw_heavy_record_on_equal_points() {
        // W: one win, one loss (3 pts, GD +1). D: three draws (3 pts, GD 0).
        let table = build_table(&[
            fixture("W", "P", "3-0"),
            fixture("Q", "W", "2-0"),
            fixture("D", "P", "1-1"),
            fixture("D", "Q", "0-0"),
            fixture("R", "D", "2-2"),
        ]);
        let w = table.iter().position(|r| r.team_id == "W").unwrap();
        let d = table.iter().position(|r| r.team_id == "D").unwrap();

        assert_eq!(table[w].points, table[d].points);
        assert!(w < d);
    }

    #[test]
    fn self_fixture_counts_both_sides() {
        let table = build_table(&[fixture("A", "A", "1-0")]);
        let a = row(&table, "A");

        assert_eq!(a.played, 2);
        assert_eq!((a.wins, a.losses), (1, 1));
        assert_eq!(a.goal_difference, 0);
    }

    #[test]
    fn absurd_stored_scores_saturate_instead_of_overflowing() {
        let huge = || {
            Match::from(&doc! {
                "home_team_id": "A",
                "away_team_id": "B",
                "score": { "fulltime": { "home": i64::MAX, "away": 0_i64 } },
            })
        };
        let table = build_table(&[huge(), huge(), fixture("B", "A", "0-0")]);
        let a = row(&table, "A");
        let b = row(&table, "B");

        assert_eq!(a.played, 3);
        assert_eq!(a.goals_for, i64::MAX);
        assert_eq!(a.goal_difference, i64::MAX);
        assert_eq!(b.goals_against, i64::MAX);
        assert_eq!(b.goal_difference, -i64::MAX);
        assert_eq!(table[0].team_id, "A");
    }
}
