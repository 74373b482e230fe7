use mongodb::bson::Bson;
use serde::Serialize;
use serde_json::Value;

use crate::models::matches::Match;

/// Public view of a match: identity, kickoff, scope, sides and the score,
/// with date and score echoed as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub date: Value,
    pub competition_id: Option<String>,
    pub season_id: Option<String>,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
    pub score: Value,
}

impl From<&Match> for MatchSummary {
    fn from(m: &Match) -> Self {
        MatchSummary {
            id: m.id.clone(),
            date: m.stored_date.as_ref().map(stored_date_value).unwrap_or(Value::Null),
            competition_id: m.competition_id.clone(),
            season_id: m.season_id.clone(),
            home_team_id: m.home_team_id.clone(),
            away_team_id: m.away_team_id.clone(),
            score: m
                .score
                .clone()
                .map(|s| s.into_relaxed_extjson())
                .unwrap_or(Value::Null),
        }
    }
}

/// Strings pass through untouched; BSON datetimes render as RFC 3339.
fn stored_date_value(date: &Bson) -> Value {
    match date {
        Bson::String(s) => Value::String(s.clone()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(rendered) => Value::String(rendered),
            Err(_) => date.clone().into_relaxed_extjson(),
        },
        other => other.clone().into_relaxed_extjson(),
    }
}

/// Meetings between two teams in either orientation, newest first.
pub fn summarize(matches: &[Match], team_a: &str, team_b: &str, limit: i64) -> Vec<MatchSummary> {
    let mut meetings: Vec<&Match> = matches.iter().filter(|m| m.is_between(team_a, team_b)).collect();
    meetings.sort_by(|a, b| b.date.cmp(&a.date));
    meetings
        .into_iter()
        .take(usize::try_from(limit).unwrap_or(0))
        .map(MatchSummary::from)
        .collect()
}
