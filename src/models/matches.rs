use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mongodb::bson::{Bson, Document};

use crate::analytics::score::{self, FinalScore};

/// A match document as the analytics engine sees it.
///
/// Built leniently from raw BSON: any field with an unexpected type is
/// treated as absent so a single malformed document never fails a report.
/// Lineups and stats are not read.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: Option<String>,
    pub competition_id: Option<String>,
    pub season_id: Option<String>,
    /// Kickoff, when the stored date could be read.
    pub date: Option<DateTime<Utc>>,
    /// Raw date field, echoed back in match projections.
    pub stored_date: Option<Bson>,
    pub home_team_id: Option<String>,
    pub away_team_id: Option<String>,
    /// Raw score field, in whichever shape it was stored.
    pub score: Option<Bson>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: Option<String>,
    pub player_id: Option<String>,
}

impl Match {
    pub fn final_score(&self) -> FinalScore {
        score::extract(self.score.as_ref())
    }

    /// Both team ids, or `None` when either side is missing.
    pub fn teams(&self) -> Option<(&str, &str)> {
        match (self.home_team_id.as_deref(), self.away_team_id.as_deref()) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn is_between(&self, team_a: &str, team_b: &str) -> bool {
        matches!(
            self.teams(),
            Some((home, away)) if (home == team_a && away == team_b) || (home == team_b && away == team_a)
        )
    }
}

impl Event {
    /// Player credited with a goal. Empty ids do not count.
    pub fn scorer(&self) -> Option<&str> {
        if self.kind.as_deref() != Some("goal") {
            return None;
        }
        self.player_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl From<&Document> for Match {
    fn from(doc: &Document) -> Self {
        let events = match doc.get("events") {
            Some(Bson::Array(items)) => items
                .iter()
                .filter_map(Bson::as_document)
                .map(Event::from)
                .collect(),
            _ => Vec::new(),
        };

        Match {
            id: doc.get("_id").and_then(id_value),
            competition_id: doc.get("competition_id").and_then(id_value),
            season_id: doc.get("season_id").and_then(id_value),
            date: doc.get("date").and_then(date_value),
            stored_date: doc.get("date").filter(|d| !matches!(d, Bson::Null)).cloned(),
            home_team_id: doc.get("home_team_id").and_then(id_value),
            away_team_id: doc.get("away_team_id").and_then(id_value),
            score: doc.get("score").filter(|s| !matches!(s, Bson::Null)).cloned(),
            events,
        }
    }
}

impl From<&Document> for Event {
    fn from(doc: &Document) -> Self {
        Event {
            kind: doc.get_str("type").ok().map(str::to_string),
            player_id: doc.get("player_id").and_then(id_value),
        }
    }
}

/// Identifiers are stored as strings by the loaders, but ObjectIds and
/// integers show up in hand-edited data.
pub fn id_value(value: &Bson) -> Option<String> {
    match value {
        Bson::String(s) => Some(s.clone()),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        _ => None,
    }
}

fn date_value(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis()),
        Bson::String(s) => parse_iso_datetime(s),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps, naive ISO timestamps (read as UTC) and
/// plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_iso_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
