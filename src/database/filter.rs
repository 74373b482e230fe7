use chrono::{DateTime, Utc};
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    Ascending,
    Descending,
}

/// Query over the `matches` collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchFilter {
    pub competition_id: Option<String>,
    pub season_id: Option<String>,
    /// Meetings between two teams, either side at home.
    pub between: Option<(String, String)>,
    /// Inclusive kickoff window.
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub sort: Option<DateOrder>,
    pub limit: Option<i64>,
}

impl MatchFilter {
    pub fn scoped(competition_id: Option<String>, season_id: Option<String>) -> Self {
        MatchFilter {
            competition_id,
            season_id,
            ..Default::default()
        }
    }

    pub fn within(mut self, date_from: Option<DateTime<Utc>>, date_to: Option<DateTime<Utc>>) -> Self {
        self.date_from = date_from;
        self.date_to = date_to;
        self
    }

    pub fn sorted(mut self, order: DateOrder) -> Self {
        self.sort = Some(order);
        self
    }

    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(competition_id) = &self.competition_id {
            filter.insert("competition_id", competition_id);
        }
        if let Some(season_id) = &self.season_id {
            filter.insert("season_id", season_id);
        }
        if let Some((team_a, team_b)) = &self.between {
            filter.insert(
                "$or",
                vec![
                    doc! { "home_team_id": team_a, "away_team_id": team_b },
                    doc! { "home_team_id": team_b, "away_team_id": team_a },
                ],
            );
        }

        let mut range = doc! {};
        if let Some(from) = self.date_from {
            range.insert("$gte", BsonDateTime::from_millis(from.timestamp_millis()));
        }
        if let Some(to) = self.date_to {
            range.insert("$lte", BsonDateTime::from_millis(to.timestamp_millis()));
        }
        if !range.is_empty() {
            filter.insert("date", range);
        }

        filter
    }

    pub fn sort_document(&self) -> Option<Document> {
        self.sort.map(|order| match order {
            DateOrder::Ascending => doc! { "date": 1 },
            DateOrder::Descending => doc! { "date": -1 },
        })
    }
}
