use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::database::filter::{DateOrder, MatchFilter};
use crate::database::store::MatchStore;
use crate::errors::Result;
use crate::models::matches::Match;

/// In-process store with the same filter semantics as the Mongo queries.
#[derive(Default)]
pub struct MemoryStore {
    matches: Vec<Match>,
    players: HashMap<String, Option<String>>,
    player_lookups: AtomicUsize,
    pub reachable: bool,
}

impl MemoryStore {
    pub fn new(docs: Vec<Document>) -> Self {
        MemoryStore {
            matches: docs.iter().map(Match::from).collect(),
            reachable: true,
            ..Default::default()
        }
    }

    pub fn with_player(mut self, id: &str, name: Option<&str>) -> Self {
        self.players.insert(id.to_string(), name.map(str::to_string));
        self
    }

    pub fn player_lookups(&self) -> usize {
        self.player_lookups.load(Ordering::SeqCst)
    }
}

fn accepts(filter: &MatchFilter, m: &Match) -> bool {
    if filter.competition_id.is_some() && m.competition_id != filter.competition_id {
        return false;
    }
    if filter.season_id.is_some() && m.season_id != filter.season_id {
        return false;
    }
    if let Some((team_a, team_b)) = &filter.between {
        if !m.is_between(team_a, team_b) {
            return false;
        }
    }
    if let Some(from) = filter.date_from {
        if !m.date.is_some_and(|d| d >= from) {
            return false;
        }
    }
    if let Some(to) = filter.date_to {
        if !m.date.is_some_and(|d| d <= to) {
            return false;
        }
    }
    true
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn find_matches(&self, filter: &MatchFilter) -> Result<Vec<Match>> {
        let mut found: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| accepts(filter, m))
            .cloned()
            .collect();

        match filter.sort {
            Some(DateOrder::Ascending) => found.sort_by_key(|m| m.date),
            Some(DateOrder::Descending) => found.sort_by(|a, b| b.date.cmp(&a.date)),
            None => {}
        }
        if let Some(limit) = filter.limit.filter(|&l| l > 0) {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn find_player_names(&self, ids: &[String]) -> Result<HashMap<String, Option<String>>> {
        self.player_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(ids
            .iter()
            .filter_map(|id| self.players.get(id).map(|name| (id.clone(), name.clone())))
            .collect())
    }

    async fn ping(&self) -> bool {
        self.reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            doc! { "_id": "1", "competition_id": "epl", "season_id": "2023", "date": "2023-08-12", "home_team_id": "a", "away_team_id": "b" },
            doc! { "_id": "2", "competition_id": "epl", "season_id": "2024", "date": "2024-08-17", "home_team_id": "b", "away_team_id": "a" },
            doc! { "_id": "3", "competition_id": "fac", "season_id": "2023", "date": "2024-01-06", "home_team_id": "a", "away_team_id": "c" },
        ])
    }

    async fn ids(store: &MemoryStore, filter: MatchFilter) -> Vec<String> {
        store
            .find_matches(&filter)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|m| m.id)
            .collect()
    }

    #[tokio::test]
    async fn filters_mirror_mongo_queries() {
        let store = store();

        assert_eq!(ids(&store, MatchFilter::scoped(Some("epl".into()), None)).await, vec!["1", "2"]);
        assert_eq!(ids(&store, MatchFilter::scoped(None, Some("2023".into()))).await, vec!["1", "3"]);

        let h2h = MatchFilter {
            between: Some(("a".into(), "b".into())),
            limit: Some(1),
            ..Default::default()
        }
        .sorted(DateOrder::Descending);
        assert_eq!(ids(&store, h2h).await, vec!["2"]);

        let from = crate::models::matches::parse_iso_datetime("2024-01-01");
        assert_eq!(ids(&store, MatchFilter::default().within(from, None)).await, vec!["2", "3"]);
    }

    #[tokio::test]
    async fn counts_player_lookups() {
        let store = store().with_player("p1", Some("Pelé"));
        let names = store
            .find_player_names(&["p1".to_string(), "p2".to_string()])
            .await
            .unwrap();

        assert_eq!(store.player_lookups(), 1);
        assert_eq!(names.get("p1"), Some(&Some("Pelé".to_string())));
        assert!(!names.contains_key("p2"));
    }
}
