use std::collections::HashMap;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Collection, Database};

use crate::database::filter::MatchFilter;
use crate::errors::Result;
use crate::models::matches::{id_value, Match};

/// Read access to match and player data used by the analytics endpoints.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn find_matches(&self, filter: &MatchFilter) -> Result<Vec<Match>>;

    /// Display names for the given player ids. Ids with no player document
    /// are left out of the map; players without a name map to `None`.
    async fn find_player_names(&self, ids: &[String]) -> Result<HashMap<String, Option<String>>>;

    async fn ping(&self) -> bool;
}

#[derive(Clone)]
pub struct MongoMatchStore {
    db: Database,
}

impl MongoMatchStore {
    pub fn new(db: Database) -> Self {
        MongoMatchStore { db }
    }
}

#[async_trait]
impl MatchStore for MongoMatchStore {
    async fn find_matches(&self, filter: &MatchFilter) -> Result<Vec<Match>> {
        let collection: Collection<Document> = self.db.collection("matches");
        let query = filter.to_document();
        tracing::debug!("   → matches filter: {:?}", query);

        let mut find = collection.find(query);
        if let Some(sort) = filter.sort_document() {
            find = find.sort(sort);
        }
        if let Some(limit) = filter.limit {
            find = find.limit(limit);
        }

        let docs: Vec<Document> = find.await?.try_collect().await?;
        Ok(docs.iter().map(Match::from).collect())
    }

    async fn find_player_names(&self, ids: &[String]) -> Result<HashMap<String, Option<String>>> {
        let collection: Collection<Document> = self.db.collection("players");

        // Events reference players by string id; older imports keyed players by ObjectId.
        let mut keys: Vec<Bson> = ids.iter().cloned().map(Bson::String).collect();
        keys.extend(
            ids.iter()
                .filter_map(|id| ObjectId::parse_str(id).ok())
                .map(Bson::ObjectId),
        );

        let docs: Vec<Document> = collection
            .find(doc! { "_id": { "$in": keys } })
            .projection(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(docs
            .iter()
            .filter_map(|doc| {
                let id = doc.get("_id").and_then(id_value)?;
                let name = doc.get_str("name").ok().map(str::to_string);
                Some((id, name))
            })
            .collect())
    }

    async fn ping(&self) -> bool {
        match self.db.run_command(doc! { "ping": 1 }).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        }
    }
}
