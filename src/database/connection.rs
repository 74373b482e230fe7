use mongodb::{Client, Database};

use crate::config::AppConfig;
use crate::errors::Result;

const EXPECTED_COLLECTIONS: [&str; 2] = ["matches", "players"];

pub async fn connect(config: &AppConfig) -> Result<Database> {
    let client = Client::with_uri_str(&config.mongo_uri).await?;
    let db = client.database(&config.database_name);

    // Verify database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            tracing::info!("✅ Connected to database: {}", config.database_name);
            tracing::debug!("📂 Collections found: {:?}", collections);

            for name in EXPECTED_COLLECTIONS {
                if !collections.iter().any(|c| c == name) {
                    tracing::warn!("⚠️ '{}' collection not found in database", name);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Database '{}' may not exist or is inaccessible: {}",
                config.database_name,
                e
            );
        }
    }

    Ok(db)
}
