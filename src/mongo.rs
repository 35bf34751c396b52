// src/mongo.rs
use crate::error::{RepositoryError, RepositoryResult};
use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

const APP_NAME: &str = "person_repo";
const FALLBACK_DATABASE: &str = "test";

pub async fn connect(uri: &str) -> RepositoryResult<Client> {
    let mut client_options = ClientOptions::parse(uri)
        .await
        .map_err(RepositoryError::Connection)?;
    client_options.app_name = Some(APP_NAME.to_string());
    let client = Client::with_options(client_options).map_err(RepositoryError::Connection)?;
    info!("MongoDB client ready");
    Ok(client)
}

/// Picks the explicit name, then the URI's default database, then `test`.
pub fn database(client: &Client, name: Option<&str>) -> Database {
    match name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
    }
}

pub async fn ping(db: &Database) -> RepositoryResult<()> {
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(RepositoryError::Connection)?;
    info!(database = db.name(), "MongoDB ping succeeded");
    Ok(())
}
