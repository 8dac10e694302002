//! MongoDB database factory.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use omni_config::MongoConfig;
use omni_core::{OmniError, OmniResult};
use tracing::{error, info};

/// Connects to `config.uri()` and returns the `config.schema` database.
///
/// The server is pinged before returning so a bad address fails at startup
/// rather than on the first query.
pub async fn connect_mongo(config: &MongoConfig) -> OmniResult<Database> {
    info!(host = %config.host, port = config.port, "Connecting to MongoDB...");

    let options = client_options(config).await?;
    let client = Client::with_options(options).map_err(|e| {
        error!("failed to settle mongo client: {}", e);
        OmniError::Database(format!("Failed to create mongo client: {}", e))
    })?;

    let database = client.database(&config.schema);
    database.run_command(doc! { "ping": 1 }).await.map_err(|e| {
        error!("failed to settle mongo connection: {}", e);
        OmniError::Database(format!("Failed to connect: {}", e))
    })?;

    info!(schema = %config.schema, "MongoDB connection established");
    Ok(database)
}

/// Parses the URI and applies pool sizing and timeouts.
pub async fn client_options(config: &MongoConfig) -> OmniResult<ClientOptions> {
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(|e| OmniError::configuration(format!("Invalid mongo address: {}", e)))?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.max_idle_time = Some(config.max_idle_time());
    options.connect_timeout = Some(config.timeout());
    options.server_selection_timeout = Some(config.timeout());

    Ok(options)
}
