use mongodb::{
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::sync::Arc;
use std::time::Duration;

/// Build a pooled client. Nothing is sent to the server until the first operation.
pub async fn build_mongo_client(uri: &str) -> Result<Arc<Client>, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.app_name = Some("tripcraft-api".to_string());
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    Ok(Arc::new(Client::with_options(client_options)?))
}

/// Connect and verify the deployment answers a ping on `database`.
///
/// A failed ping is only logged; the pool keeps retrying in the background.
pub async fn create_mongo_client(
    uri: &str,
    database: &str,
) -> Result<Arc<Client>, mongodb::error::Error> {
    log::info!("Connecting to MongoDB");
    let client = build_mongo_client(uri).await?;

    match client
        .database(database)
        .run_command(bson::doc! { "ping": 1 })
        .await
    {
        Ok(_) => log::info!("Connected to MongoDB, database '{}'", database),
        Err(e) => {
            log::warn!("MongoDB ping failed: {}", e);
            log::warn!("Trip storage routes will fail until the database is reachable");
        }
    }

    Ok(client)
}
