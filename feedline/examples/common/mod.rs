use std::sync::Arc;

use feedline::StoreConnector;

#[must_use]
pub fn get_store_connector() -> Arc<dyn StoreConnector> {
    if std::env::var("FEEDLINE_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using in-memory store for CI) ---");
        Arc::new(feedline_mock::MockConnector::default())
    } else {
        Arc::new(feedline::MongoConnector::with_address("localhost", 27017))
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("feedline=debug,info")),
        )
        .try_init();
}
