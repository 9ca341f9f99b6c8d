use mongodb::{Client, Database};
use moviegraph_store::Store;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

const MONGO_PORT: u16 = 27017;

/// A wrapper around a [`Store`] that is backed by a containerized MongoDB
/// server.
#[derive(derive_more::Deref)]
pub struct EmptyStoreForTesting {
    #[deref]
    store: Store,
    connection_string: String,
    _container: ContainerAsync<Mongo>,
}

impl EmptyStoreForTesting {
    pub async fn new() -> anyhow::Result<Self> {
        let container = Mongo::default().start().await?;
        let connection_string = format!(
            "mongodb://127.0.0.1:{}/moviegraph_test",
            container.get_host_port_ipv4(MONGO_PORT).await?
        );

        let store = Store::connect(&connection_string).await?;
        Ok(Self {
            _container: container,
            connection_string,
            store,
        })
    }

    /// Direct access to the same database, for writing documents the way
    /// other clients would.
    pub async fn raw_database(&self) -> anyhow::Result<Database> {
        let client = Client::with_uri_str(&self.connection_string).await?;
        Ok(client.database("moviegraph_test"))
    }
}
