use clap::Parser;
use moviegraph_store::Store;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct CliOptions {
    /// The MongoDB connection string. The database named in its path is
    /// used, or `moviegraph` if it names none. Can also be set via env. var.
    #[clap(long, env = "MONGODB_URI", required_unless_present = "in_memory")]
    pub database_url: Option<String>,
    /// The port on which the GraphQL API server should listen.
    #[clap(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,
    /// Keep all records in process memory instead of MongoDB. Nothing
    /// survives a restart.
    #[clap(long, env = "MOVIEGRAPH_IN_MEMORY")]
    pub in_memory: bool,
}

impl CliOptions {
    /// Builds the configured store. For MongoDB this also checks that the
    /// server is reachable.
    pub async fn store(&self) -> anyhow::Result<Store> {
        if self.in_memory {
            info!("Using the in-memory store");
            return Ok(Store::in_memory());
        }

        match &self.database_url {
            Some(url) => Store::connect(url).await,
            None => anyhow::bail!("no MongoDB connection string configured"),
        }
    }
}
