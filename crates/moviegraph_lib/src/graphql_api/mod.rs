pub mod api_types;
mod mutation_root;
mod server;

use std::time::Duration;

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, EmptySubscription, Schema, SchemaBuilder};
use moviegraph_store::{models, Store, StoreLoader};

pub use self::mutation_root::{ApiError, MutationRoot};
pub use self::server::QueryRoot;

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct ApiSchemaContext {
    pub store: Store,
    pub loader_director: DataLoader<StoreLoader<models::Director>>,
    pub loader_director_movies: DataLoader<StoreLoader<Vec<models::Movie>>>,
}

impl ApiSchemaContext {
    pub fn new(store: Store) -> Self {
        // The default delay is 1ms, but we're happy to wait a bit longer to
        // collect the relational lookups of a whole response level.
        let delay = Duration::from_millis(3);

        let loader_director =
            DataLoader::new(StoreLoader::new(store.clone()), tokio::task::spawn).delay(delay);
        let loader_director_movies =
            DataLoader::new(StoreLoader::new(store.clone()), tokio::task::spawn).delay(delay);

        Self {
            store,
            loader_director,
            loader_director_movies,
        }
    }
}

pub fn api_schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
}

/// Builds the schema once; it's meant to be shared by every request.
pub fn api_schema(ctx: ApiSchemaContext) -> ApiSchema {
    api_schema_builder().data(ctx).finish()
}

pub fn ctx_data<'a>(ctx: &'a Context) -> &'a ApiSchemaContext {
    ctx.data::<ApiSchemaContext>()
        .expect("Failed to get API context")
}
