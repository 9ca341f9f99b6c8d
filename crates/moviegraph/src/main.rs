use std::net::Ipv4Addr;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::response::IntoResponse;
use axum::Router;
use clap::Parser;
use moviegraph_lib::graphql_api::{self, ApiSchema};
use moviegraph_lib::{CliOptions, MOVIEGRAPH_VERSION};
use tokio::net::TcpListener;
use tracing::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!(version = MOVIEGRAPH_VERSION, "Parse options");
    let cli_options = CliOptions::parse();

    info!("Initialize store");
    let store = cli_options.store().await.inspect_err(|err| {
        error!(error = ?err, "Store initialization failed");
    })?;
    info!("Store initialization successful");

    // Built once, shared by every request.
    let api_schema = graphql_api::api_schema(graphql_api::ApiSchemaContext::new(store));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, cli_options.port)).await?;
    info!(
        port = cli_options.port,
        "Movie app is running on http://localhost:{}/graphql", cli_options.port
    );

    // Listen to requests forever.
    axum::serve(listener, axum_server(api_schema)).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn axum_server(api_schema: ApiSchema) -> Router<()> {
    use axum::routing::get;

    axum::Router::new()
        .route("/", get(|| async { "Ready to roll!" }))
        .route(
            "/graphql",
            get(graphiql_route).post_service(GraphQL::new(api_schema)),
        )
}

async fn graphiql_route() -> impl IntoResponse {
    axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
