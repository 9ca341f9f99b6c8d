pub mod mocks;

use async_graphql::{Request, Response, Variables};
use moviegraph_store::Store;
use serde_json::json;

use crate::graphql_api::{api_schema, ApiSchema, ApiSchemaContext};

/// A schema backed by a fresh in-memory store. The store is returned too, to
/// inspect what got persisted.
pub fn test_schema() -> (ApiSchema, Store) {
    let store = Store::in_memory();
    (schema_with_store(store.clone()), store)
}

pub fn schema_with_store(store: Store) -> ApiSchema {
    api_schema(ApiSchemaContext::new(store))
}

pub async fn execute(schema: &ApiSchema, query: &str) -> Response {
    schema.execute(query).await
}

pub async fn execute_with(
    schema: &ApiSchema,
    query: &str,
    variables: serde_json::Value,
) -> Response {
    let request = Request::new(query).variables(Variables::from_json(variables));
    schema.execute(request).await
}

/// Unwraps the `data` of a response that must not contain errors.
pub fn data(response: Response) -> serde_json::Value {
    assert!(
        response.errors.is_empty(),
        "Unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().expect("Invalid response data")
}

/// Creates a director through the API and returns its id.
pub async fn add_director(schema: &ApiSchema, name: &str, birth: Option<i32>) -> String {
    let response = execute_with(
        schema,
        "mutation($name: String, $birth: Int) { addDirector(name: $name, birth: $birth) { id } }",
        json!({ "name": name, "birth": birth }),
    )
    .await;

    id_of(data(response), "addDirector")
}

/// Creates a movie through the API and returns its id.
pub async fn add_movie(
    schema: &ApiSchema,
    title: &str,
    year: Option<i32>,
    director_id: Option<&str>,
) -> String {
    let response = execute_with(
        schema,
        "mutation($title: String!, $year: Int, $directorId: ID) {
            addMovie(title: $title, year: $year, directorId: $directorId) { id }
        }",
        json!({ "title": title, "year": year, "directorId": director_id }),
    )
    .await;

    id_of(data(response), "addMovie")
}

fn id_of(data: serde_json::Value, field: &str) -> String {
    data[field]["id"]
        .as_str()
        .expect("Missing id in response")
        .to_string()
}
