use async_graphql::{Context, Object, Result, ID};
use moviegraph_common_types::NativeId;

use super::{api_types, ctx_data};

/// Malformed ids are treated like ids that match nothing, so that lookups
/// never surface a parsing error.
fn lookup_id(id: Option<&ID>) -> Option<NativeId> {
    NativeId::parse_lenient(id.map(|id| id.as_str()))
}

pub struct QueryRoot;

#[Object(name = "RootQuery")]
impl QueryRoot {
    /// Fetches a single movie by its database-assigned id. Returns `null`
    /// if the id is malformed or no movie has it.
    async fn movie(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<api_types::Movie>> {
        let Some(id) = lookup_id(id.as_ref()) else {
            return Ok(None);
        };

        let ctx_data = ctx_data(ctx);
        Ok(ctx_data.store.movie(id).await?.map(Into::into))
    }

    /// Fetches a single director by its database-assigned id. Returns `null`
    /// if the id is malformed or no director has it.
    async fn director(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
    ) -> Result<Option<api_types::Director>> {
        let Some(id) = lookup_id(id.as_ref()) else {
            return Ok(None);
        };

        let ctx_data = ctx_data(ctx);
        Ok(ctx_data.store.director(id).await?.map(Into::into))
    }

    /// Lists all movies, in no particular order.
    async fn movies(&self, ctx: &Context<'_>) -> Result<Vec<api_types::Movie>> {
        let ctx_data = ctx_data(ctx);
        let movies = ctx_data.store.movies().await?;

        Ok(movies.into_iter().map(Into::into).collect())
    }

    /// Lists all directors, in no particular order.
    async fn directors(&self, ctx: &Context<'_>) -> Result<Vec<api_types::Director>> {
        let ctx_data = ctx_data(ctx);
        let directors = ctx_data.store.directors().await?;

        Ok(directors.into_iter().map(Into::into).collect())
    }
}
