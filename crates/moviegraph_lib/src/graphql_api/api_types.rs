use async_graphql::{Context, Object, Result, ID};
use moviegraph_store::models;

use super::{ctx_data, ApiSchemaContext};

#[derive(Clone, Debug, derive_more::From)]
pub struct Movie {
    model: models::Movie,
}

impl Movie {
    /// The director this movie refers to, if the reference resolves.
    pub async fn director(&self, ctx: &ApiSchemaContext) -> Result<Option<Director>> {
        let Some(director_id) = self.model.director_id else {
            return Ok(None);
        };

        Ok(ctx
            .loader_director
            .load_one(director_id)
            .await?
            .map(Into::into))
    }
}

#[Object]
impl Movie {
    /// Database-assigned identifier of the movie.
    #[graphql(name = "id")]
    async fn graphql_id(&self) -> ID {
        self.model.id.into()
    }

    /// The integer id supplied by the client at creation, if any.
    async fn legacy_id(&self) -> Option<i64> {
        self.model.legacy_id
    }

    /// Always present on movies created through the API. Documents written by
    /// other clients may lack it.
    async fn title(&self) -> Option<&str> {
        self.model.title.as_deref()
    }

    async fn description(&self) -> Option<&str> {
        self.model.description.as_deref()
    }

    async fn year(&self) -> Option<i32> {
        self.model.year
    }

    /// `null` when the movie has no director or the reference is dangling.
    #[graphql(name = "director")]
    async fn graphql_director(&self, ctx: &Context<'_>) -> Result<Option<Director>> {
        self.director(ctx_data(ctx)).await
    }
}

#[derive(Clone, Debug, derive_more::From)]
pub struct Director {
    model: models::Director,
}

impl Director {
    pub async fn movies(&self, ctx: &ApiSchemaContext) -> Result<Vec<Movie>> {
        let movies = ctx
            .loader_director_movies
            .load_one(self.model.id)
            .await?
            .unwrap_or_default();

        Ok(movies.into_iter().map(Into::into).collect())
    }
}

#[Object]
impl Director {
    /// Database-assigned identifier of the director.
    #[graphql(name = "id")]
    async fn graphql_id(&self) -> ID {
        self.model.id.into()
    }

    /// The integer id supplied by the client at creation, if any.
    async fn legacy_id(&self) -> Option<i64> {
        self.model.legacy_id
    }

    async fn name(&self) -> Option<&str> {
        self.model.name.as_deref()
    }

    /// Year of birth.
    async fn birth(&self) -> Option<i32> {
        self.model.birth
    }

    /// All movies that reference this director, possibly none.
    #[graphql(name = "movies")]
    async fn graphql_movies(&self, ctx: &Context<'_>) -> Result<Vec<Movie>> {
        self.movies(ctx_data(ctx)).await
    }
}
