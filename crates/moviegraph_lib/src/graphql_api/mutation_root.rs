use async_graphql::{Context, Object, Result, ID};
use moviegraph_common_types::NativeId;
use moviegraph_store::models::{NewDirector, NewMovie};
use thiserror::Error;
use tracing::warn;

use super::{api_types, ctx_data};

/// Rejections of malformed mutation arguments. Unlike lookups, which quietly
/// return `null`, writes refuse to persist anything they can't parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid directorId: must be a valid ObjectId")]
    InvalidDirectorId { director_id: String },
    #[error("Invalid id {id:?}: must be an integer")]
    InvalidLegacyId { id: String },
}

/// Blank arguments count as absent.
fn non_blank(id: Option<ID>) -> Option<String> {
    id.map(|id| id.0).filter(|id| !id.is_empty())
}

fn parse_director_id(director_id: Option<ID>) -> Result<Option<NativeId>, ApiError> {
    non_blank(director_id)
        .map(|director_id| {
            NativeId::parse(&director_id).map_err(|_| ApiError::InvalidDirectorId { director_id })
        })
        .transpose()
}

fn parse_legacy_id(id: Option<ID>) -> Result<Option<i64>, ApiError> {
    non_blank(id)
        .map(|id| id.trim().parse().map_err(|_| ApiError::InvalidLegacyId { id }))
        .transpose()
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Creates a movie and returns it with its database-assigned id. The
    /// director reference isn't checked for existence.
    async fn add_movie(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Optional integer id kept alongside the database-assigned one.")]
        id: Option<ID>,
        #[graphql(validator(min_length = 1))] title: String,
        description: Option<String>,
        year: Option<i32>,
        #[graphql(desc = "Database-assigned id of the movie's director.")]
        director_id: Option<ID>,
    ) -> Result<api_types::Movie> {
        let director_id = parse_director_id(director_id).inspect_err(|err| {
            warn!(error = %err, "Rejected movie with a malformed director reference");
        })?;
        let legacy_id = parse_legacy_id(id)?;

        let ctx_data = ctx_data(ctx);
        let movie = ctx_data
            .store
            .insert_movie(NewMovie {
                legacy_id,
                title,
                description,
                year,
                director_id,
            })
            .await?;

        Ok(movie.into())
    }

    /// Creates a director and returns it with its database-assigned id.
    async fn add_director(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Optional integer id kept alongside the database-assigned one.")]
        id: Option<ID>,
        name: Option<String>,
        #[graphql(desc = "Year of birth.")] birth: Option<i32>,
    ) -> Result<api_types::Director> {
        let legacy_id = parse_legacy_id(id)?;

        let ctx_data = ctx_data(ctx);
        let director = ctx_data
            .store
            .insert_director(NewDirector {
                legacy_id,
                name,
                birth,
            })
            .await?;

        Ok(director.into())
    }
}
