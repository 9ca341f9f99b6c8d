use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use moviegraph_common_types::NativeId;
use serde::de::DeserializeOwned;
use tracing::{error, info};

use crate::models::{self, Director, Movie, NewDirector, NewMovie};
use crate::DocumentStore;

/// Used when the connection string doesn't name a database.
pub const DEFAULT_DATABASE_NAME: &str = "moviegraph";

/// [`DocumentStore`] backed by a MongoDB deployment.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects to the database named in `db_url` and pings it, so that a
    /// broken connection string fails here rather than on the first request.
    pub async fn connect(db_url: &str) -> anyhow::Result<Self> {
        info!("Initializing MongoDB client");
        let client = Client::with_uri_str(db_url)
            .await
            .context("invalid MongoDB connection string")?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME));

        let store = Self { db };
        store.ping().await.context("MongoDB is unreachable")?;
        info!(database = store.db.name(), "MongoDB connection successful");
        Ok(store)
    }

    fn movies_collection(&self) -> Collection<Movie> {
        self.db.collection(models::MOVIES_COLLECTION)
    }

    fn directors_collection(&self) -> Collection<Director> {
        self.db.collection(models::DIRECTORS_COLLECTION)
    }
}

async fn find_all<T>(collection: &Collection<T>, filter: Document) -> anyhow::Result<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    Ok(collection.find(filter, None).await?.try_collect().await?)
}

fn any_of(ids: &[NativeId]) -> Document {
    let ids: Vec<Bson> = ids.iter().copied().map(Bson::from).collect();
    doc! { "$in": ids }
}

// A `directorId` written by another client may be the hex string rather than
// an ObjectId. Both decode to the same reference, so both must match.
fn any_reference_to(ids: &[NativeId]) -> Document {
    let ids: Vec<Bson> = ids
        .iter()
        .flat_map(|id| [Bson::from(*id), Bson::String(id.to_string())])
        .collect();
    doc! { "$in": ids }
}

fn inserted_id(id: Bson) -> anyhow::Result<NativeId> {
    id.as_object_id()
        .map(NativeId::from)
        .context("MongoDB assigned a non-ObjectId _id")
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn movie(&self, id: NativeId) -> anyhow::Result<Option<Movie>> {
        Ok(self
            .movies_collection()
            .find_one(doc! { "_id": id }, None)
            .await?)
    }

    async fn director(&self, id: NativeId) -> anyhow::Result<Option<Director>> {
        Ok(self
            .directors_collection()
            .find_one(doc! { "_id": id }, None)
            .await?)
    }

    async fn movies(&self) -> anyhow::Result<Vec<Movie>> {
        find_all(&self.movies_collection(), doc! {}).await
    }

    async fn directors(&self) -> anyhow::Result<Vec<Director>> {
        find_all(&self.directors_collection(), doc! {}).await
    }

    async fn directors_by_ids(&self, ids: &[NativeId]) -> anyhow::Result<Vec<Director>> {
        find_all(&self.directors_collection(), doc! { "_id": any_of(ids) }).await
    }

    async fn movies_by_directors(&self, director_ids: &[NativeId]) -> anyhow::Result<Vec<Movie>> {
        find_all(
            &self.movies_collection(),
            doc! { "directorId": any_reference_to(director_ids) },
        )
        .await
    }

    async fn insert_movie(&self, movie: NewMovie) -> anyhow::Result<Movie> {
        let result = self
            .movies_collection()
            .clone_with_type::<NewMovie>()
            .insert_one(&movie, None)
            .await;

        match result {
            Ok(result) => {
                let movie = movie.with_id(inserted_id(result.inserted_id)?);
                info!(id = %movie.id, title = movie.title.as_deref(), "Movie saved");
                Ok(movie)
            }
            Err(err) => {
                error!(error = %err, title = %movie.title, "Failed to save movie");
                Err(err.into())
            }
        }
    }

    async fn insert_director(&self, director: NewDirector) -> anyhow::Result<Director> {
        let result = self
            .directors_collection()
            .clone_with_type::<NewDirector>()
            .insert_one(&director, None)
            .await;

        match result {
            Ok(result) => {
                let director = director.with_id(inserted_id(result.inserted_id)?);
                info!(id = %director.id, "Director saved");
                Ok(director)
            }
            Err(err) => {
                error!(error = %err, "Failed to save director");
                Err(err.into())
            }
        }
    }
}
