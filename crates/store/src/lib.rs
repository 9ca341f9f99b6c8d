//! Database access (read and write) abstractions for the movie and director
//! collections.

mod loader;
mod memory;
pub mod models;
mod mongo;

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;
pub use loader::StoreLoader;
pub use memory::InMemoryStore;
pub use mongo::{MongoStore, DEFAULT_DATABASE_NAME};
use moviegraph_common_types::NativeId;

use crate::models::{Director, Movie, NewDirector, NewMovie};

/// Everything the API needs from a document database. List operations return
/// records in the backend's natural order; no sorting is applied.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Verifies that the backend is reachable.
    async fn ping(&self) -> anyhow::Result<()>;

    async fn movie(&self, id: NativeId) -> anyhow::Result<Option<Movie>>;

    async fn director(&self, id: NativeId) -> anyhow::Result<Option<Director>>;

    async fn movies(&self) -> anyhow::Result<Vec<Movie>>;

    async fn directors(&self) -> anyhow::Result<Vec<Director>>;

    /// Batched version of [`DocumentStore::director`]. Unknown ids are simply
    /// missing from the result.
    async fn directors_by_ids(&self, ids: &[NativeId]) -> anyhow::Result<Vec<Director>>;

    /// All movies whose `directorId` is one of `director_ids`.
    async fn movies_by_directors(&self, director_ids: &[NativeId]) -> anyhow::Result<Vec<Movie>>;

    /// Persists a movie and returns it with its newly assigned id.
    async fn insert_movie(&self, movie: NewMovie) -> anyhow::Result<Movie>;

    /// Persists a director and returns it with its newly assigned id.
    async fn insert_director(&self, director: NewDirector) -> anyhow::Result<Director>;
}

/// A handle to the configured [`DocumentStore`]. It uses [`Arc`] internally,
/// so it's cheaply cloneable.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn DocumentStore>,
}

impl Store {
    /// Connects to MongoDB and checks that the server answers.
    pub async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let backend = MongoStore::connect(db_url).await?;
        Ok(Self::from_backend(backend))
    }

    /// A fresh, empty store that lives in process memory.
    pub fn in_memory() -> Self {
        Self::from_backend(InMemoryStore::default())
    }

    pub fn from_backend(backend: impl DocumentStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl Deref for Store {
    type Target = dyn DocumentStore;

    fn deref(&self) -> &Self::Target {
        self.backend.as_ref()
    }
}
