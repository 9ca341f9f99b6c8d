use async_trait::async_trait;
use moviegraph_common_types::NativeId;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{Director, Movie, NewDirector, NewMovie};
use crate::DocumentStore;

/// [`DocumentStore`] that keeps both collections in process memory, in
/// insertion order. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    movies: RwLock<Vec<Movie>>,
    directors: RwLock<Vec<Director>>,
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn movie(&self, id: NativeId) -> anyhow::Result<Option<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|movie| movie.id == id).cloned())
    }

    async fn director(&self, id: NativeId) -> anyhow::Result<Option<Director>> {
        let directors = self.directors.read().await;
        Ok(directors.iter().find(|director| director.id == id).cloned())
    }

    async fn movies(&self) -> anyhow::Result<Vec<Movie>> {
        Ok(self.movies.read().await.clone())
    }

    async fn directors(&self) -> anyhow::Result<Vec<Director>> {
        Ok(self.directors.read().await.clone())
    }

    async fn directors_by_ids(&self, ids: &[NativeId]) -> anyhow::Result<Vec<Director>> {
        let directors = self.directors.read().await;
        Ok(directors
            .iter()
            .filter(|director| ids.contains(&director.id))
            .cloned()
            .collect())
    }

    async fn movies_by_directors(&self, director_ids: &[NativeId]) -> anyhow::Result<Vec<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .filter(|movie| {
                movie
                    .director_id
                    .is_some_and(|director_id| director_ids.contains(&director_id))
            })
            .cloned()
            .collect())
    }

    async fn insert_movie(&self, movie: NewMovie) -> anyhow::Result<Movie> {
        let movie = movie.with_id(NativeId::new());
        self.movies.write().await.push(movie.clone());
        info!(id = %movie.id, title = movie.title.as_deref(), "Movie saved");
        Ok(movie)
    }

    async fn insert_director(&self, director: NewDirector) -> anyhow::Result<Director> {
        let director = director.with_id(NativeId::new());
        self.directors.write().await.push(director.clone());
        info!(id = %director.id, "Director saved");
        Ok(director)
    }
}
