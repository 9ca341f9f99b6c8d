use anyhow::anyhow;
use async_trait::async_trait;
use moviegraph_common_types::NativeId;
use moviegraph_store::models::{Director, Movie, NewDirector, NewMovie};
use moviegraph_store::{DocumentStore, InMemoryStore};

/// An [`InMemoryStore`] that can be told to fail some of its operations.
#[derive(Default)]
pub struct MockStore {
    pub inner: InMemoryStore,
    pub fail_writes: bool,
    pub fail_director_lookups: bool,
    pub fail_movie_lookups: bool,
}

impl MockStore {
    fn check_director_lookups(&self) -> anyhow::Result<()> {
        if self.fail_director_lookups {
            Err(anyhow!("director lookup failed"))
        } else {
            Ok(())
        }
    }

    fn check_movie_lookups(&self) -> anyhow::Result<()> {
        if self.fail_movie_lookups {
            Err(anyhow!("movie lookup failed"))
        } else {
            Ok(())
        }
    }

    fn check_writes(&self) -> anyhow::Result<()> {
        if self.fail_writes {
            Err(anyhow!("write failed"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for MockStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.inner.ping().await
    }

    async fn movie(&self, id: NativeId) -> anyhow::Result<Option<Movie>> {
        self.inner.movie(id).await
    }

    async fn director(&self, id: NativeId) -> anyhow::Result<Option<Director>> {
        self.check_director_lookups()?;
        self.inner.director(id).await
    }

    async fn movies(&self) -> anyhow::Result<Vec<Movie>> {
        self.inner.movies().await
    }

    async fn directors(&self) -> anyhow::Result<Vec<Director>> {
        self.inner.directors().await
    }

    async fn directors_by_ids(&self, ids: &[NativeId]) -> anyhow::Result<Vec<Director>> {
        self.check_director_lookups()?;
        self.inner.directors_by_ids(ids).await
    }

    async fn movies_by_directors(&self, director_ids: &[NativeId]) -> anyhow::Result<Vec<Movie>> {
        self.check_movie_lookups()?;
        self.inner.movies_by_directors(director_ids).await
    }

    async fn insert_movie(&self, movie: NewMovie) -> anyhow::Result<Movie> {
        self.check_writes()?;
        self.inner.insert_movie(movie).await
    }

    async fn insert_director(&self, director: NewDirector) -> anyhow::Result<Director> {
        self.check_writes()?;
        self.inner.insert_director(director).await
    }
}
