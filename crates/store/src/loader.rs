use std::collections::HashMap;
use std::marker::PhantomData;

use async_graphql::dataloader::Loader;
use moviegraph_common_types::NativeId;

use crate::models::{Director, Movie};
use crate::Store;

/// Batches the relational lookups of a single GraphQL response into one
/// store query per field kind, instead of one per parent record.
pub struct StoreLoader<T> {
    store: Store,
    phantom: PhantomData<T>,
}

impl<T> StoreLoader<T> {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            phantom: PhantomData,
        }
    }
}

impl Loader<NativeId> for StoreLoader<Director> {
    type Value = Director;
    type Error = String;

    async fn load(&self, keys: &[NativeId]) -> Result<HashMap<NativeId, Self::Value>, Self::Error> {
        Ok(self
            .store
            .directors_by_ids(keys)
            .await
            .map_err(|e| e.to_string())?
            .into_iter()
            .map(|director| (director.id, director))
            .collect())
    }
}

/// Keyed by director id. Every requested key is present in the result, with
/// an empty list for directors without movies.
impl Loader<NativeId> for StoreLoader<Vec<Movie>> {
    type Value = Vec<Movie>;
    type Error = String;

    async fn load(&self, keys: &[NativeId]) -> Result<HashMap<NativeId, Self::Value>, Self::Error> {
        let mut movies_by_director: HashMap<NativeId, Vec<Movie>> =
            keys.iter().map(|key| (*key, vec![])).collect();

        let movies = self
            .store
            .movies_by_directors(keys)
            .await
            .map_err(|e| e.to_string())?;
        for movie in movies {
            let Some(director_id) = movie.director_id else {
                continue;
            };
            if let Some(list) = movies_by_director.get_mut(&director_id) {
                list.push(movie);
            }
        }

        Ok(movies_by_director)
    }
}
