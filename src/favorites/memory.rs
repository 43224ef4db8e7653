use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::FavoritesStore;
use crate::catalog::coerce_id;
use crate::error::Result;

#[derive(Debug)]
struct Document {
    id: String,
    movie_id: String,
}

/// Process-local favorites collection. Documents enumerate in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl FavoritesStore for MemoryStore {
    async fn add_favorite(&self, movie_id: &str) -> Result<bool> {
        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let id = format!("fav-{}", documents.len() + 1);

        log::debug!("Storing favorite {} for movie {:?}", id, movie_id);
        documents.push(Document {
            id,
            movie_id: movie_id.to_owned(),
        });

        Ok(true)
    }

    async fn list_favorites(&self) -> Result<Vec<Option<i32>>> {
        let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(documents
            .iter()
            .map(|document| {
                log::trace!("Favorite {} references movie {:?}", document.id, document.movie_id);
                coerce_id(&document.movie_id)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_favorites_in_insertion_order() {
        let store = MemoryStore::new();

        assert!(store.add_favorite("3").await.unwrap());
        assert!(store.add_favorite("1").await.unwrap());
        assert!(store.add_favorite("3").await.unwrap());

        assert_eq!(
            store.list_favorites().await.unwrap(),
            vec![Some(3), Some(1), Some(3)]
        );
    }

    #[tokio::test]
    async fn unparseable_movie_ids_list_as_none() {
        let store = MemoryStore::new();
        store.add_favorite("luke").await.unwrap();
        store.add_favorite("5").await.unwrap();

        assert_eq!(store.list_favorites().await.unwrap(), vec![None, Some(5)]);
    }

    #[tokio::test]
    async fn document_ids_are_unique() {
        let store = MemoryStore::new();
        store.add_favorite("1").await.unwrap();
        store.add_favorite("1").await.unwrap();

        let documents = store.documents.lock().unwrap();
        assert_ne!(documents[0].id, documents[1].id);
    }
}
