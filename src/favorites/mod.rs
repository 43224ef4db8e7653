//! Access to the `favorites` document collection.
//!
//! The document store owns the data; implementations here only mediate
//! reads and writes. Each favorite is one document holding a `movieId`.

use async_trait::async_trait;

use crate::error::Result;

mod firestore;
mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

/// Adapter over the `favorites` collection.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Stores a new favorite document under a store-generated id.
    ///
    /// Returns `true` when the store acknowledged the write with a result.
    async fn add_favorite(&self, movie_id: &str) -> Result<bool>;

    /// Lists the `movieId` of every favorite, coerced to an integer.
    ///
    /// Entries whose `movieId` is missing or not numeric are `None`. The
    /// order is whatever order the store enumerates documents in.
    async fn list_favorites(&self) -> Result<Vec<Option<i32>>>;
}
