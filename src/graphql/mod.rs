//! GraphQL schema and resolvers.
//!
//! Custom resolvers exist for `Query.movie`, `Query.movies`, `Query.person`,
//! `Query.favorites`, `Mutation.addMovie`, `Mutation.addFavorite` and
//! `Person.homeworld`; every other field is plain property access.

use std::sync::Arc;

use juniper::{EmptySubscription, FieldError, IntoFieldError, ScalarValue, Value};

use crate::catalog::Catalog;
use crate::config::{Config, FavoritesBackend};
use crate::error::{Error, Result};
use crate::favorites::{FavoritesStore, FirestoreStore, MemoryStore};
use crate::people::PeopleClient;

mod mutation;
mod query;
mod types;

pub use mutation::Mutation;
pub use query::Query;
pub use types::NewMovie;

/// Services shared by every resolver for the lifetime of the process.
pub struct Context {
    pub catalog: Arc<Catalog>,
    pub people: PeopleClient,
    pub favorites: Arc<dyn FavoritesStore>,
}

// To make our context usable by Juniper, we have to implement a marker trait.
impl juniper::Context for Context {}

impl Context {
    pub fn new(catalog: Arc<Catalog>, people: PeopleClient, favorites: Arc<dyn FavoritesStore>) -> Self {
        Context {
            catalog,
            people,
            favorites,
        }
    }

    /// Builds the seeded catalog and the configured upstream clients.
    ///
    /// This is the only place the favorites store client is created.
    pub fn from_config(config: &Config) -> Result<Self> {
        let favorites: Arc<dyn FavoritesStore> = match config.favorites.backend {
            FavoritesBackend::Memory => Arc::new(MemoryStore::new()),
            FavoritesBackend::Firestore => Arc::new(FirestoreStore::new(&config.favorites.firestore)?),
        };

        Ok(Context::new(
            Arc::new(Catalog::seeded()),
            PeopleClient::new(config.people.base_url.clone()),
            favorites,
        ))
    }
}

impl<S: ScalarValue> IntoFieldError<S> for Error {
    fn into_field_error(self) -> FieldError<S> {
        FieldError::new(self, Value::null())
    }
}

// A root schema consists of a query and a mutation.
// Request queries can be executed against a RootNode.
pub type Schema = juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::<Context>::new())
}
