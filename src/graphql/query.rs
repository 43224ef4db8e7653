use juniper::{graphql_object, ID};

use super::Context;
use crate::catalog::{coerce_id, Movie};
use crate::error::Error;
use crate::people::Person;

pub struct Query;

#[graphql_object]
#[graphql(context = Context)]
impl Query {
    /// The movie whose id matches, or null.
    fn movie(context: &Context, id: Option<ID>) -> Option<Movie> {
        let id = coerce_id(id.as_deref()?)?;
        context.catalog.get(id)
    }

    /// Every movie in the catalog, in the order they were added.
    fn movies(context: &Context) -> Option<Vec<Option<Movie>>> {
        Some(context.catalog.all().into_iter().map(Some).collect())
    }

    async fn person(context: &Context, id: Option<ID>) -> Result<Option<Person>, Error> {
        let Some(id) = id else {
            return Ok(None);
        };

        log::debug!("Looking up person {}", id);
        match context.people.person(&id).await {
            Ok(person) => Ok(Some(person)),
            Err(err) => {
                log::warn!("Failed to fetch person {}: {}", id, err);
                Err(err)
            }
        }
    }

    /// Favorited movies in store order. Favorites pointing at unknown movies are null.
    async fn favorites(context: &Context) -> Result<Option<Vec<Option<Movie>>>, Error> {
        let movie_ids = context.favorites.list_favorites().await.map_err(|err| {
            log::warn!("Failed to list favorites: {}", err);
            err
        })?;

        Ok(Some(
            movie_ids
                .into_iter()
                .map(|movie_id| movie_id.and_then(|movie_id| context.catalog.get(movie_id)))
                .collect(),
        ))
    }
}
