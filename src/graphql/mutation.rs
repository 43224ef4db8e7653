use juniper::{graphql_object, ID};

use super::{Context, NewMovie};
use crate::catalog::Movie;
use crate::error::Error;

pub struct Mutation;

#[graphql_object]
#[graphql(context = Context)]
impl Mutation {
    fn add_movie(context: &Context, movie: Option<NewMovie>) -> Option<Movie> {
        let movie = movie.unwrap_or_default();
        if let Some(id) = &movie.id {
            log::debug!("Ignoring client supplied movie id {}", id);
        }

        Some(context.catalog.add(movie.tag, movie.name))
    }

    /// Stores a favorite. The movie id is not checked against the catalog.
    async fn add_favorite(context: &Context, movie_id: Option<ID>) -> Result<Option<bool>, Error> {
        let movie_id = movie_id.ok_or(Error::MissingArgument("movieId"))?;

        let stored = context.favorites.add_favorite(&movie_id).await.map_err(|err| {
            log::warn!("Failed to store favorite {}: {}", movie_id, err);
            err
        })?;

        Ok(Some(stored))
    }
}
