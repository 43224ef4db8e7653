//! In-process movie catalog.
//!
//! The catalog lives for the lifetime of the server and is never persisted.
//! It starts from a fixed seed list and only ever grows.

use std::sync::{PoisonError, RwLock};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Movie {
    pub id: i32,
    pub tag: Option<String>,
    pub name: Option<String>,
}

impl Movie {
    fn seed(id: i32, tag: &str, name: &str) -> Self {
        Movie {
            id,
            tag: Some(tag.to_owned()),
            name: Some(name.to_owned()),
        }
    }
}

/// Append-only list of movies shared by every request.
#[derive(Debug)]
pub struct Catalog {
    movies: RwLock<Vec<Movie>>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Catalog {
            movies: RwLock::new(movies),
        }
    }

    /// Catalog holding the nine saga films.
    pub fn seeded() -> Self {
        Catalog::new(vec![
            Movie::seed(1, "SWI", "The phantom menace"),
            Movie::seed(2, "SWII", "Atack of the clones"),
            Movie::seed(3, "SWIII", "Revenge of the sith"),
            Movie::seed(4, "SWIV", "A new hope"),
            Movie::seed(5, "SWV", "The empire strikes back"),
            Movie::seed(6, "SWVI", "Return of the jedi"),
            Movie::seed(7, "SWVII", "The force awakens"),
            Movie::seed(8, "SWVIII", "The last jedi"),
            Movie::seed(9, "SWIX", "The rise of skywalker"),
        ])
    }

    /// Returns the first movie carrying `id`.
    pub fn get(&self, id: i32) -> Option<Movie> {
        let movies = self.movies.read().unwrap_or_else(PoisonError::into_inner);
        movies.iter().find(|movie| movie.id == id).cloned()
    }

    /// Snapshot of the catalog in insertion order.
    pub fn all(&self) -> Vec<Movie> {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Appends a movie and returns it with its assigned id.
    ///
    /// The id is the last movie's id plus one, or 1 for an empty catalog.
    /// Computing the id and appending happen under the same write lock, so
    /// concurrent callers never receive the same id.
    pub fn add(&self, tag: Option<String>, name: Option<String>) -> Movie {
        let mut movies = self.movies.write().unwrap_or_else(PoisonError::into_inner);
        let id = movies.last().map_or(1, |last| last.id + 1);
        let movie = Movie { id, tag, name };
        movies.push(movie.clone());

        log::debug!("Added movie {} to the catalog", id);

        movie
    }

    pub fn len(&self) -> usize {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::seeded()
    }
}

/// Coerces a client supplied identifier to a movie id.
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of ASCII digits is parsed; anything after it is ignored. Returns
/// `None` when there are no digits or the value does not fit in an `i32`.
pub fn coerce_id(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }

    let value: i64 = digits.parse().ok()?;
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}
