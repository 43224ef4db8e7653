//! Client for the Star Wars API people and planets endpoints.

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

/// A person as returned by the people endpoint.
///
/// Only the fields exposed through GraphQL are decoded; everything else in
/// the upstream body is ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_year: Option<String>,
    /// Absolute URL of the person's homeworld.
    #[serde(default)]
    pub homeworld: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Homeworld {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub terrain: Option<String>,
}

#[derive(Clone, Debug)]
pub struct PeopleClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PeopleClient {
    pub fn new(base_url: Url) -> Self {
        PeopleClient::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        PeopleClient { http, base_url }
    }

    /// Fetches the person identified by `id`.
    ///
    /// `id` is sent as a single path segment below the base URL.
    pub async fn person(&self, id: &str) -> Result<Person> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(id);

        self.fetch(url.as_str()).await
    }

    /// Follows the person's homeworld reference.
    ///
    /// Returns `None` without touching the network when the person has no
    /// homeworld.
    pub async fn homeworld(&self, person: &Person) -> Result<Option<Homeworld>> {
        match person.homeworld.as_deref() {
            Some(url) => self.fetch(url).await.map(Some),
            None => Ok(None),
        }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {}", url);

        let upstream = |source: reqwest::Error| Error::Upstream {
            url: url.to_owned(),
            source,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream)?;

        response.json::<T>().await.map_err(upstream)
    }
}
