use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "movie-graph.toml";
pub const ENV_PREFIX: &str = "MOVIE_GRAPH_";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "MovieGraph", "movie-graph")
}

fn static_url(url: &'static str) -> Url {
    Url::parse(url).expect("hard-coded URL is valid")
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    /// Mount point of the GraphQL endpoint; the endpoint itself is `<api_base>/graphql`.
    pub api_base: String,
    pub graphiql: bool,
    pub log_level: String,
    pub log_file_path: PathBuf,
    /// Crash reporting is only enabled when explicitly requested.
    pub sentry: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentry_dsn: Option<String>,
    pub people: PeopleConfig,
    pub favorites: FavoritesConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PeopleConfig {
    /// Collection URL of the people endpoint; person ids are appended to it.
    pub base_url: Url,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FavoritesBackend {
    Memory,
    Firestore,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FavoritesConfig {
    pub backend: FavoritesBackend,
    pub firestore: FirestoreConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FirestoreConfig {
    pub base_url: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub database: String,
    pub collection: String,
    /// OAuth2 bearer token sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        let mut log_file_path: PathBuf = [".", "logs"].iter().collect();

        if let Some(proj_dirs) = project_dirs() {
            log_file_path = PathBuf::from(proj_dirs.data_dir());
            log_file_path.push("logs");
        }

        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            api_base: "/api".to_owned(),
            graphiql: true,
            log_level: "info".to_owned(),
            log_file_path,
            sentry: false,
            sentry_dsn: None,
            people: PeopleConfig::default(),
            favorites: FavoritesConfig::default(),
        }
    }
}

impl Default for PeopleConfig {
    fn default() -> Self {
        Self {
            base_url: static_url("https://swapi.dev/api/people/"),
        }
    }
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            backend: FavoritesBackend::Memory,
            firestore: FirestoreConfig::default(),
        }
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: static_url("https://firestore.googleapis.com/v1/"),
            project_id: None,
            database: "(default)".to_owned(),
            collection: "favorites".to_owned(),
            access_token: None,
            page_size: 300,
        }
    }
}

impl Config {
    /// Extracts and validates a configuration from `figment`.
    pub fn from_figment(figment: &Figment) -> Result<Config> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| Error::Config(format!("unknown log level {:?}", self.log_level)))
    }

    fn validate(&self) -> Result<()> {
        self.log_level_filter()?;

        if !self.api_base.starts_with('/') {
            return Err(Error::Config(format!(
                "api_base must start with '/', got {:?}",
                self.api_base
            )));
        }

        if self.favorites.backend == FavoritesBackend::Firestore
            && self.favorites.firestore.project_id.is_none()
        {
            return Err(Error::Config(
                "favorites.firestore.project_id is required for the firestore backend".to_owned(),
            ));
        }

        if self.sentry && self.sentry_dsn.is_none() {
            return Err(Error::Config("sentry is enabled but sentry_dsn is not set".to_owned()));
        }

        Ok(())
    }
}

/// Location of the configuration file when none is given on the command line.
pub fn default_config_file() -> PathBuf {
    match project_dirs() {
        Some(proj_dirs) => proj_dirs.config_dir().join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Layers defaults, the TOML file at `config_file` and `MOVIE_GRAPH_*`
/// environment variables, in increasing priority. Nested keys use `__` in
/// variable names, e.g. `MOVIE_GRAPH_FAVORITES__BACKEND`.
pub fn figment(config_file: &Path) -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Writes the default configuration to `config_file` if it does not exist yet.
///
/// Returns whether a file was written.
pub fn write_defaults(config_file: &Path) -> Result<bool> {
    if config_file.exists() {
        return Ok(false);
    }

    if let Some(dir) = config_file.parent() {
        fs::create_dir_all(dir)?;
    }

    let serialized_defaults = toml::to_string(&Config::default())
        .map_err(|err| Error::Config(format!("unable to serialize default configuration: {}", err)))?;
    fs::write(config_file, serialized_defaults)?;

    Ok(true)
}
