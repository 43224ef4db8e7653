use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use figment::providers::Serialized;
use serde::Serialize;

use movie_graph::config::{self, Config};
use movie_graph::graphql::Context;
use movie_graph::{logging, Error};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Serialize)]
#[command(name = "Movie Graph", version = VERSION, about)]
struct Opts {
    /// Configuration file; defaults to the per-user config directory.
    #[arg(short, long)]
    #[serde(skip)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<IpAddr>,

    #[arg(short, long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

fn init_sentry(config: &Config) -> Option<sentry::ClientInitGuard> {
    let raw_dsn = config.sentry_dsn.as_deref().filter(|_| config.sentry)?;

    let dsn = match raw_dsn.parse::<sentry::types::Dsn>() {
        Ok(dsn) => dsn,
        Err(err) => {
            log::warn!("Not reporting crashes, the Sentry DSN is invalid: {}", err);
            return None;
        }
    };

    log::info!("Initializing Sentry for reporting crashes");
    Some(sentry::init(sentry::ClientOptions {
        dsn: Some(dsn),
        release: sentry::release_name!(),
        ..Default::default()
    }))
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    let opts = Opts::parse();

    // If we don't have an existing config file, just write the defaults to it
    let config_file = opts.config.clone().unwrap_or_else(config::default_config_file);
    let wrote_defaults = opts.config.is_none() && config::write_defaults(&config_file)?;

    let figment = config::figment(&config_file).merge(Serialized::defaults(&opts));
    let config = Config::from_figment(&figment)?;

    logging::setup_logger(&config)?;

    if wrote_defaults {
        log::info!("Wrote default configuration to {:?}", config_file);
    }
    log::info!("Movie Graph v{}", VERSION);
    log::info!("Using configuration file {:?}", config_file);
    log::info!("Listening on {}:{}", config.address, config.port);
    log::info!("Serving GraphQL at {}/graphql", config.api_base.trim_end_matches('/'));
    log::info!("Using {:?} favorites store", config.favorites.backend);
    log::info!("Using log path {:?}", config.log_file_path);

    // Only enable Sentry reporting if the user explicitly agreed to it
    let _sentry = init_sentry(&config);

    let context = Context::from_config(&config)?;

    movie_graph::build_rocket(&config, context)
        .launch()
        .await
        .map_err(Box::new)?;

    log::info!("Shutting down the server");
    Ok(())
}
