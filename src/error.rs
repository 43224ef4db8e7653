use std::io;

/// Errors raised while configuring, starting or serving the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The layered configuration could not be read or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// A request to an upstream HTTP API failed or returned a non-2xx status.
    #[error("upstream request to {url} failed: {source}")]
    Upstream {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The favorites store rejected or failed an operation.
    #[error("favorites store error: {0}")]
    Store(String),

    #[error("missing required argument {0}")]
    MissingArgument(&'static str),

    #[error("failed to launch the web server: {0}")]
    Launch(#[from] Box<rocket::Error>),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
