//! GraphQL server exposing a movie catalog, Star Wars API people and a
//! favorites collection kept in a document store.

pub mod catalog;
pub mod config;
pub mod cors;
pub mod error;
pub mod favorites;
pub mod graphql;
pub mod logging;
pub mod people;
pub mod routes;

use rocket::{routes, Build, Rocket};

pub use config::Config;
pub use error::{Error, Result};

/// Assembles the web server around an already built resolver context.
pub fn build_rocket(config: &Config, context: graphql::Context) -> Rocket<Build> {
    let rocket_figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));

    let endpoint = format!("{}/graphql", config.api_base.trim_end_matches('/'));

    let mut rocket = rocket::custom(rocket_figment)
        .attach(cors::Cors)
        .manage(graphql::schema())
        .manage(context)
        .manage(routes::GraphQLEndpoint(endpoint))
        .mount(
            config.api_base.as_str(),
            routes![routes::post_graphql_handler, routes::graphql_preflight],
        )
        .mount("/", routes![routes::health]);

    if config.graphiql {
        rocket = rocket.mount("/", routes![routes::graphiql]);
    }

    rocket
}
