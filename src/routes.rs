use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;

use crate::graphql::{Context, Schema};

/// Absolute path of the GraphQL endpoint, used by the GraphiQL page.
pub struct GraphQLEndpoint(pub String);

#[rocket::post("/graphql", data = "<request>")]
pub async fn post_graphql_handler(
    context: &State<Context>,
    request: juniper_rocket::GraphQLRequest,
    schema: &State<Schema>,
) -> juniper_rocket::GraphQLResponse {
    request.execute(schema.inner(), context.inner()).await
}

/// CORS preflight; the headers themselves come from the `Cors` fairing.
#[rocket::options("/graphql")]
pub fn graphql_preflight() -> Status {
    Status::Ok
}

#[rocket::get("/graphiql")]
pub fn graphiql(endpoint: &State<GraphQLEndpoint>) -> RawHtml<String> {
    juniper_rocket::graphiql_source(&endpoint.0, None)
}

#[rocket::get("/health")]
pub fn health() -> Status {
    Status::Accepted
}
