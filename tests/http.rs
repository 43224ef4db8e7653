use std::sync::Arc;

use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use url::Url;

use movie_graph::catalog::Catalog;
use movie_graph::favorites::MemoryStore;
use movie_graph::graphql::Context;
use movie_graph::people::PeopleClient;
use movie_graph::{build_rocket, Config};

async fn client_with(config: Config) -> Client {
    let context = Context::new(
        Arc::new(Catalog::seeded()),
        PeopleClient::new(Url::parse("http://127.0.0.1:9/api/people/").unwrap()),
        Arc::new(MemoryStore::new()),
    );

    Client::tracked(build_rocket(&config, context))
        .await
        .expect("valid rocket instance")
}

async fn client() -> Client {
    client_with(Config::default()).await
}

async fn graphql(client: &Client, body: Value) -> (Status, Value) {
    let response = client
        .post("/api/graphql")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await;

    let status = response.status();
    let body = response.into_string().await.unwrap_or_default();
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn post_executes_queries() {
    let client = client().await;

    let (status, body) = graphql(&client, json!({ "query": r#"{ movie(id: "9") { id name } }"# })).await;

    assert_eq!(status, Status::Ok);
    assert_eq!(
        body,
        json!({ "data": { "movie": { "id": 9, "name": "The rise of skywalker" } } })
    );
}

#[tokio::test]
async fn mutations_are_visible_to_later_requests() {
    let client = client().await;

    let (_, body) = graphql(
        &client,
        json!({
            "query": "mutation Add($movie: NewMovie) { addMovie(movie: $movie) { id tag name } }",
            "variables": { "movie": { "tag": "SWX", "name": "New Movie" } },
        }),
    )
    .await;
    assert_eq!(
        body,
        json!({ "data": { "addMovie": { "id": 10, "tag": "SWX", "name": "New Movie" } } })
    );

    let (_, body) = graphql(&client, json!({ "query": r#"mutation { addFavorite(movieId: "10") }"# })).await;
    assert_eq!(body, json!({ "data": { "addFavorite": true } }));

    let (_, body) = graphql(&client, json!({ "query": "{ movies { id } favorites { name } }" })).await;
    assert_eq!(body["data"]["movies"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"]["favorites"], json!([{ "name": "New Movie" }]));
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let client = client().await;

    let response = client
        .post("/api/graphql")
        .header(ContentType::JSON)
        .header(Header::new("Origin", "https://example.com"))
        .body(json!({ "query": "{ movies { id } }" }).to_string())
        .dispatch()
        .await;

    assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Methods"),
        Some("POST,OPTIONS")
    );
}

#[tokio::test]
async fn preflight_is_answered_without_executing() {
    let client = client().await;

    let response = client
        .options("/api/graphql")
        .header(Header::new("Origin", "https://example.com"))
        .header(Header::new("Access-Control-Request-Method", "POST"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Methods"),
        Some("POST,OPTIONS")
    );
    assert_eq!(response.headers().get_one("Access-Control-Max-Age"), Some("86400"));
}

#[tokio::test]
async fn get_is_not_served_on_the_endpoint() {
    let client = client().await;

    let response = client.get("/api/graphql?query=%7Bmovies%7Bid%7D%7D").dispatch().await;

    assert_eq!(response.status(), Status::NotFound);
}

#[tokio::test]
async fn malformed_queries_are_client_errors() {
    let client = client().await;

    let (status, body) = graphql(&client, json!({ "query": "{ movies { id " })).await;

    assert_eq!(status, Status::BadRequest);
    assert!(body["errors"].as_array().is_some_and(|errors| !errors.is_empty()));
}

#[tokio::test]
async fn health_and_graphiql() {
    let client = client().await;

    assert_eq!(client.get("/health").dispatch().await.status(), Status::Accepted);

    let page = client.get("/graphiql").dispatch().await;
    assert_eq!(page.status(), Status::Ok);
    assert!(page.into_string().await.unwrap().contains("/api/graphql"));
}

#[tokio::test]
async fn graphiql_can_be_disabled_and_endpoint_moved() {
    let client = client_with(Config {
        graphiql: false,
        api_base: "/v2".to_owned(),
        ..Config::default()
    })
    .await;

    assert_eq!(client.get("/graphiql").dispatch().await.status(), Status::NotFound);

    let response = client
        .post("/v2/graphql")
        .header(ContentType::JSON)
        .body(json!({ "query": "{ movies { id } }" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
}
