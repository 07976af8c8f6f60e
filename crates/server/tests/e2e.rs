use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};

struct TestApp {
    base_url: String,
}

/// Boot the real router against an isolated in-memory sqlite store.
/// The pool is capped at one connection so all handlers share the database.
async fn start_server() -> anyhow::Result<TestApp> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState { db };
    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_book_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create
    let res = c
        .post(format!("{}/Books", app.base_url))
        .json(&json!({"title": "Dune", "author": "Herbert", "price": 12.00}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let location = res
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("Location header")
        .to_str()?
        .to_string();
    let id = res.json::<i64>().await?;
    assert_eq!(location, format!("/Books/{}", id));

    // Read it back
    let res = c.get(format!("{}/Books/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Herbert");
    assert_eq!(body["price"], 12.0);

    // Partial update: only the price
    let res = c
        .put(format!("{}/Books/{}", app.base_url, id))
        .json(&json!({"price": 15.50}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!("Success"));

    let res = c.get(format!("{}/Books/{}", app.base_url, id)).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Herbert");
    assert_eq!(body["price"], 15.5);

    // Delete, then the record is gone
    let res = c.delete(format!("{}/Books/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!("Success"));

    let res = c.get(format!("{}/Books/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?, json!("Book not found"));
    Ok(())
}

#[tokio::test]
async fn e2e_create_validation_errors_are_an_array() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(format!("{}/Books", app.base_url))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!(["Title is required", "Author is required", "Price is required"])
    );
    Ok(())
}

#[tokio::test]
async fn e2e_create_ignores_client_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let res = c
        .post(format!("{}/Books", app.base_url))
        .json(&json!({"id": 999, "title": "Emma", "author": "Austen", "price": 9.99}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let id = res.json::<i64>().await?;
    assert_ne!(id, 999);
    let res = c.get(format!("{}/Books/999", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_list_sorting() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for (title, author, price) in [
        ("Beta", "Zed", 3.00),
        ("Alpha", "Mid", 2.00),
        ("Gamma", "Ann", 1.00),
    ] {
        let res = c
            .post(format!("{}/Books", app.base_url))
            .json(&json!({"title": title, "author": author, "price": price}))
            .send()
            .await?;
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    }

    let titles = |body: serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap().to_string())
            .collect()
    };

    // Default and unknown sort keys order by title.
    let res = c.get(format!("{}/Books", app.base_url)).send().await?;
    assert_eq!(titles(res.json().await?), vec!["Alpha", "Beta", "Gamma"]);
    let res = c.get(format!("{}/Books?sortBy=isbn", app.base_url)).send().await?;
    assert_eq!(titles(res.json().await?), vec!["Alpha", "Beta", "Gamma"]);

    let res = c.get(format!("{}/Books?sortBy=author", app.base_url)).send().await?;
    assert_eq!(titles(res.json().await?), vec!["Gamma", "Alpha", "Beta"]);

    let res = c.get(format!("{}/Books?sortBy=PRICE", app.base_url)).send().await?;
    assert_eq!(titles(res.json().await?), vec!["Gamma", "Alpha", "Beta"]);
    Ok(())
}

#[tokio::test]
async fn e2e_update_validation() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/Books", app.base_url))
        .json(&json!({"title": "Dune", "author": "Herbert", "price": 12.00}))
        .send()
        .await?;
    let id = res.json::<i64>().await?;

    // Empty patch on an existing record
    let res = c
        .put(format!("{}/Books/{}", app.base_url, id))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!(["Please specify the values to be updated"])
    );

    // Unknown id with a real value
    let res = c
        .put(format!("{}/Books/424242", app.base_url))
        .json(&json!({"title": "New"}))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!(["Invalid book id specified for update (424242)"])
    );
    Ok(())
}

#[tokio::test]
async fn e2e_delete_unknown_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .delete(format!("{}/Books/424242", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?, json!("Book not found"));
    Ok(())
}
