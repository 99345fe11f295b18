#![allow(dead_code)]

use movie_catalog::transport;
use movie_catalog::{CatalogStore, MemoryCatalogStore};
use serde_json::Value;
use std::sync::Arc;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryCatalogStore>,
}

/// Starts the API in-process over a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryCatalogStore::new());
    let shared: Arc<dyn CatalogStore> = store.clone();
    let router = transport::http::create_router(transport::http::AppState::new(shared));

    // Bind to an ephemeral port so tests can run in parallel.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        store,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client.post(self.url(path)).json(&body).send().await.unwrap()
    }

    pub async fn put(&self, path: &str, body: Value) -> reqwest::Response {
        self.client.put(self.url(path)).json(&body).send().await.unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }

    /// POSTs and returns the identifier taken from the `Location` header.
    pub async fn create(&self, collection: &str, body: Value) -> i32 {
        let resp = self.post(&format!("/{}/", collection), body).await;
        assert_eq!(resp.status(), 201);
        let location = resp
            .headers()
            .get("location")
            .expect("created response carries a Location header")
            .to_str()
            .unwrap()
            .to_string();
        let prefix = format!("/{}/", collection);
        assert!(location.starts_with(&prefix), "unexpected location {}", location);
        location[prefix.len()..].parse().unwrap()
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.get(path).await;
        let status = resp.status().as_u16();
        (status, resp.json::<Value>().await.unwrap())
    }
}
