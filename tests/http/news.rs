use reqwest::Method;
use serde_json::json;

use crate::support::{ids, json, TestServer};

async fn publish(server: &TestServer, title: &str, published: bool) -> String {
    let (status, body) = json(
        server
            .admin(Method::POST, "/api/news")
            .json(&json!({
                "title": title,
                "content": "Some words about the band and the show.",
                "published": published,
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 201);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn newest_first_and_limit_after_sort() {
    let server = TestServer::start().await;
    // Seed first so the sample articles are strictly older.
    server.get("/api/news").send().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let first = publish(&server, "First post", true).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = publish(&server, "Second post", true).await;

    let (status, body) = json(server.get("/api/news?limit=2").send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![second, first]);
}

#[tokio::test]
async fn published_filter() {
    let server = TestServer::start().await;
    let draft = publish(&server, "Draft post", false).await;

    let (_, body) = json(server.get("/api/news?published=false").send().await.unwrap()).await;
    assert_eq!(ids(&body), vec![draft.clone()]);

    let (_, body) = json(server.get("/api/news?published=true").send().await.unwrap()).await;
    assert_eq!(body["count"], 2);
    assert!(!ids(&body).contains(&draft));
}

#[tokio::test]
async fn update_and_empty_patch() {
    let server = TestServer::start().await;
    let id = publish(&server, "Typo in titel", true).await;

    let (status, body) = json(
        server
            .admin(Method::PUT, &format!("/api/news/{id}"))
            .json(&json!({ "title": "Typo in title" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Typo in title");
    assert_eq!(body["data"]["published"], true);

    let (status, _) = json(
        server
            .admin(Method::PUT, &format!("/api/news/{id}"))
            .json(&json!({ "views": 10 }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 400);
}
