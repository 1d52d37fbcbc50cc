use reqwest::Method;
use serde_json::json;

use crate::support::{json, TestServer};

#[tokio::test]
async fn category_filter_over_seeded_gallery() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/api/gallery?category=bats&limit=5").send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 5);
    for item in body["data"].as_array().unwrap() {
        assert_eq!(item["category"], "bats");
    }
}

#[tokio::test]
async fn video_items_have_no_image() {
    let server = TestServer::start().await;
    let (_, body) = json(server.get("/api/gallery?category=videography").send().await.unwrap()).await;
    let items = body["data"].as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        assert!(item.get("image").is_none());
        assert!(item["video"].as_str().unwrap().starts_with("/videos/"));
    }
}

#[tokio::test]
async fn rejects_traversal_paths() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::POST, "/api/gallery")
            .json(&json!({ "title": "Sneaky", "image": "/images/../../etc/passwd" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["details"][0]["field"], "image");
}

#[tokio::test]
async fn gallery_has_no_update_route() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::PUT, "/api/gallery/1")
            .json(&json!({ "title": "Renamed" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 405);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn create_and_delete_item() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::POST, "/api/gallery")
            .json(&json!({ "title": "Load-in", "image": "/images/relent/IMG_1.jpg", "category": "relent" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 201);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let response = server.admin(Method::DELETE, &format!("/api/gallery/{id}")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let response = server.admin(Method::DELETE, &format!("/api/gallery/{id}")).send().await.unwrap();
    assert_eq!(response.status(), 404);
}
