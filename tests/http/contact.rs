use reqwest::Method;
use serde_json::json;

use std::time::Duration;

use crate::support::{ids, json, TestServer};

fn submission() -> serde_json::Value {
    json!({
        "name": "Sam Rivera",
        "email": "Sam@Example.com",
        "phone": "(816) 555-0100",
        "message": "Do you have tickets left for Friday?",
    })
}

#[tokio::test]
async fn public_submission_returns_receipt_only() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .client
            .post(server.url("/api/contact"))
            .json(&submission())
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Thank you for your message! We will get back to you soon.");
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["name"], "Sam Rivera");

    let id = data["id"].as_str().unwrap();
    let (status, body) = json(server.admin(Method::GET, &format!("/api/contact/{id}")).send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["email"], "sam@example.com");
    assert_eq!(body["data"]["status"], "new");
}

#[tokio::test]
async fn reading_contacts_requires_key() {
    let server = TestServer::start().await;
    let response = server.get("/api/contact").send().await.unwrap();
    assert_eq!(response.status(), 401);

    let (status, body) = json(server.admin(Method::GET, "/api/contact?status=new").send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn invalid_submission() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .client
            .post(server.url("/api/contact"))
            .json(&json!({ "name": "S", "email": "nope", "message": "hi" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 3);
}

async fn submit(server: &TestServer, name: &str) -> String {
    let mut body = submission();
    body["name"] = json!(name);
    let (status, body) = json(
        server
            .client
            .post(server.url("/api/contact"))
            .json(&body)
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 201);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn contacts_list_newest_first_then_limit() {
    let server = TestServer::start().await;
    let first = submit(&server, "First Caller").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = submit(&server, "Second Caller").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let third = submit(&server, "Third Caller").await;

    let (status, body) = json(server.admin(Method::GET, "/api/contact?limit=2").send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(ids(&body), vec![third.clone(), second.clone()]);

    let (_, body) = json(server.admin(Method::GET, "/api/contact").send().await.unwrap()).await;
    assert_eq!(ids(&body), vec![third, second, first]);
}

#[tokio::test]
async fn contacts_cannot_be_updated() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::PUT, "/api/contact/1")
            .json(&json!({ "status": "read" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 405);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Method not allowed");
}
