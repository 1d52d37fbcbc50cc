use reqwest::Method;
use serde_json::json;

use crate::support::{ids, json, TestServer};

#[tokio::test]
async fn list_seeds_sample_events() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/api/events").send().await.unwrap()).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["title"], "Summer Music Festival");
    assert_eq!(body["data"][0]["price"], 50);
    assert!(server.dir.path().join("events.json").exists());
}

#[tokio::test]
async fn create_update_delete_round() {
    let server = TestServer::start().await;

    let (status, body) = json(
        server
            .admin(Method::POST, "/api/events")
            .json(&json!({
                "title": "Winter Warmup",
                "date": "2099-01-20T20:00:00Z",
                "venue": "recordBar",
                "price": "15",
                "secretNote": "not stored"
            }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["status"], "upcoming");
    assert_eq!(body["data"]["price"], 15.0);
    assert!(body["data"].get("secretNote").is_none());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = json(
        server
            .admin(Method::PUT, &format!("/api/events/{id}"))
            .json(&json!({ "venue": "The Truman", "id": "hijack" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["venue"], "The Truman");
    assert_eq!(body["data"]["title"], "Winter Warmup");
    assert!(body["data"]["updatedAt"].is_string());

    let (status, _) = json(
        server
            .admin(Method::DELETE, &format!("/api/events/{id}"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = json(server.get(&format!("/api/events/{id}")).send().await.unwrap()).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Event not found");
}

#[tokio::test]
async fn upcoming_excludes_past_and_cancelled() {
    let server = TestServer::start().await;
    for (title, date, status) in [
        ("Later", "2099-06-01T20:00:00Z", "upcoming"),
        ("Sooner", "2098-06-01T20:00:00Z", "upcoming"),
        ("Called off", "2098-07-01T20:00:00Z", "cancelled"),
    ] {
        let response = server
            .admin(Method::POST, "/api/events")
            .json(&json!({ "title": title, "date": date, "venue": "Hall", "status": status }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
    }

    let (status, body) = json(server.get("/api/events/upcoming/all").send().await.unwrap()).await;
    assert_eq!(status, 200);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Sooner", "Later"]);
}

#[tokio::test]
async fn status_filter_and_limit() {
    let server = TestServer::start().await;
    let (_, body) = json(server.get("/api/events?status=upcoming&limit=1").send().await.unwrap()).await;
    assert_eq!(ids(&body), vec!["1"]);

    let (status, body) = json(server.get("/api/events?status=postponed").send().await.unwrap()).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["details"][0]["field"], "status");

    let (status, _) = json(server.get("/api/events?limit=500").send().await.unwrap()).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn invalid_event_reports_fields() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::POST, "/api/events")
            .json(&json!({ "title": "Hi", "date": "tomorrow" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["title", "date", "venue"]);
}

#[tokio::test]
async fn update_unknown_event_is_404() {
    let server = TestServer::start().await;
    let response = server
        .admin(Method::PUT, "/api/events/424242")
        .json(&json!({ "title": "Nope nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::POST, "/api/events")
            .header("content-type", "application/json")
            .body("{\"title\": ")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn bad_id_parameter_is_400() {
    let server = TestServer::start().await;
    let response = server.get("/api/events/not%20an%20id").send().await.unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn undecodable_id_is_enveloped_400() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/api/events/%FF").send().await.unwrap()).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Invalid ID parameter");
    assert_eq!(body["error"]["details"][0]["field"], "id");
}

#[tokio::test]
async fn wrong_method_on_upcoming_is_enveloped_405() {
    let server = TestServer::start().await;
    let (status, body) = json(
        server
            .admin(Method::DELETE, "/api/events/upcoming/all")
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, 405);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
}
