use crate::support::{json, TestServer};

#[tokio::test]
async fn health_reports_environment() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/health").send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "production");
    assert!(body["uptime"].is_number());
}

#[tokio::test]
async fn detailed_health_probes_every_collection() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/health/detailed").send().await.unwrap()).await;
    assert_eq!(status, 200);
    for collection in ["events", "news", "gallery", "contacts"] {
        assert_eq!(body["checks"][collection]["status"], "OK");
    }
    // Probing does not seed.
    assert_eq!(body["checks"]["events"]["records"], 0);
}

#[tokio::test]
async fn corrupt_collection_degrades_health() {
    let server = TestServer::start().await;
    std::fs::write(server.dir.path().join("news.json"), "{ not json").unwrap();

    let (status, body) = json(server.get("/health/detailed").send().await.unwrap()).await;
    assert_eq!(status, 503);
    assert_eq!(body["status"], "DEGRADED");
    assert_eq!(body["checks"]["news"]["status"], "ERROR");

    let (status, body) = json(server.get("/api/news").send().await.unwrap()).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"]["message"], "An internal server error occurred");
}

#[tokio::test]
async fn unknown_route_is_enveloped_404() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/api/tickets").send().await.unwrap()).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn api_index_lists_collections() {
    let server = TestServer::start().await;
    let (status, body) = json(server.get("/api").send().await.unwrap()).await;
    assert_eq!(status, 200);
    assert_eq!(body["endpoints"]["events"], "/api/events");
}

#[tokio::test]
async fn request_id_is_returned() {
    let server = TestServer::start().await;
    let response = server.get("/health").send().await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
