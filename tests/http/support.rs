use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tempfile::TempDir;
use venue_content::http::{self, AppState, Settings};
use venue_content::Environment;

pub const API_KEY: &str = "test-key";

/// A running server plus the data directory backing it.
pub struct TestServer {
    pub base: String,
    pub client: Client,
    pub dir: TempDir,
}

impl TestServer {
    /// Production-mode server guarded by [`API_KEY`].
    pub async fn start() -> Self {
        Self::with_settings(Settings::new(Environment::Production, Some(API_KEY.to_string()))).await
    }

    /// Bind to port 0 and return the actual address.
    pub async fn with_settings(settings: Settings) -> Self {
        let dir = TempDir::new().unwrap();
        let state = AppState::open(dir.path(), settings).unwrap();
        let app = http::router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base: format!("http://{addr}"),
            client: Client::new(),
            dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn admin(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path)).header("x-api-key", API_KEY)
    }
}

pub async fn json(response: Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json().await.unwrap();
    (status, body)
}

pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
