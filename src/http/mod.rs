//! HTTP transport: the REST surface over the collection services.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api`: index of collections.
//! - `GET|POST /api/{events,news,gallery}`, `GET|DELETE /api/<kind>/:id`.
//! - `PUT /api/{events,news}/:id`, `GET /api/events/upcoming/all`.
//! - `POST /api/contact` (public), `GET /api/contact[/:id]`, `DELETE /api/contact/:id`.
//! - `GET /health`, `GET /health/detailed`.
//!
//! Writes (and contact reads) require the shared API key, see [`auth`].
//!
//! ## Example
//!
//! ```ignore
//! use venue_content::http::{self, AppState, Settings};
//!
//! let state = AppState::open("./data", Settings::new(Environment::Production, Some(key)))?;
//! http::serve(state, "0.0.0.0:5000").await?;
//! ```

pub mod auth;
mod handlers;
mod health;
mod response;
mod router;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Environment;
use crate::content::{Collection, ContentService, Contacts, Events, Gallery, News};
use crate::error::ServiceError;
use crate::model::{FileRecordStore, RecordStore, StorageError};

pub use auth::Admin;
pub use response::{ApiError, Envelope};
pub use router::router;

/// Runtime settings the handlers need.
#[derive(Debug)]
pub struct Settings {
    pub environment: Environment,
    pub api_key: Option<String>,
    started_at: Instant,
}

impl Settings {
    pub fn new(environment: Environment, api_key: Option<String>) -> Self {
        Self {
            environment,
            api_key,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the settings (and so the server) were created.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Shared handler state: one service per collection.
pub struct AppState<S> {
    pub events: Arc<ContentService<Events, S>>,
    pub news: Arc<ContentService<News, S>>,
    pub gallery: Arc<ContentService<Gallery, S>>,
    pub contacts: Arc<ContentService<Contacts, S>>,
    settings: Arc<Settings>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            news: Arc::clone(&self.news),
            gallery: Arc::clone(&self.gallery),
            contacts: Arc::clone(&self.contacts),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<S: RecordStore + 'static> AppState<S> {
    pub fn new(settings: Settings, events: S, news: S, gallery: S, contacts: S) -> Self {
        Self {
            events: Arc::new(ContentService::new(events)),
            news: Arc::new(ContentService::new(news)),
            gallery: Arc::new(ContentService::new(gallery)),
            contacts: Arc::new(ContentService::new(contacts)),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Wrap a service error with this server's disclosure policy.
    pub fn fail(&self, error: ServiceError) -> ApiError {
        ApiError::new(error, self.settings.environment.is_development())
    }

    /// Run blocking store work off the async runtime.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let outcome = tokio::task::spawn_blocking(work)
            .await
            .unwrap_or_else(|err| Err(ServiceError::Internal(format!("store task failed: {}", err))));
        outcome.map_err(|err| self.fail(err))
    }
}

impl AppState<FileRecordStore> {
    /// Open the four collection files under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>, settings: Settings) -> Result<Self, StorageError> {
        let data_dir = data_dir.as_ref();
        Ok(Self::new(
            settings,
            FileRecordStore::open(data_dir, Events::NAME)?,
            FileRecordStore::open(data_dir, News::NAME)?,
            FileRecordStore::open(data_dir, Gallery::NAME)?,
            FileRecordStore::open(data_dir, Contacts::NAME)?,
        ))
    }
}

/// Selects the service for kind `C` out of the shared state.
pub trait HasService<C: Collection, S> {
    fn service(&self) -> Arc<ContentService<C, S>>;
}

macro_rules! has_service {
    ($kind:ty, $field:ident) => {
        impl<S> HasService<$kind, S> for AppState<S> {
            fn service(&self) -> Arc<ContentService<$kind, S>> {
                Arc::clone(&self.$field)
            }
        }
    };
}

has_service!(Events, events);
has_service!(News, news);
has_service!(Gallery, gallery);
has_service!(Contacts, contacts);

/// Serve on `addr` (e.g. `"0.0.0.0:5000"`) until Ctrl-C or SIGTERM.
pub async fn serve<S: RecordStore + 'static>(state: AppState<S>, addr: &str) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(state, listener, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` completes.
pub async fn serve_on<S, F>(state: AppState<S>, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    S: RecordStore + 'static,
    F: std::future::Future<Output = ()> + Send + 'static,
{
    info!(
        address = %listener.local_addr()?,
        environment = %state.settings().environment,
        "listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
