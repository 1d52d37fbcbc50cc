//! Route handlers, generic over the record kind.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use axum::Json;
use serde_json::{json, Value};

use super::{Admin, ApiError, AppState, Envelope, HasService};
use crate::content::{Collection, Contacts, Events, Updatable};
use crate::error::ServiceError;
use crate::model::{stamp, RecordStore};
use crate::validation::{self, ListQuery, ValidationError};

fn body_error(rejection: JsonRejection) -> ServiceError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ServiceError::PayloadTooLarge;
    }
    ValidationError::single("Invalid JSON body", "body", rejection.body_text()).into()
}

fn query_error(rejection: QueryRejection) -> ServiceError {
    ValidationError::single("Invalid query parameters", "query", rejection.body_text()).into()
}

fn checked_id<S: RecordStore + 'static>(
    state: &AppState<S>,
    id: Result<Path<String>, PathRejection>,
) -> Result<String, ApiError> {
    let Path(id) = id.map_err(|r| {
        state.fail(ValidationError::single("Invalid ID parameter", "id", r.body_text()).into())
    })?;
    validation::record_id(&id)
        .map(str::to_string)
        .map_err(|err| state.fail(err.into()))
}

/// `GET /api`
pub async fn index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Venue content API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "events": "/api/events",
            "news": "/api/news",
            "gallery": "/api/gallery",
            "contact": "/api/contact",
        }
    }))
}

/// `GET /api/<kind>?category=&status=&published=&limit=`
pub async fn list<C, S>(
    State(state): State<AppState<S>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    C: Collection,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    let Query(query) = query.map_err(|r| state.fail(query_error(r)))?;
    let filter = validation::list_filter(&query, C::STATUSES).map_err(|e| state.fail(e.into()))?;
    let service = HasService::<C, S>::service(&state);
    let items = state.run(move || service.list(&filter)).await?;
    Ok(Envelope::list(items).ok())
}

/// `GET /api/<kind>/:id`
pub async fn get<C, S>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError>
where
    C: Collection,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    let id = checked_id(&state, id)?;
    let service = HasService::<C, S>::service(&state);
    let item = state.run(move || service.get(&id)).await?;
    Ok(Envelope::data(item).ok())
}

/// `POST /api/<kind>` (admin)
pub async fn create<C, S>(
    State(state): State<AppState<S>>,
    _admin: Admin,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError>
where
    C: Collection,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    let Json(body) = body.map_err(|r| state.fail(body_error(r)))?;
    let new = C::validate(&body).map_err(|e| state.fail(e.into()))?;
    let service = HasService::<C, S>::service(&state);
    let item = state.run(move || service.create(new)).await?;
    Ok(Envelope::data(item)
        .with_message(format!("{} created successfully", C::LABEL))
        .created())
}

/// `PUT /api/<kind>/:id` (admin)
pub async fn update<C, S>(
    State(state): State<AppState<S>>,
    _admin: Admin,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError>
where
    C: Updatable,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    let id = checked_id(&state, id)?;
    let Json(body) = body.map_err(|r| state.fail(body_error(r)))?;
    let patch = C::validate_patch(&body).map_err(|e| state.fail(e.into()))?;
    let service = HasService::<C, S>::service(&state);
    let item = state.run(move || service.update(&id, patch)).await?;
    Ok(Envelope::data(item)
        .with_message(format!("{} updated successfully", C::LABEL))
        .ok())
}

/// `DELETE /api/<kind>/:id` (admin)
pub async fn delete<C, S>(
    State(state): State<AppState<S>>,
    _admin: Admin,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError>
where
    C: Collection,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    let id = checked_id(&state, id)?;
    let service = HasService::<C, S>::service(&state);
    state.run(move || service.delete(&id)).await?;
    Ok(Envelope::message(format!("{} deleted successfully", C::LABEL)).ok())
}

/// `GET /api/<kind>` for collections only admins may read.
pub async fn list_private<C, S>(
    state: State<AppState<S>>,
    _admin: Admin,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    C: Collection,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    list::<C, S>(state, query).await
}

/// `GET /api/<kind>/:id` for collections only admins may read.
pub async fn get_private<C, S>(
    state: State<AppState<S>>,
    _admin: Admin,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError>
where
    C: Collection,
    S: RecordStore + 'static,
    AppState<S>: HasService<C, S>,
{
    get::<C, S>(state, id).await
}

/// `GET /api/events/upcoming/all`
pub async fn upcoming_events<S: RecordStore + 'static>(State(state): State<AppState<S>>) -> Result<Response, ApiError> {
    let service = HasService::<Events, S>::service(&state);
    let items = state.run(move || service.upcoming(stamp::now())).await?;
    Ok(Envelope::list(items).ok())
}

/// `POST /api/contact` (public)
pub async fn submit_contact<S: RecordStore + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body.map_err(|r| state.fail(body_error(r)))?;
    let new = Contacts::validate(&body).map_err(|e| state.fail(e.into()))?;
    let service = HasService::<Contacts, S>::service(&state);
    let receipt = state.run(move || service.submit(new)).await?;
    Ok(Envelope::data(receipt)
        .with_message("Thank you for your message! We will get back to you soon.")
        .created())
}

/// Unmatched routes.
pub async fn not_found<S: RecordStore + 'static>(State(state): State<AppState<S>>, uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "no route");
    state.fail(ServiceError::NotFound("Route"))
}

/// Known paths hit with a method they do not serve.
pub async fn method_not_allowed<S: RecordStore + 'static>(
    State(state): State<AppState<S>>,
    method: Method,
    uri: Uri,
) -> ApiError {
    tracing::debug!(%method, path = %uri.path(), "method not allowed");
    state.fail(ServiceError::MethodNotAllowed)
}
