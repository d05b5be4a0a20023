use std::sync::Arc;

use askama::Template;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use tokio::net::ToSocketAddrs;

use crate::container::ContainerID;
use crate::dashboard::Dashboard;
use crate::runtime::ContainerRuntime;

mod models;
mod page;

/// Shared state of all handlers.
#[derive(Debug)]
pub struct AppState<R> {
    dashboard: Arc<Dashboard<R>>,
    title: Arc<str>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            dashboard: Arc::clone(&self.dashboard),
            title: Arc::clone(&self.title),
        }
    }
}

impl<R: ContainerRuntime> AppState<R> {
    pub fn new(dashboard: Arc<Dashboard<R>>, title: impl Into<Arc<str>>) -> Self {
        Self {
            dashboard,
            title: title.into(),
        }
    }
}

async fn index<R: ContainerRuntime>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
) -> Response {
    let snapshots = match state.dashboard.snapshots().await {
        Ok(snapshots) => snapshots,
        Err(err) => {
            log::error!("Failed to list containers: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to list containers",
            )
                .into_response();
        }
    };

    let page = page::IndexPage::new(&state.title, &snapshots, request_host(&headers));
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            log::error!("Failed to render dashboard page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn list_containers<R: ContainerRuntime>(State(state): State<AppState<R>>) -> Response {
    match state.dashboard.snapshots().await {
        Ok(snapshots) => (StatusCode::OK, Json(snapshots)).into_response(),
        Err(err) => {
            log::error!("Failed to list containers: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(models::ErrorBody::new(err)),
            )
                .into_response()
        }
    }
}

async fn toggle_container<R: ContainerRuntime>(
    State(state): State<AppState<R>>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match ContainerID::new(&raw_id) {
        Ok(id) => id,
        Err(err) => {
            log::warn!("Rejected toggle request: {}", err);
            return (StatusCode::BAD_REQUEST, Json(models::ErrorBody::new(err))).into_response();
        }
    };

    match state.dashboard.toggle(&id).await {
        Ok(transition) => {
            log::info!("Container `{}` {}", id, transition);
            (
                StatusCode::OK,
                Json(models::ToggleResponse { id, transition }),
            )
                .into_response()
        }
        Err(err) => {
            log::error!("Error toggling container `{}`: {}", id, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(models::ErrorBody::new(err)),
            )
                .into_response()
        }
    }
}

/// Host part of the `Host` header, without port. Used to link published ports.
fn request_host(headers: &HeaderMap) -> &str {
    let Some(host) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        return "localhost";
    };
    if host.starts_with('[') {
        // IPv6 literal, keep the brackets
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':')
        .next()
        .filter(|h| !h.is_empty())
        .unwrap_or("localhost")
}

pub fn router<R: ContainerRuntime>(state: AppState<R>) -> axum::Router {
    axum::Router::new()
        .route("/", get(index::<R>))
        .route("/api/containers", get(list_containers::<R>))
        .route("/toggle/{id}", post(toggle_container::<R>))
        .with_state(state)
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new<R: ContainerRuntime>(state: AppState<R>) -> Self {
        Self {
            router: router(state),
        }
    }

    /// Serves the dashboard until `shutdown` resolves, then drains in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound or the server fails.
    pub async fn listen(
        self,
        addr: impl ToSocketAddrs,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("Dashboard listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
