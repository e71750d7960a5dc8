//! Router assembly and server lifecycle.

pub mod handlers;
pub mod state;

use crate::envelope::{panic_detail, ApiError, NetworkResponse};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;
use log::{error, info, warn};
use std::any::Any;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;

use self::handlers::{monuments, reports, system};
use self::state::AppState;

/// Builds the router with every registry endpoint.
pub fn create_app(state: AppState) -> Router {
    let cors = state.config.cors_layer();

    Router::new()
        .route("/", get(system::hello))
        .route("/populate", get(system::populate))
        .route("/monuments", get(monuments::list_monuments))
        .route("/monuments/", get(monuments::list_monuments))
        .route("/monuments/search", get(monuments::search_monuments))
        .route("/monuments/condition/:id", put(monuments::update_condition))
        .route("/monuments/:id", get(monuments::get_monument))
        .route("/monuments/:id/reports", get(reports::reports_for_monument))
        .route(
            "/reports",
            get(reports::list_reports).post(reports::create_report),
        )
        .route("/reports/", get(reports::list_reports))
        .route("/reports/search", post(reports::search_reports))
        .route("/reports/resolve", put(reports::resolve_reports))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(endpoint_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

/// Serves `app` on `addr` until Ctrl-C.
pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=server_start module=api status=ok addr={}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_signal module=api status=error error={}", err);
    }
}

async fn endpoint_not_found(uri: Uri) -> NetworkResponse<()> {
    warn!(
        "event=http_request module=api status=error kind=not_found path={}",
        uri.path()
    );
    NetworkResponse::endpoint_not_found(format!("no endpoint for `{}`", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> NetworkResponse<()> {
    warn!(
        "event=http_request module=api status=error kind=validation method={} path={}",
        method,
        uri.path()
    );
    NetworkResponse::method_not_allowed(format!("`{method}` is not allowed on `{}`", uri.path()))
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_detail(payload.as_ref());
    let error = ApiError::internal(format!("handler panicked: {detail}"));
    error!(
        "event=http_request module=api status=error kind=internal error={}",
        error
    );
    NetworkResponse::<()>::failure("Request failed", &error).into_response()
}
