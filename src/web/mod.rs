use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub mod pages;
pub mod routes;
pub mod state;

use crate::core::submission::SubmissionOutcome;
use crate::core::{ConfigProvider, Result};
use crate::utils::error::AppError;
use pages::{submit_page, SiteMetadata, SubmitView};
use routes::{
    gallery_handler, setups_handler, submissions_handler, submit_form_handler, submit_page_handler,
};
use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    // 送出流程中的 panic 仍以 _form 錯誤回應
    let site = state.site.clone();
    let submit_page_routes = Router::new()
        .route("/submit", get(submit_form_handler).post(submit_page_handler))
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
            submit_page_panic(&site, panic)
        }));
    let submission_api = Router::new()
        .route("/api/submissions", post(submissions_handler))
        .layer(CatchPanicLayer::custom(submission_api_panic));

    Router::new()
        .route("/", get(gallery_handler))
        .route("/api/setups", get(setups_handler))
        .merge(submit_page_routes)
        .merge(submission_api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn panic_message<'a>(panic: &'a (dyn Any + Send + 'static)) -> &'a str {
    panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic")
}

fn submission_api_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("💥 Submission handler panicked: {}", panic_message(panic.as_ref()));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SubmissionOutcome::unexpected()),
    )
        .into_response()
}

fn submit_page_panic(site: &SiteMetadata, panic: Box<dyn Any + Send + 'static>) -> Response {
    error!("💥 Submit page panicked: {}", panic_message(panic.as_ref()));
    let outcome = SubmissionOutcome::unexpected();
    Html(submit_page(
        site,
        &SubmitView {
            values: None,
            outcome: Some(&outcome),
        },
    ))
    .into_response()
}

/// Serves on an already bound listener until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServerError {
            message: e.to_string(),
        })?;

    info!("Server shut down");
    Ok(())
}

pub async fn start_server<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    info!("Initializing state...");
    let state = AppState::from_config(config)?;

    let address = format!("{}:{}", config.bind_address(), config.port());
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::ServerError {
            message: format!("failed to bind {}: {}", address, e),
        })?;
    info!("🚀 Server running on {address} ({})", config.environment());

    serve(listener, state).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
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
}
