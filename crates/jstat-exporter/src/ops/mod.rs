//! Operational HTTP endpoints.
//!
//! - `/`        : landing page linking to the metrics path
//! - `/healthz` : liveness
//! - metrics    : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(landing_page(&state.cfg().web.metrics_path))
}

pub fn landing_page(metrics_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>jstat Exporter</title></head>\n\
         <body>\n\
         <h1>jstat Exporter</h1>\n\
         <p><a href=\"{metrics_path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    // Scrapes spawn jstat and wait for it; keep that off the async workers.
    let rendered = tokio::task::spawn_blocking(move || state.render_metrics()).await;

    match rendered {
        Ok(Ok(body)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Ok(Err(e)) => {
            tracing::warn!(kind = e.kind().as_str(), error = %e, "render metrics failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "metrics task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics task failed").into_response()
        }
    }
}
