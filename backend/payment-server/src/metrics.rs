use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use shared_metrics as metrics;

/// Counts and times every routed request, labelled by method and route template.
pub async fn track_http_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let labels = [method.as_str(), route.as_str()];

    metrics::HTTP_SERVER_REQUESTS_TOTAL
        .with_label_values(&labels)
        .inc();

    let start = std::time::Instant::now();
    let response = next.run(request).await;

    metrics::HTTP_SERVER_REQUEST_LATENCY
        .with_label_values(&labels)
        .observe(start.elapsed().as_secs_f64());

    if response.status().is_success() {
        metrics::HTTP_SERVER_REQUESTS_SUCCESSFUL
            .with_label_values(&labels)
            .inc();
    }

    response
}
