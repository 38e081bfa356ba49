use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Простой middleware для логирования запросов
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration = start.elapsed();
    if response.status().is_success() {
        tracing::info!("{} {} {} {}ms", status, method, path, duration.as_millis());
    } else {
        tracing::warn!("{} {} {} {}ms", status, method, path, duration.as_millis());
    }

    response
}
