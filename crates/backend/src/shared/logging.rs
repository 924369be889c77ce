use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Консоль плюс файл `target/logs/backend.log`. Фильтр берётся из `RUST_LOG`.
pub fn init_tracing() -> anyhow::Result<()> {
    let log_dir = Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // SQL запросы не пишем, логи приложения оставляем
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}

/// Метод, путь, статус и время обработки каждого запроса
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis();
    if response.status().is_server_error() {
        tracing::warn!("{} {} -> {} ({} ms)", method, path, status, elapsed_ms);
    } else {
        tracing::info!("{} {} -> {} ({} ms)", method, path, status, elapsed_ms);
    }

    response
}
