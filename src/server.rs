use std::future::Future;
use std::io;

use axum::{routing::get, Router};
use tokio::net::TcpListener;

pub const LIVENESS_BODY: &str = "Event Reminder Service is running!\n";

pub fn router() -> Router {
    Router::new().route("/", get(liveness))
}

async fn liveness() -> &'static str {
    LIVENESS_BODY
}

pub async fn serve<F>(listener: TcpListener, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
}
