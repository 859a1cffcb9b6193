use std::{io, process, sync::Arc};

use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use event_reminder::config::{Config, RECONCILE_PERIOD};
use event_reminder::{server, Reconciler, StdoutNotifier};

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "event_reminder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            process::exit(1);
        }
    };

    for key in config.missing() {
        warn!("`{key}` is not set, reminder cycles will fail until it is");
    }

    let reconciler =
        Reconciler::from_config(&config, Arc::new(StdoutNotifier)).map_err(io::Error::other)?;
    let reconcile = tokio::spawn(reconciler.run(RECONCILE_PERIOD));

    let listener = TcpListener::bind(config.address).await?;
    info!("listening at http://{}", config.address);

    let served = server::serve(listener, shutdown_signal()).await;
    reconcile.abort();
    info!("server stopped");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(%err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to listen for SIGTERM");
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
