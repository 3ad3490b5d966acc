use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use nagar_api::auth::AppStateInner;
use nagar_store::reports::ReportStore;
use nagar_store::sessions::SessionStore;
use nagar_store::users::UserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "nagar_server=debug,nagar_api=debug,nagar_store=debug,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let host = std::env::var("NAGAR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("NAGAR_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let data_dir: PathBuf = std::env::var("NAGAR_DATA_DIR")
        .unwrap_or_else(|_| "./data".into())
        .into();

    std::fs::create_dir_all(&data_dir)?;

    // Stores: one JSON file each, loaded once, rewritten on every mutation
    let state = Arc::new(AppStateInner::new(
        UserStore::open(&data_dir),
        SessionStore::open(&data_dir),
        ReportStore::open(&data_dir),
    ));

    let app = nagar_api::router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Nagar server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
