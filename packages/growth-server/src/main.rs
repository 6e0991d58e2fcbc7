use growth_server::config::Config;
use growth_server::logging;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let playlist = match growth_server::load_playlist(&config) {
        Ok(playlist) => playlist,
        Err(err) => {
            tracing::error!(error = %err, path = ?config.playlist_path, "failed to load playlist");
            std::process::exit(1);
        }
    };
    tracing::info!(
        chapters = playlist.chapter_ids().count(),
        source = ?config.playlist_path,
        "playlist loaded"
    );

    let app = growth_server::create_app(playlist);

    let addr = config.bind_addr();
    tracing::info!(%addr, "growth-server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
