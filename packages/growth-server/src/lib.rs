pub mod config;
pub mod logging;
pub mod playlist;
pub mod response;
pub mod routes;
pub mod state;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::playlist::{Playlist, PlaylistError};
use crate::state::AppState;

/// Sample playlist shipped with the server, used when no file is configured.
pub const BUNDLED_PLAYLIST: &str = include_str!("../playlist.json");

pub fn load_playlist(config: &config::Config) -> Result<Playlist, PlaylistError> {
    match &config.playlist_path {
        Some(path) => Playlist::load(path),
        None => Playlist::from_json(BUNDLED_PLAYLIST),
    }
}

pub fn create_app(playlist: Playlist) -> axum::Router {
    routes::router(AppState::new(playlist))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
