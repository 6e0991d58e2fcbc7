use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::playlist::Playlist;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    playlist: Arc<RwLock<Playlist>>,
}

impl AppState {
    pub fn new(playlist: Playlist) -> Self {
        Self {
            started_at: Instant::now(),
            playlist: Arc::new(RwLock::new(playlist)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn playlist(&self) -> &RwLock<Playlist> {
        &self.playlist
    }
}
