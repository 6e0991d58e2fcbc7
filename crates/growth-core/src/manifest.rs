use serde::{Deserialize, Serialize};

/// One encoding of a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    #[serde(rename = "type")]
    pub mime_type: String,
    pub src: String,
}

/// Server description of a playable video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoManifest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub urls: Vec<VideoSource>,
}

impl VideoManifest {
    /// First encoding, in server order, that `can_play` accepts.
    pub fn select_source<F>(&self, can_play: F) -> Option<&VideoSource>
    where
        F: Fn(&str) -> bool,
    {
        self.urls.iter().find(|source| can_play(&source.mime_type))
    }
}
