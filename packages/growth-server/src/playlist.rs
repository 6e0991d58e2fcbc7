//! Training playlist: chapters of videos plus which videos have been watched.
//!
//! Chapter and video definitions come from a JSON file and never change at
//! runtime. Completion is kept in memory keyed by video id, so a video that
//! appears in two chapters counts as watched in both.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use growth_core::{ChapterProgress, VideoManifest, VideoSource};

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to read playlist: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid playlist JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate chapter id `{0}`")]
    DuplicateChapter(String),
    #[error("duplicate video id `{video}` in chapter `{chapter}`")]
    DuplicateVideo { chapter: String, video: String },
}

fn required_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
    /// Display number such as `"2"` or `"2.5"`; also the sort key.
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub urls: Vec<VideoSource>,
    /// Optional videos do not hold back chapter completion.
    #[serde(default = "required_default")]
    pub required: bool,
}

impl VideoEntry {
    pub fn manifest(&self) -> VideoManifest {
        VideoManifest {
            id: self.id.clone(),
            title: self.title.clone(),
            urls: self.urls.clone(),
        }
    }

    fn sort_key(&self) -> Option<f64> {
        self.number
            .as_deref()
            .and_then(|n| n.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    }
}

/// Numbered videos first in numeric order, unnumbered ones after.
fn by_number(a: &VideoEntry, b: &VideoEntry) -> Ordering {
    match (a.sort_key(), b.sort_key()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChapterEntry {
    id: String,
    #[serde(default)]
    videos: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    chapters: Vec<ChapterEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionResult {
    Recorded,
    AlreadyCompleted,
    UnknownVideo,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub number: Option<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    pub id: String,
    pub videos: Vec<VideoSummary>,
    pub chapter_progress: u32,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    chapters: Vec<ChapterEntry>,
    completed: HashMap<String, DateTime<Utc>>,
}

impl Playlist {
    pub fn from_json(json: &str) -> Result<Self, PlaylistError> {
        let file: PlaylistFile = serde_json::from_str(json)?;

        let mut chapter_ids = HashSet::new();
        for chapter in &file.chapters {
            if !chapter_ids.insert(chapter.id.as_str()) {
                return Err(PlaylistError::DuplicateChapter(chapter.id.clone()));
            }
            let mut video_ids = HashSet::new();
            for video in &chapter.videos {
                if !video_ids.insert(video.id.as_str()) {
                    return Err(PlaylistError::DuplicateVideo {
                        chapter: chapter.id.clone(),
                        video: video.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            chapters: file.chapters,
            completed: HashMap::new(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, PlaylistError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn chapter(&self, chapter_id: &str) -> Option<&ChapterEntry> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    pub fn has_chapter(&self, chapter_id: &str) -> bool {
        self.chapter(chapter_id).is_some()
    }

    pub fn chapter_ids(&self) -> impl Iterator<Item = &str> {
        self.chapters.iter().map(|c| c.id.as_str())
    }

    /// Looks the video up across every chapter.
    pub fn find_video(&self, video_id: &str) -> Option<&VideoEntry> {
        self.chapters
            .iter()
            .flat_map(|c| c.videos.iter())
            .find(|v| v.id == video_id)
    }

    pub fn is_completed(&self, video_id: &str) -> bool {
        self.completed.contains_key(video_id)
    }

    /// Records the first completion only; rewatching keeps the first time.
    pub fn complete(&mut self, video_id: &str, at: DateTime<Utc>) -> CompletionResult {
        if self.find_video(video_id).is_none() {
            return CompletionResult::UnknownVideo;
        }
        if self.completed.contains_key(video_id) {
            return CompletionResult::AlreadyCompleted;
        }
        self.completed.insert(video_id.to_string(), at);
        CompletionResult::Recorded
    }

    pub fn progress(&self, chapter_id: &str) -> Option<ChapterProgress> {
        let chapter = self.chapter(chapter_id)?;
        Some(ChapterProgress {
            completed: chapter
                .videos
                .iter()
                .filter(|v| self.is_completed(&v.id))
                .count(),
            total: chapter.videos.len(),
        })
    }

    /// True once every required video in the chapter has been watched.
    pub fn is_chapter_complete(&self, chapter_id: &str) -> Option<bool> {
        let chapter = self.chapter(chapter_id)?;
        Some(
            chapter
                .videos
                .iter()
                .filter(|v| v.required)
                .all(|v| self.is_completed(&v.id)),
        )
    }

    /// First chapter in playlist order that still has unwatched required videos.
    pub fn next_incomplete_chapter(&self) -> Option<&str> {
        self.chapters
            .iter()
            .find(|c| self.is_chapter_complete(&c.id) == Some(false))
            .map(|c| c.id.as_str())
    }

    pub fn summary(&self, chapter_id: &str) -> Option<ChapterSummary> {
        let chapter = self.chapter(chapter_id)?;
        let mut videos: Vec<&VideoEntry> = chapter.videos.iter().collect();
        videos.sort_by(|a, b| by_number(a, b));

        Some(ChapterSummary {
            id: chapter.id.clone(),
            videos: videos
                .into_iter()
                .map(|v| VideoSummary {
                    id: v.id.clone(),
                    title: v.title.clone(),
                    number: v.number.clone(),
                    completed: self.is_completed(&v.id),
                    completed_at: self.completed.get(&v.id).copied(),
                })
                .collect(),
            chapter_progress: self.progress(chapter_id)?.percent(),
            completed: self.is_chapter_complete(chapter_id)?,
        })
    }
}
