use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterProgress {
    pub completed: usize,
    pub total: usize,
}

impl ChapterProgress {
    /// Whole percent, rounded down. An empty chapter is 0%.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed * 100 / self.total) as u32
    }

    /// CSS width and label text, e.g. `"66%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// What one completion event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub before: ChapterProgress,
    pub after: ChapterProgress,
}

impl CompletionOutcome {
    pub fn newly_completed(&self) -> bool {
        self.after.completed > self.before.completed
    }

    /// True only on the event that finished the chapter.
    pub fn finished_chapter(&self) -> bool {
        self.after.is_complete() && self.newly_completed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VideoEntry {
    id: String,
    completed: bool,
}

/// Videos listed on the chapter page and their completion markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    videos: Vec<VideoEntry>,
}

impl Chapter {
    pub fn new<I, S>(videos: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self {
            videos: videos
                .into_iter()
                .map(|(id, completed)| VideoEntry {
                    id: id.into(),
                    completed,
                })
                .collect(),
        }
    }

    pub fn progress(&self) -> ChapterProgress {
        ChapterProgress {
            completed: self.videos.iter().filter(|v| v.completed).count(),
            total: self.videos.len(),
        }
    }

    pub fn is_completed(&self, video_id: &str) -> bool {
        self.videos.iter().any(|v| v.id == video_id && v.completed)
    }

    /// Marks `video_id` completed. Repeats and unknown ids leave the count
    /// unchanged.
    pub fn mark_completed(&mut self, video_id: &str) -> CompletionOutcome {
        let before = self.progress();
        if let Some(video) = self.videos.iter_mut().find(|v| v.id == video_id) {
            video.completed = true;
        } else {
            tracing::warn!(video_id, "completed video is not listed in this chapter");
        }
        CompletionOutcome {
            before,
            after: self.progress(),
        }
    }
}
