use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPhase {
    Idle,
    Fetching,
    FetchFailed,
    Ready,
    Playing,
    Ended,
    ReportingCompletion,
    ReportFailed,
    Completed,
}

impl VideoPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            VideoPhase::Idle => "IDLE",
            VideoPhase::Fetching => "FETCHING",
            VideoPhase::FetchFailed => "FETCH_FAILED",
            VideoPhase::Ready => "READY",
            VideoPhase::Playing => "PLAYING",
            VideoPhase::Ended => "ENDED",
            VideoPhase::ReportingCompletion => "REPORTING_COMPLETION",
            VideoPhase::ReportFailed => "REPORT_FAILED",
            VideoPhase::Completed => "COMPLETED",
        }
    }

    /// Phases from which a new video may be requested.
    pub const fn is_at_rest(self) -> bool {
        matches!(
            self,
            VideoPhase::Idle | VideoPhase::Playing | VideoPhase::ReportFailed | VideoPhase::Completed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: VideoPhase,
    pub to: VideoPhase,
    pub video_id: String,
}

const HISTORY_LIMIT: usize = 100;

/// Current phase plus a bounded log of how it got there.
#[derive(Debug)]
pub struct PlaybackStateMachine {
    current: VideoPhase,
    history: Vec<PhaseTransition>,
    change_count: u64,
}

impl PlaybackStateMachine {
    pub fn new() -> Self {
        Self {
            current: VideoPhase::Idle,
            history: Vec::new(),
            change_count: 0,
        }
    }

    pub fn phase(&self) -> VideoPhase {
        self.current
    }

    pub fn change_count(&self) -> u64 {
        self.change_count
    }

    pub fn history(&self) -> &[PhaseTransition] {
        &self.history
    }

    pub fn can_transition_to(&self, target: VideoPhase) -> bool {
        use VideoPhase::*;

        if target == Fetching {
            return self.current.is_at_rest();
        }

        matches!(
            (self.current, target),
            (Fetching, FetchFailed)
                | (Fetching, Ready)
                | (FetchFailed, Idle)
                | (FetchFailed, Playing)
                | (Ready, Playing)
                | (Ready, Idle)
                | (Playing, Ended)
                | (Ended, ReportingCompletion)
                | (ReportingCompletion, ReportFailed)
                | (ReportingCompletion, Completed)
        )
    }

    pub fn transition_to(
        &mut self,
        target: VideoPhase,
        video_id: impl Into<String>,
    ) -> Result<(), TransitionError> {
        if !self.can_transition_to(target) {
            return Err(TransitionError::InvalidTransition {
                from: self.current,
                to: target,
            });
        }

        let transition = PhaseTransition {
            from: self.current,
            to: target,
            video_id: video_id.into(),
        };
        tracing::debug!(
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            video_id = %transition.video_id,
            "video phase changed"
        );

        self.current = target;
        self.change_count = self.change_count.saturating_add(1);
        self.history.push(transition);

        if self.history.len() > HISTORY_LIMIT {
            let extra = self.history.len() - HISTORY_LIMIT;
            self.history.drain(0..extra);
        }

        Ok(())
    }
}

impl Default for PlaybackStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition { from: VideoPhase, to: VideoPhase },
}
