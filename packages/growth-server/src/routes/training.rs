use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};

use growth_core::VideoManifest;

use crate::playlist::{ChapterSummary, CompletionResult};
use crate::response::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:chapter", get(chapter_summary))
        .route("/:chapter/completed", get(chapter_completed))
        .route(
            "/:chapter/videos/:file",
            get(video_manifest).post(video_completed),
        )
}

/// `intro-1.json` → `intro-1`; anything else is not a video endpoint.
fn video_id(file: &str) -> AppResult<&str> {
    file.strip_suffix(".json")
        .ok_or_else(|| AppError::not_found(format!("no video resource `{file}`")))
}

fn unknown_chapter(chapter: &str) -> AppError {
    AppError::not_found(format!("unknown chapter `{chapter}`"))
}

async fn chapter_summary(
    State(state): State<AppState>,
    Path(chapter): Path<String>,
) -> AppResult<Json<ChapterSummary>> {
    state
        .playlist()
        .read()
        .summary(&chapter)
        .map(Json)
        .ok_or_else(|| unknown_chapter(&chapter))
}

/// `null` for an unknown video; the page reports it as unavailable.
async fn video_manifest(
    State(state): State<AppState>,
    Path((chapter, file)): Path<(String, String)>,
) -> AppResult<Json<Option<VideoManifest>>> {
    let id = video_id(&file)?;
    let playlist = state.playlist().read();
    if !playlist.has_chapter(&chapter) {
        return Err(unknown_chapter(&chapter));
    }

    let manifest = playlist.find_video(id).map(|v| v.manifest());
    if manifest.is_none() {
        tracing::debug!(%chapter, video = %id, "manifest requested for unknown video");
    }
    Ok(Json(manifest))
}

#[derive(Debug, Deserialize)]
struct CompletionForm {
    completed: String,
}

async fn video_completed(
    State(state): State<AppState>,
    Path((chapter, file)): Path<(String, String)>,
    Form(form): Form<CompletionForm>,
) -> AppResult<StatusCode> {
    let id = video_id(&file)?;
    let completed = match form.completed.trim() {
        "true" => true,
        "false" => false,
        other => {
            return Err(AppError::validation(format!(
                "completed must be true or false, got `{other}`"
            )))
        }
    };

    let mut playlist = state.playlist().write();
    if !playlist.has_chapter(&chapter) {
        return Err(unknown_chapter(&chapter));
    }
    if !completed {
        return Ok(StatusCode::NO_CONTENT);
    }

    match playlist.complete(id, chrono::Utc::now()) {
        CompletionResult::Recorded => {
            tracing::info!(%chapter, video = %id, "video completed");
        }
        CompletionResult::AlreadyCompleted => {
            tracing::debug!(%chapter, video = %id, "video already completed");
        }
        CompletionResult::UnknownVideo => {
            tracing::warn!(%chapter, video = %id, "completion reported for unknown video");
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChapterCompletedResponse {
    chapter: String,
    completed: bool,
    next_chapter: Option<String>,
}

/// Chapter-complete landing; sends the visitor back while videos remain.
async fn chapter_completed(
    State(state): State<AppState>,
    Path(chapter): Path<String>,
) -> AppResult<Response> {
    let playlist = state.playlist().read();
    let complete = playlist
        .is_chapter_complete(&chapter)
        .ok_or_else(|| unknown_chapter(&chapter))?;

    if !complete {
        return Ok(Redirect::to(&format!("/training/{chapter}")).into_response());
    }

    Ok(Json(ChapterCompletedResponse {
        next_chapter: playlist.next_incomplete_chapter().map(str::to_string),
        chapter,
        completed: true,
    })
    .into_response())
}
