//! Axum route handlers for roles, uploads and upload history.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRecord};
use crate::models::role::Role;
use crate::screening::engine::analyze;
use crate::state::AppState;

const FILE_FIELD: &str = "resume";
const ROLE_FIELD: &str = "role";
const DEFAULT_FILE_NAME: &str = "resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeFilter {
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub data: ResumeRecord,
}

/// Fields pulled out of the upload form.
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    role: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/roles
pub async fn handle_list_roles(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Role>>, AppError> {
    Ok(Json(state.roles.list_roles().await?))
}

/// GET /api/resumes?role=
///
/// The caller's own uploads, newest first.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(filter): Query<ResumeFilter>,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    let role = filter.role.as_deref().filter(|r| !r.is_empty());
    let resumes = state.resumes.list_resumes(&user.id, role).await?;
    Ok(Json(resumes))
}

/// POST /api/upload
///
/// Multipart form with a `resume` file and a `role` name. Extracts the text,
/// scores it against the role's keywords and stores the result.
pub async fn handle_upload(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart).await?;

    let (file_name, data) = form
        .file
        .ok_or_else(|| AppError::Validation("No resume file uploaded.".to_string()))?;
    let role_name = form
        .role
        .ok_or_else(|| AppError::Validation("No role selected.".to_string()))?;

    let role = state
        .roles
        .find_role(&role_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Role '{role_name}' not found.")))?;

    let text = state.extractor.extract(data).await?;
    let analysis = analyze(&text, &role.keywords);

    info!(
        user_id = %user.id,
        role = %role.name,
        word_count = analysis.word_count,
        found = analysis.found_keywords.len(),
        expected = analysis.expected_keywords.len(),
        accepted = analysis.decision.is_accepted(),
        "Résumé analysed"
    );

    let record = state
        .resumes
        .insert_resume(NewResume {
            user_id: user.id,
            file_name,
            role: role.name,
            analysis,
        })
        .await?;

    Ok(Json(UploadResponse {
        message: "Resume uploaded and analyzed successfully.".to_string(),
        data: record,
    }))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_FILE_NAME)
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                // browsers send an empty part when no file was picked
                if !data.is_empty() {
                    form.file = Some((file_name, data));
                }
            }
            ROLE_FIELD => {
                let role = field.text().await.map_err(multipart_error)?;
                let role = role.trim();
                if !role.is_empty() {
                    form.role = Some(role.to_string());
                }
            }
            _ => {
                // drain unknown fields so the stream can advance
                field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    Ok(form)
}

/// Body-limit overruns surface from the multipart stream as 413s.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Resume file exceeds the upload limit.".to_string())
    } else {
        AppError::Validation(e.body_text())
    }
}
