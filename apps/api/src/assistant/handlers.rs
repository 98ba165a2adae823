//! Axum route handlers for the Assistant API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::cv::CvDocument;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialStatusResponse {
    pub configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub cv: Option<CvDocument>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub cv: Option<CvDocument>,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub company_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ImproveSectionRequest {
    pub cv: Option<CvDocument>,
    pub section_type: String,
    pub current_content: String,
}

/// Body for the tasks that only need the CV.
#[derive(Debug, Deserialize)]
pub struct CvOnlyRequest {
    pub cv: Option<CvDocument>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedTextResponse {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/credential
pub async fn handle_credential_status(
    State(state): State<AppState>,
) -> Json<CredentialStatusResponse> {
    Json(CredentialStatusResponse {
        configured: state.assistant.has_credential(),
    })
}

/// PUT /api/v1/credential
///
/// Replaces and persists the Gemini API key. The key is never echoed back.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Json(request): Json<SetCredentialRequest>,
) -> Result<Json<CredentialStatusResponse>, AppError> {
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("api_key cannot be empty".to_string()));
    }

    state.assistant.set_credential(api_key)?;

    Ok(Json(CredentialStatusResponse { configured: true }))
}

/// POST /api/v1/assistant/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<GeneratedTextResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let text = state
        .assistant
        .ask(&request.message, request.cv.as_ref())
        .await?;

    Ok(Json(GeneratedTextResponse { text }))
}

/// POST /api/v1/assistant/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<GeneratedTextResponse>, AppError> {
    let text = state
        .assistant
        .generate_cover_letter(
            request.cv.as_ref(),
            &request.job_description,
            &request.company_name,
        )
        .await?;

    Ok(Json(GeneratedTextResponse { text }))
}

/// POST /api/v1/assistant/improve-section
pub async fn handle_improve_section(
    State(state): State<AppState>,
    Json(request): Json<ImproveSectionRequest>,
) -> Result<Json<GeneratedTextResponse>, AppError> {
    if request.section_type.trim().is_empty() {
        return Err(AppError::Validation(
            "section_type cannot be empty".to_string(),
        ));
    }

    let text = state
        .assistant
        .improve_section(
            request.cv.as_ref(),
            &request.section_type,
            &request.current_content,
        )
        .await?;

    Ok(Json(GeneratedTextResponse { text }))
}

/// POST /api/v1/assistant/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    Json(request): Json<CvOnlyRequest>,
) -> Result<Json<GeneratedTextResponse>, AppError> {
    let text = state
        .assistant
        .interview_questions(request.cv.as_ref())
        .await?;
    Ok(Json(GeneratedTextResponse { text }))
}

/// POST /api/v1/assistant/skill-suggestions
pub async fn handle_skill_suggestions(
    State(state): State<AppState>,
    Json(request): Json<CvOnlyRequest>,
) -> Result<Json<GeneratedTextResponse>, AppError> {
    let text = state.assistant.suggest_skills(request.cv.as_ref()).await?;
    Ok(Json(GeneratedTextResponse { text }))
}
