//! Axum route handlers for the analysis, suggestions, and cover-letter flows.
//!
//! Each handler validates inputs first (no model call happens on a validation
//! failure), then builds a prompt, runs the fallback invoker, and translates
//! exhaustion into its route-specific status. The 429-vs-500 difference
//! between routes is carried over from the original service on purpose.

use axum::extract::{Multipart, State};
use axum::{Form, Json};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::analysis::extract::{looks_like_pdf, resume_text_from_pdf};
use crate::analysis::parser::{clean_markdown, extract_section, parse_suggestions};
use crate::analysis::prompts;
use crate::errors::AppError;
use crate::llm_client::fallback::{complete_with_fallback, ErrorPolicy, MODEL_CANDIDATES};
use crate::llm_client::{ChatMessage, ChatRequest};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub match_percentage: String,
    pub confidence_score: String,
    pub resume_text: String,
    pub model_used: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub linkedin_url: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub suggestions: Vec<String>,
    pub model_used: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub model_used: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Multipart: file field `resume` (PDF), form field `job_description`,
/// optional `linkedin_url`. Returns the three extracted sections plus the
/// echoed resume text and the model that produced the analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume_bytes: Option<Bytes> = None;
    let mut job_description: Option<String> = None;
    let mut linkedin_url = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                resume_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Unreadable resume upload: {e}")))?,
                );
            }
            Some("job_description") => {
                job_description = Some(read_text_field(field).await?);
            }
            Some("linkedin_url") => {
                linkedin_url = read_text_field(field).await?;
            }
            _ => {}
        }
    }

    let (resume_bytes, job_description) = match (resume_bytes, job_description) {
        (Some(bytes), Some(job)) if !bytes.is_empty() && !job.trim().is_empty() => (bytes, job),
        _ => {
            return Err(AppError::Validation(
                "Missing resume or job description".to_string(),
            ))
        }
    };

    if !looks_like_pdf(&resume_bytes) {
        return Err(AppError::Validation(
            "Resume upload must be a PDF document".to_string(),
        ));
    }

    let resume_text = resume_text_from_pdf(&resume_bytes)?;

    let prompt = prompts::analysis_prompt(&resume_text, &job_description, &linkedin_url);
    let request = ChatRequest {
        messages: vec![
            ChatMessage::system(prompts::ANALYSIS_SYSTEM),
            ChatMessage::user(prompt),
        ],
        temperature: 0.7,
        max_tokens: 1200,
    };

    let completion = complete_with_fallback(
        state.chat.as_ref(),
        &MODEL_CANDIDATES,
        &request,
        ErrorPolicy::ContinueOnError,
    )
    .await
    .ok_or(AppError::ModelsExhausted)?;

    let analysis = clean_markdown(&extract_section(&completion.text, "Analysis"));
    let match_percentage = clean_markdown(&extract_section(&completion.text, "Match Percentage"));
    let confidence_score = clean_markdown(&extract_section(&completion.text, "Confidence Score"));

    Ok(Json(AnalyzeResponse {
        analysis,
        match_percentage,
        confidence_score,
        resume_text,
        model_used: completion.model,
    }))
}

/// POST /generate
///
/// Form fields `resume` and `job` (already-extracted text, not a file),
/// optional `linkedin_url`. Returns a suggestion list; exhaustion is a 500
/// on this route, unlike /analyze.
pub async fn handle_generate(
    State(state): State<AppState>,
    Form(request): Form<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let resume = non_empty(request.resume).ok_or_else(|| {
        AppError::Validation("Missing resume text".to_string())
    })?;
    let job = non_empty(request.job).ok_or_else(|| {
        AppError::Validation("Missing job description".to_string())
    })?;

    let prompt = prompts::suggestions_prompt(&resume, &job, &request.linkedin_url);
    let chat_request = ChatRequest {
        messages: vec![
            ChatMessage::system(prompts::SUGGESTIONS_SYSTEM),
            ChatMessage::user(prompt),
        ],
        temperature: 0.7,
        max_tokens: 500,
    };

    let completion = complete_with_fallback(
        state.chat.as_ref(),
        &MODEL_CANDIDATES,
        &chat_request,
        ErrorPolicy::ContinueOnError,
    )
    .await
    .ok_or_else(|| AppError::Generation("Both models failed or were rate-limited.".to_string()))?;

    let suggestions = parse_suggestions(&completion.text).into_suggestions();

    Ok(Json(GenerateResponse {
        suggestions,
        model_used: completion.model,
    }))
}

/// POST /generate-cover-letter
///
/// Form field `resume` (required text), optional `linkedin_url` and `job`.
/// Runs under `StopOnApiError`: a non-rate-limit provider error ends the
/// attempt instead of falling through to the next candidate.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Form(request): Form<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.resume.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }

    let prompt = prompts::cover_letter_prompt(&request.resume, &request.job, &request.linkedin_url);
    let chat_request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        temperature: 0.7,
        max_tokens: 500,
    };

    let completion = complete_with_fallback(
        state.chat.as_ref(),
        &MODEL_CANDIDATES,
        &chat_request,
        ErrorPolicy::StopOnApiError,
    )
    .await
    .ok_or_else(|| AppError::Generation("Cover letter generation failed.".to_string()))?;

    Ok(Json(CoverLetterResponse {
        cover_letter: completion.text,
        model_used: completion.model,
    }))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Unreadable form field: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
