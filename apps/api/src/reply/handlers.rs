//! Axum route handlers for the Reply API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::reply::language::Language;
use crate::reply::orchestrator::{
    generate_reply, prepare_prompt, preview, rewrite_reply, GeneratedReply, PromptPreview,
    ReplyRequest, UploadedDocument,
};
use crate::reply::tone::{push_unique, Tone};
use crate::sources::document::DocumentFormat;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub preview: PromptPreview,
    pub warnings: Vec<String>,
}

/// Optional body of a rewrite call. The language label is parsed like the
/// form field, so an unknown label degrades to English with a warning.
#[derive(Debug, Default, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LastReplyResponse {
    pub reply: String,
    pub generated_at: Option<DateTime<Utc>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/replies/preview
///
/// Builds the prompt exactly as `generate` would and returns it for
/// inspection. The user content is truncated for display.
pub async fn handle_preview(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PreviewResponse>, AppError> {
    let (request, mut warnings) = parse_reply_form(multipart.map_err(invalid_form)?).await?;

    let prepared = prepare_prompt(&request, &state.fetcher, &state.prompt_options).await?;
    warnings.extend(prepared.warnings);

    Ok(Json(PreviewResponse {
        preview: preview(&prepared.prompt),
        warnings,
    }))
}

/// POST /api/v1/replies/generate
///
/// Full pipeline: extract → validate → fetch job posting → build → generate.
/// The reply replaces the session's last reply.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GeneratedReply>, AppError> {
    let (request, form_warnings) = parse_reply_form(multipart.map_err(invalid_form)?).await?;

    let mut session = state.session.lock().await;
    let mut reply = generate_reply(&mut session, state.reply_context(), &request).await?;

    let mut warnings = form_warnings;
    warnings.append(&mut reply.warnings);
    reply.warnings = warnings;

    Ok(Json(reply))
}

/// POST /api/v1/replies/rewrite
///
/// Restyles the last generated reply. Optional body: `{"language": "Dutch"}`;
/// the language only steers the sampling temperature.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GeneratedReply>, AppError> {
    let request = parse_rewrite_body(&body)?;
    let mut warnings = Vec::new();
    let language = request
        .language
        .as_deref()
        .map(|label| resolve_language(label, &mut warnings))
        .unwrap_or_default();

    let mut session = state.session.lock().await;
    let mut reply = rewrite_reply(&mut session, state.reply_context(), language).await?;
    reply.warnings.append(&mut warnings);
    Ok(Json(reply))
}

/// GET /api/v1/replies/last
pub async fn handle_last_reply(State(state): State<AppState>) -> Json<LastReplyResponse> {
    let session = state.session.lock().await;
    Json(LastReplyResponse {
        reply: session.last_reply().to_string(),
        generated_at: session.generated_at(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Form parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads the multipart form into a `ReplyRequest`.
///
/// Fields: `resume`, `cover_letter` (files); `job_url`, `job_text`, `notes`,
/// `language`, `formality` (text); `tone` (repeatable text).
/// An unknown language falls back to English with a warning. Unknown tones
/// and formality labels that do not belong to the language are rejected.
async fn parse_reply_form(mut multipart: Multipart) -> Result<(ReplyRequest, Vec<String>), AppError> {
    let mut request = ReplyRequest::default();
    let mut warnings = Vec::new();
    let mut language_label = String::new();
    let mut formality_label = String::new();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" | "cover_letter" => {
                let format = DocumentFormat::detect(field.content_type(), field.file_name());
                let bytes = field.bytes().await.map_err(invalid_form)?;
                let upload = document_upload(bytes, format);
                if name == "resume" {
                    request.resume = upload;
                } else {
                    request.cover_letter = upload;
                }
            }
            "job_url" => request.job_url = field.text().await.map_err(invalid_form)?,
            "job_text" => request.job_text = field.text().await.map_err(invalid_form)?,
            "notes" => request.notes = field.text().await.map_err(invalid_form)?,
            "tone" => {
                let label = field.text().await.map_err(invalid_form)?;
                if label.trim().is_empty() {
                    continue;
                }
                let tone = Tone::from_label(&label)
                    .ok_or_else(|| AppError::Validation(format!("Unknown tone '{label}'")))?;
                push_unique(&mut request.tones, tone);
            }
            "language" => language_label = field.text().await.map_err(invalid_form)?,
            "formality" => formality_label = field.text().await.map_err(invalid_form)?,
            other => debug!("Ignoring unexpected form field '{other}'"),
        }
    }

    request.language = resolve_language(&language_label, &mut warnings);

    if !formality_label.trim().is_empty() && !request.language.is_default() {
        let formality = request
            .language
            .formality_from_label(&formality_label)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Formality '{}' is not valid for {}",
                    formality_label.trim(),
                    request.language.label()
                ))
            })?;
        request.formality = Some(formality);
    }

    Ok((request, warnings))
}

/// Blank selects the default language; an unknown label falls back to it
/// with a warning.
fn resolve_language(label: &str, warnings: &mut Vec<String>) -> Language {
    if label.trim().is_empty() {
        return Language::default();
    }
    Language::from_label(label).unwrap_or_else(|| {
        warn!("Unknown language '{label}', falling back to English");
        warnings.push(format!(
            "Language '{}' is not supported; the reply will be written in English.",
            label.trim()
        ));
        Language::English
    })
}

/// An empty body is the same as `{}`.
fn parse_rewrite_body(body: &[u8]) -> Result<RewriteRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RewriteRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid rewrite request body: {e}")))
}

fn document_upload(bytes: Bytes, format: Option<DocumentFormat>) -> Option<UploadedDocument> {
    // Browsers send an empty part for an untouched file input.
    if bytes.is_empty() {
        return None;
    }
    Some(UploadedDocument { bytes, format })
}

fn invalid_form(e: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("Invalid multipart payload: {e}"))
}
