//! Reply Orchestrator: runs one generate or rewrite request end to end.
//!
//! Flow: extract documents → validate → (credential check) → resolve job
//!       text → build prompt → generation call → update session slot.
//!
//! Every step is sequential. The session slot is only written after a
//! successful call; any failure leaves the previous reply in place.

use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, CompletionRequest, GenerationService};
use crate::reply::builder::{
    build_prompt_with, build_rewrite_prompt, AssembledPrompt, PromptInputs, PromptOptions,
};
use crate::reply::language::{Formality, Language};
use crate::reply::tone::Tone;
use crate::sources::document::{extract_text, DocumentFormat};
use crate::sources::job_posting::JobFetcher;

/// Character budget for the user-content preview.
pub const PREVIEW_CHAR_LIMIT: usize = 2000;

const DEFAULT_LANGUAGE_TEMPERATURE: f32 = 0.3;
const OTHER_LANGUAGE_TEMPERATURE: f32 = 0.4;

pub const NO_DOCUMENTS_MESSAGE: &str = "Please upload at least your resume or cover letter.";
pub const NO_JOB_CONTEXT_WARNING: &str =
    "No job description provided so the reply will be generic based only on your resume/cover letter.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// An uploaded file as received at the boundary.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub format: Option<DocumentFormat>,
}

/// Everything one generate/preview request carries.
#[derive(Debug, Clone, Default)]
pub struct ReplyRequest {
    pub resume: Option<UploadedDocument>,
    pub cover_letter: Option<UploadedDocument>,
    pub job_url: String,
    pub job_text: String,
    pub notes: String,
    pub tones: Vec<Tone>,
    pub language: Language,
    pub formality: Option<Formality>,
}

/// The single "last generated reply" slot. Starts empty and is only
/// overwritten by a successful generation or rewrite.
#[derive(Debug, Clone, Default)]
pub struct ReplySession {
    last_reply: String,
    generated_at: Option<DateTime<Utc>>,
}

impl ReplySession {
    pub fn last_reply(&self) -> &str {
        &self.last_reply
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    fn record(&mut self, reply: String, at: DateTime<Utc>) {
        self.last_reply = reply;
        self.generated_at = Some(at);
    }
}

/// Model parameters for generation calls.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    /// Lower temperature for the default language, a little higher otherwise
    /// so non-English output reads less literal.
    pub fn temperature_for(&self, language: Language) -> f32 {
        if language.is_default() {
            DEFAULT_LANGUAGE_TEMPERATURE
        } else {
            OTHER_LANGUAGE_TEMPERATURE
        }
    }
}

/// Collaborators a request needs. `service` is `None` when no API
/// credential was resolved at startup.
#[derive(Clone, Copy)]
pub struct ReplyContext<'a> {
    pub service: Option<&'a dyn GenerationService>,
    pub fetcher: &'a JobFetcher,
    pub settings: &'a GenerationSettings,
    pub options: PromptOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreparedPrompt {
    pub prompt: AssembledPrompt,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptPreview {
    pub system_instructions: String,
    pub user_content: String,
    pub user_content_truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReply {
    pub reply: String,
    pub generated_at: DateTime<Utc>,
    pub temperature: f32,
    pub warnings: Vec<String>,
}

struct SourceTexts {
    resume: String,
    cover_letter: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Builds the prompt for `request` without calling the generation service.
pub async fn prepare_prompt(
    request: &ReplyRequest,
    fetcher: &JobFetcher,
    options: &PromptOptions,
) -> Result<PreparedPrompt, AppError> {
    let sources = extract_sources(request).await?;
    assemble(request, &sources, fetcher, options).await
}

/// Full generation: two-message exchange (system + user). On success the
/// trimmed reply replaces the session slot.
pub async fn generate_reply(
    session: &mut ReplySession,
    ctx: ReplyContext<'_>,
    request: &ReplyRequest,
) -> Result<GeneratedReply, AppError> {
    // Validation comes first so an unusable request never touches the network.
    let sources = extract_sources(request).await?;
    let service = ctx.service.ok_or(AppError::MissingCredential)?;

    let prepared = assemble(request, &sources, ctx.fetcher, &ctx.options).await?;
    let temperature = ctx.settings.temperature_for(request.language);

    let completion = CompletionRequest {
        model: ctx.settings.model.clone(),
        messages: vec![
            ChatMessage::system(prepared.prompt.system_instructions),
            ChatMessage::user(prepared.prompt.user_content),
        ],
        temperature,
        max_tokens: ctx.settings.max_output_tokens,
    };

    info!(
        "Generating reply: language={}, temperature={temperature}",
        request.language.label()
    );
    let reply = call_service(service, &completion).await?;

    let generated_at = Utc::now();
    session.record(reply.clone(), generated_at);
    info!("Reply generated ({} chars)", reply.len());

    Ok(GeneratedReply {
        reply,
        generated_at,
        temperature,
        warnings: prepared.warnings,
    })
}

/// Rewrite mode: restyles the reply already in the session with a single
/// user-role message. Requires a non-empty slot.
pub async fn rewrite_reply(
    session: &mut ReplySession,
    ctx: ReplyContext<'_>,
    language: Language,
) -> Result<GeneratedReply, AppError> {
    if session.last_reply().trim().is_empty() {
        return Err(AppError::Validation(
            "No generated reply to rewrite yet. Generate a reply first.".to_string(),
        ));
    }
    let service = ctx.service.ok_or(AppError::MissingCredential)?;

    let temperature = ctx.settings.temperature_for(language);
    let completion = CompletionRequest {
        model: ctx.settings.model.clone(),
        messages: vec![ChatMessage::user(build_rewrite_prompt(session.last_reply()))],
        temperature,
        max_tokens: ctx.settings.max_output_tokens,
    };

    info!("Rewriting last reply: language={}", language.label());
    let reply = call_service(service, &completion).await?;

    let generated_at = Utc::now();
    session.record(reply.clone(), generated_at);

    Ok(GeneratedReply {
        reply,
        generated_at,
        temperature,
        warnings: Vec::new(),
    })
}

/// Read-only view of the assembled prompt. Only the user content is
/// truncated, at `PREVIEW_CHAR_LIMIT` characters.
pub fn preview(prompt: &AssembledPrompt) -> PromptPreview {
    let truncated = prompt.user_content.chars().count() > PREVIEW_CHAR_LIMIT;
    let user_content = if truncated {
        let mut head: String = prompt.user_content.chars().take(PREVIEW_CHAR_LIMIT).collect();
        head.push_str("...");
        head
    } else {
        prompt.user_content.clone()
    };

    PromptPreview {
        system_instructions: prompt.system_instructions.clone(),
        user_content,
        user_content_truncated: truncated,
    }
}

async fn call_service(
    service: &dyn GenerationService,
    completion: &CompletionRequest,
) -> Result<String, AppError> {
    service.complete(completion).await.map_err(|e| {
        warn!("Generation call failed: {e}");
        AppError::Llm(format!("Error while generating: {e}"))
    })
}

async fn extract_sources(request: &ReplyRequest) -> Result<SourceTexts, AppError> {
    let resume = extract_upload(request.resume.as_ref()).await?;
    let cover_letter = extract_upload(request.cover_letter.as_ref()).await?;

    if resume.trim().is_empty() && cover_letter.trim().is_empty() {
        return Err(AppError::Validation(NO_DOCUMENTS_MESSAGE.to_string()));
    }

    Ok(SourceTexts {
        resume,
        cover_letter,
    })
}

/// PDF and DOCX parsing is CPU-bound; keep it off the async workers.
/// Unreadable documents come back as empty text; only a lost worker task
/// is an error.
async fn extract_upload(upload: Option<&UploadedDocument>) -> Result<String, AppError> {
    let Some(upload) = upload else {
        return Ok(String::new());
    };
    let bytes = upload.bytes.clone();
    let format = upload.format;

    let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .context("document extraction task did not complete")?;
    Ok(text)
}

async fn assemble(
    request: &ReplyRequest,
    sources: &SourceTexts,
    fetcher: &JobFetcher,
    options: &PromptOptions,
) -> Result<PreparedPrompt, AppError> {
    let mut warnings = Vec::new();
    let job_text = resolve_job_text(request, fetcher).await;
    if job_text.trim().is_empty() {
        warnings.push(NO_JOB_CONTEXT_WARNING.to_string());
    }

    let prompt = build_prompt_with(
        &PromptInputs {
            resume_text: &sources.resume,
            cover_letter_text: &sources.cover_letter,
            job_text: &job_text,
            notes: &request.notes,
            tones: &request.tones,
            language: request.language,
            formality: request.formality,
        },
        options,
    );

    Ok(PreparedPrompt { prompt, warnings })
}

/// Pasted text wins; the URL is fetched once, only when nothing was pasted.
async fn resolve_job_text(request: &ReplyRequest, fetcher: &JobFetcher) -> String {
    if !request.job_text.trim().is_empty() {
        return request.job_text.clone();
    }
    let url = request.job_url.trim();
    if url.is_empty() {
        return String::new();
    }
    fetcher.fetch(url).await
}
