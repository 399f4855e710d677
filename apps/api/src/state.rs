use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::llm_client::GenerationService;
use crate::reply::builder::PromptOptions;
use crate::reply::orchestrator::{GenerationSettings, ReplyContext, ReplySession};
use crate::sources::job_posting::JobFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no API credential was found; generation is refused.
    pub generator: Option<Arc<dyn GenerationService>>,
    pub fetcher: JobFetcher,
    pub settings: GenerationSettings,
    pub prompt_options: PromptOptions,
    /// The single "last generated reply" slot. Held for the whole
    /// generate/rewrite flow, so requests are served one at a time.
    pub session: Arc<Mutex<ReplySession>>,
}

impl AppState {
    pub fn reply_context(&self) -> ReplyContext<'_> {
        ReplyContext {
            service: self.generator.as_deref(),
            fetcher: &self.fetcher,
            settings: &self.settings,
            options: self.prompt_options,
        }
    }
}
