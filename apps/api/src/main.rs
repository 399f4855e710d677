mod config;
mod credentials;
mod errors;
mod llm_client;
mod reply;
mod routes;
mod sources;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::credentials::{resolve_api_key, CredentialSources};
use crate::llm_client::{GenerationService, OpenAiClient};
use crate::reply::builder::PromptOptions;
use crate::reply::orchestrator::{GenerationSettings, ReplySession};
use crate::routes::build_router;
use crate::sources::job_posting::JobFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ReplyForge API v{}", env!("CARGO_PKG_VERSION"));

    // Resolve the generation credential. Without one the service still
    // serves previews, but generate/rewrite are refused.
    let generator: Option<Arc<dyn GenerationService>> =
        match resolve_api_key(&CredentialSources::from_config(&config)) {
            Some(credential) => {
                let client = OpenAiClient::new(config.openai_api_url.clone(), credential.key)?;
                info!(
                    "LLM client initialized (model: {}, key source: {:?})",
                    config.openai_model, credential.origin
                );
                Some(Arc::new(client))
            }
            None => {
                warn!("Generation disabled: no API credential configured");
                None
            }
        };

    let fetcher = JobFetcher::new(Duration::from_secs(config.job_fetch_timeout_secs))?;

    let state = AppState {
        generator,
        fetcher,
        settings: GenerationSettings {
            model: config.openai_model.clone(),
            max_output_tokens: config.max_output_tokens,
        },
        prompt_options: PromptOptions {
            reinforce_structure: config.reinforce_structure,
        },
        session: Arc::new(Mutex::new(ReplySession::default())),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
