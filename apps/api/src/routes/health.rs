use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether generation is available.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "replyforge",
        "model": state.config.openai_model,
        "generation_enabled": state.generator.is_some()
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::reply::builder::PromptOptions;
    use crate::reply::orchestrator::{GenerationSettings, ReplySession};
    use crate::routes::build_router;
    use crate::sources::job_posting::JobFetcher;
    use crate::state::AppState;

    #[tokio::test]
    async fn test_health_reports_generation_disabled_without_credential() {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            openai_api_url: "http://127.0.0.1:9/unused".to_string(),
            openai_model: "gpt-4o".to_string(),
            max_output_tokens: 600,
            job_fetch_timeout_secs: 1,
            secrets_dir: "/nonexistent".into(),
            api_key_file: "/nonexistent/key.txt".into(),
            reinforce_structure: true,
        };
        let state = AppState {
            config,
            generator: None,
            fetcher: JobFetcher::new(Duration::from_secs(1)).unwrap(),
            settings: GenerationSettings {
                model: "gpt-4o".to_string(),
                max_output_tokens: 600,
            },
            prompt_options: PromptOptions::default(),
            session: Arc::new(Mutex::new(ReplySession::default())),
        };

        let response = build_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "replyforge");
        assert_eq!(body["generation_enabled"], false);
    }
}
