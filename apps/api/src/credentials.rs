//! API credential resolution.
//!
//! Sources are checked in priority order: the secrets store (a directory of
//! one-file-per-secret, e.g. `/run/secrets`), the environment, and finally a
//! local fallback file for development. Blank values are skipped.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;

pub const API_KEY_NAME: &str = "OPENAI_API_KEY";

/// Where to look for the API key. Built from `Config` at startup; tests
/// construct it directly so they never touch the process environment.
#[derive(Debug, Clone)]
pub struct CredentialSources {
    pub secrets_dir: PathBuf,
    pub env_value: Option<String>,
    pub fallback_file: PathBuf,
}

impl CredentialSources {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secrets_dir: config.secrets_dir.clone(),
            env_value: std::env::var(API_KEY_NAME).ok(),
            fallback_file: config.api_key_file.clone(),
        }
    }
}

/// Which source produced the key. Logged at startup, never the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOrigin {
    SecretsStore,
    Environment,
    LocalFile,
}

#[derive(Debug, Clone)]
pub struct ApiCredential {
    pub key: String,
    pub origin: CredentialOrigin,
}

/// Resolves the API key, returning `None` when no source has a usable value.
pub fn resolve_api_key(sources: &CredentialSources) -> Option<ApiCredential> {
    let from_secrets = read_trimmed(&sources.secrets_dir.join(API_KEY_NAME))
        .map(|key| (key, CredentialOrigin::SecretsStore));

    let resolved = from_secrets
        .or_else(|| {
            sources
                .env_value
                .as_deref()
                .and_then(non_blank)
                .map(|key| (key, CredentialOrigin::Environment))
        })
        .or_else(|| {
            read_trimmed(&sources.fallback_file).map(|key| (key, CredentialOrigin::LocalFile))
        });

    match resolved {
        Some((key, origin)) => {
            info!("API credential resolved from {:?}", origin);
            Some(ApiCredential { key, origin })
        }
        None => {
            warn!("{API_KEY_NAME} not found in secrets store, environment, or local file");
            None
        }
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => non_blank(&contents),
        Err(e) => {
            debug!("Credential source {} unavailable: {e}", path.display());
            None
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sources(dir: &TempDir, env_value: Option<&str>) -> CredentialSources {
        CredentialSources {
            secrets_dir: dir.path().join("secrets"),
            env_value: env_value.map(String::from),
            fallback_file: dir.path().join("OPENAI_API_KEY.txt"),
        }
    }

    #[test]
    fn test_secrets_store_wins_over_environment_and_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("secrets")).unwrap();
        fs::write(dir.path().join("secrets").join(API_KEY_NAME), "sk-secret\n").unwrap();
        fs::write(dir.path().join("OPENAI_API_KEY.txt"), "sk-file").unwrap();

        let credential = resolve_api_key(&sources(&dir, Some("sk-env"))).unwrap();
        assert_eq!(credential.key, "sk-secret");
        assert_eq!(credential.origin, CredentialOrigin::SecretsStore);
    }

    #[test]
    fn test_environment_used_when_no_secret() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("OPENAI_API_KEY.txt"), "sk-file").unwrap();

        let credential = resolve_api_key(&sources(&dir, Some("  sk-env  "))).unwrap();
        assert_eq!(credential.key, "sk-env");
        assert_eq!(credential.origin, CredentialOrigin::Environment);
    }

    #[test]
    fn test_blank_environment_falls_through_to_local_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("OPENAI_API_KEY.txt"), "  sk-file\n").unwrap();

        let credential = resolve_api_key(&sources(&dir, Some("   "))).unwrap();
        assert_eq!(credential.key, "sk-file");
        assert_eq!(credential.origin, CredentialOrigin::LocalFile);
    }

    #[test]
    fn test_blank_secret_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("secrets")).unwrap();
        fs::write(dir.path().join("secrets").join(API_KEY_NAME), "\n").unwrap();

        let credential = resolve_api_key(&sources(&dir, Some("sk-env"))).unwrap();
        assert_eq!(credential.origin, CredentialOrigin::Environment);
    }

    #[test]
    fn test_no_source_yields_none() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_api_key(&sources(&dir, None)).is_none());
    }
}
