//! Model client: pluggable trait + factory.
//!
//! A client turns one prompt into one completion. No retries and no
//! caching: each call is a single request bounded by the configured timeout.

pub mod mock;
pub mod ollama;
pub mod openai;
#[cfg(test)]
mod test_server;

use std::time::Duration;

use crate::config::ModelConfig;

pub use mock::MockClient;

/// Trait for chat-completion backends.
pub trait ChatClient: Send + Sync {
    /// Send `prompt` as a single user turn and return the reply text verbatim.
    fn complete(&self, prompt: &str) -> anyhow::Result<String>;
    fn name(&self) -> &str;
}

/// A newtype wrapping an API key string that masks its value in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Everything a backend needs, resolved at the entry point.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend: String,
    pub model: String,
    /// `None` selects the backend's default endpoint.
    pub base_url: Option<String>,
    pub api_key: Option<ApiKey>,
    pub temperature: f32,
    pub seed: u64,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Combine the file/CLI model section with credentials from the caller.
    ///
    /// An explicit `base_url` from the caller wins over the config file.
    pub fn from_model_config(
        cfg: &ModelConfig,
        api_key: Option<ApiKey>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            backend: cfg.backend.clone(),
            model: cfg.model.clone(),
            base_url: base_url.or_else(|| cfg.base_url.clone()),
            api_key,
            temperature: cfg.temperature,
            seed: cfg.seed,
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

/// Create a client backend based on config.
pub fn create_client(cfg: &ClientConfig) -> anyhow::Result<Box<dyn ChatClient>> {
    match cfg.backend.as_str() {
        "openai" => Ok(Box::new(openai::OpenAiClient::new(cfg)?)),
        "ollama" => Ok(Box::new(ollama::OllamaClient::new(cfg))),
        other => anyhow::bail!("Unknown model backend: {other} (expected openai or ollama)"),
    }
}

/// Blocking HTTP agent with the per-request timeout applied.
fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

/// Turn a ureq failure into an error that keeps the server's explanation.
fn request_error(backend: &str, err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, resp) => {
            let body = resp.into_string().unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| error_message(&v))
                .unwrap_or(body);
            anyhow::anyhow!("{backend} API returned HTTP {code}: {detail}")
        }
        other => anyhow::anyhow!("{backend} request failed: {other}"),
    }
}

/// `{"error": {"message": ..}}` (OpenAI) or `{"error": ".."}` (Ollama).
fn error_message(body: &serde_json::Value) -> Option<String> {
    let err = body.get("error")?;
    err["message"]
        .as_str()
        .or_else(|| err.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_config(backend: &str) -> ClientConfig {
        ClientConfig {
            backend: backend.into(),
            model: "m".into(),
            base_url: None,
            api_key: Some("sk-test".into()),
            temperature: 0.0,
            seed: 0,
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn api_key_masks_in_debug() {
        let key = ApiKey::new("sk-secret123");
        assert!(!format!("{key:?}").contains("secret"));
        assert!(format!("{key:?}").contains("***"));
        assert_eq!(key.as_str(), "sk-secret123");
    }

    #[test]
    fn client_config_debug_hides_key() {
        let cfg = client_config("openai");
        assert!(!format!("{cfg:?}").contains("sk-test"));
    }

    #[test]
    fn from_model_config_prefers_explicit_base_url() {
        let mut model = ModelConfig::default();
        model.base_url = Some("http://from-file/v1".into());
        model.timeout_secs = 5;

        let cfg = ClientConfig::from_model_config(&model, None, Some("http://from-env/v1".into()));
        assert_eq!(cfg.base_url.as_deref(), Some("http://from-env/v1"));
        assert_eq!(cfg.timeout, Duration::from_secs(5));

        let cfg = ClientConfig::from_model_config(&model, None, None);
        assert_eq!(cfg.base_url.as_deref(), Some("http://from-file/v1"));
    }

    #[test]
    fn factory_selects_backend() {
        assert_eq!(create_client(&client_config("openai")).unwrap().name(), "openai");
        assert_eq!(create_client(&client_config("ollama")).unwrap().name(), "ollama");
    }

    #[test]
    fn factory_rejects_unknown_backend() {
        let err = create_client(&client_config("carrier-pigeon")).err().unwrap();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn error_message_handles_both_shapes() {
        let openai = serde_json::json!({"error": {"message": "bad key", "type": "auth"}});
        let ollama = serde_json::json!({"error": "model not found"});
        assert_eq!(error_message(&openai).as_deref(), Some("bad key"));
        assert_eq!(error_message(&ollama).as_deref(), Some("model not found"));
        assert_eq!(error_message(&serde_json::json!({"ok": true})), None);
    }
}
