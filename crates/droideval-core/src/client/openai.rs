//! OpenAI-compatible chat completions (`POST {base}/chat/completions`).
//!
//! Works against api.openai.com and any server speaking the same protocol
//! (vLLM, llama-server, LM Studio).

use serde_json::Value;

use super::{ApiKey, ChatClient, ClientConfig};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    agent: ureq::Agent,
    url: String,
    api_key: ApiKey,
    model: String,
    temperature: f32,
    seed: u64,
}

impl OpenAiClient {
    pub fn new(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let api_key = cfg.api_key.clone().ok_or_else(|| {
            anyhow::anyhow!("OPENAI_API_KEY environment variable not set, required for the openai backend")
        })?;
        let base = cfg
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{base}/chat/completions");

        log::info!(
            "OpenAiClient: endpoint {url}, model={}, timeout={}s",
            cfg.model,
            cfg.timeout.as_secs()
        );

        Ok(Self {
            agent: super::http_agent(cfg.timeout),
            url,
            api_key,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            seed: cfg.seed,
        })
    }

    fn request_body(&self, prompt: &str) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt},
            ],
            "temperature": self.temperature,
            "seed": self.seed,
        })
    }
}

impl ChatClient for OpenAiClient {
    fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        log::debug!("OpenAI request: {} prompt chars", prompt.len());

        let resp: Value = self
            .agent
            .post(&self.url)
            .set("Authorization", &format!("Bearer {}", self.api_key.as_str()))
            .set("Content-Type", "application/json")
            .send_json(self.request_body(prompt))
            .map_err(|e| super::request_error("OpenAI", e))?
            .into_json()
            .map_err(|e| anyhow::anyhow!("Failed to parse OpenAI response: {e}"))?;

        extract_content(&resp)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// `choices[0].message.content` of a chat completion.
fn extract_content(resp: &Value) -> anyhow::Result<String> {
    if let Some(msg) = super::error_message(resp) {
        anyhow::bail!("OpenAI API error: {msg}");
    }

    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("OpenAI response has no choices[0].message.content"))
}
