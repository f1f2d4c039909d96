//! Ollama native chat endpoint (`POST {base}/api/chat`), for local models.

use serde_json::Value;

use super::{ChatClient, ClientConfig};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

pub struct OllamaClient {
    agent: ureq::Agent,
    url: String,
    model: String,
    temperature: f32,
    seed: u64,
}

impl OllamaClient {
    pub fn new(cfg: &ClientConfig) -> Self {
        let base = cfg
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');
        let url = format!("{base}/api/chat");
        log::info!("OllamaClient: endpoint {url}, model={}", cfg.model);

        Self {
            agent: super::http_agent(cfg.timeout),
            url,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            seed: cfg.seed,
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt},
            ],
            "stream": false,
            "options": {
                "temperature": self.temperature,
                "seed": self.seed,
            },
        })
    }
}

impl ChatClient for OllamaClient {
    fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let resp: Value = self
            .agent
            .post(&self.url)
            .send_json(self.request_body(prompt))
            .map_err(|e| super::request_error("Ollama", e))?
            .into_json()
            .map_err(|e| anyhow::anyhow!("Failed to parse Ollama response: {e}"))?;

        if let Some(msg) = super::error_message(&resp) {
            anyhow::bail!("Ollama error: {msg}");
        }

        resp["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Ollama response has no message.content"))
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_server::StubServer;
    use std::time::Duration;

    fn config(base_url: Option<String>) -> ClientConfig {
        ClientConfig {
            backend: "ollama".into(),
            model: "qwen2.5:7b".into(),
            base_url,
            api_key: None,
            temperature: 0.0,
            seed: 7,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn request_body_disables_streaming() {
        let client = OllamaClient::new(&config(None));
        assert_eq!(client.url, "http://127.0.0.1:11434/api/chat");

        let body = client.request_body("hi");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["seed"], 7);
        assert_eq!(body["messages"][0]["content"], "hi");
    }

    #[test]
    fn complete_returns_message_content() {
        let server = StubServer::respond(
            "200 OK",
            r#"{"model":"qwen2.5:7b","message":{"role":"assistant","content":"4"},"done":true}"#,
        );
        let client = OllamaClient::new(&config(Some(server.base_url.clone())));

        assert_eq!(client.complete("which id?").unwrap(), "4");
        let request = server.request();
        assert!(request.starts_with("POST /api/chat "));
        assert!(request.contains(r#""stream":false"#));
    }

    #[test]
    fn complete_surfaces_plain_error_body() {
        let server = StubServer::respond("404 Not Found", r#"{"error":"model 'qwen9' not found"}"#);
        let client = OllamaClient::new(&config(Some(server.base_url.clone())));

        let err = client.complete("x").unwrap_err();
        assert_eq!(err.to_string(), "Ollama API returned HTTP 404: model 'qwen9' not found");
    }
}
