//! Scripted client for exercising the harness without a model server.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::ChatClient;

/// A client that replays scripted replies in order and records every prompt.
///
/// `Err` entries simulate a failed call (timeout, HTTP error).
pub struct MockClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new(replies: impl IntoIterator<Item = Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call succeeds with the given texts.
    pub fn replying<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self::new(replies.into_iter().map(|r| Ok(r.into())))
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ChatClient for MockClient {
    fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| anyhow::anyhow!("MockClient: reply queue poisoned"))?
            .pop_front();

        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => anyhow::bail!("MockClient: no scripted reply left"),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
