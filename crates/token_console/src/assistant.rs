//! AI assistant boundary.
//!
//! The console only sees a [`TextCompletion`] capability. An
//! [`AssistantSession`] is created explicitly when the chat or audit feature
//! is opened and consumed by [`AssistantSession::end`] when it closes; there
//! is no process-wide session.
//!
//! Failures never propagate: a missing credential, an unavailable service or
//! an empty answer all degrade to [`APOLOGY`].

use serde::{Deserialize, Serialize};

/// Shown whenever a completion cannot be produced.
pub const APOLOGY: &str =
    "Sorry, the assistant is unavailable right now. Please try again in a moment.";

/// Environment variable read by [`AssistantConfig::from_env`].
pub const API_KEY_ENV: &str = "TOKEN_CONSOLE_API_KEY";

const DEFAULT_SYSTEM_PROMPT: &str = "You are the assistant of a multi-chain token console. \
Answer questions about creating, minting, burning, locking and bridging tokens on BNB, Solana and TON. \
Be concise.";

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("completion service unavailable: {0}")]
    Unavailable(String),
    #[error("completion service returned an empty answer")]
    EmptyResponse,
}

pub trait TextCompletion {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "default".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl AssistantConfig {
    /// Defaults with the API key taken from [`API_KEY_ENV`], if set and
    /// non-empty.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

pub struct AssistantSession<C: TextCompletion> {
    client: C,
    config: AssistantConfig,
    transcript: Vec<Turn>,
}

impl<C: TextCompletion> AssistantSession<C> {
    pub fn new(client: C, config: AssistantConfig) -> Self {
        tracing::debug!(model = %config.model, "assistant session opened");
        Self {
            client,
            config,
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Chat turn. The question and answer are both kept in the transcript,
    /// and earlier turns are replayed as context.
    pub fn ask(&mut self, message: &str) -> String {
        let prompt = self.chat_prompt(message);
        let answer = self.complete_or_apologise(&prompt);
        self.transcript.push(Turn {
            speaker: Speaker::User,
            text: message.to_string(),
        });
        self.transcript.push(Turn {
            speaker: Speaker::Assistant,
            text: answer.clone(),
        });
        answer
    }

    /// One-shot security review of submitted contract source. Not added to
    /// the chat transcript.
    pub fn audit_contract(&mut self, address: &str, source: &str) -> String {
        let prompt = format!(
            "{}\n\nAudit the smart contract deployed at {address}. \
             List vulnerabilities, centralisation risks and an overall verdict.\n\n```\n{source}\n```",
            self.config.system_prompt
        );
        self.complete_or_apologise(&prompt)
    }

    /// Explain a failed console operation in plain words.
    pub fn explain_failure(&mut self, operation: &str, reason: &str) -> String {
        let prompt = format!(
            "{}\n\nThe operation \"{operation}\" failed with: {reason}. \
             Explain the likely cause and how to fix it in two sentences.",
            self.config.system_prompt
        );
        self.complete_or_apologise(&prompt)
    }

    /// Close the session, returning its transcript.
    pub fn end(self) -> Vec<Turn> {
        tracing::debug!(turns = self.transcript.len(), "assistant session closed");
        self.transcript
    }

    fn chat_prompt(&self, message: &str) -> String {
        let mut prompt = self.config.system_prompt.clone();
        prompt.push_str("\n\n");
        for turn in &self.transcript {
            let who = match turn.speaker {
                Speaker::User => "User",
                Speaker::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{who}: {}\n", turn.text));
        }
        prompt.push_str(&format!("User: {message}\nAssistant:"));
        prompt
    }

    fn complete_or_apologise(&self, prompt: &str) -> String {
        match self.try_complete(prompt) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "assistant degraded");
                APOLOGY.to_string()
            }
        }
    }

    fn try_complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if !self.config.has_credential() {
            return Err(CompletionError::MissingCredential);
        }
        let text = self.client.complete(prompt)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}
