//! Language model completion provider.

pub mod groq;

use async_trait::async_trait;

pub use groq::GroqClient;

/// Fixed instruction sent ahead of every drafting request.
pub const EMAIL_WRITER_SYSTEM: &str = r#"You are a professional email writer. Generate a well-structured email with a clear subject line and professional body content. Format your response as JSON with "subject" and "body" fields."#;

/// A single system + user exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

impl ChatPrompt {
    /// Prompt asking the model to draft an email described by `description`.
    pub fn email_draft(description: &str) -> Self {
        Self {
            system: EMAIL_WRITER_SYSTEM.to_string(),
            user: format!("Write an email based on this prompt: {}", description),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request to completion provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("completion provider returned no content")]
    EmptyContent,
}

/// Anything that can turn a prompt into raw model text.
#[async_trait]
pub trait Completer: Send + Sync + 'static {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError>;
}
