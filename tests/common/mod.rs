#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use mailwright::api::create_router;
use mailwright::llm::{ChatPrompt, Completer, LlmError};
use mailwright::mail::{MailError, Mailer, OutgoingEmail};
use mailwright::state::AppState;

#[derive(Clone, Default)]
pub struct ScriptedCompleter {
    pub reply: Option<String>,
    pub prompts: Arc<Mutex<Vec<ChatPrompt>>>,
}

#[async_trait]
impl Completer for ScriptedCompleter {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply.clone().ok_or(LlmError::EmptyContent)
    }
}

#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub reject_with: Option<String>,
    pub sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        match &self.reject_with {
            Some(addr) => Err(MailError::InvalidAddress(addr.clone())),
            None => Ok(()),
        }
    }
}

pub fn app(completer: ScriptedCompleter, mailer: RecordingMailer) -> Router {
    create_router(AppState::new(completer, mailer))
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
