use super::api::{ClientError, EmailApi};
use crate::models::{Draft, SendRequest};

pub const PROMPT_MISSING: &str = "Please enter a prompt for the email";
pub const RECIPIENTS_MISSING: &str = "Please enter at least one recipient email address";
pub const DRAFT_MISSING: &str = "Please generate an email first";

/// The single message shown to the user. Error and success never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Error(String),
    Success(String),
}

/// Form state for one compose session.
///
/// Generate and send each move `idle -> in progress -> idle` under their own
/// flag. The `begin_*` half validates and marks the action in flight, the
/// `finish_*` half applies the outcome, so a front end can keep both calls
/// outstanding at once.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    recipients: String,
    prompt: String,
    draft: Draft,
    generating: bool,
    sending: bool,
    status: Option<Status>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipients(&self) -> &str {
        &self.recipients
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn set_recipients(&mut self, recipients: impl Into<String>) {
        self.recipients = recipients.into();
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.draft.subject = subject.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Returns the prompt to submit, or `None` when no call should be made.
    pub fn begin_generate(&mut self) -> Option<String> {
        if self.generating {
            return None;
        }
        if self.prompt.trim().is_empty() {
            self.status = Some(Status::Error(PROMPT_MISSING.to_string()));
            return None;
        }

        self.generating = true;
        self.status = None;
        Some(self.prompt.clone())
    }

    pub fn finish_generate(&mut self, result: Result<Draft, ClientError>) {
        self.generating = false;
        match result {
            Ok(draft) => self.draft = draft,
            Err(e) => {
                self.status = Some(Status::Error(format!("Failed to generate email: {}", e)));
            }
        }
    }

    /// Returns the request to submit, or `None` when no call should be made.
    pub fn begin_send(&mut self) -> Option<SendRequest> {
        if self.sending {
            return None;
        }
        if self.recipients.trim().is_empty() {
            self.status = Some(Status::Error(RECIPIENTS_MISSING.to_string()));
            return None;
        }
        if self.draft.subject.is_empty() || self.draft.body.is_empty() {
            self.status = Some(Status::Error(DRAFT_MISSING.to_string()));
            return None;
        }

        self.sending = true;
        self.status = None;
        Some(SendRequest {
            recipients: self.recipients.clone(),
            subject: self.draft.subject.clone(),
            body: self.draft.body.clone(),
        })
    }

    pub fn finish_send(&mut self, result: Result<String, ClientError>) {
        self.sending = false;
        match result {
            Ok(message) => {
                self.recipients.clear();
                self.prompt.clear();
                self.draft = Draft::default();
                self.status = Some(Status::Success(message));
            }
            Err(e) => {
                self.status = Some(Status::Error(format!("Failed to send email: {}", e)));
            }
        }
    }

    pub async fn generate<A>(&mut self, api: &A)
    where
        A: EmailApi + ?Sized,
    {
        if let Some(prompt) = self.begin_generate() {
            let result = api.generate(&prompt).await;
            self.finish_generate(result);
        }
    }

    pub async fn send<A>(&mut self, api: &A)
    where
        A: EmailApi + ?Sized,
    {
        if let Some(request) = self.begin_send() {
            let result = api.send(&request).await;
            self.finish_send(result);
        }
    }
}
