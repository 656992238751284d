//! Draft generation and dispatch.
//!
//! The pure helpers (`interpret`, `normalize`, `parse_recipients`,
//! `render_html`) carry all of the data handling; `generate` and `send` wrap
//! exactly one provider call each and collapse provider failures into the
//! generic [`AppError`] variants after logging them.

use crate::error::{AppError, Result};
use crate::llm::{ChatPrompt, Completer};
use crate::mail::{Mailer, OutgoingEmail};
use crate::models::Draft;

pub const FALLBACK_SUBJECT: &str = "Generated Email";
pub const SENT_MESSAGE: &str = "Email sent successfully!";

const PROMPT_REQUIRED: &str = "Prompt is required";
const SEND_FIELDS_REQUIRED: &str = "Recipients, subject, and body are required";

/// Interpretation of raw model text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOutput {
    Structured(Draft),
    RawText(String),
}

/// Classify provider text as a structured draft or free prose.
///
/// Accepts bare JSON or JSON wrapped in a Markdown code fence. Anything that
/// is not an object with string `subject` and `body` fields is prose.
pub fn interpret(raw: &str) -> ModelOutput {
    let candidate = strip_code_fence(raw.trim());

    match serde_json::from_str::<Draft>(candidate) {
        Ok(draft) => ModelOutput::Structured(draft),
        Err(_) => ModelOutput::RawText(raw.to_string()),
    }
}

/// Map either interpretation to a usable draft. Never fails.
pub fn normalize(output: ModelOutput) -> Draft {
    match output {
        ModelOutput::Structured(draft) => draft,
        ModelOutput::RawText(text) => {
            let subject = text
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or(FALLBACK_SUBJECT)
                .to_string();

            Draft {
                subject,
                body: text,
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };

    // Drop the info string ("json") on the opening fence line.
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim(),
    }
}

/// Split a comma-separated recipient string into trimmed addresses.
///
/// Order is preserved and empty segments are dropped. Address syntax is not
/// checked here.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render a plain-text body as HTML: markup characters are escaped, then
/// newlines become `<br>`.
pub fn render_html(body: &str) -> String {
    let mut html = String::with_capacity(body.len() + body.len() / 8);
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\'' => html.push_str("&#39;"),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => html.push_str("<br>"),
            other => html.push(other),
        }
    }

    html
}

/// Ask the model for a draft matching `prompt`.
pub async fn generate(completer: &dyn Completer, prompt: &str) -> Result<Draft> {
    if prompt.trim().is_empty() {
        return Err(AppError::Validation(PROMPT_REQUIRED.to_string()));
    }

    let raw = completer
        .complete(&ChatPrompt::email_draft(prompt))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error generating email");
            AppError::GenerationFailed
        })?;

    let output = interpret(&raw);
    if let ModelOutput::RawText(_) = output {
        tracing::debug!("Model output was not structured, using fallback parsing");
    }

    let draft = normalize(output);
    tracing::info!(subject_len = draft.subject.len(), "Email generated");

    Ok(draft)
}

/// Deliver `subject`/`body` to every address in `recipients`.
pub async fn send(
    mailer: &dyn Mailer,
    recipients: &str,
    subject: &str,
    body: &str,
) -> Result<String> {
    if subject.trim().is_empty() || body.trim().is_empty() {
        return Err(AppError::Validation(SEND_FIELDS_REQUIRED.to_string()));
    }

    let to = parse_recipients(recipients);
    if to.is_empty() {
        return Err(AppError::Validation(SEND_FIELDS_REQUIRED.to_string()));
    }

    let email = OutgoingEmail {
        to,
        subject: subject.to_string(),
        text: body.to_string(),
        html: render_html(body),
    };

    mailer.send(&email).await.map_err(|e| {
        tracing::error!(error = %e, recipients = email.to.len(), "Error sending email");
        AppError::SendFailed
    })?;

    tracing::info!(recipients = email.to.len(), "Email sent");

    Ok(SENT_MESSAGE.to_string())
}
