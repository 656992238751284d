use std::sync::Arc;

use crate::llm::Completer;
use crate::mail::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub completer: Arc<dyn Completer>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(completer: impl Completer, mailer: impl Mailer) -> Self {
        Self {
            completer: Arc::new(completer),
            mailer: Arc::new(mailer),
        }
    }
}
