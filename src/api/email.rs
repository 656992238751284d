use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use crate::compose;
use crate::error::Result;
use crate::models::{Draft, GenerateRequest, SendRequest, SendResponse};
use crate::state::AppState;

/// Email routes
pub fn email_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-email", post(generate_email))
        .route("/send-email", post(send_email))
}

/// POST /generate-email - Draft an email from a free-text prompt
async fn generate_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Draft>> {
    let Json(request) = payload?;

    let draft = compose::generate(state.completer.as_ref(), &request.prompt).await?;

    Ok(Json(draft))
}

/// POST /send-email - Send a draft to comma-separated recipients
async fn send_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>> {
    let Json(request) = payload?;

    let message = compose::send(
        state.mailer.as_ref(),
        &request.recipients,
        &request.subject,
        &request.body,
    )
    .await?;

    Ok(Json(SendResponse { message }))
}
