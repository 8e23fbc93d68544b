//! Transactional mail handler.
//!
//! ```text
//! POST /sendMail {"to":"…","subject":"…","html":"…"}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::MailMessage;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /sendMail`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMailRequest {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Envelope returned by `POST /sendMail`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMailResponse {
    pub success: bool,
    /// Relay-assigned message identifier.
    pub message_id: String,
    pub message: String,
}

/// Relay a transactional email to an unregistered recipient.
///
/// Registered recipients are refused with a conflict so the pre-signup
/// code path cannot mail existing accounts.
#[utoipa::path(
    post,
    path = "/sendMail",
    request_body = SendMailRequest,
    responses(
        (status = 200, description = "Message accepted by the relay", body = SendMailResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Recipient already registered", body = ErrorBody),
        (status = 500, description = "Relay failure", body = ErrorBody)
    ),
    tags = ["mail"],
    operation_id = "sendMail"
)]
#[post("/sendMail")]
pub async fn send_mail(
    state: web::Data<HttpState>,
    payload: web::Json<SendMailRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let receipt = state
        .mail
        .send(MailMessage {
            to: request.to,
            subject: request.subject,
            html: request.html,
        })
        .await?;
    Ok(HttpResponse::Ok().json(SendMailResponse {
        success: true,
        message_id: receipt.message_id,
        message: "Email sent successfully".into(),
    }))
}
