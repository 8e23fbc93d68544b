//! Referral API handlers.
//!
//! ```text
//! POST /referralData {"user":{…},"referrals":[{…}]}
//! GET /users/referralData
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Contact, Referral};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request body for `POST /referralData`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralRequest {
    /// Referring contact; need not be a registered user.
    pub user: Contact,
    /// Referred contacts; at least one required.
    pub referrals: Vec<Contact>,
}

/// Envelope returned by `POST /referralData`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReferralResponse {
    pub success: bool,
    pub message: String,
    pub referral: Referral,
}

/// Record a referral submission.
///
/// The stored record carries a frozen flag telling whether the referrer
/// was a registered user at submission time.
#[utoipa::path(
    post,
    path = "/referralData",
    request_body = ReferralRequest,
    responses(
        (status = 200, description = "Referral recorded", body = ReferralResponse),
        (status = 400, description = "Incomplete contact or empty list", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["referrals"],
    operation_id = "submitReferral"
)]
#[post("/referralData")]
pub async fn submit_referral(
    state: web::Data<HttpState>,
    payload: web::Json<ReferralRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let referral = state
        .referrals
        .submit(request.user, request.referrals)
        .await?;
    Ok(HttpResponse::Ok().json(ReferralResponse {
        success: true,
        message: "Referral data saved successfully".into(),
        referral,
    }))
}

/// List every referral record.
#[utoipa::path(
    get,
    path = "/users/referralData",
    responses(
        (status = 200, description = "All referral records", body = [Referral]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["referrals"],
    operation_id = "listReferrals"
)]
#[get("/users/referralData")]
pub async fn list_referrals(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Referral>>> {
    Ok(web::Json(state.referrals.list_all().await?))
}
