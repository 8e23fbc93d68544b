//! Account API handlers: signup, login, existence check, admin
//! provisioning, and the user listing.
//!
//! ```text
//! POST /newUser {"name":"…","email":"…","phone":"…","state":"…","password":"…"}
//! POST /login {"email":"…","password":"…"}
//! POST /users/isExist {"email":"…"}
//! POST /adminData {"name":"…","email":"…","phone":"…","password":"…"}
//! GET /data
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedAccount, NewAdmin, NewUser, PublicAdmin, PublicUser, Role,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /newUser`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub password: String,
}

impl From<SignupRequest> for NewUser {
    fn from(value: SignupRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            state: value.state,
            password: value.password,
        }
    }
}

/// Envelope returned by `POST /newUser`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
}

/// Register a new user account.
#[utoipa::path(
    post,
    path = "/newUser",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = SignupResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "newUser"
)]
#[post("/newUser")]
pub async fn new_user(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.registration.register(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(SignupResponse {
        success: true,
        message: "User registered successfully".into(),
        user,
    }))
}

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Envelope returned by `POST /login`. `user` is the matched account's
/// public projection; `role` tells the client which dashboard to open.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: serde_json::Value,
    pub role: Role,
}

/// Authenticate an email/password pair.
///
/// The user store is consulted first, then the admin store. No session or
/// token is issued; the client acts on the returned role.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 401, description = "Invalid password", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let account = state
        .registration
        .authenticate(&payload.email, &payload.password)
        .await?;
    let role = account.role();
    let user = match account {
        AuthenticatedAccount::User(user) => serde_json::to_value(user),
        AuthenticatedAccount::Admin(admin) => serde_json::to_value(admin),
    }
    .map_err(|err| crate::domain::Error::internal(err.to_string()))?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user,
        role,
    }))
}

/// Request body for `POST /users/isExist`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExistenceRequest {
    pub email: String,
}

/// Envelope returned by `POST /users/isExist` on a hit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExistenceResponse {
    pub success: bool,
    pub user: PublicUser,
}

/// Check whether an email belongs to a registered user.
#[utoipa::path(
    post,
    path = "/users/isExist",
    request_body = ExistenceRequest,
    responses(
        (status = 200, description = "User exists", body = ExistenceResponse),
        (status = 400, description = "Missing email", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "isExistingUser"
)]
#[post("/users/isExist")]
pub async fn is_existing_user(
    state: web::Data<HttpState>,
    payload: web::Json<ExistenceRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.registration.check_existence(&payload.email).await?;
    Ok(HttpResponse::Ok().json(ExistenceResponse {
        success: true,
        user,
    }))
}

/// Admin provisioning request body for `POST /adminData`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionAdminRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl From<ProvisionAdminRequest> for NewAdmin {
    fn from(value: ProvisionAdminRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            password: value.password,
        }
    }
}

/// Envelope returned by `POST /adminData`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProvisionAdminResponse {
    pub success: bool,
    pub message: String,
    pub admin: PublicAdmin,
}

/// Provision a dashboard admin account.
#[utoipa::path(
    post,
    path = "/adminData",
    request_body = ProvisionAdminRequest,
    responses(
        (status = 201, description = "Admin provisioned", body = ProvisionAdminResponse),
        (status = 400, description = "Missing field", body = ErrorBody),
        (status = 409, description = "Email already provisioned", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "provisionAdmin"
)]
#[post("/adminData")]
pub async fn provision_admin(
    state: web::Data<HttpState>,
    payload: web::Json<ProvisionAdminRequest>,
) -> ApiResult<HttpResponse> {
    let admin = state
        .registration
        .provision_admin(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ProvisionAdminResponse {
        success: true,
        message: "Admin registered successfully".into(),
        admin,
    }))
}

/// List every registered user, hashes stripped.
#[utoipa::path(
    get,
    path = "/data",
    responses(
        (status = 200, description = "All users", body = [PublicUser]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["accounts"],
    operation_id = "listUsers"
)]
#[get("/data")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PublicUser>>> {
    Ok(web::Json(state.registration.list_users().await?))
}
