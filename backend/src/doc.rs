//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification
//! for the REST API: every inbound HTTP path plus the request and response
//! schemas they reference. Swagger UI serves the document in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    Contact, DashboardCounters, DashboardStats, DocumentEntry, DocumentOwner, ErrorCode,
    OwnedDocuments, PublicAdmin, PublicUser, RecentUser, Referral, Role, SignedDocument,
};
use crate::domain::ports::MailReceipt;
use crate::inbound::http::documents::{AllDocsResponse, UploadResponse, UserDocsResponse};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::mail::{SendMailRequest, SendMailResponse};
use crate::inbound::http::referrals::{ReferralRequest, ReferralResponse};
use crate::inbound::http::users::{
    ExistenceRequest, ExistenceResponse, LoginRequest, LoginResponse, ProvisionAdminRequest,
    ProvisionAdminResponse, SignupRequest, SignupResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registration backend API",
        description = "User registration, document upload, referral tracking, and the admin dashboard read-model."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::new_user,
        crate::inbound::http::users::login,
        crate::inbound::http::users::is_existing_user,
        crate::inbound::http::users::provision_admin,
        crate::inbound::http::users::list_users,
        crate::inbound::http::documents::upload_docs,
        crate::inbound::http::documents::list_user_docs,
        crate::inbound::http::documents::view_doc,
        crate::inbound::http::documents::list_all_docs,
        crate::inbound::http::referrals::submit_referral,
        crate::inbound::http::referrals::list_referrals,
        crate::inbound::http::stats::admin_stats,
        crate::inbound::http::mail::send_mail,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorBody,
        ErrorCode,
        Role,
        PublicUser,
        PublicAdmin,
        SignupRequest,
        SignupResponse,
        LoginRequest,
        LoginResponse,
        ExistenceRequest,
        ExistenceResponse,
        ProvisionAdminRequest,
        ProvisionAdminResponse,
        DocumentEntry,
        SignedDocument,
        DocumentOwner,
        OwnedDocuments,
        UploadResponse,
        UserDocsResponse,
        AllDocsResponse,
        Contact,
        Referral,
        ReferralRequest,
        ReferralResponse,
        DashboardCounters,
        RecentUser,
        DashboardStats,
        MailReceipt,
        SendMailRequest,
        SendMailResponse,
    )),
    tags(
        (name = "accounts", description = "Signup, login, and account queries"),
        (name = "documents", description = "Document upload and retrieval"),
        (name = "referrals", description = "Referral submissions"),
        (name = "admin", description = "Dashboard read-model"),
        (name = "mail", description = "Transactional mail relay"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;
