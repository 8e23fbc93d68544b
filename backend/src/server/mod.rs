//! Server construction and middleware wiring.

pub mod config;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::ports::{DocumentStore, IdentityStore, LiveFeed, Mailer, ObjectStorage, ReferralStore};
use crate::domain::{
    DocumentService, Error, MailService, ReferralService, RegistrationService, StatsService,
};
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{documents, mail, referrals, stats, users};
use crate::inbound::ws;
use crate::inbound::ws::state::WsState;
use crate::middleware::Trace;
use crate::outbound::persistence::{MongoDocumentStore, MongoIdentityStore, MongoReferralStore};
use crate::outbound::{BroadcastFeed, S3Storage, SmtpMailer};
use crate::server::config::AppConfig;

/// Outbound adapter bundle handed to service construction.
///
/// Production wiring connects real backends; tests build one from the
/// in-memory fakes instead.
pub struct AppContext {
    pub identity: Arc<dyn IdentityStore>,
    pub documents: Arc<dyn DocumentStore>,
    pub referrals: Arc<dyn ReferralStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppContext {
    /// Connect every production backend and create the unique indexes.
    ///
    /// # Errors
    /// Store connection, index creation, or gateway setup failed.
    pub async fn connect(config: &AppConfig) -> Result<Self, Error> {
        let db = crate::outbound::persistence::connect(&config.mongo).await?;

        let identity = MongoIdentityStore::new(&db);
        identity.ensure_indexes().await?;
        let documents = MongoDocumentStore::new(&db);
        documents.ensure_indexes().await?;
        let referrals = MongoReferralStore::new(&db);

        Ok(Self {
            identity: Arc::new(identity),
            documents: Arc::new(documents),
            referrals: Arc::new(referrals),
            storage: Arc::new(S3Storage::new(&config.storage)?),
            mailer: Arc::new(SmtpMailer::new(&config.mail)?),
        })
    }
}

/// Wire the domain services over an adapter bundle.
pub fn build_http_state(
    context: &AppContext,
    feed: Arc<dyn LiveFeed>,
    presign_ttl: std::time::Duration,
) -> HttpState {
    HttpState {
        registration: Arc::new(RegistrationService::new(
            context.identity.clone(),
            feed,
        )),
        documents: Arc::new(DocumentService::with_presign_ttl(
            context.documents.clone(),
            context.identity.clone(),
            context.storage.clone(),
            presign_ttl,
        )),
        referrals: Arc::new(ReferralService::new(
            context.referrals.clone(),
            context.identity.clone(),
        )),
        stats: Arc::new(StatsService::new(context.identity.clone())),
        mail: Arc::new(MailService::new(
            context.mailer.clone(),
            context.identity.clone(),
        )),
    }
}

/// Assemble the application with every route, state, and middleware.
///
/// CORS is wide open: the API is consumed from browser frontends on other
/// origins and carries no cookies.
pub fn build_app(
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
    health_state: web::Data<HealthState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .wrap(Cors::permissive())
        .wrap(Trace)
        .app_data(http_state)
        .app_data(ws_state)
        .app_data(health_state)
        .service(users::new_user)
        .service(users::login)
        .service(users::is_existing_user)
        .service(users::provision_admin)
        .service(users::list_users)
        .service(documents::upload_docs)
        .service(documents::list_user_docs)
        .service(documents::view_doc)
        .service(documents::list_all_docs)
        .service(referrals::submit_referral)
        .service(referrals::list_referrals)
        .service(stats::admin_stats)
        .service(mail::send_mail)
        .service(ws::ws_entry)
        .service(live)
        .service(ready);
    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    app
}

/// Create the HTTP server, returning it with the shared health state so the
/// caller can mark readiness once bound.
///
/// # Errors
/// Binding the listener failed.
pub fn create_server(
    config: &AppConfig,
    context: &AppContext,
) -> std::io::Result<(Server, web::Data<HealthState>)> {
    let ws_state = web::Data::new(WsState::new());
    let feed: Arc<dyn LiveFeed> = Arc::new(BroadcastFeed::new(ws_state.sender()));
    let http_state = web::Data::new(build_http_state(context, feed, config.presign_ttl));
    let health_state = web::Data::new(HealthState::new());

    let server_http_state = http_state.clone();
    let server_ws_state = ws_state.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            server_http_state.clone(),
            server_ws_state.clone(),
            server_health_state.clone(),
        )
    })
    .bind(("0.0.0.0", config.port))?
    .run();

    Ok((server, health_state))
}
