//! Identity and credential orchestration: signup, login, existence checks,
//! and admin provisioning.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::admin::{Admin, PublicAdmin};
use crate::domain::error::Error;
use crate::domain::events::SignupEvent;
use crate::domain::password::{self, HASH_COST};
use crate::domain::ports::{IdentityStore, LiveFeed};
use crate::domain::user::{PublicUser, Role, Uid, User};
use crate::domain::validate::require_present;

/// Signup request accepted by [`RegistrationService::register`].
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Email address; must be unique.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// State or region.
    pub state: String,
    /// Plaintext password; hashed before persistence.
    pub password: String,
}

/// Admin provisioning request accepted by [`RegistrationService::provision_admin`].
#[derive(Debug, Clone)]
pub struct NewAdmin {
    /// Full name.
    pub name: String,
    /// Email address; must be unique.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Plaintext password; hashed before persistence.
    pub password: String,
}

/// Account resolved by [`RegistrationService::authenticate`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthenticatedAccount {
    /// Matched in the user store.
    User(PublicUser),
    /// Matched in the admin store after the user store missed.
    Admin(PublicAdmin),
}

impl AuthenticatedAccount {
    /// Role resolved during authentication.
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Admin(_) => Role::Admin,
        }
    }
}

/// Domain service backing signup, login, and admin provisioning.
///
/// The pre-insert existence check is advisory only: the store's unique
/// index arbitrates concurrent registrations, and a duplicate-key failure
/// surfaces as a conflict even when the pre-check passed.
pub struct RegistrationService {
    identity: Arc<dyn IdentityStore>,
    feed: Arc<dyn LiveFeed>,
    hash_cost: u32,
}

impl RegistrationService {
    /// Construct with production hashing cost.
    pub fn new(identity: Arc<dyn IdentityStore>, feed: Arc<dyn LiveFeed>) -> Self {
        Self::with_hash_cost(identity, feed, HASH_COST)
    }

    /// Construct with an explicit bcrypt cost. Tests use the minimum cost.
    pub fn with_hash_cost(
        identity: Arc<dyn IdentityStore>,
        feed: Arc<dyn LiveFeed>,
        hash_cost: u32,
    ) -> Self {
        Self {
            identity,
            feed,
            hash_cost,
        }
    }

    /// Register a new user account and announce it on the live feed.
    ///
    /// # Errors
    /// - invalid request when any field is blank
    /// - conflict when the email is already registered
    pub async fn register(&self, request: NewUser) -> Result<PublicUser, Error> {
        require_present("name", &request.name)?;
        require_present("email", &request.email)?;
        require_present("phone", &request.phone)?;
        require_present("state", &request.state)?;
        require_present("password", &request.password)?;

        if self
            .identity
            .find_user_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(Error::conflict("User already exists"));
        }

        let password_hash = password::hash_password(request.password, self.hash_cost).await?;
        let user = User {
            uid: Uid::issue(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            state: request.state,
            password_hash,
            role: Role::User,
            created_at: Utc::now(),
        };

        self.identity.insert_user(&user).await?;
        info!(uid = %user.uid, "user registered");
        self.feed.publish(SignupEvent::from(&user));
        Ok(PublicUser::from(user))
    }

    /// Authenticate an email/password pair against the user store, falling
    /// back to the admin store.
    ///
    /// # Errors
    /// - invalid request when either field is blank
    /// - not found when the email is absent from both stores
    /// - unauthorized when the password does not verify
    pub async fn authenticate(
        &self,
        email: &str,
        plaintext: &str,
    ) -> Result<AuthenticatedAccount, Error> {
        require_present("email", email)?;
        require_present("password", plaintext)?;

        if let Some(user) = self.identity.find_user_by_email(email).await? {
            return if password::verify_password(plaintext.to_owned(), user.password_hash.clone())
                .await?
            {
                Ok(AuthenticatedAccount::User(PublicUser::from(user)))
            } else {
                Err(Error::unauthorized("Invalid password"))
            };
        }

        if let Some(admin) = self.identity.find_admin_by_email(email).await? {
            return if password::verify_password(plaintext.to_owned(), admin.password_hash.clone())
                .await?
            {
                Ok(AuthenticatedAccount::Admin(PublicAdmin::from(admin)))
            } else {
                Err(Error::unauthorized("Invalid password"))
            };
        }

        Err(Error::not_found("User not found"))
    }

    /// Return the registered user for an email, or not-found.
    pub async fn check_existence(&self, email: &str) -> Result<PublicUser, Error> {
        require_present("email", email)?;
        self.identity
            .find_user_by_email(email)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| Error::not_found("User not found"))
    }

    /// Provision an admin account.
    ///
    /// # Errors
    /// - invalid request when any field is blank
    /// - conflict when the email is already provisioned
    pub async fn provision_admin(&self, request: NewAdmin) -> Result<PublicAdmin, Error> {
        require_present("name", &request.name)?;
        require_present("email", &request.email)?;
        require_present("phone", &request.phone)?;
        require_present("password", &request.password)?;

        if self
            .identity
            .find_admin_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(Error::conflict("Admin already exists"));
        }

        let password_hash = password::hash_password(request.password, self.hash_cost).await?;
        let admin = Admin {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash,
            role: Role::Admin,
            created_at: Utc::now(),
        };

        self.identity.insert_admin(&admin).await?;
        info!(email = %admin.email, "admin provisioned");
        Ok(PublicAdmin::from(admin))
    }

    /// Snapshot of every user, hashes stripped.
    pub async fn list_users(&self) -> Result<Vec<PublicUser>, Error> {
        let users = self.identity.list_users().await?;
        Ok(users.iter().map(PublicUser::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::test_support::{CapturedFeed, InMemoryIdentityStore};
    use rstest::rstest;

    const TEST_COST: u32 = 4;

    fn service() -> (RegistrationService, Arc<CapturedFeed>) {
        let feed = Arc::new(CapturedFeed::default());
        let service = RegistrationService::with_hash_cost(
            Arc::new(InMemoryIdentityStore::default()),
            feed.clone(),
            TEST_COST,
        );
        (service, feed)
    }

    fn signup(email: &str) -> NewUser {
        NewUser {
            name: "Asha Rao".into(),
            email: email.into(),
            phone: "9876500000".into(),
            state: "Kerala".into(),
            password: "s3cret".into(),
        }
    }

    #[tokio::test]
    async fn register_publishes_event_without_password() {
        let (service, feed) = service();
        let user = service.register(signup("asha@example.com")).await.expect("registers");
        assert!(user.uid.starts_with("ATS"));

        let events = feed.events();
        assert_eq!(events.len(), 1);
        let value = serde_json::to_value(&events[0]).expect("event serialises");
        assert_eq!(value["email"], "asha@example.com");
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_publishes_nothing_more() {
        let (service, feed) = service();
        service.register(signup("asha@example.com")).await.expect("first registers");
        let err = service
            .register(signup("asha@example.com"))
            .await
            .expect_err("second conflicts");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(feed.events().len(), 1);
        assert_eq!(service.list_users().await.expect("lists").len(), 1);
    }

    #[rstest]
    #[case("", "email")]
    #[case("  ", "email")]
    #[tokio::test]
    async fn blank_fields_are_rejected(#[case] email: &str, #[case] field: &str) {
        let (service, _) = service();
        let err = service
            .register(signup(email))
            .await
            .expect_err("blank email rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().and_then(|d| d["field"].as_str()), Some(field));
    }

    #[tokio::test]
    async fn authenticate_resolves_role_and_strips_hash() {
        let (service, _) = service();
        service.register(signup("asha@example.com")).await.expect("registers");

        let account = service
            .authenticate("asha@example.com", "s3cret")
            .await
            .expect("authenticates");
        assert_eq!(account.role(), Role::User);
        let AuthenticatedAccount::User(user) = account else {
            panic!("expected user account");
        };
        let value = serde_json::to_value(&user).expect("serialises");
        assert!(value.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn authenticate_falls_back_to_admin_store() {
        let (service, _) = service();
        service
            .provision_admin(NewAdmin {
                name: "Ops".into(),
                email: "ops@example.com".into(),
                phone: "9000000000".into(),
                password: "hunter2".into(),
            })
            .await
            .expect("provisions");

        let account = service
            .authenticate("ops@example.com", "hunter2")
            .await
            .expect("authenticates");
        assert_eq!(account.role(), Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_map_distinctly() {
        let (service, _) = service();
        service.register(signup("asha@example.com")).await.expect("registers");

        let wrong = service
            .authenticate("asha@example.com", "nope")
            .await
            .expect_err("wrong password");
        assert_eq!(wrong.code(), ErrorCode::Unauthorized);

        let unknown = service
            .authenticate("ghost@example.com", "nope")
            .await
            .expect_err("unknown email");
        assert_eq!(unknown.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn existence_check_finds_only_users() {
        let (service, _) = service();
        service.register(signup("asha@example.com")).await.expect("registers");

        assert!(service.check_existence("asha@example.com").await.is_ok());
        let err = service
            .check_existence("ghost@example.com")
            .await
            .expect_err("missing email");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
