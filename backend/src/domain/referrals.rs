//! Referral submission and listing.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::error::Error;
use crate::domain::ports::{IdentityStore, ReferralStore};
use crate::domain::referral::{Contact, Referral};

/// Domain service for the referral store.
pub struct ReferralService {
    referrals: Arc<dyn ReferralStore>,
    identity: Arc<dyn IdentityStore>,
}

impl ReferralService {
    /// Construct from injected store handles.
    pub fn new(referrals: Arc<dyn ReferralStore>, identity: Arc<dyn IdentityStore>) -> Self {
        Self {
            referrals,
            identity,
        }
    }

    /// Persist a referral submission.
    ///
    /// The "referrer is an existing user" flag is computed here from the
    /// identity store and frozen into the immutable record.
    ///
    /// # Errors
    /// Invalid request when the referrer or any referred contact is
    /// incomplete, or when the referred list is empty.
    pub async fn submit(
        &self,
        referrer: Contact,
        referred: Vec<Contact>,
    ) -> Result<Referral, Error> {
        validate_contact("user", &referrer)?;
        if referred.is_empty() {
            return Err(Error::invalid_request("At least one referral is required"));
        }
        for (index, contact) in referred.iter().enumerate() {
            validate_contact(&format!("referrals[{index}]"), contact)?;
        }

        let is_existing_user = self
            .identity
            .find_user_by_email(&referrer.email)
            .await?
            .is_some();

        let referral = Referral {
            user: referrer,
            referrals: referred,
            is_existing_user,
            created_at: Utc::now(),
        };
        self.referrals.insert(&referral).await?;
        Ok(referral)
    }

    /// Snapshot of every referral record.
    pub async fn list_all(&self) -> Result<Vec<Referral>, Error> {
        Ok(self.referrals.list_all().await?)
    }
}

fn validate_contact(path: &str, contact: &Contact) -> Result<(), Error> {
    for (field, value) in [
        ("name", &contact.name),
        ("email", &contact.email),
        ("phone", &contact.phone),
    ] {
        if value.trim().is_empty() {
            return Err(Error::invalid_request("All fields are required")
                .with_details(json!({ "field": format!("{path}.{field}") })));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::user::{Role, Uid, User};
    use crate::test_support::{InMemoryIdentityStore, InMemoryReferralStore};

    fn contact(email: &str) -> Contact {
        Contact {
            name: "Asha Rao".into(),
            email: email.into(),
            phone: "9876500000".into(),
        }
    }

    fn service() -> (ReferralService, Arc<InMemoryIdentityStore>) {
        let identity = Arc::new(InMemoryIdentityStore::default());
        let service = ReferralService::new(
            Arc::new(InMemoryReferralStore::default()),
            identity.clone(),
        );
        (service, identity)
    }

    #[tokio::test]
    async fn flags_known_referrers() {
        let (service, identity) = service();
        crate::domain::ports::IdentityStore::insert_user(
            identity.as_ref(),
            &User {
                uid: Uid::issue(),
                name: "Asha Rao".into(),
                email: "asha@example.com".into(),
                phone: "9876500000".into(),
                state: "Kerala".into(),
                password_hash: "$2b$10$hash".into(),
                role: Role::User,
                created_at: Utc::now(),
            },
        )
        .await
        .expect("seeds user");

        let known = service
            .submit(contact("asha@example.com"), vec![contact("friend@example.com")])
            .await
            .expect("submits");
        assert!(known.is_existing_user);

        let unknown = service
            .submit(contact("new@example.com"), vec![contact("friend@example.com")])
            .await
            .expect("submits");
        assert!(!unknown.is_existing_user);

        let all = service.list_all().await.expect("lists");
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|r| r.is_existing_user));
        assert!(all.iter().any(|r| !r.is_existing_user));
    }

    #[tokio::test]
    async fn empty_referral_list_is_rejected() {
        let (service, _) = service();
        let err = service
            .submit(contact("asha@example.com"), vec![])
            .await
            .expect_err("empty list rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn incomplete_contact_is_rejected() {
        let (service, _) = service();
        let mut bad = contact("friend@example.com");
        bad.phone = String::new();
        let err = service
            .submit(contact("asha@example.com"), vec![bad])
            .await
            .expect_err("incomplete contact rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
