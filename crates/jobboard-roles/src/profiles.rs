//! Profile existence checks.
//!
//! A user holds a role when a document keyed by their id exists in the role's
//! profile collection. The check is repeated on every query and never cached.

use std::sync::Arc;

use jobboard_core::{Role, UserId};
use jobboard_store::schema::collection;
use jobboard_store::DocumentStore;

use crate::error::{Result, RoleError};
use crate::types::ProfileTypes;

/// The collection holding profiles for a role.
#[must_use]
pub const fn profile_collection(role: Role) -> &'static str {
    match role {
        Role::Candidate => collection::CANDIDATES,
        Role::Company => collection::COMPANIES,
    }
}

/// Reports which profile kinds exist for a user.
pub struct ProfileExistenceChecker<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Clone for ProfileExistenceChecker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> ProfileExistenceChecker<S> {
    /// Create a checker over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Probe both profile collections for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::StoreUnavailable` if either probe fails. A failed
    /// probe is never reported as a missing profile.
    pub async fn check_user_profiles(&self, user_id: &UserId) -> Result<ProfileTypes> {
        let (has_candidate, has_company) = futures::try_join!(
            self.has_profile(user_id, Role::Candidate),
            self.has_profile(user_id, Role::Company),
        )?;

        tracing::debug!(
            user_id = %user_id,
            has_candidate,
            has_company,
            "Checked user profiles"
        );

        Ok(ProfileTypes::new(has_candidate, has_company))
    }

    /// Whether a profile exists for `role`.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::StoreUnavailable` if the probe fails.
    pub async fn has_profile(&self, user_id: &UserId, role: Role) -> Result<bool> {
        let collection = profile_collection(role);
        self.store
            .exists(collection, user_id.as_str())
            .await
            .map_err(|e| RoleError::read(collection, user_id, e))
    }
}
