//! Role manager service implementation.
//!
//! This module provides the `RoleManager` trait and the `RoleManagerService`
//! implementation that combines profile existence, account preferences and the
//! persisted role session.

use std::sync::Arc;

use async_trait::async_trait;
use jobboard_core::{Clock, Role, RolePreference, SystemClock, UserId};
use jobboard_store::{Document, DocumentStore};

use crate::account::{self, AccountReader, StoreAccountReader};
use crate::decision;
use crate::error::{Result, RoleError};
use crate::profiles::{profile_collection, ProfileExistenceChecker};
use crate::session;
use crate::types::{
    LoginOutcome, LoginRoleDecision, ProfileTypes, UnifiedUserAccount, UserSession,
};

/// Trait defining the role management operations.
///
/// Every call is request-scoped. Implementations hold no per-user state; all
/// of it lives in the document store.
#[async_trait]
pub trait RoleManager: Send + Sync {
    // =========================================================================
    // Login
    // =========================================================================

    /// Decide which role to present at login. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::AccountNotFound` if the user has no account.
    /// Returns `RoleError::StoreUnavailable` if a read fails.
    async fn determine_login_role(&self, user_id: &UserId) -> Result<LoginRoleDecision>;

    /// Decide the login role and activate it when no selection is needed.
    ///
    /// # Errors
    ///
    /// Same as [`determine_login_role`](Self::determine_login_role) and
    /// [`switch_role`](Self::switch_role).
    async fn complete_login(&self, user_id: &UserId) -> Result<LoginOutcome>;

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Make `to_role` the active role, creating the session if absent.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::InvalidRole` if the user has no profile for `to_role`.
    /// Returns `RoleError::PersistenceError` if the session write fails.
    async fn switch_role(&self, user_id: &UserId, to_role: Role) -> Result<UserSession>;

    /// The stored session, if any.
    async fn current_session(&self, user_id: &UserId) -> Result<Option<UserSession>>;

    // =========================================================================
    // Account Operations
    // =========================================================================

    /// Store how login should pick a role for a dual-profile user.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::AccountNotFound` if the user has no account.
    /// Returns `RoleError::PersistenceError` if the write fails.
    async fn update_role_preference(
        &self,
        user_id: &UserId,
        preference: RolePreference,
    ) -> Result<()>;

    /// Register the unified account of a user. Idempotent.
    async fn register_account(&self, user_id: &UserId, email: &str) -> Result<UnifiedUserAccount>;

    /// Create (or replace) the profile of `role` and record it on the account.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::AccountNotFound` if the user has no account.
    async fn create_profile(
        &self,
        user_id: &UserId,
        role: Role,
        profile: Document,
    ) -> Result<ProfileTypes>;
}

/// The main role manager service implementation.
pub struct RoleManagerService<S: DocumentStore, A: AccountReader, C: Clock> {
    store: Arc<S>,
    profiles: ProfileExistenceChecker<S>,
    accounts: A,
    clock: C,
}

impl<S: DocumentStore + 'static> RoleManagerService<S, StoreAccountReader<S>, SystemClock> {
    /// Create a service reading accounts from `store` with the wall clock.
    #[must_use]
    pub fn with_defaults(store: Arc<S>) -> Self {
        let accounts = StoreAccountReader::new(Arc::clone(&store));
        Self::new(store, accounts, SystemClock)
    }
}

impl<S: DocumentStore, A: AccountReader, C: Clock> RoleManagerService<S, A, C> {
    /// Create a new role manager service.
    #[must_use]
    pub fn new(store: Arc<S>, accounts: A, clock: C) -> Self {
        Self {
            profiles: ProfileExistenceChecker::new(Arc::clone(&store)),
            store,
            accounts,
            clock,
        }
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S, A, C> RoleManager for RoleManagerService<S, A, C>
where
    S: DocumentStore + 'static,
    A: AccountReader + 'static,
    C: Clock + 'static,
{
    // =========================================================================
    // Login
    // =========================================================================

    async fn determine_login_role(&self, user_id: &UserId) -> Result<LoginRoleDecision> {
        let (profiles, account) = futures::try_join!(
            self.profiles.check_user_profiles(user_id),
            self.accounts.get_unified_user_account(user_id),
        )?;

        let preference = account.preferences.role_selection_preference;
        let decision = decision::recommend_role(&profiles, preference);

        tracing::debug!(
            user_id = %user_id,
            preference = %preference,
            recommended_role = ?decision.recommended_role,
            requires_selection = decision.requires_selection,
            "Determined login role"
        );

        Ok(decision)
    }

    async fn complete_login(&self, user_id: &UserId) -> Result<LoginOutcome> {
        let decision = self.determine_login_role(user_id).await?;

        let session = match decision.recommended_role {
            Some(role) if !decision.requires_selection => {
                Some(self.switch_role(user_id, role).await?)
            }
            _ => None,
        };

        tracing::info!(
            user_id = %user_id,
            active_role = ?session.as_ref().and_then(|s| s.active_role),
            requires_selection = decision.requires_selection,
            "Completed login"
        );

        Ok(LoginOutcome { decision, session })
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    async fn switch_role(&self, user_id: &UserId, to_role: Role) -> Result<UserSession> {
        let profiles = self.profiles.check_user_profiles(user_id).await?;
        decision::validate_switch(user_id, &profiles, to_role)?;

        let now = self.clock.now();
        let mut current = session::load_session(&*self.store, user_id)
            .await?
            .unwrap_or_else(|| session::default_session(user_id, now));

        let from_role = current.active_role;
        let changed = session::apply_switch(&mut current, to_role, now);
        session::persist_session(&*self.store, &current).await?;

        if changed {
            tracing::info!(
                user_id = %user_id,
                from = ?from_role,
                to = %to_role,
                "Switched role"
            );
        } else {
            tracing::debug!(user_id = %user_id, role = %to_role, "Refreshed active role");
        }

        Ok(current)
    }

    async fn current_session(&self, user_id: &UserId) -> Result<Option<UserSession>> {
        session::load_session(&*self.store, user_id).await
    }

    // =========================================================================
    // Account Operations
    // =========================================================================

    async fn update_role_preference(
        &self,
        user_id: &UserId,
        preference: RolePreference,
    ) -> Result<()> {
        account::update_role_preference(&*self.store, user_id, preference).await?;

        tracing::info!(
            user_id = %user_id,
            preference = %preference,
            "Updated role preference"
        );

        Ok(())
    }

    async fn register_account(&self, user_id: &UserId, email: &str) -> Result<UnifiedUserAccount> {
        let (account, created) =
            account::register_account(&*self.store, user_id, email, self.clock.now()).await?;

        if created {
            tracing::info!(user_id = %user_id, "Registered account");
        }

        Ok(account)
    }

    async fn create_profile(
        &self,
        user_id: &UserId,
        role: Role,
        profile: Document,
    ) -> Result<ProfileTypes> {
        if account::get_account(&*self.store, user_id).await?.is_none() {
            return Err(RoleError::AccountNotFound(user_id.clone()));
        }

        self.store
            .set(profile_collection(role), user_id.as_str(), profile)
            .await
            .map_err(RoleError::write)?;
        account::add_profile_type(&*self.store, user_id, role).await?;

        tracing::info!(user_id = %user_id, role = %role, "Created profile");

        self.profiles.check_user_profiles(user_id).await
    }
}
