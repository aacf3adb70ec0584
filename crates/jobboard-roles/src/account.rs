//! Unified user account access.
//!
//! Accounts live in `unifiedUserAccounts/{uid}`. Role resolution only reads the
//! stored role preference through [`AccountReader`]; the free functions below
//! maintain the record itself.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobboard_core::{Role, RolePreference, UserId};
use jobboard_store::schema::collection;
use jobboard_store::{from_document, to_document, Document, DocumentStore, StoreError};
use serde_json::Value;

use crate::error::{Result, RoleError};
use crate::types::{AccountPreferences, UnifiedUserAccount};

const PREFERENCE_FIELD: &str = "preferences.roleSelectionPreference";
const PROFILE_TYPES_FIELD: &str = "profileTypes";

/// Read access to unified user accounts.
#[async_trait]
pub trait AccountReader: Send + Sync {
    /// Fetch the account of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::AccountNotFound` if the user has no account.
    async fn get_unified_user_account(&self, user_id: &UserId) -> Result<UnifiedUserAccount>;
}

/// An [`AccountReader`] over the document store.
pub struct StoreAccountReader<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> StoreAccountReader<S> {
    /// Create a reader over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: DocumentStore + 'static> AccountReader for StoreAccountReader<S> {
    async fn get_unified_user_account(&self, user_id: &UserId) -> Result<UnifiedUserAccount> {
        get_account(&*self.store, user_id)
            .await?
            .ok_or_else(|| RoleError::AccountNotFound(user_id.clone()))
    }
}

/// Fetch an account, if registered.
///
/// # Errors
///
/// Returns `RoleError::StoreUnavailable` if the read fails or
/// `RoleError::Corrupt` if the stored record does not decode.
pub async fn get_account<S: DocumentStore + ?Sized>(
    store: &S,
    user_id: &UserId,
) -> Result<Option<UnifiedUserAccount>> {
    store
        .get(collection::UNIFIED_USER_ACCOUNTS, user_id.as_str())
        .await
        .map_err(|e| RoleError::read(collection::UNIFIED_USER_ACCOUNTS, user_id, e))?
        .map(|doc| decode(user_id, doc))
        .transpose()
}

/// Create the account of `user_id` unless it already exists.
///
/// Returns the stored account and whether it was created by this call. An
/// existing account is left untouched, including its email.
///
/// # Errors
///
/// Returns `RoleError::StoreUnavailable` if the read fails or
/// `RoleError::PersistenceError` if the write fails.
pub async fn register_account<S: DocumentStore + ?Sized>(
    store: &S,
    user_id: &UserId,
    email: &str,
    now: DateTime<Utc>,
) -> Result<(UnifiedUserAccount, bool)> {
    if let Some(existing) = get_account(store, user_id).await? {
        return Ok((existing, false));
    }

    let account = UnifiedUserAccount {
        uid: user_id.clone(),
        email: email.to_string(),
        profile_types: BTreeSet::new(),
        preferences: AccountPreferences::default(),
        created_at: now,
    };

    let doc = to_document(&account).map_err(RoleError::write)?;
    store
        .set(collection::UNIFIED_USER_ACCOUNTS, user_id.as_str(), doc)
        .await
        .map_err(RoleError::write)?;

    Ok((account, true))
}

/// Record `role` in the account's profile types.
///
/// # Errors
///
/// Returns `RoleError::AccountNotFound` if the user has no account.
pub async fn add_profile_type<S: DocumentStore + ?Sized>(
    store: &S,
    user_id: &UserId,
    role: Role,
) -> Result<UnifiedUserAccount> {
    let mut account = get_account(store, user_id)
        .await?
        .ok_or_else(|| RoleError::AccountNotFound(user_id.clone()))?;

    if !account.profile_types.insert(role) {
        return Ok(account);
    }

    let roles: Vec<Value> = account
        .profile_types
        .iter()
        .map(|r| Value::String(r.as_str().to_string()))
        .collect();
    update_fields(store, user_id, PROFILE_TYPES_FIELD, Value::Array(roles)).await?;

    Ok(account)
}

/// Store the role selection preference on the account.
///
/// Only `preferences.roleSelectionPreference` is written.
///
/// # Errors
///
/// Returns `RoleError::AccountNotFound` if the user has no account or
/// `RoleError::PersistenceError` if the write fails.
pub async fn update_role_preference<S: DocumentStore + ?Sized>(
    store: &S,
    user_id: &UserId,
    preference: RolePreference,
) -> Result<()> {
    update_fields(
        store,
        user_id,
        PREFERENCE_FIELD,
        Value::String(preference.as_str().to_string()),
    )
    .await
}

async fn update_fields<S: DocumentStore + ?Sized>(
    store: &S,
    user_id: &UserId,
    path: &str,
    value: Value,
) -> Result<()> {
    let mut fields = Document::new();
    fields.insert(path.to_string(), value);

    match store
        .update(collection::UNIFIED_USER_ACCOUNTS, user_id.as_str(), fields)
        .await
    {
        Ok(()) => Ok(()),
        Err(StoreError::NotFound) => Err(RoleError::AccountNotFound(user_id.clone())),
        Err(e) => Err(RoleError::write(e)),
    }
}

fn decode(user_id: &UserId, doc: Document) -> Result<UnifiedUserAccount> {
    from_document(doc)
        .map_err(|e| RoleError::corrupt(collection::UNIFIED_USER_ACCOUNTS, user_id, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_store::MemoryStore;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn register_is_idempotent() {
        let store = MemoryStore::new();
        let user_id = UserId::new("u1").unwrap();

        let (first, created) = register_account(&store, &user_id, "a@example.com", now())
            .await
            .unwrap();
        assert!(created);
        assert_eq!(
            first.preferences.role_selection_preference,
            RolePreference::Ask
        );

        let (second, created) = register_account(&store, &user_id, "b@example.com", now())
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(second.email, "a@example.com");
        assert_eq!(store.len(collection::UNIFIED_USER_ACCOUNTS), 1);
    }

    #[tokio::test]
    async fn preference_update_is_partial() {
        let store = MemoryStore::new();
        let user_id = UserId::new("u1").unwrap();
        register_account(&store, &user_id, "a@example.com", now())
            .await
            .unwrap();
        add_profile_type(&store, &user_id, Role::Company).await.unwrap();

        update_role_preference(&store, &user_id, RolePreference::Company)
            .await
            .unwrap();

        let reader = StoreAccountReader::new(Arc::new(store));
        let account = reader.get_unified_user_account(&user_id).await.unwrap();
        assert_eq!(
            account.preferences.role_selection_preference,
            RolePreference::Company
        );
        assert_eq!(account.email, "a@example.com");
        assert!(account.profile_types.contains(&Role::Company));
    }

    #[tokio::test]
    async fn missing_account() {
        let store = Arc::new(MemoryStore::new());
        let user_id = UserId::new("ghost").unwrap();

        let reader = StoreAccountReader::new(Arc::clone(&store));
        assert!(matches!(
            reader.get_unified_user_account(&user_id).await,
            Err(RoleError::AccountNotFound(_))
        ));
        assert!(matches!(
            update_role_preference(&*store, &user_id, RolePreference::Candidate).await,
            Err(RoleError::AccountNotFound(_))
        ));
        assert!(matches!(
            add_profile_type(&*store, &user_id, Role::Candidate).await,
            Err(RoleError::AccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn profile_types_accumulate() {
        let store = MemoryStore::new();
        let user_id = UserId::new("u1").unwrap();
        register_account(&store, &user_id, "a@example.com", now())
            .await
            .unwrap();

        add_profile_type(&store, &user_id, Role::Company).await.unwrap();
        add_profile_type(&store, &user_id, Role::Candidate).await.unwrap();
        let account = add_profile_type(&store, &user_id, Role::Company).await.unwrap();
        assert_eq!(account.profile_types.len(), 2);

        let doc = store
            .get(collection::UNIFIED_USER_ACCOUNTS, "u1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc["profileTypes"], json!(["candidate", "company"]));
    }

    #[tokio::test]
    async fn corrupt_account_is_reported() {
        let store = MemoryStore::new();
        let mut doc = Document::new();
        doc.insert("uid".into(), json!(42));
        store
            .set(collection::UNIFIED_USER_ACCOUNTS, "u1", doc)
            .await
            .unwrap();

        let result = get_account(&store, &UserId::new("u1").unwrap()).await;
        assert!(matches!(result, Err(RoleError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn write_failure_is_persistence_error() {
        let store = MemoryStore::new();
        let user_id = UserId::new("u1").unwrap();
        register_account(&store, &user_id, "a@example.com", now())
            .await
            .unwrap();
        store.set_available(false);

        let result = update_role_preference(&store, &user_id, RolePreference::Company).await;
        assert!(matches!(result, Err(RoleError::PersistenceError(_))));
    }
}
