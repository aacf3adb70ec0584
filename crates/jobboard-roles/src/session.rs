//! Role session persistence.
//!
//! A session is stored whole in `userSessions/{uid}`. It is read, modified in
//! memory by [`apply_switch`], and written back with a single `set` so that the
//! role history array is never partially applied.

use chrono::{DateTime, Utc};
use jobboard_core::{Role, UserId};
use jobboard_store::schema::collection;
use jobboard_store::{from_document, to_document, DocumentStore};

use crate::error::{Result, RoleError};
use crate::types::{RoleHistoryEntry, SessionData, UserSession};

/// Load the session of `user_id`, if one was ever written.
///
/// # Errors
///
/// Returns `RoleError::StoreUnavailable` if the read fails or
/// `RoleError::Corrupt` if the stored session does not decode.
pub async fn load_session<S: DocumentStore + ?Sized>(
    store: &S,
    user_id: &UserId,
) -> Result<Option<UserSession>> {
    store
        .get(collection::USER_SESSIONS, user_id.as_str())
        .await
        .map_err(|e| RoleError::read(collection::USER_SESSIONS, user_id, e))?
        .map(|doc| {
            from_document(doc)
                .map_err(|e| RoleError::corrupt(collection::USER_SESSIONS, user_id, &e))
        })
        .transpose()
}

/// A fresh session with no active role.
#[must_use]
pub fn default_session(user_id: &UserId, now: DateTime<Utc>) -> UserSession {
    UserSession {
        user_id: user_id.clone(),
        active_role: None,
        previous_role: None,
        created_at: now,
        last_activity: now,
        role_changed_at: now,
        session_data: SessionData::default(),
    }
}

/// Make `to` the active role of `session` at `now`.
///
/// When the role changes from a previously active one, that role is appended
/// to the history with the time it was held. Activating the first role sets no
/// history and no previous role. `last_activity` is refreshed in every case.
///
/// Returns true if the active role changed.
pub fn apply_switch(session: &mut UserSession, to: Role, now: DateTime<Utc>) -> bool {
    let changed = session.active_role != Some(to);

    if changed {
        if let Some(from) = session.active_role {
            let held = now.signed_duration_since(session.role_changed_at);
            session.session_data.role_history.push(RoleHistoryEntry {
                role: from,
                timestamp: now,
                duration: held.num_milliseconds().max(0),
            });
            session.previous_role = Some(from);
        }
        session.active_role = Some(to);
        session.role_changed_at = now;
    }

    session.last_activity = now;
    changed
}

/// Write the whole session document.
///
/// # Errors
///
/// Returns `RoleError::PersistenceError` if the write fails. The session is
/// not committed in that case.
pub async fn persist_session<S: DocumentStore + ?Sized>(
    store: &S,
    session: &UserSession,
) -> Result<()> {
    let doc = to_document(session).map_err(RoleError::write)?;
    store
        .set(collection::USER_SESSIONS, session.user_id.as_str(), doc)
        .await
        .map_err(RoleError::write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jobboard_store::{Document, MemoryStore};
    use serde_json::json;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn user() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[test]
    fn first_activation_has_no_history() {
        let mut session = default_session(&user(), t(0));

        assert!(apply_switch(&mut session, Role::Candidate, t(5)));
        assert_eq!(session.active_role, Some(Role::Candidate));
        assert_eq!(session.previous_role, None);
        assert_eq!(session.role_changed_at, t(5));
        assert_eq!(session.last_activity, t(5));
        assert!(session.session_data.role_history.is_empty());
    }

    #[test]
    fn switch_records_history() {
        let mut session = default_session(&user(), t(0));
        apply_switch(&mut session, Role::Candidate, t(0));

        assert!(apply_switch(&mut session, Role::Company, t(90)));
        assert_eq!(session.active_role, Some(Role::Company));
        assert_eq!(session.previous_role, Some(Role::Candidate));
        assert_eq!(
            session.session_data.role_history,
            vec![RoleHistoryEntry {
                role: Role::Candidate,
                timestamp: t(90),
                duration: 90_000,
            }]
        );

        apply_switch(&mut session, Role::Candidate, t(100));
        assert_eq!(session.previous_role, Some(Role::Company));
        assert_eq!(session.session_data.role_history.len(), 2);
        assert_eq!(session.session_data.role_history[1].duration, 10_000);
    }

    #[test]
    fn same_role_only_touches_activity() {
        let mut session = default_session(&user(), t(0));
        apply_switch(&mut session, Role::Company, t(10));
        let before = session.clone();

        assert!(!apply_switch(&mut session, Role::Company, t(20)));
        assert_eq!(session.last_activity, t(20));
        assert_eq!(session.role_changed_at, before.role_changed_at);
        assert_eq!(session.previous_role, before.previous_role);
        assert_eq!(session.session_data, before.session_data);
    }

    #[test]
    fn backwards_clock_yields_zero_duration() {
        let mut session = default_session(&user(), t(0));
        apply_switch(&mut session, Role::Candidate, t(60));
        apply_switch(&mut session, Role::Company, t(60) - Duration::seconds(30));

        assert_eq!(session.session_data.role_history[0].duration, 0);
    }

    #[tokio::test]
    async fn persist_and_load() {
        let store = MemoryStore::new();
        assert!(load_session(&store, &user()).await.unwrap().is_none());

        let mut session = default_session(&user(), t(0));
        session
            .session_data
            .navigation_state
            .insert("lastPage".into(), json!("/jobs"));
        apply_switch(&mut session, Role::Company, t(1));
        persist_session(&store, &session).await.unwrap();

        let loaded = load_session(&store, &user()).await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn failed_write_is_not_committed() {
        let store = MemoryStore::new();
        let session = default_session(&user(), t(0));
        store.set_available(false);

        let result = persist_session(&store, &session).await;
        assert!(matches!(result, Err(RoleError::PersistenceError(_))));

        store.set_available(true);
        assert!(load_session(&store, &user()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_session_is_reported() {
        let store = MemoryStore::new();
        let mut doc = Document::new();
        doc.insert("activeRole".into(), json!("admin"));
        store.set(collection::USER_SESSIONS, "u1", doc).await.unwrap();

        let result = load_session(&store, &user()).await;
        assert!(matches!(result, Err(RoleError::Corrupt { .. })));
    }
}
