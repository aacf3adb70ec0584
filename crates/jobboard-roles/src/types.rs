//! Persisted records and result types for role management.
//!
//! Field names follow the stored document layout (`camelCase`).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use jobboard_core::{Role, RolePreference, UserId};
use jobboard_store::Document;
use serde::{Deserialize, Serialize};

/// Account-level user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPreferences {
    /// How login picks a role when the user holds both profiles.
    #[serde(default)]
    pub role_selection_preference: RolePreference,
}

/// A unified user account, stored in `unifiedUserAccounts/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedUserAccount {
    /// The auth provider's user id.
    pub uid: UserId,
    /// Informational email address.
    pub email: String,
    /// Profiles recorded on the account.
    #[serde(default)]
    pub profile_types: BTreeSet<Role>,
    /// User settings.
    #[serde(default)]
    pub preferences: AccountPreferences,
    /// Registration timestamp.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// One past active role and how long it lasted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleHistoryEntry {
    /// The role that was active.
    pub role: Role,
    /// When the role was left.
    pub timestamp: DateTime<Utc>,
    /// How long the role was active, in milliseconds.
    pub duration: i64,
}

/// Opaque per-session state. Only `role_history` is maintained by role switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    /// Past active roles, oldest first.
    #[serde(default)]
    pub role_history: Vec<RoleHistoryEntry>,
    /// Client preferences, persisted as-is.
    #[serde(default)]
    pub preferences: Document,
    /// Client navigation state, persisted as-is.
    #[serde(default)]
    pub navigation_state: Document,
}

/// The role session of a user, stored in `userSessions/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Owner of the session.
    pub user_id: UserId,
    /// The presented role; unset until the first role is chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_role: Option<Role>,
    /// The role active before the last change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_role: Option<Role>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last time the session was touched.
    pub last_activity: DateTime<Utc>,
    /// Last time `active_role` changed.
    pub role_changed_at: DateTime<Utc>,
    /// Opaque session state.
    #[serde(default)]
    pub session_data: SessionData,
}

/// Which profiles exist for a user. Computed on every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileTypes {
    has_candidate: bool,
    has_company: bool,
}

impl ProfileTypes {
    /// Build from the two existence checks.
    #[must_use]
    pub const fn new(has_candidate: bool, has_company: bool) -> Self {
        Self {
            has_candidate,
            has_company,
        }
    }

    /// Whether a profile exists for `role`.
    #[must_use]
    pub const fn has(&self, role: Role) -> bool {
        match role {
            Role::Candidate => self.has_candidate,
            Role::Company => self.has_company,
        }
    }

    /// The roles whose profile exists, in the order `[candidate, company]`.
    #[must_use]
    pub fn available_roles(&self) -> Vec<Role> {
        Role::ALL.into_iter().filter(|r| self.has(*r)).collect()
    }
}

impl Serialize for ProfileTypes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ProfileTypes", 3)?;
        state.serialize_field("hasCandidate", &self.has_candidate)?;
        state.serialize_field("hasCompany", &self.has_company)?;
        state.serialize_field("availableRoles", &self.available_roles())?;
        state.end()
    }
}

/// The login-time role recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRoleDecision {
    /// Roles the user holds a profile for, in the order `[candidate, company]`.
    pub available_roles: Vec<Role>,
    /// The role to present, if any profile exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_role: Option<Role>,
    /// Whether the user must be asked to choose.
    pub requires_selection: bool,
}

/// The result of completing a login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    /// The recommendation the login was based on.
    pub decision: LoginRoleDecision,
    /// The activated session; `None` while a selection is pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<UserSession>,
}
