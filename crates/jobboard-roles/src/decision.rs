//! Login role resolution and switch validation.
//!
//! Per user the role state is one of:
//!
//! ```text
//!   NoRole ──(profile created)──▶ SingleRole(r) ──(second profile)──▶ DualRole(active, previous?)
//!                                     │                                   │
//!                                     └─ switch(r): no-op                 └─ switch(b ≠ a): DualRole(b, a)
//! ```
//!
//! At login, a dual-profile user's stored preference decides:
//!
//! | preference  | recommended role            | requires selection |
//! |-------------|-----------------------------|--------------------|
//! | `candidate` | candidate                   | no                 |
//! | `company`   | company                     | no                 |
//! | `ask`       | first available (candidate) | yes                |
//!
//! A single profile is always recommended without asking. With no profile there
//! is nothing to recommend and a selection (i.e. creating a profile) is required.

use jobboard_core::{Role, RolePreference, UserId};

use crate::error::{Result, RoleError};
use crate::types::{LoginRoleDecision, ProfileTypes};

/// Compute the login recommendation from existing profiles and the stored preference.
#[must_use]
pub fn recommend_role(profiles: &ProfileTypes, preference: RolePreference) -> LoginRoleDecision {
    let available_roles = profiles.available_roles();

    let (recommended_role, requires_selection) = match available_roles.as_slice() {
        [] => (None, true),
        [only] => (Some(*only), false),
        [first, ..] => match preference.preferred_role() {
            Some(role) if profiles.has(role) => (Some(role), false),
            _ => (Some(*first), true),
        },
    };

    LoginRoleDecision {
        available_roles,
        recommended_role,
        requires_selection,
    }
}

/// Validates a switch target and returns it if the user holds that profile.
///
/// # Errors
///
/// Returns `RoleError::InvalidRole` if no profile exists for `to`.
pub fn validate_switch(user_id: &UserId, profiles: &ProfileTypes, to: Role) -> Result<Role> {
    if profiles.has(to) {
        Ok(to)
    } else {
        Err(RoleError::InvalidRole {
            user_id: user_id.clone(),
            role: to,
        })
    }
}
