//! Profile roles and the stored login preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A profile kind a user may hold. A user can hold either, both, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Job seeker profile, stored in `candidates/{uid}`.
    Candidate,
    /// Employer profile, stored in `companies/{uid}`.
    Company,
}

impl Role {
    /// Every role, in the fixed order used for `availableRoles`.
    pub const ALL: [Self; 2] = [Self::Candidate, Self::Company];

    /// The lowercase wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "candidate" => Ok(Self::Candidate),
            "company" => Ok(Self::Company),
            _ => Err(CoreError::InvalidRole(s.to_string())),
        }
    }
}

/// How login should pick a role for a user holding both profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolePreference {
    /// Prompt the user to choose.
    #[default]
    Ask,
    /// Always start as a candidate.
    Candidate,
    /// Always start as a company.
    Company,
}

impl RolePreference {
    /// The lowercase wire name of the preference.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Candidate => "candidate",
            Self::Company => "company",
        }
    }

    /// The role this preference selects automatically, or `None` for `ask`.
    #[must_use]
    pub const fn preferred_role(self) -> Option<Role> {
        match self {
            Self::Ask => None,
            Self::Candidate => Some(Role::Candidate),
            Self::Company => Some(Role::Company),
        }
    }
}

impl fmt::Display for RolePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RolePreference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "candidate" => Ok(Self::Candidate),
            "company" => Ok(Self::Company),
            _ => Err(CoreError::InvalidPreference(s.to_string())),
        }
    }
}
