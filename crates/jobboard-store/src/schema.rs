//! Collection definitions.
//!
//! Every collection is keyed by the owning user's id.

/// Collection names.
pub mod collection {
    /// Candidate profiles, keyed by uid. Only existence is inspected.
    pub const CANDIDATES: &str = "candidates";

    /// Company profiles, keyed by uid. Only existence is inspected.
    pub const COMPANIES: &str = "companies";

    /// One role session document per user, keyed by uid.
    pub const USER_SESSIONS: &str = "userSessions";

    /// Unified user accounts, keyed by uid.
    pub const UNIFIED_USER_ACCOUNTS: &str = "unifiedUserAccounts";
}

/// Returns all collection names for database initialization.
#[must_use]
pub fn all_collections() -> Vec<&'static str> {
    vec![
        collection::CANDIDATES,
        collection::COMPANIES,
        collection::USER_SESSIONS,
        collection::UNIFIED_USER_ACCOUNTS,
    ]
}

/// Whether `name` is a collection of the schema.
#[must_use]
pub fn is_known(name: &str) -> bool {
    all_collections().contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_collections() {
        assert!(is_known("userSessions"));
        assert!(is_known(collection::CANDIDATES));
        assert!(!is_known("sessions"));
    }
}
