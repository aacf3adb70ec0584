//! Multi-profile role resolution for jobboard.
//!
//! A user may hold a candidate profile, a company profile, or both. This crate
//! decides which role to present at login, switches the active role, and keeps
//! the per-user role session in the document store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              RoleManagerService              │
//! │  determine_login_role / switch_role / ...    │
//! └──────┬───────────────┬──────────────┬────────┘
//!        │               │              │
//!        ▼               ▼              ▼
//! ┌─────────────┐ ┌─────────────┐ ┌───────────┐
//! │  Profile    │ │  Account    │ │  Session  │
//! │  Existence  │ │  Reader     │ │  helpers  │
//! │  Checker    │ │             │ │           │
//! └──────┬──────┘ └──────┬──────┘ └─────┬─────┘
//!        └───────────────┼──────────────┘
//!                        ▼
//!                 DocumentStore
//! ```
//!
//! The service holds no caches. Profile existence is probed on every call and
//! timestamps come from an injected [`Clock`](jobboard_core::Clock).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use jobboard_core::{Role, UserId};
//! use jobboard_roles::{RoleManager, RoleManagerService};
//! use jobboard_store::{Document, MemoryStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RoleManagerService::with_defaults(Arc::new(MemoryStore::new()));
//! let user_id = UserId::new("u1")?;
//!
//! service.register_account(&user_id, "u1@example.com").await?;
//! service.create_profile(&user_id, Role::Candidate, Document::new()).await?;
//!
//! let decision = service.determine_login_role(&user_id).await?;
//! assert_eq!(decision.recommended_role, Some(Role::Candidate));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod decision;
pub mod error;
pub mod profiles;
pub mod service;
pub mod session;
pub mod types;

pub use account::{AccountReader, StoreAccountReader};
pub use error::{Result, RoleError};
pub use profiles::{profile_collection, ProfileExistenceChecker};
pub use service::{RoleManager, RoleManagerService};
pub use types::{
    AccountPreferences, LoginOutcome, LoginRoleDecision, ProfileTypes, RoleHistoryEntry,
    SessionData, UnifiedUserAccount, UserSession,
};
