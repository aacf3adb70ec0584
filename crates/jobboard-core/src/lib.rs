//! Core types and utilities for jobboard.
//!
//! This crate provides the foundational types shared by the storage, auth and
//! role-management crates:
//!
//! - **Identifiers**: the opaque [`UserId`] issued by the authentication provider
//! - **Roles**: the two profile kinds a user may hold and the login preference
//! - **Clock**: an injectable time source used instead of server timestamps
//! - **Error types**: common error definitions shared across crates
//!
//! # Example
//!
//! ```
//! use jobboard_core::{Role, RolePreference, UserId};
//!
//! let user_id: UserId = "kD2x9mQ0aPfu7hYbR1".parse().unwrap();
//! let preference: RolePreference = "company".parse().unwrap();
//!
//! assert_eq!(preference.preferred_role(), Some(Role::Company));
//! assert_eq!(user_id.as_str(), "kD2x9mQ0aPfu7hYbR1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod error;
pub mod ids;
pub mod roles;

pub use clock::{Clock, SystemClock};
pub use error::{CoreError, Result};
pub use ids::{IdError, UserId};
pub use roles::{Role, RolePreference};

#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
