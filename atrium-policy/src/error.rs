//! Error types for policy configuration
//!
//! This module defines all error types the policy engine can raise. Every
//! one of them is a configuration-time or programming-error condition: a
//! query that simply matches nothing reports `Ok(false)` or an empty
//! sequence, never an error.

use atrium_roles::RoleError;
use thiserror::Error;

/// Policy engine error types.
///
/// Configuration errors are expected to abort application startup; the one
/// variant that can surface at query time ([`PolicyError::Role`]) signals a
/// role missing from the rank table, which is a deployment bug and is
/// deliberately not converted into "not permitted".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// A part with the same name and group is already registered
    #[error("Duplicate part: '{name}' in group '{}'", group_label(.group))]
    DuplicatePart {
        /// Part name of the rejected registration.
        name: String,
        /// Part group of the rejected registration.
        group: Option<String>,
    },

    /// No registered part matches the requested name and group
    #[error("Part not found: '{name}' in group '{}'", group_label(.group))]
    PartNotFound {
        /// Part name that was looked up.
        name: String,
        /// Part group that was looked up (`Some("*")` for a wildcard).
        group: Option<String>,
    },

    /// A verb wildcard was expanded without an owning part
    #[error("Verb wildcard requires a part context")]
    WildcardWithoutPart,

    /// A role alias was combined with an exact-role grant
    #[error("Role alias '{0}' is only valid for minimum-role grants")]
    AliasRequiresMinRole(String),

    /// A builder operation needs a current part and none is selected
    #[error("No part selected: add or look up a part first")]
    NoCurrentPart,

    /// A rank lookup referenced a role absent from the rank table
    #[error(transparent)]
    Role(#[from] RoleError),
}

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

fn group_label(group: &Option<String>) -> &str {
    group.as_deref().unwrap_or("<none>")
}
