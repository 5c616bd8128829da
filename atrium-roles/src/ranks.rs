//! # Role Ranks
//!
//! The rank table that backs minimum-role comparisons. Every role name maps
//! to an integer rank; a higher rank means a more privileged role. The table
//! is plain injected configuration — it is built once at startup and handed
//! to whatever component needs to compare roles, never held in static state,
//! so tests can supply alternate hierarchies freely.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::names;

/// Role error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    /// The role is absent from the rank table.
    ///
    /// A role name that reaches a rank lookup without being registered is a
    /// deployment/configuration bug. Callers must not swallow this as
    /// "not permitted" — that would mask the defect as a false negative.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// Result type for role operations.
pub type RoleResult<T> = Result<T, RoleError>;

/// Ordered mapping from role name to an integer rank.
///
/// The table is fixed at construction and queried with [`rank`](Self::rank).
/// Ranks establish a total order for "minimum role" comparisons; there is no
/// guarantee beyond integer comparison — in particular, ranks need not be
/// contiguous or unique.
///
/// Entries are kept in insertion order and looked up by linear scan. Rank
/// tables hold a handful of roles, so a scan beats a map here and keeps
/// iteration deterministic.
///
/// # Examples
///
/// ```
/// use atrium_roles::{names, RoleRankTable};
///
/// let ranks = RoleRankTable::portal_defaults();
/// assert_eq!(ranks.rank(names::MANAGER).unwrap(), 90);
/// assert!(ranks.rank(names::MANAGER).unwrap() > ranks.rank(names::EMPLOYEE).unwrap());
///
/// // Alternate hierarchies are just alternate tables.
/// let custom = RoleRankTable::new()
///     .with_role("Root", 1000)
///     .with_role("Operator", 10);
/// assert_eq!(custom.rank("Root").unwrap(), 1000);
/// assert!(custom.rank("Admin").is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleRankTable {
    /// `(role name, rank)` pairs in insertion order.
    ranks: Vec<(String, i32)>,
}

impl RoleRankTable {
    /// Create an empty rank table.
    pub fn new() -> Self {
        Self { ranks: Vec::new() }
    }

    /// Add a role to the table, replacing the rank of an existing entry
    /// with the same name.
    ///
    /// # Arguments
    ///
    /// * `role` - The role name
    /// * `rank` - The integer rank (higher = more privileged)
    pub fn with_role(mut self, role: impl Into<String>, rank: i32) -> Self {
        let role = role.into();
        match self.ranks.iter_mut().find(|(name, _)| *name == role) {
            Some(entry) => entry.1 = rank,
            None => self.ranks.push((role, rank)),
        }
        self
    }

    /// The reference hierarchy used by the Atrium portal applications.
    ///
    /// Admin=100, CoAdmin=99, Manager=90, Employee=80, ExternEmployee=10.
    /// These values are seed data, not derived; concrete deployments may
    /// differ.
    pub fn portal_defaults() -> Self {
        Self::new()
            .with_role(names::ADMIN, 100)
            .with_role(names::CO_ADMIN, 99)
            .with_role(names::MANAGER, 90)
            .with_role(names::EMPLOYEE, 80)
            .with_role(names::EXTERN_EMPLOYEE, 10)
    }

    /// Look up the rank of a role.
    ///
    /// # Arguments
    ///
    /// * `role` - The role name to look up
    ///
    /// # Returns
    ///
    /// The rank, or [`RoleError::UnknownRole`] if the role is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use atrium_roles::{RoleError, RoleRankTable};
    ///
    /// let ranks = RoleRankTable::new().with_role("Admin", 100);
    /// assert_eq!(ranks.rank("Admin").unwrap(), 100);
    /// assert_eq!(
    ///     ranks.rank("Ghost"),
    ///     Err(RoleError::UnknownRole("Ghost".to_string()))
    /// );
    /// ```
    pub fn rank(&self, role: &str) -> RoleResult<i32> {
        self.ranks
            .iter()
            .find(|(name, _)| name == role)
            .map(|(_, rank)| *rank)
            .ok_or_else(|| RoleError::UnknownRole(role.to_string()))
    }

    /// Check whether a role is present in the table.
    pub fn contains(&self, role: &str) -> bool {
        self.ranks.iter().any(|(name, _)| name == role)
    }

    /// Iterate over `(role, rank)` pairs in insertion order.
    pub fn roles(&self) -> impl Iterator<Item = (&str, i32)> {
        self.ranks.iter().map(|(name, rank)| (name.as_str(), *rank))
    }

    /// Get the number of roles in the table.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
