//! # Permissions
//!
//! A permission binds one of a part's actions to a user role, together with
//! a permitted flag and a minimum-role flag. Permissions are granted during
//! configuration and tested against caller roles at query time.

use serde::{Deserialize, Serialize};

use atrium_roles::{RoleRankTable, RoleResult};

use crate::actions::PartAction;

/// A grant (or basis for denial) linking an action to a user role.
///
/// The action is stored by value, cloned from the owning part's action list
/// at grant time. Equality is structural over all four fields; the engine
/// relies on it for duplicate suppression during configuration.
///
/// # Example
///
/// ```
/// use atrium_policy::{ApiAction, PartAction, Permission};
/// use atrium_roles::RoleRankTable;
///
/// let ranks = RoleRankTable::portal_defaults();
/// let action = PartAction::from(ApiAction::new("Create"));
/// let permission = Permission::new(action, "Employee", true, true);
///
/// // Minimum-role grant: any role ranked at or above Employee satisfies it.
/// assert_eq!(permission.matches_user_role("Manager", &ranks), Ok(true));
/// assert_eq!(permission.matches_user_role("ExternEmployee", &ranks), Ok(false));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    /// The action this permission applies to.
    pub action: PartAction,

    /// The user role the permission is granted to.
    pub user_role: String,

    /// Whether the permission grants (`true`) rather than records a denial.
    pub is_permitted: bool,

    /// Whether `user_role` is a minimum rank rather than an exact match.
    pub is_min_role: bool,
}

impl Permission {
    /// Create a new permission.
    ///
    /// # Arguments
    ///
    /// * `action` - The action the permission applies to
    /// * `user_role` - The role granted
    /// * `is_permitted` - Grant flag
    /// * `is_min_role` - Minimum-rank comparison flag
    pub fn new(
        action: PartAction,
        user_role: impl Into<String>,
        is_permitted: bool,
        is_min_role: bool,
    ) -> Self {
        Self {
            action,
            user_role: user_role.into(),
            is_permitted,
            is_min_role,
        }
    }

    /// Test whether a caller role satisfies this permission.
    ///
    /// Minimum-role permissions compare ranks: the candidate's rank must be
    /// at or above the granted role's rank, and both roles must exist in the
    /// rank table — an unknown role is a configuration bug and surfaces as
    /// an error, never as "not permitted". Exact permissions compare role
    /// names only and perform no rank lookup at all.
    ///
    /// # Arguments
    ///
    /// * `candidate` - A role held by the caller
    /// * `ranks` - The rank table to resolve minimum-role comparisons against
    pub fn matches_user_role(&self, candidate: &str, ranks: &RoleRankTable) -> RoleResult<bool> {
        if self.is_min_role {
            Ok(ranks.rank(candidate)? >= ranks.rank(&self.user_role)?)
        } else {
            Ok(candidate == self.user_role)
        }
    }
}
