//! # Role Names
//!
//! Reference role names for the Atrium portal suite. These are seed data:
//! deployments may register additional roles (or entirely different ones)
//! in their [`RoleRankTable`](crate::RoleRankTable), but the portal
//! applications and their generated configuration code refer to roles by
//! these names.

/// Full administrative access across the portal.
pub const ADMIN: &str = "Admin";

/// Administrative access delegated by an admin.
pub const CO_ADMIN: &str = "CoAdmin";

/// Department/team management access.
pub const MANAGER: &str = "Manager";

/// Regular internal staff.
pub const EMPLOYEE: &str = "Employee";

/// External staff (contractors, partner personnel) with the lowest
/// internal rank.
pub const EXTERN_EMPLOYEE: &str = "ExternEmployee";

/// Alias accepted by policy configuration for "every employee, internal or
/// external".
///
/// This is not a concrete role: it is rewritten to [`EXTERN_EMPLOYEE`]
/// during configuration and is only meaningful for minimum-role grants,
/// where "at least an external employee" covers the whole staff hierarchy.
pub const ANY_EMPLOYEE: &str = "AnyEmployee";

/// Get all concrete reference roles, highest rank first.
///
/// The [`ANY_EMPLOYEE`] alias is not included; it never appears in a rank
/// table.
///
/// # Example
///
/// ```
/// use atrium_roles::names;
///
/// assert_eq!(names::all().len(), 5);
/// assert!(!names::all().contains(&names::ANY_EMPLOYEE));
/// ```
pub fn all() -> Vec<&'static str> {
    vec![ADMIN, CO_ADMIN, MANAGER, EMPLOYEE, EXTERN_EMPLOYEE]
}
