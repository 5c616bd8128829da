//! # Atrium Policy
//!
//! Action-based authorization policy engine for the Atrium portal suite,
//! shared across the Ledger, Storefront, and Warehouse applications.
//!
//! ## Overview
//!
//! The atrium-policy crate handles:
//! - **Parts**: named, optionally grouped UI/API surfaces (pages, resource types, lookups)
//! - **Actions**: verbs a part exposes, either rendered through a view or backing an API
//! - **Permissions**: grants binding a part's action to a user role
//! - **Verb expressions**: comma-separated verb lists with wildcard expansion
//! - **Registry and builder**: one-time policy construction plus the query surface
//!
//! ## Architecture
//!
//! ```text
//! PolicyBuilder (configuration phase)
//!   PolicyRegistry
//!     RoleRankTable          injected from atrium-roles
//!     Part                   e.g. "Invoice", optionally in group "Sales"
//!       PartComponent        title + url + view role tag (UI metadata)
//!       PartAction           View("View", "Page") | Api("Create")
//!       Permission           action granted to a role, exact or minimum rank
//! ```
//!
//! At startup, application code drives the [`PolicyBuilder`] to declare
//! parts, their actions, and role grants. At request time, callers present
//! their role set plus an `(action, part, group, view role)` query; the
//! registry filters parts, then actions, then permissions, comparing ranks
//! through the table wherever a grant is marked minimum-role. Queries are
//! pure reads: the registry is built once and then shared.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atrium_policy::PolicyBuilder;
//! use atrium_roles::RoleRankTable;
//!
//! let registry = PolicyBuilder::new(RoleRankTable::portal_defaults())
//!     .add_page("Invoice", "Invoices", "/invoice", None).unwrap()
//!     .add_api_action("Create").unwrap()
//!     .add_api_action("Delete").unwrap()
//!     .auth_role("Employee", "View", "", Some("Page"), true).unwrap()
//!     .auth_role("Manager", "*", "Delete", Some("*"), true).unwrap()
//!     .auth_role("Admin", "Delete", "", Some("*"), true).unwrap()
//!     .build();
//!
//! let caller = vec!["Manager".to_string()];
//! assert_eq!(
//!     registry.is_permitted(&caller, "Create", "Invoice", None, None),
//!     Ok(true)
//! );
//! assert_eq!(
//!     registry.is_permitted(&caller, "Delete", "Invoice", None, None),
//!     Ok(false)
//! );
//! ```
//!
//! ## Matching Conventions
//!
//! - View actions match their own name or the `"*"` query name. A `None`
//!   query view role matches only an action without a view role; `Some("*")`
//!   matches any.
//! - Api actions match by exact name only and ignore the view role
//!   dimension (`None` and `Some("*")` both match).
//! - Part lookup at query time is exact on `(name, group)`; the `Some("*")`
//!   group wildcard applies during role configuration only.
//!
//! ## Integration with atrium-roles
//!
//! The registry is constructed over a `RoleRankTable`:
//! - Minimum-role grants compare the caller's rank against the granted
//!   role's rank
//! - The `AnyEmployee` alias (valid for minimum-role grants only) is
//!   rewritten to `ExternEmployee`
//! - A role missing from the table surfaces as an error, never as a denial

pub mod actions;
pub mod builder;
pub mod error;
pub mod parts;
pub mod permissions;
pub mod registry;
pub mod verbs;

/// Wildcard token accepted in verb expressions, group selectors, and
/// matching queries.
pub const WILDCARD: &str = "*";

// Re-export main types for convenience
pub use actions::{ApiAction, PartAction, ViewAction};
pub use builder::{PolicyBuilder, DEFAULT_VIEW_ACTION};
pub use error::{PolicyError, PolicyResult};
pub use parts::{Part, PartComponent, VIEW_ROLE_LOOKUP, VIEW_ROLE_PAGE};
pub use permissions::Permission;
pub use registry::PolicyRegistry;
