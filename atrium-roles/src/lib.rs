//! # Atrium Roles
//!
//! This crate provides the user role hierarchy for the Atrium portal suite,
//! shared across the Ledger, Storefront, and Warehouse applications.
//!
//! ## Overview
//!
//! The atrium-roles crate handles:
//! - **Role names**: The reference role set the portal applications are
//!   configured with
//! - **Rank tables**: Role name → integer rank mappings backing
//!   "minimum role" comparisons
//!
//! Roles are plain strings and ranks are plain integers: the identity
//! provider hands applications a set of role names, and the policy engine
//! compares them through an injected [`RoleRankTable`]. Nothing here is
//! static or process-global, so tests and non-standard deployments can run
//! with their own hierarchies.
//!
//! ## Usage
//!
//! ```rust
//! use atrium_roles::{names, RoleRankTable};
//!
//! let ranks = RoleRankTable::portal_defaults();
//!
//! // "Is a Manager at least an Employee?"
//! let manager = ranks.rank(names::MANAGER).unwrap();
//! let employee = ranks.rank(names::EMPLOYEE).unwrap();
//! assert!(manager >= employee);
//! ```
//!
//! ## Cross-App Integration
//!
//! This crate is designed to work with:
//! - `atrium-policy`: Action-based authorization over parts and view roles
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod names;
pub mod ranks;

// Re-export main types for convenience
pub use ranks::{RoleError, RoleRankTable, RoleResult};
