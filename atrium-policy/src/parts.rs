//! # Parts
//!
//! A part is the unit of policy configuration: a named, optionally grouped
//! UI/API surface (a page, a resource type, a lookup) that carries the
//! actions it exposes, the permissions granted against those actions, and
//! cosmetic UI component descriptors for portal callers.

use serde::{Deserialize, Serialize};

use crate::actions::PartAction;
use crate::permissions::Permission;

/// View role tag for full-page rendering.
pub const VIEW_ROLE_PAGE: &str = "Page";

/// View role tag for embedded lookup rendering.
pub const VIEW_ROLE_LOOKUP: &str = "Lookup";

/// Cosmetic UI descriptor attached to a part.
///
/// Components carry no matching logic of their own; they exist so portal
/// callers can render titles and links, and they serve as the template for
/// bulk view-action registration (one view action per component, taking the
/// component's view role and url).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartComponent {
    /// Display title shown by portal callers.
    pub title: String,

    /// View role tag the component renders under (e.g. "Page", "Lookup").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_role: Option<String>,

    /// URL the component renders at.
    pub url: String,
}

impl PartComponent {
    /// Create a new component descriptor.
    ///
    /// # Arguments
    ///
    /// * `title` - Display title
    /// * `view_role` - View role tag the component renders under
    /// * `url` - URL the component renders at
    pub fn new(title: impl Into<String>, view_role: Option<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            view_role,
            url: url.into(),
        }
    }
}

/// A named, optionally grouped container of actions and permissions.
///
/// The pair `(name, group)` identifies a part uniquely within a registry;
/// uniqueness is enforced at registration time, not by this type. Actions,
/// permissions, and components all preserve insertion order.
///
/// Fields are public: the engine's two-phase discipline (configure once,
/// then query) is a usage contract, not a type-level guarantee.
///
/// # Example
///
/// ```
/// use atrium_policy::{ApiAction, Part};
///
/// let mut part = Part::new("Invoice", None);
/// part.add_action(ApiAction::new("Create"));
/// assert!(part.matches_key("Invoice", None));
/// assert!(!part.matches_key("Invoice", Some("Sales")));
/// assert_eq!(part.action_names().collect::<Vec<_>>(), vec!["Create"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Part {
    /// Part name (e.g. "Invoice").
    pub name: String,

    /// Optional group the part belongs to (e.g. "Sales").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// UI component descriptors, in attachment order.
    #[serde(default)]
    pub components: Vec<PartComponent>,

    /// Actions the part exposes, in declaration order.
    #[serde(default)]
    pub actions: Vec<PartAction>,

    /// Permissions granted against the part's actions, in grant order.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Part {
    /// Create a new empty part.
    ///
    /// # Arguments
    ///
    /// * `name` - Part name
    /// * `group` - Optional group
    pub fn new(name: impl Into<String>, group: Option<String>) -> Self {
        Self {
            name: name.into(),
            group,
            components: Vec::new(),
            actions: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Check whether this part has exactly the given `(name, group)` key.
    ///
    /// Query-time identity: no wildcard, `None` matches only `None`.
    pub fn matches_key(&self, name: &str, group: Option<&str>) -> bool {
        self.name == name && self.group.as_deref() == group
    }

    /// Attach a UI component descriptor.
    pub fn add_component(&mut self, component: PartComponent) {
        self.components.push(component);
    }

    /// Declare an action on this part.
    pub fn add_action(&mut self, action: impl Into<PartAction>) {
        self.actions.push(action.into());
    }

    /// Names of every action declared on this part, in declaration order.
    ///
    /// Duplicate names are yielded as declared; wildcard verb expansion
    /// deduplicates on its side.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(PartAction::name)
    }

    /// Insert a permission unless an equal one already exists.
    ///
    /// Equality is over all four fields (action, user role, permitted flag,
    /// minimum-role flag), so the same grant issued twice collapses to one
    /// permission while variants differing in any flag coexist.
    ///
    /// # Returns
    ///
    /// `true` if the permission was inserted, `false` if suppressed
    pub fn add_permission(&mut self, permission: Permission) -> bool {
        if self.permissions.contains(&permission) {
            return false;
        }
        self.permissions.push(permission);
        true
    }

    /// Remove every permission binding the given action to the given role.
    ///
    /// Removal ignores the permitted and minimum-role flags: a deny strips
    /// all flavors of the `(action, role)` pair.
    ///
    /// # Returns
    ///
    /// The number of permissions removed
    pub fn remove_permissions(&mut self, action: &PartAction, user_role: &str) -> usize {
        let before = self.permissions.len();
        self.permissions
            .retain(|p| !(p.action == *action && p.user_role == user_role));
        before - self.permissions.len()
    }
}
