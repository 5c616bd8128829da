//! # Part Actions
//!
//! Defines the capabilities a part exposes. An action is a named verb
//! ("View", "Create", "Delete", ...) that either renders a UI surface
//! (view action) or backs an API endpoint (api action). Matching is a pure
//! predicate evaluated per query; actions carry no state.

use serde::{Deserialize, Serialize};

use crate::WILDCARD;

/// An action rendered through a UI component, scoped to a view role.
///
/// View actions match by name — with `"*"` accepted as "any name" — and by
/// view role, where `Some("*")` means "any view role". A `None` query view
/// role is **not** a wildcard for view actions: it only matches an action
/// whose own view role is `None`.
///
/// # Example
///
/// ```
/// use atrium_policy::ViewAction;
///
/// let action = ViewAction::new("View", Some("Page".to_string()), Some("/invoice".to_string()));
/// assert!(action.matches("View", Some("Page")));
/// assert!(action.matches("*", Some("Page")));
/// assert!(action.matches("View", Some("*")));
/// assert!(!action.matches("View", Some("Lookup")));
/// assert!(!action.matches("View", None));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewAction {
    /// Action name (the verb, e.g. "View").
    pub name: String,

    /// View role tag the action is exposed under (e.g. "Page", "Lookup").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_role: Option<String>,

    /// URL the action renders at, taken from the owning component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
}

impl ViewAction {
    /// Create a new view action.
    ///
    /// # Arguments
    ///
    /// * `name` - The action name (verb)
    /// * `view_role` - The view role tag the action renders under
    /// * `view_url` - The URL the action renders at
    pub fn new(name: impl Into<String>, view_role: Option<String>, view_url: Option<String>) -> Self {
        Self {
            name: name.into(),
            view_role,
            view_url,
        }
    }

    /// Check whether this action satisfies a query.
    ///
    /// # Arguments
    ///
    /// * `name` - Queried action name, or `"*"` for any
    /// * `view_role` - Queried view role; `Some("*")` for any, `None`
    ///   matches only an action without a view role
    pub fn matches(&self, name: &str, view_role: Option<&str>) -> bool {
        (name == WILDCARD || name == self.name)
            && (view_role == Some(WILDCARD) || view_role == self.view_role.as_deref())
    }
}

/// An action exposed through the part's API surface.
///
/// Api actions match by exact name only — there is no name wildcard — and
/// ignore the view role dimension: a `None` or `"*"` query view role
/// matches, any concrete view role does not.
///
/// # Example
///
/// ```
/// use atrium_policy::ApiAction;
///
/// let action = ApiAction::new("Create");
/// assert!(action.matches("Create", None));
/// assert!(action.matches("Create", Some("*")));
/// assert!(!action.matches("Create", Some("Page")));
/// assert!(!action.matches("*", None));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiAction {
    /// Action name (the verb, e.g. "Create").
    pub name: String,
}

impl ApiAction {
    /// Create a new api action.
    ///
    /// # Arguments
    ///
    /// * `name` - The action name (verb)
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check whether this action satisfies a query.
    ///
    /// # Arguments
    ///
    /// * `name` - Queried action name (exact match)
    /// * `view_role` - Queried view role; `None` and `Some("*")` match
    pub fn matches(&self, name: &str, view_role: Option<&str>) -> bool {
        name == self.name && (view_role.is_none() || view_role == Some(WILDCARD))
    }
}

/// A named, matchable capability exposed by a part.
///
/// This is a closed sum type: every action is either a [`ViewAction`] or an
/// [`ApiAction`], and each variant's `matches` predicate is total and
/// side-effect-free. Callers must supply the view-role convention matching
/// the variant they expect to hit — `None` is "don't care" for api actions
/// but a literal "no view role" for view actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartAction {
    /// UI-rendered action scoped to a view role.
    View(ViewAction),
    /// API-exposed action with exact-name matching.
    Api(ApiAction),
}

impl PartAction {
    /// Get the action name (the verb).
    pub fn name(&self) -> &str {
        match self {
            PartAction::View(action) => &action.name,
            PartAction::Api(action) => &action.name,
        }
    }

    /// Check whether this action satisfies a query, dispatching to the
    /// variant's predicate.
    pub fn matches(&self, name: &str, view_role: Option<&str>) -> bool {
        match self {
            PartAction::View(action) => action.matches(name, view_role),
            PartAction::Api(action) => action.matches(name, view_role),
        }
    }

    /// Check if this is a view action.
    pub fn is_view(&self) -> bool {
        matches!(self, PartAction::View(_))
    }

    /// Check if this is an api action.
    pub fn is_api(&self) -> bool {
        matches!(self, PartAction::Api(_))
    }
}

impl From<ViewAction> for PartAction {
    fn from(action: ViewAction) -> Self {
        PartAction::View(action)
    }
}

impl From<ApiAction> for PartAction {
    fn from(action: ApiAction) -> Self {
        PartAction::Api(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(name: &str, view_role: Option<&str>) -> ViewAction {
        ViewAction::new(name, view_role.map(str::to_string), Some("/url".to_string()))
    }

    #[test]
    fn test_view_action_name_matching() {
        let action = view("View", Some("Page"));
        assert!(action.matches("View", Some("Page")));
        assert!(action.matches("*", Some("Page")));
        assert!(!action.matches("Edit", Some("Page")));
    }

    #[test]
    fn test_view_action_view_role_matching() {
        let action = view("View", Some("Page"));
        assert!(action.matches("View", Some("*")));
        assert!(!action.matches("View", Some("Lookup")));
        // None is not a wildcard for view actions.
        assert!(!action.matches("View", None));
    }

    #[test]
    fn test_view_action_without_view_role() {
        let action = view("View", None);
        assert!(action.matches("View", None));
        assert!(action.matches("View", Some("*")));
        assert!(!action.matches("View", Some("Page")));
    }

    #[test]
    fn test_api_action_matching() {
        let action = ApiAction::new("Create");
        assert!(action.matches("Create", None));
        assert!(action.matches("Create", Some("*")));
        assert!(!action.matches("Create", Some("Page")));
        assert!(!action.matches("Delete", None));
    }

    #[test]
    fn test_api_action_has_no_name_wildcard() {
        let action = ApiAction::new("Create");
        assert!(!action.matches("*", None));
    }

    #[test]
    fn test_part_action_dispatch() {
        let view_action = PartAction::from(view("View", Some("Page")));
        let api_action = PartAction::from(ApiAction::new("Create"));

        assert_eq!(view_action.name(), "View");
        assert_eq!(api_action.name(), "Create");
        assert!(view_action.is_view());
        assert!(!view_action.is_api());
        assert!(api_action.is_api());

        assert!(view_action.matches("View", Some("Page")));
        assert!(!view_action.matches("View", None));
        assert!(api_action.matches("Create", None));
    }

    #[test]
    fn test_action_equality() {
        let a = PartAction::from(view("View", Some("Page")));
        let b = PartAction::from(view("View", Some("Page")));
        let c = PartAction::from(view("View", Some("Lookup")));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, PartAction::from(ApiAction::new("View")));
    }
}
