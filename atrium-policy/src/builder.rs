//! # Policy Builder
//!
//! Fluent configuration API driven by application startup code. The builder
//! wraps a [`PolicyRegistry`] and a cursor pointing at the part under
//! construction; every call consumes and returns the builder so
//! configuration reads as one chain, with `?` raising configuration errors
//! at the point of violation.

use atrium_roles::RoleRankTable;

use crate::actions::{ApiAction, ViewAction};
use crate::error::{PolicyError, PolicyResult};
use crate::parts::{Part, PartComponent, VIEW_ROLE_PAGE};
use crate::registry::PolicyRegistry;

/// Action name granted to a page's default view action.
pub const DEFAULT_VIEW_ACTION: &str = "View";

/// Fluent builder over a [`PolicyRegistry`].
///
/// The builder carries an explicit cursor to the current part; part-scoped
/// calls (`add_component`, `add_api_action`, `add_view_action`,
/// `auth_role`) apply to whichever part was last added or looked up, and
/// fail with [`PolicyError::NoCurrentPart`] when nothing is selected yet.
///
/// # Example
///
/// ```
/// use atrium_policy::PolicyBuilder;
/// use atrium_roles::RoleRankTable;
///
/// let registry = PolicyBuilder::new(RoleRankTable::portal_defaults())
///     .add_page("Invoice", "Invoices", "/invoice", None).unwrap()
///     .add_api_action("Create").unwrap()
///     .add_api_action("Delete").unwrap()
///     .auth_role("Employee", "View,Create", "", Some("*"), true).unwrap()
///     .auth_role("Manager", "*", "", Some("*"), true).unwrap()
///     .build();
///
/// assert_eq!(registry.parts().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    registry: PolicyRegistry,
    current: Option<usize>,
}

impl PolicyBuilder {
    /// Create a builder over an empty registry with the given rank table.
    pub fn new(ranks: RoleRankTable) -> Self {
        Self {
            registry: PolicyRegistry::new(ranks),
            current: None,
        }
    }

    /// Register a new part carrying one UI component, and select it.
    ///
    /// # Arguments
    ///
    /// * `name` - Part name
    /// * `title` - Display title of the part's component
    /// * `group` - Optional group
    /// * `view_role` - View role tag of the part's component
    /// * `url` - URL of the part's component
    pub fn add_part(
        mut self,
        name: impl Into<String>,
        title: impl Into<String>,
        group: Option<String>,
        view_role: Option<String>,
        url: impl Into<String>,
    ) -> PolicyResult<Self> {
        let index = self.registry.register_part(name, group)?;
        self.current = Some(index);
        self.current_part_mut()?
            .add_component(PartComponent::new(title, view_role, url));
        Ok(self)
    }

    /// Register a page: a part with one `Page` component and a default
    /// `View` action, selected as current.
    ///
    /// # Arguments
    ///
    /// * `part` - Part name
    /// * `title` - Display title of the page
    /// * `url` - URL the page renders at
    /// * `group` - Optional group
    pub fn add_page(
        self,
        part: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        group: Option<String>,
    ) -> PolicyResult<Self> {
        self.add_part(part, title, group, Some(VIEW_ROLE_PAGE.to_string()), url)?
            .add_view_action(DEFAULT_VIEW_ACTION)
    }

    /// Select an existing part by its exact `(name, group)` pair.
    ///
    /// # Errors
    ///
    /// [`PolicyError::PartNotFound`] if the part was never registered.
    pub fn get_part(mut self, name: &str, group: Option<&str>) -> PolicyResult<Self> {
        let index = self.registry.find_part_index(name, group)?;
        self.current = Some(index);
        Ok(self)
    }

    /// Select a part by its exact `(name, group)` pair, registering an
    /// empty part on miss.
    pub fn get_or_add_part(mut self, name: &str, group: Option<&str>) -> Self {
        let index = self.registry.find_or_create_part(name, group);
        self.current = Some(index);
        self
    }

    /// Attach an additional UI component to the current part.
    ///
    /// # Arguments
    ///
    /// * `title` - Display title
    /// * `view_role` - View role tag the component renders under
    /// * `url` - URL the component renders at
    pub fn add_component(
        mut self,
        title: impl Into<String>,
        view_role: Option<String>,
        url: impl Into<String>,
    ) -> PolicyResult<Self> {
        let component = PartComponent::new(title, view_role, url);
        self.current_part_mut()?.add_component(component);
        Ok(self)
    }

    /// Declare an api action on the current part.
    pub fn add_api_action(mut self, verb: impl Into<String>) -> PolicyResult<Self> {
        let action = ApiAction::new(verb);
        self.current_part_mut()?.add_action(action);
        Ok(self)
    }

    /// Declare view actions on the current part: one per UI component
    /// already attached, taking the component's view role and url.
    pub fn add_view_action(mut self, verb: impl Into<String>) -> PolicyResult<Self> {
        let verb = verb.into();
        let part = self.current_part_mut()?;
        let actions: Vec<ViewAction> = part
            .components
            .iter()
            .map(|c| ViewAction::new(verb.clone(), c.view_role.clone(), Some(c.url.clone())))
            .collect();
        for action in actions {
            part.add_action(action);
        }
        Ok(self)
    }

    /// Grant and deny verbs to a role on the current part.
    ///
    /// Delegates to [`PolicyRegistry::register_role`] scoped to the current
    /// part's exact `(name, group)` pair; see there for the permit/deny
    /// semantics and the `AnyEmployee` alias rules.
    ///
    /// # Arguments
    ///
    /// * `role` - The user role granted
    /// * `permit` - Verb expression to grant
    /// * `deny` - Verb expression to revoke
    /// * `view_role` - View role the rule's actions must match under
    /// * `is_min_role` - Whether `role` is a minimum rank
    pub fn auth_role(
        mut self,
        role: &str,
        permit: &str,
        deny: &str,
        view_role: Option<&str>,
        is_min_role: bool,
    ) -> PolicyResult<Self> {
        let index = self.current.ok_or(PolicyError::NoCurrentPart)?;
        let (name, group) = {
            let part = self
                .registry
                .parts()
                .get(index)
                .ok_or(PolicyError::NoCurrentPart)?;
            (part.name.clone(), part.group.clone())
        };
        self.registry
            .register_role(role, &name, group.as_deref(), view_role, permit, deny, is_min_role)?;
        Ok(self)
    }

    /// The registry as configured so far.
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    /// Finish configuration and hand over the registry.
    pub fn build(self) -> PolicyRegistry {
        self.registry
    }

    fn current_part_mut(&mut self) -> PolicyResult<&mut Part> {
        let index = self.current.ok_or(PolicyError::NoCurrentPart)?;
        self.registry
            .part_mut(index)
            .ok_or(PolicyError::NoCurrentPart)
    }
}
