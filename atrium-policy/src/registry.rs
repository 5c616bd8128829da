//! # Policy Registry
//!
//! The registry owns every part and the role rank table, and exposes both
//! the configuration operations (register parts, grant and deny verbs to
//! roles) and the query operations (`is_permitted`, `matching_permissions`).
//!
//! The intended lifecycle has two disjoint phases: a single-threaded
//! configuration phase during which the `&mut self` methods populate the
//! registry, then a serving phase during which any number of concurrent
//! callers query it through `&self` methods. Nothing in the query path
//! blocks, allocates a lock, or performs I/O.

use serde::{Deserialize, Serialize};

use atrium_roles::{names, RoleRankTable};

use crate::actions::PartAction;
use crate::error::{PolicyError, PolicyResult};
use crate::parts::Part;
use crate::permissions::Permission;
use crate::verbs;
use crate::WILDCARD;

/// Owner of the policy graph: all parts plus the role rank table.
///
/// Parts are kept in registration order and identified by their unique
/// `(name, group)` pair. The rank table is fixed at construction; tests and
/// deployments with a different hierarchy inject their own table instead of
/// relying on ambient state.
///
/// # Example
///
/// ```
/// use atrium_policy::PolicyBuilder;
/// use atrium_roles::RoleRankTable;
///
/// let registry = PolicyBuilder::new(RoleRankTable::portal_defaults())
///     .add_page("Invoice", "Invoices", "/invoice", None).unwrap()
///     .auth_role("Employee", "View", "", Some("Page"), true).unwrap()
///     .build();
///
/// let roles = vec!["Manager".to_string()];
/// assert_eq!(
///     registry.is_permitted(&roles, "View", "Invoice", None, Some("Page")),
///     Ok(true)
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyRegistry {
    /// Role hierarchy used for minimum-role comparisons.
    ranks: RoleRankTable,
    /// All registered parts, in registration order.
    parts: Vec<Part>,
}

impl PolicyRegistry {
    /// Create an empty registry over the given role rank table.
    pub fn new(ranks: RoleRankTable) -> Self {
        Self {
            ranks,
            parts: Vec::new(),
        }
    }

    /// The role rank table the registry was constructed with.
    pub fn ranks(&self) -> &RoleRankTable {
        &self.ranks
    }

    /// All registered parts, in registration order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Register a new empty part.
    ///
    /// # Arguments
    ///
    /// * `name` - Part name
    /// * `group` - Optional group
    ///
    /// # Returns
    ///
    /// The index of the new part, for cursor-style callers.
    ///
    /// # Errors
    ///
    /// [`PolicyError::DuplicatePart`] if a part with the same
    /// `(name, group)` pair is already registered.
    pub fn register_part(&mut self, name: impl Into<String>, group: Option<String>) -> PolicyResult<usize> {
        let name = name.into();
        if self.parts.iter().any(|p| p.matches_key(&name, group.as_deref())) {
            return Err(PolicyError::DuplicatePart { name, group });
        }
        Ok(self.push_part(name, group))
    }

    /// Look up a part by its exact `(name, group)` pair.
    ///
    /// # Errors
    ///
    /// [`PolicyError::PartNotFound`] if no part has that pair.
    pub fn find_part(&self, name: &str, group: Option<&str>) -> PolicyResult<&Part> {
        self.parts
            .iter()
            .find(|p| p.matches_key(name, group))
            .ok_or_else(|| PolicyError::PartNotFound {
                name: name.to_string(),
                group: group.map(str::to_string),
            })
    }

    /// Look up a part's index by its exact `(name, group)` pair.
    ///
    /// # Errors
    ///
    /// [`PolicyError::PartNotFound`] if no part has that pair.
    pub fn find_part_index(&self, name: &str, group: Option<&str>) -> PolicyResult<usize> {
        self.parts
            .iter()
            .position(|p| p.matches_key(name, group))
            .ok_or_else(|| PolicyError::PartNotFound {
                name: name.to_string(),
                group: group.map(str::to_string),
            })
    }

    /// Look up a part's index, registering an empty part on miss.
    pub fn find_or_create_part(&mut self, name: &str, group: Option<&str>) -> usize {
        if let Some(index) = self.parts.iter().position(|p| p.matches_key(name, group)) {
            return index;
        }
        self.push_part(name.to_string(), group.map(str::to_string))
    }

    /// Mutable access to a part by index, for builder-driven configuration.
    pub(crate) fn part_mut(&mut self, index: usize) -> Option<&mut Part> {
        self.parts.get_mut(index)
    }

    fn push_part(&mut self, name: String, group: Option<String>) -> usize {
        tracing::debug!(
            part = %name,
            group = %group.as_deref().unwrap_or("<none>"),
            "Registered part"
        );
        self.parts.push(Part::new(name, group));
        self.parts.len() - 1
    }

    /// Grant and deny verbs to a role on the matching part(s).
    ///
    /// The target set is every part whose name equals `part_name` and whose
    /// group either equals `group` or is covered by the `Some("*")` group
    /// wildcard. This is the one place group matching is not exact; queries
    /// always are.
    ///
    /// For each target part the deny expression is expanded first (with no
    /// exclusions) and the permit expression second, with the denied verbs
    /// as its exclusion list. The permit pass inserts one permission per
    /// `(verb, matching action)` pair unless an equal permission already
    /// exists on the part; the deny pass then removes every permission
    /// binding a denied action to the role, regardless of its permitted or
    /// minimum-role flag.
    ///
    /// # Arguments
    ///
    /// * `role` - The user role granted; the `AnyEmployee` alias is
    ///   rewritten to `ExternEmployee` and requires `is_min_role`
    /// * `part_name` - Name of the part(s) the rule targets
    /// * `group` - Exact group, or `Some("*")` for every group
    /// * `view_role` - View role the rule's actions must match under
    /// * `permit` - Verb expression to grant
    /// * `deny` - Verb expression to revoke
    /// * `is_min_role` - Whether `role` is a minimum rank rather than an
    ///   exact match
    ///
    /// # Errors
    ///
    /// [`PolicyError::PartNotFound`] if no part matches, and
    /// [`PolicyError::AliasRequiresMinRole`] on alias misuse.
    pub fn register_role(
        &mut self,
        role: &str,
        part_name: &str,
        group: Option<&str>,
        view_role: Option<&str>,
        permit: &str,
        deny: &str,
        is_min_role: bool,
    ) -> PolicyResult<()> {
        let role = resolve_role_alias(role, is_min_role)?;

        let targets: Vec<usize> = self
            .parts
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.name == part_name && (group == Some(WILDCARD) || p.group.as_deref() == group)
            })
            .map(|(index, _)| index)
            .collect();

        if targets.is_empty() {
            return Err(PolicyError::PartNotFound {
                name: part_name.to_string(),
                group: group.map(str::to_string),
            });
        }

        for index in targets {
            let (permitted, denied) = {
                let part = &self.parts[index];
                let denied = verbs::expand(Some(part), deny, &[])?;
                let permitted = verbs::expand(Some(part), permit, &denied)?;
                (permitted, denied)
            };

            let part = &mut self.parts[index];

            let mut granted = 0usize;
            for verb in &permitted {
                let matching: Vec<PartAction> = part
                    .actions
                    .iter()
                    .filter(|a| a.matches(verb, view_role))
                    .cloned()
                    .collect();
                for action in matching {
                    if part.add_permission(Permission::new(action, role.clone(), true, is_min_role)) {
                        granted += 1;
                    }
                }
            }

            let mut revoked = 0usize;
            for verb in &denied {
                let matching: Vec<PartAction> = part
                    .actions
                    .iter()
                    .filter(|a| a.matches(verb, view_role))
                    .cloned()
                    .collect();
                for action in &matching {
                    revoked += part.remove_permissions(action, &role);
                }
            }

            tracing::debug!(
                role = %role,
                part = %part.name,
                granted = %granted,
                revoked = %revoked,
                "Applied role rule"
            );
        }

        Ok(())
    }

    /// Decide whether any of the caller's roles is permitted the action.
    ///
    /// True iff [`matching_permissions`](Self::matching_permissions) yields
    /// at least one permission. Pure read over the current registry state.
    ///
    /// # Arguments
    ///
    /// * `user_roles` - Every role the caller holds, in caller order
    /// * `action` - The action name being attempted
    /// * `part` - Exact part name
    /// * `group` - Exact part group (`None` matches only ungrouped parts)
    /// * `view_role` - View role convention of the expected action variant
    ///
    /// # Errors
    ///
    /// An unknown role reached in a minimum-role comparison before the
    /// first match propagates as an error; it is never reported as "not
    /// permitted".
    pub fn is_permitted(
        &self,
        user_roles: &[String],
        action: &str,
        part: &str,
        group: Option<&str>,
        view_role: Option<&str>,
    ) -> PolicyResult<bool> {
        match self
            .matching_permissions(user_roles, action, part, group, view_role)
            .next()
        {
            Some(Ok(_)) => Ok(true),
            Some(Err(err)) => Err(err),
            None => Ok(false),
        }
    }

    /// Lazily enumerate every permission satisfying a query.
    ///
    /// Yields, for every part with an exact `(name, group)` match, for
    /// every permission whose action matches `(action, view_role)`, for
    /// every caller role satisfying the permission, one `Ok` item. The same
    /// permission is yielded once per satisfying caller role — callers that
    /// hold several qualifying roles see it several times. Ordering is
    /// parts in registration order, then permissions in grant order, then
    /// roles in caller order; re-invoking on an unchanged registry yields
    /// the same sequence.
    ///
    /// Useful for diagnostics: the items enumerate *why* access is granted.
    pub fn matching_permissions<'a>(
        &'a self,
        user_roles: &'a [String],
        action: &'a str,
        part: &'a str,
        group: Option<&'a str>,
        view_role: Option<&'a str>,
    ) -> impl Iterator<Item = PolicyResult<&'a Permission>> + 'a {
        self.parts
            .iter()
            .filter(move |p| p.matches_key(part, group))
            .flat_map(move |p| {
                p.permissions
                    .iter()
                    .filter(move |permission| permission.action.matches(action, view_role))
                    .flat_map(move |permission| {
                        user_roles.iter().filter_map(move |role| {
                            match permission.matches_user_role(role, &self.ranks) {
                                Ok(true) => Some(Ok(permission)),
                                Ok(false) => None,
                                Err(err) => Some(Err(PolicyError::from(err))),
                            }
                        })
                    })
            })
    }
}

/// Rewrite the `AnyEmployee` alias to its concrete role.
///
/// The alias is defined purely as a minimum-role comparison, so it is
/// rejected for exact grants.
fn resolve_role_alias(role: &str, is_min_role: bool) -> PolicyResult<String> {
    if role == names::ANY_EMPLOYEE {
        if !is_min_role {
            return Err(PolicyError::AliasRequiresMinRole(role.to_string()));
        }
        return Ok(names::EXTERN_EMPLOYEE.to_string());
    }
    Ok(role.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ApiAction, ViewAction};

    fn registry() -> PolicyRegistry {
        PolicyRegistry::new(RoleRankTable::portal_defaults())
    }

    fn add_api_actions(registry: &mut PolicyRegistry, index: usize, names: &[&str]) {
        let part = registry.part_mut(index).unwrap();
        for name in names {
            part.add_action(ApiAction::new(*name));
        }
    }

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_register_part_rejects_duplicates() {
        let mut registry = registry();
        assert_eq!(registry.register_part("Invoice", None), Ok(0));
        assert_eq!(
            registry.register_part("Invoice", None),
            Err(PolicyError::DuplicatePart {
                name: "Invoice".to_string(),
                group: None,
            })
        );
        // Same name under a different group is a different part.
        assert_eq!(registry.register_part("Invoice", Some("Sales".to_string())), Ok(1));
    }

    #[test]
    fn test_find_part_is_exact() {
        let mut registry = registry();
        registry.register_part("Invoice", Some("Sales".to_string())).unwrap();

        assert!(registry.find_part("Invoice", Some("Sales")).is_ok());
        assert_eq!(
            registry.find_part("Invoice", None),
            Err(PolicyError::PartNotFound {
                name: "Invoice".to_string(),
                group: None,
            })
        );
    }

    #[test]
    fn test_find_or_create_part_reuses_existing() {
        let mut registry = registry();
        let first = registry.find_or_create_part("Invoice", None);
        let second = registry.find_or_create_part("Invoice", None);
        assert_eq!(first, second);
        assert_eq!(registry.parts().len(), 1);

        let third = registry.find_or_create_part("Order", None);
        assert_ne!(first, third);
        assert_eq!(registry.parts().len(), 2);
    }

    #[test]
    fn test_register_role_requires_a_part() {
        let mut registry = registry();
        let err = registry
            .register_role("Manager", "Missing", None, None, "View", "", true)
            .unwrap_err();
        assert_eq!(
            err,
            PolicyError::PartNotFound {
                name: "Missing".to_string(),
                group: None,
            }
        );
    }

    #[test]
    fn test_register_role_group_wildcard_targets_every_group() {
        let mut registry = registry();
        let sales = registry.register_part("Invoice", Some("Sales".to_string())).unwrap();
        let warehouse = registry
            .register_part("Invoice", Some("Warehouse".to_string()))
            .unwrap();
        add_api_actions(&mut registry, sales, &["View"]);
        add_api_actions(&mut registry, warehouse, &["View"]);

        registry
            .register_role("Manager", "Invoice", Some("*"), None, "View", "", true)
            .unwrap();

        assert_eq!(registry.parts()[sales].permissions.len(), 1);
        assert_eq!(registry.parts()[warehouse].permissions.len(), 1);
    }

    #[test]
    fn test_register_role_suppresses_duplicate_grants() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["View", "Create"]);

        registry
            .register_role("Manager", "Invoice", None, None, "View,Create", "", true)
            .unwrap();
        registry
            .register_role("Manager", "Invoice", None, None, "View,Create", "", true)
            .unwrap();

        assert_eq!(registry.parts()[index].permissions.len(), 2);
    }

    #[test]
    fn test_register_role_deny_strips_both_flavors() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["Create"]);

        registry
            .register_role("Manager", "Invoice", None, None, "Create", "", true)
            .unwrap();
        registry
            .register_role("Manager", "Invoice", None, None, "Create", "", false)
            .unwrap();
        assert_eq!(registry.parts()[index].permissions.len(), 2);

        registry
            .register_role("Manager", "Invoice", None, None, "", "Create", true)
            .unwrap();
        assert!(registry.parts()[index].permissions.is_empty());
    }

    #[test]
    fn test_register_role_alias_requires_min_role() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["View"]);

        let err = registry
            .register_role(names::ANY_EMPLOYEE, "Invoice", None, None, "View", "", false)
            .unwrap_err();
        assert_eq!(
            err,
            PolicyError::AliasRequiresMinRole(names::ANY_EMPLOYEE.to_string())
        );
    }

    #[test]
    fn test_register_role_alias_is_extern_employee() {
        let mut alias = registry();
        let index = alias.register_part("Invoice", None).unwrap();
        add_api_actions(&mut alias, index, &["View"]);
        alias
            .register_role(names::ANY_EMPLOYEE, "Invoice", None, None, "View", "", true)
            .unwrap();

        let mut concrete = registry();
        let index = concrete.register_part("Invoice", None).unwrap();
        add_api_actions(&mut concrete, index, &["View"]);
        concrete
            .register_role(names::EXTERN_EMPLOYEE, "Invoice", None, None, "View", "", true)
            .unwrap();

        assert_eq!(alias, concrete);
    }

    #[test]
    fn test_is_permitted_min_role() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["Create"]);
        registry
            .register_role("Employee", "Invoice", None, None, "Create", "", true)
            .unwrap();

        assert_eq!(
            registry.is_permitted(&roles(&["Manager"]), "Create", "Invoice", None, None),
            Ok(true)
        );
        assert_eq!(
            registry.is_permitted(&roles(&["ExternEmployee"]), "Create", "Invoice", None, None),
            Ok(false)
        );
        assert_eq!(
            registry.is_permitted(&roles(&[]), "Create", "Invoice", None, None),
            Ok(false)
        );
    }

    #[test]
    fn test_is_permitted_unknown_part_is_not_an_error() {
        let registry = registry();
        assert_eq!(
            registry.is_permitted(&roles(&["Manager"]), "View", "Missing", None, None),
            Ok(false)
        );
    }

    #[test]
    fn test_unknown_role_propagates_instead_of_denying() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["Create"]);
        registry
            .register_role("Employee", "Invoice", None, None, "Create", "", true)
            .unwrap();

        let result = registry.is_permitted(&roles(&["Ghost"]), "Create", "Invoice", None, None);
        assert!(matches!(result, Err(PolicyError::Role(_))));
    }

    #[test]
    fn test_first_match_short_circuits_before_later_errors() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["Create"]);
        registry
            .register_role("Employee", "Invoice", None, None, "Create", "", true)
            .unwrap();

        // "Manager" satisfies the grant before "Ghost" is ever ranked.
        assert_eq!(
            registry.is_permitted(&roles(&["Manager", "Ghost"]), "Create", "Invoice", None, None),
            Ok(true)
        );
    }

    #[test]
    fn test_matching_permissions_keeps_per_role_multiplicity() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["Create"]);
        registry
            .register_role("Employee", "Invoice", None, None, "Create", "", true)
            .unwrap();

        let caller = roles(&["Manager", "Admin"]);
        let matches: Vec<_> = registry
            .matching_permissions(&caller, "Create", "Invoice", None, None)
            .collect();
        // One permission, two qualifying roles, two items.
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_matching_permissions_is_restartable() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        add_api_actions(&mut registry, index, &["Create"]);
        registry
            .register_role("Employee", "Invoice", None, None, "Create", "", true)
            .unwrap();

        let caller = roles(&["Manager"]);
        let first: Vec<_> = registry
            .matching_permissions(&caller, "Create", "Invoice", None, None)
            .collect();
        let second: Vec<_> = registry
            .matching_permissions(&caller, "Create", "Invoice", None, None)
            .collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_group_match_is_exact_even_after_wildcard_config() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", Some("Sales".to_string())).unwrap();
        add_api_actions(&mut registry, index, &["View"]);
        registry
            .register_role("Manager", "Invoice", Some("*"), None, "View", "", true)
            .unwrap();

        assert_eq!(
            registry.is_permitted(&roles(&["Manager"]), "View", "Invoice", Some("Sales"), None),
            Ok(true)
        );
        // The configuration-time group wildcard does not relax query matching.
        assert_eq!(
            registry.is_permitted(&roles(&["Manager"]), "View", "Invoice", None, None),
            Ok(false)
        );
        assert_eq!(
            registry.is_permitted(&roles(&["Manager"]), "View", "Invoice", Some("*"), None),
            Ok(false)
        );
    }

    #[test]
    fn test_view_role_scoping_at_registration() {
        let mut registry = registry();
        let index = registry.register_part("Invoice", None).unwrap();
        {
            let part = registry.part_mut(index).unwrap();
            part.add_action(ViewAction::new("View", Some("Page".to_string()), None));
            part.add_action(ViewAction::new("View", Some("Lookup".to_string()), None));
        }

        registry
            .register_role("Employee", "Invoice", None, Some("Page"), "View", "", true)
            .unwrap();

        // Only the Page-scoped action was granted.
        assert_eq!(registry.parts()[index].permissions.len(), 1);
        assert_eq!(
            registry.is_permitted(&roles(&["Employee"]), "View", "Invoice", None, Some("Page")),
            Ok(true)
        );
        assert_eq!(
            registry.is_permitted(&roles(&["Employee"]), "View", "Invoice", None, Some("Lookup")),
            Ok(false)
        );
    }
}
