//! # Verb Expressions
//!
//! A verb expression is a comma-separated list of action names, optionally
//! containing the wildcard `*`, e.g. `"View, Create"` or `"*"`. Expansion
//! turns an expression into a concrete, duplicate-free, exclusion-aware
//! list of verb names scoped to the part the rule applies to.

use crate::error::{PolicyError, PolicyResult};
use crate::parts::Part;
use crate::WILDCARD;

/// Expand a verb expression into an ordered list of verb names.
///
/// Tokens are split on commas and trimmed; empty tokens are skipped, so an
/// empty expression yields an empty list. The wildcard `*` expands — the
/// first time it is encountered — to every action name already declared on
/// `owner`, in declaration order; a second wildcard in the same expression
/// is a no-op. A verb is appended only if it is not already in the result
/// (first occurrence wins) and not listed in `exclude`.
///
/// When building a permit/deny rule pair, expand the deny expression first
/// with no exclusions, then pass the result as `exclude` while expanding
/// the permit expression: a verb can then never land in both lists, and a
/// wildcard permit never re-grants a verb the rule denies.
///
/// # Arguments
///
/// * `owner` - The part whose actions the wildcard expands to; `None` is
///   only valid for expressions without a wildcard
/// * `expression` - The comma-separated verb expression
/// * `exclude` - Verbs to leave out of the result
///
/// # Errors
///
/// [`PolicyError::WildcardWithoutPart`] if the expression contains `*` and
/// `owner` is `None`.
///
/// # Example
///
/// ```
/// use atrium_policy::{verbs, ApiAction, Part};
///
/// let mut part = Part::new("Invoice", None);
/// part.add_action(ApiAction::new("View"));
/// part.add_action(ApiAction::new("Create"));
/// part.add_action(ApiAction::new("Delete"));
///
/// let denied = verbs::expand(Some(&part), "Delete", &[]).unwrap();
/// let permitted = verbs::expand(Some(&part), "*", &denied).unwrap();
/// assert_eq!(permitted, vec!["View", "Create"]);
/// ```
pub fn expand(owner: Option<&Part>, expression: &str, exclude: &[String]) -> PolicyResult<Vec<String>> {
    let mut verbs = Vec::new();
    let mut wildcard_expanded = false;

    for token in expression.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if token == WILDCARD {
            if wildcard_expanded {
                continue;
            }
            let part = owner.ok_or(PolicyError::WildcardWithoutPart)?;
            for name in part.action_names() {
                push_unique(&mut verbs, name, exclude);
            }
            wildcard_expanded = true;
        } else {
            push_unique(&mut verbs, token, exclude);
        }
    }

    Ok(verbs)
}

/// Append `verb` unless it is already present or excluded.
fn push_unique(verbs: &mut Vec<String>, verb: &str, exclude: &[String]) {
    if verbs.iter().any(|v| v == verb) || exclude.iter().any(|v| v == verb) {
        return;
    }
    verbs.push(verb.to_string());
}
