use std::collections::BTreeMap;

use shared_types::PolicyName;

use super::ConfigValidationError;
use super::policy::PolicyConfigurationParams;

/// Resolves parent policy inheritance for all configured policies.
///
/// Every policy with a parent gets each unset field from the nearest ancestor
/// defining it. Cycles and unknown parents fail the whole merge.
pub(super) fn merge_policies(
    sources: &BTreeMap<PolicyName, PolicyConfigurationParams>,
) -> Result<BTreeMap<PolicyName, PolicyConfigurationParams>, ConfigValidationError> {
    let mut merged = BTreeMap::new();
    for name in sources.keys() {
        let mut path = Vec::new();
        let policy = merge_policy(name, sources, &mut merged, &mut path)?;
        merged.insert(name.to_owned(), policy);
    }
    Ok(merged)
}

fn merge_policy(
    name: &PolicyName,
    sources: &BTreeMap<PolicyName, PolicyConfigurationParams>,
    merged: &mut BTreeMap<PolicyName, PolicyConfigurationParams>,
    path: &mut Vec<PolicyName>,
) -> Result<PolicyConfigurationParams, ConfigValidationError> {
    if path.contains(name) {
        path.push(name.to_owned());
        return Err(ConfigValidationError::CircularParentPolicy {
            path: path.to_owned(),
        });
    }

    if let Some(done) = merged.get(name) {
        return Ok(done.to_owned());
    }

    let Some(source) = sources.get(name) else {
        return Err(ConfigValidationError::MissingParentPolicy {
            policy: path.last().cloned().unwrap_or_default(),
            parent: name.to_owned(),
        });
    };

    let Some(parent_name) = &source.parent_policy else {
        return Ok(source.to_owned());
    };

    path.push(name.to_owned());
    let parent = merge_policy(parent_name, sources, merged, path)?;
    path.pop();

    tracing::debug!("Policy `{name}` inherits from `{parent_name}`");
    let policy = source.to_owned().merge_with_parent(&parent);
    merged.insert(name.to_owned(), policy.clone());
    Ok(policy)
}
