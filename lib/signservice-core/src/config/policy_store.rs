use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::PolicyName;

use super::ConfigValidationError;
use super::merge::merge_policies;
use super::policy::{PolicyConfiguration, PolicyConfigurationParams, resolve_policy};

/// Immutable set of resolved policy configurations, built once at startup.
#[derive(Debug)]
pub struct PolicyConfigurationStore {
    policies: BTreeMap<PolicyName, Arc<PolicyConfiguration>>,
    default_policy: PolicyName,
}

impl PolicyConfigurationStore {
    pub fn new(
        sources: &BTreeMap<PolicyName, PolicyConfigurationParams>,
        default_policy: PolicyName,
    ) -> Result<Self, ConfigValidationError> {
        if sources.is_empty() {
            return Err(ConfigValidationError::NoPolicies);
        }

        let merged = merge_policies(sources)?;

        let mut policies = BTreeMap::new();
        let mut errors = vec![];
        for (name, params) in merged {
            match resolve_policy(&name, params) {
                Ok(policy) => {
                    policies.insert(name, Arc::new(policy));
                }
                Err(policy_errors) => errors.extend(policy_errors),
            }
        }
        if !errors.is_empty() {
            return Err(ConfigValidationError::InvalidPolicies { errors });
        }

        if !policies.contains_key(&default_policy) {
            return Err(ConfigValidationError::MissingDefaultPolicy(default_policy));
        }

        tracing::info!(
            "Loaded {} policies, default policy `{default_policy}`",
            policies.len()
        );

        Ok(Self {
            policies,
            default_policy,
        })
    }

    pub fn resolve(&self, policy: &PolicyName) -> Option<Arc<PolicyConfiguration>> {
        self.policies.get(policy).cloned()
    }

    pub fn list_policies(&self) -> Vec<PolicyName> {
        self.policies.keys().cloned().collect()
    }

    pub fn default_policy_name(&self) -> &PolicyName {
        &self.default_policy
    }
}
