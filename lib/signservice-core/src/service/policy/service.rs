use shared_types::PolicyName;

use super::PolicyService;
use super::dto::PolicyConfigurationDTO;
use crate::service::error::ServiceError;

impl PolicyService {
    pub fn get_configuration(
        &self,
        policy: &PolicyName,
    ) -> Result<PolicyConfigurationDTO, ServiceError> {
        let configuration = self
            .policies
            .resolve(policy)
            .ok_or_else(|| ServiceError::PolicyNotFound(policy.to_owned()))?;

        Ok(configuration.as_ref().to_owned().into())
    }

    pub fn get_policies(&self) -> Vec<PolicyName> {
        self.policies.list_policies()
    }

    pub fn get_default_policy(&self) -> PolicyName {
        self.policies.default_policy_name().to_owned()
    }
}
