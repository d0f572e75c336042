use std::sync::Arc;

use crate::config::policy_store::PolicyConfigurationStore;

pub mod dto;
pub mod service;

#[derive(Clone)]
pub struct PolicyService {
    policies: Arc<PolicyConfigurationStore>,
}

impl PolicyService {
    pub(crate) fn new(policies: Arc<PolicyConfigurationStore>) -> Self {
        Self { policies }
    }
}
