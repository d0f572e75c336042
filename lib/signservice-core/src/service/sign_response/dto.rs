use serde::{Deserialize, Serialize};

use crate::config::core_config::ProcessingConfiguration;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResponseProcessingParameters {
    /// Overrides the configured processing settings for this response
    pub processing_configuration: Option<ProcessingConfiguration>,
}
