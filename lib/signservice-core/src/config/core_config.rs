use std::collections::BTreeMap;
use std::path::Path;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
use figment::providers::{Data, Format};
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use shared_types::PolicyName;
use strum::{Display, EnumString};

use super::policy::PolicyConfigurationParams;
use super::{ConfigParsingError, ConfigValidationError};
use crate::validator::FieldErrors;
use crate::validator::processing::{
    validate_cache_configuration, validate_processing_configuration,
};

pub const DEFAULT_POLICY_NAME: &str = "default";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignServiceConfig {
    #[serde(default = "default_policy_name")]
    pub default_policy: PolicyName,
    #[serde(default)]
    pub policies: BTreeMap<PolicyName, PolicyConfigurationParams>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub processing: ProcessingConfiguration,
    #[serde(default)]
    pub signature_validator: SignatureValidatorType,
}

fn default_policy_name() -> PolicyName {
    PolicyName::from(DEFAULT_POLICY_NAME)
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    #[serde_as(as = "DurationSeconds<i64>")]
    pub time_to_live: time::Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            time_to_live: time::Duration::hours(1),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingConfiguration {
    /// Treat soft findings (missing AdES signing time, other invalid signatures
    /// in a signed document) as errors
    #[serde(default)]
    pub strict_processing: bool,
    #[serde_as(as = "DurationSeconds<i64>")]
    #[serde(default = "default_allowed_clock_skew")]
    pub allowed_clock_skew: time::Duration,
    #[serde_as(as = "DurationSeconds<i64>")]
    #[serde(default = "default_maximum_allowed_response_age")]
    pub maximum_allowed_response_age: time::Duration,
}

fn default_allowed_clock_skew() -> time::Duration {
    time::Duration::seconds(60)
}

fn default_maximum_allowed_response_age() -> time::Duration {
    time::Duration::seconds(180)
}

impl Default for ProcessingConfiguration {
    fn default() -> Self {
        Self {
            strict_processing: false,
            allowed_clock_skew: default_allowed_clock_skew(),
            maximum_allowed_response_age: default_maximum_allowed_response_age(),
        }
    }
}

/// Statically selected validation strategy for produced signatures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureValidatorType {
    /// Signature must validate and be made by the expected certificate
    #[default]
    Basic,
    /// Additionally the AdES signing certificate digest must match the signer certificate
    Extended,
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl SignServiceConfig {
    /// Checks the cache and processing settings, policies are validated by the
    /// policy store
    pub fn validate_settings(&self) -> Result<(), ConfigValidationError> {
        let mut errors = FieldErrors::default();
        validate_cache_configuration(&self.cache, "cache", &mut errors);
        validate_processing_configuration(&self.processing, "processing", &mut errors);
        errors
            .into_result()
            .map_err(|errors| ConfigValidationError::InvalidSettings { errors })
    }

    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            #[cfg(feature = "config_yaml")]
            if path
                .as_ref()
                .extension()
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
            {
                inputs.push(InputFormat::Yaml(Yaml::file(path)));
                continue;
            }

            #[cfg(feature = "config_json")]
            if path.as_ref().extension() == Some("json".as_ref()) {
                inputs.push(InputFormat::Json(Json::file(path)));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {:?}",
                path.as_ref().to_str()
            )));
        }

        SignServiceConfig::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        let inputs = configs
            .into_iter()
            .map(|s| Yaml::string(s.as_ref()))
            .map(InputFormat::Yaml);

        SignServiceConfig::parse(inputs)
    }

    pub fn parse(
        inputs: impl IntoIterator<Item = InputFormat>,
    ) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("SIGNSERVICE_").split("__").lowercase(false));
        }

        figment
            .extract::<SignServiceConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))
    }
}
