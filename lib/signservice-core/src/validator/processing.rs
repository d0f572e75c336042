use time::Duration;

use super::{FieldErrors, field};
use crate::config::core_config::{CacheConfig, ProcessingConfiguration};

pub const MAXIMUM_ALLOWED_CLOCK_SKEW: Duration = Duration::hours(1);
pub const MAXIMUM_RESPONSE_AGE: Duration = Duration::days(1);
pub const MAXIMUM_CACHE_TIME_TO_LIVE: Duration = Duration::days(30);

fn validate_duration(
    value: Duration,
    minimum: Duration,
    maximum: Duration,
    path: &str,
    name: &str,
    errors: &mut FieldErrors,
) {
    if value < minimum || value > maximum {
        errors.add(
            field(path, name),
            format!("must be between {minimum} and {maximum}, got {value}"),
        );
    }
}

pub fn validate_processing_configuration(
    processing: &ProcessingConfiguration,
    path: &str,
    errors: &mut FieldErrors,
) {
    validate_duration(
        processing.allowed_clock_skew,
        Duration::ZERO,
        MAXIMUM_ALLOWED_CLOCK_SKEW,
        path,
        "allowedClockSkew",
        errors,
    );
    validate_duration(
        processing.maximum_allowed_response_age,
        Duration::ZERO,
        MAXIMUM_RESPONSE_AGE,
        path,
        "maximumAllowedResponseAge",
        errors,
    );
}

pub fn validate_cache_configuration(cache: &CacheConfig, path: &str, errors: &mut FieldErrors) {
    validate_duration(
        cache.time_to_live,
        Duration::SECOND,
        MAXIMUM_CACHE_TIME_TO_LIVE,
        path,
        "timeToLive",
        errors,
    );
}
