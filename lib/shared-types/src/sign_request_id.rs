use serde::{Deserialize, Serialize};

use crate::macros::{impl_new_random, impls_for_string_newtype};

/// Identifier of a single sign request, shared by the protocol message, the
/// relay state and the stateful session cache key.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct SignRequestId(String);

impls_for_string_newtype!(SignRequestId);
impl_new_random!(SignRequestId);
