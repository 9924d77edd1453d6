use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::secrets::StoragePolicy;

/// Defaults applied to secret fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SecretsConfig {
    /// Storage policy given to every secret field of a connection that has
    /// never been saved.
    #[serde(default = "default_new_connection_policy")]
    pub new_connection_policy: StoragePolicy,

    /// Whether new 802.1x connections also trust the system CA store.
    #[serde(default = "default_system_ca_certs")]
    pub system_ca_certs: bool,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            new_connection_policy: default_new_connection_policy(),
            system_ca_certs: default_system_ca_certs(),
        }
    }
}

fn default_new_connection_policy() -> StoragePolicy {
    StoragePolicy::AgentOwned
}

fn default_system_ca_certs() -> bool {
    true
}
