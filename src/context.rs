use std::fmt;

use crate::{config::SecretsConfig, profile::ConnectionProfile, secrets::StoragePolicy};

/// Link type a method is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    /// Wired Ethernet.
    Wired,
    /// Wi-Fi.
    Wireless,
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medium::Wired => write!(f, "wired"),
            Medium::Wireless => write!(f, "wireless"),
        }
    }
}

/// Facts about the edit session every method and wrapper needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContext {
    /// UUID of the profile being edited.
    pub connection_uuid: String,
    /// The profile has never been saved.
    pub new_connection: bool,
    /// Storage policy given to secret fields of a new connection.
    pub new_secret_policy: StoragePolicy,
    /// Whether new 802.1x connections also trust the system CA store.
    pub system_ca_certs: bool,
    /// Link type of the profile.
    pub medium: Medium,
}

impl EditContext {
    /// Context for editing `profile` with the given secret defaults.
    pub fn for_profile(
        profile: &ConnectionProfile,
        secrets: &SecretsConfig,
        new_connection: bool,
    ) -> Self {
        Self {
            connection_uuid: profile.uuid().to_string(),
            new_connection,
            new_secret_policy: secrets.new_connection_policy,
            system_ca_certs: secrets.system_ca_certs,
            medium: if profile.is_wireless() {
                Medium::Wireless
            } else {
                Medium::Wired
            },
        }
    }

    /// Policy for a secret field that has no stored flags to go by.
    pub fn default_policy(&self) -> StoragePolicy {
        if self.new_connection {
            self.new_secret_policy
        } else {
            StoragePolicy::Stored
        }
    }
}
