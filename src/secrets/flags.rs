//! Secret storage flag bits.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Storage flags attached to each secret field of a connection profile.
    ///
    /// Both storage bits unset means the secret lives in the profile itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SecretFlags: u32 {
        /// A privileged agent persists the secret instead of the profile.
        const AGENT_OWNED = 0x00000001;
        /// The secret is never persisted and is asked for on every activation.
        const NOT_SAVED = 0x00000002;
        /// The secret is not needed to activate the connection.
        const NOT_REQUIRED = 0x00000004;
    }
}

impl Default for SecretFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl SecretFlags {
    /// Bits owned by the storage policy. Everything else is carried over untouched.
    pub const STORAGE: Self = Self::AGENT_OWNED.union(Self::NOT_SAVED);
}
