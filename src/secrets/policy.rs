use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SecretEntry, SecretFlags};

/// How a secret is persisted once the profile is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StoragePolicy {
    /// Written into the profile.
    #[default]
    Stored,

    /// Handed to the privileged secret agent, which persists it.
    AgentOwned,

    /// Never persisted. The user is asked every time.
    NotSaved,
}

impl StoragePolicy {
    /// Derives the policy from a profile's flag bits.
    ///
    /// `NOT_SAVED` wins over `AGENT_OWNED` when both are present.
    pub fn from_flags(flags: SecretFlags) -> Self {
        if flags.contains(SecretFlags::NOT_SAVED) {
            Self::NotSaved
        } else if flags.contains(SecretFlags::AGENT_OWNED) {
            Self::AgentOwned
        } else {
            Self::Stored
        }
    }

    /// The storage bits this policy stands for.
    pub fn flags(self) -> SecretFlags {
        match self {
            Self::Stored => SecretFlags::empty(),
            Self::AgentOwned => SecretFlags::AGENT_OWNED,
            Self::NotSaved => SecretFlags::NOT_SAVED,
        }
    }

    /// Merges this policy into previously stored flags.
    ///
    /// Only the storage bits are replaced; unrelated bits such as
    /// `NOT_REQUIRED` survive.
    pub fn apply_to(self, prior: SecretFlags) -> SecretFlags {
        prior.difference(SecretFlags::STORAGE).union(self.flags())
    }

    /// Whether plaintext for this policy may be written or pre-filled.
    pub fn persists_text(self) -> bool {
        self != Self::NotSaved
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoragePolicy::Stored => write!(f, "stored"),
            StoragePolicy::AgentOwned => write!(f, "agent-owned"),
            StoragePolicy::NotSaved => write!(f, "not-saved"),
        }
    }
}

/// Reads the storage flags selected on a secret control.
pub fn storage_policy_from_ui(entry: &SecretEntry) -> SecretFlags {
    entry.policy().flags()
}

/// Pushes stored flags onto a secret control.
///
/// Moving the control into not-saved erases its text and forces the reveal
/// toggle off.
pub fn apply_policy_to_ui(flags: SecretFlags, entry: &mut SecretEntry) {
    entry.set_policy(StoragePolicy::from_flags(flags));
}
