use std::fmt;

use tracing::debug;

use super::{SecretFlags, StoragePolicy};

/// A password-style field together with its storage policy and reveal toggle.
///
/// Models the secret control an editor shows next to every credential. The
/// text is never exposed through `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretEntry {
    text: String,
    policy: StoragePolicy,
    show: bool,
}

impl fmt::Debug for SecretEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.text.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("SecretEntry")
            .field("text", &text)
            .field("policy", &self.policy)
            .field("show", &self.show)
            .finish()
    }
}

impl SecretEntry {
    /// Creates an empty entry under `policy`.
    pub fn new(policy: StoragePolicy) -> Self {
        Self {
            text: String::new(),
            policy,
            show: false,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. Ignored while the policy is not-saved.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if !self.policy.persists_text() {
            debug!("ignoring text for a not-saved secret");
            return;
        }
        self.text = text.into();
    }

    /// Selected storage policy.
    pub fn policy(&self) -> StoragePolicy {
        self.policy
    }

    /// Changes the storage policy, erasing text when entering not-saved.
    pub fn set_policy(&mut self, policy: StoragePolicy) {
        self.policy = policy;
        if !policy.persists_text() {
            self.text.clear();
            self.show = false;
        }
    }

    /// Whether the text is revealed.
    pub fn show_password(&self) -> bool {
        self.show
    }

    /// Toggles revealing the text. Always off while the policy is not-saved.
    pub fn set_show_password(&mut self, show: bool) {
        self.show = show && self.policy.persists_text();
    }

    /// Whether the entry holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the entry satisfies a "password required" rule.
    pub fn is_satisfied(&self) -> bool {
        !self.policy.persists_text() || !self.text.is_empty()
    }

    /// Text to write into a profile, if any may be written.
    pub fn profile_text(&self) -> Option<&str> {
        if self.policy.persists_text() && !self.text.is_empty() {
            Some(&self.text)
        } else {
            None
        }
    }

    /// Fills the entry from stored flags and a stored secret.
    pub fn load(&mut self, text: Option<&str>, flags: SecretFlags) {
        self.set_policy(StoragePolicy::from_flags(flags));
        if let Some(text) = text {
            self.set_text(text);
        }
    }
}
