use std::fmt;

use tracing::debug;

use crate::{
    context::EditContext,
    error::{SelectionError, ValidationError, ValidationReport},
    profile::{ConnectionProfile, WepKeyType, WirelessSecuritySetting},
    secrets::SecretEntry,
};

/// Number of WEP key slots.
pub const WEP_KEY_SLOTS: usize = 4;

/// WEP authentication algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WepAuthAlg {
    /// Open System.
    #[default]
    Open,
    /// Shared Key.
    Shared,
}

impl WepAuthAlg {
    /// Value of the profile's `auth-alg` key.
    pub fn profile_value(self) -> &'static str {
        match self {
            WepAuthAlg::Open => "open",
            WepAuthAlg::Shared => "shared",
        }
    }
}

impl fmt::Display for WepAuthAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WepAuthAlg::Open => write!(f, "Open System"),
            WepAuthAlg::Shared => write!(f, "Shared Key"),
        }
    }
}

/// Checks a WEP key against the rules of its key type.
///
/// Raw keys are 5 or 13 printable ASCII characters, or 10 or 26 hex digits.
/// Passphrases hold 1 to 64 characters.
///
/// # Errors
/// Returns the length or charset error the key violates.
pub fn validate_wep_key(key: &str, key_type: WepKeyType) -> Result<(), ValidationError> {
    let len = key.chars().count();
    match key_type {
        WepKeyType::Key => {
            let charset_ok = match len {
                5 | 13 => key.chars().all(|c| c.is_ascii_graphic() || c == ' '),
                10 | 26 => key.chars().all(|c| c.is_ascii_hexdigit()),
                _ => return Err(ValidationError::KeyLengthInvalid { len }),
            };
            if charset_ok {
                Ok(())
            } else {
                Err(ValidationError::KeyCharsetInvalid)
            }
        }
        WepKeyType::Passphrase if (1..=64).contains(&len) => Ok(()),
        WepKeyType::Passphrase => Err(ValidationError::PassphraseLengthInvalid { len }),
    }
}

/// Static WEP with four key slots sharing one storage policy.
///
/// Only the selected slot is shown; its text lives in `entry` while the other
/// slots keep theirs in `keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WepSecurity {
    key_type: WepKeyType,
    auth_alg: WepAuthAlg,
    adhoc: bool,
    index: usize,
    keys: [String; WEP_KEY_SLOTS],
    entry: SecretEntry,
}

impl WepSecurity {
    /// Wrapper filled from the profile's Wi-Fi security setting, if any.
    pub fn from_profile(
        key_type: WepKeyType,
        profile: &ConnectionProfile,
        ctx: &EditContext,
    ) -> Self {
        let mut wep = Self {
            key_type,
            auth_alg: WepAuthAlg::Open,
            adhoc: profile.is_adhoc(),
            index: 0,
            keys: Default::default(),
            entry: SecretEntry::new(ctx.default_policy()),
        };

        if let Some(ws) = profile.wireless_security.as_ref()
            && ws.key_mgmt == "none"
        {
            wep.index = usize::try_from(ws.wep_tx_keyidx)
                .ok()
                .filter(|i| *i < WEP_KEY_SLOTS)
                .unwrap_or(0);
            if !wep.adhoc && ws.auth_alg.as_deref() == Some("shared") {
                wep.auth_alg = WepAuthAlg::Shared;
            }
            wep.entry.load(None, ws.wep_key_flags);
        }
        wep
    }

    /// How keys are interpreted.
    pub fn key_type(&self) -> WepKeyType {
        self.key_type
    }

    /// Authentication algorithm. Always open on Ad-Hoc networks.
    pub fn auth_alg(&self) -> WepAuthAlg {
        if self.adhoc {
            WepAuthAlg::Open
        } else {
            self.auth_alg
        }
    }

    /// Whether the algorithm selector is shown.
    pub fn auth_alg_selectable(&self) -> bool {
        !self.adhoc
    }

    /// Picks the algorithm. Ignored on Ad-Hoc networks.
    pub fn set_auth_alg(&mut self, alg: WepAuthAlg) {
        if !self.adhoc {
            self.auth_alg = alg;
        }
    }

    /// Selected transmit slot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Switches the visible slot, stashing the current text in its own slot.
    ///
    /// # Errors
    /// Returns `NotOffered` for a slot past the fourth.
    pub fn select_index(&mut self, index: usize) -> Result<(), SelectionError> {
        if index >= WEP_KEY_SLOTS {
            return Err(SelectionError::NotOffered {
                choice: format!("key {}", index + 1),
                menu: "WEP key index".to_string(),
            });
        }
        self.keys[self.index] = self.entry.text().to_string();
        self.index = index;
        let text = std::mem::take(&mut self.keys[index]);
        self.entry.set_text(text);
        debug!(index, "selected WEP key slot");
        Ok(())
    }

    /// Control showing the selected slot.
    pub fn key(&self) -> &SecretEntry {
        &self.entry
    }

    /// Mutable control showing the selected slot.
    pub fn key_mut(&mut self) -> &mut SecretEntry {
        &mut self.entry
    }

    /// Text of `slot`, reading the visible control for the selected one.
    pub fn slot(&self, slot: usize) -> Option<&str> {
        if slot == self.index {
            Some(self.entry.text())
        } else {
            self.keys.get(slot).map(String::as_str)
        }
    }

    /// The wrapper is Ad-Hoc capable.
    pub fn adhoc_compatible(&self) -> bool {
        true
    }

    /// Checks the visible key. Nothing is checked for not-saved keys.
    ///
    /// # Errors
    /// Returns the key's length or charset error.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        if self.entry.policy().persists_text() {
            validate_wep_key(self.entry.text(), self.key_type)?;
        }
        Ok(ValidationReport::default())
    }

    /// Writes `key-mgmt = "none"`, the key slots and their shared flags.
    pub fn serialize(&self, profile: &mut ConnectionProfile) {
        let prior_flags = profile
            .wireless_security
            .as_ref()
            .map(|ws| ws.wep_key_flags)
            .unwrap_or_default();
        let adhoc = self.adhoc || profile.is_adhoc();

        let mut ws = WirelessSecuritySetting::new("none");
        ws.wep_tx_keyidx = u32::try_from(self.index).unwrap_or(0);
        let auth_alg = if adhoc { WepAuthAlg::Open } else { self.auth_alg };
        ws.auth_alg = Some(auth_alg.profile_value().to_string());
        ws.wep_key_type = Some(self.key_type);
        ws.wep_key_flags = self.entry.policy().apply_to(prior_flags);

        if self.entry.policy().persists_text() {
            for slot in 0..WEP_KEY_SLOTS {
                let key = self.slot(slot).filter(|k| !k.is_empty());
                ws.set_wep_key(slot, key.map(str::to_string));
            }
        }

        profile.replace_wireless_security(ws);
        profile.ieee8021x = None;
    }

    /// Reads stored keys back into the slots.
    pub fn load_secrets(&mut self, profile: &ConnectionProfile) {
        let Some(ws) = profile.wireless_security.as_ref() else {
            return;
        };
        for (slot, key) in self.keys.iter_mut().enumerate() {
            *key = ws.wep_key(slot).unwrap_or_default().to_string();
        }
        let visible = std::mem::take(&mut self.keys[self.index]);
        self.entry.load(Some(&visible), ws.wep_key_flags);
    }
}
