use crate::{
    context::EditContext,
    error::{ValidationError, ValidationReport},
    profile::{ConnectionProfile, WirelessSecuritySetting},
    secrets::SecretEntry,
};

/// Checks a WPA pre-shared key.
///
/// 8 to 63 characters are a passphrase; exactly 64 must be a hex key.
///
/// # Errors
/// Returns `PassphraseLengthInvalid` or `PassphraseCharsetInvalid`.
pub fn validate_psk(psk: &str) -> Result<(), ValidationError> {
    let len = psk.len();
    if !(8..=64).contains(&len) {
        return Err(ValidationError::PassphraseLengthInvalid { len });
    }
    if len == 64 && !psk.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::PassphraseCharsetInvalid);
    }
    Ok(())
}

/// Personal security with a single shared secret: WPA/WPA2 PSK or WPA3 SAE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PskSecurity {
    sae: bool,
    psk: SecretEntry,
}

impl PskSecurity {
    /// Wrapper filled from the profile's Wi-Fi security setting, if any.
    pub fn from_profile(sae: bool, profile: &ConnectionProfile, ctx: &EditContext) -> Self {
        let mut psk = SecretEntry::new(ctx.default_policy());
        if let Some(ws) = profile.wireless_security.as_ref() {
            psk.load(None, ws.psk_flags);
        }
        Self { sae, psk }
    }

    /// Whether this is the WPA3 variant.
    pub fn is_sae(&self) -> bool {
        self.sae
    }

    /// Key control.
    pub fn psk(&self) -> &SecretEntry {
        &self.psk
    }

    /// Mutable key control.
    pub fn psk_mut(&mut self) -> &mut SecretEntry {
        &mut self.psk
    }

    /// WPA personal can run Ad-Hoc; SAE cannot.
    pub fn adhoc_compatible(&self) -> bool {
        !self.sae
    }

    /// # Errors
    /// Returns the key's length or charset error unless it is not saved.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        if self.psk.policy().persists_text() {
            validate_psk(self.psk.text())?;
        }
        Ok(ValidationReport::default())
    }

    /// Writes the key management, the key and its flags.
    ///
    /// Ad-Hoc WPA pins the protocol to WPA with TKIP group keys.
    pub fn serialize(&self, profile: &mut ConnectionProfile) {
        let prior_flags = profile
            .wireless_security
            .as_ref()
            .map(|ws| ws.psk_flags)
            .unwrap_or_default();

        let mut ws = if self.sae {
            WirelessSecuritySetting::new("sae")
        } else if profile.is_adhoc() {
            WirelessSecuritySetting {
                proto: vec!["wpa".to_string()],
                pairwise: vec!["none".to_string()],
                group: vec!["tkip".to_string()],
                ..WirelessSecuritySetting::new("wpa-none")
            }
        } else {
            WirelessSecuritySetting::new("wpa-psk")
        };
        ws.psk = self.psk.profile_text().map(str::to_string);
        ws.psk_flags = self.psk.policy().apply_to(prior_flags);

        profile.replace_wireless_security(ws);
        profile.ieee8021x = None;
    }

    /// Reads the stored key back.
    pub fn load_secrets(&mut self, profile: &ConnectionProfile) {
        if let Some(ws) = profile.wireless_security.as_ref() {
            self.psk.load(ws.psk.as_deref(), ws.psk_flags);
        }
    }
}
