use crate::{
    context::EditContext,
    error::{Field, ValidationError, ValidationReport},
    profile::{ConnectionProfile, WirelessSecuritySetting},
    secrets::SecretEntry,
};

/// LEAP configured directly on the Wi-Fi security setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapSecurity {
    username: String,
    password: SecretEntry,
}

impl LeapSecurity {
    /// Wrapper filled from the profile's Wi-Fi security setting, if any.
    pub fn from_profile(profile: &ConnectionProfile, ctx: &EditContext) -> Self {
        let mut leap = Self {
            username: String::new(),
            password: SecretEntry::new(ctx.default_policy()),
        };
        if let Some(ws) = profile.wireless_security.as_ref() {
            leap.username = ws.leap_username.clone().unwrap_or_default();
            leap.password.load(None, ws.leap_password_flags);
        }
        leap
    }

    /// User name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sets the user name.
    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
    }

    /// Password control.
    pub fn password(&self) -> &SecretEntry {
        &self.password
    }

    /// Mutable password control.
    pub fn password_mut(&mut self) -> &mut SecretEntry {
        &mut self.password
    }

    /// # Errors
    /// Returns `MissingField` for an empty username or required password.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::MissingField {
                field: Field::Username,
            });
        }
        if !self.password.is_satisfied() {
            return Err(ValidationError::MissingField {
                field: Field::Password,
            });
        }
        Ok(ValidationReport::default())
    }

    /// Writes `key-mgmt = "ieee8021x"` with `auth-alg = "leap"`.
    pub fn serialize(&self, profile: &mut ConnectionProfile) {
        let prior_flags = profile
            .wireless_security
            .as_ref()
            .map(|ws| ws.leap_password_flags)
            .unwrap_or_default();

        let ws = WirelessSecuritySetting {
            auth_alg: Some("leap".to_string()),
            leap_username: Some(self.username.clone()),
            leap_password: self.password.profile_text().map(str::to_string),
            leap_password_flags: self.password.policy().apply_to(prior_flags),
            ..WirelessSecuritySetting::new("ieee8021x")
        };

        profile.replace_wireless_security(ws);
        profile.ieee8021x = None;
    }

    /// Reads the stored password back.
    pub fn load_secrets(&mut self, profile: &ConnectionProfile) {
        if let Some(ws) = profile.wireless_security.as_ref() {
            self.password
                .load(ws.leap_password.as_deref(), ws.leap_password_flags);
        }
    }
}
