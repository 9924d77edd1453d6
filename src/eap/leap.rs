use crate::{
    context::EditContext,
    error::{Field, ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
    secrets::{SecretEntry, StoragePolicy},
};

/// Cisco LEAP run over 802.1x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapMethod {
    username: String,
    password: SecretEntry,
}

impl LeapMethod {
    /// Empty method.
    pub fn new(policy: StoragePolicy) -> Self {
        Self {
            username: String::new(),
            password: SecretEntry::new(policy),
        }
    }

    /// Method filled with the identity and password flags of an 802.1x setting.
    pub fn from_setting(s: Option<&Ieee8021xSetting>, ctx: &EditContext) -> Self {
        let mut method = Self::new(ctx.default_policy());
        if let Some(s) = s {
            method.username = s.identity.clone().unwrap_or_default();
            method.password.load(None, s.password_flags);
        }
        method
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

    /// Writes `eap = ["leap"]`, identity and password.
    pub fn serialize(&self, s: &mut Ieee8021xSetting) {
        s.eap = vec!["leap".to_string()];
        s.identity = Some(self.username.clone());
        s.password_flags = self.password.policy().apply_to(s.password_flags);
        s.password = self.password.profile_text().map(str::to_string);
    }

    /// Reads the stored password back.
    pub fn load_secrets(&mut self, s: &Ieee8021xSetting) {
        self.password.load(s.password.as_deref(), s.password_flags);
    }
}
