use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::ca::CaCertField;
use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{Field, ValidationError, ValidationReport, ValidationWarning},
    material::{
        MaterialFormat, MaterialPurpose, is_encrypted_private_key, private_key_format,
        validate_material,
    },
    profile::{CertRef, Ieee8021xSetting},
    secrets::{SecretEntry, StoragePolicy},
};

/// Certificate based EAP-TLS.
///
/// A PKCS#12 private key carries its own certificate, so picking one clears
/// and disables the separate user certificate chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsMethod {
    phase2: bool,
    identity: String,
    ca: CaCertField,
    client_cert: Option<PathBuf>,
    client_cert_enabled: bool,
    private_key: Option<PathBuf>,
    key_password: SecretEntry,
}

impl TlsMethod {
    /// Empty method for the outer phase or, with `phase2`, inside a tunnel.
    pub fn new(phase2: bool, policy: StoragePolicy) -> Self {
        Self {
            phase2,
            identity: String::new(),
            ca: CaCertField::new(phase2),
            client_cert: None,
            client_cert_enabled: true,
            private_key: None,
            key_password: SecretEntry::new(policy),
        }
    }

    /// Method filled from an 802.1x setting.
    pub fn from_setting(
        phase2: bool,
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        let mut method = Self::new(phase2, ctx.default_policy());
        method.ca = CaCertField::from_profile(s, phase2, ctx, store);

        let Some(s) = s else {
            return method;
        };

        method.identity = s.identity.clone().unwrap_or_default();
        let (client, key, flags) = if phase2 {
            (
                &s.phase2_client_cert,
                &s.phase2_private_key,
                s.phase2_private_key_password_flags,
            )
        } else {
            (&s.client_cert, &s.private_key, s.private_key_password_flags)
        };
        method.key_password.load(None, flags);
        method.client_cert = client.as_ref().map(|c| c.path.clone());
        if let Some(key) = key {
            method.private_key = Some(key.path.clone());
            method.client_cert_enabled = key.format != MaterialFormat::Pkcs12;
        }
        method
    }

    /// Whether this runs inside a tunnel.
    pub fn is_phase2(&self) -> bool {
        self.phase2
    }

    /// User identity.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Sets the user identity.
    pub fn set_identity(&mut self, identity: &str) {
        self.identity = identity.to_string();
    }

    /// CA certificate chooser.
    pub fn ca(&self) -> &CaCertField {
        &self.ca
    }

    /// Mutable CA certificate chooser.
    pub fn ca_mut(&mut self) -> &mut CaCertField {
        &mut self.ca
    }

    /// Selected user certificate.
    pub fn client_cert(&self) -> Option<&Path> {
        self.client_cert.as_deref()
    }

    /// Whether the user certificate chooser is usable.
    pub fn client_cert_enabled(&self) -> bool {
        self.client_cert_enabled
    }

    /// Selects the user certificate. Ignored while a PKCS#12 key supplies it.
    pub fn set_client_cert(&mut self, path: Option<PathBuf>) {
        if !self.client_cert_enabled {
            debug!("user certificate chooser disabled, selection ignored");
            return;
        }
        self.client_cert = path;
    }

    /// Selected private key.
    pub fn private_key(&self) -> Option<&Path> {
        self.private_key.as_deref()
    }

    /// Private key password control.
    pub fn key_password(&self) -> &SecretEntry {
        &self.key_password
    }

    /// Mutable private key password control.
    pub fn key_password_mut(&mut self) -> &mut SecretEntry {
        &mut self.key_password
    }

    /// Selects the private key.
    ///
    /// A PKCS#12 key clears and disables the user certificate; anything else
    /// enables it again. Returns a warning for a key stored without a password.
    pub fn set_private_key(&mut self, path: Option<PathBuf>) -> Option<ValidationWarning> {
        let format = path.as_deref().and_then(private_key_format);
        self.private_key = path;

        if format == Some(MaterialFormat::Pkcs12) {
            debug!("PKCS#12 key selected, user certificate superseded");
            self.client_cert = None;
            self.client_cert_enabled = false;
            return None;
        }
        self.client_cert_enabled = true;

        let key = self.private_key.as_deref()?;
        (format.is_some() && !is_encrypted_private_key(key)).then(|| {
            ValidationWarning::UnencryptedPrivateKey {
                path: key.to_path_buf(),
            }
        })
    }

    /// Identity, then CA, then private key and its password, then the user
    /// certificate unless the key is PKCS#12.
    ///
    /// # Errors
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        let mut report = ValidationReport::default();

        if self.identity.is_empty() {
            return Err(ValidationError::MissingField {
                field: Field::Identity,
            });
        }

        self.ca.validate(&mut report)?;

        let key = validate_material(
            self.private_key(),
            MaterialPurpose::PrivateKey,
            Some(&self.key_password),
        )?
        .ok_or(ValidationError::MissingFile {
            field: Field::PrivateKey,
        })?;
        if key.is_unencrypted_key(MaterialPurpose::PrivateKey) {
            report.warn(ValidationWarning::UnencryptedPrivateKey {
                path: key.path.clone(),
            });
        }

        if key.format != MaterialFormat::Pkcs12 {
            validate_material(self.client_cert(), MaterialPurpose::ClientCert, None)?;
        }

        Ok(report)
    }

    /// Writes identity, key, user certificate and CA, recording the CA-ignore decision.
    pub fn serialize(&self, s: &mut Ieee8021xSetting, ctx: &EditContext, store: &CaIgnoreStore) {
        if self.phase2 {
            s.phase2_auth = Some("tls".to_string());
            s.phase2_autheap = None;
        } else {
            s.eap = vec!["tls".to_string()];
        }
        s.identity = Some(self.identity.clone());

        let key = match validate_material(self.private_key(), MaterialPurpose::PrivateKey, None) {
            Ok(key) => key.map(CertRef::from),
            Err(e) => {
                warn!(error = %e, "couldn't write private key");
                None
            }
        };
        let pkcs12 = key.as_ref().is_some_and(|k| k.format == MaterialFormat::Pkcs12);

        let client = if pkcs12 {
            key.clone()
        } else {
            match validate_material(self.client_cert(), MaterialPurpose::ClientCert, None) {
                Ok(cert) => cert.map(CertRef::from),
                Err(e) => {
                    warn!(error = %e, "couldn't write user certificate");
                    None
                }
            }
        };

        let password = self.key_password.profile_text().map(str::to_string);
        let policy = self.key_password.policy();
        if self.phase2 {
            s.phase2_private_key = key;
            s.phase2_client_cert = client;
            s.phase2_private_key_password_flags =
                policy.apply_to(s.phase2_private_key_password_flags);
            s.phase2_private_key_password = password;
        } else {
            s.private_key = key;
            s.client_cert = client;
            s.private_key_password_flags = policy.apply_to(s.private_key_password_flags);
            s.private_key_password = password;
        }

        self.ca.serialize(s, ctx, store);
    }

    /// Reads the stored private key password back.
    pub fn load_secrets(&mut self, s: &Ieee8021xSetting) {
        if self.phase2 {
            self.key_password.load(
                s.phase2_private_key_password.as_deref(),
                s.phase2_private_key_password_flags,
            );
        } else {
            self.key_password
                .load(s.private_key_password.as_deref(), s.private_key_password_flags);
        }
    }
}
