//! Validation outcomes shared by every method and wrapper.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::{ca_ignore::CaIgnoreError, material::MaterialPurpose};

/// Editor field a validation problem points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// 802.1x identity.
    Identity,
    /// Outer (anonymous) identity of a tunnel.
    AnonymousIdentity,
    /// User name of a password method.
    Username,
    /// Password of a password method.
    Password,
    /// CA certificate chooser.
    CaCert,
    /// Client certificate chooser.
    ClientCert,
    /// Private key chooser.
    PrivateKey,
    /// Private key password.
    PrivateKeyPassword,
    /// PAC file chooser.
    PacFile,
    /// WEP key entry.
    WepKey,
    /// WPA pre-shared key entry.
    Psk,
    /// Network name.
    Ssid,
    /// Security type selector.
    Security,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Identity => "identity",
            Field::AnonymousIdentity => "anonymous identity",
            Field::Username => "username",
            Field::Password => "password",
            Field::CaCert => "CA certificate",
            Field::ClientCert => "user certificate",
            Field::PrivateKey => "private key",
            Field::PrivateKeyPassword => "private key password",
            Field::PacFile => "PAC file",
            Field::WepKey => "WEP key",
            Field::Psk => "password",
            Field::Ssid => "SSID",
            Field::Security => "security",
        };
        f.write_str(name)
    }
}

/// A user-input problem that blocks saving.
///
/// `validate` stops at the first one so the editor can focus [`ValidationError::field`].
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required text field is empty
    #[error("{field} is required")]
    MissingField {
        /// The empty field
        field: Field,
    },

    /// A certificate or key is unparseable or the wrong container for its slot
    #[error("invalid {purpose} '{path}': {reason}")]
    InvalidFormat {
        /// Slot the file was chosen for
        purpose: MaterialPurpose,
        /// File that was rejected
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A required file chooser has nothing selected
    #[error("no {field} selected")]
    MissingFile {
        /// The empty chooser
        field: Field,
    },

    /// A file is selected but cannot be opened
    #[error("cannot read {field} '{path}': {details}")]
    UnreadableFile {
        /// Chooser holding the path
        field: Field,
        /// Path as selected
        path: PathBuf,
        /// Underlying I/O failure
        details: String,
    },

    /// A password is needed and none was given
    #[error("{field} is required")]
    PasswordRequired {
        /// The empty password field
        field: Field,
    },

    /// WEP key has an impossible length
    #[error("WEP key length {len} is invalid")]
    KeyLengthInvalid {
        /// Length in characters
        len: usize,
    },

    /// WEP key contains characters its length does not allow
    #[error("WEP key contains invalid characters")]
    KeyCharsetInvalid,

    /// Passphrase is too short or too long
    #[error("passphrase length {len} is invalid")]
    PassphraseLengthInvalid {
        /// Length of the passphrase
        len: usize,
    },

    /// A 64-character pre-shared key is not hexadecimal
    #[error("64-character pre-shared key must be hexadecimal")]
    PassphraseCharsetInvalid,

    /// Wireless profile without a network name
    #[error("SSID is required")]
    MissingSsid,

    /// Security type cannot be used on an Ad-Hoc network
    #[error("{kind} is not available in Ad-Hoc mode")]
    AdhocIncompatible {
        /// Display name of the rejected security type
        kind: String,
    },
}

impl ValidationError {
    /// Field the editor should focus for this error.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::MissingFile { field }
            | ValidationError::UnreadableFile { field, .. }
            | ValidationError::PasswordRequired { field } => *field,
            ValidationError::InvalidFormat { purpose, .. } => purpose.field(),
            ValidationError::KeyLengthInvalid { .. } | ValidationError::KeyCharsetInvalid => {
                Field::WepKey
            }
            ValidationError::PassphraseLengthInvalid { .. }
            | ValidationError::PassphraseCharsetInvalid => Field::Psk,
            ValidationError::MissingSsid => Field::Ssid,
            ValidationError::AdhocIncompatible { .. } => Field::Security,
        }
    }
}

/// A problem worth telling the user about that does not block saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The chosen private key is stored without a password.
    UnencryptedPrivateKey {
        /// Key file
        path: PathBuf,
    },

    /// No CA certificate is chosen and the connection has not opted out of CA checks.
    MissingCaCertificate {
        /// Whether the missing certificate belongs to the inner phase
        phase2: bool,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::UnencryptedPrivateKey { path } => write!(
                f,
                "private key '{}' is not password protected",
                path.display()
            ),
            ValidationWarning::MissingCaCertificate { phase2: false } => {
                write!(f, "no CA certificate chosen")
            }
            ValidationWarning::MissingCaCertificate { phase2: true } => {
                write!(f, "no inner CA certificate chosen")
            }
        }
    }
}

/// Result of a successful validation: the warnings gathered on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Records a warning.
    pub fn warn(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Appends the warnings of a nested validation.
    pub fn merge(&mut self, other: ValidationReport) {
        self.warnings.extend(other.warnings);
    }

    /// Warnings gathered so far.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Whether nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Picking an entry a menu does not offer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Method missing from the menu of the current tunnel or medium
    #[error("{choice} is not offered by {menu}")]
    NotOffered {
        /// What was asked for
        choice: String,
        /// The menu that was asked
        menu: String,
    },
}

/// Saving a security page failed.
#[derive(Error, Debug)]
pub enum SaveError {
    /// The page did not validate
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The CA-ignore row could not be persisted
    #[error(transparent)]
    CaIgnore(#[from] CaIgnoreError),
}
