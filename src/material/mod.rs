//! Credential material validation.
//!
//! Certificates and private keys are referenced by path. Their encoding (DER,
//! PEM, PKCS#12) and, for keys, whether they are password protected is
//! derived on demand by sniffing a bounded prefix of the file, which is then
//! decoded so that a file with a plausible header but a broken body is
//! rejected. Files are never written.

mod decode;
mod filter;
mod sniff;
mod validate;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Field;

pub use filter::{MIN_CANDIDATE_SIZE, is_candidate, is_encrypted_private_key, is_pac_candidate};
pub use sniff::{SNIFF_LIMIT, Sniffed, read_prefix, sniff};
pub use validate::{Material, private_key_format, validate_material};

/// Container encoding of a certificate or key file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialFormat {
    /// Raw ASN.1 DER.
    Der,
    /// Base64 armoured PEM.
    Pem,
    /// PKCS#12 container holding key and certificate together.
    Pkcs12,
}

impl fmt::Display for MaterialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialFormat::Der => write!(f, "der"),
            MaterialFormat::Pem => write!(f, "pem"),
            MaterialFormat::Pkcs12 => write!(f, "pkcs12"),
        }
    }
}

/// Slot a certificate or key file is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialPurpose {
    /// Certificate authority used to check the server.
    CaCert,
    /// User certificate presented to the server.
    ClientCert,
    /// Private key matching the user certificate.
    PrivateKey,
}

impl MaterialPurpose {
    /// Editor field holding a file for this purpose.
    pub fn field(self) -> Field {
        match self {
            MaterialPurpose::CaCert => Field::CaCert,
            MaterialPurpose::ClientCert => Field::ClientCert,
            MaterialPurpose::PrivateKey => Field::PrivateKey,
        }
    }
}

impl fmt::Display for MaterialPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialPurpose::CaCert => write!(f, "CA certificate"),
            MaterialPurpose::ClientCert => write!(f, "user certificate"),
            MaterialPurpose::PrivateKey => write!(f, "private key"),
        }
    }
}

#[cfg(test)]
mod tests;
