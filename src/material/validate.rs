use std::path::{Path, PathBuf};

use tracing::debug;

use super::{
    MaterialFormat, MaterialPurpose,
    decode::decode,
    sniff::{read_prefix, sniff},
};
use crate::{
    error::{Field, ValidationError},
    secrets::SecretEntry,
};

/// A certificate or key file that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Detected container format.
    pub format: MaterialFormat,
    /// Whether the key inside is password protected. Always true for PKCS#12.
    pub encrypted: bool,
}

impl Material {
    /// Whether this is a private key sitting on disk without a password.
    pub fn is_unencrypted_key(&self, purpose: MaterialPurpose) -> bool {
        purpose == MaterialPurpose::PrivateKey && !self.encrypted
    }
}

/// Checks a certificate or key path for use in the `purpose` slot.
///
/// An empty CA path yields `Ok(None)`; CA checks may be waived. Client certificate
/// and private key paths are required. When `password` is given it must be
/// non-empty unless its policy is not-saved. Only the first [`super::SNIFF_LIMIT`]
/// bytes of the file are read; certificates in them are parsed as X.509.
///
/// # Errors
/// Returns the first problem found: missing path, unreadable file, unknown or
/// mismatched encoding, content that fails to decode, then a missing password.
pub fn validate_material(
    path: Option<&Path>,
    purpose: MaterialPurpose,
    password: Option<&SecretEntry>,
) -> Result<Option<Material>, ValidationError> {
    let field = purpose.field();

    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return match purpose {
            MaterialPurpose::CaCert => Ok(None),
            MaterialPurpose::ClientCert | MaterialPurpose::PrivateKey => {
                Err(ValidationError::MissingFile { field })
            }
        };
    };

    let unreadable = |details: String| ValidationError::UnreadableFile {
        field,
        path: path.to_path_buf(),
        details,
    };

    let absolute = path.canonicalize().map_err(|e| unreadable(e.to_string()))?;
    let metadata = absolute
        .metadata()
        .map_err(|e| unreadable(e.to_string()))?;
    if !metadata.is_file() {
        return Err(unreadable("not a regular file".to_string()));
    }

    let data = read_prefix(&absolute).map_err(|e| unreadable(e.to_string()))?;
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        purpose,
        path: absolute.clone(),
        reason: reason.to_string(),
    };

    let sniffed = sniff(&data).ok_or_else(|| invalid("not a DER, PEM or PKCS#12 file"))?;
    debug!(path = %absolute.display(), format = %sniffed.format, %purpose, "sniffed material");

    match purpose {
        MaterialPurpose::CaCert | MaterialPurpose::ClientCert => {
            if sniffed.format == MaterialFormat::Pkcs12 {
                return Err(invalid("PKCS#12 containers are only accepted as private keys"));
            }
            if !sniffed.certificate {
                return Err(invalid("no X.509 certificate found"));
            }
        }
        MaterialPurpose::PrivateKey => {
            if !sniffed.private_key {
                return Err(invalid("no private key found"));
            }
        }
    }

    let decoded = decode(&data, &sniffed).map_err(|e| invalid(&e.to_string()))?;
    match purpose {
        MaterialPurpose::CaCert | MaterialPurpose::ClientCert if decoded.certificates == 0 => {
            return Err(invalid("no complete certificate could be decoded"));
        }
        MaterialPurpose::PrivateKey if !decoded.private_key => {
            return Err(invalid("no complete private key could be decoded"));
        }
        _ => {}
    }

    if let Some(password) = password
        && !password.is_satisfied()
    {
        return Err(ValidationError::PasswordRequired {
            field: Field::PrivateKeyPassword,
        });
    }

    Ok(Some(Material {
        path: absolute,
        format: sniffed.format,
        encrypted: sniffed.encrypted,
    }))
}

/// Format of the key at `path`, if it can be sniffed at all.
pub fn private_key_format(path: &Path) -> Option<MaterialFormat> {
    let data = read_prefix(path).ok()?;
    sniff(&data)
        .filter(|s| s.private_key)
        .map(|s| s.format)
}
