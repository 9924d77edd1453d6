use std::path::Path;

use super::{
    MaterialFormat, MaterialPurpose,
    sniff::{read_prefix, sniff},
};

/// Files shorter than this cannot hold a usable certificate or key.
pub const MIN_CANDIDATE_SIZE: u64 = 400;

const CERT_EXTENSIONS: [&str; 4] = ["der", "pem", "crt", "cer"];
const KEY_EXTENSIONS: [&str; 3] = ["der", "pem", "p12"];

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Whether a file chooser for `purpose` should list `path`.
///
/// Checks the extension, a minimum size and that the content sniffs as
/// something usable in that slot.
pub fn is_candidate(path: &Path, purpose: MaterialPurpose) -> bool {
    let allowed: &[&str] = match purpose {
        MaterialPurpose::CaCert | MaterialPurpose::ClientCert => &CERT_EXTENSIONS,
        MaterialPurpose::PrivateKey => &KEY_EXTENSIONS,
    };
    if !has_extension(path, allowed) {
        return false;
    }

    let large_enough = path
        .metadata()
        .is_ok_and(|m| m.is_file() && m.len() >= MIN_CANDIDATE_SIZE);
    if !large_enough {
        return false;
    }

    let Some(found) = read_prefix(path).ok().and_then(|data| sniff(&data)) else {
        return false;
    };

    match purpose {
        MaterialPurpose::CaCert | MaterialPurpose::ClientCert => {
            found.certificate && found.format != MaterialFormat::Pkcs12
        }
        MaterialPurpose::PrivateKey => found.private_key,
    }
}

/// Whether `path` holds a password-protected private key.
pub fn is_encrypted_private_key(path: &Path) -> bool {
    read_prefix(path)
        .ok()
        .and_then(|data| sniff(&data))
        .is_some_and(|found| found.private_key && found.encrypted)
}

/// Whether a PAC file chooser should list `path`.
pub fn is_pac_candidate(path: &Path) -> bool {
    has_extension(path, &["pac"]) && path.is_file()
}
