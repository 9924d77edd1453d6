//! Unit tests for material sniffing and validation.
//!
//! Sniffer fixtures are synthetic: only their leading bytes are meaningful.
//! Validation runs against the real files under `tests/fixtures`.

#![allow(clippy::panic)]

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use crate::{
    error::{Field, ValidationError},
    material::{
        MaterialFormat, MaterialPurpose, is_candidate, is_encrypted_private_key,
        is_pac_candidate, sniff, validate_material,
    },
    secrets::{SecretEntry, StoragePolicy},
};

fn pem(label: &str, headers: &str) -> Vec<u8> {
    let mut out = format!("-----BEGIN {label}-----\n{headers}");
    for _ in 0..10 {
        out.push_str("MIIDdzCCAl+gAwIBAgIEAgAAuTANBgkqhkiG9w0BAQUFADBaMQswCQYDVQQGEwJJ\n");
    }
    out.push_str(&format!("-----END {label}-----\n"));
    out.into_bytes()
}

fn padded(prefix: &[u8]) -> Vec<u8> {
    let mut out = prefix.to_vec();
    out.resize(600, 0x41);
    out
}

fn der_certificate() -> Vec<u8> {
    padded(&[
        0x30, 0x82, 0x03, 0x00, 0x30, 0x82, 0x02, 0x80, 0xa0, 0x03, 0x02, 0x01, 0x02,
    ])
}

fn der_private_key() -> Vec<u8> {
    padded(&[0x30, 0x82, 0x04, 0xbe, 0x02, 0x01, 0x00, 0x30, 0x0d])
}

fn der_encrypted_key() -> Vec<u8> {
    padded(&[0x30, 0x82, 0x02, 0x00, 0x30, 0x4e, 0x06, 0x09, 0x2a, 0x86, 0x48])
}

fn pkcs12() -> Vec<u8> {
    padded(&[0x30, 0x82, 0x09, 0xf0, 0x02, 0x01, 0x03, 0x30, 0x82])
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn write(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn sniff_pem_certificate() {
    let found = sniff(&pem("CERTIFICATE", "")).unwrap();

    assert_eq!(found.format, MaterialFormat::Pem);
    assert!(found.certificate);
    assert!(!found.private_key);
}

#[test]
fn sniff_pem_key_encryption_markers() {
    let plain = sniff(&pem("PRIVATE KEY", "")).unwrap();
    assert!(plain.private_key);
    assert!(!plain.encrypted);

    let pkcs8 = sniff(&pem("ENCRYPTED PRIVATE KEY", "")).unwrap();
    assert!(pkcs8.encrypted);

    let legacy = sniff(&pem(
        "RSA PRIVATE KEY",
        "Proc-Type: 4,ENCRYPTED\nDEK-Info: AES-128-CBC,0123456789ABCDEF\n\n",
    ))
    .unwrap();
    assert!(legacy.encrypted);

    let proc_type_only = sniff(&pem("RSA PRIVATE KEY", "Proc-Type: 4,ENCRYPTED\n\n")).unwrap();
    assert!(!proc_type_only.encrypted);
}

#[test]
fn sniff_der_variants() {
    let cert = sniff(&der_certificate()).unwrap();
    assert_eq!(cert.format, MaterialFormat::Der);
    assert!(cert.certificate);

    let key = sniff(&der_private_key()).unwrap();
    assert!(key.private_key);
    assert!(!key.encrypted);

    let encrypted = sniff(&der_encrypted_key()).unwrap();
    assert!(encrypted.private_key);
    assert!(encrypted.encrypted);
}

#[test]
fn sniff_pkcs12_in_long_and_short_forms() {
    let long = sniff(&pkcs12()).unwrap();
    assert_eq!(long.format, MaterialFormat::Pkcs12);
    assert!(long.encrypted);

    let indefinite = sniff(&padded(&[0x30, 0x80, 0x02, 0x01, 0x03])).unwrap();
    assert_eq!(indefinite.format, MaterialFormat::Pkcs12);

    let three_bytes = sniff(&padded(&[0x30, 0x83, 0x01, 0x00, 0x00, 0x02, 0x01, 0x03])).unwrap();
    assert_eq!(three_bytes.format, MaterialFormat::Pkcs12);
}

#[test]
fn sniff_rejects_garbage() {
    assert!(sniff(b"hello world").is_none());
    assert!(sniff(&[]).is_none());
}

#[test]
fn empty_ca_path_is_not_an_error() {
    assert_eq!(
        validate_material(None, MaterialPurpose::CaCert, None).unwrap(),
        None
    );
}

#[test]
fn empty_key_path_is_missing_file() {
    let err = validate_material(None, MaterialPurpose::PrivateKey, None).unwrap_err();

    assert!(matches!(
        err,
        ValidationError::MissingFile {
            field: Field::PrivateKey
        }
    ));
}

#[test]
fn missing_file_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone.pem");

    let err = validate_material(Some(&path), MaterialPurpose::CaCert, None).unwrap_err();

    assert!(matches!(err, ValidationError::UnreadableFile { .. }));
    assert_eq!(err.field(), Field::CaCert);
}

#[test]
fn directory_is_unreadable() {
    let dir = TempDir::new().unwrap();

    let err = validate_material(Some(dir.path()), MaterialPurpose::CaCert, None).unwrap_err();

    assert!(matches!(err, ValidationError::UnreadableFile { .. }));
}

#[test]
fn key_in_certificate_slot_is_invalid() {
    let dir = TempDir::new().unwrap();
    let key = write(&dir, "key.pem", &pem("PRIVATE KEY", ""));

    let err = validate_material(Some(&key), MaterialPurpose::CaCert, None).unwrap_err();

    assert!(matches!(
        err,
        ValidationError::InvalidFormat {
            purpose: MaterialPurpose::CaCert,
            ..
        }
    ));
}

#[test]
fn pkcs12_is_not_a_ca_certificate() {
    let dir = TempDir::new().unwrap();
    let p12 = write(&dir, "bundle.p12", &pkcs12());

    let err = validate_material(Some(&p12), MaterialPurpose::CaCert, None).unwrap_err();

    assert!(matches!(err, ValidationError::InvalidFormat { .. }));
}

#[test]
fn real_certificates_are_accepted() {
    for (name, format) in [("ca.pem", MaterialFormat::Pem), ("ca.der", MaterialFormat::Der)] {
        let material = validate_material(Some(&fixture(name)), MaterialPurpose::CaCert, None)
            .unwrap()
            .unwrap();
        assert_eq!(material.format, format, "{name}");
    }

    let user = validate_material(Some(&fixture("user.pem")), MaterialPurpose::ClientCert, None)
        .unwrap()
        .unwrap();
    assert_eq!(user.format, MaterialFormat::Pem);
}

#[test]
fn certificate_with_broken_body_is_invalid() {
    let dir = TempDir::new().unwrap();
    let mut der = vec![0x30, 0x82, 0x00, 0x05, 0x30, 0x00];
    der.extend([0xaa; 16]);
    let cases = [
        write(
            &dir,
            "unterminated.pem",
            b"-----BEGIN CERTIFICATE-----\n!!!! not base64 !!!!\n",
        ),
        write(
            &dir,
            "bad-base64.pem",
            b"-----BEGIN CERTIFICATE-----\n!!!! not base64 !!!!\n-----END CERTIFICATE-----\n",
        ),
        write(&dir, "not-x509.pem", &pem("CERTIFICATE", "")),
        write(&dir, "header-only.der", &der),
        write(&dir, "padded.der", &der_certificate()),
    ];

    for path in &cases {
        let err = validate_material(Some(path), MaterialPurpose::CaCert, None).unwrap_err();
        assert!(
            matches!(
                err,
                ValidationError::InvalidFormat {
                    purpose: MaterialPurpose::CaCert,
                    ..
                }
            ),
            "{}: {err:?}",
            path.display()
        );
    }
}

#[test]
fn real_keys_report_encryption() {
    let ask = SecretEntry::new(StoragePolicy::NotSaved);
    let cases = [
        ("user-key.pem", MaterialFormat::Pem, false),
        ("user-key.der", MaterialFormat::Der, false),
        ("user-key-enc.pem", MaterialFormat::Pem, true),
        ("user-key-enc.der", MaterialFormat::Der, true),
        ("user-key-legacy.pem", MaterialFormat::Pem, true),
        ("user.p12", MaterialFormat::Pkcs12, true),
    ];

    for (name, format, encrypted) in cases {
        let material =
            validate_material(Some(&fixture(name)), MaterialPurpose::PrivateKey, Some(&ask))
                .unwrap()
                .unwrap();
        assert_eq!(material.format, format, "{name}");
        assert_eq!(material.encrypted, encrypted, "{name}");
        assert!(material.path.is_absolute());
    }
}

#[test]
fn key_with_broken_body_is_invalid() {
    let dir = TempDir::new().unwrap();
    let p12 = fs::read(fixture("user.p12")).unwrap();
    let cases = [
        write(&dir, "key.pem", &pem("PRIVATE KEY", "")),
        write(&dir, "key.der", &der_private_key()),
        write(&dir, "cut.p12", &p12[..600]),
    ];

    for path in &cases {
        let err = validate_material(Some(path), MaterialPurpose::PrivateKey, None).unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidFormat { .. }),
            "{}: {err:?}",
            path.display()
        );
    }
}

#[test]
fn private_key_password_gate() {
    let key = fixture("user-key-enc.pem");

    let empty = SecretEntry::new(StoragePolicy::Stored);
    let err =
        validate_material(Some(&key), MaterialPurpose::PrivateKey, Some(&empty)).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::PasswordRequired {
            field: Field::PrivateKeyPassword
        }
    ));

    let ask = SecretEntry::new(StoragePolicy::NotSaved);
    let material = validate_material(Some(&key), MaterialPurpose::PrivateKey, Some(&ask))
        .unwrap()
        .unwrap();
    assert!(material.encrypted);
}

#[test]
fn unencrypted_key_is_flagged() {
    let key = fixture("user-key.der");

    let material = validate_material(Some(&key), MaterialPurpose::PrivateKey, None)
        .unwrap()
        .unwrap();

    assert_eq!(material.format, MaterialFormat::Der);
    assert!(material.is_unencrypted_key(MaterialPurpose::PrivateKey));
}

#[test]
fn candidate_filter() {
    let dir = TempDir::new().unwrap();
    let cert = write(&dir, "ca.crt", &pem("CERTIFICATE", ""));
    let tiny = write(&dir, "tiny.pem", b"-----BEGIN CERTIFICATE-----\n");
    let wrong_ext = write(&dir, "ca.txt", &pem("CERTIFICATE", ""));
    let p12 = write(&dir, "id.p12", &pkcs12());

    assert!(is_candidate(&cert, MaterialPurpose::CaCert));
    assert!(!is_candidate(&tiny, MaterialPurpose::CaCert));
    assert!(!is_candidate(&wrong_ext, MaterialPurpose::CaCert));
    assert!(is_candidate(&p12, MaterialPurpose::PrivateKey));
    assert!(!is_candidate(&cert, MaterialPurpose::PrivateKey));
}

#[test]
fn encrypted_key_filter() {
    let dir = TempDir::new().unwrap();
    let plain = write(&dir, "plain.pem", &pem("PRIVATE KEY", ""));
    let locked = write(&dir, "locked.der", &der_encrypted_key());

    assert!(!is_encrypted_private_key(&plain));
    assert!(is_encrypted_private_key(&locked));
}

#[test]
fn pac_filter() {
    let dir = TempDir::new().unwrap();
    let pac = write(&dir, "user.pac", b"pac");
    let other = write(&dir, "user.bin", b"pac");

    assert!(is_pac_candidate(&pac));
    assert!(!is_pac_candidate(&other));
}
