use thiserror::Error;
use x509_parser::{
    der_parser::{ber::parse_ber, der::parse_der},
    parse_x509_certificate,
};

use super::{MaterialFormat, sniff::Sniffed};

const PKCS12_VERSION: u32 = 3;
const PEM_KEY_TAGS: [&str; 5] = [
    "RSA PRIVATE KEY",
    "DSA PRIVATE KEY",
    "EC PRIVATE KEY",
    "PRIVATE KEY",
    "ENCRYPTED PRIVATE KEY",
];

/// Why a sniffed file failed to decode.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// PEM armour is broken: bad base64 or mismatched markers.
    #[error("PEM armour could not be decoded: {0}")]
    Armour(#[from] pem::PemError),

    /// A certificate block is not valid X.509.
    #[error("certificate could not be parsed: {details}")]
    Certificate {
        /// Parser message.
        details: String,
    },

    /// A key or container is not a well-formed ASN.1 structure.
    #[error("{what} is not valid ASN.1: {details}")]
    Asn1 {
        /// What was being decoded.
        what: &'static str,
        /// Parser message.
        details: String,
    },

    /// The outer structure of a PKCS#12 file is wrong.
    #[error("PKCS#12 container has version {found}, expected 3")]
    Pkcs12Version {
        /// Version integer read from the file.
        found: u32,
    },
}

/// What decoding a file prefix actually produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoded {
    /// X.509 certificates that parsed.
    pub certificates: usize,
    /// A private key block was decoded.
    pub private_key: bool,
}

/// Decodes the structures a sniff claimed to find.
///
/// Certificates go through a full X.509 parse. Keys and PKCS#12 containers
/// are checked as ASN.1; their contents stay opaque since they may be
/// encrypted. PEM blocks cut off by the read limit are not counted.
///
/// # Errors
/// Returns the first structure that fails to decode.
pub fn decode(data: &[u8], sniffed: &Sniffed) -> Result<Decoded, DecodeError> {
    match sniffed.format {
        MaterialFormat::Pem => decode_pem(data),
        MaterialFormat::Der if sniffed.certificate => {
            certificate(data)?;
            Ok(Decoded {
                certificates: 1,
                private_key: false,
            })
        }
        MaterialFormat::Der => {
            asn1_sequence(data, "private key")?;
            Ok(Decoded {
                certificates: 0,
                private_key: sniffed.private_key,
            })
        }
        MaterialFormat::Pkcs12 => {
            pkcs12(data)?;
            Ok(Decoded {
                certificates: 1,
                private_key: true,
            })
        }
    }
}

fn decode_pem(data: &[u8]) -> Result<Decoded, DecodeError> {
    let mut found = Decoded::default();

    for block in pem::parse_many(data)? {
        let tag = block.tag();
        if tag == "CERTIFICATE" {
            certificate(block.contents())?;
            found.certificates += 1;
        } else if PEM_KEY_TAGS.contains(&tag) {
            // Legacy encrypted bodies are ciphertext, not DER.
            if block.headers().get("Proc-Type").is_none() {
                asn1_sequence(block.contents(), "private key")?;
            }
            found.private_key = true;
        }
    }

    Ok(found)
}

fn certificate(der: &[u8]) -> Result<(), DecodeError> {
    parse_x509_certificate(der)
        .map(|_| ())
        .map_err(|e| DecodeError::Certificate {
            details: e.to_string(),
        })
}

fn asn1_sequence(der: &[u8], what: &'static str) -> Result<(), DecodeError> {
    let asn1 = |details: String| DecodeError::Asn1 { what, details };
    let (_, object) = parse_der(der).map_err(|e| asn1(e.to_string()))?;
    object.as_sequence().map_err(|e| asn1(e.to_string()))?;
    Ok(())
}

fn pkcs12(data: &[u8]) -> Result<(), DecodeError> {
    let asn1 = |details: String| DecodeError::Asn1 {
        what: "PKCS#12 container",
        details,
    };
    let (_, pfx) = parse_ber(data).map_err(|e| asn1(e.to_string()))?;
    let fields = pfx.as_sequence().map_err(|e| asn1(e.to_string()))?;
    let version = fields
        .first()
        .ok_or_else(|| asn1("empty sequence".to_string()))?
        .as_u32()
        .map_err(|e| asn1(e.to_string()))?;

    if version != PKCS12_VERSION {
        return Err(DecodeError::Pkcs12Version { found: version });
    }
    Ok(())
}
