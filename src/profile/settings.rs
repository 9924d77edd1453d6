use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    material::{Material, MaterialFormat},
    secrets::SecretFlags,
};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// Kind of link the profile describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// Wi-Fi.
    #[default]
    #[serde(rename = "802-11-wireless")]
    Wireless,
    /// Wired Ethernet.
    #[serde(rename = "802-3-ethernet")]
    Wired,
}

/// Identity of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionSetting {
    /// Human readable name.
    pub id: String,
    /// Stable identifier; keys the CA-ignore side table.
    pub uuid: String,
    /// Link type.
    #[serde(rename = "type", default)]
    pub kind: ConnectionKind,
}

/// Wi-Fi operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WirelessMode {
    /// Client of an access point.
    #[default]
    Infrastructure,
    /// Peer-to-peer network without an access point.
    Adhoc,
    /// Acting as an access point.
    Ap,
}

/// `802-11-wireless` setting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WirelessSetting {
    /// Network name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssid: Option<String>,
    /// Operating mode.
    #[serde(default)]
    pub mode: WirelessMode,
    /// Name of the setting that secures this network, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
}

/// How the WEP key slots are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WepKeyType {
    /// Raw hex or ASCII key.
    #[default]
    Key,
    /// Passphrase hashed into a 104-bit key.
    Passphrase,
}

/// `802-11-wireless-security` setting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WirelessSecuritySetting {
    /// Key management scheme.
    pub key_mgmt: String,
    /// Authentication algorithm (`open`, `shared`, `leap`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_alg: Option<String>,
    /// Allowed WPA protocol versions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub proto: Vec<String>,
    /// Allowed pairwise ciphers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairwise: Vec<String>,
    /// Allowed group ciphers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group: Vec<String>,
    /// WEP key slot 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wep_key0: Option<String>,
    /// WEP key slot 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wep_key1: Option<String>,
    /// WEP key slot 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wep_key2: Option<String>,
    /// WEP key slot 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wep_key3: Option<String>,
    /// Slot used for transmitting.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub wep_tx_keyidx: u32,
    /// Interpretation of the WEP key slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wep_key_type: Option<WepKeyType>,
    /// Storage flags shared by all WEP key slots.
    #[serde(default, skip_serializing_if = "SecretFlags::is_empty")]
    pub wep_key_flags: SecretFlags,
    /// WPA pre-shared key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
    /// Storage flags of `psk`.
    #[serde(default, skip_serializing_if = "SecretFlags::is_empty")]
    pub psk_flags: SecretFlags,
    /// LEAP user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leap_username: Option<String>,
    /// LEAP password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leap_password: Option<String>,
    /// Storage flags of `leap-password`.
    #[serde(default, skip_serializing_if = "SecretFlags::is_empty")]
    pub leap_password_flags: SecretFlags,
}

impl WirelessSecuritySetting {
    /// Fresh setting with only the key management set.
    pub fn new(key_mgmt: &str) -> Self {
        Self {
            key_mgmt: key_mgmt.to_string(),
            ..Self::default()
        }
    }

    /// WEP key in slot `index`, if set.
    pub fn wep_key(&self, index: usize) -> Option<&str> {
        match index {
            0 => self.wep_key0.as_deref(),
            1 => self.wep_key1.as_deref(),
            2 => self.wep_key2.as_deref(),
            3 => self.wep_key3.as_deref(),
            _ => None,
        }
    }

    /// Sets slot `index`. Indexes past the fourth slot are ignored.
    pub fn set_wep_key(&mut self, index: usize, key: Option<String>) {
        match index {
            0 => self.wep_key0 = key,
            1 => self.wep_key1 = key,
            2 => self.wep_key2 = key,
            3 => self.wep_key3 = key,
            _ => {}
        }
    }
}

/// Reference to a certificate or key file together with its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertRef {
    /// Absolute file path.
    pub path: PathBuf,
    /// Encoding detected when the path was chosen.
    pub format: MaterialFormat,
}

impl From<Material> for CertRef {
    fn from(material: Material) -> Self {
        Self {
            path: material.path,
            format: material.format,
        }
    }
}

/// `802-1x` setting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Ieee8021xSetting {
    /// Outer EAP methods, in order of preference.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eap: Vec<String>,
    /// User identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Identity sent in the clear before the tunnel is up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous_identity: Option<String>,
    /// Required suffix of the server certificate's domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_suffix_match: Option<String>,
    /// Certificate authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<CertRef>,
    /// Use the system CA store in addition to `ca-cert`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub system_ca_certs: bool,
    /// User certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<CertRef>,
    /// User private key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<CertRef>,
    /// Password of `private-key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_password: Option<String>,
    /// Storage flags of `private-key-password`.
    #[serde(default, skip_serializing_if = "SecretFlags::is_empty")]
    pub private_key_password_flags: SecretFlags,
    /// User password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Storage flags of `password`.
    #[serde(default, skip_serializing_if = "SecretFlags::is_empty")]
    pub password_flags: SecretFlags,
    /// PEAP version, absent for automatic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase1_peapver: Option<String>,
    /// FAST PAC provisioning mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase1_fast_provisioning: Option<String>,
    /// FAST PAC file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pac_file: Option<PathBuf>,
    /// Non-EAP inner method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_auth: Option<String>,
    /// EAP inner method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_autheap: Option<String>,
    /// Inner certificate authority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_ca_cert: Option<CertRef>,
    /// Inner user certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_client_cert: Option<CertRef>,
    /// Inner private key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_private_key: Option<CertRef>,
    /// Password of `phase2-private-key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase2_private_key_password: Option<String>,
    /// Storage flags of `phase2-private-key-password`.
    #[serde(default, skip_serializing_if = "SecretFlags::is_empty")]
    pub phase2_private_key_password_flags: SecretFlags,
}

impl Ieee8021xSetting {
    /// Empty setting that keeps the secret flags and CA-store choice of `prev`.
    pub fn fresh_from(prev: Option<&Self>) -> Self {
        let Some(prev) = prev else {
            return Self::default();
        };
        Self {
            system_ca_certs: prev.system_ca_certs,
            password_flags: prev.password_flags,
            private_key_password_flags: prev.private_key_password_flags,
            phase2_private_key_password_flags: prev.phase2_private_key_password_flags,
            ..Self::default()
        }
    }

    /// First outer EAP method.
    pub fn first_eap(&self) -> Option<&str> {
        self.eap.first().map(String::as_str)
    }
}
