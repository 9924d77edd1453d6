//! Connection profile model.
//!
//! The settings object the engine fills in. Only the keys the engine reads or
//! writes are modelled; key names follow the connection-settings vocabulary
//! the supplicant consumes.

mod settings;

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{Result, WsecError};

pub use settings::{
    CertRef, ConnectionKind, ConnectionSetting, Ieee8021xSetting, WepKeyType, WirelessMode,
    WirelessSecuritySetting, WirelessSetting,
};

/// Setting name of [`WirelessSecuritySetting`], as referenced from `802-11-wireless.security`.
pub const WIRELESS_SECURITY_SETTING: &str = "802-11-wireless-security";

/// A network connection profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Identity of the profile.
    pub connection: ConnectionSetting,

    /// Wi-Fi parameters.
    #[serde(
        rename = "802-11-wireless",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub wireless: Option<WirelessSetting>,

    /// Wi-Fi security.
    #[serde(
        rename = "802-11-wireless-security",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub wireless_security: Option<WirelessSecuritySetting>,

    /// 802.1x credentials.
    #[serde(rename = "802-1x", default, skip_serializing_if = "Option::is_none")]
    pub ieee8021x: Option<Ieee8021xSetting>,
}

impl ConnectionProfile {
    /// New Wi-Fi profile for `ssid` in infrastructure mode.
    pub fn new_wireless(id: &str, uuid: &str, ssid: &str) -> Self {
        Self {
            connection: ConnectionSetting {
                id: id.to_string(),
                uuid: uuid.to_string(),
                kind: ConnectionKind::Wireless,
            },
            wireless: Some(WirelessSetting {
                ssid: Some(ssid.to_string()),
                ..WirelessSetting::default()
            }),
            ..Self::default()
        }
    }

    /// New wired profile.
    pub fn new_wired(id: &str, uuid: &str) -> Self {
        Self {
            connection: ConnectionSetting {
                id: id.to_string(),
                uuid: uuid.to_string(),
                kind: ConnectionKind::Wired,
            },
            ..Self::default()
        }
    }

    /// Stable identifier of the profile.
    pub fn uuid(&self) -> &str {
        &self.connection.uuid
    }

    /// Whether this is a Wi-Fi profile.
    pub fn is_wireless(&self) -> bool {
        self.connection.kind == ConnectionKind::Wireless
    }

    /// Whether the Wi-Fi mode is Ad-Hoc.
    pub fn is_adhoc(&self) -> bool {
        self.wireless
            .as_ref()
            .is_some_and(|w| w.mode == WirelessMode::Adhoc)
    }

    /// Network name, if set and non-empty.
    pub fn ssid(&self) -> Option<&str> {
        self.wireless
            .as_ref()
            .and_then(|w| w.ssid.as_deref())
            .filter(|ssid| !ssid.is_empty())
    }

    /// The Wi-Fi setting, created empty if missing.
    pub fn wireless_mut(&mut self) -> &mut WirelessSetting {
        self.wireless.get_or_insert_with(WirelessSetting::default)
    }

    /// Replaces the Wi-Fi security setting and links it from the Wi-Fi setting.
    pub fn replace_wireless_security(&mut self, setting: WirelessSecuritySetting) {
        self.wireless_mut().security = Some(WIRELESS_SECURITY_SETTING.to_string());
        self.wireless_security = Some(setting);
    }

    /// Drops all security settings, leaving an open network.
    pub fn clear_security(&mut self) {
        if let Some(wireless) = self.wireless.as_mut() {
            wireless.security = None;
        }
        self.wireless_security = None;
        self.ieee8021x = None;
    }

    /// Parses a profile from TOML.
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or does not describe a profile.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WsecError::toml_parse(e, None))
    }

    /// Renders the profile as TOML.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| WsecError::TomlSerializeError {
            what: format!("profile '{}'", self.connection.id),
            details: e.to_string(),
        })
    }

    /// Loads a profile from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| WsecError::io(e, path))?;
        let profile: Self =
            toml::from_str(&content).map_err(|e| WsecError::toml_parse(e, Some(path)))?;
        debug!(uuid = %profile.connection.uuid, "loaded profile");
        Ok(profile)
    }

    /// Writes the profile to a TOML file, creating parent directories.
    ///
    /// # Errors
    /// Returns error if serialization or writing fails.
    #[instrument(skip(self), fields(uuid = %self.connection.uuid))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| WsecError::io(e, parent))?;
        }
        fs::write(path, content).map_err(|e| WsecError::io(e, path))?;
        Ok(())
    }
}
