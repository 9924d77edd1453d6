use std::fmt;

use crate::{
    context::Medium,
    profile::{ConnectionProfile, WepKeyType},
};

/// Entries of the security type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityKind {
    /// No security.
    None,
    /// Static WEP with raw keys or passphrases.
    Wep(WepKeyType),
    /// Cisco LEAP.
    Leap,
    /// 802.1x with dynamic keys, or plain 802.1x on a wired link.
    DynamicWep,
    /// WPA or WPA2 personal.
    WpaPsk,
    /// WPA3 personal.
    Sae,
    /// WPA or WPA2 enterprise.
    WpaEnterprise,
}

const WIRELESS_MENU: [SecurityKind; 8] = [
    SecurityKind::None,
    SecurityKind::Wep(WepKeyType::Key),
    SecurityKind::Wep(WepKeyType::Passphrase),
    SecurityKind::Leap,
    SecurityKind::DynamicWep,
    SecurityKind::WpaPsk,
    SecurityKind::Sae,
    SecurityKind::WpaEnterprise,
];
const WIRED_MENU: [SecurityKind; 2] = [SecurityKind::None, SecurityKind::DynamicWep];

impl SecurityKind {
    /// Menu for `medium`, in display order.
    pub fn menu(medium: Medium) -> &'static [SecurityKind] {
        match medium {
            Medium::Wireless => &WIRELESS_MENU,
            Medium::Wired => &WIRED_MENU,
        }
    }

    /// Whether the type can secure an Ad-Hoc network.
    pub fn adhoc_compatible(self) -> bool {
        matches!(
            self,
            SecurityKind::None | SecurityKind::Wep(_) | SecurityKind::WpaPsk
        )
    }

    /// Type a saved profile is configured with.
    pub fn from_profile(profile: &ConnectionProfile) -> Self {
        if !profile.is_wireless() {
            return if profile.ieee8021x.is_some() {
                SecurityKind::DynamicWep
            } else {
                SecurityKind::None
            };
        }

        let Some(ws) = profile.wireless_security.as_ref() else {
            return SecurityKind::None;
        };
        match ws.key_mgmt.as_str() {
            "none" => SecurityKind::Wep(ws.wep_key_type.unwrap_or_default()),
            "ieee8021x" if ws.auth_alg.as_deref() == Some("leap") => SecurityKind::Leap,
            "ieee8021x" => SecurityKind::DynamicWep,
            "wpa-none" | "wpa-psk" => SecurityKind::WpaPsk,
            "sae" => SecurityKind::Sae,
            "wpa-eap" => SecurityKind::WpaEnterprise,
            _ => SecurityKind::None,
        }
    }
}

impl fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SecurityKind::None => "None",
            SecurityKind::Wep(WepKeyType::Key) => "WEP 40/128-bit Key (Hex or ASCII)",
            SecurityKind::Wep(WepKeyType::Passphrase) => "WEP 128-bit Passphrase",
            SecurityKind::Leap => "LEAP",
            SecurityKind::DynamicWep => "Dynamic WEP (802.1x)",
            SecurityKind::WpaPsk => "WPA & WPA2 Personal",
            SecurityKind::Sae => "WPA3 Personal",
            SecurityKind::WpaEnterprise => "WPA & WPA2 Enterprise",
        };
        f.write_str(label)
    }
}
