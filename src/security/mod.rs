//! Wireless security wrappers.
//!
//! A [`WirelessSecurity`] turns one menu entry of [`SecurityKind`] into the
//! `802-11-wireless-security` and `802-1x` settings of a profile.
//! [`SecurityPage`] drives the editing flow around it.

mod enterprise;
mod kind;
mod leap;
mod page;
mod psk;
mod wep;

pub use enterprise::EnterpriseSecurity;
pub use kind::SecurityKind;
pub use leap::LeapSecurity;
pub use page::{PageState, SecurityPage};
pub use psk::{PskSecurity, validate_psk};
pub use wep::{WEP_KEY_SLOTS, WepAuthAlg, WepSecurity, validate_wep_key};

use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{ValidationError, ValidationReport},
    profile::ConnectionProfile,
};

/// A configured security type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WirelessSecurity {
    /// Static WEP.
    Wep(WepSecurity),
    /// WPA/WPA2 personal.
    WpaPsk(PskSecurity),
    /// WPA3 personal.
    Sae(PskSecurity),
    /// WPA/WPA2 enterprise.
    WpaEap(EnterpriseSecurity),
    /// Dynamic WEP, or 802.1x on a wired link.
    DynamicWep(EnterpriseSecurity),
    /// Cisco LEAP.
    Leap(LeapSecurity),
}

impl WirelessSecurity {
    /// Wrapper for `kind` filled from `profile`. `None` needs no wrapper.
    pub fn for_kind(
        kind: SecurityKind,
        profile: &ConnectionProfile,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Option<Self> {
        let security = match kind {
            SecurityKind::None => return None,
            SecurityKind::Wep(key_type) => {
                WirelessSecurity::Wep(WepSecurity::from_profile(key_type, profile, ctx))
            }
            SecurityKind::WpaPsk => {
                WirelessSecurity::WpaPsk(PskSecurity::from_profile(false, profile, ctx))
            }
            SecurityKind::Sae => WirelessSecurity::Sae(PskSecurity::from_profile(true, profile, ctx)),
            SecurityKind::WpaEnterprise => WirelessSecurity::WpaEap(
                EnterpriseSecurity::from_profile(false, profile, ctx, store),
            ),
            SecurityKind::DynamicWep => WirelessSecurity::DynamicWep(
                EnterpriseSecurity::from_profile(true, profile, ctx, store),
            ),
            SecurityKind::Leap => WirelessSecurity::Leap(LeapSecurity::from_profile(profile, ctx)),
        };
        Some(security)
    }

    /// Menu entry this wrapper stands for.
    pub fn kind(&self) -> SecurityKind {
        match self {
            WirelessSecurity::Wep(w) => SecurityKind::Wep(w.key_type()),
            WirelessSecurity::WpaPsk(_) => SecurityKind::WpaPsk,
            WirelessSecurity::Sae(_) => SecurityKind::Sae,
            WirelessSecurity::WpaEap(_) => SecurityKind::WpaEnterprise,
            WirelessSecurity::DynamicWep(_) => SecurityKind::DynamicWep,
            WirelessSecurity::Leap(_) => SecurityKind::Leap,
        }
    }

    /// Whether the wrapper can secure an Ad-Hoc network.
    pub fn adhoc_compatible(&self) -> bool {
        match self {
            WirelessSecurity::Wep(w) => w.adhoc_compatible(),
            WirelessSecurity::WpaPsk(w) | WirelessSecurity::Sae(w) => w.adhoc_compatible(),
            WirelessSecurity::WpaEap(w) | WirelessSecurity::DynamicWep(w) => w.adhoc_compatible(),
            WirelessSecurity::Leap(_) => false,
        }
    }

    /// # Errors
    /// Returns the first field that blocks saving.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        match self {
            WirelessSecurity::Wep(w) => w.validate(),
            WirelessSecurity::WpaPsk(w) | WirelessSecurity::Sae(w) => w.validate(),
            WirelessSecurity::WpaEap(w) | WirelessSecurity::DynamicWep(w) => w.validate(),
            WirelessSecurity::Leap(w) => w.validate(),
        }
    }

    /// Writes the wrapper's settings into `profile`.
    pub fn serialize(
        &self,
        profile: &mut ConnectionProfile,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) {
        match self {
            WirelessSecurity::Wep(w) => w.serialize(profile),
            WirelessSecurity::WpaPsk(w) | WirelessSecurity::Sae(w) => w.serialize(profile),
            WirelessSecurity::WpaEap(w) | WirelessSecurity::DynamicWep(w) => {
                w.serialize(profile, ctx, store);
            }
            WirelessSecurity::Leap(w) => w.serialize(profile),
        }
    }

    /// Reads stored secrets back from `profile`.
    pub fn load_secrets(&mut self, profile: &ConnectionProfile) {
        match self {
            WirelessSecurity::Wep(w) => w.load_secrets(profile),
            WirelessSecurity::WpaPsk(w) | WirelessSecurity::Sae(w) => w.load_secrets(profile),
            WirelessSecurity::WpaEap(w) | WirelessSecurity::DynamicWep(w) => {
                w.load_secrets(profile);
            }
            WirelessSecurity::Leap(w) => w.load_secrets(profile),
        }
    }
}
