use std::fmt;

use super::tunnel::{Tunnel, TunnelKind};
use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
};

/// PEAP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeapVersion {
    /// Let the supplicant negotiate.
    #[default]
    Automatic,
    /// Version 0.
    V0,
    /// Version 1.
    V1,
}

impl PeapVersion {
    /// Value of `phase1-peapver`, absent for automatic.
    pub fn profile_value(self) -> Option<&'static str> {
        match self {
            PeapVersion::Automatic => None,
            PeapVersion::V0 => Some("0"),
            PeapVersion::V1 => Some("1"),
        }
    }

    /// Version for a stored `phase1-peapver`.
    pub fn from_profile_value(value: Option<&str>) -> Self {
        match value {
            Some("0") => PeapVersion::V0,
            Some("1") => PeapVersion::V1,
            _ => PeapVersion::Automatic,
        }
    }
}

impl fmt::Display for PeapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeapVersion::Automatic => write!(f, "Automatic"),
            PeapVersion::V0 => write!(f, "Version 0"),
            PeapVersion::V1 => write!(f, "Version 1"),
        }
    }
}

/// Protected EAP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeapMethod {
    tunnel: Tunnel,
    version: PeapVersion,
}

impl PeapMethod {
    /// Method filled from an 802.1x setting; MSCHAPv2 inside unless the profile says otherwise.
    pub fn from_setting(
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        Self {
            tunnel: Tunnel::from_setting(TunnelKind::Peap, s, ctx, store),
            version: PeapVersion::from_profile_value(s.and_then(|s| s.phase1_peapver.as_deref())),
        }
    }

    /// Shared tunnel state.
    pub fn tunnel(&self) -> &Tunnel {
        &self.tunnel
    }

    /// Mutable shared tunnel state.
    pub fn tunnel_mut(&mut self) -> &mut Tunnel {
        &mut self.tunnel
    }

    /// Selected protocol version.
    pub fn version(&self) -> PeapVersion {
        self.version
    }

    /// Selects the protocol version.
    pub fn set_version(&mut self, version: PeapVersion) {
        self.version = version;
    }

    /// # Errors
    /// Returns the first failure of the CA or the inner method.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        self.tunnel.validate()
    }

    /// Writes `peap`, the version unless automatic, then the inner method.
    pub fn serialize(&self, s: &mut Ieee8021xSetting, ctx: &EditContext, store: &CaIgnoreStore) {
        self.tunnel.serialize_outer(s, ctx, store);
        s.phase1_peapver = self.version.profile_value().map(str::to_string);
        self.tunnel.serialize_inner(s, ctx, store);
    }
}
