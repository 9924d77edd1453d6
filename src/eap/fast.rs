use std::{
    fmt,
    path::{Path, PathBuf},
};

use super::tunnel::{Tunnel, TunnelKind};
use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{Field, ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
};

/// How a FAST client obtains its PAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PacProvisioning {
    /// Only a preinstalled PAC file is used.
    Disabled,
    /// Unauthenticated in-band provisioning.
    #[default]
    Anonymous,
    /// Server-authenticated in-band provisioning.
    Authenticated,
    /// Either of the above.
    Both,
}

impl PacProvisioning {
    /// Value of `phase1-fast-provisioning`.
    pub fn profile_value(self) -> &'static str {
        match self {
            PacProvisioning::Disabled => "0",
            PacProvisioning::Anonymous => "1",
            PacProvisioning::Authenticated => "2",
            PacProvisioning::Both => "3",
        }
    }

    /// Mode for a stored `phase1-fast-provisioning`; anonymous when unset or unknown.
    pub fn from_profile_value(value: Option<&str>) -> Self {
        match value {
            Some("0") => PacProvisioning::Disabled,
            Some("2") => PacProvisioning::Authenticated,
            Some("3") => PacProvisioning::Both,
            _ => PacProvisioning::Anonymous,
        }
    }

    /// Whether the PAC may be fetched in-band.
    pub fn is_enabled(self) -> bool {
        self != PacProvisioning::Disabled
    }
}

impl fmt::Display for PacProvisioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacProvisioning::Disabled => write!(f, "Disabled"),
            PacProvisioning::Anonymous => write!(f, "Anonymous"),
            PacProvisioning::Authenticated => write!(f, "Authenticated"),
            PacProvisioning::Both => write!(f, "Both"),
        }
    }
}

/// EAP-FAST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastMethod {
    tunnel: Tunnel,
    pac_file: Option<PathBuf>,
    provisioning: PacProvisioning,
}

impl FastMethod {
    /// Method filled from an 802.1x setting; GTC inside unless the profile says otherwise.
    pub fn from_setting(
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        Self {
            tunnel: Tunnel::from_setting(TunnelKind::Fast, s, ctx, store),
            pac_file: s.and_then(|s| s.pac_file.clone()),
            provisioning: PacProvisioning::from_profile_value(
                s.and_then(|s| s.phase1_fast_provisioning.as_deref()),
            ),
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

    /// Selected PAC file.
    pub fn pac_file(&self) -> Option<&Path> {
        self.pac_file.as_deref()
    }

    /// Selects the PAC file.
    pub fn set_pac_file(&mut self, path: Option<PathBuf>) {
        self.pac_file = path;
    }

    /// Provisioning mode.
    pub fn provisioning(&self) -> PacProvisioning {
        self.provisioning
    }

    /// Sets the provisioning mode.
    pub fn set_provisioning(&mut self, provisioning: PacProvisioning) {
        self.provisioning = provisioning;
    }

    /// A PAC file is required when provisioning is disabled.
    ///
    /// # Errors
    /// Returns `MissingFile` for the PAC, else the first tunnel failure.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        let has_pac = self
            .pac_file
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty());
        if !self.provisioning.is_enabled() && !has_pac {
            return Err(ValidationError::MissingFile {
                field: Field::PacFile,
            });
        }
        self.tunnel.validate()
    }

    /// Writes `fast`, provisioning mode and PAC file, then the inner method.
    pub fn serialize(&self, s: &mut Ieee8021xSetting, ctx: &EditContext, store: &CaIgnoreStore) {
        self.tunnel.serialize_outer(s, ctx, store);
        s.phase1_fast_provisioning = Some(self.provisioning.profile_value().to_string());
        s.pac_file = self.pac_file.clone();
        self.tunnel.serialize_inner(s, ctx, store);
    }
}
