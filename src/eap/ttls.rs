use super::tunnel::{Tunnel, TunnelKind};
use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
};

/// EAP-TTLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlsMethod {
    tunnel: Tunnel,
    domain_suffix_match: String,
}

impl TtlsMethod {
    /// Method filled from an 802.1x setting; PAP inside unless the profile says otherwise.
    pub fn from_setting(
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        Self {
            tunnel: Tunnel::from_setting(TunnelKind::Ttls, s, ctx, store),
            domain_suffix_match: s
                .and_then(|s| s.domain_suffix_match.clone())
                .unwrap_or_default(),
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

    /// Required server domain suffix.
    pub fn domain_suffix_match(&self) -> &str {
        &self.domain_suffix_match
    }

    /// Sets the required server domain suffix.
    pub fn set_domain_suffix_match(&mut self, suffix: &str) {
        self.domain_suffix_match = suffix.to_string();
    }

    /// # Errors
    /// Returns the first failure of the CA or the inner method.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        self.tunnel.validate()
    }

    /// Writes `ttls`, the domain suffix when set, then the inner method.
    pub fn serialize(&self, s: &mut Ieee8021xSetting, ctx: &EditContext, store: &CaIgnoreStore) {
        self.tunnel.serialize_outer(s, ctx, store);
        s.domain_suffix_match =
            Some(self.domain_suffix_match.clone()).filter(|suffix| !suffix.is_empty());
        self.tunnel.serialize_inner(s, ctx, store);
    }
}
