use tracing::debug;

use crate::{
    ca_ignore::CaIgnoreStore,
    context::{EditContext, Medium},
    eap::{AuthMethod, Credentials, OuterKind},
    error::{SelectionError, ValidationError, ValidationReport},
    profile::{ConnectionProfile, Ieee8021xSetting, WirelessSecuritySetting},
};

/// 802.1x security: WPA enterprise, Dynamic WEP, or wired 802.1x.
///
/// Owns the selected top-level [`AuthMethod`]. Picking another entry from
/// [`OuterKind::menu`] replaces it and carries the credential triple over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseSecurity {
    dynamic_wep: bool,
    medium: Medium,
    method_kind: OuterKind,
    method: AuthMethod,
}

impl EnterpriseSecurity {
    /// Wrapper with the profile's method preselected and filled in.
    pub fn from_profile(
        dynamic_wep: bool,
        profile: &ConnectionProfile,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        let s = profile.ieee8021x.as_ref();
        let method_kind = OuterKind::from_setting(s, ctx.medium);
        Self {
            dynamic_wep,
            medium: ctx.medium,
            method_kind,
            method: method_kind.construct(s, ctx, store),
        }
    }

    /// Whether this is the Dynamic WEP variant.
    pub fn is_dynamic_wep(&self) -> bool {
        self.dynamic_wep
    }

    /// Outer methods offered for this link.
    pub fn menu(&self) -> Vec<OuterKind> {
        OuterKind::menu(self.medium)
    }

    /// Selected menu entry.
    pub fn method_kind(&self) -> OuterKind {
        self.method_kind
    }

    /// Selected method.
    pub fn method(&self) -> &AuthMethod {
        &self.method
    }

    /// Mutable selected method.
    pub fn method_mut(&mut self) -> &mut AuthMethod {
        &mut self.method
    }

    /// Replaces the method. On error the current one is kept.
    ///
    /// # Errors
    /// Returns `NotOffered` when `kind` is unavailable on this link.
    pub fn select_method(
        &mut self,
        kind: OuterKind,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Result<(), SelectionError> {
        if kind == self.method_kind {
            return Ok(());
        }
        let mut next = kind.build(None, ctx, store)?;
        Credentials::capture(&self.method).restore(&mut next);
        self.method = next;
        self.method_kind = kind;
        debug!(method = %kind, "selected 802.1x method");
        Ok(())
    }

    /// Ad-Hoc networks have no authenticator to talk 802.1x to.
    pub fn adhoc_compatible(&self) -> bool {
        false
    }

    /// # Errors
    /// Returns the method chain's first error.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        self.method.validate()
    }

    /// Rebuilds the 802.1x setting from the method chain.
    ///
    /// Secret flags of the previous setting survive. Wireless links also get
    /// a security setting whose key management matches the variant.
    pub fn serialize(
        &self,
        profile: &mut ConnectionProfile,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) {
        let mut s = Ieee8021xSetting::fresh_from(profile.ieee8021x.as_ref());
        if ctx.new_connection {
            s.system_ca_certs = ctx.system_ca_certs;
        }
        self.method.serialize(&mut s, ctx, store);
        profile.ieee8021x = Some(s);

        match self.medium {
            Medium::Wireless => {
                let key_mgmt = if self.dynamic_wep {
                    "ieee8021x"
                } else {
                    "wpa-eap"
                };
                profile.replace_wireless_security(WirelessSecuritySetting::new(key_mgmt));
            }
            Medium::Wired => profile.wireless_security = None,
        }
    }

    /// Reads stored secrets of the method chain back.
    pub fn load_secrets(&mut self, profile: &ConnectionProfile) {
        if let Some(s) = profile.ieee8021x.as_ref() {
            self.method.load_secrets(s);
        }
    }
}
