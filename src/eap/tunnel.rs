use std::fmt;

use tracing::debug;

use super::{
    AuthMethod,
    ca::CaCertField,
    simple::{Phase, SimpleKind, SimpleMethod},
};
use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{SelectionError, ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
};

/// Tunnelled outer methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TunnelKind {
    /// Tunneled TLS.
    Ttls,
    /// Protected EAP.
    Peap,
    /// Flexible Authentication via Secure Tunneling.
    Fast,
}

const TTLS_MENU: [InnerKind; 7] = [
    InnerKind::Pap,
    InnerKind::Chap,
    InnerKind::Mschap,
    InnerKind::Mschapv2,
    InnerKind::Mschapv2Eap,
    InnerKind::Md5,
    InnerKind::Gtc,
];
const PEAP_MENU: [InnerKind; 3] = [InnerKind::Mschapv2, InnerKind::Md5, InnerKind::Gtc];
const FAST_MENU: [InnerKind; 2] = [InnerKind::Gtc, InnerKind::Mschapv2];

impl TunnelKind {
    /// Name written into the profile's EAP list.
    pub fn eap_name(self) -> &'static str {
        match self {
            TunnelKind::Ttls => "ttls",
            TunnelKind::Peap => "peap",
            TunnelKind::Fast => "fast",
        }
    }

    /// Inner methods the tunnel offers, in menu order.
    pub fn inner_menu(self) -> &'static [InnerKind] {
        match self {
            TunnelKind::Ttls => &TTLS_MENU,
            TunnelKind::Peap => &PEAP_MENU,
            TunnelKind::Fast => &FAST_MENU,
        }
    }

    /// Inner method used when the profile names none.
    pub fn default_inner(self) -> InnerKind {
        match self {
            TunnelKind::Ttls => InnerKind::Pap,
            TunnelKind::Peap => InnerKind::Mschapv2,
            TunnelKind::Fast => InnerKind::Gtc,
        }
    }

    /// Whether `kind` is in the menu.
    pub fn offers(self, kind: InnerKind) -> bool {
        self.inner_menu().contains(&kind)
    }

    /// Profile slot the inner method is written to.
    ///
    /// Only TTLS runs inner methods as authenticated EAP.
    pub fn phase_for(self, kind: InnerKind) -> Phase {
        match (self, kind) {
            (TunnelKind::Ttls, InnerKind::Mschapv2Eap | InnerKind::Md5 | InnerKind::Gtc) => {
                Phase::Phase2AuthEap
            }
            _ => Phase::Phase2,
        }
    }

    /// Inner method named by the profile, falling back to the default.
    pub fn inner_from_setting(self, s: Option<&Ieee8021xSetting>) -> InnerKind {
        let lookup = |name: Option<&str>, autheap: bool| {
            let simple = SimpleKind::from_eap_name(name?)?;
            let kind = match (self, simple, autheap) {
                (TunnelKind::Ttls, SimpleKind::Mschapv2, true) => InnerKind::Mschapv2Eap,
                _ => InnerKind::from_simple(simple)?,
            };
            self.offers(kind).then_some(kind)
        };

        s.and_then(|s| {
            lookup(s.phase2_auth.as_deref(), false)
                .or_else(|| lookup(s.phase2_autheap.as_deref(), true))
        })
        .unwrap_or_else(|| self.default_inner())
    }
}

impl fmt::Display for TunnelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TunnelKind::Ttls => write!(f, "TTLS"),
            TunnelKind::Peap => write!(f, "PEAP"),
            TunnelKind::Fast => write!(f, "FAST"),
        }
    }
}

/// Entries of the inner-method menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InnerKind {
    /// PAP.
    Pap,
    /// CHAP.
    Chap,
    /// MS-CHAP.
    Mschap,
    /// MS-CHAPv2 run directly.
    Mschapv2,
    /// MS-CHAPv2 run as authenticated EAP.
    Mschapv2Eap,
    /// MD5 challenge.
    Md5,
    /// Generic Token Card.
    Gtc,
}

impl InnerKind {
    /// Simple method behind this entry.
    pub fn simple(self) -> SimpleKind {
        match self {
            InnerKind::Pap => SimpleKind::Pap,
            InnerKind::Chap => SimpleKind::Chap,
            InnerKind::Mschap => SimpleKind::Mschap,
            InnerKind::Mschapv2 | InnerKind::Mschapv2Eap => SimpleKind::Mschapv2,
            InnerKind::Md5 => SimpleKind::Md5,
            InnerKind::Gtc => SimpleKind::Gtc,
        }
    }

    fn from_simple(kind: SimpleKind) -> Option<Self> {
        match kind {
            SimpleKind::Pap => Some(InnerKind::Pap),
            SimpleKind::Chap => Some(InnerKind::Chap),
            SimpleKind::Mschap => Some(InnerKind::Mschap),
            SimpleKind::Mschapv2 => Some(InnerKind::Mschapv2),
            SimpleKind::Md5 => Some(InnerKind::Md5),
            SimpleKind::Gtc => Some(InnerKind::Gtc),
            SimpleKind::Pwd => None,
        }
    }
}

impl fmt::Display for InnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InnerKind::Mschapv2Eap => write!(f, "MSCHAPv2 (EAP)"),
            other => write!(f, "{}", other.simple()),
        }
    }
}

/// The credential triple carried across a method switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// User name or identity.
    pub username: String,
    /// Password as typed.
    pub password: String,
    /// Reveal toggle.
    pub show_password: bool,
}

impl Credentials {
    /// Reads the triple from `method`.
    pub fn capture(method: &AuthMethod) -> Self {
        Self {
            username: method.username().to_string(),
            password: method.password().to_string(),
            show_password: method.show_password(),
        }
    }

    /// Writes the triple into `method`.
    pub fn restore(&self, method: &mut AuthMethod) {
        method.set_username(&self.username);
        method.set_password(&self.password);
        method.set_show_password(self.show_password);
    }
}

fn build_inner(
    tunnel: TunnelKind,
    kind: InnerKind,
    s: Option<&Ieee8021xSetting>,
    ctx: &EditContext,
) -> Result<AuthMethod, SelectionError> {
    if !tunnel.offers(kind) {
        return Err(SelectionError::NotOffered {
            choice: kind.to_string(),
            menu: tunnel.to_string(),
        });
    }
    Ok(AuthMethod::Simple(SimpleMethod::from_setting(
        kind.simple(),
        tunnel.phase_for(kind),
        s,
        ctx,
    )))
}

/// Replaces the inner method of a `tunnel` with a fresh `new_kind` method.
///
/// Username, password and the reveal toggle move from `old` to the new
/// method. The storage policy does not; the new method starts from the
/// context's default.
///
/// # Errors
/// Returns `NotOffered` if the tunnel's menu lacks `new_kind`. `old` is
/// dropped in that case.
pub fn switch_inner(
    tunnel: TunnelKind,
    old: AuthMethod,
    new_kind: InnerKind,
    ctx: &EditContext,
) -> Result<AuthMethod, SelectionError> {
    let mut next = build_inner(tunnel, new_kind, None, ctx)?;
    Credentials::capture(&old).restore(&mut next);
    debug!(%tunnel, inner = %new_kind, "switched inner method");
    Ok(next)
}

/// State every tunnel shares: outer identity, CA and the attached inner method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tunnel {
    kind: TunnelKind,
    anonymous_identity: String,
    ca: CaCertField,
    inner_kind: InnerKind,
    inner: Box<AuthMethod>,
}

impl Tunnel {
    /// Tunnel filled from an 802.1x setting.
    pub fn from_setting(
        kind: TunnelKind,
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        let inner_kind = kind.inner_from_setting(s);
        let inner = AuthMethod::Simple(SimpleMethod::from_setting(
            inner_kind.simple(),
            kind.phase_for(inner_kind),
            s,
            ctx,
        ));
        Self {
            kind,
            anonymous_identity: s
                .and_then(|s| s.anonymous_identity.clone())
                .unwrap_or_default(),
            ca: CaCertField::from_profile(s, false, ctx, store),
            inner_kind,
            inner: Box::new(inner),
        }
    }

    /// Which tunnel this is.
    pub fn kind(&self) -> TunnelKind {
        self.kind
    }

    /// Outer identity sent before the tunnel is up.
    pub fn anonymous_identity(&self) -> &str {
        &self.anonymous_identity
    }

    /// Sets the outer identity.
    pub fn set_anonymous_identity(&mut self, identity: &str) {
        self.anonymous_identity = identity.to_string();
    }

    /// CA certificate chooser.
    pub fn ca(&self) -> &CaCertField {
        &self.ca
    }

    /// Mutable CA certificate chooser.
    pub fn ca_mut(&mut self) -> &mut CaCertField {
        &mut self.ca
    }

    /// Menu entry of the attached inner method.
    pub fn inner_kind(&self) -> InnerKind {
        self.inner_kind
    }

    /// Attached inner method.
    pub fn inner(&self) -> &AuthMethod {
        &self.inner
    }

    /// Mutable attached inner method.
    pub fn inner_mut(&mut self) -> &mut AuthMethod {
        &mut self.inner
    }

    /// Switches the inner method, carrying the credential triple over.
    ///
    /// # Errors
    /// Returns `NotOffered` if the menu lacks `kind`; the current method stays attached.
    pub fn select_inner(&mut self, kind: InnerKind, ctx: &EditContext) -> Result<(), SelectionError> {
        let mut next = build_inner(self.kind, kind, None, ctx)?;
        Credentials::capture(&self.inner).restore(&mut next);
        *self.inner = next;
        self.inner_kind = kind;
        debug!(tunnel = %self.kind, inner = %kind, "switched inner method");
        Ok(())
    }

    /// CA check, then the inner method's own validation.
    ///
    /// # Errors
    /// Returns the first failure.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        let mut report = ValidationReport::default();
        self.ca.validate(&mut report)?;
        report.merge(self.inner.validate()?);
        Ok(report)
    }

    /// Writes the method name, outer identity and CA.
    pub fn serialize_outer(
        &self,
        s: &mut Ieee8021xSetting,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) {
        s.eap = vec![self.kind.eap_name().to_string()];
        s.anonymous_identity =
            Some(self.anonymous_identity.clone()).filter(|identity| !identity.is_empty());
        self.ca.serialize(s, ctx, store);
    }

    /// Writes the inner method's phase 2 fields.
    pub fn serialize_inner(
        &self,
        s: &mut Ieee8021xSetting,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) {
        self.inner.serialize(s, ctx, store);
    }
}
