use std::fmt;

use tracing::debug;

use super::{
    AuthMethod, FastMethod, LeapMethod, PeapMethod, TlsMethod, TtlsMethod,
    simple::{Phase, SimpleKind, SimpleMethod},
    tunnel::Credentials,
};
use crate::{
    ca_ignore::CaIgnoreStore,
    context::{EditContext, Medium},
    error::SelectionError,
    profile::Ieee8021xSetting,
};

/// Entries of the top-level 802.1x method menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OuterKind {
    /// MD5 challenge, wired only.
    Md5,
    /// EAP-TLS.
    Tls,
    /// LEAP, wireless only.
    Leap,
    /// EAP-pwd.
    Pwd,
    /// EAP-FAST.
    Fast,
    /// EAP-TTLS.
    Ttls,
    /// PEAP.
    Peap,
}

const MENU: [OuterKind; 7] = [
    OuterKind::Md5,
    OuterKind::Tls,
    OuterKind::Leap,
    OuterKind::Pwd,
    OuterKind::Fast,
    OuterKind::Ttls,
    OuterKind::Peap,
];

impl OuterKind {
    /// Menu for `medium`, in display order.
    pub fn menu(medium: Medium) -> Vec<OuterKind> {
        MENU.into_iter()
            .filter(|kind| kind.available_on(medium))
            .collect()
    }

    /// Whether the method makes sense on `medium`.
    pub fn available_on(self, medium: Medium) -> bool {
        match self {
            OuterKind::Md5 => medium == Medium::Wired,
            OuterKind::Leap => medium == Medium::Wireless,
            _ => true,
        }
    }

    /// Name written into the profile's EAP list.
    pub fn eap_name(self) -> &'static str {
        match self {
            OuterKind::Md5 => "md5",
            OuterKind::Tls => "tls",
            OuterKind::Leap => "leap",
            OuterKind::Pwd => "pwd",
            OuterKind::Fast => "fast",
            OuterKind::Ttls => "ttls",
            OuterKind::Peap => "peap",
        }
    }

    /// Kind for a profile method name.
    pub fn from_eap_name(name: &str) -> Option<Self> {
        MENU.into_iter()
            .find(|kind| kind.eap_name().eq_ignore_ascii_case(name))
    }

    /// Entry to preselect: the profile's first EAP method if offered, else the
    /// first entry of the menu.
    pub fn from_setting(s: Option<&Ieee8021xSetting>, medium: Medium) -> Self {
        s.and_then(Ieee8021xSetting::first_eap)
            .and_then(Self::from_eap_name)
            .filter(|kind| kind.available_on(medium))
            .unwrap_or(match medium {
                Medium::Wired => OuterKind::Md5,
                Medium::Wireless => OuterKind::Tls,
            })
    }

    /// Constructs the method, filled from `s` when given.
    ///
    /// # Errors
    /// Returns `NotOffered` when the method is unavailable on the context's medium.
    pub fn build(
        self,
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Result<AuthMethod, SelectionError> {
        if !self.available_on(ctx.medium) {
            return Err(SelectionError::NotOffered {
                choice: self.to_string(),
                menu: format!("{} 802.1x", ctx.medium),
            });
        }
        Ok(self.construct(s, ctx, store))
    }

    /// Constructs the method without checking the medium.
    pub(crate) fn construct(
        self,
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> AuthMethod {
        match self {
            OuterKind::Md5 => {
                AuthMethod::Simple(SimpleMethod::from_setting(SimpleKind::Md5, Phase::Outer, s, ctx))
            }
            OuterKind::Pwd => {
                AuthMethod::Simple(SimpleMethod::from_setting(SimpleKind::Pwd, Phase::Outer, s, ctx))
            }
            OuterKind::Tls => AuthMethod::Tls(TlsMethod::from_setting(false, s, ctx, store)),
            OuterKind::Leap => AuthMethod::Leap(LeapMethod::from_setting(s, ctx)),
            OuterKind::Fast => AuthMethod::Fast(FastMethod::from_setting(s, ctx, store)),
            OuterKind::Ttls => AuthMethod::Ttls(TtlsMethod::from_setting(s, ctx, store)),
            OuterKind::Peap => AuthMethod::Peap(PeapMethod::from_setting(s, ctx, store)),
        }
    }
}

impl fmt::Display for OuterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OuterKind::Md5 => "MD5",
            OuterKind::Tls => "TLS",
            OuterKind::Leap => "LEAP",
            OuterKind::Pwd => "PWD",
            OuterKind::Fast => "FAST",
            OuterKind::Ttls => "Tunneled TLS",
            OuterKind::Peap => "Protected EAP (PEAP)",
        };
        f.write_str(label)
    }
}

/// Replaces the top-level 802.1x method, carrying the credential triple over.
///
/// # Errors
/// Returns `NotOffered` when `new_kind` is unavailable on the context's medium.
pub fn switch_method(
    old: AuthMethod,
    new_kind: OuterKind,
    ctx: &EditContext,
    store: &CaIgnoreStore,
) -> Result<AuthMethod, SelectionError> {
    let mut next = new_kind.build(None, ctx, store)?;
    Credentials::capture(&old).restore(&mut next);
    debug!(method = %new_kind, "switched 802.1x method");
    Ok(next)
}
