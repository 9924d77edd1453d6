//! EAP method composition.
//!
//! Every method, inner or outer, is a variant of [`AuthMethod`] and answers the
//! same set of questions: validate, serialize, load secrets, and get or set the
//! credential triple. Tunnels own exactly one inner method, replaced in place
//! when the user picks another entry from the tunnel's menu.

mod ca;
mod fast;
mod leap;
mod outer;
mod peap;
mod simple;
mod tls;
mod ttls;
mod tunnel;

pub use ca::CaCertField;
pub use fast::{FastMethod, PacProvisioning};
pub use leap::LeapMethod;
pub use outer::{OuterKind, switch_method};
pub use peap::{PeapMethod, PeapVersion};
pub use simple::{Phase, SimpleKind, SimpleMethod};
pub use tls::TlsMethod;
pub use ttls::TtlsMethod;
pub use tunnel::{Credentials, InnerKind, Tunnel, TunnelKind, switch_inner};

use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{Field, ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
    secrets::SecretEntry,
};

/// An EAP method, possibly wrapping another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// Username and password method.
    Simple(SimpleMethod),
    /// Certificate method.
    Tls(TlsMethod),
    /// LEAP over 802.1x.
    Leap(LeapMethod),
    /// TTLS tunnel.
    Ttls(TtlsMethod),
    /// PEAP tunnel.
    Peap(PeapMethod),
    /// FAST tunnel.
    Fast(FastMethod),
}

impl AuthMethod {
    /// The password-like control of the leaf method.
    fn secret(&self) -> &SecretEntry {
        match self {
            AuthMethod::Simple(m) => m.password(),
            AuthMethod::Tls(m) => m.key_password(),
            AuthMethod::Leap(m) => m.password(),
            AuthMethod::Ttls(m) => m.tunnel().inner().secret(),
            AuthMethod::Peap(m) => m.tunnel().inner().secret(),
            AuthMethod::Fast(m) => m.tunnel().inner().secret(),
        }
    }

    fn secret_mut(&mut self) -> &mut SecretEntry {
        match self {
            AuthMethod::Simple(m) => m.password_mut(),
            AuthMethod::Tls(m) => m.key_password_mut(),
            AuthMethod::Leap(m) => m.password_mut(),
            AuthMethod::Ttls(m) => m.tunnel_mut().inner_mut().secret_mut(),
            AuthMethod::Peap(m) => m.tunnel_mut().inner_mut().secret_mut(),
            AuthMethod::Fast(m) => m.tunnel_mut().inner_mut().secret_mut(),
        }
    }

    /// Name of the method as written into the profile.
    pub fn eap_name(&self) -> &'static str {
        match self {
            AuthMethod::Simple(m) => m.kind().eap_name(),
            AuthMethod::Tls(_) => "tls",
            AuthMethod::Leap(_) => "leap",
            AuthMethod::Ttls(_) => TunnelKind::Ttls.eap_name(),
            AuthMethod::Peap(_) => TunnelKind::Peap.eap_name(),
            AuthMethod::Fast(_) => TunnelKind::Fast.eap_name(),
        }
    }

    /// Checks the whole chain, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first field that blocks saving.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        match self {
            AuthMethod::Simple(m) => m.validate(),
            AuthMethod::Tls(m) => m.validate(),
            AuthMethod::Leap(m) => m.validate(),
            AuthMethod::Ttls(m) => m.validate(),
            AuthMethod::Peap(m) => m.validate(),
            AuthMethod::Fast(m) => m.validate(),
        }
    }

    /// Writes the chain into an 802.1x setting.
    pub fn serialize(&self, s: &mut Ieee8021xSetting, ctx: &EditContext, store: &CaIgnoreStore) {
        match self {
            AuthMethod::Simple(m) => m.serialize(s),
            AuthMethod::Tls(m) => m.serialize(s, ctx, store),
            AuthMethod::Leap(m) => m.serialize(s),
            AuthMethod::Ttls(m) => m.serialize(s, ctx, store),
            AuthMethod::Peap(m) => m.serialize(s, ctx, store),
            AuthMethod::Fast(m) => m.serialize(s, ctx, store),
        }
    }

    /// Reads stored secrets of the chain back from an 802.1x setting.
    pub fn load_secrets(&mut self, s: &Ieee8021xSetting) {
        match self {
            AuthMethod::Simple(m) => m.load_secrets(s),
            AuthMethod::Tls(m) => m.load_secrets(s),
            AuthMethod::Leap(m) => m.load_secrets(s),
            AuthMethod::Ttls(m) => m.tunnel_mut().inner_mut().load_secrets(s),
            AuthMethod::Peap(m) => m.tunnel_mut().inner_mut().load_secrets(s),
            AuthMethod::Fast(m) => m.tunnel_mut().inner_mut().load_secrets(s),
        }
    }

    /// User name, or identity for TLS.
    pub fn username(&self) -> &str {
        match self {
            AuthMethod::Simple(m) => m.username(),
            AuthMethod::Tls(m) => m.identity(),
            AuthMethod::Leap(m) => m.username(),
            AuthMethod::Ttls(m) => m.tunnel().inner().username(),
            AuthMethod::Peap(m) => m.tunnel().inner().username(),
            AuthMethod::Fast(m) => m.tunnel().inner().username(),
        }
    }

    /// Sets the user name, or identity for TLS.
    pub fn set_username(&mut self, username: &str) {
        match self {
            AuthMethod::Simple(m) => m.set_username(username),
            AuthMethod::Tls(m) => m.set_identity(username),
            AuthMethod::Leap(m) => m.set_username(username),
            AuthMethod::Ttls(m) => m.tunnel_mut().inner_mut().set_username(username),
            AuthMethod::Peap(m) => m.tunnel_mut().inner_mut().set_username(username),
            AuthMethod::Fast(m) => m.tunnel_mut().inner_mut().set_username(username),
        }
    }

    /// Password text, or the private key password for TLS.
    pub fn password(&self) -> &str {
        self.secret().text()
    }

    /// Sets the password text. Ignored under a not-saved policy.
    pub fn set_password(&mut self, password: &str) {
        self.secret_mut().set_text(password);
    }

    /// Whether the password is revealed.
    pub fn show_password(&self) -> bool {
        self.secret().show_password()
    }

    /// Reveals or hides the password.
    pub fn set_show_password(&mut self, show: bool) {
        self.secret_mut().set_show_password(show);
    }

    /// Field to focus when the method is first shown.
    pub fn default_focus_field(&self) -> Field {
        match self {
            AuthMethod::Simple(_) | AuthMethod::Leap(_) => Field::Username,
            AuthMethod::Tls(_) => Field::Identity,
            AuthMethod::Ttls(m) => m.tunnel().inner().default_focus_field(),
            AuthMethod::Peap(m) => m.tunnel().inner().default_focus_field(),
            AuthMethod::Fast(m) => m.tunnel().inner().default_focus_field(),
        }
    }

    /// Profile key that stores the password this method asks for.
    pub fn password_storage_key(&self) -> &'static str {
        match self {
            AuthMethod::Simple(_) | AuthMethod::Leap(_) => "password",
            AuthMethod::Tls(m) if m.is_phase2() => "phase2-private-key-password",
            AuthMethod::Tls(_) => "private-key-password",
            AuthMethod::Ttls(m) => m.tunnel().inner().password_storage_key(),
            AuthMethod::Peap(m) => m.tunnel().inner().password_storage_key(),
            AuthMethod::Fast(m) => m.tunnel().inner().password_storage_key(),
        }
    }

    /// Whether this method runs inside a tunnel.
    pub fn is_phase2(&self) -> bool {
        match self {
            AuthMethod::Simple(m) => m.phase() != Phase::Outer,
            AuthMethod::Tls(m) => m.is_phase2(),
            AuthMethod::Leap(_)
            | AuthMethod::Ttls(_)
            | AuthMethod::Peap(_)
            | AuthMethod::Fast(_) => false,
        }
    }
}

#[cfg(test)]
mod tests;
