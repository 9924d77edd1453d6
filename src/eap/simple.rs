use std::fmt;

use crate::{
    context::EditContext,
    error::{Field, ValidationError, ValidationReport},
    profile::Ieee8021xSetting,
    secrets::{SecretEntry, StoragePolicy},
};

/// Username and password EAP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    /// Password Authentication Protocol.
    Pap,
    /// Challenge Handshake Authentication Protocol.
    Chap,
    /// Microsoft CHAP.
    Mschap,
    /// Microsoft CHAP version 2.
    Mschapv2,
    /// MD5 challenge.
    Md5,
    /// Generic Token Card.
    Gtc,
    /// EAP-pwd.
    Pwd,
}

impl SimpleKind {
    /// Name written into the profile.
    pub fn eap_name(self) -> &'static str {
        match self {
            SimpleKind::Pap => "pap",
            SimpleKind::Chap => "chap",
            SimpleKind::Mschap => "mschap",
            SimpleKind::Mschapv2 => "mschapv2",
            SimpleKind::Md5 => "md5",
            SimpleKind::Gtc => "gtc",
            SimpleKind::Pwd => "pwd",
        }
    }

    /// Kind for a profile method name.
    pub fn from_eap_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pap" => Some(SimpleKind::Pap),
            "chap" => Some(SimpleKind::Chap),
            "mschap" => Some(SimpleKind::Mschap),
            "mschapv2" => Some(SimpleKind::Mschapv2),
            "md5" => Some(SimpleKind::Md5),
            "gtc" => Some(SimpleKind::Gtc),
            "pwd" => Some(SimpleKind::Pwd),
            _ => None,
        }
    }

    /// Whether the method can run as authenticated EAP inside a tunnel.
    pub fn allows_autheap(self) -> bool {
        matches!(
            self,
            SimpleKind::Mschapv2 | SimpleKind::Md5 | SimpleKind::Gtc
        )
    }
}

impl fmt::Display for SimpleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SimpleKind::Pap => "PAP",
            SimpleKind::Chap => "CHAP",
            SimpleKind::Mschap => "MSCHAP",
            SimpleKind::Mschapv2 => "MSCHAPv2",
            SimpleKind::Md5 => "MD5",
            SimpleKind::Gtc => "GTC",
            SimpleKind::Pwd => "PWD",
        };
        f.write_str(label)
    }
}

/// Where a simple method sits in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Stand-alone outer method.
    Outer,
    /// Inner method written to `phase2-auth`.
    Phase2,
    /// Inner method written to `phase2-autheap`.
    Phase2AuthEap,
}

/// Username plus password method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleMethod {
    kind: SimpleKind,
    phase: Phase,
    username: String,
    password: SecretEntry,
}

impl SimpleMethod {
    /// Empty method. An authenticated-EAP phase is downgraded to plain phase 2
    /// for kinds that cannot run as EAP.
    pub fn new(kind: SimpleKind, phase: Phase, policy: StoragePolicy) -> Self {
        let phase = match phase {
            Phase::Phase2AuthEap if !kind.allows_autheap() => Phase::Phase2,
            other => other,
        };
        Self {
            kind,
            phase,
            username: String::new(),
            password: SecretEntry::new(policy),
        }
    }

    /// Method filled with the identity and password flags of an 802.1x setting.
    pub fn from_setting(
        kind: SimpleKind,
        phase: Phase,
        s: Option<&Ieee8021xSetting>,
        ctx: &EditContext,
    ) -> Self {
        let mut method = Self::new(kind, phase, ctx.default_policy());
        if let Some(s) = s {
            method.username = s.identity.clone().unwrap_or_default();
            method.password.load(None, s.password_flags);
        }
        method
    }

    /// Which method this is.
    pub fn kind(&self) -> SimpleKind {
        self.kind
    }

    /// Position in the chain.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// User name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sets the user name.
    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
    }

    /// Password control.
    pub fn password(&self) -> &SecretEntry {
        &self.password
    }

    /// Mutable password control.
    pub fn password_mut(&mut self) -> &mut SecretEntry {
        &mut self.password
    }

    /// Username must be set; the password too unless it is asked for each time.
    ///
    /// # Errors
    /// Returns `MissingField` for the first empty field.
    pub fn validate(&self) -> Result<ValidationReport, ValidationError> {
        if self.username.is_empty() {
            return Err(ValidationError::MissingField {
                field: Field::Username,
            });
        }
        if !self.password.is_satisfied() {
            return Err(ValidationError::MissingField {
                field: Field::Password,
            });
        }
        Ok(ValidationReport::default())
    }

    /// Writes the method name, identity and password.
    ///
    /// As an outer method any previously listed EAP methods are replaced.
    pub fn serialize(&self, s: &mut Ieee8021xSetting) {
        let name = self.kind.eap_name().to_string();
        match self.phase {
            Phase::Outer => {
                s.eap.clear();
                s.eap.push(name);
            }
            Phase::Phase2 => {
                s.phase2_auth = Some(name);
                s.phase2_autheap = None;
            }
            Phase::Phase2AuthEap => {
                s.phase2_autheap = Some(name);
                s.phase2_auth = None;
            }
        }

        s.identity = Some(self.username.clone());
        s.password_flags = self.password.policy().apply_to(s.password_flags);
        s.password = self.password.profile_text().map(str::to_string);
    }

    /// Reads the stored password back.
    pub fn load_secrets(&mut self, s: &Ieee8021xSetting) {
        self.password.load(s.password.as_deref(), s.password_flags);
    }
}
