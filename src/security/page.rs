use tracing::{debug, info, instrument, warn};

use super::{SecurityKind, WirelessSecurity};
use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{SaveError, SelectionError, ValidationError, ValidationReport},
    profile::ConnectionProfile,
};

/// Where the page is in its edit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// No profile loaded yet.
    #[default]
    Uninitialized,
    /// A wrapper is built and filled.
    Configured,
    /// The user changed something since the last check.
    Editing,
    /// The last check passed.
    Validated,
    /// The last check failed.
    Invalid,
    /// The profile has been written.
    Serialized,
}

/// Security tab of a connection editor.
///
/// Holds the selected [`SecurityKind`] and its wrapper. Saving validates,
/// writes the wrapper into the profile and persists the connection's
/// CA-ignore row.
#[derive(Debug)]
pub struct SecurityPage {
    ctx: EditContext,
    store: CaIgnoreStore,
    kind: SecurityKind,
    security: Option<WirelessSecurity>,
    state: PageState,
}

impl SecurityPage {
    /// Empty page for the connection described by `ctx`.
    pub fn new(ctx: EditContext, store: CaIgnoreStore) -> Self {
        Self {
            ctx,
            store,
            kind: SecurityKind::None,
            security: None,
            state: PageState::Uninitialized,
        }
    }

    /// Edit context the page was opened with.
    pub fn context(&self) -> &EditContext {
        &self.ctx
    }

    /// Current state.
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Selected security type.
    pub fn kind(&self) -> SecurityKind {
        self.kind
    }

    /// Types offered for this connection.
    pub fn menu(&self) -> &'static [SecurityKind] {
        SecurityKind::menu(self.ctx.medium)
    }

    /// Configured wrapper, `None` for an open network.
    pub fn security(&self) -> Option<&WirelessSecurity> {
        self.security.as_ref()
    }

    /// Wrapper for editing. Moves the page back to editing.
    pub fn security_mut(&mut self) -> Option<&mut WirelessSecurity> {
        if self.security.is_some() {
            self.state = PageState::Editing;
        }
        self.security.as_mut()
    }

    /// Fills the page from a saved profile, secrets included.
    ///
    /// The persisted CA-ignore row is refreshed first so the "not required"
    /// checkboxes reflect it. A row that can't be read counts as not ignored.
    #[instrument(skip_all, fields(uuid = %self.ctx.connection_uuid))]
    pub fn load(&mut self, profile: &ConnectionProfile) {
        if let Err(e) = self.store.load(&self.ctx.connection_uuid) {
            warn!(error = %e, "couldn't read CA-ignore row");
        }

        self.kind = SecurityKind::from_profile(profile);
        self.security = WirelessSecurity::for_kind(self.kind, profile, &self.ctx, &self.store);
        if let Some(security) = self.security.as_mut() {
            security.load_secrets(profile);
        }
        self.state = PageState::Configured;
        debug!(kind = %self.kind, "loaded security page");
    }

    /// Switches to another security type, building its wrapper afresh.
    ///
    /// # Errors
    /// Returns `NotOffered` when `kind` is not in this connection's menu.
    pub fn select(
        &mut self,
        kind: SecurityKind,
        profile: &ConnectionProfile,
    ) -> Result<(), SelectionError> {
        if !self.menu().contains(&kind) {
            return Err(SelectionError::NotOffered {
                choice: kind.to_string(),
                menu: format!("{} security", self.ctx.medium),
            });
        }
        if kind == self.kind && self.state != PageState::Uninitialized {
            return Ok(());
        }

        let mut blank = profile.clone();
        blank.clear_security();
        self.kind = kind;
        self.security = WirelessSecurity::for_kind(kind, &blank, &self.ctx, &self.store);
        self.state = PageState::Configured;
        debug!(kind = %kind, "selected security type");
        Ok(())
    }

    /// Checks the page against `profile`.
    ///
    /// # Errors
    /// Returns `MissingSsid` for a nameless Wi-Fi profile, `AdhocIncompatible`
    /// when the type can't run Ad-Hoc, else the wrapper's first error.
    pub fn validate(
        &mut self,
        profile: &ConnectionProfile,
    ) -> Result<ValidationReport, ValidationError> {
        let result = self.check(profile);
        self.state = if result.is_ok() {
            PageState::Validated
        } else {
            PageState::Invalid
        };
        result
    }

    fn check(&self, profile: &ConnectionProfile) -> Result<ValidationReport, ValidationError> {
        if profile.is_wireless() && profile.ssid().is_none() {
            return Err(ValidationError::MissingSsid);
        }
        if profile.is_adhoc() && !self.kind.adhoc_compatible() {
            return Err(ValidationError::AdhocIncompatible {
                kind: self.kind.to_string(),
            });
        }
        match self.security.as_ref() {
            Some(security) => security.validate(),
            None => Ok(ValidationReport::default()),
        }
    }

    /// Validates, writes the security settings into `profile` and persists
    /// the CA-ignore row. Nothing is written when validation fails.
    ///
    /// # Errors
    /// Returns the validation error, or the CA-ignore store's write error.
    #[instrument(skip_all, fields(uuid = %self.ctx.connection_uuid, kind = %self.kind))]
    pub fn save(&mut self, profile: &mut ConnectionProfile) -> Result<ValidationReport, SaveError> {
        let report = self.validate(profile)?;
        for warning in report.warnings() {
            warn!(%warning, "saving with warning");
        }

        match self.security.as_ref() {
            Some(security) => security.serialize(profile, &self.ctx, &self.store),
            None => profile.clear_security(),
        }
        self.store.persist(&self.ctx.connection_uuid)?;

        self.state = PageState::Serialized;
        info!("security settings saved");
        Ok(report)
    }
}
