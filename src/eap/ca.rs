use std::path::{Path, PathBuf};

use tracing::warn;

use crate::{
    ca_ignore::CaIgnoreStore,
    context::EditContext,
    error::{ValidationError, ValidationReport, ValidationWarning},
    material::{MaterialPurpose, validate_material},
    profile::{CertRef, Ieee8021xSetting},
};

/// CA certificate chooser with its "not required" checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaCertField {
    path: Option<PathBuf>,
    not_required: bool,
    phase2: bool,
}

impl CaCertField {
    /// Empty chooser for the outer or inner phase.
    pub fn new(phase2: bool) -> Self {
        Self {
            path: None,
            not_required: false,
            phase2,
        }
    }

    /// Chooser filled from a profile and the connection's CA-ignore row.
    pub fn from_profile(
        s: Option<&Ieee8021xSetting>,
        phase2: bool,
        ctx: &EditContext,
        store: &CaIgnoreStore,
    ) -> Self {
        let cert = s.and_then(|s| {
            if phase2 {
                s.phase2_ca_cert.as_ref()
            } else {
                s.ca_cert.as_ref()
            }
        });
        Self {
            path: cert.map(|c| c.path.clone()),
            not_required: store.get_ignore(&ctx.connection_uuid, phase2),
            phase2,
        }
    }

    /// Selected path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Selects a file. Choosing one unticks "not required".
    pub fn set_path(&mut self, path: Option<PathBuf>) {
        if path.is_some() {
            self.not_required = false;
        }
        self.path = path;
    }

    /// State of the "no CA certificate is required" checkbox.
    pub fn not_required(&self) -> bool {
        self.not_required
    }

    /// Ticking "not required" clears the chooser.
    pub fn set_not_required(&mut self, not_required: bool) {
        if not_required {
            self.path = None;
        }
        self.not_required = not_required;
    }

    /// Whether this chooser belongs to the inner phase.
    pub fn is_phase2(&self) -> bool {
        self.phase2
    }

    /// Checks the selected file; an empty chooser only warns unless waived.
    ///
    /// # Errors
    /// Returns the validator's error for a broken file.
    pub fn validate(&self, report: &mut ValidationReport) -> Result<(), ValidationError> {
        let material = validate_material(self.path(), MaterialPurpose::CaCert, None)?;
        if material.is_none() && !self.not_required {
            report.warn(ValidationWarning::MissingCaCertificate {
                phase2: self.phase2,
            });
        }
        Ok(())
    }

    /// Writes the certificate and records the ignore decision for the connection.
    ///
    /// The connection counts as ignoring CA checks only when "not required" is
    /// ticked, nothing is selected and nothing failed.
    pub fn serialize(&self, s: &mut Ieee8021xSetting, ctx: &EditContext, store: &CaIgnoreStore) {
        let checked = validate_material(self.path(), MaterialPurpose::CaCert, None);
        let ignored = checked.is_ok() && self.path.is_none() && self.not_required;
        store.set_ignore(&ctx.connection_uuid, self.phase2, ignored);

        let cert = match checked {
            Ok(material) => material.map(CertRef::from),
            Err(e) => {
                warn!(error = %e, phase2 = self.phase2, "couldn't write CA certificate");
                None
            }
        };

        if self.phase2 {
            s.phase2_ca_cert = cert;
        } else {
            s.ca_cert = cert;
        }
    }
}
