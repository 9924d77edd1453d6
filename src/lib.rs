//! wsec - authentication method composition for 802.1x and WPA connections.
//!
//! wsec models the security tab of a network connection editor without any
//! UI: it builds EAP method chains (inner methods inside TTLS, PEAP or FAST
//! tunnels), wraps them in wireless security types, validates user input and
//! writes the result into a connection profile. The main features include:
//!
//! - Secret storage policies mapped to profile flag bits
//! - Certificate and key sniffing (DER, PEM, PKCS#12)
//! - Inner method switching that keeps the typed credentials
//! - A persisted per-connection "CA certificate not required" table
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wsec::{
//!     ca_ignore::CaIgnoreStore,
//!     config::EngineConfig,
//!     context::EditContext,
//!     eap::OuterKind,
//!     profile::ConnectionProfile,
//!     security::{SecurityKind, SecurityPage, WirelessSecurity},
//! };
//!
//! let config = EngineConfig::default();
//! let mut profile = ConnectionProfile::new_wireless("Campus", "7d1c0f5e", "eduroam");
//! let ctx = EditContext::for_profile(&profile, &config.secrets, true);
//! let store = CaIgnoreStore::in_memory();
//!
//! let mut page = SecurityPage::new(ctx.clone(), store.clone());
//! page.load(&profile);
//! page.select(SecurityKind::WpaEnterprise, &profile)?;
//! if let Some(WirelessSecurity::WpaEap(eap)) = page.security_mut() {
//!     eap.select_method(OuterKind::Peap, &ctx, &store)?;
//!     eap.method_mut().set_username("alice");
//!     eap.method_mut().set_password("s3cret");
//! }
//! let report = page.save(&mut profile)?;
//! for warning in report.warnings() {
//!     println!("warning: {warning}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Per-connection CA-check opt-out table.
pub mod ca_ignore;

/// Engine configuration schema and loading.
pub mod config;

/// Edit session facts shared by methods and wrappers.
pub mod context;

/// Core error types and result aliases.
pub mod core;

/// EAP methods and tunnels.
pub mod eap;

/// Validation errors and warnings.
pub mod error;

/// Certificate and key file validation.
pub mod material;

/// Connection profile model.
pub mod profile;

/// Secret storage policies and flags.
pub mod secrets;

/// Wireless security wrappers and the security page.
pub mod security;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{Result, WsecError};
