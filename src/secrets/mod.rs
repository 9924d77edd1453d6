//! Secret storage policy.
//!
//! Maps between the flag bits a connection profile records for each secret and
//! the state of the control the user edits the secret through.

mod entry;
mod flags;
mod policy;

pub use entry::SecretEntry;
pub use flags::SecretFlags;
pub use policy::{StoragePolicy, apply_policy_to_ui, storage_policy_from_ui};

#[cfg(test)]
mod tests;
