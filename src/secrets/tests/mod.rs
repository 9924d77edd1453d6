#![allow(clippy::panic)]

use crate::secrets::{
    SecretEntry, SecretFlags, StoragePolicy, apply_policy_to_ui, storage_policy_from_ui,
};

#[test]
fn policy_from_flags() {
    assert_eq!(
        StoragePolicy::from_flags(SecretFlags::empty()),
        StoragePolicy::Stored
    );
    assert_eq!(
        StoragePolicy::from_flags(SecretFlags::AGENT_OWNED),
        StoragePolicy::AgentOwned
    );
    assert_eq!(
        StoragePolicy::from_flags(SecretFlags::NOT_SAVED | SecretFlags::AGENT_OWNED),
        StoragePolicy::NotSaved
    );
    assert_eq!(
        StoragePolicy::from_flags(SecretFlags::NOT_REQUIRED),
        StoragePolicy::Stored
    );
}

#[test]
fn apply_to_keeps_unrelated_bits() {
    let prior = SecretFlags::NOT_REQUIRED | SecretFlags::AGENT_OWNED;

    let merged = StoragePolicy::NotSaved.apply_to(prior);

    assert_eq!(merged, SecretFlags::NOT_REQUIRED | SecretFlags::NOT_SAVED);
    assert_eq!(
        StoragePolicy::Stored.apply_to(prior),
        SecretFlags::NOT_REQUIRED
    );
}

#[test]
fn entering_not_saved_erases_text_and_reveal() {
    let mut entry = SecretEntry::new(StoragePolicy::Stored);
    entry.set_text("hunter2");
    entry.set_show_password(true);
    assert!(entry.show_password());

    apply_policy_to_ui(SecretFlags::NOT_SAVED, &mut entry);

    assert!(entry.is_empty());
    assert!(!entry.show_password());
    assert_eq!(storage_policy_from_ui(&entry), SecretFlags::NOT_SAVED);
}

#[test]
fn not_saved_rejects_text_and_reveal() {
    let mut entry = SecretEntry::new(StoragePolicy::NotSaved);

    entry.set_text("typed");
    entry.set_show_password(true);

    assert_eq!(entry.text(), "");
    assert!(!entry.show_password());
    assert!(entry.is_satisfied());
    assert_eq!(entry.profile_text(), None);
}

#[test]
fn agent_owned_text_is_written() {
    let mut entry = SecretEntry::new(StoragePolicy::AgentOwned);
    entry.set_text("pw");

    assert_eq!(entry.profile_text(), Some("pw"));
    assert_eq!(storage_policy_from_ui(&entry), SecretFlags::AGENT_OWNED);
}

#[test]
fn empty_stored_entry_is_unsatisfied() {
    let entry = SecretEntry::new(StoragePolicy::Stored);

    assert!(!entry.is_satisfied());
    assert_eq!(entry.profile_text(), None);
}

#[test]
fn load_applies_flags_before_text() {
    let mut entry = SecretEntry::default();

    entry.load(Some("leaked"), SecretFlags::NOT_SAVED);
    assert!(entry.is_empty());

    entry.load(Some("kept"), SecretFlags::empty());
    assert_eq!(entry.text(), "kept");
}

#[test]
fn debug_redacts_text() {
    let mut entry = SecretEntry::new(StoragePolicy::Stored);
    entry.set_text("s3cret");

    let rendered = format!("{entry:?}");

    assert!(!rendered.contains("s3cret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn flags_serialize_as_names() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Holder {
        flags: SecretFlags,
    }

    let holder = Holder {
        flags: SecretFlags::AGENT_OWNED | SecretFlags::NOT_REQUIRED,
    };
    let toml_str = toml::to_string(&holder).unwrap();
    let back: Holder = toml::from_str(&toml_str).unwrap();

    assert_eq!(back.flags, holder.flags);
}
