//! Unit tests for EAP methods and tunnels.

#![allow(clippy::panic)]

use std::{fs, path::PathBuf};

use tempfile::TempDir;

use crate::{
    ca_ignore::CaIgnoreStore,
    context::{EditContext, Medium},
    eap::{
        AuthMethod, Credentials, FastMethod, InnerKind, OuterKind, PacProvisioning, PeapMethod,
        PeapVersion, Phase, SimpleKind, SimpleMethod, TlsMethod, TtlsMethod, TunnelKind,
        switch_inner, switch_method,
    },
    error::{Field, SelectionError, ValidationError, ValidationWarning},
    material::MaterialFormat,
    profile::{CertRef, Ieee8021xSetting},
    secrets::{SecretFlags, StoragePolicy},
};

const SIMPLE_KINDS: [SimpleKind; 7] = [
    SimpleKind::Pap,
    SimpleKind::Chap,
    SimpleKind::Mschap,
    SimpleKind::Mschapv2,
    SimpleKind::Md5,
    SimpleKind::Gtc,
    SimpleKind::Pwd,
];

fn ctx() -> EditContext {
    EditContext {
        connection_uuid: "uuid-1".to_string(),
        new_connection: false,
        new_secret_policy: StoragePolicy::AgentOwned,
        system_ca_certs: true,
        medium: Medium::Wireless,
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn write(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, data).unwrap();
    path
}

fn peap_with(username: &str, password: &str) -> PeapMethod {
    let store = CaIgnoreStore::in_memory();
    let mut peap = PeapMethod::from_setting(None, &ctx(), &store);
    let inner = peap.tunnel_mut().inner_mut();
    inner.set_username(username);
    inner.set_password(password);
    peap
}

#[test]
fn simple_validate_matches_rule() {
    let cases = [
        ("", "", StoragePolicy::Stored),
        ("", "pw", StoragePolicy::Stored),
        ("bob", "", StoragePolicy::Stored),
        ("bob", "pw", StoragePolicy::Stored),
        ("bob", "", StoragePolicy::NotSaved),
        ("", "", StoragePolicy::NotSaved),
        ("bob", "", StoragePolicy::AgentOwned),
    ];

    for kind in SIMPLE_KINDS {
        for phase in [Phase::Outer, Phase::Phase2, Phase::Phase2AuthEap] {
            for (username, password, policy) in cases {
                let mut method = SimpleMethod::new(kind, phase, policy);
                method.set_username(username);
                method.password_mut().set_text(password);

                let expect_ok = !username.is_empty()
                    && (!password.is_empty() || policy == StoragePolicy::NotSaved);
                assert_eq!(
                    method.validate().is_ok(),
                    expect_ok,
                    "{kind} {phase:?} {username:?} {password:?} {policy}"
                );
            }
        }
    }
}

#[test]
fn simple_missing_fields_point_at_field() {
    let mut method = SimpleMethod::new(SimpleKind::Pap, Phase::Outer, StoragePolicy::Stored);
    let err = method.validate().unwrap_err();
    assert_eq!(err.field(), Field::Username);

    method.set_username("bob");
    let err = method.validate().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::MissingField {
            field: Field::Password
        }
    ));
}

#[test]
fn outer_simple_replaces_stale_methods() {
    let mut s = Ieee8021xSetting {
        eap: vec!["peap".to_string(), "ttls".to_string()],
        ..Ieee8021xSetting::default()
    };
    let mut method = SimpleMethod::new(SimpleKind::Pwd, Phase::Outer, StoragePolicy::Stored);
    method.set_username("bob");

    method.serialize(&mut s);

    assert_eq!(s.eap, vec!["pwd".to_string()]);
}

#[test]
fn autheap_slot_only_inside_ttls() {
    let store = CaIgnoreStore::in_memory();
    let ctx = ctx();

    let cases = [
        (TunnelKind::Ttls, InnerKind::Md5, None, Some("md5")),
        (TunnelKind::Ttls, InnerKind::Gtc, None, Some("gtc")),
        (TunnelKind::Ttls, InnerKind::Mschapv2Eap, None, Some("mschapv2")),
        (TunnelKind::Ttls, InnerKind::Mschapv2, Some("mschapv2"), None),
        (TunnelKind::Ttls, InnerKind::Pap, Some("pap"), None),
        (TunnelKind::Peap, InnerKind::Md5, Some("md5"), None),
        (TunnelKind::Peap, InnerKind::Gtc, Some("gtc"), None),
        (TunnelKind::Fast, InnerKind::Mschapv2, Some("mschapv2"), None),
    ];

    for (tunnel, inner, auth, autheap) in cases {
        let mut method = match tunnel {
            TunnelKind::Ttls => AuthMethod::Ttls(TtlsMethod::from_setting(None, &ctx, &store)),
            TunnelKind::Peap => AuthMethod::Peap(PeapMethod::from_setting(None, &ctx, &store)),
            TunnelKind::Fast => AuthMethod::Fast(FastMethod::from_setting(None, &ctx, &store)),
        };
        match &mut method {
            AuthMethod::Ttls(m) => m.tunnel_mut().select_inner(inner, &ctx).unwrap(),
            AuthMethod::Peap(m) => m.tunnel_mut().select_inner(inner, &ctx).unwrap(),
            AuthMethod::Fast(m) => m.tunnel_mut().select_inner(inner, &ctx).unwrap(),
            _ => panic!("not a tunnel"),
        }

        let mut s = Ieee8021xSetting::default();
        method.serialize(&mut s, &ctx, &store);

        assert_eq!(s.phase2_auth.as_deref(), auth, "{tunnel} {inner}");
        assert_eq!(s.phase2_autheap.as_deref(), autheap, "{tunnel} {inner}");
    }
}

#[test]
fn autheap_phase_downgraded_for_plain_kinds() {
    let method = SimpleMethod::new(SimpleKind::Pap, Phase::Phase2AuthEap, StoragePolicy::Stored);

    assert_eq!(method.phase(), Phase::Phase2);
}

#[test]
fn switch_inner_preserves_credentials() {
    let ctx = ctx();
    for tunnel in [TunnelKind::Ttls, TunnelKind::Peap, TunnelKind::Fast] {
        for from in tunnel.inner_menu() {
            for to in tunnel.inner_menu() {
                let mut old = AuthMethod::Simple(SimpleMethod::new(
                    from.simple(),
                    tunnel.phase_for(*from),
                    StoragePolicy::Stored,
                ));
                old.set_username("alice");
                old.set_password("s3cret");
                old.set_show_password(true);
                let before = Credentials::capture(&old);

                let next = switch_inner(tunnel, old, *to, &ctx).unwrap();

                assert_eq!(Credentials::capture(&next), before, "{tunnel}: {from} -> {to}");
                assert!(next.is_phase2());
            }
        }
    }
}

#[test]
fn select_inner_keeps_typed_values() {
    let mut peap = peap_with("alice", "s3cret");
    peap.tunnel_mut().inner_mut().set_show_password(true);

    peap.tunnel_mut()
        .select_inner(InnerKind::Gtc, &ctx())
        .unwrap();

    let inner = peap.tunnel().inner();
    assert_eq!(peap.tunnel().inner_kind(), InnerKind::Gtc);
    assert_eq!(inner.eap_name(), "gtc");
    assert_eq!(inner.username(), "alice");
    assert_eq!(inner.password(), "s3cret");
    assert!(inner.show_password());
}

#[test]
fn switch_inner_rejects_foreign_entry() {
    let old = AuthMethod::Simple(SimpleMethod::new(
        SimpleKind::Mschapv2,
        Phase::Phase2,
        StoragePolicy::Stored,
    ));

    let err = switch_inner(TunnelKind::Peap, old, InnerKind::Pap, &ctx()).unwrap_err();

    assert!(matches!(err, SelectionError::NotOffered { .. }));
}

#[test]
fn failed_select_keeps_current_inner() {
    let mut peap = peap_with("alice", "pw");

    assert!(peap
        .tunnel_mut()
        .select_inner(InnerKind::Chap, &ctx())
        .is_err());

    assert_eq!(peap.tunnel().inner_kind(), InnerKind::Mschapv2);
    assert_eq!(peap.tunnel().inner().username(), "alice");
}

#[test]
fn switched_inner_takes_default_policy() {
    let mut new_ctx = ctx();
    new_ctx.new_connection = true;
    let old = AuthMethod::Simple(SimpleMethod::new(
        SimpleKind::Pap,
        Phase::Phase2,
        StoragePolicy::Stored,
    ));

    let next = switch_inner(TunnelKind::Ttls, old, InnerKind::Chap, &new_ctx).unwrap();

    let AuthMethod::Simple(simple) = next else {
        panic!("expected a simple method");
    };
    assert_eq!(simple.password().policy(), StoragePolicy::AgentOwned);
}

#[test]
fn tunnel_defaults() {
    let store = CaIgnoreStore::in_memory();
    let ctx = ctx();

    let ttls = TtlsMethod::from_setting(None, &ctx, &store);
    let peap = PeapMethod::from_setting(None, &ctx, &store);
    let fast = FastMethod::from_setting(None, &ctx, &store);

    assert_eq!(ttls.tunnel().inner_kind(), InnerKind::Pap);
    assert_eq!(peap.tunnel().inner_kind(), InnerKind::Mschapv2);
    assert_eq!(peap.version(), PeapVersion::Automatic);
    assert_eq!(fast.tunnel().inner_kind(), InnerKind::Gtc);
    assert_eq!(fast.provisioning(), PacProvisioning::Anonymous);
}

#[test]
fn inner_kind_read_from_setting() {
    let autheap = Ieee8021xSetting {
        phase2_autheap: Some("mschapv2".to_string()),
        ..Ieee8021xSetting::default()
    };
    let auth = Ieee8021xSetting {
        phase2_auth: Some("mschapv2".to_string()),
        ..Ieee8021xSetting::default()
    };
    let unknown = Ieee8021xSetting {
        phase2_auth: Some("pap".to_string()),
        ..Ieee8021xSetting::default()
    };

    assert_eq!(
        TunnelKind::Ttls.inner_from_setting(Some(&autheap)),
        InnerKind::Mschapv2Eap
    );
    assert_eq!(
        TunnelKind::Ttls.inner_from_setting(Some(&auth)),
        InnerKind::Mschapv2
    );
    assert_eq!(
        TunnelKind::Peap.inner_from_setting(Some(&autheap)),
        InnerKind::Mschapv2
    );
    assert_eq!(
        TunnelKind::Fast.inner_from_setting(Some(&unknown)),
        InnerKind::Gtc
    );
}

#[test]
fn peap_version_written_only_when_pinned() {
    let store = CaIgnoreStore::in_memory();
    let mut peap = peap_with("alice", "pw");

    let mut s = Ieee8021xSetting::default();
    peap.serialize(&mut s, &ctx(), &store);
    assert_eq!(s.phase1_peapver, None);

    peap.set_version(PeapVersion::V1);
    peap.serialize(&mut s, &ctx(), &store);
    assert_eq!(s.phase1_peapver.as_deref(), Some("1"));

    assert_eq!(
        PeapVersion::from_profile_value(Some("0")),
        PeapVersion::V0
    );
}

#[test]
fn fast_requires_pac_without_provisioning() {
    let store = CaIgnoreStore::in_memory();
    let mut fast = FastMethod::from_setting(None, &ctx(), &store);
    fast.tunnel_mut().inner_mut().set_username("bob");
    fast.tunnel_mut().inner_mut().set_password("pw");
    assert!(fast.validate().is_ok());

    fast.set_provisioning(PacProvisioning::Disabled);
    let err = fast.validate().unwrap_err();
    assert!(matches!(
        err,
        ValidationError::MissingFile {
            field: Field::PacFile
        }
    ));

    fast.set_pac_file(Some(PathBuf::from("/var/lib/user.pac")));
    assert!(fast.validate().is_ok());
}

#[test]
fn fast_provisioning_values() {
    let store = CaIgnoreStore::in_memory();
    let mut fast = FastMethod::from_setting(None, &ctx(), &store);
    fast.tunnel_mut().inner_mut().set_username("bob");

    for (mode, value) in [
        (PacProvisioning::Disabled, "0"),
        (PacProvisioning::Anonymous, "1"),
        (PacProvisioning::Authenticated, "2"),
        (PacProvisioning::Both, "3"),
    ] {
        fast.set_provisioning(mode);
        let mut s = Ieee8021xSetting::default();
        fast.serialize(&mut s, &ctx(), &store);

        assert_eq!(s.eap, vec!["fast".to_string()]);
        assert_eq!(s.phase1_fast_provisioning.as_deref(), Some(value));
        assert_eq!(PacProvisioning::from_profile_value(Some(value)), mode);
    }
}

#[test]
fn ttls_domain_suffix_only_when_set() {
    let store = CaIgnoreStore::in_memory();
    let mut ttls = TtlsMethod::from_setting(None, &ctx(), &store);

    let mut s = Ieee8021xSetting::default();
    ttls.serialize(&mut s, &ctx(), &store);
    assert_eq!(s.domain_suffix_match, None);

    ttls.set_domain_suffix_match("example.org");
    ttls.serialize(&mut s, &ctx(), &store);
    assert_eq!(s.domain_suffix_match.as_deref(), Some("example.org"));
}

#[test]
fn tls_pkcs12_supersedes_client_cert() {
    let cert = fixture("user.pem");
    let key = fixture("user-key.pem");
    let p12 = fixture("user.p12");
    let mut tls = TlsMethod::new(false, StoragePolicy::Stored);

    tls.set_client_cert(Some(cert.clone()));
    assert_eq!(tls.set_private_key(Some(p12)), None);
    assert_eq!(tls.client_cert(), None);
    assert!(!tls.client_cert_enabled());

    let warning = tls.set_private_key(Some(key.clone()));
    assert!(tls.client_cert_enabled());
    assert_eq!(
        warning,
        Some(ValidationWarning::UnencryptedPrivateKey { path: key })
    );
}

#[test]
fn tls_validation_order() {
    let key = fixture("user-key-enc.pem");
    let mut tls = TlsMethod::new(false, StoragePolicy::Stored);

    assert_eq!(tls.validate().unwrap_err().field(), Field::Identity);

    tls.set_identity("alice");
    assert_eq!(tls.validate().unwrap_err().field(), Field::PrivateKey);

    tls.set_private_key(Some(key));
    assert_eq!(
        tls.validate().unwrap_err().field(),
        Field::PrivateKeyPassword
    );

    tls.key_password_mut().set_text("pw");
    assert!(matches!(
        tls.validate().unwrap_err(),
        ValidationError::MissingFile {
            field: Field::ClientCert
        }
    ));
}

#[test]
fn tls_serializes_pkcs12_as_client_cert() {
    let p12 = fixture("user.p12");
    let store = CaIgnoreStore::in_memory();
    let mut tls = TlsMethod::new(false, StoragePolicy::NotSaved);
    tls.set_identity("alice");
    tls.set_private_key(Some(p12));

    let mut s = Ieee8021xSetting::default();
    tls.serialize(&mut s, &ctx(), &store);

    assert_eq!(s.eap, vec!["tls".to_string()]);
    let key = s.private_key.clone().unwrap();
    assert_eq!(key.format, MaterialFormat::Pkcs12);
    assert_eq!(s.client_cert, Some(key));
    assert_eq!(s.private_key_password, None);
    assert_eq!(s.private_key_password_flags, SecretFlags::NOT_SAVED);
}

#[test]
fn pkcs12_key_ignores_user_certificate() {
    let dir = TempDir::new().unwrap();
    let junk = write(&dir, "junk.pem", b"not a certificate");
    let p12 = fixture("user.p12");
    let store = CaIgnoreStore::in_memory();
    let mut tls = TlsMethod::new(false, StoragePolicy::NotSaved);
    tls.set_identity("alice");
    tls.set_private_key(Some(p12.clone()));

    tls.set_client_cert(Some(junk));

    assert_eq!(tls.client_cert(), None);
    assert!(tls.validate().is_ok());
    let mut s = Ieee8021xSetting::default();
    tls.serialize(&mut s, &ctx(), &store);
    assert_eq!(s.client_cert.unwrap().path, p12.canonicalize().unwrap());
}

#[test]
fn phase2_tls_uses_inner_slots() {
    let p12 = fixture("user.p12");
    let store = CaIgnoreStore::in_memory();
    let mut tls = TlsMethod::new(true, StoragePolicy::Stored);
    tls.set_identity("alice");
    tls.set_private_key(Some(p12));
    tls.key_password_mut().set_text("pw");
    tls.ca_mut().set_not_required(true);

    let mut s = Ieee8021xSetting::default();
    tls.serialize(&mut s, &ctx(), &store);

    let method = AuthMethod::Tls(tls);
    assert!(method.is_phase2());
    assert_eq!(
        method.password_storage_key(),
        "phase2-private-key-password"
    );
    assert_eq!(s.phase2_auth.as_deref(), Some("tls"));
    assert!(s.eap.is_empty());
    assert!(s.phase2_private_key.is_some());
    assert_eq!(s.phase2_private_key_password.as_deref(), Some("pw"));
    assert!(store.get_ignore("uuid-1", true));
}

#[test]
fn ca_error_forces_ignore_off() {
    let store = CaIgnoreStore::in_memory();
    store.set_ignore("uuid-1", false, true);
    let s = Ieee8021xSetting {
        eap: vec!["peap".to_string()],
        ca_cert: Some(CertRef {
            path: PathBuf::from("/nonexistent/ca.pem"),
            format: MaterialFormat::Pem,
        }),
        ..Ieee8021xSetting::default()
    };
    let peap = PeapMethod::from_setting(Some(&s), &ctx(), &store);
    assert!(peap.tunnel().ca().not_required());

    let mut out = Ieee8021xSetting::default();
    peap.serialize(&mut out, &ctx(), &store);

    assert!(!store.get_ignore("uuid-1", false));
    assert_eq!(out.ca_cert, None);
}

#[test]
fn empty_ca_is_an_opt_out_only_when_ticked() {
    let store = CaIgnoreStore::in_memory();
    let mut peap = peap_with("alice", "pw");
    let mut s = Ieee8021xSetting::default();

    peap.serialize(&mut s, &ctx(), &store);
    assert!(!store.get_ignore("uuid-1", false));

    peap.tunnel_mut().ca_mut().set_not_required(true);
    peap.serialize(&mut s, &ctx(), &store);
    assert!(store.get_ignore("uuid-1", false));

    peap.tunnel_mut().ca_mut().set_path(Some(fixture("ca.pem")));
    peap.serialize(&mut s, &ctx(), &store);
    assert!(!store.get_ignore("uuid-1", false));
    assert!(s.ca_cert.is_some());
}

#[test]
fn missing_ca_warns_unless_waived() {
    let mut peap = peap_with("alice", "pw");

    let report = peap.validate().unwrap();
    assert_eq!(
        report.warnings(),
        &[ValidationWarning::MissingCaCertificate { phase2: false }]
    );

    peap.tunnel_mut().ca_mut().set_not_required(true);
    assert!(peap.validate().unwrap().is_clean());
}

#[test]
fn broken_ca_blocks_validation() {
    let dir = TempDir::new().unwrap();
    let junk = write(&dir, "ca.pem", b"not a certificate");
    let mut peap = peap_with("alice", "pw");
    peap.tunnel_mut().ca_mut().set_path(Some(junk));

    let err = peap.validate().unwrap_err();

    assert_eq!(err.field(), Field::CaCert);
}

#[test]
fn outer_menu_depends_on_medium() {
    let wired = OuterKind::menu(Medium::Wired);
    let wireless = OuterKind::menu(Medium::Wireless);

    assert!(wired.contains(&OuterKind::Md5));
    assert!(!wired.contains(&OuterKind::Leap));
    assert!(wireless.contains(&OuterKind::Leap));
    assert!(!wireless.contains(&OuterKind::Md5));
    assert_eq!(wired.len(), 6);
    assert_eq!(wireless.len(), 6);
}

#[test]
fn outer_kind_preselection() {
    let peap = Ieee8021xSetting {
        eap: vec!["peap".to_string()],
        ..Ieee8021xSetting::default()
    };
    let md5 = Ieee8021xSetting {
        eap: vec!["md5".to_string()],
        ..Ieee8021xSetting::default()
    };

    assert_eq!(
        OuterKind::from_setting(Some(&peap), Medium::Wireless),
        OuterKind::Peap
    );
    assert_eq!(
        OuterKind::from_setting(Some(&md5), Medium::Wireless),
        OuterKind::Tls
    );
    assert_eq!(OuterKind::from_setting(None, Medium::Wired), OuterKind::Md5);
}

#[test]
fn switch_method_carries_credentials_into_tls() {
    let store = CaIgnoreStore::in_memory();
    let ctx = ctx();
    let mut leap = OuterKind::Leap.build(None, &ctx, &store).unwrap();
    leap.set_username("alice");
    leap.set_password("pw");

    let tls = switch_method(leap, OuterKind::Tls, &ctx, &store).unwrap();

    assert_eq!(tls.username(), "alice");
    assert_eq!(tls.password(), "pw");
    assert_eq!(tls.default_focus_field(), Field::Identity);
    assert_eq!(tls.password_storage_key(), "private-key-password");
}

#[test]
fn md5_not_offered_on_wireless() {
    let store = CaIgnoreStore::in_memory();

    let err = OuterKind::Md5.build(None, &ctx(), &store).unwrap_err();

    assert!(matches!(err, SelectionError::NotOffered { .. }));
}

#[test]
fn tunnel_capabilities_delegate_to_inner() {
    let peap = AuthMethod::Peap(peap_with("alice", "pw"));

    assert_eq!(peap.username(), "alice");
    assert_eq!(peap.password(), "pw");
    assert_eq!(peap.default_focus_field(), Field::Username);
    assert_eq!(peap.password_storage_key(), "password");
    assert!(!peap.is_phase2());
    assert_eq!(peap.eap_name(), "peap");
}

#[test]
fn load_secrets_reads_inner_password() {
    let store = CaIgnoreStore::in_memory();
    let s = Ieee8021xSetting {
        eap: vec!["ttls".to_string()],
        identity: Some("bob".to_string()),
        phase2_auth: Some("chap".to_string()),
        password: Some("pw".to_string()),
        ..Ieee8021xSetting::default()
    };
    let mut method = OuterKind::Ttls.build(Some(&s), &ctx(), &store).unwrap();
    assert_eq!(method.password(), "");

    method.load_secrets(&s);

    assert_eq!(method.username(), "bob");
    assert_eq!(method.password(), "pw");
}
