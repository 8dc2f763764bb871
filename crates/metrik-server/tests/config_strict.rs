#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metrik_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
backup:
  enabled: true
  intervall_ms: 30000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.error_code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(!cfg.backup.enabled);
    assert!(cfg.backup.restore);
    assert_eq!(cfg.backup.path, "metrik-backup.json");
    assert_eq!(cfg.export.interval_ms, 10_000);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
backup:
  enabled: true
  interval_ms: 30000
  restore: false
  path: "/var/lib/metrik/backup.json"
export:
  interval_ms: 500
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(cfg.backup.enabled);
    assert_eq!(cfg.backup.interval_ms, 30_000);
    assert!(!cfg.backup.restore);
    assert_eq!(cfg.export.interval_ms, 500);
}

#[test]
fn unsupported_version_is_rejected() {
    let bad = r#"
version: 2
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.error_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn backup_interval_out_of_range() {
    let bad = r#"
version: 1
backup:
  enabled: true
  interval_ms: 500
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.error_code().as_str(), "CONFIG");
}

#[test]
fn export_interval_out_of_range() {
    let bad = r#"
version: 1
export:
  interval_ms: 50
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.error_code().as_str(), "CONFIG");
}

#[test]
fn enabled_backup_requires_path() {
    let bad = r#"
version: 1
backup:
  enabled: true
  path: ""
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.error_code().as_str(), "CONFIG");
}
