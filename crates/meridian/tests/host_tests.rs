//! End-to-end tests for the host built from on-disk configuration.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use meridian::{Command, Host, HostConfig};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write fixture");
}

fn content_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "appsettings.json",
        r#"{
            "ConnectionStrings": {
                "Acme": "|DataDirectory|/acme.db",
                "Globex": "Server=sql;Database=globex"
            }
        }"#,
    );
    write(
        dir.path(),
        "tenants.json",
        r#"[
            { "id": "acme", "connectionStringKey": "Acme", "storageEngine": "sqlite" },
            { "id": "globex", "connectionStringKey": "Globex", "storageEngine": "sqlserver" },
            { "id": "initech", "connectionStringKey": "Initech", "storageEngine": "sqlite" }
        ]"#,
    );
    dir
}

fn config(dir: &TempDir, tenant: Option<&str>) -> HostConfig {
    HostConfig {
        content_root: dir.path().to_path_buf(),
        environment: "Test".to_string(),
        data_dir: dir.path().join("data"),
        tenants: Some(dir.path().join("tenants.json")),
        tenant: tenant.map(String::from),
        command: Command::Binding,
        ..Default::default()
    }
}

/// A tenant with a template binds with the data directory substituted.
#[test]
fn test_binding_from_content_root() {
    let dir = content_root();
    let host = Host::from_config(&config(&dir, Some("acme"))).expect("host");
    let report = host.describe_binding();

    let expected = format!("Data Source={}/acme.db", dir.path().join("data").display());
    assert_eq!(report.status, "bound");
    assert_eq!(report.storage_engine.as_deref(), Some("sqlite"));
    assert_eq!(report.engine_label.as_deref(), Some("SQLite"));
    assert_eq!(report.connection_string.as_deref(), Some(expected.as_str()));
}

/// The environment file overrides the base file.
#[test]
fn test_environment_file_applies() {
    let dir = content_root();
    write(
        dir.path(),
        "appsettings.Test.json",
        r#"{ "ConnectionStrings": { "Globex": "Server=staging;Database=globex" } }"#,
    );
    let host = Host::from_config(&config(&dir, Some("globex"))).expect("host");

    assert_eq!(
        host.describe_binding().connection_string.as_deref(),
        Some("Server=staging;Database=globex")
    );
}

/// A tenant without a template stays unconfigured without failing the host.
#[test]
fn test_tenant_without_template() {
    let dir = content_root();
    let host = Host::from_config(&config(&dir, Some("initech"))).expect("host");
    let report = host.describe_binding();

    assert_eq!(report.tenant.as_deref(), Some("initech"));
    assert_eq!(report.status, "unconfigured");
    assert!(report.connection_string.is_none());
}

/// An unknown tenant ID leaves no active tenant.
#[test]
fn test_unknown_tenant() {
    let dir = content_root();
    let host = Host::from_config(&config(&dir, Some("umbrella"))).expect("host");
    let report = host.describe_binding();

    assert!(report.tenant.is_none());
    assert_eq!(report.status, "unconfigured");
}

/// A missing base settings file fails host construction.
#[test]
fn test_missing_settings_file() {
    let dir = TempDir::new().unwrap();
    let config = HostConfig {
        content_root: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(Host::from_config(&config).is_err());
}

/// The host registers the authenticated policy and synthesizes the rest.
#[test]
fn test_policies() {
    let dir = content_root();
    let host = Host::from_config(&config(&dir, None)).expect("host");

    let authenticated = host.describe_policy("Authenticated");
    assert!(authenticated.found);
    assert!(authenticated.requirement.is_none());

    let view = host.describe_policy("ViewModule");
    let requirement = view.requirement.expect("permission requirement");
    assert_eq!(requirement.permission_name, "View");
    assert!(requirement.require_entity_id);

    assert_eq!(host.policies().store().len(), 2);
}
