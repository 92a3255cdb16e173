use izi_cli::commands::version::{
    details, framework_version, logo, parse_go_version, render, RuntimeInfo, VERSION,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn install_framework(gopath: &Path, version_line: &str) {
    let dir = gopath.join("src/github.com/izi-global/izigo");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("izigo.go"),
        format!("package izigo\n\nconst (\n\t{version_line}\n\tDEV = \"dev\"\n)\n"),
    )
    .unwrap();
}

fn sample_info() -> RuntimeInfo {
    RuntimeInfo {
        izi_version: "1.0.0".into(),
        izigo_version: "1.9.2".into(),
        go_version: "go1.22.1".into(),
        os: "linux".into(),
        arch: "x86_64".into(),
        num_cpu: 8,
        gopath: "/home/dev/go".into(),
        date: "Friday, 16 Oct 2026".into(),
    }
}

// ── render ──────────────────────────────────────────────────────────

#[test]
fn render_replaces_all_occurrences() {
    assert_eq!(
        render("{{a}}-{{b}}-{{a}}", &[("a", "1"), ("b", "2")]),
        "1-2-1"
    );
}

#[test]
fn render_leaves_unknown_keys() {
    assert_eq!(render("{{missing}}", &[("a", "1")]), "{{missing}}");
}

// ── banner ──────────────────────────────────────────────────────────

#[test]
fn logo_ends_with_version() {
    assert!(logo().ends_with(&format!("v{VERSION}")));
    assert!(!logo().contains("{{"));
}

#[test]
fn details_lists_runtime_fields() {
    let text = details(&sample_info());
    assert!(text.starts_with("├── IZIGo     : 1.9.2"));
    assert!(text.contains("├── GoVersion : go1.22.1"));
    assert!(text.contains("├── NumCPU    : 8"));
    assert!(text.ends_with("└── Date      : Friday, 16 Oct 2026"));
}

#[test]
fn runtime_info_serializes_to_json() {
    let json = serde_json::to_value(sample_info()).unwrap();
    assert_eq!(json["izigo_version"], "1.9.2");
    assert_eq!(json["num_cpu"], 8);
}

#[test]
fn runtime_info_serializes_to_yaml() {
    let yaml = serde_yaml::to_string(&sample_info()).unwrap();
    assert!(yaml.contains("go_version: go1.22.1"));
}

// ── framework version lookup ────────────────────────────────────────

#[test]
fn framework_version_from_gopath() {
    let tmp = TempDir::new().unwrap();
    install_framework(tmp.path(), "VERSION = \"1.9.2\"");

    assert_eq!(
        framework_version(tmp.path().as_os_str()).as_deref(),
        Some("1.9.2")
    );
}

#[test]
fn framework_version_searches_every_gopath_entry() {
    let empty = TempDir::new().unwrap();
    let installed = TempDir::new().unwrap();
    install_framework(installed.path(), "VERSION = \"2.0.1\"");

    let gopath = std::env::join_paths([empty.path(), installed.path()]).unwrap();
    assert_eq!(framework_version(&gopath).as_deref(), Some("2.0.1"));
}

#[test]
fn framework_version_missing() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(framework_version(tmp.path().as_os_str()), None);
}

#[test]
fn framework_version_without_constant() {
    let tmp = TempDir::new().unwrap();
    install_framework(tmp.path(), "NAME = \"izigo\"");
    assert_eq!(framework_version(tmp.path().as_os_str()), None);
}

// ── go version ──────────────────────────────────────────────────────

#[test]
fn parse_go_version_output() {
    assert_eq!(
        parse_go_version("go version go1.22.1 linux/amd64\n").as_deref(),
        Some("go1.22.1")
    );
    assert_eq!(parse_go_version("garbage"), None);
}
