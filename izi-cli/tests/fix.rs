use izi_cli::commands::fix::{self, FixError, Rewriter};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn new(path: &Path) -> Self {
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(path).unwrap();
        CwdGuard { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn fix_tree(root: &Path) -> fix::FixReport {
    fix::fix_tree(root, &Rewriter::upgrade().unwrap())
}

const OLD: &str = "izigo.AppName";
const NEW: &str = "izigo.BConfig.AppName";

#[test]
fn rewrites_files_in_place() {
    let tmp = TempDir::new().unwrap();
    let main = write(tmp.path(), "main.go", "fmt.Println(izigo.AppName)\n");
    let conf = write(tmp.path(), "conf/app.conf", "HttpCertFile = cert.pem\n");

    let report = fix_tree(tmp.path());

    assert!(report.failed.is_empty());
    assert_eq!(fs::read_to_string(main).unwrap(), "fmt.Println(izigo.BConfig.AppName)\n");
    assert_eq!(fs::read_to_string(conf).unwrap(), "HTTPSCertFile = cert.pem\n");
}

#[test]
fn visits_files_in_name_order() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "b.go", "");
    write(tmp.path(), "a.go", "");
    write(tmp.path(), "controllers/default.go", "");

    let report = fix_tree(tmp.path());

    let visited: Vec<_> = report
        .fixed
        .iter()
        .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        visited,
        vec![
            PathBuf::from("a.go"),
            PathBuf::from("b.go"),
            PathBuf::from("controllers/default.go"),
        ]
    );
}

#[test]
fn hidden_directories_are_skipped_entirely() {
    let tmp = TempDir::new().unwrap();
    let git = write(tmp.path(), ".git/hooks/pre-commit.go", OLD);
    let nested = write(tmp.path(), "vendor/.cache/deep/x.go", OLD);
    let main = write(tmp.path(), "main.go", OLD);

    let report = fix_tree(tmp.path());

    assert_eq!(fs::read_to_string(git).unwrap(), OLD);
    assert_eq!(fs::read_to_string(nested).unwrap(), OLD);
    assert_eq!(fs::read_to_string(&main).unwrap(), NEW);
    assert_eq!(report.fixed, vec![main]);
}

#[test]
fn hidden_files_are_still_fixed() {
    let tmp = TempDir::new().unwrap();
    let hidden = write(tmp.path(), ".settings.go", OLD);

    fix_tree(tmp.path());

    assert_eq!(fs::read_to_string(hidden).unwrap(), NEW);
}

#[test]
fn hidden_root_is_walked() {
    let tmp = TempDir::new().unwrap();
    let main = write(tmp.path(), ".project/main.go", OLD);

    fix_tree(&tmp.path().join(".project"));

    assert_eq!(fs::read_to_string(main).unwrap(), NEW);
}

#[test]
fn binaries_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let exe = write(tmp.path(), "app.exe", OLD);

    let report = fix_tree(tmp.path());

    assert_eq!(fs::read_to_string(exe).unwrap(), OLD);
    assert!(report.fixed.is_empty());
}

#[test]
fn non_utf8_files_are_processed() {
    let tmp = TempDir::new().unwrap();
    let blob = tmp.path().join("a.bin");
    fs::write(&blob, [0xffu8, 0xfe, 0xfd]).unwrap();
    let main = write(tmp.path(), "main.go", OLD);

    let report = fix_tree(tmp.path());

    assert!(report.failed.is_empty());
    assert_eq!(fs::read(&blob).unwrap(), vec![0xff, 0xfe, 0xfd]);
    assert_eq!(fs::read_to_string(&main).unwrap(), NEW);
    assert_eq!(report.fixed, vec![blob, main]);
}

#[test]
fn latin1_go_source_is_rewritten() {
    let tmp = TempDir::new().unwrap();
    let main = tmp.path().join("main.go");
    fs::write(&main, b"// caf\xe9\nx := izigo.AppName\n").unwrap();
    let logo = tmp.path().join("static/img/logo.png");
    fs::create_dir_all(logo.parent().unwrap()).unwrap();
    let png = [0x89u8, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];
    fs::write(&logo, png).unwrap();

    let report = fix_tree(tmp.path());

    assert!(report.failed.is_empty());
    assert_eq!(
        fs::read(&main).unwrap(),
        b"// caf\xe9\nx := izigo.BConfig.AppName\n".to_vec()
    );
    assert_eq!(fs::read(&logo).unwrap(), png.to_vec());
    assert_eq!(report.fixed, vec![main, logo]);
}

#[test]
fn files_without_matches_are_left_as_is() {
    let tmp = TempDir::new().unwrap();
    let readme = write(tmp.path(), "README.md", "# demo\n");

    let report = fix_tree(tmp.path());

    assert_eq!(report.fixed, vec![readme.clone()]);
    assert_eq!(fs::read_to_string(readme).unwrap(), "# demo\n");
}

#[test]
fn fix_file_shrinks_file() {
    // Truncation before writing: no stale tail from the longer original.
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "orm.go", "orm.DR_Postgres\n");

    Rewriter::upgrade().unwrap().fix_file(&path).unwrap();

    assert_eq!(fs::read_to_string(path).unwrap(), "orm.DRPostgres\n");
}

#[test]
fn fix_file_missing_is_read_error() {
    let tmp = TempDir::new().unwrap();
    let err = Rewriter::upgrade()
        .unwrap()
        .fix_file(&tmp.path().join("missing.go"))
        .unwrap_err();
    assert!(matches!(err, FixError::Read { .. }));
}

#[test]
#[serial]
fn run_upgrades_working_directory() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::new(tmp.path());
    write(tmp.path(), "main.go", OLD);
    write(tmp.path(), ".idea/workspace.go", OLD);

    fix::run().unwrap();

    assert_eq!(fs::read_to_string("main.go").unwrap(), NEW);
    assert_eq!(fs::read_to_string(".idea/workspace.go").unwrap(), OLD);
}
