use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn casefix(args: &[&str], dir: &Path) -> Output {
    return Command::new(env!("CARGO_BIN_EXE_casefix"))
        .args(args)
        .arg(dir)
        .output()
        .unwrap();
}

fn touch(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    return fs::read_to_string(root.join(relative)).unwrap();
}

#[test]
fn fix_corrects_image_and_link_case() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Images/Logo.png", "");
    touch(dir.path(), "pages/about.html", "<p>About</p>");
    touch(
        dir.path(),
        "index.html",
        "<html>\n<img src=\"images/logo.PNG\">\n<a href=\"PAGES/About.HTML\">About</a>\n</html>\n",
    );

    let out = casefix(&["fix"], dir.path());
    assert!(out.status.success(), "fix failed: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        read(dir.path(), "index.html"),
        "<html>\n<img src=\"Images/Logo.png\">\n<a href=\"pages/about.html\">About</a>\n</html>\n"
    );
    assert_eq!(read(dir.path(), "pages/about.html"), "<p>About</p>");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("src: images/logo.PNG -> Images/Logo.png"), "stdout: {stdout}");
    assert!(stdout.contains("2 files scanned, 1 rewritten, 0 failed"), "stdout: {stdout}");
}

#[test]
fn dangling_and_external_references_are_untouched() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "X.PNG", "");
    let html = "<img src=\"missing.jpg\"><img src=\"http://example.com/X.PNG\"><a href=\"#top\">";
    touch(dir.path(), "index.html", html);

    let out = casefix(&["fix"], dir.path());
    assert!(out.status.success(), "fix failed: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(read(dir.path(), "index.html"), html);
}

#[test]
fn second_run_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "SubDir/Page2.html", "");
    touch(dir.path(), "index.html", "<a href=\"subdir/page2.HTML\">");

    assert!(casefix(&["fix"], dir.path()).status.success());
    let check = casefix(&["check"], dir.path());
    assert_eq!(check.status.code(), Some(0), "stdout: {}", String::from_utf8_lossy(&check.stdout));
}

#[test]
fn check_reports_pending_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Test.jpg", "");
    touch(dir.path(), "index.html", "<img src=\"test.jpg\">");

    let out = casefix(&["check"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("PENDING"));
    assert_eq!(read(dir.path(), "index.html"), "<img src=\"test.jpg\">");
}

#[test]
fn unwritable_file_is_reported_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Test.jpg", "");
    touch(dir.path(), "a.html", "<img src=\"test.jpg\">");
    touch(dir.path(), "b.html", "<img src=\"test.jpg\">");
    let locked = dir.path().join("a.html");
    let mut perms = fs::metadata(&locked).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&locked, perms).unwrap();

    let out = casefix(&["fix"], dir.path());
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("a.html"));
    assert_eq!(read(dir.path(), "a.html"), "<img src=\"test.jpg\">");
    assert_eq!(read(dir.path(), "b.html"), "<img src=\"Test.jpg\">");
}

#[test]
fn corrects_unicode_names() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Документы/Страница.html", "");
    touch(dir.path(), "index.html", "<a href=\"документы/страница.HTML\">Ссылка</a>");

    assert!(casefix(&["fix"], dir.path()).status.success());
    assert_eq!(read(dir.path(), "index.html"), "<a href=\"Документы/Страница.html\">Ссылка</a>");
}

#[cfg(unix)]
#[test]
fn follows_symlinked_root() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "RealDir/Test.html", "<img src=\"image.jpg\">");
    touch(dir.path(), "RealDir/Image.jpg", "");
    let link = dir.path().join("SymlinkDir");
    std::os::unix::fs::symlink(dir.path().join("RealDir"), &link).unwrap();

    assert!(casefix(&["fix"], &link).status.success());
    assert_eq!(read(dir.path(), "RealDir/Test.html"), "<img src=\"Image.jpg\">");
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
}

#[test]
fn json_report_lists_corrections() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "Test.jpg", "");
    touch(dir.path(), "index.html", "<img src=\"test.jpg\">");

    let out = casefix(&["check", "--format", "json"], dir.path());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["files_scanned"], 1);
    assert_eq!(report["files"][0]["corrections"][0]["corrected"], "Test.jpg");
}

#[test]
fn missing_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = casefix(&["fix"], &dir.path().join("nope"));
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Directory Not Found"));
}

#[test]
fn resolve_prints_on_disk_casing() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "SubDir/Page.html", "");

    let found = casefix(&["resolve"], &dir.path().join("subdir/PAGE.html"));
    assert!(found.status.success());
    assert_eq!(
        String::from_utf8_lossy(&found.stdout).trim(),
        dir.path().join("SubDir/Page.html").to_string_lossy()
    );

    let missing = casefix(&["resolve"], &dir.path().join("subdir/other.html"));
    assert_eq!(missing.status.code(), Some(1));
}
