use gom_cli::test_utils::TestGit;
use predicates::prelude::*;

use crate::common::{TestProject, count_files, git_available};

#[test]
fn test_gen_lock_pins_and_sanitizes_git_repositories() {
    if !git_available() {
        return;
    }
    let project = TestProject::new();
    let repo = project.vendor_package("github.com/org/repo", "repo", &[]);
    project.vendor_package("github.com/org/repo/sub", "sub", &[]);
    project.vendor_package("example.com/plain", "plain", &[]);
    project.tree.write_file("project/_vendor/src/github.com/org/repo/README", "docs\n");
    let sha = TestGit::new(&repo).init_with_commit().unwrap();

    project.write_gomfile(
        "gom 'example.com/plain'\n\
         gom 'github.com/org/repo'\n\
         gom 'github.com/org/repo/sub'\n",
    );

    let files_before = count_files(&repo, ".git");

    project
        .gom()
        .args(["gen", "lock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gomfile.lock is generated"))
        .stdout(predicate::str::contains("1 of 3 entries have no pinned revision"));

    assert_eq!(
        project.read("Gomfile.lock"),
        format!(
            "gom 'example.com/plain'\n\
             gom 'github.com/org/repo', :commit => '{sha}'\n\
             gom 'github.com/org/repo/sub', :commit => '{sha}'\n"
        )
    );

    assert!(!repo.join(".git").exists());
    assert_eq!(count_files(&repo, ".git"), files_before);
    assert!(repo.join("sub/sub.go").exists());
}

#[test]
fn test_gen_lock_filters_by_group() {
    let project = TestProject::new();
    project.write_gomfile(
        "gom 'a.io/always'\n\
         gom 'b.io/testing', :group => 'test'\n\
         group :development, :test do\n  gom 'c.io/both'\nend\n",
    );

    project.gom().args(["gen", "lock"]).assert().success();
    assert_eq!(project.read("Gomfile.lock"), "gom 'a.io/always'\ngom 'c.io/both'\n");

    std::fs::remove_file(project.project_path().join("Gomfile.lock")).unwrap();
    project.gom().args(["gen", "lock", "--group", "test"]).assert().success();
    assert_eq!(project.read("Gomfile.lock"), "gom 'a.io/always'\ngom 'b.io/testing'\ngom 'c.io/both'\n");

    std::fs::remove_file(project.project_path().join("Gomfile.lock")).unwrap();
    project.gom().args(["gen", "lock"]).env("GOM_ENV", "production").assert().success();
    assert_eq!(project.read("Gomfile.lock"), "gom 'a.io/always'\n");
}

#[test]
fn test_gen_lock_filters_by_goos() {
    let project = TestProject::new();
    project.write_gomfile(
        "gom 'x.io/unix', :goos => ['linux', 'darwin']\n\
         gom 'x.io/win', :goos => 'windows'\n\
         gom 'x.io/any'\n",
    );

    project.gom().args(["gen", "lock", "--goos", "windows"]).assert().success();
    assert_eq!(project.read("Gomfile.lock"), "gom 'x.io/win'\ngom 'x.io/any'\n");

    std::fs::remove_file(project.project_path().join("Gomfile.lock")).unwrap();
    project.gom().args(["gen", "lock"]).env("GOOS", "darwin").assert().success();
    assert_eq!(project.read("Gomfile.lock"), "gom 'x.io/unix'\ngom 'x.io/any'\n");
}

#[test]
fn test_gen_lock_unresolvable_revision_is_not_fatal() {
    let project = TestProject::new();
    let broken = project.vendor_package("bzr.example.org/broken", "broken", &[]);
    project.tree.mkdir("project/_vendor/src/bzr.example.org/broken/.bzr");
    project.vendor_package("example.com/plain", "plain", &[]);
    project.write_gomfile("gom 'bzr.example.org/broken'\ngom 'example.com/plain'\n");

    project.gom().args(["gen", "lock"]).assert().success();

    assert_eq!(project.read("Gomfile.lock"), "gom 'bzr.example.org/broken'\ngom 'example.com/plain'\n");
    // resolved to a root, so its metadata is still stripped
    assert!(!broken.join(".bzr").exists());
    assert!(broken.join("broken.go").exists());
}

#[test]
fn test_gen_lock_removes_internal_roots() {
    let project = TestProject::new();
    project.vendor_package("_internal_roots/example.com/virtual", "virtual", &[]);
    project.vendor_package("example.com/kept", "kept", &[]);
    project.write_gomfile("gom 'example.com/kept'\n");

    project.gom().args(["gen", "lock"]).assert().success();

    assert!(!project.vendor_src().join("_internal_roots").exists());
    assert!(project.vendor_src().join("example.com/kept/kept.go").exists());
}

#[test]
fn test_gen_lock_refuses_to_overwrite() {
    let project = TestProject::new();
    let repo = project.vendor_package("x.io/repo", "repo", &[]);
    project.tree.mkdir("project/_vendor/src/x.io/repo/.hg");
    project.vendor_package("_internal_roots/v", "v", &[]);
    project.write_gomfile("gom 'x.io/repo'\n");
    project.tree.write_file("project/Gomfile.lock", "gom 'x.io/repo', :commit => 'old'\n");

    project
        .gom()
        .args(["gen", "lock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gomfile.lock already exists"));

    assert_eq!(project.read("Gomfile.lock"), "gom 'x.io/repo', :commit => 'old'\n");
    assert!(repo.join(".hg").exists());
    assert!(project.vendor_src().join("_internal_roots/v").exists());
}

#[test]
fn test_gen_lock_requires_gomfile() {
    let project = TestProject::new();

    project.gom().args(["gen", "lock"]).assert().failure();

    assert!(!project.project_path().join("Gomfile.lock").exists());
}

#[test]
fn test_gen_lock_invalid_gomfile() {
    let project = TestProject::new();
    project.write_gomfile("gom 'a.io/x'\nthis is not a gom line\n");

    project
        .gom()
        .args(["gen", "lock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));

    assert!(!project.project_path().join("Gomfile.lock").exists());
}
