use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

#[test]
fn test_gen_gomfile_records_transitive_externals() {
    let project = TestProject::new();
    project.project_package("", "main", &["fmt", "pkgs.io/alpha", "pkgs.io/alpha/sub"]);
    project.gopath_package("pkgs.io/alpha", "alpha", &["fmt", "pkgs.io/beta"]);
    project.gopath_package("pkgs.io/alpha/sub", "sub", &["strings"]);
    project.gopath_package("pkgs.io/beta", "beta", &["os"]);

    project.gom().args(["gen", "gomfile"]).assert().success().stdout(predicate::str::contains("Gomfile is generated"));

    assert_eq!(project.read("Gomfile"), "gom 'pkgs.io/alpha'\ngom 'pkgs.io/alpha/sub'\ngom 'pkgs.io/beta'\n");
}

#[test]
fn test_gen_gomfile_is_deterministic() {
    let project = TestProject::new();
    project.project_package("", "main", &["z.io/c", "./cmd", "a.io/a"]);
    project.project_package("cmd", "cmd", &["m.io/b", "a.io/a"]);
    project.gopath_package("z.io/c", "c", &[]);
    project.gopath_package("a.io/a", "a", &["m.io/b"]);
    project.gopath_package("m.io/b", "b", &[]);

    project.gom().args(["gen", "gomfile"]).assert().success();
    let first = project.read("Gomfile");

    fs::remove_file(project.project_path().join("Gomfile")).unwrap();
    project.gom().args(["gen", "gomfile"]).assert().success();

    assert_eq!(project.read("Gomfile"), first);
    assert_eq!(first, "gom 'a.io/a'\ngom 'm.io/b'\ngom 'z.io/c'\n");
}

#[test]
fn test_gen_gomfile_excludes_standard_imports_at_any_depth() {
    let project = TestProject::new();
    project.project_package("", "main", &["net/http", "x.io/top"]);
    project.gopath_package("x.io/top", "top", &["encoding/json", "x.io/deep"]);
    project.gopath_package("x.io/deep", "deep", &["sync", "internal/private"]);

    project.gom().args(["gen", "gomfile"]).assert().success();

    let gomfile = project.read("Gomfile");
    assert_eq!(gomfile, "gom 'x.io/deep'\ngom 'x.io/top'\n");
    assert!(!gomfile.contains("net/http"));
}

#[test]
fn test_gen_gomfile_prefers_vendored_copy() {
    let project = TestProject::new();
    project.project_package("", "main", &["x.io/lib"]);
    project.vendor_package("x.io/lib", "lib", &["x.io/vendored-only"]);
    project.vendor_package("x.io/vendored-only", "only", &[]);
    project.gopath_package("x.io/lib", "lib", &["x.io/gopath-only"]);

    project.gom().args(["gen", "gomfile"]).assert().success();

    assert_eq!(project.read("Gomfile"), "gom 'x.io/lib'\ngom 'x.io/vendored-only'\n");
}

#[test]
fn test_gen_gomfile_vendor_name_from_env() {
    let project = TestProject::new();
    project.project_package("", "main", &["x.io/lib"]);
    project.tree.write_package("project/deps/src/x.io/lib", "lib", &[]);

    project.gom().args(["gen", "gomfile"]).env("GOM_VENDOR_NAME", "deps").assert().success();

    assert_eq!(project.read("Gomfile"), "gom 'x.io/lib'\n");
}

#[test]
fn test_gen_gomfile_refuses_to_overwrite() {
    let project = TestProject::new();
    project.project_package("", "main", &["x.io/lib"]);
    project.gopath_package("x.io/lib", "lib", &[]);
    project.write_gomfile("gom 'hand.io/written'\n");

    project
        .gom()
        .args(["gen", "gomfile"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Gomfile already exists"));

    assert_eq!(project.read("Gomfile"), "gom 'hand.io/written'\n");
}

#[test]
fn test_gen_gomfile_unresolvable_import_writes_nothing() {
    let project = TestProject::new();
    project.project_package("", "main", &["x.io/present", "x.io/missing"]);
    project.gopath_package("x.io/present", "present", &[]);

    project
        .gom()
        .args(["gen", "gomfile"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("x.io/missing"));

    assert!(!project.project_path().join("Gomfile").exists());
}

#[test]
fn test_gen_gomfile_syntax_error_writes_nothing() {
    let project = TestProject::new();
    project.tree.write_file("project/main.go", "package main\n\nimport (\n\t\"x.io/unterminated\n)\n");

    project.gom().args(["gen", "gomfile"]).assert().failure();

    assert!(!project.project_path().join("Gomfile").exists());
}

#[test]
fn test_gen_gomfile_honors_build_constraints() {
    let project = TestProject::new();
    project.project_package("", "main", &["x.io/sys/unix"]);
    project.tree.write_file("project/main_plan9.go", "package main\n\nimport \"x.io/not-vendored\"\n");
    project.gopath_package("x.io/sys/unix", "unix", &["x.io/sys/internal"]);
    project.gopath_package("x.io/sys/internal", "internal", &[]);
    project.tree.write_file(
        "gopath/src/x.io/sys/unix/mkpost.go",
        "//go:build ignore\n\npackage main\n\nimport \"x.io/generator\"\n",
    );

    project.gom().args(["gen", "gomfile"]).assert().success();

    assert_eq!(project.read("Gomfile"), "gom 'x.io/sys/internal'\ngom 'x.io/sys/unix'\n");
}

#[test]
fn test_gen_gomfile_ignores_errors_past_the_imports() {
    let project = TestProject::new();
    project.tree.write_file(
        "project/main.go",
        "package main\n\nimport \"x.io/lib\"\n\nfunc main() {\n\t/* never closed\n}\n",
    );
    project.gopath_package("x.io/lib", "lib", &[]);

    project.gom().args(["gen", "gomfile"]).assert().success();

    assert_eq!(project.read("Gomfile"), "gom 'x.io/lib'\n");
}
