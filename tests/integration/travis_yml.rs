use gom_cli::templates::TRAVIS_YML_CONTENT;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_gen_travis_yml() {
    let project = TestProject::new();

    project
        .gom()
        .args(["gen", "travis-yml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".travis.yml is generated"));

    assert_eq!(project.read(".travis.yml"), TRAVIS_YML_CONTENT);
}

#[test]
fn test_gen_travis_yml_refuses_to_overwrite() {
    let project = TestProject::new();
    project.tree.write_file("project/.travis.yml", "language: rust\n");

    project
        .gom()
        .args(["gen", "travis-yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".travis.yml already exists"));

    assert_eq!(project.read(".travis.yml"), "language: rust\n");
}
