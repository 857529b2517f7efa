//! End-to-end tests for the `merge` command.

mod common;
use common::prelude::*;

use std::fs;

fn fixture() -> TestFixture {
    TestFixture::new()
        .with_config()
        .with_release("v1.0.0")
        .with_release("v1.1.0")
        .with_release("v2.0.0-beta")
}

#[test]
fn test_merge_replaces_release_with_links() {
    let fixture = fixture();
    let out = fixture.out();

    fixture
        .command()
        .args(["merge", "v1.0.0", "v1.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[LINK] v1.0.0 now points to v1.1.0"));

    assert_eq!(fs::read_link(out.join("v1.0.0")).unwrap(), out.join("v1.1.0"));
    assert_eq!(
        fs::read_link(out.join("v1.0.0.tar.gz")).unwrap(),
        out.join("v1.1.0.tar.gz")
    );
    fixture
        .child("out/v1.0.0/index.html")
        .assert(predicate::str::contains("v1.1.0"));
    assert_eq!(
        read_index(&out),
        vec!["HEAD", "HEAD-min", "latest", "v2.0.0-beta", "v1.1.0", "v1.0.0"]
    );
}

#[test]
fn test_merge_twice_is_refused() {
    let fixture = fixture();

    fixture
        .command()
        .args(["merge", "v1.0.0", "v1.1.0"])
        .assert()
        .success();

    fixture
        .command()
        .args(["merge", "v1.0.0", "v2.0.0-beta"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Version v1.0.0 was already merged"));

    assert_eq!(
        fs::read_link(fixture.out().join("v1.0.0")).unwrap(),
        fixture.out().join("v1.1.0")
    );
}

#[test]
fn test_merge_refusals() {
    let fixture = fixture();
    let cases = [
        (["merge", "one", "v1.1.0"], "Invalid version number: one"),
        (["merge", "v1.0.0", "two"], "Invalid version number: two"),
        (["merge", "v0.1.0", "v1.1.0"], "Version v0.1.0 does not exist"),
        (["merge", "v1.0.0", "v3.0.0"], "Version v3.0.0 does not exist"),
        (["merge", "v1.1.0", "v1.0.0"], "\"from\" must be lower than \"to\""),
    ];

    for (args, message) in cases {
        fixture
            .command()
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains(message));
    }

    fixture
        .child("out/v1.0.0")
        .assert(predicate::path::is_dir());
    assert!(!fixture.out().join("v1.0.0").is_symlink());
    assert!(!fixture.out().join("v1.1.0").is_symlink());
    fixture
        .child("out/versions.json")
        .assert(predicate::path::missing());
}

#[test]
fn test_merge_requires_both_arguments() {
    let fixture = fixture();

    fixture
        .command()
        .args(["merge", "v1.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<TO>"));
}
