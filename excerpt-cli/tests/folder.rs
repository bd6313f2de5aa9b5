use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn folder_processes_matching_files_only() {
    let vault = tempdir().unwrap();
    let notes = vault.path().join("Notes");
    fs::create_dir_all(notes.join("sub")).unwrap();
    fs::write(notes.join("a.md"), "# A\n==quote a==").unwrap();
    fs::write(notes.join("b.md"), "# B\n%%comment b%%").unwrap();
    fs::write(notes.join("c.txt"), "# C\n==not picked up==").unwrap();
    fs::write(notes.join("sub").join("d.md"), "# D\n==too deep==").unwrap();

    let mut cmd = cargo_bin_cmd!("excerpt");
    cmd.arg("folder").arg(&notes).arg("--vault").arg(vault.path());
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("Processed: Notes/a.md")
                .and(predicate::str::contains("Processed: Notes/b.md"))
                .and(predicate::str::contains("Folder processed: 2 extracted, 0 failed"))
                .and(predicate::str::contains("c.txt").not())
                .and(predicate::str::contains("d.md").not()),
        );

    let note_a = fs::read_to_string(vault.path().join("Extract/a.md")).unwrap();
    assert!(note_a.contains("> quote a"));
    let note_b = fs::read_to_string(vault.path().join("Extract/b.md")).unwrap();
    assert!(note_b.contains("comment b"));
    assert!(!vault.path().join("Extract/c.txt").exists());
}

#[test]
fn folder_respects_a_custom_pattern() {
    let vault = tempdir().unwrap();
    let notes = vault.path().join("Notes");
    fs::create_dir_all(&notes).unwrap();
    fs::write(notes.join("a.md"), "# A\n==quote a==").unwrap();

    let mut cmd = cargo_bin_cmd!("excerpt");
    cmd.arg("folder")
        .arg(&notes)
        .arg("--vault")
        .arg(vault.path())
        .arg("--pattern")
        .arg("Cited/{1:}");
    cmd.assert().success();

    assert!(vault.path().join("Cited/Notes/a.md").exists());
}

#[test]
fn folder_continues_past_unreadable_files() {
    let vault = tempdir().unwrap();
    let notes = vault.path().join("Notes");
    fs::create_dir_all(&notes).unwrap();
    fs::write(notes.join("a.md"), "# A\n==quote a==").unwrap();
    // Not valid UTF-8, so reading it as text fails.
    fs::write(notes.join("bad.md"), [0xf0, 0x28, 0x8c, 0x28]).unwrap();

    let mut cmd = cargo_bin_cmd!("excerpt");
    cmd.arg("folder").arg(&notes).arg("--vault").arg(vault.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Folder processed: 1 extracted, 1 failed"))
        .stderr(predicate::str::contains("bad.md"));

    assert!(vault.path().join("Extract/a.md").exists());
}

#[test]
fn missing_folder_fails() {
    let vault = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("excerpt");
    cmd.arg("folder")
        .arg(vault.path().join("absent"))
        .arg("--vault")
        .arg(vault.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("absent"));
}
