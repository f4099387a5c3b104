use fastsetup::copier::{copy_folder, plan_copy};
use fastsetup::error::Error;
use fastsetup::ignore::build_ignore_set;
use fastsetup::operation::FileOperation;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn template_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("81-C# Script-NewBehaviourScript.cs.txt"), "#SCRIPTNAME#");
    write(&dir.path().join("Editor/82-C# Editor-NewEditor.cs.txt"), "#NAMESPACE#");
    dir
}

#[test]
fn test_copy_matches_source() {
    let source = template_folder();
    let project = TempDir::new().unwrap();
    let destination = project.path().join("Assets/ScriptTemplates");

    let ignore = build_ignore_set::<&str>(&[]).unwrap();
    let report = copy_folder(source.path(), &destination, &ignore).unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.directories, 2);
    assert_eq!(report.overwritten, 0);
    assert!(!dir_diff::is_different(source.path(), &destination).unwrap());
}

#[test]
fn test_copy_overwrites_existing_files() {
    let source = template_folder();
    let project = TempDir::new().unwrap();
    let destination = project.path().join("ScriptTemplates");
    write(&destination.join("81-C# Script-NewBehaviourScript.cs.txt"), "stale");

    let ignore = build_ignore_set::<&str>(&[]).unwrap();
    let report = copy_folder(source.path(), &destination, &ignore).unwrap();

    assert_eq!(report.overwritten, 1);
    assert_eq!(
        fs::read_to_string(destination.join("81-C# Script-NewBehaviourScript.cs.txt")).unwrap(),
        "#SCRIPTNAME#"
    );
}

#[test]
fn test_vcs_and_configured_patterns_are_ignored() {
    let source = template_folder();
    write(&source.path().join(".git/config"), "[core]");
    write(&source.path().join("Editor/.DS_Store"), "");
    write(&source.path().join("notes.md"), "draft");
    let project = TempDir::new().unwrap();
    let destination = project.path().join("ScriptTemplates");

    let ignore = build_ignore_set(&["*.md"]).unwrap();
    let report = copy_folder(source.path(), &destination, &ignore).unwrap();

    assert_eq!(report.files, 2);
    assert_eq!(report.ignored, 3);
    assert!(!destination.join(".git").exists());
    assert!(!destination.join("Editor/.DS_Store").exists());
    assert!(!destination.join("notes.md").exists());
}

#[test]
fn test_plan_starts_with_destination() {
    let source = template_folder();
    let project = TempDir::new().unwrap();
    let destination = project.path().join("ScriptTemplates");

    let ignore = build_ignore_set::<&str>(&[]).unwrap();
    let operations = plan_copy(source.path(), &destination, &ignore).unwrap();
    assert_eq!(
        operations[0],
        FileOperation::CreateDirectory { target: destination.clone(), target_exists: false }
    );
    assert!(!destination.exists());
}

#[test]
fn test_missing_source() {
    let project = TempDir::new().unwrap();
    let ignore = build_ignore_set::<&str>(&[]).unwrap();
    let result = copy_folder(&project.path().join("missing"), &project.path().join("out"), &ignore);
    assert!(matches!(result, Err(Error::InputFileMissing { .. })));
}

#[test]
fn test_copy_onto_itself_is_rejected() {
    let source = template_folder();
    let ignore = build_ignore_set::<&str>(&[]).unwrap();

    let result = copy_folder(source.path(), &source.path().join("."), &ignore);
    assert!(matches!(result, Err(Error::CopyOntoItself { .. })));
    assert_eq!(
        fs::read_to_string(source.path().join("81-C# Script-NewBehaviourScript.cs.txt")).unwrap(),
        "#SCRIPTNAME#"
    );
}

#[cfg(unix)]
#[test]
fn test_copy_skips_target_linked_to_its_source() {
    let source = template_folder();
    let project = TempDir::new().unwrap();
    let destination = project.path().join("ScriptTemplates");
    let file = "81-C# Script-NewBehaviourScript.cs.txt";
    fs::create_dir_all(&destination).unwrap();
    std::os::unix::fs::symlink(source.path().join(file), destination.join(file)).unwrap();

    let ignore = build_ignore_set::<&str>(&[]).unwrap();
    let report = copy_folder(source.path(), &destination, &ignore).unwrap();

    assert_eq!(report.files, 1);
    assert_eq!(report.ignored, 1);
    assert_eq!(fs::read_to_string(source.path().join(file)).unwrap(), "#SCRIPTNAME#");
}

#[test]
fn test_nested_vcs_folders_are_ignored() {
    let source = template_folder();
    write(&source.path().join("Editor/.git/HEAD"), "ref: refs/heads/main");
    write(&source.path().join("Editor/Sub/.svn/entries"), "12");
    let project = TempDir::new().unwrap();
    let destination = project.path().join("ScriptTemplates");

    let ignore = build_ignore_set::<&str>(&[]).unwrap();
    let report = copy_folder(source.path(), &destination, &ignore).unwrap();

    assert_eq!(report.files, 2);
    assert!(!destination.join("Editor/.git").exists());
    assert!(!destination.join("Editor/Sub/.svn").exists());
    assert!(destination.join("Editor/Sub").is_dir());
}
