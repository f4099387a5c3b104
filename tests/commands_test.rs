use fastsetup::commands::{
    copy_templates, create_folders, generate_from_list, import_packages, replace_manifest, Context,
};
use fastsetup::config::Config;
use fastsetup::error::{Error, Result};
use fastsetup::prompt::Prompter;
use fastsetup::renderer::PlaceholderRenderer;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Answers prompts from fixed values and records what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    confirm_answer: bool,
    selection: Option<usize>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn answering(confirm_answer: bool, selection: Option<usize>) -> Self {
        Self { confirm_answer, selection, asked: RefCell::new(Vec::new()) }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        self.asked.borrow_mut().push(prompt);
        Ok(self.confirm_answer)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        self.asked.borrow_mut().push(format!("{} {:?}", prompt, items));
        Ok(self.selection)
    }
}

fn write(path: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

const MANIFEST: &str = r#"{
  "dependencies": {
    "com.unity.ugui": "1.0.0"
  }
}"#;

#[test_log::test]
fn test_create_folders() {
    let project = TempDir::new().unwrap();
    let outline = write(&project.path().join("outline.txt"), "Core\n  Scripts\nUI\n");
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let report = create_folders(&ctx, &outline, false).unwrap();
    assert_eq!(report.created, 3);
    assert!(project.path().join("Assets/Core/Scripts").is_dir());
    assert!(project.path().join("Assets/UI").is_dir());
}

#[test]
fn test_create_folders_dry_run_writes_nothing() {
    let project = TempDir::new().unwrap();
    let outline = write(&project.path().join("outline.txt"), "Core\n  Scripts\n");
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let report = create_folders(&ctx, &outline, true).unwrap();
    assert_eq!(report.created, 2);
    assert!(!project.path().join("Assets").exists());
}

#[test]
fn test_create_folders_from_empty_outline() {
    let project = TempDir::new().unwrap();
    let outline = write(&project.path().join("outline.txt"), "# nothing\n\n");
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    assert!(matches!(create_folders(&ctx, &outline, false), Err(Error::NoEntries { .. })));
}

#[test_log::test]
fn test_import_packages_writes_manifest() {
    let project = TempDir::new().unwrap();
    let manifest_path = write(&project.path().join("Packages/manifest.json"), MANIFEST);
    let spec = write(
        &project.path().join("packages.txt"),
        "# tools\nregistry acme https://acme.example\nacme com.acme com.acme.pkg 1.0.0\nbroken line\n",
    );
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let outcome = import_packages(&ctx, &spec, false).unwrap();
    assert_eq!(outcome.diagnostics.len(), 1);
    assert_eq!(outcome.dependencies_written, 1);

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(written["dependencies"]["com.unity.ugui"], "1.0.0");
    assert_eq!(written["dependencies"]["com.acme.pkg"], "1.0.0");
    assert_eq!(written["scopedRegistries"][0]["name"], "acme");
}

#[test]
fn test_import_packages_dry_run_keeps_manifest() {
    let project = TempDir::new().unwrap();
    let manifest_path = write(&project.path().join("Packages/manifest.json"), MANIFEST);
    let spec = write(&project.path().join("packages.txt"), "openupm com.tools@1.0.0\n");
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    import_packages(&ctx, &spec, true).unwrap();
    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), MANIFEST);
}

#[test]
fn test_import_packages_without_manifest() {
    let project = TempDir::new().unwrap();
    let spec = write(&project.path().join("packages.txt"), "openupm com.tools@1.0.0\n");
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let result = import_packages(&ctx, &spec, false);
    assert!(matches!(result, Err(Error::InputFileMissing { .. })));
}

#[test]
fn test_replace_manifest_asks_before_replacing() {
    let project = TempDir::new().unwrap();
    let manifest_path = write(&project.path().join("Packages/manifest.json"), MANIFEST);
    let replacement = r#"{"dependencies": {"com.unity.textmeshpro": "3.0.6"}}"#;
    let document = write(&project.path().join("new.json"), replacement);
    let source = document.to_str().unwrap();

    let declining = ScriptedPrompter::answering(false, None);
    let ctx = Context::new(project.path(), Config::default(), &declining);
    assert!(!replace_manifest(&ctx, source, false).unwrap());
    assert_eq!(declining.asked.borrow().len(), 1);
    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), MANIFEST);

    let accepting = ScriptedPrompter::answering(true, None);
    let ctx = Context::new(project.path(), Config::default(), &accepting);
    assert!(replace_manifest(&ctx, source, false).unwrap());
    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), replacement);
}

#[test]
fn test_replace_manifest_rejects_invalid_document_before_asking() {
    let project = TempDir::new().unwrap();
    let manifest_path = write(&project.path().join("Packages/manifest.json"), MANIFEST);
    let document = write(&project.path().join("new.json"), "[1, 2, 3]");

    let prompt = ScriptedPrompter::answering(true, None);
    let ctx = Context::new(project.path(), Config::default(), &prompt);
    let result = replace_manifest(&ctx, document.to_str().unwrap(), true);

    assert!(matches!(result, Err(Error::MalformedManifestDocument(_))));
    assert!(prompt.asked.borrow().is_empty());
    assert_eq!(fs::read_to_string(&manifest_path).unwrap(), MANIFEST);
}

#[test]
fn test_replace_missing_manifest_does_not_ask() {
    let project = TempDir::new().unwrap();
    let document = write(&project.path().join("new.json"), r#"{"dependencies": {}}"#);

    let prompt = ScriptedPrompter::answering(false, None);
    let ctx = Context::new(project.path(), Config::default(), &prompt);
    assert!(replace_manifest(&ctx, document.to_str().unwrap(), false).unwrap());
    assert!(prompt.asked.borrow().is_empty());
    assert!(project.path().join("Packages/manifest.json").is_file());
}

fn scripts_project() -> (TempDir, PathBuf) {
    let project = TempDir::new().unwrap();
    write(
        &project.path().join("Assets/ScriptTemplates/Behaviour.cs.txt"),
        "namespace #NAMESPACE# { class #SCRIPTNAME# { } }",
    );
    write(
        &project.path().join("Assets/ScriptTemplates/Editor.cs.txt"),
        "// editor #NAME#",
    );
    let list = write(
        &project.path().join("scripts.txt"),
        "_Project/UI/MainMenu\n# skip\nCore/Player\n",
    );
    (project, list)
}

#[test_log::test]
fn test_generate_with_named_template() {
    let (project, list) = scripts_project();
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let renderer = PlaceholderRenderer::new();
    let report = generate_from_list(&ctx, &renderer, &list, Some("Behaviour.cs"), None)
        .unwrap()
        .unwrap();
    assert_eq!(report.created, 2);
    assert!(prompt.asked.borrow().is_empty());
    assert_eq!(
        fs::read_to_string(project.path().join("Assets/_Project/UI/MainMenu.cs")).unwrap(),
        "namespace _Project.UI { class MainMenu { } }"
    );
}

#[test]
fn test_generate_with_selected_template() {
    let (project, list) = scripts_project();
    let prompt = ScriptedPrompter::answering(false, Some(1));
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let report = generate_from_list(&ctx, &PlaceholderRenderer::new(), &list, None, None)
        .unwrap()
        .unwrap();
    assert_eq!(report.total, 2);
    assert_eq!(
        fs::read_to_string(project.path().join("Assets/Core/Player.cs")).unwrap(),
        "// editor Player"
    );
}

#[test]
fn test_generate_cancelled_selection_writes_nothing() {
    let (project, list) = scripts_project();
    let prompt = ScriptedPrompter::answering(false, None);
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let report = generate_from_list(&ctx, &PlaceholderRenderer::new(), &list, None, None).unwrap();
    assert!(report.is_none());
    assert!(!project.path().join("Assets/Core").exists());
}

#[test]
fn test_generate_without_templates() {
    let project = TempDir::new().unwrap();
    let list = write(&project.path().join("scripts.txt"), "Core/Player\n");
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let result = generate_from_list(&ctx, &PlaceholderRenderer::new(), &list, None, None);
    assert!(matches!(result, Err(Error::NoTemplatesFound { .. })));
}

#[test]
fn test_generate_with_unknown_template_name() {
    let (project, list) = scripts_project();
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let renderer = PlaceholderRenderer::new();
    let result = generate_from_list(&ctx, &renderer, &list, Some("Missing"), None);
    assert!(matches!(result, Err(Error::TemplateError(_))));
}

#[test]
fn test_copy_templates_into_project() {
    let source = TempDir::new().unwrap();
    write(&source.path().join("81-C# Script-NewBehaviourScript.cs.txt"), "#SCRIPTNAME#");
    write(&source.path().join(".git/HEAD"), "ref: refs/heads/main");
    let project = TempDir::new().unwrap();
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let report = copy_templates(&ctx, source.path()).unwrap();
    assert_eq!(report.files, 1);
    assert!(project
        .path()
        .join("Assets/ScriptTemplates/81-C# Script-NewBehaviourScript.cs.txt")
        .is_file());
    assert!(!project.path().join("Assets/ScriptTemplates/.git").exists());
}

#[test]
fn test_inputs_with_byte_order_mark() {
    let project = TempDir::new().unwrap();
    let manifest_path = write(
        &project.path().join("Packages/manifest.json"),
        &format!("\u{feff}{}", MANIFEST),
    );
    let outline = write(&project.path().join("outline.txt"), "\u{feff}Core\n  Scripts\n");
    let spec = write(
        &project.path().join("packages.txt"),
        "\u{feff}registry acme https://acme.example\nacme com.acme com.acme.pkg 1.0.0\n",
    );
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let report = create_folders(&ctx, &outline, false).unwrap();
    assert_eq!(report.created, 2);
    assert!(project.path().join("Assets/Core/Scripts").is_dir());

    let outcome = import_packages(&ctx, &spec, false).unwrap();
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(outcome.registries_written, 1);
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(written["dependencies"]["com.unity.ugui"], "1.0.0");
    assert_eq!(written["dependencies"]["com.acme.pkg"], "1.0.0");
}

#[test]
fn test_copy_templates_onto_itself_keeps_files() {
    let project = TempDir::new().unwrap();
    let template = write(
        &project.path().join("Assets/ScriptTemplates/Behaviour.cs.txt"),
        "class #SCRIPTNAME# {}",
    );
    let prompt = ScriptedPrompter::default();
    let ctx = Context::new(project.path(), Config::default(), &prompt);

    let result = copy_templates(&ctx, &project.path().join("Assets/ScriptTemplates"));
    assert!(matches!(result, Err(Error::CopyOntoItself { .. })));
    assert_eq!(fs::read_to_string(template).unwrap(), "class #SCRIPTNAME# {}");
}
