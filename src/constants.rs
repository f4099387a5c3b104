//! Common constants used throughout fastsetup.

/// Supported configuration file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["fastsetup.json", "fastsetup.yml", "fastsetup.yaml"];

pub const DEFAULT_ASSETS_DIR: &str = "Assets";
pub const DEFAULT_MANIFEST_PATH: &str = "Packages/manifest.json";
pub const DEFAULT_SCRIPT_TEMPLATES_DIR: &str = "Assets/ScriptTemplates";
pub const DEFAULT_SCRIPT_EXTENSION: &str = ".cs";

/// Number of spaces a tab expands to in outline files.
pub const TAB_WIDTH: usize = 4;
/// Number of leading spaces that make up one outline nesting level.
pub const SPACES_PER_LEVEL: usize = 2;

pub const OPENUPM_REGISTRY_NAME: &str = "openupm";
pub const OPENUPM_REGISTRY_URL: &str = "https://package.openupm.com";
pub const NPM_REGISTRY_NAME: &str = "npm";
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Template files are picked up by this extension.
pub const TEMPLATE_GLOB: &str = "*.txt";

/// Patterns always skipped when copying a template folder
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &["**/.git", "**/.git/**", "**/.hg", "**/.hg/**", "**/.svn", "**/.svn/**", "**/.DS_Store"];
