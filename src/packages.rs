//! Package spec files and their merge into the manifest.
//!
//! A spec file is line oriented. Each line starts with a keyword or the name
//! of a registry declared earlier in the file:
//!
//! ```text
//! # registries
//! registry acme https://acme.example/registry
//! acme com.acme com.acme.tools 1.0.0
//! git com.example.tool https://github.com/example/tool.git#v2.0.0
//! openupm com.cysharp.unitask@2.5.10
//! ```
//!
//! Comments are full-line only since git URLs use `#` for revisions.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};

use crate::constants::{
    NPM_REGISTRY_NAME, NPM_REGISTRY_URL, OPENUPM_REGISTRY_NAME, OPENUPM_REGISTRY_URL,
};
use crate::error::{Error, Result};
use crate::manifest::{Manifest, ScopedRegistry};

/// Registries with a fixed URL that can be used without a `registry` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownRegistry {
    OpenUpm,
    Npm,
}

impl WellKnownRegistry {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            OPENUPM_REGISTRY_NAME => Some(Self::OpenUpm),
            NPM_REGISTRY_NAME => Some(Self::Npm),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenUpm => OPENUPM_REGISTRY_NAME,
            Self::Npm => NPM_REGISTRY_NAME,
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Self::OpenUpm => OPENUPM_REGISTRY_URL,
            Self::Npm => NPM_REGISTRY_URL,
        }
    }
}

/// One meaningful line of a spec file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `registry <name> <url>`
    Registry { name: String, url: String },
    /// `git <package> <url>`
    Git { package: String, url: String },
    /// `openupm <package>@<version>` or `npm <package>@<version>`
    WellKnown { registry: WellKnownRegistry, package: String, version: String },
    /// `<registry> <scope> <package> <version>`
    Package { registry: String, scope: String, package: String, version: String },
}

fn malformed(line: usize, content: &str, reason: &str) -> Error {
    Error::MalformedSpecLine { line, content: content.to_string(), reason: reason.to_string() }
}

/// Parses a single spec line.
///
/// `line_no` is 1-based and only used for diagnostics. Returns `Ok(None)`
/// for blank and comment lines.
///
/// # Errors
/// * `Error::MalformedSpecLine` if the token count or shape is wrong
pub fn parse_directive(line_no: usize, raw_line: &str) -> Result<Option<Directive>> {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let directive = match parts[0] {
        "registry" => match parts.as_slice() {
            [_, name, url] => {
                Directive::Registry { name: name.to_string(), url: url.to_string() }
            }
            _ => return Err(malformed(line_no, line, "expected 'registry <name> <url>'")),
        },
        "git" => match parts.as_slice() {
            [_, package, url] => {
                Directive::Git { package: package.to_string(), url: url.to_string() }
            }
            _ => return Err(malformed(line_no, line, "expected 'git <package> <url>'")),
        },
        keyword => match WellKnownRegistry::from_keyword(keyword) {
            Some(registry) => parse_well_known(line_no, line, registry, &parts)?,
            None => parse_package(line_no, line, &parts)?,
        },
    };

    Ok(Some(directive))
}

fn parse_well_known(
    line_no: usize,
    line: &str,
    registry: WellKnownRegistry,
    parts: &[&str],
) -> Result<Directive> {
    let [_, versioned] = parts else {
        return Err(malformed(
            line_no,
            line,
            &format!("expected '{} <package>@<version>'", registry.name()),
        ));
    };
    match versioned.rsplit_once('@') {
        Some((package, version)) if !package.is_empty() && !version.is_empty() => {
            Ok(Directive::WellKnown {
                registry,
                package: package.to_string(),
                version: version.to_string(),
            })
        }
        _ => Err(malformed(line_no, line, "package must be written as <package>@<version>")),
    }
}

fn parse_package(line_no: usize, line: &str, parts: &[&str]) -> Result<Directive> {
    match parts {
        [registry, scope, package, version] => Ok(Directive::Package {
            registry: registry.to_string(),
            scope: scope.to_string(),
            package: package.to_string(),
            version: version.to_string(),
        }),
        _ => Err(malformed(line_no, line, "expected '<registry> <scope> <package> <version>'")),
    }
}

/// A registry declared in a spec file, with the scopes collected for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryDescriptor {
    pub name: String,
    pub url: String,
    pub scopes: IndexSet<String>,
}

/// Everything a spec file asks for, before it is merged into a manifest.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Declared registries in declaration order
    pub registries: IndexMap<String, RegistryDescriptor>,
    /// Dependencies to upsert, last write wins
    pub dependencies: IndexMap<String, String>,
}

impl PackageSpec {
    /// Applies one directive. Fails only for references to undeclared
    /// registries.
    pub fn apply(&mut self, line_no: usize, directive: Directive) -> Result<()> {
        match directive {
            Directive::Registry { name, url } => {
                debug!("Declaring registry '{}' at '{}'", name, url);
                self.registries
                    .entry(name.clone())
                    .and_modify(|r| r.url = url.clone())
                    .or_insert_with(|| RegistryDescriptor { name, url, scopes: IndexSet::new() });
            }
            Directive::Git { package, url } => {
                self.dependencies.insert(package, url);
            }
            Directive::WellKnown { registry, package, version } => {
                let descriptor =
                    self.registries.entry(registry.name().to_string()).or_insert_with(|| {
                        RegistryDescriptor {
                            name: registry.name().to_string(),
                            url: registry.url().to_string(),
                            scopes: IndexSet::new(),
                        }
                    });
                descriptor.scopes.insert(package.clone());
                self.dependencies.insert(package, version);
            }
            Directive::Package { registry, scope, package, version } => {
                let Some(descriptor) = self.registries.get_mut(&registry) else {
                    return Err(Error::UnknownRegistryReference { line: line_no, registry });
                };
                descriptor.scopes.insert(scope);
                self.dependencies.insert(package, version);
            }
        }
        Ok(())
    }
}

/// Parses spec lines, collecting diagnostics for the ones that are skipped.
pub fn parse_package_spec<I, S>(lines: I) -> (PackageSpec, Vec<Error>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut spec = PackageSpec::default();
    let mut diagnostics = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        let result = parse_directive(line_no, line.as_ref())
            .and_then(|directive| match directive {
                Some(directive) => spec.apply(line_no, directive),
                None => Ok(()),
            });
        if let Err(e) = result {
            warn!("{}", e);
            diagnostics.push(e);
        }
    }

    (spec, diagnostics)
}

/// Result of merging a spec into a manifest.
#[derive(Debug)]
pub struct MergeOutcome {
    pub manifest: Manifest,
    /// Lines that were skipped, in file order
    pub diagnostics: Vec<Error>,
    pub dependencies_written: usize,
    pub registries_written: usize,
}

/// Merges the packages and registries of `spec` into `manifest`.
///
/// Registries that never received a scope are not written. An existing
/// registry is matched by name and keeps its scopes; new scopes are appended.
pub fn merge_spec(spec: PackageSpec, mut manifest: Manifest) -> (Manifest, usize, usize) {
    let dependencies_written = spec.dependencies.len();
    for (package, version) in spec.dependencies {
        debug!("Setting dependency '{}' = '{}'", package, version);
        manifest.dependencies.insert(package, version);
    }

    let mut registries_written = 0;
    for descriptor in spec.registries.into_values().filter(|r| !r.scopes.is_empty()) {
        registries_written += 1;
        match manifest.registry_mut(&descriptor.name) {
            Some(existing) => {
                if existing.url != descriptor.url {
                    info!(
                        "Updating url of registry '{}' from '{}' to '{}'",
                        existing.name, existing.url, descriptor.url
                    );
                    existing.url = descriptor.url;
                }
                let added = existing.add_scopes(&descriptor.scopes);
                debug!("Added {} scope(s) to registry '{}'", added, existing.name);
            }
            None => {
                debug!("Adding registry '{}'", descriptor.name);
                let mut registry = ScopedRegistry::new(descriptor.name, descriptor.url);
                registry.add_scopes(&descriptor.scopes);
                manifest.scoped_registries.push(registry);
            }
        }
    }

    (manifest, dependencies_written, registries_written)
}

/// Parses `spec_lines` and merges them into `manifest` in one step.
pub fn merge<I, S>(spec_lines: I, manifest: Manifest) -> MergeOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (spec, diagnostics) = parse_package_spec(spec_lines);
    let (manifest, dependencies_written, registries_written) = merge_spec(spec, manifest);
    MergeOutcome { manifest, diagnostics, dependencies_written, registries_written }
}
