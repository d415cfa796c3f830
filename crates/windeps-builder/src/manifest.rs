use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Placeholder in `cmake_options` entries, replaced with the absolute install
/// prefix at configure time.
pub const PREFIX_PLACEHOLDER: &str = "{prefix}";

const KNOWN_SUFFIXES: [&str; 4] = [".tar.xz", ".tar.gz", ".tar.bz2", ".zip"];

/// How a package's sources are obtained and built. Git-sourced packages are
/// declared but not supported; the pipeline rejects them up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    CMake,
    Git,
}

/// One descriptor file under the manifest directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageSpec {
    url: String,
    /// Local archive file name; defaults to the basename of `url`. Needed when
    /// the URL carries query noise (e.g. sourceforge's `?download`).
    archive: Option<String>,
    #[serde(default = "default_kind")]
    kind: PackageKind,
    #[serde(default)]
    cmake_options: Vec<String>,
}

fn default_kind() -> PackageKind {
    PackageKind::CMake
}

/// A package loaded from the manifest. Immutable for the run's duration;
/// `archive_name` and `extract_dirname()` never change after construction.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub url: String,
    pub archive_name: String,
    pub kind: PackageKind,
    pub cmake_options: Vec<String>,
}

impl Package {
    fn from_spec(name: &str, spec: PackageSpec) -> Result<Self> {
        if spec.url.trim().is_empty() {
            return Err(Error::msg(format!("package '{name}' has an empty url")));
        }
        let archive_name = match spec.archive {
            Some(a) if !a.trim().is_empty() => a,
            _ => {
                let base = spec.url.rsplit('/').next().unwrap_or_default();
                if base.is_empty() {
                    return Err(Error::msg(format!(
                        "package '{name}': cannot derive archive name from url '{}'",
                        spec.url
                    )));
                }
                base.to_string()
            }
        };
        Ok(Self {
            name: name.to_string(),
            url: spec.url,
            archive_name,
            kind: spec.kind,
            cmake_options: spec.cmake_options,
        })
    }

    /// Canonical directory name once extracted: the archive name minus one
    /// known archive suffix, else minus the generic extension.
    pub fn extract_dirname(&self) -> &str {
        let name = self.archive_name.as_str();
        for suffix in KNOWN_SUFFIXES {
            if let Some(stem) = name.strip_suffix(suffix) {
                return stem;
            }
        }
        match name.rfind('.') {
            Some(i) => &name[..i],
            None => name,
        }
    }
}

/// The package manifest: one TOML descriptor per package, loaded once at
/// startup into an ordered, immutable map.
#[derive(Debug, Default)]
pub struct Manifest {
    packages: BTreeMap<String, Package>,
}

impl Manifest {
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            Error::msg(format!(
                "failed to read manifest dir {}: {e}",
                dir.display()
            ))
        })?;

        let mut packages = BTreeMap::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let data = fs::read_to_string(&path).map_err(|e| {
                Error::msg(format!("failed to read {}: {e}", path.display()))
            })?;
            let spec: PackageSpec = toml::from_str(&data).map_err(|e| {
                Error::msg(format!("TOML parse error in {}: {e}", path.display()))
            })?;
            packages.insert(name.to_string(), Package::from_spec(name, spec)?);
        }

        Ok(Self { packages })
    }

    /// Resolve a package by substring match against descriptor URLs, in
    /// sorted descriptor-name order. First match wins.
    pub fn find(&self, name: &str) -> Result<&Package> {
        self.packages
            .values()
            .find(|p| p.url.contains(name))
            .ok_or_else(|| Error::msg(format!("package '{name}' not found in manifest")))
    }

    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
