use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::manifest::Package;
use crate::target::Arch;

/// On-disk layout, relative to the invocation directory:
///
/// ```text
/// downloads/
///     zlib-1.2.11.tar.xz
/// work/
///     zlib-1.2.11
///     zlib-1.2.11_build_x32
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
    pub downloads_dir: PathBuf,
    pub work_dir: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let downloads_dir = root.join("downloads");
        let work_dir = root.join("work");
        Self {
            root,
            downloads_dir,
            work_dir,
        }
    }

    pub fn from_cwd() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn archive_path(&self, pkg: &Package) -> PathBuf {
        self.downloads_dir.join(&pkg.archive_name)
    }

    pub fn extract_dir(&self, pkg: &Package) -> PathBuf {
        self.work_dir.join(pkg.extract_dirname())
    }

    pub fn build_dir(&self, pkg: &Package, arch: Arch) -> PathBuf {
        self.work_dir
            .join(format!("{}_build_{}", pkg.extract_dirname(), arch))
    }

    // Install prefixes may be handed to us relative; cmake needs them absolute.
    pub fn resolve_prefix(&self, prefix: &Path) -> PathBuf {
        if prefix.is_absolute() {
            prefix.to_path_buf()
        } else {
            self.root.join(prefix)
        }
    }
}
