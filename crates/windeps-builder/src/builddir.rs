use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::manifest::Package;
use crate::target::Arch;

/// Ensure a fresh, empty build directory at
/// `work/<extract_dirname>_build_<arch>`. Any prior directory is removed in
/// full; every build starts from scratch.
pub fn reset_build_dir(layout: &Layout, pkg: &Package, arch: Arch) -> Result<PathBuf> {
    let dir = layout.build_dir(pkg, arch);
    if dir.exists() {
        debug!("removing previous build dir {}", dir.display());
        remove_dir_all_force(&layout.work_dir, &dir)?;
    }
    fs::create_dir_all(&dir)
        .map_err(|e| Error::msg(format!("failed to create {}: {e}", dir.display())))?;
    Ok(dir)
}

// Extracted sources frequently carry the read-only attribute, which makes a
// plain remove_dir_all fail on Windows. Clear the attribute on directories
// top-down (so their contents stay reachable), then delete bottom-up,
// clearing it on each file just before removal.
fn remove_dir_all_force(root: &Path, dir: &Path) -> Result<()> {
    let root_can = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let dir_can = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    if !dir_can.starts_with(&root_can) {
        return Err(Error::msg(format!(
            "refusing to remove '{}' (outside work dir '{}')",
            dir_can.display(),
            root_can.display()
        )));
    }

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| Error::msg(format!("walkdir error: {e}")))?;
        if entry.file_type().is_dir() {
            clear_readonly(entry.path())?;
        }
    }

    for entry in WalkDir::new(dir).contents_first(true) {
        let entry = entry.map_err(|e| Error::msg(format!("walkdir error: {e}")))?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            fs::remove_dir(path)
                .map_err(|e| Error::msg(format!("failed to remove {}: {e}", path.display())))?;
        } else {
            clear_readonly(path)?;
            fs::remove_file(path)
                .map_err(|e| Error::msg(format!("failed to remove {}: {e}", path.display())))?;
        }
    }
    Ok(())
}

fn clear_readonly(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path)
        .map_err(|e| Error::msg(format!("failed to stat {}: {e}", path.display())))?;
    let mut perm = meta.permissions();
    if perm.readonly() {
        #[allow(clippy::permissions_set_readonly_false)]
        perm.set_readonly(false);
        fs::set_permissions(path, perm).map_err(|e| {
            Error::msg(format!(
                "failed to clear read-only on {}: {e}",
                path.display()
            ))
        })?;
    }
    Ok(())
}
