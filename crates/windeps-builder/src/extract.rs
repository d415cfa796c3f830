use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::exec::run_cmd;
use crate::fetch;
use crate::layout::Layout;
use crate::manifest::Package;

/// Ensure a source tree exists at `work/<extract_dirname>`, downloading and
/// unpacking the archive if needed. An existing tree is trusted as-is; there
/// is no completeness check.
pub fn ensure_extracted(layout: &Layout, pkg: &Package) -> Result<PathBuf> {
    let dest = layout.extract_dir(pkg);
    if dest.exists() {
        debug!("{} exists", dest.display());
        return Ok(dest);
    }

    let archive = fetch::ensure_archive(layout, pkg)?;
    fs::create_dir_all(&layout.work_dir).map_err(|e| {
        Error::msg(format!("failed to create {}: {e}", layout.work_dir.display()))
    })?;

    debug!("extract {}", archive.display());
    if pkg.archive_name.ends_with(".zip") {
        unpack_zip(&archive, &layout.work_dir)?;
    } else {
        // tar auto-detects the compression (gz, xz, bz2, plain).
        unpack_tar(&archive, &layout.work_dir)?;
    }
    Ok(dest)
}

fn unpack_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive)
        .map_err(|e| Error::msg(format!("failed to open {}: {e}", archive.display())))?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| Error::msg(format!("bad zip archive {}: {e}", archive.display())))?;
    zip.extract(dest)
        .map_err(|e| Error::msg(format!("failed to extract {}: {e}", archive.display())))
}

fn unpack_tar(archive: &Path, dest: &Path) -> Result<()> {
    let mut cmd = Command::new("tar");
    cmd.arg("-xf").arg(archive).arg("-C").arg(dest);
    run_cmd(cmd)
}
