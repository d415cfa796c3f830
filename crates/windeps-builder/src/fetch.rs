use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::manifest::Package;

// Source tarballs run to tens of megabytes; keep the whole-request timeout
// generous rather than none at all.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Ensure the package archive exists under `downloads/`, retrieving it from
/// the package URL on first use. An existing file is trusted as-is.
pub fn ensure_archive(layout: &Layout, pkg: &Package) -> Result<PathBuf> {
    let dest = layout.archive_path(pkg);
    if dest.exists() {
        debug!("{} exists", dest.display());
        return Ok(dest);
    }

    info!("download {}", pkg.url);
    fs::create_dir_all(&layout.downloads_dir).map_err(|e| {
        Error::msg(format!(
            "failed to create {}: {e}",
            layout.downloads_dir.display()
        ))
    })?;

    let client = reqwest::blocking::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| Error::msg(format!("failed to build HTTP client: {e}")))?;
    let res = client
        .get(&pkg.url)
        .send()
        .map_err(|e| Error::msg(format!("download of {} failed: {e}", pkg.url)))?;
    if !res.status().is_success() {
        return Err(Error::msg(format!(
            "download of {} failed with status {}",
            pkg.url,
            res.status()
        )));
    }
    let body = res
        .bytes()
        .map_err(|e| Error::msg(format!("failed to read {}: {e}", pkg.url)))?;
    fs::write(&dest, &body)
        .map_err(|e| Error::msg(format!("failed to write {}: {e}", dest.display())))?;

    Ok(dest)
}
