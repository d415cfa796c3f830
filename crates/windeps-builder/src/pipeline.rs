use std::path::PathBuf;

use tracing::info;

use crate::builddir;
use crate::cmake;
use crate::error::{Error, Result};
use crate::extract;
use crate::layout::Layout;
use crate::manifest::{Manifest, PackageKind};
use crate::msbuild;
use crate::target::{Arch, BuildConfig};

/// Everything one `build` invocation needs. `config` is parsed for forward
/// compatibility; the install project is always built in Release.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub package: String,
    pub arch: Arch,
    pub config: BuildConfig,
    pub prefix: PathBuf,
}

/// Drive one package through archive acquisition, extraction, build-directory
/// reset, configure and build. Strictly sequential; the first failing step
/// aborts the run. Archives and extracted trees are reused across runs, the
/// build directory never is.
pub fn build(layout: &Layout, manifest: &Manifest, req: &BuildRequest) -> Result<()> {
    let pkg = manifest.find(&req.package)?;
    info!(
        "build {} arch={} config={} prefix={}",
        pkg.name,
        req.arch,
        req.config,
        req.prefix.display()
    );

    match pkg.kind {
        PackageKind::Git => Err(Error::msg(format!(
            "package '{}' is git-sourced: not implemented",
            pkg.name
        ))),
        PackageKind::CMake => {
            extract::ensure_extracted(layout, pkg)?;
            let build_dir = builddir::reset_build_dir(layout, pkg, req.arch)?;
            let prefix = layout.resolve_prefix(&req.prefix);
            cmake::configure(pkg, req.arch, &prefix, &build_dir)?;
            msbuild::run_build(&build_dir)?;
            Ok(())
        }
    }
}
