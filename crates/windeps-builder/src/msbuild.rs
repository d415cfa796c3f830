use std::path::Path;
use std::process::Command;

use crate::error::Result;
use crate::exec::{msbuild_exe, run_cmd};

/// The install target cmake generates for Visual Studio projects.
pub const INSTALL_PROJECT: &str = "Install.vcxproj";

/// Build the generated install project in Release configuration, populating
/// the install prefix. Same streaming and fatal-on-nonzero contract as the
/// configure step.
pub fn run_build(build_dir: &Path) -> Result<()> {
    let mut cmd = Command::new(msbuild_exe()?);
    cmd.arg(INSTALL_PROJECT).arg("/p:Configuration=Release");
    cmd.current_dir(build_dir);
    run_cmd(cmd)
}
