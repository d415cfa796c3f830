use std::path::Path;
use std::process::Command;

use crate::error::Result;
use crate::exec::{cmake_exe, run_cmd};
use crate::manifest::{PREFIX_PLACEHOLDER, Package};
use crate::target::Arch;

fn generator(arch: Arch) -> &'static str {
    match arch {
        Arch::X32 | Arch::Uwp32 => "Visual Studio 15 2017",
        Arch::X64 | Arch::Uwp64 => "Visual Studio 15 2017 Win64",
    }
}

// UWP builds target the sandboxed store platform: cmake needs the explicit
// processor, the WindowsStore system name, a pinned OS version, and compiler
// flags turning on component extensions plus the platform macro.
fn system_overrides(arch: Arch) -> &'static [&'static str] {
    match arch {
        Arch::X32 | Arch::X64 => &[],
        Arch::Uwp32 => &[
            "-DCMAKE_SYSTEM_PROCESSOR=x86",
            "-DCMAKE_SYSTEM_NAME=WindowsStore",
            "-DCMAKE_SYSTEM_VERSION=10.0",
            "-DCMAKE_CXX_FLAGS=/ZW -DWINAPI_FAMILY=WINAPI_FAMILY_APP",
        ],
        Arch::Uwp64 => &[
            "-DCMAKE_SYSTEM_PROCESSOR=AMD64",
            "-DCMAKE_SYSTEM_NAME=WindowsStore",
            "-DCMAKE_SYSTEM_VERSION=10.0",
            "-DCMAKE_CXX_FLAGS=/ZW -DWINAPI_FAMILY=WINAPI_FAMILY_APP",
        ],
    }
}

/// Full cmake argument list for a package/arch/prefix triple. The source
/// directory is passed relative to the build directory, which is the working
/// directory of the configure step.
pub fn configure_args(pkg: &Package, arch: Arch, prefix: &Path) -> Vec<String> {
    let prefix = prefix.display().to_string();
    let mut args = vec![
        format!("../{}", pkg.extract_dirname()),
        "-G".to_string(),
        generator(arch).to_string(),
    ];
    for arg in system_overrides(arch) {
        args.push((*arg).to_string());
    }
    for opt in &pkg.cmake_options {
        args.push(format!("-D{}", opt.replace(PREFIX_PLACEHOLDER, &prefix)));
    }
    args.push(format!("-DCMAKE_INSTALL_PREFIX={prefix}"));
    args.push(format!("-DCMAKE_PREFIX_PATH={prefix}"));
    args.push("-DCMAKE_FIND_DEBUG_MODE=1".to_string());
    args
}

/// Generate the Visual Studio projects for `pkg` inside `build_dir`. Fatal on
/// non-zero exit.
pub fn configure(pkg: &Package, arch: Arch, prefix: &Path, build_dir: &Path) -> Result<()> {
    let mut cmd = Command::new(cmake_exe()?);
    for arg in configure_args(pkg, arch, prefix) {
        cmd.arg(arg);
    }
    cmd.current_dir(build_dir);
    run_cmd(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use std::fs;

    fn zlib() -> Package {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("zlib.toml"),
            r#"url = "http://zlib.net/zlib-1.2.11.tar.xz""#,
        )
        .unwrap();
        let manifest = Manifest::load_dir(dir.path()).unwrap();
        manifest.find("zlib").unwrap().clone()
    }

    const UWP_ONLY: [&str; 4] = [
        "-DCMAKE_SYSTEM_PROCESSOR",
        "-DCMAKE_SYSTEM_NAME=WindowsStore",
        "-DCMAKE_SYSTEM_VERSION=10.0",
        "-DCMAKE_CXX_FLAGS=/ZW -DWINAPI_FAMILY=WINAPI_FAMILY_APP",
    ];

    #[test]
    fn desktop_arches_get_generator_and_no_uwp_overrides() {
        let pkg = zlib();
        for (arch, generator) in [
            (Arch::X32, "Visual Studio 15 2017"),
            (Arch::X64, "Visual Studio 15 2017 Win64"),
        ] {
            let args = configure_args(&pkg, arch, Path::new("C:/usr_x32"));
            assert_eq!(args[0], "../zlib-1.2.11");
            assert_eq!(args[1], "-G");
            assert_eq!(args[2], generator);
            for marker in UWP_ONLY {
                assert!(
                    !args.iter().any(|a| a.starts_with(marker)),
                    "{arch}: unexpected {marker}"
                );
            }
        }
    }

    #[test]
    fn uwp_arches_get_store_overrides() {
        let pkg = zlib();
        for (arch, processor) in [
            (Arch::Uwp32, "-DCMAKE_SYSTEM_PROCESSOR=x86"),
            (Arch::Uwp64, "-DCMAKE_SYSTEM_PROCESSOR=AMD64"),
        ] {
            let args = configure_args(&pkg, arch, Path::new("C:/usr"));
            assert!(args.iter().any(|a| a == processor), "{arch}");
            for marker in &UWP_ONLY[1..] {
                assert!(args.iter().any(|a| a == marker), "{arch}: missing {marker}");
            }
        }
    }

    #[test]
    fn prefix_definitions_and_verbosity_come_last() {
        let pkg = zlib();
        let args = configure_args(&pkg, Arch::X32, Path::new("C:/usr_x32"));
        let n = args.len();
        assert_eq!(args[n - 3], "-DCMAKE_INSTALL_PREFIX=C:/usr_x32");
        assert_eq!(args[n - 2], "-DCMAKE_PREFIX_PATH=C:/usr_x32");
        assert_eq!(args[n - 1], "-DCMAKE_FIND_DEBUG_MODE=1");
    }

    #[test]
    fn prefix_placeholder_is_substituted_in_package_options() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("libpng.toml"),
            r#"
url = "http://prdownloads.sourceforge.net/libpng/libpng-1.6.29.tar.xz?download"
archive = "libpng-1.6.29.tar.xz"
cmake_options = ["ZLIB_ROOT={prefix}"]
"#,
        )
        .unwrap();
        let manifest = Manifest::load_dir(dir.path()).unwrap();
        let pkg = manifest.find("libpng").unwrap();

        let args = configure_args(pkg, Arch::X64, Path::new("C:/usr_x64"));
        assert!(args.iter().any(|a| a == "-DZLIB_ROOT=C:/usr_x64"));
    }
}
