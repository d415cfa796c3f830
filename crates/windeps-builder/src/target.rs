use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Target architecture for the generated Visual Studio projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X32,
    X64,
    Uwp32,
    Uwp64,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X32 => "x32",
            Arch::X64 => "x64",
            Arch::Uwp32 => "uwp32",
            Arch::Uwp64 => "uwp64",
        }
    }

    pub fn is_uwp(self) -> bool {
        matches!(self, Arch::Uwp32 | Arch::Uwp64)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x32" => Ok(Arch::X32),
            "x64" => Ok(Arch::X64),
            "uwp32" => Ok(Arch::Uwp32),
            "uwp64" => Ok(Arch::Uwp64),
            other => Err(Error::msg(format!(
                "unknown architecture '{other}' (expected x32, x64, uwp32 or uwp64)"
            ))),
        }
    }
}

/// Parsed but not threaded into the MSBuild invocation; the install project
/// is always built in Release configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildConfig {
    Debug,
    Release,
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildConfig::Debug => "debug",
            BuildConfig::Release => "release",
        })
    }
}

impl FromStr for BuildConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildConfig::Debug),
            "release" => Ok(BuildConfig::Release),
            other => Err(Error::msg(format!(
                "unknown config '{other}' (expected debug or release)"
            ))),
        }
    }
}

/// Default install destination: `<current drive>/usr_<arch>`, so x32 and x64
/// trees never collide. On non-Windows hosts the drive degrades to `/`.
pub fn default_prefix(cwd: &Path, arch: Arch) -> PathBuf {
    let mut base = PathBuf::new();
    let mut comps = cwd.components();
    match comps.next() {
        Some(c @ Component::Prefix(_)) => {
            base.push(c.as_os_str());
            if let Some(r @ Component::RootDir) = comps.next() {
                base.push(r.as_os_str());
            }
        }
        Some(c @ Component::RootDir) => base.push(c.as_os_str()),
        _ => base.push("."),
    }
    base.join(format!("usr_{arch}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_arches() {
        assert_eq!("x32".parse::<Arch>().unwrap(), Arch::X32);
        assert_eq!("x64".parse::<Arch>().unwrap(), Arch::X64);
        assert_eq!("uwp32".parse::<Arch>().unwrap(), Arch::Uwp32);
        assert_eq!("uwp64".parse::<Arch>().unwrap(), Arch::Uwp64);
    }

    #[test]
    fn rejects_unknown_arch_before_any_work_happens() {
        let err = "x128".parse::<Arch>().unwrap_err().to_string();
        assert!(err.contains("unknown architecture 'x128'"), "{err}");
    }

    #[test]
    fn rejects_unknown_config() {
        let err = "profile".parse::<BuildConfig>().unwrap_err().to_string();
        assert!(err.contains("unknown config"), "{err}");
    }

    #[test]
    fn default_prefix_uses_filesystem_root() {
        let p = default_prefix(Path::new("/home/dev/deps"), Arch::X64);
        assert_eq!(p, PathBuf::from("/usr_x64"));
    }
}
