use std::fs;
use std::path::Path;

use windeps_builder::builddir::reset_build_dir;
use windeps_builder::layout::Layout;
use windeps_builder::manifest::{Package, PackageKind};
use windeps_builder::target::Arch;

fn zlib() -> Package {
    Package {
        name: "zlib".into(),
        url: "http://zlib.net/zlib-1.2.11.tar.xz".into(),
        archive_name: "zlib-1.2.11.tar.xz".into(),
        kind: PackageKind::CMake,
        cmake_options: Vec::new(),
    }
}

fn make_readonly(path: &Path) {
    let mut perm = fs::metadata(path).unwrap().permissions();
    perm.set_readonly(true);
    fs::set_permissions(path, perm).unwrap();
}

#[test]
fn creates_build_dir_when_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = Layout::new(tmp.path());
    let pkg = zlib();

    let dir = reset_build_dir(&layout, &pkg, Arch::X32).unwrap();
    assert_eq!(dir, tmp.path().join("work/zlib-1.2.11_build_x32"));
    assert!(dir.is_dir());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn wipes_previous_contents_including_readonly_files() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = Layout::new(tmp.path());
    let pkg = zlib();

    let dir = layout.build_dir(&pkg, Arch::X64);
    let sub = dir.join("CMakeFiles/nested");
    fs::create_dir_all(&sub).unwrap();
    fs::write(dir.join("CMakeCache.txt"), "stale").unwrap();
    fs::write(sub.join("locked.obj"), "stale").unwrap();
    make_readonly(&sub.join("locked.obj"));
    make_readonly(&sub);

    let fresh = reset_build_dir(&layout, &pkg, Arch::X64).unwrap();
    assert_eq!(fresh, dir);
    assert!(fresh.is_dir());
    assert_eq!(fs::read_dir(&fresh).unwrap().count(), 0);
}

#[test]
fn reset_is_per_architecture() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = Layout::new(tmp.path());
    let pkg = zlib();

    let x32 = reset_build_dir(&layout, &pkg, Arch::X32).unwrap();
    fs::write(x32.join("CMakeCache.txt"), "x32 state").unwrap();

    // Resetting x64 must not touch the sibling x32 tree.
    let x64 = reset_build_dir(&layout, &pkg, Arch::X64).unwrap();
    assert_ne!(x32, x64);
    assert!(x32.join("CMakeCache.txt").exists());
}
