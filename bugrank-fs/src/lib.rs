//! Capability-based filesystem helpers shared by the bugrank crates.
//!
//! Dataset files and SQLite stores are addressed with UTF-8 paths
//! (`camino`) and opened through `cap-std` ambient directories so callers
//! never touch `std::fs` directly.
#![forbid(unsafe_code)]

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// What a path refers to on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else (socket, device node, ...).
    Other,
}

/// Open a UTF-8 file path for reading using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory containing `path` and return it with the final path
/// component.
///
/// A bare file name resolves against the current directory.
pub fn open_parent_and_name(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} has no file name")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Inspect `path` without following it into its contents.
///
/// Missing paths surface as `io::ErrorKind::NotFound`.
pub fn path_kind(path: &Utf8Path) -> io::Result<PathKind> {
    let (dir, name) = open_parent_and_name(path)?;
    let meta = dir.metadata(name.as_str())?;
    Ok(if meta.is_file() {
        PathKind::File
    } else if meta.is_dir() {
        PathKind::Directory
    } else {
        PathKind::Other
    })
}

/// Return whether `path` exists and is a regular file.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    path_kind(path).map(|kind| kind == PathKind::File)
}

/// Create every missing ancestor directory of `path`.
///
/// The directories are created beneath an ambient handle on the path's root
/// (or drive prefix), or on the current directory for relative paths.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) else {
        return Ok(());
    };

    let anchor: Utf8PathBuf = parent
        .components()
        .take_while(|component| {
            matches!(component, Utf8Component::Prefix(_) | Utf8Component::RootDir)
        })
        .collect();
    let (anchor, relative) = if anchor.as_str().is_empty() {
        (Utf8PathBuf::from("."), parent)
    } else {
        let relative = parent
            .strip_prefix(&anchor)
            .map_err(|_| io::Error::other(format!("cannot anchor {parent} at {anchor}")))?;
        (anchor, relative)
    };
    if relative.as_str().is_empty() {
        return Ok(());
    }

    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Read;
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        (dir, root)
    }

    #[rstest]
    fn reports_files_and_directories(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let file = root.join("devices.csv");
        std::fs::write(&file, "deviceId,description\n").expect("write file");

        assert_eq!(path_kind(&file).expect("inspect file"), PathKind::File);
        assert_eq!(path_kind(&root).expect("inspect dir"), PathKind::Directory);
        assert!(file_is_file(&file).expect("inspect file"));
        assert!(!file_is_file(&root).expect("inspect dir"));
    }

    #[rstest]
    fn missing_path_is_not_found(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let err = path_kind(&root.join("absent.csv")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn opens_files_for_reading(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let file = root.join("bugs.csv");
        std::fs::write(&file, "bugId,deviceId,testerId\n").expect("write file");

        let mut contents = String::new();
        open_utf8_file(&file)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");
        assert_eq!(contents, "bugId,deviceId,testerId\n");
    }

    #[rstest]
    fn creates_nested_parents(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let target = root.join("a/b/store.db");
        ensure_parent_dir(&target).expect("create parents");
        assert_eq!(
            path_kind(&root.join("a/b")).expect("inspect parent"),
            PathKind::Directory
        );
    }

    #[rstest]
    fn existing_parents_are_left_intact(workspace: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = workspace;
        let existing = root.join("store");
        std::fs::create_dir(&existing).expect("create dir");
        std::fs::write(existing.join("keep.csv"), "x\n").expect("write file");

        ensure_parent_dir(&existing.join("store.db")).expect("parent exists");
        assert!(file_is_file(&existing.join("keep.csv")).expect("inspect file"));
    }

    #[rstest]
    fn root_level_files_need_no_parent() {
        ensure_parent_dir(Utf8Path::new("/store.db")).expect("root needs nothing");
    }

    #[rstest]
    fn bare_file_names_need_no_parent() {
        ensure_parent_dir(Utf8Path::new("store.db")).expect("no parent to create");
    }
}
