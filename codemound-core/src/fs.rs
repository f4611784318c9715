//! Filesystem abstractions used by the batch driver.

use std::fs::{DirEntry, FileType};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Abstraction over filesystem access for testability.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Returns true when the path names a directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// List every non-directory entry reachable from the root directory.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
    /// Read a file as text, replacing byte sequences that are not valid UTF-8.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a new standard filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut walk = Walk::default();

        // The root must be listable; nested directories are best effort.
        walk.visit(root, std::fs::read_dir(root)?.map(listing), true)?;

        while let Some(dir) = walk.pending.pop() {
            match std::fs::read_dir(&dir) {
                Ok(entries) => walk.visit(&dir, entries.map(listing), false)?,
                Err(err) => log::warn!("cannot list {}: {err}", dir.display()),
            }
        }

        Ok(walk.files)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

type Listing = (PathBuf, io::Result<FileType>);

fn listing(entry: io::Result<DirEntry>) -> io::Result<Listing> {
    entry.map(|entry| (entry.path(), entry.file_type()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
    /// A symlink to a directory. Neither scored nor followed.
    LinkedDir,
}

fn classify(path: &Path, file_type: FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_symlink() && path.is_dir() {
        EntryKind::LinkedDir
    } else {
        EntryKind::File
    }
}

#[derive(Debug, Default)]
struct Walk {
    files: Vec<PathBuf>,
    pending: Vec<PathBuf>,
}

impl Walk {
    /// Sort one directory's entries into files and directories to descend.
    ///
    /// With `strict`, the first unreadable entry fails the walk; otherwise it is logged and skipped.
    fn visit(
        &mut self,
        dir: &Path,
        entries: impl IntoIterator<Item = io::Result<Listing>>,
        strict: bool,
    ) -> Result<()> {
        for entry in entries {
            let classified = entry.and_then(|(path, file_type)| {
                let kind = classify(&path, file_type?);
                Ok((path, kind))
            });
            match classified {
                Ok((path, EntryKind::File)) => self.files.push(path),
                Ok((path, EntryKind::Dir)) => self.pending.push(path),
                Ok((path, EntryKind::LinkedDir)) => {
                    log::debug!("not following directory link {}", path.display());
                }
                Err(err) if strict => return Err(err.into()),
                Err(err) => log::warn!("cannot read entry in {}: {err}", dir.display()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{StdFileSystem, Walk};
    use crate::fs::FileSystem;
    use std::io;
    use std::path::{Path, PathBuf};

    #[test]
    fn std_filesystem_lists_nested_and_hidden_files() {
        let root = std::env::temp_dir().join(unique_dir_name("nested"));
        let nested = root.join("src").join("deep");
        std::fs::create_dir_all(&nested).expect("create temp dir");
        let top = root.join("main.py");
        let hidden = root.join(".env");
        let deep = nested.join("util.go");
        std::fs::write(&top, "print('hi')\n").expect("write top");
        std::fs::write(&hidden, "KEY=1\n").expect("write hidden");
        std::fs::write(&deep, "package util\n").expect("write deep");

        let fs = StdFileSystem::new();
        assert!(fs.is_dir(&root));
        assert!(!fs.is_dir(&top));

        let mut files = fs.list_files(&root).expect("list files");
        files.sort();
        let mut expected = vec![hidden, top, deep];
        expected.sort();
        assert_eq!(files, expected);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[test]
    fn nested_entry_that_cannot_be_typed_is_skipped() {
        let root = std::env::temp_dir().join(unique_dir_name("untyped"));
        std::fs::create_dir_all(root.join("sub")).expect("create temp dir");
        let file = root.join("a.py");
        std::fs::write(&file, "x = 1\n").expect("write file");
        let file_type = std::fs::metadata(&file).expect("file meta").file_type();
        let dir_type = std::fs::metadata(root.join("sub")).expect("dir meta").file_type();

        let entries = || {
            vec![
                Ok((file.clone(), Ok(file_type))),
                Ok((root.join("vanished.py"), Err(io::Error::from(io::ErrorKind::NotFound)))),
                Err(io::Error::from(io::ErrorKind::PermissionDenied)),
                Ok((root.join("sub"), Ok(dir_type))),
            ]
        };

        let mut walk = Walk::default();
        walk.visit(&root, entries(), false)
            .expect("nested entries are best effort");
        assert_eq!(walk.files, vec![file.clone()]);
        assert_eq!(walk.pending, vec![root.join("sub")]);

        let mut strict = Walk::default();
        assert!(strict.visit(&root, entries(), true).is_err());

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlinks_are_neither_listed_nor_followed() {
        let root = std::env::temp_dir().join(unique_dir_name("dirlink"));
        let real = root.join("real");
        std::fs::create_dir_all(&real).expect("create temp dir");
        let inner = real.join("x.py");
        std::fs::write(&inner, "pass\n").expect("write file");
        std::os::unix::fs::symlink(&real, root.join("link")).expect("symlink");

        let files = StdFileSystem::new().list_files(&root).expect("list files");
        assert_eq!(files, vec![inner]);

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[test]
    fn read_text_replaces_invalid_utf8() {
        let root = std::env::temp_dir().join(unique_dir_name("lossy"));
        std::fs::create_dir_all(&root).expect("create temp dir");
        let file_path = root.join("blob.bin");
        std::fs::write(&file_path, [b'o', b'k', 0xff, 0xfe, b'\n']).expect("write blob");

        let contents = StdFileSystem::new()
            .read_text(&file_path)
            .expect("lossy read succeeds");
        assert!(contents.starts_with("ok"));
        assert!(contents.ends_with('\n'));

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[test]
    fn list_files_fails_for_missing_root() {
        let missing = std::env::temp_dir().join(unique_dir_name("missing"));
        assert!(StdFileSystem::new().list_files(Path::new(&missing)).is_err());
    }

    fn unique_dir_name(label: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        PathBuf::from(format!("codemound_core_{label}_{nanos}"))
    }
}
