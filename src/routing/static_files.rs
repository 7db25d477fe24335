//! Static resources served from a root directory.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::DispatchError;
use crate::http::mime::content_type_for;

/// File access the loader reads through.
///
/// `relative` is already stripped of its leading `/` and checked to stay
/// inside the root. A missing file must surface as `ErrorKind::NotFound`.
pub trait FileSource: Send + Sync {
    fn read(&self, relative: &Path) -> io::Result<Vec<u8>>;
}

/// Files under a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskFiles {
    root: PathBuf,
}

impl DiskFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSource for DiskFiles {
    fn read(&self, relative: &Path) -> io::Result<Vec<u8>> {
        let full = self.root.join(relative);
        // Directories count as absent, not as read failures.
        if full.is_dir() {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        std::fs::read(full)
    }
}

/// Files held in memory, keyed by request path (`/index.html`).
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.files
            .insert(PathBuf::from(path.trim_start_matches('/')), contents.into());
        self
    }
}

impl FileSource for MemoryFiles {
    fn read(&self, relative: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(relative)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Result of looking up a static path. Absence is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticLookup {
    Found(StaticFile),
    Absent,
}

pub struct StaticLoader {
    files: Box<dyn FileSource>,
}

impl StaticLoader {
    pub fn new(files: impl FileSource + 'static) -> Self {
        Self {
            files: Box::new(files),
        }
    }

    /// Looks up `path` as a static resource.
    ///
    /// Paths with an unknown extension, or that try to leave the root, are
    /// `Absent` without touching the file source.
    pub fn load(&self, path: &str) -> Result<StaticLookup, DispatchError> {
        let Ok(content_type) = content_type_for(path) else {
            return Ok(StaticLookup::Absent);
        };
        let Some(relative) = contained_path(path) else {
            tracing::warn!(path, "rejecting path outside resource root");
            return Ok(StaticLookup::Absent);
        };

        match self.files.read(&relative) {
            Ok(bytes) => Ok(StaticLookup::Found(StaticFile {
                content_type,
                bytes,
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(StaticLookup::Absent),
            Err(source) => Err(DispatchError::ResourceAccess {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// Strips the leading `/` and refuses anything but plain segments.
fn contained_path(path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_start_matches('/'));
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    (plain && relative.components().next().is_some()).then(|| relative.to_path_buf())
}
