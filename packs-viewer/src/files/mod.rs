//! File access over the content tree
//!
//! Thin async wrappers over `tokio::fs` and `walkdir` that normalize path
//! separators for the host platform and attach the offending path to every
//! error. Listings skip hidden entries and are returned sorted, so the first
//! category or component is stable across runs.

use crate::{
    config::Platform,
    error::{ViewerError, ViewerResult},
};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// What a listing should match, relative to a base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePattern {
    /// `<dir>/*` restricted to directories
    Subdirs(PathBuf),
    /// `<dir>/*.<extension>`
    Files {
        /// Directory to list
        dir: PathBuf,
        /// Extension without the leading dot
        extension: String,
    },
    /// `<dir>/**/*.<extension>`
    Tree {
        /// Root of the walk
        dir: PathBuf,
        /// Extension without the leading dot
        extension: String,
    },
}

impl FilePattern {
    /// `<dir>/*.html`
    pub fn html_in(dir: impl Into<PathBuf>) -> Self {
        Self::Files {
            dir: dir.into(),
            extension: "html".to_string(),
        }
    }

    /// `<dir>/**/*.html`
    pub fn html_tree(dir: impl Into<PathBuf>) -> Self {
        Self::Tree {
            dir: dir.into(),
            extension: "html".to_string(),
        }
    }

    fn base(&self) -> &Path {
        match self {
            Self::Subdirs(dir) | Self::Files { dir, .. } | Self::Tree { dir, .. } => dir,
        }
    }
}

/// Platform-aware file access
#[derive(Debug, Clone, Copy)]
pub struct FileAccess {
    platform: Platform,
}

impl FileAccess {
    /// Create file access for the given platform
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Normalize path separators for the host platform
    ///
    /// On Windows, backslashes become forward slashes; elsewhere the path is
    /// returned untouched.
    #[must_use]
    pub fn normalize(&self, path: &Path) -> PathBuf {
        match self.platform {
            Platform::Windows => PathBuf::from(path.to_string_lossy().replace('\\', "/")),
            _ => path.to_path_buf(),
        }
    }

    /// Read a whole file as text
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD, so one badly encoded
    /// snippet never takes the rest of the pack down with it.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] when the file is missing or unreadable.
    pub async fn read_file(&self, path: &Path) -> ViewerResult<String> {
        let path = self.normalize(path);
        tracing::trace!(path = %path.display(), "reading file");

        let bytes = fs::read(&path)
            .await
            .map_err(|e| ViewerError::io(&path, e))?;

        Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }))
    }

    /// Resolve a pattern to a sorted list of paths
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] when the base directory cannot be listed.
    pub async fn list(&self, pattern: &FilePattern) -> ViewerResult<Vec<PathBuf>> {
        let base = self.normalize(pattern.base());

        let mut paths = match pattern {
            FilePattern::Subdirs(_) => list_dir(&base, |_, meta| meta.is_dir()).await?,
            FilePattern::Files { extension, .. } => {
                list_dir(&base, |path, meta| {
                    meta.is_file() && has_extension(path, extension)
                })
                .await?
            }
            FilePattern::Tree { extension, .. } => walk_tree(base, extension.clone()).await?,
        };

        paths.sort();
        tracing::trace!(?pattern, matches = paths.len(), "resolved file pattern");
        Ok(paths)
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

async fn list_dir(
    dir: &Path,
    keep: impl Fn(&Path, &std::fs::Metadata) -> bool,
) -> ViewerResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ViewerError::io(dir, e))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ViewerError::io(dir, e))?
    {
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }

        // follows symlinks, like a shell glob would
        let meta = fs::metadata(&path)
            .await
            .map_err(|e| ViewerError::io(&path, e))?;
        if keep(&path, &meta) {
            paths.push(path);
        }
    }

    Ok(paths)
}

async fn walk_tree(root: PathBuf, extension: String) -> ViewerResult<Vec<PathBuf>> {
    let walk_root = root.clone();

    tokio::task::spawn_blocking(move || {
        let mut paths = Vec::new();
        // follow links so the tree agrees with the per-directory listings
        let walker = WalkDir::new(&walk_root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map_or_else(|| walk_root.clone(), Path::to_path_buf);
                ViewerError::io(path, e.into())
            })?;

            if entry.file_type().is_file() && has_extension(entry.path(), &extension) {
                paths.push(entry.into_path());
            }
        }

        Ok(paths)
    })
    .await
    .map_err(|e| ViewerError::io(root, std::io::Error::other(e)))?
}
