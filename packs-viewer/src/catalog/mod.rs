//! Component catalog over the content directory
//!
//! The content root holds one directory per category, each containing
//! `<component>.html` snippets:
//!
//! ```text
//! html/
//! ├── navigation/
//! │   └── navigation-01.html
//! ├── cards/
//! │   ├── cards-01.html
//! │   └── cards-02.html
//! └── footer/
//!     └── footer-01.html
//! ```
//!
//! Nothing is cached. Every call goes back to the file system, so edits to a
//! pack show up on the next request.

pub mod bucket;

pub use bucket::{classify, Bucket, BucketRule, BUCKET_RULES};

use crate::{
    config::ViewerConfig,
    error::{ViewerError, ViewerResult},
    files::{FileAccess, FilePattern},
    random::{pick_one, RandomSource},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component as PathComponent, Path, PathBuf};

/// One HTML snippet of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    /// File name, e.g. `cards-01.html`
    pub file: String,
    /// Raw file contents
    pub content: String,
}

impl Component {
    /// File name without its extension
    #[must_use]
    pub fn id(&self) -> &str {
        component_id(&self.file)
    }
}

/// Components grouped by category name, ordered by name
pub type ComponentsByCategory = BTreeMap<String, Vec<Component>>;

/// File name without extension, used as the `data-component-id`
#[must_use]
pub fn component_id(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
}

/// Read access to the component packs
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    files: FileAccess,
    reserved_prefix: String,
}

impl Catalog {
    /// Create a catalog rooted at `root`
    pub fn new(root: impl Into<PathBuf>, files: FileAccess, reserved_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            files,
            reserved_prefix: reserved_prefix.into(),
        }
    }

    /// Create a catalog from viewer configuration
    #[must_use]
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.content_dir.clone(),
            FileAccess::new(config.platform),
            config.reserved_prefix.clone(),
        )
    }

    /// Content root
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every HTML file under the root, grouped by its parent directory name
    ///
    /// # Errors
    ///
    /// Fails as a whole if the tree cannot be walked or any file cannot be
    /// read; no partial result is returned.
    pub async fn components_by_category(&self) -> ViewerResult<ComponentsByCategory> {
        let paths = self.files.list(&FilePattern::html_tree(&self.root)).await?;
        let mut grouped = ComponentsByCategory::new();

        for path in paths {
            let category = path
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file = file_name(&path);
            let content = self.files.read_file(&path).await?;

            grouped
                .entry(category)
                .or_default()
                .push(Component { file, content });
        }

        tracing::debug!(
            categories = grouped.len(),
            components = grouped.values().map(Vec::len).sum::<usize>(),
            "catalog scanned"
        );

        Ok(grouped)
    }

    /// Names of the top-level category directories, sorted
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] when the root cannot be listed.
    pub async fn categories(&self) -> ViewerResult<Vec<String>> {
        let dirs = self
            .files
            .list(&FilePattern::Subdirs(self.root.clone()))
            .await?;
        Ok(dirs.iter().map(|p| file_name(p)).collect())
    }

    /// Categories that belong in `bucket`, excluding reserved ones
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] when the root cannot be listed.
    pub async fn categories_by_bucket(&self, bucket: Bucket) -> ViewerResult<Vec<String>> {
        let categories = self.categories().await?;
        Ok(classify(
            categories.iter().map(String::as_str),
            bucket,
            &self.reserved_prefix,
        ))
    }

    /// Like [`Self::categories_by_bucket`] but keyed by bucket name
    ///
    /// An unknown name yields an empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] when the root cannot be listed.
    pub async fn categories_by_type(&self, bucket: &str) -> ViewerResult<Vec<String>> {
        match bucket.parse::<Bucket>() {
            Ok(bucket) => self.categories_by_bucket(bucket).await,
            Err(_) => Ok(Vec::new()),
        }
    }

    /// File names of the HTML components in one category, sorted
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Usage`] for an unsafe category name and
    /// [`ViewerError::Io`] when the directory cannot be listed.
    pub async fn component_files(&self, category: &str) -> ViewerResult<Vec<String>> {
        let dir = self.root.join(safe_segment(category, "category")?);
        let paths = self.files.list(&FilePattern::html_in(dir)).await?;
        Ok(paths.iter().map(|p| file_name(p)).collect())
    }

    /// One component file name of `category`, chosen through `source`
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Selection`] when the category holds no HTML
    /// files.
    pub async fn random_component(
        &self,
        category: &str,
        source: &dyn RandomSource,
    ) -> ViewerResult<String> {
        let files = self.component_files(category).await?;
        let what = format!("components in category `{category}`");
        pick_one(source, &files, &what).cloned()
    }

    /// A component's markup wrapped in a `data-component-id` container
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Usage`] for unsafe names and
    /// [`ViewerError::Io`] when the file cannot be read.
    pub async fn component_html(&self, category: &str, file: &str) -> ViewerResult<String> {
        let path = self
            .root
            .join(safe_segment(category, "category")?)
            .join(safe_segment(file, "component")?);
        let html = self.files.read_file(&path).await?;

        Ok(format!(
            "\n<div data-component-id=\"{}\">\n{html}\n</div>",
            escape_attr(component_id(file))
        ))
    }

    /// Raw markup of a component addressed by its path relative to the root
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Usage`] when `id` is absolute or climbs out of
    /// the root, and [`ViewerError::Io`] when the file cannot be read.
    pub async fn read_component(&self, id: &str) -> ViewerResult<String> {
        let relative = safe_relative(id)?;
        self.files.read_file(&self.root.join(relative)).await
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Accept a relative path made only of normal components
fn safe_relative(id: &str) -> ViewerResult<PathBuf> {
    let path = Path::new(id);
    let mut clean = PathBuf::new();

    for part in path.components() {
        match part {
            PathComponent::Normal(segment) => clean.push(segment),
            PathComponent::CurDir => {}
            _ => {
                return Err(ViewerError::Usage(format!(
                    "component id `{id}` must be a path inside the content directory"
                )))
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(ViewerError::Usage("component id is empty".to_string()));
    }

    Ok(clean)
}

/// Accept a single path segment
fn safe_segment<'a>(name: &'a str, what: &str) -> ViewerResult<&'a str> {
    let mut parts = Path::new(name).components();
    match (parts.next(), parts.next()) {
        (Some(PathComponent::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(name),
        _ => Err(ViewerError::Usage(format!("invalid {what} name `{name}`"))),
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
