//! Viewer templates
//!
//! The viewer pages are minijinja templates compiled into the binary. Any of
//! them can be replaced by dropping a file with the same name into the
//! configured `views_dir`:
//!
//! ```text
//! views/
//! └── index.html   # replaces the embedded index page
//! ```
//!
//! HTML auto-escaping is on for every `.html` template; component markup is
//! passed through `|safe` where it has to render as markup.

use crate::error::{ViewerError, ViewerResult};
use minijinja::{Environment, Value};
use serde::Serialize;
use std::path::Path;

/// Layout shared by every page
pub const LAYOUT: &str = "layout.html";
/// Category listing
pub const INDEX: &str = "index.html";
/// Single component preview
pub const COMPONENT: &str = "component.html";
/// Composed page preview
pub const PAGE: &str = "page.html";

/// Embedded template sources, by name
pub const EMBEDDED: &[(&str, &str)] = &[
    (LAYOUT, include_str!("../../templates/layout.html")),
    (INDEX, include_str!("../../templates/index.html")),
    (COMPONENT, include_str!("../../templates/component.html")),
    (PAGE, include_str!("../../templates/page.html")),
];

/// Loaded template environment
#[derive(Debug)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load the templates, preferring files in `views_dir`
    ///
    /// `stylesheets` is exposed to every template as a global.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if an override exists but cannot be read
    /// and [`ViewerError::Template`] if a template fails to parse.
    pub fn new(views_dir: Option<&Path>, stylesheets: &[String]) -> ViewerResult<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_global("stylesheets", Value::from_serialize(stylesheets));

        for (name, embedded) in EMBEDDED {
            let source = Self::load_source(name, embedded, views_dir)?;
            env.add_template_owned((*name).to_string(), source)?;
        }

        Ok(Self { env })
    }

    /// Embedded templates only
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Template`] if an embedded template fails to parse.
    pub fn embedded(stylesheets: &[String]) -> ViewerResult<Self> {
        Self::new(None, stylesheets)
    }

    fn load_source(name: &str, embedded: &str, views_dir: Option<&Path>) -> ViewerResult<String> {
        if let Some(dir) = views_dir {
            let path = dir.join(name);
            if path.is_file() {
                tracing::info!(template = name, path = %path.display(), "using template override");
                return std::fs::read_to_string(&path).map_err(|e| ViewerError::io(path, e));
            }
        }

        Ok(embedded.to_string())
    }

    /// Render a template with the given context
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Template`] if the template is unknown or
    /// rendering fails.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> ViewerResult<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}
