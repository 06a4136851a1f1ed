//! packs-viewer: local preview server for Shuffle HTML component packs
//!
//! A pack is a directory of HTML snippets grouped by category:
//!
//! ```text
//! html/
//! ├── navigation/nav-1.html
//! ├── cards/card-1.html
//! ├── footer/footer-1.html
//! └── __partials/...        # reserved, never classified
//! ```
//!
//! The viewer lists components per category, previews a single component,
//! and composes a full page around any component by adding random
//! navigation, content and footer companions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use packs_viewer::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     packs_viewer::observability::init()?;
//!
//!     let config = ViewerConfig::load(None, &ConfigOverrides::default())?;
//!     PreviewServer::new(config)?.run().await
//! }
//! ```
//!
//! # Routes
//!
//! | route                                   | response                      |
//! |-----------------------------------------|-------------------------------|
//! | `GET /?category=`                       | category listing              |
//! | `GET /component?id=<category>/<file>`   | one component in the layout   |
//! | `GET /page?category=&component=`        | composed page                 |
//! | anything else                           | file from `static_dir`        |
//!
//! Every handler failure is answered with status 500 and `{"error": "..."}`.

pub mod browser;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod observability;
pub mod random;
pub mod server;
pub mod state;
pub mod template;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use packs_viewer::prelude::*;
    //! ```

    pub use crate::catalog::{Bucket, Catalog, Component};
    pub use crate::composer::{ComposedPage, Fragment, PageComposer};
    pub use crate::config::{ConfigOverrides, Platform, ViewerConfig};
    pub use crate::error::{ViewerError, ViewerResult};
    pub use crate::files::{FileAccess, FilePattern};
    pub use crate::random::{RandomSource, SequenceRandom, ThreadRandom};
    pub use crate::server::PreviewServer;
    pub use crate::state::ViewerState;
}
