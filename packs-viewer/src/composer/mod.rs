//! Page composition
//!
//! Builds a plausible full page around one requested component by adding
//! randomly chosen companions from the other buckets:
//!
//! | requested category | composed page                          |
//! |--------------------|----------------------------------------|
//! | top                | requested, mid, bottom                 |
//! | mid / unbucketed   | top, requested, mid, bottom            |
//! | bottom             | top, mid, requested                    |
//!
//! A companion slot whose bucket is empty fails the whole page with
//! [`ViewerError::Selection`](crate::error::ViewerError::Selection).

use crate::{
    catalog::{Bucket, Catalog},
    error::ViewerResult,
    random::{pick_one, RandomSource},
};
use serde::Serialize;

/// One wrapped component on a composed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Category the component came from
    pub category: String,
    /// Component file name
    pub component: String,
    /// Markup wrapped in its `data-component-id` container
    pub html: String,
    /// Whether this is the component the page was requested for
    pub requested: bool,
}

/// Ordered fragments of a composed page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposedPage {
    /// Fragments in page order
    pub fragments: Vec<Fragment>,
}

impl ComposedPage {
    /// Wrapped markup of every fragment, in order
    pub fn html(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.html.as_str())
    }

    /// Categories of every fragment, in order
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.category.as_str()).collect()
    }

    /// Number of fragments
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the page has no fragments
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Composes pages from a catalog and a random source
pub struct PageComposer<'a> {
    catalog: &'a Catalog,
    random: &'a dyn RandomSource,
}

impl<'a> PageComposer<'a> {
    /// Create a composer
    #[must_use]
    pub fn new(catalog: &'a Catalog, random: &'a dyn RandomSource) -> Self {
        Self { catalog, random }
    }

    /// Compose a page around `component` of `category`
    ///
    /// # Errors
    ///
    /// - `Selection` when a needed companion bucket, or the category picked
    ///   from it, is empty
    /// - `Io` when the catalog cannot be read, including a missing target
    /// - `Usage` for unsafe category or component names
    pub async fn compose(&self, category: &str, component: &str) -> ViewerResult<ComposedPage> {
        let (top, mid, bottom) = tokio::try_join!(
            self.catalog.categories_by_bucket(Bucket::Top),
            self.catalog.categories_by_bucket(Bucket::Mid),
            self.catalog.categories_by_bucket(Bucket::Bottom),
        )?;

        let is_top = Bucket::Top.matches(category);
        let is_bottom = Bucket::Bottom.matches(category);
        let mut page = ComposedPage::default();

        if !is_top {
            page.fragments.push(self.companion(&top, Bucket::Top).await?);
        }

        if is_bottom {
            page.fragments.push(self.companion(&mid, Bucket::Mid).await?);
        }

        page.fragments.push(Fragment {
            category: category.to_string(),
            component: component.to_string(),
            html: self.catalog.component_html(category, component).await?,
            requested: true,
        });

        if !is_bottom {
            page.fragments.push(self.companion(&mid, Bucket::Mid).await?);
            page.fragments
                .push(self.companion(&bottom, Bucket::Bottom).await?);
        }

        tracing::debug!(
            category,
            component,
            fragments = page.len(),
            "page composed"
        );

        Ok(page)
    }

    async fn companion(&self, categories: &[String], bucket: Bucket) -> ViewerResult<Fragment> {
        let what = format!("{bucket} categories");
        let category = pick_one(self.random, categories, &what)?;
        let component = self.catalog.random_component(category, self.random).await?;
        let html = self.catalog.component_html(category, &component).await?;

        tracing::trace!(%bucket, %category, %component, "companion picked");

        Ok(Fragment {
            category: category.clone(),
            component,
            html,
            requested: false,
        })
    }
}
