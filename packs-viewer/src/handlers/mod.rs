//! Request handlers
//!
//! - `GET /` - category listing with the components of one category
//! - `GET /component?id=<category>/<file>` - a single component
//! - `GET /page?category=..&component=..` - a composed page
//!
//! Handlers are stateless: each request rescans the content directory.
//! Every failure, including malformed query strings, becomes a
//! [`ViewerError`] and therefore a 500 with a JSON body.

pub mod assets;

use crate::{
    catalog::component_id,
    composer::PageComposer,
    error::{ViewerError, ViewerResult},
    state::ViewerState,
    template,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Query parameters of `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Category to show; defaults to the first one
    pub category: Option<String>,
}

/// Query parameters of `GET /component`
#[derive(Debug, Default, Deserialize)]
pub struct ComponentQuery {
    /// Path of the component relative to the content root
    pub id: Option<String>,
}

/// Query parameters of `GET /page`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Category of the requested component
    pub category: Option<String>,
    /// File name of the requested component
    pub component: Option<String>,
}

/// Category entry in the index navigation
#[derive(Debug, Serialize)]
struct CategoryLink<'a> {
    name: &'a str,
    url: String,
}

/// Component entry on the index page
#[derive(Debug, Serialize)]
struct ComponentView<'a> {
    file: &'a str,
    id: &'a str,
    content: &'a str,
    preview_url: String,
    page_url: String,
}

#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    categories: Vec<CategoryLink<'a>>,
    current_category: &'a str,
    current_category_formatted: String,
    components: Vec<ComponentView<'a>>,
}

fn query<T>(extracted: Result<Query<T>, QueryRejection>) -> ViewerResult<T> {
    extracted
        .map(|Query(q)| q)
        .map_err(|rejection| ViewerError::Usage(rejection.body_text()))
}

fn required(value: Option<String>, name: &str) -> ViewerResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ViewerError::missing_param(name))
}

/// Upper-case the first character
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Percent-encode a query string value
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(char::from(byte));
            }
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

/// `GET /`
///
/// # Errors
///
/// Fails when the content tree cannot be read, when no category exists and
/// none was requested, or when rendering fails.
pub async fn index(
    State(state): State<ViewerState>,
    params: Result<Query<IndexQuery>, QueryRejection>,
) -> ViewerResult<Html<String>> {
    let params = query(params)?;
    let by_category = state.catalog().components_by_category().await?;

    let reserved = state.config().reserved_prefix.as_str();
    let navigable: Vec<&String> = by_category
        .keys()
        .filter(|name| reserved.is_empty() || !name.starts_with(reserved))
        .collect();

    let current = match params.category.filter(|c| !c.is_empty()) {
        Some(category) => category,
        None => navigable.first().map(|c| (*c).clone()).ok_or_else(|| {
            ViewerError::Selection(format!(
                "no component categories found under {}",
                state.catalog().root().display()
            ))
        })?,
    };

    let categories = navigable
        .into_iter()
        .map(|name| CategoryLink {
            name: name.as_str(),
            url: format!("/?category={}", encode_query_value(name)),
        })
        .collect();

    let components = by_category
        .get(&current)
        .map(|list| {
            list.iter()
                .map(|c| ComponentView {
                    file: &c.file,
                    id: component_id(&c.file),
                    content: &c.content,
                    preview_url: format!(
                        "/component?id={}",
                        encode_query_value(&format!("{current}/{}", c.file))
                    ),
                    page_url: format!(
                        "/page?category={}&component={}",
                        encode_query_value(&current),
                        encode_query_value(&c.file)
                    ),
                })
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(category = %current, "rendering index");

    let html = state.templates().render(
        template::INDEX,
        IndexContext {
            categories,
            current_category: &current,
            current_category_formatted: capitalize(&current),
            components,
        },
    )?;

    Ok(Html(html))
}

/// `GET /component`
///
/// # Errors
///
/// Fails when `id` is missing or escapes the content root, when the file
/// cannot be read, or when rendering fails.
pub async fn component(
    State(state): State<ViewerState>,
    params: Result<Query<ComponentQuery>, QueryRejection>,
) -> ViewerResult<Html<String>> {
    let id = required(query(params)?.id, "id")?;
    let markup = state.catalog().read_component(&id).await?;

    tracing::debug!(%id, "rendering component");

    let html = state
        .templates()
        .render(template::COMPONENT, minijinja::context! { component => markup })?;
    Ok(Html(html))
}

/// `GET /page`
///
/// Blank `category` or `component` values count as missing.
///
/// # Errors
///
/// Fails when a parameter is missing, when composition fails (see
/// [`PageComposer::compose`]), or when rendering fails.
pub async fn page(
    State(state): State<ViewerState>,
    params: Result<Query<PageQuery>, QueryRejection>,
) -> ViewerResult<Html<String>> {
    let params = query(params)?;
    let category = required(params.category, "category")?;
    let component = required(params.component, "component")?;

    let composed = PageComposer::new(state.catalog(), state.random())
        .compose(&category, &component)
        .await?;
    let fragments: Vec<&str> = composed.html().collect();

    let html = state
        .templates()
        .render(template::PAGE, minijinja::context! { components => fragments })?;
    Ok(Html(html))
}
