//! Category classification into page positions
//!
//! A composed page is assembled from three position buckets. Which bucket a
//! category lands in is decided purely by keywords in its name, held in a
//! declarative rule table so the rules can be inspected and tested on their
//! own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position bucket of a category on a composed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Headers and navigation
    Top,
    /// Page body content
    Mid,
    /// Footers
    Bottom,
}

/// Keyword rule for one bucket
///
/// A name matches when it contains at least one `include` keyword (an empty
/// list accepts every name) and none of the `exclude` keywords. Matching is
/// plain, case-sensitive substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRule {
    /// Bucket this rule defines
    pub bucket: Bucket,
    /// At least one of these must appear
    pub include: &'static [&'static str],
    /// None of these may appear
    pub exclude: &'static [&'static str],
}

impl BucketRule {
    /// Test a category name against this rule
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|kw| name.contains(kw));
        included && !self.exclude.iter().any(|kw| name.contains(kw))
    }
}

/// The classification rules, one per bucket
pub const BUCKET_RULES: &[BucketRule] = &[
    BucketRule {
        bucket: Bucket::Top,
        include: &["navigation", "headers"],
        exclude: &[],
    },
    BucketRule {
        bucket: Bucket::Mid,
        include: &[],
        exclude: &[
            "navigation",
            "header",
            "footer",
            "toast",
            "alert",
            "breadcrumb",
        ],
    },
    BucketRule {
        bucket: Bucket::Bottom,
        include: &["footer"],
        exclude: &[],
    },
];

impl Bucket {
    /// All buckets, in page order
    pub const ALL: [Self; 3] = [Self::Top, Self::Mid, Self::Bottom];

    /// The rule defining this bucket
    #[must_use]
    pub fn rule(self) -> &'static BucketRule {
        BUCKET_RULES
            .iter()
            .find(|rule| rule.bucket == self)
            .unwrap_or(&BUCKET_RULES[0])
    }

    /// Whether a category name belongs in this bucket
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.rule().matches(name)
    }

    /// Lowercase name of the bucket
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Mid => "mid",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "mid" => Ok(Self::Mid),
            "bottom" => Ok(Self::Bottom),
            other => Err(format!("unknown bucket `{other}`")),
        }
    }
}

/// Filter category names down to one bucket
///
/// Names starting with `reserved_prefix` never appear in any bucket.
#[must_use]
pub fn classify<'a>(
    names: impl IntoIterator<Item = &'a str>,
    bucket: Bucket,
    reserved_prefix: &str,
) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| reserved_prefix.is_empty() || !name.starts_with(reserved_prefix))
        .filter(|name| bucket.matches(name))
        .map(str::to_string)
        .collect()
}
