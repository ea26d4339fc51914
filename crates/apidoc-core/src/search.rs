//! Text + method filtering over catalog records.

use crate::catalog::Catalog;
use crate::model::{EndpointRecord, Method};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MethodFilter {
    #[default]
    All,
    Only(Method),
}

impl MethodFilter {
    pub fn matches(&self, method: &Method) -> bool {
        match self {
            MethodFilter::All => true,
            MethodFilter::Only(m) => m == method,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MethodFilter::All => "All",
            MethodFilter::Only(m) => m.as_str(),
        }
    }
}

impl FromStr for MethodFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(MethodFilter::All)
        } else {
            Ok(MethodFilter::Only(Method::parse(s)))
        }
    }
}

/// A listing query: case-insensitive substring match AND method filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    pub method: MethodFilter,
}

impl SearchQuery {
    pub fn new(text: &str, method: MethodFilter) -> Self {
        Self {
            text: text.trim().to_lowercase(),
            method,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.method == MethodFilter::All
    }

    pub fn matches(&self, record: &EndpointRecord) -> bool {
        if !self.method.matches(&record.method) {
            return false;
        }
        self.text.is_empty() || record.search_haystack().contains(&self.text)
    }

    /// Matching records in catalog order.
    pub fn filter<'a>(&self, catalog: &'a Catalog) -> Vec<&'a EndpointRecord> {
        catalog
            .records()
            .iter()
            .filter(|r| self.matches(r))
            .collect()
    }
}

/// Number of records per method, keyed by method label (sorted).
pub fn method_counts<'a>(
    records: impl IntoIterator<Item = &'a EndpointRecord>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.method.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}
