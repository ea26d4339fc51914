//! Per-record pages addressed by stable route tokens (`ep-{id}`).
//!
//! A [`PageHandle`] holds only the record id: the record is looked up in the catalog passed
//! at render time, so a handle built before a catalog edit observes the edit (and reports
//! [`PageOutcome::NotFound`] if its record was removed).

use crate::schema::{Section, render_sections};
use apidoc_core::Catalog;
use apidoc_core::model::route_token_for;
use indexmap::IndexMap;
use std::sync::Arc;

const TOKEN_PREFIX: &str = "ep-";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteToken(String);

impl RouteToken {
    pub fn for_id(id: &str) -> Self {
        Self(route_token_for(id))
    }

    /// Accepts `ep-{id}` (optionally with a leading `/` or trailing `.html`).
    pub fn parse(raw: &str) -> crate::Result<Self> {
        let t = raw.trim().trim_start_matches('/');
        let t = t.strip_suffix(".html").unwrap_or(t);
        match t.strip_prefix(TOKEN_PREFIX) {
            Some(id) if !id.is_empty() => Ok(Self::for_id(id)),
            _ => Err(crate::Error::InvalidRouteToken {
                token: raw.to_string(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.0[TOKEN_PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How route tokens and the fixed pages turn into `href` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    prefix: String,
    suffix: String,
}

impl Links {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Flat directory of `.html` files.
    pub fn static_site() -> Self {
        Self::new("", ".html")
    }

    pub fn endpoint(&self, id: &str) -> String {
        self.page(&route_token_for(id))
    }

    pub fn page(&self, name: &str) -> String {
        format!("{}{}{}", self.prefix, name, self.suffix)
    }

    pub fn listing(&self) -> String {
        self.page("endpoints")
    }

    pub fn home(&self) -> String {
        self.page("index")
    }
}

/// A rendered detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub id: String,
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Found(DetailPage),
    /// The handle's id is not in the catalog. Recoverable: the viewer gets a placeholder.
    NotFound { id: String },
}

impl PageOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, PageOutcome::Found(_))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct PageHandle {
    id: String,
    token: RouteToken,
    title: String,
}

impl PageHandle {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            token: RouteToken::for_id(&id),
            id,
            title: title.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn token(&self) -> &RouteToken {
        &self.token
    }

    /// Title captured when the handle was built (navigation label only).
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn render(&self, catalog: &Catalog, links: &Links) -> PageOutcome {
        let Some(record) = catalog.get(&self.id) else {
            tracing::debug!(id = %self.id, "page handle refers to a record not in the catalog");
            return PageOutcome::NotFound {
                id: self.id.clone(),
            };
        };
        PageOutcome::Found(DetailPage {
            id: record.id.clone(),
            title: record.title.clone(),
            sections: render_sections(record, catalog, links),
        })
    }
}

/// Page handles for every record, in catalog order, with an id lookup.
///
/// Handles are shared (`Arc`) and survive [`Router::sync`], so repeated navigation to the
/// same id returns the same handle for the whole session.
#[derive(Debug, Clone, Default)]
pub struct Router {
    pages: Vec<Arc<PageHandle>>,
    by_id: IndexMap<String, Arc<PageHandle>>,
}

impl Router {
    pub fn build(catalog: &Catalog) -> Self {
        let mut router = Self::default();
        router.sync(catalog);
        router
    }

    /// Adds handles for ids not seen before; returns how many were added.
    pub fn sync(&mut self, catalog: &Catalog) -> usize {
        let mut added = 0usize;
        for record in catalog.records() {
            if self.by_id.contains_key(&record.id) {
                continue;
            }
            let handle = Arc::new(PageHandle::new(record.id.clone(), record.title.clone()));
            self.by_id.insert(record.id.clone(), Arc::clone(&handle));
            self.pages.push(handle);
            added += 1;
        }
        tracing::debug!(added, total = self.pages.len(), "router synced");
        added
    }

    pub fn pages(&self) -> &[Arc<PageHandle>] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<PageHandle>> {
        self.by_id.get(id)
    }

    pub fn resolve(&self, token: &RouteToken) -> Option<&Arc<PageHandle>> {
        self.get(token.id())
    }

    /// Renders the page for `token`. Unknown tokens are a not-found outcome, not an error.
    pub fn render(&self, token: &RouteToken, catalog: &Catalog, links: &Links) -> PageOutcome {
        match self.resolve(token) {
            Some(handle) => handle.render(catalog, links),
            None => PageOutcome::NotFound {
                id: token.id().to_string(),
            },
        }
    }
}
