#![forbid(unsafe_code)]

//! `apidoc` renders an endpoint catalog as a browsable reference: one addressable page per
//! endpoint, a searchable listing and an interactive architecture diagram.
//!
//! # Features
//!
//! - `render`: enable HTML rendering (`apidoc::render`)

pub use apidoc_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use apidoc_render::diagram::{DiagramRuntime, PopupState, RuntimeEvent};
    pub use apidoc_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use apidoc_render::{
        Links, Markup, PageHandle, PageOutcome, RouteToken, Router, Section, SectionKind,
        SiteFile, render_detail, render_diagram, render_listing, render_record, render_sections,
        render_site,
    };

    use apidoc_core::{Catalog, SearchQuery, SiteConfig};
    use apidoc_render::page::document;
    use apidoc_render::view::detail_title;
    use std::path::Path;

    #[derive(Debug, thiserror::Error)]
    pub enum DocError {
        #[error(transparent)]
        Catalog(#[from] apidoc_core::Error),
        #[error(transparent)]
        Render(#[from] apidoc_render::Error),
    }

    pub type Result<T> = std::result::Result<T, DocError>;

    /// Catalog + config + router, bundled for integrations that serve pages one at a time.
    ///
    /// The router survives [`DocSite::reload`]: handles for ids that still exist stay the same,
    /// removed ids render the not-found placeholder, new ids get fresh handles.
    #[derive(Debug, Clone)]
    pub struct DocSite {
        catalog: Catalog,
        config: SiteConfig,
        router: Router,
        links: Links,
    }

    impl DocSite {
        pub fn new(catalog: Catalog, config: SiteConfig) -> Self {
            let router = Router::build(&catalog);
            Self {
                catalog,
                config,
                router,
                links: Links::static_site(),
            }
        }

        pub fn load(path: impl AsRef<Path>, config: SiteConfig) -> Result<Self> {
            Ok(Self::new(Catalog::load(path)?, config))
        }

        pub fn with_links(mut self, links: Links) -> Self {
            self.links = links;
            self
        }

        pub fn catalog(&self) -> &Catalog {
            &self.catalog
        }

        pub fn config(&self) -> &SiteConfig {
            &self.config
        }

        pub fn router(&self) -> &Router {
            &self.router
        }

        pub fn links(&self) -> &Links {
            &self.links
        }

        /// Swaps in an edited catalog; returns how many new page handles were added.
        pub fn reload(&mut self, catalog: Catalog) -> usize {
            self.catalog = catalog;
            self.router.sync(&self.catalog)
        }

        /// Resolves a route token (`ep-{id}`) against the current catalog.
        pub fn outcome(&self, token: &str) -> Result<PageOutcome> {
            let token = RouteToken::parse(token)?;
            Ok(self.router.render(&token, &self.catalog, &self.links))
        }

        /// Full HTML document for a route token. Unknown ids render the not-found page.
        pub fn page_html(&self, token: &str) -> Result<String> {
            let outcome = self.outcome(token)?;
            Ok(document(
                detail_title(&outcome),
                self.config.site_title(),
                &self.links,
                render_detail(&outcome, &self.links),
            )
            .into_string())
        }

        pub fn listing_html(&self, query: &SearchQuery) -> String {
            document(
                "All Endpoints",
                self.config.site_title(),
                &self.links,
                render_listing(&self.catalog, query, &self.links),
            )
            .into_string()
        }

        pub fn home_html(&self) -> Result<String> {
            let body = apidoc_render::render_home(&self.catalog, &self.config, &self.links)?;
            Ok(document("Architecture", self.config.site_title(), &self.links, body).into_string())
        }

        pub fn site_files(&self) -> Result<Vec<SiteFile>> {
            Ok(render_site(&self.catalog, &self.config)?)
        }
    }
}
