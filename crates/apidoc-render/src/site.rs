//! Every page of a static site, as in-memory files.

use crate::diagram::render_diagram;
use crate::listing::render_listing;
use crate::markup::{Markup, el};
use crate::page::document;
use crate::route::{Links, Router};
use crate::view::{detail_title, render_detail};
use apidoc_core::sanitize::sanitize_scope_id;
use apidoc_core::{Catalog, SearchQuery, SiteConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub contents: String,
}

impl SiteFile {
    fn new(path: impl Into<PathBuf>, contents: Markup) -> Self {
        Self {
            path: path.into(),
            contents: contents.into_string(),
        }
    }
}

fn legend() -> Markup {
    el("div")
        .class("diagram-legend")
        .child(
            el("span")
                .child(el("span").class("legend-swatch").class("legend-actor"))
                .text("Human actor (hover for endpoints)"),
        )
        .child(
            el("span")
                .child(el("span").class("legend-swatch").class("legend-data"))
                .text("Data entity (hover for fields)"),
        )
        .build()
}

/// Architecture page body: title, description, legend and the diagram.
pub fn render_home(catalog: &Catalog, config: &SiteConfig, links: &Links) -> crate::Result<Markup> {
    let settings = config.diagram_settings();
    let mut body = Markup::from(el("h1").text(config.site_title()));
    if let Some(desc) = config.get_str("site.description") {
        body.push(el("p").class("site-description").text(desc));
    }
    body.push(el("hr").class("section-divider"));
    body.push(legend());
    body.push(render_diagram(
        catalog,
        &settings,
        links,
        &sanitize_scope_id("architecture"),
    )?);
    Ok(body)
}

/// `index.html` (architecture), `endpoints.html` (listing) and one `ep-{id}.html` per record.
pub fn render_site(catalog: &Catalog, config: &SiteConfig) -> crate::Result<Vec<SiteFile>> {
    let links = Links::static_site();
    let site_title = config.site_title();
    let router = Router::build(catalog);
    let mut files = Vec::with_capacity(router.len() + 2);

    files.push(SiteFile::new(
        "index.html",
        document(
            "Architecture",
            site_title,
            &links,
            render_home(catalog, config, &links)?,
        ),
    ));
    files.push(SiteFile::new(
        "endpoints.html",
        document(
            "All Endpoints",
            site_title,
            &links,
            render_listing(catalog, &SearchQuery::default(), &links),
        ),
    ));

    for handle in router.pages() {
        let outcome = handle.render(catalog, &links);
        let html = document(
            detail_title(&outcome),
            site_title,
            &links,
            render_detail(&outcome, &links),
        );
        files.push(SiteFile::new(format!("{}.html", handle.token()), html));
    }

    tracing::debug!(files = files.len(), "site rendered");
    Ok(files)
}
