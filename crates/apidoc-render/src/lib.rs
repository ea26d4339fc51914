#![forbid(unsafe_code)]

//! Headless HTML rendering for an endpoint catalog.
//!
//! - [`schema`]: record -> ordered display sections
//! - [`route`]: one addressable page handle per record (`ep-{id}`)
//! - [`diagram`]: interactive architecture diagram (build phase + runtime model + client script)
//! - [`listing`] / [`view`]: the catalog browser and the single-record detail view
//! - [`site`]: every page of a static site as in-memory files

pub mod badge;
pub mod diagram;
pub mod listing;
pub mod markup;
pub mod page;
pub mod route;
pub mod schema;
pub mod site;
pub mod style;
pub mod text;
pub mod view;

pub use diagram::render_diagram;
pub use listing::render_listing;
pub use markup::{Element, Markup, el};
pub use route::{Links, PageHandle, PageOutcome, RouteToken, Router};
pub use schema::{Section, SectionKind, render_record, render_sections};
pub use site::{SiteFile, render_home, render_site};
pub use view::render_detail;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid route token: {token}")]
    InvalidRouteToken { token: String },
    #[error("diagram script data error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
