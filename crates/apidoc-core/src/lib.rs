#![forbid(unsafe_code)]

//! Endpoint catalog model + loading (headless).
//!
//! Design goals:
//! - immutable, validated catalog built once per session
//! - deterministic, testable outputs (ordered indexes, no hash-order iteration)
//! - tolerant of dangling index references (reported, never fatal)

pub mod catalog;
pub mod config;
pub mod diagram;
pub mod error;
pub mod geom;
pub mod model;
pub mod sanitize;
pub mod search;

pub use catalog::{Catalog, CatalogDocument, DanglingReference, IntegrityReport};
pub use config::{DiagramSettings, SiteConfig};
pub use diagram::{
    DiagramDecl, DiagramEdge, DiagramNode, NodeKind, NodePlacement, Offset, PopupSource,
};
pub use error::{Error, Result};
pub use model::{
    ActorEndpointIndex, BodyRow, Complexity, EndpointRecord, EntityFieldSchema, EntityFields,
    FieldRow, Method, Required,
};
pub use search::{MethodFilter, SearchQuery};

#[cfg(test)]
mod tests;
