mod catalog;
mod config;

use crate::{Catalog, EndpointRecord, Method};

pub(crate) fn record(id: &str, method: Method, path: &str, tag: &str, sub: &str) -> EndpointRecord {
    let mut r = EndpointRecord::new(id, method, path, format!("Title {id}"), tag);
    r.subcategory = sub.to_string();
    r
}

pub(crate) fn fixture_catalog() -> Catalog {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("catalog")
        .join("platform.json");
    Catalog::load(&path).expect("fixture catalog")
}
