//! Popup bodies, built once per diagram.

use crate::badge::method_badge_compact;
use crate::markup::{Markup, el};
use crate::route::Links;
use apidoc_core::{Catalog, EndpointRecord, PopupSource};
use indexmap::IndexMap;

pub fn popup_body(source: &PopupSource, catalog: &Catalog, links: &Links) -> Markup {
    match source {
        PopupSource::Actor(actor) => actor_popup(actor, catalog, links),
        PopupSource::Entity(entity) => entity_popup(entity, catalog),
    }
}

/// The actor's endpoints grouped under subcategory headings, in first-seen order.
pub fn actor_popup(actor: &str, catalog: &Catalog, links: &Links) -> Markup {
    let mut groups: IndexMap<&str, Vec<&EndpointRecord>> = IndexMap::new();
    for record in catalog.actor_records(actor) {
        groups
            .entry(record.subcategory.as_str())
            .or_default()
            .push(record);
    }

    let body = groups.iter().map(|(sub, records)| {
        el("div")
            .class("popup-group")
            .child(el("div").class("popup-sub").text(sub))
            .children(records.iter().map(|r| {
                el("a")
                    .class("popup-endpoint")
                    .attr("href", links.endpoint(&r.id))
                    .attr("target", "_top")
                    .child(method_badge_compact(&r.method))
                    .text(" ")
                    .child(el("span").class("ep-path").text(&r.path))
            }))
    });

    Markup::from_iter([
        el("div")
            .class("popup-title")
            .text(format!("{actor} Endpoints"))
            .build(),
        el("div").class("popup-body").children(body).build(),
    ])
}

/// Storage path and field table of the entity. Unknown entities render the title only.
pub fn entity_popup(entity: &str, catalog: &Catalog) -> Markup {
    let mut out = Markup::from(el("div").class("popup-title").text(entity));
    let Some(info) = catalog.entity(entity) else {
        return out;
    };
    if !info.storage_path.is_empty() {
        out.push(el("div").class("popup-path").text(&info.storage_path));
    }
    let header = el("tr")
        .child(el("th").text("Field"))
        .child(el("th").text("Type"))
        .child(el("th").text("Description"));
    let rows = info.fields.iter().map(|f| {
        el("tr")
            .child(el("td").class("f-name").text(&f.name))
            .child(el("td").class("f-type").text(&f.ty))
            .child(el("td").class("f-desc").text(&f.description))
    });
    out.push(
        el("table")
            .class("popup-table")
            .child(header)
            .children(rows),
    );
    out
}
