//! Interactive architecture diagram.
//!
//! [`render_diagram`] is the build phase: popup bodies, node elements and a first-paint edge
//! layer estimated from the declared placements. [`runtime::DiagramRuntime`] models the client
//! phase (redraws, popup hover-intent) and [`script`] carries the matching browser code.

pub mod geometry;
pub mod layout;
pub mod popup;
pub mod runtime;
pub mod script;

pub use geometry::{EdgeGeometry, NodeBox, PopupPlacement, PopupSide, place_popup, route_edge};
pub use layout::{DiagramLayout, estimate_layout};
pub use runtime::{DiagramRuntime, PopupState, RuntimeEvent, TimerId};

use crate::markup::{Markup, el};
use crate::route::Links;
use crate::text::DeterministicTextMeasurer;
use apidoc_core::{Catalog, DiagramDecl, DiagramNode, DiagramSettings};

fn px(v: f64) -> String {
    let r = (v * 100.0).round() / 100.0;
    if r == 0.0 { "0".to_string() } else { r.to_string() }
}

fn arrow_marker(scope_id: &str) -> Markup {
    el("defs")
        .child(
            el("marker")
                .attr("id", script::marker_id(scope_id))
                .attr("markerWidth", "10")
                .attr("markerHeight", "7")
                .attr("refX", "10")
                .attr("refY", "3.5")
                .attr("orient", "auto")
                .child(
                    el("polygon")
                        .attr("points", "0 0, 10 3.5, 0 7")
                        .attr("fill", "#94A3B8"),
                ),
        )
        .build()
}

fn edge_markup(edge: &EdgeGeometry, marker: &str) -> Markup {
    let line = el("line")
        .class("arrow-line")
        .attr("x1", px(edge.start.x))
        .attr("y1", px(edge.start.y))
        .attr("x2", px(edge.end.x))
        .attr("y2", px(edge.end.y))
        .attr("marker-end", format!("url(#{marker})"));
    let label = edge.label.as_ref().map(|(at, text)| {
        el("text")
            .class("arrow-label")
            .attr("x", px(at.x))
            .attr("y", px(at.y))
            .text(text)
            .build()
    });
    el("g")
        .class("arrow-g")
        .child(line)
        .child(label.unwrap_or_default())
        .build()
}

fn node_markup(node: &DiagramNode) -> Markup {
    let style = format!(
        "left:{};top:{}",
        node.placement.left.css(),
        node.placement.top.css()
    );
    let mut node_el = el("div")
        .class("node")
        .class(format!("node-{}", node.kind.as_str()))
        .attr("data-node", node.id.as_str())
        .attr("data-popup", node.popup_id())
        .attr("style", style)
        .text(&node.label);
    if !node.subtitle.is_empty() {
        node_el = node_el.child(el("div").class("node-sub").text(&node.subtitle));
    }
    node_el.build()
}

/// Builds the self-contained diagram fragment rooted at `scope_id`.
///
/// The only document-level ids are `scope_id` itself and the arrow marker derived from it.
pub fn render_diagram(
    catalog: &Catalog,
    settings: &DiagramSettings,
    links: &Links,
    scope_id: &str,
) -> crate::Result<Markup> {
    let decl: &DiagramDecl = catalog.diagram();
    let layout = estimate_layout(decl, settings, &DeterministicTextMeasurer::default());
    let marker = script::marker_id(scope_id);

    let first_paint: Markup = layout
        .route_edges(decl, settings.label_offset)
        .iter()
        .map(|e| edge_markup(e, &marker))
        .collect();
    let svg = el("svg")
        .class("arrows")
        .attr("aria-hidden", "true")
        .child(arrow_marker(scope_id))
        .child(first_paint);

    let nodes: Markup = decl.nodes.iter().map(node_markup).collect();
    let popups: Markup = decl
        .nodes
        .iter()
        .map(|node| {
            el("div")
                .class("popup")
                .attr("data-popup-id", node.popup_id())
                .attr("data-node", node.id.as_str())
                .attr(
                    "style",
                    format!(
                        "max-width:{}px;max-height:{}px",
                        px(settings.popup_width),
                        px(settings.popup_height)
                    ),
                )
                .child(popup::popup_body(&node.popup, catalog, links))
        })
        .collect();

    tracing::debug!(
        scope = scope_id,
        nodes = decl.nodes.len(),
        edges = decl.edges.len(),
        "diagram rendered"
    );

    Ok(el("div")
        .class("diagram")
        .attr("id", scope_id)
        .attr("style", format!("min-height:{}px", px(layout.container.height)))
        .child(script::style(scope_id))
        .child(svg)
        .child(nodes)
        .child(popups)
        .child(script::script(scope_id, decl, settings)?)
        .build())
}
