//! Node boxes for the diagram: measured (runtime) or estimated (first paint).

use super::geometry::{EdgeGeometry, NodeBox, route_edge};
use crate::text::{TextMeasurer, TextStyle};
use apidoc_core::geom::{Rect, Size, rect, size};
use apidoc_core::{DiagramDecl, DiagramSettings};
use indexmap::IndexMap;

const NODE_MIN_WIDTH: f64 = 130.0;
const NODE_PAD_Y: f64 = 14.0;
const NODE_PAD_X: f64 = 18.0;
const LABEL_FONT_SIZE: f64 = 14.5;
const SUBTITLE_FONT_SIZE: f64 = 11.5;
const SUBTITLE_GAP: f64 = 2.0;
/// Container padding below the lowest node.
const BOTTOM_PAD: f64 = 20.0;

/// Container size and node rectangles, all relative to the container's top-left corner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramLayout {
    pub container: Size,
    pub nodes: IndexMap<String, Rect>,
}

impl DiagramLayout {
    pub fn new(container: Size) -> Self {
        Self {
            container,
            nodes: IndexMap::new(),
        }
    }

    pub fn with_node(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.nodes.insert(id.into(), rect);
        self
    }

    pub fn node_box(&self, id: &str) -> Option<NodeBox> {
        self.nodes.get(id).copied().map(NodeBox::from_rect)
    }

    /// Every declared edge whose endpoints both have a box, in declaration order.
    pub fn route_edges(&self, decl: &DiagramDecl, label_offset: f64) -> Vec<EdgeGeometry> {
        decl.edges
            .iter()
            .filter_map(|edge| {
                let from = self.node_box(&edge.from)?;
                let to = self.node_box(&edge.to)?;
                Some(route_edge(&from, &to, edge.label.as_deref(), label_offset))
            })
            .collect()
    }
}

/// Estimates node boxes from the declared placements and measured label text, at the nominal
/// container width.
pub fn estimate_layout(
    decl: &DiagramDecl,
    settings: &DiagramSettings,
    measurer: &dyn TextMeasurer,
) -> DiagramLayout {
    let label_style = TextStyle::new(LABEL_FONT_SIZE).bold();
    let subtitle_style = TextStyle::new(SUBTITLE_FONT_SIZE);
    let width = settings.nominal_width;

    let mut nodes = IndexMap::with_capacity(decl.nodes.len());
    let mut bottom = 0.0f64;
    for node in &decl.nodes {
        let label = measurer.measure(&node.label, &label_style);
        let (sub_w, sub_h) = if node.subtitle.is_empty() {
            (0.0, 0.0)
        } else {
            let m = measurer.measure(&node.subtitle, &subtitle_style);
            (m.width, m.height + SUBTITLE_GAP)
        };
        let w = (label.width.max(sub_w) + 2.0 * NODE_PAD_X).max(NODE_MIN_WIDTH);
        let h = label.height + sub_h + 2.0 * NODE_PAD_Y;
        let x = node.placement.left.resolve(width);
        let y = node.placement.top.resolve(settings.min_height);
        bottom = bottom.max(y + h);
        nodes.insert(node.id.clone(), rect(x, y, w, h));
    }

    DiagramLayout {
        container: size(width, settings.min_height.max(bottom + BOTTOM_PAD)),
        nodes,
    }
}
