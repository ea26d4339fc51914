//! Edge routing and popup placement in container-relative CSS pixels.
//!
//! These routines are shared by the first-paint layout, the runtime model and (as a line-for-line
//! port) the embedded client script.

use apidoc_core::DiagramSettings;
use apidoc_core::geom::{Point, Rect, Size, point, vector};

/// A node's rectangle as center plus half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
}

impl NodeBox {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.center(), rect.width(), rect.height())
    }

    /// Node box relative to the container, from two viewport-space client rects.
    pub fn from_client_rects(node: Rect, container: Rect) -> Self {
        Self::from_rect(node.translate(-container.origin.to_vector()))
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            point(
                self.center.x - self.half_width,
                self.center.y - self.half_height,
            ),
            Size::new(self.half_width * 2.0, self.half_height * 2.0),
        )
    }

    /// Where the segment from the center toward `target` leaves this box.
    ///
    /// Exits through a vertical side when `|dx|·hh >= |dy|·hw`, otherwise through a horizontal
    /// side. A target at the center returns the center.
    pub fn boundary_point(&self, target: Point) -> Point {
        let dx = target.x - self.center.x;
        let dy = target.y - self.center.y;
        if dx == 0.0 && dy == 0.0 {
            return self.center;
        }
        let (hw, hh) = (self.half_width, self.half_height);

        let (sx, sy) = if dx.abs() * hh >= dy.abs() * hw {
            let w = if dx < 0.0 { -hw } else { hw };
            (w, w * dy / dx)
        } else {
            let h = if dy < 0.0 { -hh } else { hh };
            (h * dx / dy, h)
        };
        point(self.center.x + sx, self.center.y + sy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGeometry {
    pub start: Point,
    pub end: Point,
    /// Present when the edge has a label.
    pub label: Option<(Point, String)>,
}

/// Straight segment between the two boundary points plus an optional label anchor.
pub fn route_edge(
    from: &NodeBox,
    to: &NodeBox,
    label: Option<&str>,
    label_offset: f64,
) -> EdgeGeometry {
    let start = from.boundary_point(to.center);
    let end = to.boundary_point(from.center);
    EdgeGeometry {
        start,
        end,
        label: label
            .filter(|l| !l.is_empty())
            .map(|l| (label_anchor(start, end, label_offset), l.to_string())),
    }
}

/// Segment midpoint pushed `offset` px along the normal that points up (or right, for a
/// horizontal normal).
pub fn label_anchor(start: Point, end: Point, offset: f64) -> Point {
    let mid = start.lerp(end, 0.5);
    let d = end - start;
    let len = d.length();
    if len == 0.0 {
        return mid - vector(0.0, offset);
    }
    let mut n = vector(-d.y / len, d.x / len);
    if n.y > 0.0 || (n.y == 0.0 && n.x < 0.0) {
        n = -n;
    }
    mid + n * offset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupSide {
    Right,
    Left,
}

impl PopupSide {
    pub fn as_str(self) -> &'static str {
        match self {
            PopupSide::Right => "right",
            PopupSide::Left => "left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    /// Top-left corner relative to the container.
    pub origin: Point,
    pub side: PopupSide,
}

/// Anchors the popup right of the node, falls back to the left on overflow, then clamps the
/// whole box inside the container.
pub fn place_popup(
    node: Rect,
    popup: Size,
    container: Size,
    settings: &DiagramSettings,
) -> PopupPlacement {
    let gutter = settings.gutter;
    let right_x = node.max_x() + gutter;
    let (x, side) = if right_x + popup.width <= container.width {
        (right_x, PopupSide::Right)
    } else {
        (node.min_x() - gutter - popup.width, PopupSide::Left)
    };
    let max_x = (container.width - popup.width).max(0.0);
    let max_y = (container.height - popup.height).max(0.0);
    PopupPlacement {
        origin: point(x.clamp(0.0, max_x), node.min_y().clamp(0.0, max_y)),
        side,
    }
}
