//! 2D geometry aliases (CSS pixel space, y grows downwards).

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Rect from its top-left corner and size.
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(point(x, y), size(width, height))
}
