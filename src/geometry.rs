//! Core geometry types for drop positioning
//!
//! All units are CSS pixels with the origin at the top-left corner of the
//! viewport: positive X extends to the right, positive Y extends downward.
//! Rectangles are border boxes as a layout pass or `getBoundingClientRect`
//! would report them.

use serde::Serialize;

/// A 2D point in CSS pixel space.
///
/// # Examples
///
/// ```
/// use dropkit::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0).
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates.
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

/// A 2D size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
  pub width: f32,
  pub height: f32,
}

impl Size {
  /// A size with zero width and height.
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size.
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero or negative.
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

/// An axis-aligned rectangle in CSS pixel space.
///
/// Stored as origin plus size. Edge accessors follow the CSS box model:
/// `top`/`left` are the origin, `right`/`bottom` are origin plus extent.
///
/// # Examples
///
/// ```
/// use dropkit::Rect;
///
/// let rect = Rect::from_xywh(10.0, 500.0, 80.0, 40.0);
/// assert_eq!(rect.top(), 500.0);
/// assert_eq!(rect.bottom(), 540.0);
/// assert_eq!(rect.center_x(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
}

impl Rect {
  /// A rectangle at the origin with zero size.
  pub const ZERO: Self = Self {
    x: 0.0,
    y: 0.0,
    width: 0.0,
    height: 0.0,
  };

  /// Creates a rectangle from origin coordinates and size.
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// Creates a rectangle from an origin point and a size.
  pub const fn from_origin_size(origin: Point, size: Size) -> Self {
    Self {
      x: origin.x,
      y: origin.y,
      width: size.width,
      height: size.height,
    }
  }

  /// The left edge X coordinate.
  pub fn left(self) -> f32 {
    self.x
  }

  /// The top edge Y coordinate.
  pub fn top(self) -> f32 {
    self.y
  }

  /// The right edge X coordinate (`x + width`).
  pub fn right(self) -> f32 {
    self.x + self.width
  }

  /// The bottom edge Y coordinate (`y + height`).
  pub fn bottom(self) -> f32 {
    self.y + self.height
  }

  /// The horizontal center.
  pub fn center_x(self) -> f32 {
    self.x + self.width / 2.0
  }

  /// The vertical center.
  pub fn center_y(self) -> f32 {
    self.y + self.height / 2.0
  }

  /// The rectangle's size.
  pub fn size(self) -> Size {
    Size::new(self.width, self.height)
  }

  /// Returns true if the point lies inside this rectangle (edges inclusive
  /// on the top/left, exclusive on the bottom/right).
  pub fn contains(self, point: Point) -> bool {
    point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
  }
}
