//! Pointer geometry and rotation math
//!
//! Pure functions converting a pointer position inside a bounding box into a
//! pair of rotation angles.
//!
//! # Architecture
//!
//! - **Rect**: client-space bounding box as reported by the host
//! - **Frame**: center + half extents captured at pointer-enter
//! - **Frame::rotation_at**: normalized offset -> `Rotation`
//!
//! A pointer inside the box maps to angles in `[-1, 1]` radians; the vertical
//! axis is inverted so the element leans toward the pointer.

use crate::error::BoopError;
use crate::result::Result;

/// A point in client (viewport) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Bounding box in client coordinates (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Rotation angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    /// Rotation about the horizontal axis (driven by vertical offset)
    pub rot_x: f64,
    /// Rotation about the vertical axis (driven by horizontal offset)
    pub rot_y: f64,
}

impl Rotation {
    /// At-rest rotation.
    pub const ZERO: Self = Self {
        rot_x: 0.0,
        rot_y: 0.0,
    };

    #[must_use]
    pub const fn new(rot_x: f64, rot_y: f64) -> Self {
        Self { rot_x, rot_y }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

/// Normalization frame for one pointer session
///
/// # Examples
///
/// ```
/// use boop_core::geometry::{Frame, Point, Rect, Rotation};
///
/// let frame = Frame::from_rect(Rect::new(100.0, 100.0, 200.0, 100.0))?;
/// assert_eq!(frame.rotation_at(Point::new(200.0, 150.0)), Rotation::ZERO);
/// // Top-right corner: offset (100, -50) over half extents (100, 50)
/// assert_eq!(frame.rotation_at(Point::new(300.0, 100.0)), Rotation::new(1.0, 1.0));
/// # Ok::<(), boop_core::BoopError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    origin: Point,
    half_width: f64,
    half_height: f64,
}

impl Frame {
    /// Capture the center and half extents of a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`BoopError::DegenerateGeometry`] if width or height is not a
    /// positive finite number, or the position is not finite.
    pub fn from_rect(rect: Rect) -> Result<Self> {
        let degenerate = || BoopError::DegenerateGeometry {
            width: rect.width,
            height: rect.height,
        };

        if !rect.width.is_finite() || rect.width <= 0.0 {
            return Err(degenerate());
        }
        if !rect.height.is_finite() || rect.height <= 0.0 {
            return Err(degenerate());
        }
        if !rect.x.is_finite() || !rect.y.is_finite() {
            return Err(degenerate());
        }

        Ok(Self {
            origin: rect.center(),
            half_width: rect.width / 2.0,
            half_height: rect.height / 2.0,
        })
    }

    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Half width and half height, both strictly positive.
    #[must_use]
    pub const fn half_extents(&self) -> (f64, f64) {
        (self.half_width, self.half_height)
    }

    /// Pointer offset from the origin divided by the half extents.
    #[must_use]
    pub fn normalize(&self, pointer: Point) -> (f64, f64) {
        let dx = pointer.x - self.origin.x;
        let dy = pointer.y - self.origin.y;
        (dx / self.half_width, dy / self.half_height)
    }

    /// Rotation for a pointer position: `rot_x = -ny`, `rot_y = nx`.
    #[must_use]
    pub fn rotation_at(&self, pointer: Point) -> Rotation {
        let (nx, ny) = self.normalize(pointer);
        // `0.0 - ny` keeps the center at +0.0 rather than -0.0
        Rotation::new(0.0 - ny, nx)
    }
}
