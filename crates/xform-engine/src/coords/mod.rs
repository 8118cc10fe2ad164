//! Logical-pixel geometry for overlays and hit testing.
//!
//! Origin top-left, +X right, +Y down. The window layer has already divided
//! out the DPI scale factor.

mod rect;

use core::ops::{Add, Mul};

pub use rect::Rect;

/// Point or extent in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Drawable area of the window in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False for minimized windows and before the first resize.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Normalized device coordinates of `p`: x in `[-1, 1]` left to right,
    /// y in `[-1, 1]` bottom to top.
    #[inline]
    pub fn to_ndc(self, p: Vec2) -> [f32; 2] {
        [p.x / self.width * 2.0 - 1.0, 1.0 - p.y / self.height * 2.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(200.0, 100.0);
        assert_eq!(vp.to_ndc(Vec2::new(0.0, 0.0)), [-1.0, 1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(200.0, 100.0)), [1.0, -1.0]);
        assert_eq!(vp.to_ndc(Vec2::new(100.0, 50.0)), [0.0, 0.0]);
    }

    #[test]
    fn zero_or_nan_viewports_are_invalid() {
        assert!(Viewport::new(1.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(f32::NAN, 600.0).is_valid());
    }
}
