use super::Vec2;

/// Axis-aligned rectangle, `origin` at its top-left corner.
///
/// A non-positive width or height makes the rectangle empty: it contains no
/// point and overlaps nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Half-open: the left and top edges are inside, the right and bottom
    /// edges are not. NaN points are never inside.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        !self.is_empty() && p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }

    /// True when the two share a non-zero area.
    #[inline]
    pub fn overlaps(self, other: Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let (a, b) = (self.max(), other.max());
        self.origin.x < b.x && other.origin.x < a.x && self.origin.y < b.y && other.origin.y < a.y
    }

    /// Splits into `N` equal-width columns with `gap` between neighbours.
    ///
    /// Columns collapse to zero width when the gaps alone do not fit.
    pub fn columns<const N: usize>(self, gap: f32) -> [Rect; N] {
        let n = N.max(1) as f32;
        let width = ((self.size.x - gap * (n - 1.0)) / n).max(0.0);
        std::array::from_fn(|i| {
            let x = self.origin.x + i as f32 * (width + gap);
            Rect::new(x, self.origin.y, width, self.size.y)
        })
    }

    /// Corners clockwise on screen, starting top-left.
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.origin,
            Vec2::new(max.x, self.origin.y),
            max,
            Vec2::new(self.origin.x, max.y),
        ]
    }
}
