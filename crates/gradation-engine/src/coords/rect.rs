use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
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

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut w) = (self.origin.x, self.size.x);
        let (mut y, mut h) = (self.origin.y, self.size.y);
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.left() && p.y >= r.top() && p.x < r.right() && p.y < r.bottom()
    }

    /// Projects `x` onto the horizontal extent as a fraction in [0, 1].
    ///
    /// Left of the rect clamps to 0, right of it to 1. Total over all inputs:
    /// a degenerate width or a NaN coordinate yields 0.
    pub fn horizontal_fraction(self, x: f32) -> f32 {
        let r = self.normalized();
        if r.size.x <= 0.0 || !r.size.x.is_finite() {
            return 0.0;
        }
        let t = (x - r.left()) / r.size.x;
        if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
    }

    /// Distance by which `y` lies above the top or below the bottom edge.
    ///
    /// Zero when `y` is within the vertical extent (edges inclusive) or NaN.
    pub fn vertical_overshoot(self, y: f32) -> f32 {
        let r = self.normalized();
        if y < r.top() {
            r.top() - y
        } else if y > r.bottom() {
            y - r.bottom()
        } else {
            0.0
        }
    }

    /// Strip of height `h` sitting directly under this rect, same horizontal extent.
    #[inline]
    pub fn strip_below(self, h: f32) -> Rect {
        let r = self.normalized();
        Rect::new(r.left(), r.bottom(), r.size.x, h)
    }
}
