pub use truck_geometry::base::{Point2, Point3, Vector2, Vector3};

pub mod profiles {
    use rainhouse_base::{Result, ensure_positive};
    use serde::{Deserialize, Serialize};
    use truck_geometry::base::Point2;

    /// Axis-aligned rectangle in wall-local coordinates (x right, y up).
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct Rect2 {
        pub min: Point2,
        pub max: Point2,
    }

    impl Rect2 {
        pub fn new(min: Point2, max: Point2) -> Self {
            Self { min, max }
        }

        pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
            let mut iter = points.into_iter();
            let first = *iter.next()?;
            let mut min = first;
            let mut max = first;
            for p in iter {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
            Some(Self { min, max })
        }

        pub fn width(&self) -> f64 {
            self.max.x - self.min.x
        }

        pub fn height(&self) -> f64 {
            self.max.y - self.min.y
        }

        pub fn area(&self) -> f64 {
            self.width() * self.height()
        }

        pub fn contains_point(&self, point: Point2) -> bool {
            point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
        }

        /// True when `inner` lies inside `self` with at least `gap` clearance on every side.
        pub fn encloses(&self, inner: &Rect2, gap: f64) -> bool {
            inner.min.x - self.min.x > gap
                && self.max.x - inner.max.x > gap
                && inner.min.y - self.min.y > gap
                && self.max.y - inner.max.y > gap
        }

        /// Overlap test that also reports rectangles closer than `gap` (touching edges).
        pub fn overlaps(&self, other: &Rect2, gap: f64) -> bool {
            let overlap_x = self.min.x < other.max.x + gap && other.min.x < self.max.x + gap;
            let overlap_y = self.min.y < other.max.y + gap && other.min.y < self.max.y + gap;
            overlap_x && overlap_y
        }

        /// Closed ring (last point repeats the first), counter-clockwise.
        pub fn ring_ccw(&self) -> [Point2; 5] {
            [
                Point2::new(self.min.x, self.min.y),
                Point2::new(self.max.x, self.min.y),
                Point2::new(self.max.x, self.max.y),
                Point2::new(self.min.x, self.max.y),
                Point2::new(self.min.x, self.min.y),
            ]
        }

        /// Closed ring, clockwise.
        pub fn ring_cw(&self) -> [Point2; 5] {
            [
                Point2::new(self.min.x, self.min.y),
                Point2::new(self.min.x, self.max.y),
                Point2::new(self.max.x, self.max.y),
                Point2::new(self.max.x, self.min.y),
                Point2::new(self.min.x, self.min.y),
            ]
        }
    }

    /// Outer boundary of a wall: a ground-up rectangle spanning
    /// `[-width/2, width/2] x [0, height]`.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct WallOutline {
        pub width: f64,
        pub height: f64,
    }

    impl WallOutline {
        pub fn new(width: f64, height: f64) -> Result<Self> {
            ensure_positive("wall width", width)?;
            ensure_positive("wall height", height)?;
            Ok(Self { width, height })
        }

        pub fn bounds(&self) -> Rect2 {
            let half_width = self.width * 0.5;
            Rect2::new(
                Point2::new(-half_width, 0.0),
                Point2::new(half_width, self.height),
            )
        }

        pub fn points(&self) -> [Point2; 5] {
            self.bounds().ring_ccw()
        }
    }

    /// Rectangular window opening centered at `(x, y)` in wall-local coordinates.
    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct WindowHole {
        pub x: f64,
        pub y: f64,
        #[serde(alias = "w")]
        pub width: f64,
        #[serde(alias = "h")]
        pub height: f64,
    }

    impl WindowHole {
        pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        pub fn is_finite(&self) -> bool {
            self.x.is_finite()
                && self.y.is_finite()
                && self.width.is_finite()
                && self.height.is_finite()
        }

        /// Same hole with center and size multiplied by `factor`.
        pub fn scaled(&self, factor: f64) -> Self {
            Self::new(
                self.x * factor,
                self.y * factor,
                self.width * factor,
                self.height * factor,
            )
        }

        pub fn rect(&self) -> Rect2 {
            let half_width = self.width * 0.5;
            let half_height = self.height * 0.5;
            Rect2::new(
                Point2::new(self.x - half_width, self.y - half_height),
                Point2::new(self.x + half_width, self.y + half_height),
            )
        }

        /// Hole boundary, wound opposite to the outline.
        pub fn points(&self) -> [Point2; 5] {
            self.rect().ring_cw()
        }
    }

    /// Signed area of a closed ring; positive when counter-clockwise.
    pub fn signed_area(ring: &[Point2]) -> f64 {
        if ring.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for idx in 0..ring.len() {
            let a = ring[idx];
            let b = ring[(idx + 1) % ring.len()];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

}
