use glam::Vec3;
use smallvec::SmallVec;

/// Open chordal Catmull-Rom spline through a handful of control points.
#[derive(Clone, Debug, Default)]
pub struct CatmullRom {
    pub points: SmallVec<[Vec3; 4]>,
}

struct Cubic {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl Cubic {
    fn nonuniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        // chordal parameterization: knot spacing is the segment length
        let mut dt1 = p1.distance(p2);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        let mut dt0 = p0.distance(p1);
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        let mut dt2 = p2.distance(p3);
        if dt2 < 1e-4 {
            dt2 = dt1;
        }
        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;
        Self {
            c0: p1,
            c1: t1,
            c2: -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
            c3: 2.0 * p1 - 2.0 * p2 + t1 + t2,
        }
    }

    #[inline]
    fn at(&self, t: f32) -> Vec3 {
        self.c0 + self.c1 * t + self.c2 * t * t + self.c3 * t * t * t
    }
}

impl CatmullRom {
    pub fn new(points: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Point at parameter `t` in 0..=1 (uniform over control points, not arc length).
    pub fn point_at(&self, t: f32) -> Vec3 {
        let pts = &self.points;
        let n = pts.len();
        match n {
            0 => return Vec3::ZERO,
            1 => return pts[0],
            _ => {}
        }
        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f32;
        if seg >= n - 1 {
            seg = n - 2;
            weight = 1.0;
        }
        let p0 = if seg > 0 {
            pts[seg - 1]
        } else {
            2.0 * pts[0] - pts[1]
        };
        let p1 = pts[seg];
        let p2 = pts[seg + 1];
        let p3 = if seg + 2 < n {
            pts[seg + 2]
        } else {
            2.0 * pts[n - 1] - pts[n - 2]
        };
        Cubic::nonuniform(p0, p1, p2, p3).at(weight)
    }

    /// `divisions + 1` evenly parameterized samples, endpoints included.
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(d as f32 / divisions as f32))
            .collect()
    }
}
