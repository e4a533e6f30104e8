//! Arc-length parameterized motion paths.
//!
//! A [`MotionPath`] wraps an authored [`BezPath`] and precomputes the length of every drawable
//! segment once. Queries by distance or by normalized progress then map to the matching point on
//! the curve, so a target moving with linear progress travels at uniform speed no matter how the
//! underlying segments are parameterized.

use kurbo::{
    BezPath, ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathSeg, Point, Vec2,
};

use crate::foundation::error::{CuepathError, CuepathResult};

/// Default accuracy (in path units) for arc-length computations.
pub const DEFAULT_ARCLEN_ACCURACY: f64 = 1e-4;

/// Position and heading at a point along a path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PathSample {
    /// Point on the path.
    pub point: Point,
    /// Direction of travel in degrees, clockwise from +x in y-down screen space.
    pub angle_deg: f64,
    /// Distance from the path start.
    pub distance: f64,
}

/// A path with a precomputed arc-length table.
#[derive(Clone, Debug)]
pub struct MotionPath {
    segments: Vec<PathSeg>,
    /// `cumulative[i]` is the length of segments `0..=i`.
    cumulative: Vec<f64>,
    accuracy: f64,
}

impl MotionPath {
    /// Build from a kurbo path.
    pub fn new(path: &BezPath, accuracy: f64) -> CuepathResult<Self> {
        if !(accuracy.is_finite() && accuracy > 0.0) {
            return Err(CuepathError::path(format!(
                "arc-length accuracy must be finite and > 0 (got {accuracy})"
            )));
        }
        let segments = path.segments().collect::<Vec<_>>();
        if segments.is_empty() {
            return Err(CuepathError::path("path has no drawable segments"));
        }

        let mut cumulative = Vec::with_capacity(segments.len());
        let mut total = 0.0;
        for seg in &segments {
            total += seg.arclen(accuracy);
            cumulative.push(total);
        }
        if !total.is_finite() {
            return Err(CuepathError::path("path length is not finite"));
        }

        Ok(Self {
            segments,
            cumulative,
            accuracy,
        })
    }

    /// Parse SVG path data (`d` attribute) and build.
    pub fn from_svg(d: &str, accuracy: f64) -> CuepathResult<Self> {
        let path = BezPath::from_svg(d)
            .map_err(|e| CuepathError::path(format!("invalid svg path data: {e}")))?;
        Self::new(&path, accuracy)
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Start point of the path.
    pub fn start(&self) -> Point {
        self.segments[0].start()
    }

    /// End point of the path.
    pub fn end(&self) -> Point {
        self.segments[self.segments.len() - 1].end()
    }

    /// Sample at normalized progress (fraction of arc length, clamped to `[0, 1]`).
    pub fn sample(&self, progress: f64) -> PathSample {
        self.sample_at_distance(progress.clamp(0.0, 1.0) * self.length())
    }

    /// Sample at a distance along the path (clamped to `[0, length]`).
    pub fn sample_at_distance(&self, distance: f64) -> PathSample {
        let total = self.length();
        let distance = distance.clamp(0.0, total);
        let (idx, t) = self.locate(distance);
        let seg = self.segments[idx];
        PathSample {
            point: seg.eval(t),
            angle_deg: self.heading(idx, t).atan2().to_degrees(),
            distance,
        }
    }

    /// Point at a distance along the path.
    pub fn point_at_distance(&self, distance: f64) -> Point {
        self.sample_at_distance(distance).point
    }

    /// Unit tangent at a distance along the path.
    pub fn tangent_at_distance(&self, distance: f64) -> Vec2 {
        let distance = distance.clamp(0.0, self.length());
        let (idx, t) = self.locate(distance);
        self.heading(idx, t).normalize()
    }

    /// Map a distance to `(segment index, curve parameter)`.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let last = self.segments.len() - 1;
        let idx = self
            .cumulative
            .partition_point(|&end| end < distance)
            .min(last);
        let seg_start = if idx == 0 { 0.0 } else { self.cumulative[idx - 1] };
        let seg_len = self.cumulative[idx] - seg_start;
        if seg_len <= 0.0 {
            return (idx, 0.0);
        }
        let local = (distance - seg_start).clamp(0.0, seg_len);
        if local >= seg_len {
            return (idx, 1.0);
        }
        let t = self.segments[idx].inv_arclen(local, self.accuracy);
        (idx, t.clamp(0.0, 1.0))
    }

    /// Direction of travel at `(segment, t)`. Falls back to nearby geometry where the
    /// derivative vanishes (coincident control points, degenerate segments).
    fn heading(&self, idx: usize, t: f64) -> Vec2 {
        const EPS: f64 = 1e-9;

        let seg = self.segments[idx];
        let d = derivative(seg, t);
        if d.hypot2() > EPS {
            return d;
        }
        // Nudge the parameter inward; cusps at the endpoints of cubics are the usual case.
        let nudged = if t > 0.5 { t - 1e-3 } else { t + 1e-3 };
        let d = derivative(seg, nudged);
        if d.hypot2() > EPS {
            return d;
        }
        let chord = seg.end() - seg.start();
        if chord.hypot2() > EPS {
            return chord;
        }
        // Degenerate segment: borrow the direction of a neighbour.
        self.segments
            .iter()
            .skip(idx + 1)
            .chain(self.segments[..idx].iter().rev())
            .map(|s| s.end() - s.start())
            .find(|v| v.hypot2() > EPS)
            .unwrap_or(Vec2::new(1.0, 0.0))
    }
}

fn derivative(seg: PathSeg, t: f64) -> Vec2 {
    match seg {
        PathSeg::Line(l) => l.deriv().eval(t).to_vec2(),
        PathSeg::Quad(q) => q.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(c) => c.deriv().eval(t).to_vec2(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/path.rs"]
mod tests;
