//! Stateless geometry kernel.
//!
//! Distance and angle helpers, point-on-primitive proximity tests used by
//! hit-testing, grid snapping, and the arc-center constructions used while
//! dragging arc handles.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use lyon::geom::{point as lpoint, CubicBezierSegment};

use super::{BoundingBox, Point, Segment};
use crate::constants::BEZIER_SEARCH_ITERATIONS;
use crate::error::{GeometryError, GeometryResult};

/// Relative slack accepted on `r^2 - (c/2)^2` before declaring no center.
const CENTER_SLACK: f64 = 1e-9;

pub fn distance(a: Point, b: Point) -> f64 {
    a.distance_to(&b)
}

/// Signed angle of the vector `a -> b`, in (-PI, PI].
///
/// Axis-aligned vectors return exact multiples of PI/2. Coincident points
/// return 0.
pub fn angle(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dx == 0.0 {
        return if dy > 0.0 {
            FRAC_PI_2
        } else if dy < 0.0 {
            -FRAC_PI_2
        } else {
            0.0
        };
    }
    if dy == 0.0 {
        return if dx > 0.0 { 0.0 } else { PI };
    }
    dy.atan2(dx)
}

pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Segment through the midpoint of `a-b`, perpendicular to it and as long
/// as the chord itself.
pub fn perpendicular_bisector_segment(a: Point, b: Point) -> Segment {
    let mid = midpoint(a, b);
    let half = (b - a).perpendicular() * 0.5;
    Segment::new(mid - half, mid + half)
}

/// True when `p` lies inside the axis-aligned square of half-size
/// `tolerance` centered on `target`.
pub fn point_near_point(p: Point, target: Point, tolerance: f64) -> bool {
    (p.x - target.x).abs() < tolerance && (p.y - target.y).abs() < tolerance
}

/// True when `p` is within `tolerance` of the infinite line through `a-b`
/// and its projection falls between `a` and `b`.
///
/// A zero-length segment degrades to a distance test against `a`.
pub fn point_near_segment(p: Point, a: Point, b: Point, tolerance: f64) -> bool {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq == 0.0 {
        return distance(p, a) <= tolerance;
    }

    let ap = p - a;
    let perpendicular = (ab.x * ap.y - ab.y * ap.x).abs() / len_sq.sqrt();
    if perpendicular > tolerance {
        return false;
    }

    let along = ap.dot(&ab);
    (0.0..=len_sq).contains(&along)
}

/// Maps an angle to [0, 2*PI).
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// True when `theta` lies on the counter-clockwise sweep from `start` to
/// `end`. Handles sweeps that wrap through zero.
pub fn angle_in_sweep(theta: f64, start: f64, end: f64) -> bool {
    let theta = normalize_angle(theta);
    let start = normalize_angle(start);
    let end = normalize_angle(end);
    if start <= end {
        start <= theta && theta <= end
    } else {
        theta >= start || theta <= end
    }
}

/// True when `p` lies within `tolerance` of the circle of `radius` around
/// `center`, on the counter-clockwise sweep from `start_angle` to `end_angle`.
pub fn point_near_arc(
    p: Point,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    tolerance: f64,
) -> bool {
    let d = distance(p, center);
    if d < radius - tolerance || d > radius + tolerance {
        return false;
    }
    angle_in_sweep((p.y - center.y).atan2(p.x - center.x), start_angle, end_angle)
}

fn to_lyon(p0: Point, p1: Point, p2: Point, p3: Point) -> CubicBezierSegment<f64> {
    CubicBezierSegment {
        from: lpoint(p0.x, p0.y),
        ctrl1: lpoint(p1.x, p1.y),
        ctrl2: lpoint(p2.x, p2.y),
        to: lpoint(p3.x, p3.y),
    }
}

/// Evaluates the cubic Bezier `p0..p3` at parameter `t`.
pub fn cubic_bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let sample = to_lyon(p0, p1, p2, p3).sample(t);
    Point::new(sample.x, sample.y)
}

/// Tight axis-aligned bounds of the cubic Bezier `p0..p3`.
pub fn cubic_bezier_bounds(p0: Point, p1: Point, p2: Point, p3: Point) -> BoundingBox {
    let bb = to_lyon(p0, p1, p2, p3).bounding_box();
    BoundingBox::from_corners(Point::new(bb.min.x, bb.min.y), Point::new(bb.max.x, bb.max.y))
}

/// Proximity test against a cubic Bezier.
///
/// Bisects the parameter range, steering by the sign of the cursor offset
/// projected on the chord `p0 -> p3`. Stops as soon as a sample lands within
/// `tolerance`, otherwise after a fixed number of halvings.
pub fn point_near_bezier(
    p: Point,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    tolerance: f64,
) -> bool {
    let curve = to_lyon(p0, p1, p2, p3);
    let chord = p3 - p0;
    let (mut t_min, mut t_max) = (0.0_f64, 1.0_f64);
    let mut min_dist = f64::INFINITY;

    for _ in 0..BEZIER_SEARCH_ITERATIONS {
        let t = (t_min + t_max) / 2.0;
        let s = curve.sample(t);
        let bt = Point::new(s.x, s.y);
        let dist = distance(bt, p);
        min_dist = min_dist.min(dist);
        if dist < tolerance {
            return true;
        }

        if (bt - p).dot(&chord) > 0.0 {
            t_max = t;
        } else {
            t_min = t;
        }
    }
    min_dist <= tolerance
}

/// True when `p` satisfies the implicit ellipse equation within
/// `1 +/- tolerance`. Non-positive radii never match.
pub fn point_near_ellipse(p: Point, center: Point, radii: Point, tolerance: f64) -> bool {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return false;
    }
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    let value = dx * dx / (radii.x * radii.x) + dy * dy / (radii.y * radii.y);
    value > 1.0 - tolerance && value < 1.0 + tolerance
}

/// Rounds each coordinate to the nearest multiple of `spacing`.
///
/// A non-positive spacing disables snapping.
pub fn snap_to_grid(p: Point, spacing: f64) -> Point {
    if spacing <= 0.0 {
        return p;
    }
    Point::new(
        (p.x / spacing).round() * spacing,
        (p.y / spacing).round() * spacing,
    )
}

/// Unit vector perpendicular to `a -> b`, rotated counter-clockwise.
fn unit_normal(a: Point, b: Point) -> GeometryResult<Point> {
    let dir = b - a;
    let len = dir.length();
    if len == 0.0 || !len.is_finite() {
        return Err(GeometryError::DegenerateSegment);
    }
    Ok(dir.perpendicular() * (1.0 / len))
}

/// The two centers of circles of `radius` passing through `a` and `b`.
///
/// The first candidate lies to the left of `a -> b`.
pub fn arc_center_candidates(a: Point, b: Point, radius: f64) -> GeometryResult<[Point; 2]> {
    let normal = unit_normal(a, b)?;
    let half_chord = distance(a, b) / 2.0;
    let mut h_sq = radius * radius - half_chord * half_chord;
    if h_sq < 0.0 {
        if h_sq < -CENTER_SLACK * radius * radius || radius.is_nan() {
            return Err(GeometryError::NoArcCenter { radius, half_chord });
        }
        h_sq = 0.0;
    }
    let h = h_sq.sqrt();
    let mid = midpoint(a, b);
    Ok([mid + normal * h, mid - normal * h])
}

/// Picks the candidate closest to `reference`. Ties go to the first.
pub fn choose_center_nearest(reference: Point, candidates: [Point; 2]) -> Point {
    let [first, second] = candidates;
    if distance(reference, second) < distance(reference, first) {
        second
    } else {
        first
    }
}

/// Center of the circle of `radius` through `a` and `b` nearest to
/// `reference`, for continuity while dragging.
pub fn find_arc_center(reference: Point, a: Point, b: Point, radius: f64) -> GeometryResult<Point> {
    arc_center_candidates(a, b, radius).map(|c| choose_center_nearest(reference, c))
}

/// Moves `center` by the component of `delta` along the perpendicular
/// bisector of `a-b`. A center equidistant from `a` and `b` stays so.
pub fn move_center_along_bisector(
    a: Point,
    b: Point,
    center: Point,
    delta: Point,
) -> GeometryResult<Point> {
    let normal = unit_normal(a, b)?;
    Ok(center + normal * delta.dot(&normal))
}

/// Orthogonal projection of `p` onto the perpendicular bisector of `a-b`.
pub fn project_onto_bisector(a: Point, b: Point, p: Point) -> GeometryResult<Point> {
    let normal = unit_normal(a, b)?;
    let mid = midpoint(a, b);
    Ok(mid + normal * (p - mid).dot(&normal))
}

/// Axis-aligned bounds of the counter-clockwise arc from `start_angle` to
/// `end_angle`, including any axis extrema the sweep passes through.
pub fn arc_bounds(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> BoundingBox {
    let at = |a: f64| center + Point::new(a.cos(), a.sin()) * radius;
    let mut bb = BoundingBox::from_corners(at(start_angle), at(end_angle));
    for extremum in [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2] {
        if angle_in_sweep(extremum, start_angle, end_angle) {
            bb = bb.including(at(extremum));
        }
    }
    bb
}
