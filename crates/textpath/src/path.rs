// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path measuring.
//!
//! A [`PathSampler`] flattens a path into polylines once and then answers
//! "where am I, and where am I heading, `d` units along the path?" queries
//! with a binary search over the cumulative arc length.

use kurbo::{BezPath, PathEl, Point, Shape, Vec2};
use tiny_skia_path::PathSegment;

use crate::Error;

/// The default flattening tolerance.
///
/// A tenth of a unit keeps the polyline within a sub-pixel distance from the
/// real curve at 1:1 scale.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

// Tolerance lower bound, relative to the path size.
const MIN_RELATIVE_TOLERANCE: f64 = 1e-6;

/// A point on a path together with the direction of travel at that point.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Sample {
    /// Position on the path.
    pub position: Point,
    /// Unit tangent vector.
    pub tangent: Vec2,
}

#[derive(Clone, Copy, Debug)]
struct Vertex {
    point: Point,
    // Arc length from the path start up to `point`.
    distance: f64,
}

/// An arc-length parameterized path.
///
/// Built once per path; all queries are read-only.
#[derive(Clone, Debug)]
pub struct PathSampler {
    vertices: Vec<Vertex>,
    length: f64,
}

impl PathSampler {
    /// Measures `path` with the [`DEFAULT_TOLERANCE`].
    ///
    /// Returns [`Error::InvalidGeometry`] when `path` has non-finite
    /// coordinates, coordinates outside of the `f32` range or a length
    /// that overflows.
    pub fn new(path: &BezPath) -> Result<Self, Error> {
        Self::with_tolerance(path, DEFAULT_TOLERANCE)
    }

    /// Measures `path` with a custom flattening tolerance.
    ///
    /// Tolerance is the maximum distance between the flattened polyline and
    /// the real curve. When the path is going to be drawn scaled, divide the
    /// tolerance by the scale factor. Invalid tolerances fall back to
    /// [`DEFAULT_TOLERANCE`].
    pub fn with_tolerance(path: &BezPath, tolerance: f64) -> Result<Self, Error> {
        if !is_valid_path(path) {
            log::warn!("Path with non-finite or out of range coordinates cannot be measured.");
            return Err(Error::InvalidGeometry);
        }

        let tolerance = if tolerance.is_finite() && tolerance > 0.0 {
            tolerance
        } else {
            DEFAULT_TOLERANCE
        };

        // Keeps the number of flattened segments bounded for huge paths.
        let bbox = path.bounding_box();
        let extent = bbox.width().max(bbox.height());
        let tolerance = if extent.is_finite() {
            tolerance.max(extent * MIN_RELATIVE_TOLERANCE)
        } else {
            tolerance
        };

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut length = 0.0;
        let mut subpath_start = None;
        kurbo::flatten(path, tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                // Contours are joined without adding any length,
                // so the whole path is addressable by a single distance.
                subpath_start = Some(p);
                vertices.push(Vertex {
                    point: p,
                    distance: length,
                });
            }
            PathEl::LineTo(p) => {
                if let Some(prev) = vertices.last().map(|v| v.point) {
                    length += (p - prev).hypot();
                }
                vertices.push(Vertex {
                    point: p,
                    distance: length,
                });
            }
            PathEl::ClosePath => {
                let prev = vertices.last().map(|v| v.point);
                if let (Some(start), Some(prev)) = (subpath_start, prev) {
                    length += (start - prev).hypot();
                    vertices.push(Vertex {
                        point: start,
                        distance: length,
                    });
                }
            }
            // `flatten` emits lines only.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });

        if !length.is_finite() {
            log::warn!("Path is too long to be measured.");
            return Err(Error::InvalidGeometry);
        }

        Ok(PathSampler { vertices, length })
    }

    /// Returns the total arc length of the path.
    ///
    /// Zero for empty and degenerate paths.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.length
    }

    /// Returns the point `distance` units along the path.
    ///
    /// `distance` is clamped to `0..=total_length()`.
    pub fn position_at(&self, distance: f64) -> Point {
        self.sample_at(distance).position
    }

    /// Returns the direction of travel `distance` units along the path.
    ///
    /// Always a unit vector. Degenerate places use the direction of the
    /// nearest non-degenerate piece, or `(1, 0)` when there is none.
    pub fn tangent_at(&self, distance: f64) -> Vec2 {
        self.sample_at(distance).tangent
    }

    /// Returns both the position and the tangent at `distance`.
    pub fn sample_at(&self, distance: f64) -> Sample {
        let origin = match self.vertices.first() {
            Some(v) => v.point,
            None => Point::ZERO,
        };

        let Some(idx) = self.piece_at(distance) else {
            return Sample {
                position: origin,
                tangent: Vec2::new(1.0, 0.0),
            };
        };

        let start = self.vertices[idx - 1];
        let end = self.vertices[idx];
        let piece_len = end.distance - start.distance;
        let t = ((distance - start.distance) / piece_len).clamp(0.0, 1.0);

        let chord = end.point - start.point;
        Sample {
            position: start.point.lerp(end.point, t),
            tangent: chord / chord.hypot(),
        }
    }

    /// Returns the index of the end vertex of a non-degenerate piece
    /// containing `distance`.
    fn piece_at(&self, distance: f64) -> Option<usize> {
        if self.length <= 0.0 {
            return None;
        }

        let distance = if distance.is_nan() {
            0.0
        } else {
            distance.clamp(0.0, self.length)
        };

        // The first vertex lying strictly past `distance`.
        // Degenerate pieces share the same distance on both ends and are
        // skipped by the search.
        let idx = self.vertices.partition_point(|v| v.distance <= distance);
        if idx > 0 && idx < self.vertices.len() {
            return Some(idx);
        }

        // `distance` is exactly at the end. Use the last piece that has a length.
        (1..self.vertices.len())
            .rev()
            .find(|&i| self.vertices[i].distance > self.vertices[i - 1].distance)
    }
}

// Glyph transforms are `f32`, so coordinates must fit its range.
fn is_valid_point(p: Point) -> bool {
    const MAX: f64 = f32::MAX as f64;
    p.is_finite() && p.x.abs() <= MAX && p.y.abs() <= MAX
}

fn is_valid_path(path: &BezPath) -> bool {
    path.elements().iter().all(|el| match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => is_valid_point(p),
        PathEl::QuadTo(p1, p2) => is_valid_point(p1) && is_valid_point(p2),
        PathEl::CurveTo(p1, p2, p3) => {
            is_valid_point(p1) && is_valid_point(p2) && is_valid_point(p3)
        }
        PathEl::ClosePath => true,
    })
}

/// Parses SVG path data into a path.
///
/// Relative, shorthand and arc commands are resolved into absolute
/// lines and curves.
pub fn parse(text: &str) -> Result<BezPath, Error> {
    let mut path = BezPath::new();
    for segment in svgtypes::SimplifyingPathParser::from(text) {
        match segment? {
            svgtypes::SimplePathSegment::MoveTo { x, y } => {
                path.move_to((x, y));
            }
            svgtypes::SimplePathSegment::LineTo { x, y } => {
                path.line_to((x, y));
            }
            svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                path.quad_to((x1, y1), (x, y));
            }
            svgtypes::SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                path.curve_to((x1, y1), (x2, y2), (x, y));
            }
            svgtypes::SimplePathSegment::ClosePath => {
                path.close_path();
            }
        }
    }

    Ok(path)
}

/// Appends a circular arc to `path`.
///
/// Angles are in degrees, measured clockwise from the positive x axis
/// (y-down coordinates). When `path` already has a current point, it is
/// connected to the arc start with a line. Otherwise the arc starts a new
/// contour.
pub fn append_arc(
    path: &mut BezPath,
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
) {
    let arc = kurbo::Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle: start_angle.to_radians(),
        sweep_angle: sweep_angle.to_radians(),
        x_rotation: 0.0,
    };

    let start = center + Vec2::from_angle(arc.start_angle) * radius;
    if path.elements().is_empty() {
        path.move_to(start);
    } else {
        path.line_to(start);
    }

    path.extend(arc.append_iter(DEFAULT_TOLERANCE));
}

/// Converts a `tiny-skia` path into a `kurbo` one.
pub fn from_tiny_skia(path: &tiny_skia_path::Path) -> BezPath {
    let mut bez_path = BezPath::new();

    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                bez_path.move_to((p.x as f64, p.y as f64));
            }
            PathSegment::LineTo(p) => {
                bez_path.line_to((p.x as f64, p.y as f64));
            }
            PathSegment::QuadTo(p1, p2) => {
                bez_path.quad_to((p1.x as f64, p1.y as f64), (p2.x as f64, p2.y as f64));
            }
            PathSegment::CubicTo(p1, p2, p3) => {
                bez_path.curve_to(
                    (p1.x as f64, p1.y as f64),
                    (p2.x as f64, p2.y as f64),
                    (p3.x as f64, p3.y as f64),
                );
            }
            PathSegment::Close => {
                bez_path.close_path();
            }
        }
    }

    bez_path
}

/// Converts a `kurbo` path into a `tiny-skia` one.
///
/// Returns `None` for empty paths and paths with non-finite coordinates.
pub fn to_tiny_skia(path: &BezPath) -> Option<tiny_skia_path::Path> {
    let mut builder = tiny_skia_path::PathBuilder::new();

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }

    builder.finish()
}
