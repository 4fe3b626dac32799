//! Vector paths with cairo-style circular arcs.
//!
//! A [`Path`] records drawing commands in user space. Arcs follow cairo
//! semantics: angles are in radians measured from the positive x axis towards
//! the positive y axis (clockwise on screen), the end angle is advanced by
//! full turns until it is not less than the start angle, and an arc appended
//! while a current point exists is joined to it with a straight line.
//!
//! Paths are converted to `tiny-skia` paths for rasterization; arcs are split
//! into cubic Béziers by lyon.

use std::f32::consts::{FRAC_PI_2, TAU};

use lyon::geom::{Arc as LyonArc, CubicBezierSegment};
use lyon::math::{Angle, point as lyon_point, vector as lyon_vector};

use crate::types::{Point, Rect};

/// Commands that make up a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Move to a point without drawing.
    MoveTo(Point),
    /// Draw a line to a point.
    LineTo(Point),
    /// Draw a cubic bezier curve.
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Draw a circular arc starting at the current point.
    Arc {
        center: Point,
        radius: f32,
        /// Start angle in radians.
        start_angle: f32,
        /// Non-negative sweep in radians.
        sweep: f32,
    },
    /// Close the current subpath.
    Close,
}

/// A 2D path made of lines, curves and circular arcs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a point without drawing.
    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
        self
    }

    /// Draw a line to a point.
    ///
    /// Without a current point this behaves like [`move_to`](Self::move_to).
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        if self.current.is_none() {
            return self.move_to(p);
        }
        self.commands.push(PathCommand::LineTo(p));
        self.current = Some(p);
        self
    }

    /// Draw a cubic bezier curve.
    pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) -> &mut Self {
        if self.current.is_none() {
            self.move_to(control1);
        }
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
        self.current = Some(end);
        self
    }

    /// Add a clockwise circular arc from `angle1` to `angle2` (radians).
    pub fn arc(&mut self, center: Point, radius: f32, angle1: f32, angle2: f32) -> &mut Self {
        let radius = radius.max(0.0);
        let mut angle2 = angle2;
        while angle2 < angle1 {
            angle2 += TAU;
        }
        let sweep = angle2 - angle1;

        let start = point_on_circle(center, radius, angle1);
        if self.current.is_some() {
            self.line_to(start);
        } else {
            self.move_to(start);
        }

        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_angle: angle1,
            sweep,
        });
        self.current = Some(point_on_circle(center, radius, angle2));
        self
    }

    /// Begin a new subpath without a current point.
    ///
    /// The next arc starts with a move instead of a connecting line.
    pub fn new_sub_path(&mut self) -> &mut Self {
        self.current = None;
        self
    }

    /// Close the current subpath.
    pub fn close(&mut self) -> &mut Self {
        if self.current.is_some() {
            self.commands.push(PathCommand::Close);
            self.current = self.subpath_start;
        }
        self
    }

    /// Append every command of `other` to this path.
    pub fn extend(&mut self, other: &Path) -> &mut Self {
        self.commands.extend_from_slice(&other.commands);
        self.current = other.current;
        self.subpath_start = other.subpath_start;
        self
    }

    /// Remove all commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = None;
        self.subpath_start = None;
    }

    /// Get the path commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The current point, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    /// Iterate over the radii of all arcs in the path.
    pub fn arc_radii(&self) -> impl Iterator<Item = f32> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            PathCommand::Arc { radius, .. } => Some(*radius),
            _ => None,
        })
    }

    /// Create a closed rounded-rectangle path.
    ///
    /// Corners are traced as quarter arcs in the order top-right,
    /// bottom-right, bottom-left, top-left. The radius is clamped to
    /// `[0, min(width, height) / 2]`.
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = radius
            .min(rect.width() / 2.0)
            .min(rect.height() / 2.0)
            .max(0.0);
        let (left, top, right, bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());

        let mut path = Self::new();
        path.new_sub_path();
        path.arc(Point::new(right - r, top + r), r, -FRAC_PI_2, 0.0);
        path.arc(Point::new(right - r, bottom - r), r, 0.0, FRAC_PI_2);
        path.arc(Point::new(left + r, bottom - r), r, FRAC_PI_2, 2.0 * FRAC_PI_2);
        path.arc(Point::new(left + r, top + r), r, 2.0 * FRAC_PI_2, 3.0 * FRAC_PI_2);
        path.close();
        path
    }

    /// Compute the exact bounding box of the path geometry.
    ///
    /// Arc bounds include their axis-aligned extreme points; cubic curves
    /// contribute their control points. Returns `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        let mut acc: Option<(Point, Point)> = None;
        let mut add = |p: Point| {
            acc = Some(match acc {
                None => (p, p),
                Some((min, max)) => (
                    Point::new(min.x.min(p.x), min.y.min(p.y)),
                    Point::new(max.x.max(p.x), max.y.max(p.y)),
                ),
            });
        };

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => add(p),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    add(control1);
                    add(control2);
                    add(end);
                }
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep,
                } => {
                    let end_angle = start_angle + sweep;
                    add(point_on_circle(center, radius, start_angle));
                    add(point_on_circle(center, radius, end_angle));
                    let mut k = (start_angle / FRAC_PI_2).ceil();
                    while k * FRAC_PI_2 <= end_angle {
                        add(point_on_circle(center, radius, k * FRAC_PI_2));
                        k += 1.0;
                    }
                }
                PathCommand::Close => {}
            }
        }

        acc.map(|(min, max)| Rect::from_corners(min, max))
    }

    /// Convert to a `tiny-skia` path for rasterization.
    ///
    /// Returns `None` if the path has no drawable geometry.
    pub fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
                PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => builder.cubic_to(
                    control1.x, control1.y, control2.x, control2.y, end.x, end.y,
                ),
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    sweep,
                } => {
                    if radius <= 0.0 || sweep <= 0.0 {
                        continue;
                    }
                    let arc = LyonArc {
                        center: lyon_point(center.x, center.y),
                        radii: lyon_vector(radius, radius),
                        start_angle: Angle::radians(start_angle),
                        sweep_angle: Angle::radians(sweep),
                        x_rotation: Angle::radians(0.0),
                    };
                    arc.for_each_cubic_bezier(&mut |seg: &CubicBezierSegment<f32>| {
                        builder.cubic_to(
                            seg.ctrl1.x,
                            seg.ctrl1.y,
                            seg.ctrl2.x,
                            seg.ctrl2.y,
                            seg.to.x,
                            seg.to.y,
                        );
                    });
                }
                PathCommand::Close => builder.close(),
            }
        }

        builder.finish()
    }
}

#[inline]
fn point_on_circle(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}
