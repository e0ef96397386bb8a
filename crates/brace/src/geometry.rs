//! Placement and control points of a curly brace.
//!
//! A brace is built from a fixed template of seven points laid out in a unit
//! box. The "spine" side sits at `x = 0` and the "tip" side at `x = width`:
//!
//! ```text
//!  p5 (0, 1)         p6 (w, 1)
//!
//!                    p4 (w, 1 - c)
//!  p3 (0, 0.5)
//!                    p2 (w, c)
//!
//!  p1 (0, 0)         p0 (w, 0)
//! ```
//!
//! The path begins at `p0`. `p1, p2, p3` are the first ctrl point, second ctrl
//! point and end point of the lower cubic segment, `p4, p5, p6` those of the
//! upper one.
//!
//! The template is then mirrored horizontally if the brace points to the
//! right, scaled vertically by `height` and translated by `(x, y)`.

use crate::algorithms::aabb::bounding_box;
use crate::math::{point, Box2D, Point};
use crate::path::traits::PathBuilder;
use crate::path::{Attributes, Path, PathEvent, NO_ATTRIBUTES};
use crate::BraceError;

use std::fmt;
use std::str::FromStr;

/// The side of its bounding box the apex of the brace is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Pointing {
    Left,
    Right,
}

impl Pointing {
    pub fn as_str(self) -> &'static str {
        match self {
            Pointing::Left => "left",
            Pointing::Right => "right",
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Pointing::Left => Pointing::Right,
            Pointing::Right => Pointing::Left,
        }
    }
}

impl Default for Pointing {
    fn default() -> Self {
        Pointing::Left
    }
}

impl fmt::Display for Pointing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pointing {
    type Err = BraceError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.trim();
        if src.eq_ignore_ascii_case("left") {
            Ok(Pointing::Left)
        } else if src.eq_ignore_ascii_case("right") {
            Ok(Pointing::Right)
        } else {
            Err(BraceError::InvalidPointing(src.to_string()))
        }
    }
}

/// Parameters describing where and how a brace is laid out.
///
/// None of the values are validated. Negative extents mirror the shape and a
/// curliness outside of `[0, 0.5]` makes the curves overshoot.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BraceParams {
    /// Position of the left edge of the bounding box.
    ///
    /// Default value: `0.0`.
    pub x: f32,

    /// Position of the bottom edge of the bounding box.
    ///
    /// Default value: `0.0`.
    pub y: f32,

    /// Horizontal span, from the spine to the tips.
    ///
    /// Default value: `BraceParams::DEFAULT_WIDTH`.
    pub width: f32,

    /// Vertical span.
    ///
    /// Default value: `BraceParams::DEFAULT_HEIGHT`.
    pub height: f32,

    /// How far along the height the ctrl points of the two curves are pulled
    /// toward the tips, in unit-height coordinates.
    ///
    /// Default value: `BraceParams::DEFAULT_CURLINESS`.
    pub curliness: f32,

    /// Default value: `Pointing::Left`.
    pub pointing: Pointing,
}

impl BraceParams {
    pub const DEFAULT_WIDTH: f32 = 0.125;
    pub const DEFAULT_HEIGHT: f32 = 1.0;
    /// `1/e`, which tends to look nice.
    pub const DEFAULT_CURLINESS: f32 = 1.0 / std::f32::consts::E;

    pub const DEFAULT: Self = BraceParams {
        x: 0.0,
        y: 0.0,
        width: Self::DEFAULT_WIDTH,
        height: Self::DEFAULT_HEIGHT,
        curliness: Self::DEFAULT_CURLINESS,
        pointing: Pointing::Left,
    };

    /// Default parameters with the bottom-left corner at `(x, y)`.
    #[inline]
    pub const fn at(x: f32, y: f32) -> Self {
        Self::DEFAULT.with_position(x, y)
    }

    #[inline]
    pub const fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    #[inline]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[inline]
    pub const fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    #[inline]
    pub const fn with_size(self, width: f32, height: f32) -> Self {
        self.with_width(width).with_height(height)
    }

    #[inline]
    pub const fn with_curliness(mut self, curliness: f32) -> Self {
        self.curliness = curliness;
        self
    }

    #[inline]
    pub const fn with_pointing(mut self, pointing: Pointing) -> Self {
        self.pointing = pointing;
        self
    }
}

impl Default for BraceParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The segment kind associated to each point of a brace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    /// Starts the sub-path.
    Begin,
    /// Part of a cubic bézier segment. Consumed in groups of three
    /// (ctrl1, ctrl2, to).
    Cubic,
}

/// The verb sequence shared by all braces.
pub const BRACE_VERBS: [Verb; 7] = [
    Verb::Begin,
    Verb::Cubic,
    Verb::Cubic,
    Verb::Cubic,
    Verb::Cubic,
    Verb::Cubic,
    Verb::Cubic,
];

/// The seven points of a placed brace.
///
/// Only obtainable through `BraceGeometry::new`, so the point count and the
/// verb sequence always match.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BraceGeometry {
    points: [Point; 7],
}

/// Iterator over the events of a brace sub-path.
pub type Events = std::array::IntoIter<PathEvent, 4>;

impl BraceGeometry {
    pub const NUM_POINTS: usize = 7;

    pub fn new(params: &BraceParams) -> Self {
        let BraceParams {
            x,
            y,
            width,
            height,
            curliness,
            pointing,
        } = *params;

        let mut points = [
            point(width, 0.0),
            point(0.0, 0.0),
            point(width, curliness),
            point(0.0, 0.5),
            point(width, 1.0 - curliness),
            point(0.0, 1.0),
            point(width, 1.0),
        ];

        for p in &mut points {
            if pointing == Pointing::Right {
                p.x = width - p.x;
            }
            p.y *= height;
            p.x += x;
            p.y += y;
        }

        trace!("brace geometry {:?} -> {:?}", params, points);

        BraceGeometry { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point; 7] {
        &self.points
    }

    #[inline]
    pub fn verbs(&self) -> &'static [Verb; 7] {
        &BRACE_VERBS
    }

    /// Pairs of points and verbs, in path order.
    pub fn commands(&self) -> impl Iterator<Item = (Point, Verb)> + '_ {
        self.points.iter().copied().zip(BRACE_VERBS.iter().copied())
    }

    /// Where the path begins (a tip).
    #[inline]
    pub fn first(&self) -> Point {
        self.points[0]
    }

    /// Where the path ends (the other tip).
    #[inline]
    pub fn last(&self) -> Point {
        self.points[6]
    }

    /// The apex, where the two cubic segments meet.
    #[inline]
    pub fn apex(&self) -> Point {
        self.points[3]
    }

    /// The rectangle containing all of the points, ctrl points included.
    ///
    /// Always contains the curve, but may be larger than
    /// [`bounding_box`](#method.bounding_box).
    pub fn fast_bounding_box(&self) -> Box2D {
        Box2D::from_points(self.points.iter())
    }

    /// The smallest rectangle containing the curve.
    pub fn bounding_box(&self) -> Box2D {
        bounding_box(self.iter())
    }

    /// The path events of the brace: one begin, two cubics and an open end.
    pub fn iter(&self) -> Events {
        let p = &self.points;
        IntoIterator::into_iter([
            PathEvent::Begin { at: p[0] },
            PathEvent::Cubic {
                from: p[0],
                ctrl1: p[1],
                ctrl2: p[2],
                to: p[3],
            },
            PathEvent::Cubic {
                from: p[3],
                ctrl1: p[4],
                ctrl2: p[5],
                to: p[6],
            },
            PathEvent::End {
                last: p[6],
                first: p[0],
                close: false,
            },
        ])
    }

    /// Builds a lyon path containing only this brace.
    pub fn to_path(&self) -> Path {
        let mut builder = Path::builder();
        add_brace(&mut builder, self, NO_ATTRIBUTES);
        builder.build()
    }
}

impl<'l> IntoIterator for &'l BraceGeometry {
    type Item = PathEvent;
    type IntoIter = Events;

    fn into_iter(self) -> Events {
        self.iter()
    }
}

impl From<BraceParams> for BraceGeometry {
    fn from(params: BraceParams) -> Self {
        BraceGeometry::new(&params)
    }
}

/// Adds a sub-path containing a brace.
///
/// There must be no sub-path in progress when this method is called.
/// No sub-path is in progress after the method is called.
pub fn add_brace<B: PathBuilder>(
    builder: &mut B,
    brace: &BraceGeometry,
    attributes: Attributes,
) {
    let p = brace.points();
    builder.begin(p[0], attributes);
    builder.cubic_bezier_to(p[1], p[2], p[3], attributes);
    builder.cubic_bezier_to(p[4], p[5], p[6], attributes);
    builder.end(false);
}

#[cfg(test)]
fn assert_points_eq(actual: &[Point], expected: &[Point]) {
    use crate::path::geom::euclid::approxeq::ApproxEq;

    assert_eq!(actual.len(), expected.len());
    let eps = point(1e-5, 1e-5);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(a.approx_eq_eps(e, &eps), "{:?} != {:?}", actual, expected);
    }
}

#[cfg(test)]
const TEST_PARAMS: [BraceParams; 4] = [
    BraceParams::DEFAULT,
    BraceParams::at(0.4, 0.2).with_size(0.2, 0.6),
    BraceParams::at(-3.0, 10.0)
        .with_size(2.5, 7.0)
        .with_curliness(0.1),
    BraceParams::at(1.0, 1.0)
        .with_size(-0.5, -2.0)
        .with_curliness(-0.3),
];

#[test]
fn unit_brace() {
    let brace = BraceGeometry::new(
        &BraceParams::DEFAULT
            .with_width(0.1)
            .with_curliness(0.5),
    );

    assert_points_eq(
        brace.points(),
        &[
            point(0.1, 0.0),
            point(0.0, 0.0),
            point(0.1, 0.5),
            point(0.0, 0.5),
            point(0.1, 0.5),
            point(0.0, 1.0),
            point(0.1, 1.0),
        ],
    );
}

#[test]
fn points_and_verbs() {
    for pointing in [Pointing::Left, Pointing::Right] {
        for params in &TEST_PARAMS {
            let brace = BraceGeometry::new(&params.with_pointing(pointing));
            assert_eq!(brace.points().len(), BraceGeometry::NUM_POINTS);
            assert_eq!(brace.verbs(), &BRACE_VERBS);
            assert_eq!(brace.commands().count(), 7);
            assert_eq!(brace.commands().next().map(|(_, v)| v), Some(Verb::Begin));
            assert!(brace.commands().skip(1).all(|(_, v)| v == Verb::Cubic));
        }
    }
}

#[test]
fn tips_are_aligned() {
    for pointing in [Pointing::Left, Pointing::Right] {
        for params in &TEST_PARAMS {
            let brace = BraceGeometry::new(&params.with_pointing(pointing));
            assert_eq!(brace.first().x, brace.last().x);
        }
    }
}

#[test]
fn right_mirrors_left() {
    for params in &TEST_PARAMS {
        let left = BraceGeometry::new(&params.with_pointing(Pointing::Left));
        let right = BraceGeometry::new(&params.with_pointing(Pointing::Right));

        let axis = 2.0 * params.x + params.width;
        let mirrored: Vec<Point> = left
            .points()
            .iter()
            .map(|p| point(axis - p.x, p.y))
            .collect();

        assert_points_eq(right.points(), &mirrored);
    }
}

#[test]
fn translation() {
    for params in &TEST_PARAMS {
        for &(dx, dy) in &[(1.0, 0.0), (0.0, -2.5), (-0.75, 3.25)] {
            let a = BraceGeometry::new(params);
            let b = BraceGeometry::new(&params.with_position(params.x + dx, params.y + dy));

            let shifted: Vec<Point> = a
                .points()
                .iter()
                .map(|p| point(p.x + dx, p.y + dy))
                .collect();

            assert_points_eq(b.points(), &shifted);
        }
    }
}

#[test]
fn vertical_scale() {
    let base = BraceParams::at(0.5, 2.0).with_width(0.2);
    let unit = BraceGeometry::new(&base.with_height(1.0));

    for &k in &[0.5, 2.0, 3.0, -1.0] {
        let scaled = BraceGeometry::new(&base.with_height(k));
        let expected: Vec<Point> = unit
            .points()
            .iter()
            .map(|p| point(p.x, base.y + (p.y - base.y) * k))
            .collect();

        assert_points_eq(scaled.points(), &expected);
    }
}

#[test]
fn pointing_from_str() {
    assert_eq!("left".parse::<Pointing>().ok(), Some(Pointing::Left));
    assert_eq!("Right".parse::<Pointing>().ok(), Some(Pointing::Right));
    assert_eq!(" right ".parse::<Pointing>().ok(), Some(Pointing::Right));

    match "up".parse::<Pointing>() {
        Err(BraceError::InvalidPointing(s)) => assert_eq!(s, "up"),
        other => panic!("unexpected {:?}", other),
    }
    assert!("".parse::<Pointing>().is_err());

    assert_eq!(Pointing::Left.flipped(), Pointing::Right);
    assert_eq!(Pointing::Right.to_string(), "right");
}

#[test]
fn path_events() {
    let brace = BraceGeometry::new(&BraceParams::at(1.0, 2.0));
    let p = *brace.points();

    let events: Vec<PathEvent> = brace.to_path().iter().collect();
    assert_eq!(events, brace.iter().collect::<Vec<_>>());
    assert_eq!(
        events,
        vec![
            PathEvent::Begin { at: p[0] },
            PathEvent::Cubic {
                from: p[0],
                ctrl1: p[1],
                ctrl2: p[2],
                to: p[3]
            },
            PathEvent::Cubic {
                from: p[3],
                ctrl1: p[4],
                ctrl2: p[5],
                to: p[6]
            },
            PathEvent::End {
                last: p[6],
                first: p[0],
                close: false
            },
        ]
    );
}

#[test]
fn add_brace_after_other_sub_path() {
    let brace = BraceGeometry::new(&BraceParams::DEFAULT);

    let mut builder = Path::builder();
    builder.begin(point(-1.0, -1.0));
    builder.line_to(point(-2.0, -1.0));
    builder.end(false);
    add_brace(&mut builder, &brace, NO_ATTRIBUTES);
    let path = builder.build();

    let events: Vec<PathEvent> = path.iter().collect();
    assert_eq!(events.len(), 7);
    assert_eq!(&events[3..], &brace.iter().collect::<Vec<_>>()[..]);
}

#[test]
fn bounding_boxes() {
    let params = BraceParams::at(1.0, 2.0).with_size(0.5, 4.0);
    let brace = BraceGeometry::new(&params);

    let fast = brace.fast_bounding_box();
    assert_points_eq(&[fast.min, fast.max], &[point(1.0, 2.0), point(1.5, 6.0)]);

    let tight = brace.bounding_box();
    assert!((tight.min.y - 2.0).abs() < 1e-5);
    assert!((tight.max.y - 6.0).abs() < 1e-5);
    assert!((tight.max.x - 1.5).abs() < 1e-5);
    // The apex sits on the spine.
    assert!((tight.min.x - 1.0).abs() < 1e-5);
}
