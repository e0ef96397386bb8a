//! Stroked brace shapes.

use crate::algorithms::aabb::bounding_box;
use crate::geometry::{BraceGeometry, BraceParams};
use crate::math::{Box2D, Point};
use crate::path::Path;
use crate::style::{Color, Paint, ResolvedStyle, StrokeStyle};
use crate::tessellation::{BuffersBuilder, StrokeTessellator, StrokeVertex, VertexBuffers};
use crate::BraceError;

/// Number of vertices and indices added by a tessellation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Count {
    pub vertices: u32,
    pub indices: u32,
}

/// A brace outline together with the style it is drawn with.
///
/// The path is open and never filled: [`face`](#method.face) is always
/// `Paint::None`.
#[derive(Clone, Debug)]
pub struct BracePatch {
    geometry: BraceGeometry,
    path: Path,
    style: ResolvedStyle,
}

/// Creates a stroked curly brace.
///
/// If the style has a transform, it is applied to the path but not to the
/// geometry, which stays in the coordinates of `params`.
pub fn curly_brace(params: &BraceParams, style: &StrokeStyle) -> BracePatch {
    BracePatch::new(params, style)
}

impl BracePatch {
    pub fn new(params: &BraceParams, style: &StrokeStyle) -> Self {
        let geometry = BraceGeometry::new(params);
        let style = style.resolve();

        let mut path = geometry.to_path();
        if let Some(transform) = &style.transform {
            path = path.transformed(transform);
        }

        debug!(
            "brace patch at ({}, {}) {}x{} pointing {}, edge {}",
            params.x, params.y, params.width, params.height, params.pointing, style.edge_color,
        );

        BracePatch {
            geometry,
            path,
            style,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &BraceGeometry {
        &self.geometry
    }

    /// The path to draw, with the style's transform applied.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn style(&self) -> &ResolvedStyle {
        &self.style
    }

    #[inline]
    pub fn face(&self) -> Paint {
        self.style.face()
    }

    #[inline]
    pub fn edge(&self) -> Paint {
        self.style.edge()
    }

    #[inline]
    pub fn edge_color(&self) -> Color {
        self.style.edge_color
    }

    #[inline]
    pub fn z_order(&self) -> f32 {
        self.style.z_order
    }

    /// The smallest rectangle containing the path, not accounting for the
    /// line width.
    pub fn bounding_box(&self) -> Box2D {
        bounding_box(self.path.iter())
    }

    /// Tessellates the outline of the brace, appending the triangles to
    /// `output`.
    pub fn tessellate_stroke(
        &self,
        output: &mut VertexBuffers<Point, u16>,
    ) -> Result<Count, BraceError> {
        let vertices_before = output.vertices.len();
        let indices_before = output.indices.len();

        let options = self.style.stroke_options();
        let mut tessellator = StrokeTessellator::new();
        tessellator.tessellate_path(
            &self.path,
            &options,
            &mut BuffersBuilder::new(output, |vertex: StrokeVertex| vertex.position()),
        )?;

        let count = Count {
            vertices: (output.vertices.len() - vertices_before) as u32,
            indices: (output.indices.len() - indices_before) as u32,
        };
        debug!("stroked brace: {:?}", count);

        Ok(count)
    }
}

#[cfg(test)]
use crate::math::{point, Transform};
#[cfg(test)]
use crate::path::{LineJoin, PathEvent};

#[test]
fn patch_style() {
    let patch = curly_brace(
        &BraceParams::at(0.4, 0.2).with_size(0.2, 0.6),
        &StrokeStyle::DEFAULT
            .with_color(Color::rgb(255, 0, 255))
            .with_line_width(2.0),
    );

    assert_eq!(patch.face(), Paint::None);
    assert_eq!(patch.edge(), Paint::Solid(Color::rgb(255, 0, 255)));
    assert_eq!(patch.style().line_width, 2.0);
    assert_eq!(patch.z_order(), ResolvedStyle::DEFAULT_Z_ORDER);
}

#[test]
fn patch_path_matches_geometry() {
    let patch = curly_brace(&BraceParams::at(1.0, 1.0), &StrokeStyle::DEFAULT);

    let events: Vec<PathEvent> = patch.path().iter().collect();
    let expected: Vec<PathEvent> = patch.geometry().iter().collect();
    assert_eq!(events, expected);
}

#[test]
fn patch_transform() {
    let params = BraceParams::at(0.25, 0.5).with_size(0.5, 0.5);
    let transform = Transform::scale(100.0, 200.0);
    let patch = curly_brace(&params, &StrokeStyle::DEFAULT.with_transform(transform));

    // The geometry is not affected by the transform.
    assert_eq!(patch.geometry(), &BraceGeometry::new(&params));

    match patch.path().iter().next() {
        Some(PathEvent::Begin { at }) => {
            assert_eq!(at, point(75.0, 100.0));
        }
        other => panic!("unexpected {:?}", other),
    }

    let bounds = patch.bounding_box();
    assert!((bounds.min.y - 100.0).abs() < 1e-3);
    assert!((bounds.max.y - 200.0).abs() < 1e-3);
}

#[test]
fn stroke_tessellation() {
    let patch = curly_brace(
        &BraceParams::DEFAULT.with_size(10.0, 100.0),
        &StrokeStyle::DEFAULT
            .with_line_width(2.0)
            .with_line_join(LineJoin::Round),
    );

    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let count = patch.tessellate_stroke(&mut buffers).unwrap();

    assert!(count.vertices > 0);
    assert!(count.indices > 0);
    assert_eq!(count.indices % 3, 0);
    assert_eq!(count.vertices as usize, buffers.vertices.len());
    assert_eq!(count.indices as usize, buffers.indices.len());

    // Stroking a second patch appends to the same buffers.
    let second = patch.tessellate_stroke(&mut buffers).unwrap();
    assert_eq!(second, count);
    assert_eq!(buffers.vertices.len(), 2 * count.vertices as usize);

    // Every vertex is within half a line width of the brace.
    let bounds = patch.bounding_box().inflate(1.0 + 1e-3, 1.0 + 1e-3);
    for v in &buffers.vertices {
        assert!(bounds.contains(*v), "{:?} outside of {:?}", v, bounds);
    }
}
