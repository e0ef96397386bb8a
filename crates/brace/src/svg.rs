//! SVG output.
//!
//! [`path_data`](fn.path_data.html) serializes path events into the syntax of
//! the `d` attribute of an SVG `<path>` element. A [`Canvas`](struct.Canvas.html)
//! collects brace patches placed in data coordinates and writes them out as a
//! standalone SVG document without any axis decoration.

use crate::math::{vector, Box2D, Transform};
use crate::path::PathEvent;
use crate::patch::BracePatch;
use crate::style::Color;
use crate::BraceError;

use std::fmt::{self, Write as _};
use std::io;

/// Serializes path events into SVG path data using absolute commands.
///
/// Coordinates are rounded to three decimals.
pub fn path_data<Iter: IntoIterator<Item = PathEvent>>(path: Iter) -> String {
    let mut output = String::new();
    for event in path {
        // Writing into a String can't fail.
        let _ = match event {
            PathEvent::Begin { at } => write!(output, "M {} {} ", Num(at.x), Num(at.y)),
            PathEvent::Line { to, .. } => write!(output, "L {} {} ", Num(to.x), Num(to.y)),
            PathEvent::Quadratic { ctrl, to, .. } => write!(
                output,
                "Q {} {} {} {} ",
                Num(ctrl.x),
                Num(ctrl.y),
                Num(to.x),
                Num(to.y)
            ),
            PathEvent::Cubic {
                ctrl1, ctrl2, to, ..
            } => write!(
                output,
                "C {} {} {} {} {} {} ",
                Num(ctrl1.x),
                Num(ctrl1.y),
                Num(ctrl2.x),
                Num(ctrl2.y),
                Num(to.x),
                Num(to.y)
            ),
            PathEvent::End { close: true, .. } => write!(output, "Z "),
            PathEvent::End { close: false, .. } => Ok(()),
        };
    }

    output.truncate(output.trim_end().len());

    output
}

/// Formats a number with at most three decimals and without a negative zero.
#[derive(Copy, Clone, Debug)]
struct Num(f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0 + 0.0;
        write!(f, "{}", rounded)
    }
}

/// Parameters of a [`Canvas`](struct.Canvas.html).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CanvasOptions {
    /// Width of the document in pixels.
    ///
    /// Default value: `CanvasOptions::DEFAULT_SIZE`.
    pub width: f32,

    /// Height of the document in pixels.
    ///
    /// Default value: `CanvasOptions::DEFAULT_SIZE`.
    pub height: f32,

    /// The area of data space that is visible, with the y axis pointing up.
    ///
    /// Default value: the unit square.
    pub view: Box2D,

    /// Default value: `None`.
    pub background: Option<Color>,
}

impl CanvasOptions {
    pub const DEFAULT_SIZE: f32 = 480.0;

    pub const DEFAULT: Self = CanvasOptions {
        width: Self::DEFAULT_SIZE,
        height: Self::DEFAULT_SIZE,
        view: Box2D {
            min: crate::math::Point::new(0.0, 0.0),
            max: crate::math::Point::new(1.0, 1.0),
        },
        background: None,
    };

    #[inline]
    pub const fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub const fn with_view(mut self, view: Box2D) -> Self {
        self.view = view;
        self
    }

    #[inline]
    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// The transform from data space to document space (y pointing down).
    pub fn to_document(&self) -> Transform {
        let view = self.view;
        let sx = self.width / view.width();
        let sy = self.height / view.height();

        Transform::translation(-view.min.x, -view.min.y)
            .then_scale(sx, -sy)
            .then_translate(vector(0.0, self.height))
    }
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A drawing surface for brace patches.
#[derive(Clone, Debug)]
pub struct Canvas {
    options: CanvasOptions,
    patches: Vec<BracePatch>,
}

impl Canvas {
    pub fn new(options: CanvasOptions) -> Self {
        Canvas {
            options,
            patches: Vec::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn add_patch(&mut self, patch: BracePatch) {
        self.patches.push(patch);
    }

    #[inline]
    pub fn patches(&self) -> &[BracePatch] {
        &self.patches
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Writes the canvas as an SVG document.
    ///
    /// Patches are drawn by increasing z order, and in insertion order for
    /// patches with the same z order.
    pub fn write_to<W: io::Write>(&self, output: &mut W) -> Result<(), BraceError> {
        let CanvasOptions {
            width,
            height,
            background,
            ..
        } = self.options;

        debug!("writing {} patches to a {}x{} svg document", self.len(), width, height);

        writeln!(
            output,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = width,
            h = height,
        )?;

        if let Some(color) = background {
            writeln!(
                output,
                "  <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                width, height, color,
            )?;
        }

        let to_document = self.options.to_document();

        let mut order: Vec<&BracePatch> = self.patches.iter().collect();
        order.sort_by(|a, b| a.z_order().total_cmp(&b.z_order()));

        for patch in order {
            let style = patch.style();
            let d = path_data(patch.path().clone().transformed(&to_document).iter());

            write!(
                output,
                "  <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-linejoin=\"{}\" stroke-miterlimit=\"{}\"",
                d,
                patch.face(),
                rgb(style.edge_color),
                Num(style.line_width),
                style.line_cap_name(),
                style.line_join_name(),
                Num(style.miter_limit),
            )?;

            let opacity = style.edge_opacity();
            if opacity < 1.0 {
                write!(output, " stroke-opacity=\"{}\"", Num(opacity))?;
            }

            match &style.label {
                Some(label) => writeln!(output, "><title>{}</title></path>", escape(label))?,
                None => writeln!(output, "/>")?,
            }
        }

        writeln!(output, "</svg>")?;

        Ok(())
    }

    pub fn to_svg_string(&self) -> Result<String, BraceError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|err| BraceError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(CanvasOptions::DEFAULT)
    }
}

/// The area of data space covered by the patches of a canvas, ignoring line widths.
pub fn data_bounds(patches: &[BracePatch]) -> Option<Box2D> {
    patches
        .iter()
        .map(|patch| patch.bounding_box())
        .reduce(|a, b| a.union(&b))
}

// The alpha channel goes into stroke-opacity.
fn rgb(color: Color) -> Color {
    Color { a: 255, ..color }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
use crate::geometry::BraceParams;
#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::patch::curly_brace;
#[cfg(test)]
use crate::style::StrokeStyle;

#[test]
fn brace_path_data() {
    let brace = crate::BraceGeometry::new(&BraceParams::DEFAULT.with_width(0.5).with_curliness(0.25));
    assert_eq!(
        path_data(brace.iter()),
        "M 0.5 0 C 0 0 0.5 0.25 0 0.5 C 0.5 0.75 0 1 0.5 1"
    );
}

#[test]
fn closed_path_data() {
    let mut builder = crate::path::Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.quadratic_bezier_to(point(1.0, 1.0), point(0.0, 1.0));
    builder.end(true);
    let path = builder.build();

    assert_eq!(path_data(path.iter()), "M 0 0 L 1 0 Q 1 1 0 1 Z");
}

#[test]
fn rounded_path_data() {
    let mut builder = crate::path::Path::builder();
    builder.begin(point(60.000004, 150.0));
    builder.line_to(point(1.0 / 3.0, -0.0001));
    builder.line_to(point(-2.5, 1e-7));
    builder.end(false);
    let path = builder.build();

    assert_eq!(path_data(path.iter()), "M 60 150 L 0.333 0 L -2.5 0");
}

#[test]
fn document_transform() {
    let options = CanvasOptions::DEFAULT
        .with_size(200.0, 100.0)
        .with_view(Box2D::from_origin_and_size(point(-1.0, 0.0), crate::math::size(2.0, 1.0)));
    let t = options.to_document();

    assert_eq!(t.transform_point(point(-1.0, 0.0)), point(0.0, 100.0));
    assert_eq!(t.transform_point(point(1.0, 1.0)), point(200.0, 0.0));
    assert_eq!(t.transform_point(point(0.0, 0.5)), point(100.0, 50.0));
}

#[test]
fn canvas_document() {
    let mut canvas = Canvas::new(CanvasOptions::DEFAULT.with_size(100.0, 100.0));
    assert!(canvas.is_empty());

    canvas.add_patch(curly_brace(
        &BraceParams::DEFAULT.with_width(0.5),
        &StrokeStyle::DEFAULT
            .with_color(Color::rgb(255, 0, 0))
            .with_line_width(3.0)
            .with_z_order(2.0)
            .with_label("a < b"),
    ));
    canvas.add_patch(curly_brace(
        &BraceParams::DEFAULT.with_width(0.25),
        &StrokeStyle::DEFAULT.with_alpha(0.5),
    ));
    assert_eq!(canvas.len(), 2);

    let svg = canvas.to_svg_string().unwrap();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"100\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(!svg.contains("<line") && !svg.contains("<text"));

    let paths: Vec<&str> = svg.lines().filter(|l| l.trim_start().starts_with("<path")).collect();
    assert_eq!(paths.len(), 2);

    // Lower z order first.
    assert!(paths[0].contains("d=\"M 25 100 C 0 100"));
    assert!(paths[0].contains("stroke=\"#000000\""));
    assert!(paths[0].contains("stroke-opacity=\"0.5\""));

    assert!(paths[1].contains("d=\"M 50 100 C 0 100"));
    assert!(paths[1].contains("fill=\"none\""));
    assert!(paths[1].contains("stroke=\"#ff0000\""));
    assert!(paths[1].contains("stroke-width=\"3\""));
    assert!(paths[1].contains("<title>a &lt; b</title>"));
}

#[test]
fn canvas_background() {
    let canvas = Canvas::new(CanvasOptions::DEFAULT.with_background(Color::WHITE));
    let svg = canvas.to_svg_string().unwrap();
    assert!(svg.contains("<rect width=\"480\" height=\"480\" fill=\"#ffffff\"/>"));
}

#[test]
fn bounds_of_patches() {
    assert_eq!(data_bounds(&[]), None);

    let patches = [
        curly_brace(&BraceParams::at(0.0, 0.0).with_size(0.1, 0.5), &StrokeStyle::DEFAULT),
        curly_brace(&BraceParams::at(0.5, 0.25).with_size(0.25, 0.5), &StrokeStyle::DEFAULT),
    ];
    let bounds = data_bounds(&patches).unwrap();
    assert!((bounds.min.x - 0.0).abs() < 1e-5);
    assert!((bounds.min.y - 0.0).abs() < 1e-5);
    assert!((bounds.max.x - 0.75).abs() < 1e-5);
    assert!((bounds.max.y - 0.75).abs() < 1e-5);
}
