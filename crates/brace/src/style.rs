//! Stroke styling of brace patches.
//!
//! A [`StrokeStyle`](struct.StrokeStyle.html) only contains the options the
//! caller cares about. Resolving it produces a
//! [`ResolvedStyle`](struct.ResolvedStyle.html) where every option has a value:
//!
//! - `color` is a shorthand for the edge color. When set it takes precedence
//!   over `edge_color`.
//! - Without either, the edge is black.
//! - Braces are never filled. There is no fill option, and the face paint of
//!   a resolved style is always `Paint::None`.

use crate::math::Transform;
use crate::path::{LineCap, LineJoin};
use crate::tessellation::StrokeOptions;
use crate::BraceError;

use std::fmt;
use std::str::FromStr;

/// An 8 bits per channel RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Color::rgb(0, 0, 0);
    pub const WHITE: Self = Color::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Linear interpolation between two colors, channel by channel.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.max(0.0).min(1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// The alpha channel as a value between 0 and 1.
    #[inline]
    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }
}

/// Formats the color as `#rrggbb`, or `#rrggbbaa` if it is not opaque.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Parses any color accepted by SVG (`"red"`, `"#f0f"`, `"rgb(10, 20, 30)"`, ...).
impl FromStr for Color {
    type Err = BraceError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match svgtypes::Color::from_str(src.trim()) {
            Ok(c) => Ok(Color::rgba(c.red, c.green, c.blue, c.alpha)),
            Err(_) => Err(BraceError::InvalidColor(src.to_string())),
        }
    }
}

/// How an area or an outline is painted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Paint {
    None,
    Solid(Color),
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::Solid(color) => fmt::Display::fmt(color, f),
        }
    }
}

/// Options describing how a brace is stroked.
///
/// Unset options fall back to the defaults listed on each field once the
/// style is [resolved](#method.resolve).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeStyle {
    /// Shorthand for the edge color. Overrides `edge_color` when set.
    pub color: Option<Color>,

    /// Default value: `ResolvedStyle::DEFAULT_EDGE_COLOR`.
    pub edge_color: Option<Color>,

    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: Option<f32>,

    /// Applied to both ends of the brace.
    ///
    /// Default value: `LineCap::Butt`.
    pub line_cap: Option<LineCap>,

    /// Default value: `LineJoin::Miter`.
    pub line_join: Option<LineJoin>,

    /// Values below `StrokeOptions::MINIMUM_MITER_LIMIT` are clamped.
    ///
    /// Default value: `StrokeOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: Option<f32>,

    /// Opacity of the edge. Replaces the alpha channel of the edge color.
    ///
    /// Default value: the opacity of the edge color.
    pub alpha: Option<f32>,

    /// Flattening tolerance used when tessellating the stroke.
    ///
    /// Default value: `StrokeOptions::DEFAULT_TOLERANCE`.
    pub tolerance: Option<f32>,

    /// Applied to the path of the patch, for example to go from axes
    /// coordinates to data coordinates.
    ///
    /// Default value: `None`.
    pub transform: Option<Transform>,

    pub label: Option<String>,

    /// Patches with a higher z order are drawn on top.
    ///
    /// Default value: `ResolvedStyle::DEFAULT_Z_ORDER`.
    pub z_order: Option<f32>,
}

impl StrokeStyle {
    pub const DEFAULT: Self = StrokeStyle {
        color: None,
        edge_color: None,
        line_width: None,
        line_cap: None,
        line_join: None,
        miter_limit: None,
        alpha: None,
        tolerance: None,
        transform: None,
        label: None,
        z_order: None,
    };

    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[inline]
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = Some(color);
        self
    }

    #[inline]
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = Some(width);
        self
    }

    #[inline]
    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = Some(cap);
        self
    }

    #[inline]
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = Some(join);
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    #[inline]
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    #[inline]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    #[inline]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    pub fn with_z_order(mut self, z_order: f32) -> Self {
        self.z_order = Some(z_order);
        self
    }

    /// Builds a style out of keyword options, as they would be typed on a
    /// command line or read from a configuration file.
    ///
    /// Recognized keys: `color`, `edgecolor` (`ec`), `linewidth` (`lw`),
    /// `capstyle`, `joinstyle`, `alpha`, `label` and `zorder`. `facecolor`
    /// (`fc`) and `fill` are accepted and ignored since braces are never
    /// filled.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, BraceError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut style = StrokeStyle::DEFAULT;
        for (key, value) in pairs {
            style.set(key.as_ref(), value.as_ref())?;
        }

        Ok(style)
    }

    /// Sets a single keyword option. See [`from_pairs`](#method.from_pairs).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BraceError> {
        let invalid = || BraceError::InvalidStyle {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "color" => self.color = Some(value.parse()?),
            "edgecolor" | "ec" => self.edge_color = Some(value.parse()?),
            "facecolor" | "fc" | "fill" => {
                debug!("ignoring {}={:?}, braces are not filled", key, value);
            }
            "linewidth" | "lw" => {
                self.line_width = Some(value.trim().parse().map_err(|_| invalid())?);
            }
            "capstyle" => {
                self.line_cap = Some(match value.trim() {
                    "butt" => LineCap::Butt,
                    "round" => LineCap::Round,
                    "projecting" | "square" => LineCap::Square,
                    _ => return Err(invalid()),
                });
            }
            "joinstyle" => {
                self.line_join = Some(match value.trim() {
                    "miter" => LineJoin::Miter,
                    "round" => LineJoin::Round,
                    "bevel" => LineJoin::Bevel,
                    _ => return Err(invalid()),
                });
            }
            "alpha" => {
                let alpha: f32 = value.trim().parse().map_err(|_| invalid())?;
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(invalid());
                }
                self.alpha = Some(alpha);
            }
            "label" => self.label = Some(value.to_string()),
            "zorder" => self.z_order = Some(value.trim().parse().map_err(|_| invalid())?),
            _ => return Err(BraceError::UnknownStyleKey(key.to_string())),
        }

        Ok(())
    }

    /// Applies the defaults and the `color` shorthand.
    pub fn resolve(&self) -> ResolvedStyle {
        let edge_color = self
            .color
            .or(self.edge_color)
            .unwrap_or(ResolvedStyle::DEFAULT_EDGE_COLOR);

        ResolvedStyle {
            edge_color,
            line_width: self.line_width.unwrap_or(StrokeOptions::DEFAULT_LINE_WIDTH),
            line_cap: self.line_cap.unwrap_or(StrokeOptions::DEFAULT_LINE_CAP),
            line_join: self.line_join.unwrap_or(StrokeOptions::DEFAULT_LINE_JOIN),
            miter_limit: self
                .miter_limit
                .unwrap_or(StrokeOptions::DEFAULT_MITER_LIMIT)
                .max(StrokeOptions::MINIMUM_MITER_LIMIT),
            alpha: self.alpha.unwrap_or_else(|| edge_color.opacity()),
            tolerance: self.tolerance.unwrap_or(StrokeOptions::DEFAULT_TOLERANCE),
            transform: self.transform,
            label: self.label.clone(),
            z_order: self.z_order.unwrap_or(ResolvedStyle::DEFAULT_Z_ORDER),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A stroke style with every option set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ResolvedStyle {
    pub edge_color: Color,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub alpha: f32,
    pub tolerance: f32,
    pub transform: Option<Transform>,
    pub label: Option<String>,
    pub z_order: f32,
}

impl ResolvedStyle {
    pub const DEFAULT_EDGE_COLOR: Color = Color::BLACK;
    pub const DEFAULT_Z_ORDER: f32 = 1.0;

    /// Always `Paint::None`.
    #[inline]
    pub fn face(&self) -> Paint {
        Paint::None
    }

    #[inline]
    pub fn edge(&self) -> Paint {
        Paint::Solid(self.edge_color)
    }

    /// Opacity of the edge. This is `alpha`, which takes precedence over the
    /// alpha channel of the edge color.
    #[inline]
    pub fn edge_opacity(&self) -> f32 {
        self.alpha
    }

    /// The SVG name of the line cap.
    pub fn line_cap_name(&self) -> &'static str {
        match self.line_cap {
            LineCap::Butt => "butt",
            LineCap::Square => "square",
            LineCap::Round => "round",
        }
    }

    /// The SVG name of the line join.
    pub fn line_join_name(&self) -> &'static str {
        match self.line_join {
            LineJoin::Miter => "miter",
            LineJoin::MiterClip => "miter-clip",
            LineJoin::Round => "round",
            LineJoin::Bevel => "bevel",
        }
    }

    /// Stroke tessellation parameters for this style.
    pub fn stroke_options(&self) -> StrokeOptions {
        StrokeOptions::tolerance(self.tolerance)
            .with_line_width(self.line_width)
            .with_line_cap(self.line_cap)
            .with_line_join(self.line_join)
            .with_miter_limit(self.miter_limit)
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        StrokeStyle::DEFAULT.resolve()
    }
}

#[test]
fn color_shorthand_becomes_edge_color() {
    let style = StrokeStyle::from_pairs(vec![("color", "red"), ("lw", "2")]).unwrap();
    assert_eq!(style.color, Some(Color::rgb(255, 0, 0)));

    let resolved = style.resolve();
    assert_eq!(resolved.edge_color, Color::rgb(255, 0, 0));
    assert_eq!(resolved.edge(), Paint::Solid(Color::rgb(255, 0, 0)));
    assert_eq!(resolved.face(), Paint::None);
    assert_eq!(resolved.line_width, 2.0);
}

#[test]
fn color_overrides_edge_color() {
    let style = StrokeStyle::DEFAULT
        .with_edge_color(Color::rgb(0, 0, 255))
        .with_color(Color::rgb(0, 128, 0));
    assert_eq!(style.resolve().edge_color, Color::rgb(0, 128, 0));

    // The order of the options does not matter.
    let style = StrokeStyle::from_pairs([("color", "green"), ("edgecolor", "blue")]).unwrap();
    assert_eq!(style.resolve().edge_color, Color::rgb(0, 128, 0));
}

#[test]
fn edge_color_without_shorthand() {
    let style = StrokeStyle::DEFAULT.with_edge_color(Color::rgb(1, 2, 3));
    assert_eq!(style.resolve().edge_color, Color::rgb(1, 2, 3));

    assert_eq!(StrokeStyle::DEFAULT.resolve().edge_color, Color::BLACK);
}

#[test]
fn fill_is_never_applied() {
    let style = StrokeStyle::from_pairs([("facecolor", "yellow"), ("fill", "true")]).unwrap();
    assert_eq!(style, StrokeStyle::DEFAULT);
    assert_eq!(style.resolve().face(), Paint::None);
}

#[test]
fn other_options_pass_through() {
    let style = StrokeStyle::from_pairs([
        ("capstyle", "round"),
        ("joinstyle", "bevel"),
        ("alpha", "0.5"),
        ("label", "brace #1"),
        ("zorder", "3"),
    ])
    .unwrap();

    let resolved = style.resolve();
    assert_eq!(resolved.line_cap, LineCap::Round);
    assert_eq!(resolved.line_join, LineJoin::Bevel);
    assert_eq!(resolved.alpha, 0.5);
    assert_eq!(resolved.label.as_deref(), Some("brace #1"));
    assert_eq!(resolved.z_order, 3.0);
    assert_eq!(resolved.line_width, StrokeOptions::DEFAULT_LINE_WIDTH);
}

#[test]
fn invalid_options() {
    match StrokeStyle::from_pairs([("hatch", "//")]) {
        Err(BraceError::UnknownStyleKey(key)) => assert_eq!(key, "hatch"),
        other => panic!("unexpected {:?}", other),
    }

    match StrokeStyle::from_pairs([("lw", "thick")]) {
        Err(BraceError::InvalidStyle { key, value }) => {
            assert_eq!(key, "lw");
            assert_eq!(value, "thick");
        }
        other => panic!("unexpected {:?}", other),
    }

    assert!(StrokeStyle::from_pairs([("alpha", "1.5")]).is_err());
    assert!(StrokeStyle::from_pairs([("joinstyle", "sharp")]).is_err());
    assert!(matches!(
        StrokeStyle::from_pairs([("color", "not a color")]),
        Err(BraceError::InvalidColor(_))
    ));
}

#[test]
fn alpha_overrides_color_alpha() {
    let translucent = Color::rgba(255, 0, 0, 128);

    let style = StrokeStyle::from_pairs([("color", "#ff000080"), ("alpha", "1")]).unwrap();
    assert_eq!(style.resolve().edge_opacity(), 1.0);

    let style = StrokeStyle::DEFAULT.with_color(translucent).with_alpha(0.25);
    assert_eq!(style.resolve().edge_opacity(), 0.25);

    // Without alpha, the color's own alpha channel is used.
    let resolved = StrokeStyle::DEFAULT.with_color(translucent).resolve();
    assert_eq!(resolved.edge_opacity(), translucent.opacity());

    assert_eq!(ResolvedStyle::default().edge_opacity(), 1.0);
}

#[test]
fn parse_colors() {
    assert_eq!("magenta".parse::<Color>().unwrap(), Color::rgb(255, 0, 255));
    assert_eq!("#0d0887".parse::<Color>().unwrap(), Color::rgb(13, 8, 135));
    assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
    assert!("#12".parse::<Color>().is_err());

    assert_eq!(Color::rgb(13, 8, 135).to_string(), "#0d0887");
    assert_eq!(Color::rgba(255, 0, 0, 128).to_string(), "#ff000080");
    assert_eq!(Paint::None.to_string(), "none");
}

#[test]
fn color_lerp() {
    let a = Color::rgb(0, 0, 0);
    let b = Color::rgb(200, 100, 50);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Color::rgb(100, 50, 25));
    assert_eq!(a.lerp(b, 2.0), b);
}

#[test]
fn to_stroke_options() {
    let options = StrokeStyle::DEFAULT
        .with_line_width(4.0)
        .with_line_cap(LineCap::Round)
        .with_tolerance(0.01)
        .with_miter_limit(0.5)
        .resolve()
        .stroke_options();

    assert_eq!(options.line_width, 4.0);
    assert_eq!(options.start_cap, LineCap::Round);
    assert_eq!(options.end_cap, LineCap::Round);
    assert_eq!(options.line_join, LineJoin::Miter);
    assert_eq!(options.tolerance, 0.01);
    assert_eq!(options.miter_limit, StrokeOptions::MINIMUM_MITER_LIMIT);
}
