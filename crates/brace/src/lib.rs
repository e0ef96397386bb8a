#![doc(html_logo_url = "https://nical.github.io/lyon-doc/lyon-logo.svg")]
#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Curly brace annotation shapes.
//!
//! A brace is an open path made of two cubic bézier segments, laid out in a
//! bounding box of `width` by `height` units with its apex on the left or
//! the right side of the box:
//!
//! <svg viewBox="-2 -2 34 104" height="104" width="34">
//!   <path style="fill:none;stroke:#000;stroke-width:2" d="M 30 100 C 0 100 30 63 0 50 C 30 37 0 0 30 0"/>
//! </svg>
//!
//! The geometry is described by [`BraceGeometry`](geometry/struct.BraceGeometry.html),
//! seven points in [`lyon_path`](https://docs.rs/lyon_path/) order: one
//! begin point followed by the control and end points of the two cubic
//! segments. A [`BracePatch`](patch/struct.BracePatch.html) pairs that
//! geometry with a stroke style. Patches are never filled.
//!
//! # Examples
//!
//! ```
//! use lyon_brace::{curly_brace, BraceParams, Pointing, StrokeStyle};
//!
//! let params = BraceParams::at(0.4, 0.2)
//!     .with_size(0.2, 0.6)
//!     .with_pointing(Pointing::Right);
//!
//! let style = StrokeStyle::DEFAULT
//!     .with_color("magenta".parse().unwrap())
//!     .with_line_width(2.0);
//!
//! let patch = curly_brace(&params, &style);
//!
//! for event in patch.path() {
//!     println!("{:?}", event);
//! }
//! ```
//!
//! Patches can be stroked with `lyon_tessellation` through
//! [`BracePatch::tessellate_stroke`](patch/struct.BracePatch.html#method.tessellate_stroke)
//! or written out as SVG with the [`svg`](svg/index.html) module.

pub use lyon_algorithms as algorithms;
pub use lyon_path as path;
pub use lyon_path::math;
pub use lyon_tessellation as tessellation;

#[cfg(feature = "serialization")]
#[macro_use]
extern crate serde;

#[macro_use]
extern crate log;

mod error;
pub mod geometry;
pub mod patch;
pub mod style;
pub mod svg;

#[doc(inline)]
pub use crate::error::BraceError;
#[doc(inline)]
pub use crate::geometry::{add_brace, BraceGeometry, BraceParams, Pointing, Verb, BRACE_VERBS};
#[doc(inline)]
pub use crate::patch::{curly_brace, BracePatch, Count};
#[doc(inline)]
pub use crate::style::{Color, Paint, ResolvedStyle, StrokeStyle};
#[doc(inline)]
pub use crate::svg::{Canvas, CanvasOptions};
