// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/*!
`textpath` lays out shaped glyphs along an arbitrary 2D path.

## Main functions

- [`layout`] - Places a [`ShapedRun`] along a path
- [`layout_with_sampler`] - The same, reusing a prebuilt [`PathSampler`]
- [`path::parse`] - Parses SVG path data into a path

The crate does no shaping and no rasterization on its own. Shaping goes
through the [`Shaper`] trait and glyph outlines through [`OutlineSource`].
With the `text` feature enabled, [`text::FontShaper`] implements both on top
of `fontdb`, `harfrust` and `skrifa`.

## Re-exports

This crate re-exports [`kurbo`] for path geometry and [`tiny_skia_path`] for
glyph outlines and transforms.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::identity_op)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]

pub use kurbo;
pub use tiny_skia_path;

#[cfg(feature = "text")]
pub use fontdb;

mod error;
mod layout;
pub mod path;
mod shaping;
#[cfg(feature = "text")]
pub mod text;

pub use error::Error;
pub use layout::{
    layout, layout_with_options, layout_with_sampler, AlignmentMode, GlyphTransform, LayoutGlyph,
    LayoutOptions,
};
pub use path::{PathSampler, Sample};
pub use shaping::{Glyph, GlyphId, OutlineSource, ShapedRun, Shaper};

pub(crate) trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
