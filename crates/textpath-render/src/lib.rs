// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/*!
`textpath-render` draws text laid out by [`textpath`].

## Main functions

- [`render`] - Renders a glyph layout onto a pixmap, with an optional drop shadow
- [`stroke_guide`] - Strokes the path the text was laid out along
- [`svg::write`] - Serializes a glyph layout as an SVG document

## Re-exports

This crate re-exports [`tiny_skia`] for pixmap handling and [`textpath`]
for the layout.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::identity_op)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::uninlined_format_args)]

pub use textpath;
pub use tiny_skia;

use textpath::{LayoutGlyph, OutlineSource};

mod blur;
mod geom;
mod path;
pub mod svg;

pub use path::stroke_guide;

/// Text paint.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TextStyle {
    /// Fill color.
    pub color: tiny_skia::Color,

    /// Font size the outlines were scaled to.
    ///
    /// Used only to compute the fake bold stroke width.
    pub font_size: f32,

    /// Emulates a bold face by stroking glyph outlines.
    pub embolden: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            color: tiny_skia::Color::BLACK,
            font_size: 12.0,
            embolden: false,
        }
    }
}

impl TextStyle {
    /// Returns the outline stroke width used for emboldening.
    ///
    /// Zero when emboldening is disabled.
    pub fn embolden_width(&self) -> f32 {
        if !self.embolden {
            return 0.0;
        }

        // Relative outset shrinks from 1/24 at 9 units to 1/32 at 36 units.
        const SIZES: (f32, f32) = (9.0, 36.0);
        const RATIOS: (f32, f32) = (1.0 / 24.0, 1.0 / 32.0);

        let t = ((self.font_size - SIZES.0) / (SIZES.1 - SIZES.0)).clamp(0.0, 1.0);
        let ratio = RATIOS.0 + (RATIOS.1 - RATIOS.0) * t;
        self.font_size * ratio
    }
}

/// A blurred drop shadow.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Shadow {
    /// Shadow color.
    pub color: tiny_skia::Color,

    /// Shadow offset in user units.
    pub offset: tiny_skia::Point,

    /// Blur radius in device pixels.
    ///
    /// The shadow is visible only outside the glyphs.
    /// Limited by [`Shadow::MAX_BLUR_RADIUS`].
    pub blur_radius: f32,
}

impl Shadow {
    /// The largest supported blur radius.
    ///
    /// Shadows with a larger or a non-finite radius are not drawn.
    pub const MAX_BLUR_RADIUS: f32 = 512.0;
}

/// Renders a glyph layout onto the pixmap.
///
/// When `shadow` is set, the same layout is drawn twice: first the blurred
/// shadow, then the text itself.
///
/// `transform` will be used as a root transform.
///
/// Returns `None` when there is nothing to draw.
pub fn render(
    glyphs: &[LayoutGlyph],
    outlines: &dyn OutlineSource,
    style: &TextStyle,
    shadow: Option<&Shadow>,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    let run = glyph_run_path(glyphs, outlines)?;
    let stroke_width = style.embolden_width();

    if let Some(shadow) = shadow {
        blur::render_shadow(&run, stroke_width, shadow, transform, pixmap);
    }

    path::fill_path(
        &run,
        style.color,
        stroke_width,
        tiny_skia::BlendMode::SourceOver,
        transform,
        pixmap,
    );

    Some(())
}

/// Merges the outlines of all visible glyphs into a single path.
///
/// Returns `None` when no glyph has an outline.
pub fn glyph_run_path(
    glyphs: &[LayoutGlyph],
    outlines: &dyn OutlineSource,
) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for glyph in glyphs {
        let outline = outlines
            .outline(glyph.id)
            .and_then(|p| p.transform(glyph.transform.to_transform()));

        if let Some(outline) = outline {
            builder.push_path(&outline);
        }
    }

    builder.finish()
}

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
