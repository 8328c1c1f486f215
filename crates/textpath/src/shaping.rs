// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// A glyph identifier inside a font.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct GlyphId(pub u32);

/// A shaped glyph.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Glyph {
    /// Glyph ID in the font used for shaping.
    pub id: GlyphId,
    /// Distance to the next glyph's origin along the baseline.
    pub advance: f64,
    /// Pen position.
    ///
    /// `x` is the horizontal position, `y` is the offset from the baseline.
    pub position: Point,
}

/// A sequence of shaped glyphs.
///
/// Glyph positions are cumulative: every glyph starts where the previous
/// one's advance ends, beginning at the run origin.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ShapedRun {
    glyphs: Vec<Glyph>,
}

impl ShapedRun {
    /// Creates a run from already positioned glyphs.
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        ShapedRun { glyphs }
    }

    /// Creates a run from `(id, advance)` pairs, placing the first glyph
    /// at `origin`.
    pub fn from_advances<I>(origin: Point, glyphs: I) -> Self
    where
        I: IntoIterator<Item = (GlyphId, f64)>,
    {
        let mut pen_x = origin.x;
        let glyphs = glyphs
            .into_iter()
            .map(|(id, advance)| {
                let glyph = Glyph {
                    id,
                    advance,
                    position: Point::new(pen_x, origin.y),
                };
                pen_x += advance;
                glyph
            })
            .collect();

        ShapedRun { glyphs }
    }

    /// Returns the glyphs.
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Checks that the run has no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Returns the number of glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns the horizontal extent of the run.
    ///
    /// This is the pen position after the last glyph, so the run origin is
    /// included. Zero for an empty run.
    pub fn text_length(&self) -> f64 {
        match self.glyphs.last() {
            Some(last) => last.position.x + last.advance,
            None => 0.0,
        }
    }
}

/// A text shaping backend.
pub trait Shaper {
    /// A font descriptor understood by this backend.
    type Font: ?Sized;

    /// Shapes `text` with `font`, placing the run at `origin`.
    ///
    /// Returns `None` when the font cannot be used.
    fn shape(&self, text: &str, font: &Self::Font, origin: Point) -> Option<ShapedRun>;
}

/// A source of glyph outlines.
pub trait OutlineSource {
    /// Returns the outline of a glyph.
    ///
    /// The outline is already scaled to the font size, uses y-down
    /// coordinates and has its origin on the baseline at the glyph's
    /// left edge, so a [`LayoutGlyph`](crate::LayoutGlyph) transform places
    /// it directly. `None` for glyphs without an outline, like spaces.
    fn outline(&self, id: GlyphId) -> Option<tiny_skia_path::Path>;
}

impl<T: OutlineSource + ?Sized> OutlineSource for &T {
    fn outline(&self, id: GlyphId) -> Option<tiny_skia_path::Path> {
        (**self).outline(id)
    }
}
