// Copyright 2022 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;

use fontdb::Database;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::MetadataProvider;

use super::Font;
use crate::{GlyphId, OutlineSource};

/// Glyph outlines of a single font at a specific size.
#[derive(Clone, Debug, Default)]
pub struct FontOutlines {
    outlines: HashMap<GlyphId, tiny_skia_path::Path>,
}

impl FontOutlines {
    pub(crate) fn load<I>(db: &Database, font: &Font, glyphs: I) -> Self
    where
        I: IntoIterator<Item = GlyphId>,
    {
        let mut outlines = HashMap::new();
        db.with_face_data(font.id, |data, face_index| {
            let Ok(font_ref) = skrifa::FontRef::from_index(data, face_index) else {
                log::warn!("Failed to parse face {}.", font.id);
                return;
            };

            let units_per_em = font_ref
                .metrics(Size::unscaled(), LocationRef::default())
                .units_per_em;
            if units_per_em == 0 {
                return;
            }

            let scale = font.size / units_per_em as f32;
            let glyph_outlines = font_ref.outline_glyphs();
            for id in glyphs {
                if outlines.contains_key(&id) {
                    continue;
                }

                let Some(glyph) = glyph_outlines.get(skrifa::GlyphId::new(id.0)) else {
                    continue;
                };

                let mut pen = FlippingPen::new(scale);
                let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
                if glyph.draw(settings, &mut pen).is_err() {
                    log::warn!("Failed to outline glyph {} of face {}.", id.0, font.id);
                    continue;
                }

                // Glyphs without contours, like spaces, have no outline.
                if let Some(path) = pen.finish() {
                    outlines.insert(id, path);
                }
            }
        });

        FontOutlines { outlines }
    }

    /// Returns the number of loaded outlines.
    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    /// Checks that no outlines were loaded.
    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

impl OutlineSource for FontOutlines {
    fn outline(&self, id: GlyphId) -> Option<tiny_skia_path::Path> {
        self.outlines.get(&id).cloned()
    }
}

/// Pen adapter for skrifa's OutlinePen trait -> tiny_skia_path::PathBuilder
///
/// Scales font units to the font size and flips the y axis.
struct FlippingPen {
    builder: tiny_skia_path::PathBuilder,
    scale: f32,
}

impl FlippingPen {
    fn new(scale: f32) -> Self {
        Self {
            builder: tiny_skia_path::PathBuilder::new(),
            scale,
        }
    }

    fn finish(self) -> Option<tiny_skia_path::Path> {
        self.builder.finish()
    }
}

impl OutlinePen for FlippingPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x * self.scale, -y * self.scale);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x * self.scale, -y * self.scale);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.builder
            .quad_to(cx * self.scale, -cy * self.scale, x * self.scale, -y * self.scale);
    }

    fn curve_to(&mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            cx1 * self.scale,
            -cy1 * self.scale,
            cx2 * self.scale,
            -cy2 * self.scale,
            x * self.scale,
            -y * self.scale,
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
