// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A `fontdb` based shaping backend.
//!
//! Text is shaped with `harfrust`, font metrics and glyph outlines come
//! from `skrifa`.

use std::sync::Arc;

use fontdb::{Database, Family, Query, ID};
use harfrust::{Direction, ShaperData, UnicodeBuffer};
use kurbo::Point;
use skrifa::instance::{LocationRef, Size};
use skrifa::MetadataProvider;

use crate::{Glyph, GlyphId, OptionLog, ShapedRun, Shaper};

mod outline;

pub use outline::FontOutlines;

/// A font face at a specific size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Font {
    /// Face ID in the database.
    pub id: ID,
    /// Font size in user units.
    pub size: f32,
}

impl Font {
    /// Resolves the first matching face for a prioritized family list.
    pub fn query(db: &Database, families: &[Family], size: f32) -> Option<Self> {
        let query = Query {
            families,
            ..Query::default()
        };

        let id = db.query(&query).log_none(|| {
            let names: Vec<&str> = families.iter().map(|f| db.family_name(f)).collect();
            log::warn!("No match for '{}' font-family.", names.join(", "));
        })?;

        Some(Font { id, size })
    }
}

/// A shaper and outline provider backed by a font database.
#[derive(Clone, Debug)]
pub struct FontShaper {
    db: Arc<Database>,
}

impl FontShaper {
    /// Creates a new shaper.
    pub fn new(db: Arc<Database>) -> Self {
        FontShaper { db }
    }

    /// Returns the underlying font database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Loads scaled outlines of the specified glyphs.
    ///
    /// Duplicates are loaded once.
    pub fn outlines<I>(&self, font: &Font, glyphs: I) -> FontOutlines
    where
        I: IntoIterator<Item = GlyphId>,
    {
        FontOutlines::load(&self.db, font, glyphs)
    }
}

impl Shaper for FontShaper {
    type Font = Font;

    fn shape(&self, text: &str, font: &Font, origin: Point) -> Option<ShapedRun> {
        let run = self
            .db
            .with_face_data(font.id, |data, face_index| {
                shape_text(data, face_index, text, font.size, origin)
            })
            .flatten()
            .log_none(|| log::warn!("Failed to shape '{}' with face {}.", text, font.id))?;

        Some(run)
    }
}

fn shape_text(
    data: &[u8],
    face_index: u32,
    text: &str,
    font_size: f32,
    origin: Point,
) -> Option<ShapedRun> {
    let metrics_font = skrifa::FontRef::from_index(data, face_index).ok()?;
    let units_per_em = metrics_font
        .metrics(Size::unscaled(), LocationRef::default())
        .units_per_em;
    if units_per_em == 0 {
        return None;
    }

    let hb_font = harfrust::FontRef::from_index(data, face_index).ok()?;
    let shaper_data = ShaperData::new(&hb_font);
    let shaper = shaper_data.shaper(&hb_font).build();

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.set_direction(Direction::LeftToRight);
    buffer.guess_segment_properties();

    let output = shaper.shape(buffer, &[]);

    // harfrust works in font units.
    let scale = font_size as f64 / units_per_em as f64;

    let mut pen_x = origin.x;
    let mut pen_y = origin.y;
    let mut glyphs = Vec::with_capacity(output.glyph_infos().len());
    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        if info.glyph_id == 0 {
            log::warn!(
                "No glyph for the cluster at {} in '{}'. Using notdef.",
                info.cluster,
                text
            );
        }

        let advance = pos.x_advance as f64 * scale;
        glyphs.push(Glyph {
            id: GlyphId(info.glyph_id),
            advance,
            // Font units are y-up.
            position: Point::new(
                pen_x + pos.x_offset as f64 * scale,
                pen_y - pos.y_offset as f64 * scale,
            ),
        });

        pen_x += advance;
        pen_y -= pos.y_advance as f64 * scale;
    }

    Some(ShapedRun::new(glyphs))
}
