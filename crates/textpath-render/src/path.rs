// Copyright 2019 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use textpath::kurbo::BezPath;

use crate::OptionLog;

/// Fills `path`, additionally stroking it when `stroke_width` is positive.
pub(crate) fn fill_path(
    path: &tiny_skia::Path,
    color: tiny_skia::Color,
    stroke_width: f32,
    blend_mode: tiny_skia::BlendMode,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint.blend_mode = blend_mode;

    // Horizontal and vertical lines cannot be filled. Skip.
    if path.bounds().width() != 0.0 && path.bounds().height() != 0.0 {
        pixmap.fill_path(path, &paint, tiny_skia::FillRule::Winding, transform, None);
    }

    if stroke_width > 0.0 {
        let stroke = tiny_skia::Stroke {
            width: stroke_width,
            line_join: tiny_skia::LineJoin::Round,
            ..tiny_skia::Stroke::default()
        };

        pixmap.stroke_path(path, &paint, &stroke, transform, None);
    }
}

/// Strokes the guide path text was laid out along.
///
/// `transform` will be used as a root transform.
///
/// Returns `None` for empty paths and non-positive widths.
pub fn stroke_guide(
    path: &BezPath,
    color: tiny_skia::Color,
    width: f32,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    if !(width > 0.0) {
        return None;
    }

    let path = textpath::path::to_tiny_skia(path)
        .log_none(|| log::warn!("Guide path is empty or invalid. Skipped."))?;

    let mut paint = tiny_skia::Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;

    let stroke = tiny_skia::Stroke {
        width,
        ..tiny_skia::Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    Some(())
}
