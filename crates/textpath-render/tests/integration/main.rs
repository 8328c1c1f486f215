// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use once_cell::sync::Lazy;
use textpath::kurbo::{BezPath, Point};
use textpath::{AlignmentMode, GlyphId, LayoutGlyph, OutlineSource, ShapedRun};
use textpath_render::{Shadow, TextStyle};

mod svg;

const IMAGE_SIZE: u32 = 100;
const ADVANCE: f64 = 10.0;
const GLYPH_HEIGHT: f32 = 20.0;
const SPACE: GlyphId = GlyphId(0);

/// Ten adjacent glyphs along `y = 50`, covering `0..100 x 30..50`.
static HORIZONTAL: Lazy<Vec<LayoutGlyph>> = Lazy::new(|| {
    let run = ShapedRun::from_advances(Point::ZERO, (1..=10).map(|id| (GlyphId(id), ADVANCE)));
    textpath::layout(&run, &line((0.0, 50.0), (100.0, 50.0)), AlignmentMode::Start, 0.0).unwrap()
});

/// Every glyph except the space is a full-advance rectangle above the baseline.
pub struct Boxes;

impl OutlineSource for Boxes {
    fn outline(&self, id: GlyphId) -> Option<tiny_skia::Path> {
        if id == SPACE {
            return None;
        }

        let rect = tiny_skia::Rect::from_xywh(0.0, -GLYPH_HEIGHT, ADVANCE as f32, GLYPH_HEIGHT)?;
        Some(tiny_skia::PathBuilder::from_rect(rect))
    }
}

pub fn line(from: (f64, f64), to: (f64, f64)) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}

pub fn horizontal_layout() -> &'static [LayoutGlyph] {
    &HORIZONTAL
}

fn new_pixmap() -> tiny_skia::Pixmap {
    tiny_skia::Pixmap::new(IMAGE_SIZE, IMAGE_SIZE).unwrap()
}

fn pixel(pixmap: &tiny_skia::Pixmap, x: u32, y: u32) -> tiny_skia::PremultipliedColorU8 {
    pixmap.pixel(x, y).unwrap()
}

fn painted_pixels(pixmap: &tiny_skia::Pixmap) -> usize {
    pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
}

fn red() -> TextStyle {
    TextStyle {
        color: tiny_skia::Color::from_rgba8(255, 0, 0, 255),
        ..TextStyle::default()
    }
}

#[test]
fn glyphs_are_painted_where_placed() {
    let mut pixmap = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &red(),
        None,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    let inside = pixel(&pixmap, 5, 40);
    assert_eq!(
        (inside.red(), inside.green(), inside.blue(), inside.alpha()),
        (255, 0, 0, 255)
    );
    assert_eq!(pixel(&pixmap, 95, 35).alpha(), 255);

    // Above the glyphs and below the baseline.
    assert_eq!(pixel(&pixmap, 50, 25).alpha(), 0);
    assert_eq!(pixel(&pixmap, 50, 55).alpha(), 0);
}

#[test]
fn glyphs_follow_a_vertical_path() {
    let run = ShapedRun::from_advances(Point::ZERO, (1..=5).map(|id| (GlyphId(id), ADVANCE)));
    let glyphs =
        textpath::layout(&run, &line((50.0, 0.0), (50.0, 100.0)), AlignmentMode::Start, 0.0)
            .unwrap();
    assert_eq!(glyphs.len(), 5);

    let mut pixmap = new_pixmap();
    textpath_render::render(
        &glyphs,
        &Boxes,
        &TextStyle::default(),
        None,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    // Glyph tops point against the normal, which is -x here.
    assert_eq!(pixel(&pixmap, 60, 25).alpha(), 255);
    assert_eq!(pixel(&pixmap, 40, 25).alpha(), 0);
    // Only the first 50 units of the path are covered.
    assert_eq!(pixel(&pixmap, 60, 75).alpha(), 0);
}

#[test]
fn root_transform_is_applied() {
    let mut pixmap = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &TextStyle::default(),
        None,
        tiny_skia::Transform::from_scale(0.5, 0.5),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    assert_eq!(pixel(&pixmap, 25, 20).alpha(), 255);
    assert_eq!(pixel(&pixmap, 75, 40).alpha(), 0);
}

#[test]
fn glyphs_without_outlines_are_skipped() {
    let run = ShapedRun::from_advances(
        Point::ZERO,
        [(GlyphId(1), ADVANCE), (SPACE, ADVANCE), (GlyphId(2), ADVANCE)],
    );
    let glyphs =
        textpath::layout(&run, &line((0.0, 50.0), (100.0, 50.0)), AlignmentMode::Start, 0.0)
            .unwrap();
    assert_eq!(glyphs.len(), 3);

    let mut pixmap = new_pixmap();
    textpath_render::render(
        &glyphs,
        &Boxes,
        &TextStyle::default(),
        None,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    assert_eq!(pixel(&pixmap, 5, 40).alpha(), 255);
    assert_eq!(pixel(&pixmap, 15, 40).alpha(), 0);
    assert_eq!(pixel(&pixmap, 25, 40).alpha(), 255);
}

#[test]
fn empty_layout_draws_nothing() {
    let mut pixmap = new_pixmap();
    let style = TextStyle::default();
    let shadow = Shadow {
        color: tiny_skia::Color::BLACK,
        offset: tiny_skia::Point::from_xy(2.0, 2.0),
        blur_radius: 3.0,
    };

    assert!(textpath_render::render(
        &[],
        &Boxes,
        &style,
        Some(&shadow),
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .is_none());
    assert_eq!(painted_pixels(&pixmap), 0);

    // Only spaces.
    let spaces = [LayoutGlyph {
        id: SPACE,
        transform: horizontal_layout()[0].transform,
    }];
    assert!(textpath_render::render(
        &spaces,
        &Boxes,
        &style,
        None,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .is_none());
    assert_eq!(painted_pixels(&pixmap), 0);
}

#[test]
fn embolden_grows_glyphs() {
    let mut style = TextStyle {
        font_size: 36.0,
        ..TextStyle::default()
    };

    let mut regular = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &style,
        None,
        tiny_skia::Transform::identity(),
        &mut regular.as_mut(),
    )
    .unwrap();

    style.embolden = true;
    let mut bold = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &style,
        None,
        tiny_skia::Transform::identity(),
        &mut bold.as_mut(),
    )
    .unwrap();

    assert!(painted_pixels(&bold) > painted_pixels(&regular));
    assert_eq!(pixel(&regular, 50, 29).alpha(), 0);
    assert!(pixel(&bold, 50, 29).alpha() > 0);
}

#[test]
fn embolden_width() {
    let style = |font_size, embolden| TextStyle {
        font_size,
        embolden,
        ..TextStyle::default()
    };

    assert_eq!(style(24.0, false).embolden_width(), 0.0);
    assert!((style(9.0, true).embolden_width() - 9.0 / 24.0).abs() < 1e-6);
    assert!((style(36.0, true).embolden_width() - 36.0 / 32.0).abs() < 1e-6);
    // Clamped outside of the interpolation range.
    assert!((style(72.0, true).embolden_width() - 72.0 / 32.0).abs() < 1e-6);
    assert!((style(4.0, true).embolden_width() - 4.0 / 24.0).abs() < 1e-6);

    let mid = style(22.5, true).embolden_width() / 22.5;
    assert!(mid < 1.0 / 24.0 && mid > 1.0 / 32.0);
}

#[test]
fn shadow_is_drawn_outside_of_glyphs() {
    let shadow = Shadow {
        color: tiny_skia::Color::from_rgba8(0, 0, 255, 255),
        offset: tiny_skia::Point::from_xy(0.0, 0.0),
        blur_radius: 4.0,
    };

    let mut plain = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &red(),
        None,
        tiny_skia::Transform::identity(),
        &mut plain.as_mut(),
    )
    .unwrap();

    let mut shadowed = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &red(),
        Some(&shadow),
        tiny_skia::Transform::identity(),
        &mut shadowed.as_mut(),
    )
    .unwrap();

    // Blurred halo right above the glyphs.
    assert_eq!(pixel(&plain, 50, 28).alpha(), 0);
    let halo = pixel(&shadowed, 50, 28);
    assert!(halo.alpha() > 0);
    assert!(halo.blue() > 0);
    assert_eq!(halo.red(), 0);

    // Glyphs are drawn over the shadow.
    assert_eq!(pixel(&shadowed, 50, 40), pixel(&plain, 50, 40));
}

#[test]
fn shadow_is_cut_out_by_glyphs() {
    let shadow = Shadow {
        color: tiny_skia::Color::BLACK,
        offset: tiny_skia::Point::from_xy(0.0, 0.0),
        blur_radius: 4.0,
    };
    let invisible = TextStyle {
        color: tiny_skia::Color::TRANSPARENT,
        ..TextStyle::default()
    };

    let mut pixmap = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &invisible,
        Some(&shadow),
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    assert_eq!(pixel(&pixmap, 50, 40).alpha(), 0);
    assert!(pixel(&pixmap, 50, 28).alpha() > 0);
    assert!(pixel(&pixmap, 50, 52).alpha() > 0);
}

#[test]
fn shadow_offset() {
    let shadow = Shadow {
        color: tiny_skia::Color::BLACK,
        offset: tiny_skia::Point::from_xy(0.0, 20.0),
        blur_radius: 1.0,
    };

    let mut pixmap = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &red(),
        Some(&shadow),
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    // A halo around 50..70, cut out by the shifted glyphs themselves.
    assert_eq!(pixel(&pixmap, 50, 60).alpha(), 0);
    assert!(pixel(&pixmap, 50, 70).alpha() > 0);
    assert_eq!(pixel(&pixmap, 50, 90).alpha(), 0);
}

#[test]
fn guide_is_stroked() {
    let mut pixmap = new_pixmap();
    let path = line((0.0, 50.0), (100.0, 50.0));

    textpath_render::stroke_guide(
        &path,
        tiny_skia::Color::BLACK,
        2.0,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    assert!(pixel(&pixmap, 50, 49).alpha() > 0);
    assert!(pixel(&pixmap, 50, 50).alpha() > 0);
    assert_eq!(pixel(&pixmap, 50, 45).alpha(), 0);
}

#[test]
fn guide_without_width() {
    let mut pixmap = new_pixmap();
    let path = line((0.0, 50.0), (100.0, 50.0));

    assert!(textpath_render::stroke_guide(
        &path,
        tiny_skia::Color::BLACK,
        0.0,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .is_none());
    assert!(textpath_render::stroke_guide(
        &BezPath::new(),
        tiny_skia::Color::BLACK,
        1.0,
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .is_none());
    assert_eq!(painted_pixels(&pixmap), 0);
}

#[test]
fn unsupported_shadow_blur_is_skipped() {
    for blur_radius in [1e10, f32::INFINITY, f32::NAN, Shadow::MAX_BLUR_RADIUS * 2.0] {
        let shadow = Shadow {
            color: tiny_skia::Color::BLACK,
            offset: tiny_skia::Point::from_xy(0.0, 0.0),
            blur_radius,
        };

        let mut pixmap = new_pixmap();
        textpath_render::render(
            horizontal_layout(),
            &Boxes,
            &red(),
            Some(&shadow),
            tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        )
        .unwrap();

        // Text is still drawn, without a halo.
        assert_eq!(pixel(&pixmap, 50, 40).red(), 255);
        assert_eq!(pixel(&pixmap, 50, 28).alpha(), 0);
    }
}

#[test]
fn largest_shadow_blur_is_drawn() {
    let shadow = Shadow {
        color: tiny_skia::Color::BLACK,
        offset: tiny_skia::Point::from_xy(0.0, 0.0),
        blur_radius: Shadow::MAX_BLUR_RADIUS,
    };
    let invisible = TextStyle {
        color: tiny_skia::Color::TRANSPARENT,
        ..TextStyle::default()
    };

    let mut pixmap = new_pixmap();
    textpath_render::render(
        horizontal_layout(),
        &Boxes,
        &invisible,
        Some(&shadow),
        tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    )
    .unwrap();

    assert_eq!(pixel(&pixmap, 50, 40).alpha(), 0);
}
