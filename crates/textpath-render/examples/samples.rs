//! Run with: cargo run --example samples -- [scale]
//!
//! Renders four text-on-path samples into `samples.png`.

use std::sync::Arc;

use textpath::fontdb;
use textpath::kurbo::{BezPath, Point};
use textpath::text::{Font, FontShaper};
use textpath::{AlignmentMode, Shaper};
use textpath_render::{Shadow, TextStyle};

const TEXT: &str = "Text on path. The quick brown fox jumps over the lazy dog.";

struct Sample {
    path: BezPath,
    text: &'static str,
    origin_x: f64,
    align: AlignmentMode,
    offset: f64,
    color: tiny_skia::Color,
    shadow: Option<Shadow>,
}

fn main() {
    let scale: f64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1.0);

    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let font = Font::query(&fontdb, &[fontdb::Family::SansSerif], (16.0 * scale) as f32)
        .expect("no sans-serif font installed");
    let shaper = FontShaper::new(Arc::new(fontdb));

    let guide_color = tiny_skia::Color::from_rgba8(128, 128, 128, 255);
    let width = (500.0 * scale).ceil() as u32;
    let height = (400.0 * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    pixmap.fill(tiny_skia::Color::WHITE);

    for sample in samples(scale) {
        textpath_render::stroke_guide(
            &sample.path,
            guide_color,
            scale as f32,
            tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let run = shaper
            .shape(sample.text, &font, Point::new(sample.origin_x * scale, 0.0))
            .unwrap();
        let glyphs = textpath::layout(&run, &sample.path, sample.align, sample.offset * scale)
            .unwrap();
        println!(
            "{} of {} glyphs fit a path of length {:.1}",
            glyphs.len(),
            run.len(),
            textpath::PathSampler::new(&sample.path)
                .unwrap()
                .total_length()
        );

        let outlines = shaper.outlines(&font, glyphs.iter().map(|g| g.id));
        let style = TextStyle {
            color: sample.color,
            font_size: font.size,
            embolden: false,
        };

        textpath_render::render(
            &glyphs,
            &outlines,
            &style,
            sample.shadow.as_ref(),
            tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
    }

    pixmap.save_png("samples.png").unwrap();
    println!("Saved samples.png");
}

fn samples(scale: f64) -> Vec<Sample> {
    let p = |x: f64, y: f64| Point::new(x * scale, y * scale);

    let mut curve = BezPath::new();
    curve.move_to(p(30.0, 30.0));
    curve.quad_to(p(80.0, 40.0), p(95.0, 100.0));
    curve.quad_to(p(110.0, 170.0), p(160.0, 170.0));
    curve.quad_to(p(220.0, 175.0), p(225.0, 70.0));

    let mut arc = BezPath::new();
    textpath::path::append_arc(&mut arc, p(250.0, 250.0), 200.0 * scale, -90.0, 90.0);

    let mut reversed_arc = BezPath::new();
    textpath::path::append_arc(&mut reversed_arc, p(250.0, 250.0), 200.0 * scale, 0.0, -90.0);

    let mut bent_line = BezPath::new();
    bent_line.move_to(p(94.0, 335.0));
    bent_line.line_to(p(125.0, 275.0));
    bent_line.quad_to(p(158.0, 202.0), p(300.0, 200.0));
    bent_line.line_to(p(400.0, 200.0));

    let shadow = Shadow {
        color: tiny_skia::Color::from_rgba8(32, 32, 32, 255),
        offset: tiny_skia::Point::from_xy(0.0, 0.0),
        blur_radius: (2.5 * scale) as f32,
    };

    vec![
        Sample {
            path: curve,
            text: TEXT,
            origin_x: 10.0,
            align: AlignmentMode::Start,
            offset: 0.0,
            color: tiny_skia::Color::from_rgba8(0, 0, 255, 255),
            shadow: None,
        },
        Sample {
            path: arc,
            text: TEXT,
            origin_x: 0.0,
            align: AlignmentMode::Center,
            offset: -5.0,
            color: tiny_skia::Color::from_rgba8(255, 255, 224, 255),
            shadow: Some(shadow),
        },
        Sample {
            path: reversed_arc,
            text: TEXT,
            origin_x: 0.0,
            align: AlignmentMode::Center,
            offset: -5.0,
            color: tiny_skia::Color::BLACK,
            shadow: Some(shadow),
        },
        Sample {
            path: bent_line,
            text: "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
            origin_x: 0.0,
            align: AlignmentMode::Center,
            offset: -5.0,
            color: tiny_skia::Color::from_rgba8(0, 90, 90, 255),
            shadow: None,
        },
    ]
}
