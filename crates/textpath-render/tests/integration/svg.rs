// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use textpath_render::svg::GuideStroke;
use textpath_render::{Shadow, TextStyle};

use crate::{horizontal_layout, line, Boxes};

fn size() -> tiny_skia::IntSize {
    tiny_skia::IntSize::from_wh(100, 80).unwrap()
}

#[test]
fn document_with_text() {
    let style = TextStyle {
        color: tiny_skia::Color::from_rgba8(0, 90, 90, 255),
        ..TextStyle::default()
    };

    let svg = textpath_render::svg::write(horizontal_layout(), &Boxes, &style, None, None, size());

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    assert!(svg.contains(r#"viewBox="0 0 100 80""#));
    assert!(svg.contains(r#"fill="rgb(0, 90, 90)""#));
    assert!(!svg.contains("fill-opacity"));
    assert!(!svg.contains("filter"));
    assert!(!svg.contains("stroke"));

    // All glyphs are merged into a single path.
    assert_eq!(svg.matches("<path").count(), 1);
    assert!(svg.contains(r#"d="M 0 30 "#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn document_with_shadow_and_guide() {
    let style = TextStyle {
        color: tiny_skia::Color::from_rgba8(255, 255, 224, 128),
        font_size: 20.0,
        embolden: true,
    };
    let shadow = Shadow {
        color: tiny_skia::Color::from_rgba8(32, 32, 32, 255),
        offset: tiny_skia::Point::from_xy(1.0, 2.0),
        blur_radius: 2.5,
    };
    let path = line((0.0, 50.0), (100.0, 50.0));
    let guide = GuideStroke {
        path: &path,
        color: tiny_skia::Color::BLACK,
        width: 1.0,
    };

    let svg = textpath_render::svg::write(
        horizontal_layout(),
        &Boxes,
        &style,
        Some(&shadow),
        Some(&guide),
        size(),
    );

    // Guide, shadow and text.
    assert_eq!(svg.matches("<path").count(), 3);
    assert!(svg.contains(r#"d="M 0 50 L 100 50""#));

    assert!(svg.contains("<filter"));
    assert!(svg.contains(r#"stdDeviation="1.94"#));
    assert!(svg.contains(r#"operator="out""#));
    assert!(svg.contains(r#"flood-color="rgb(32, 32, 32)""#));
    assert!(svg.contains(r#"filter="url(#shadow)""#));
    assert!(svg.contains(r#"transform="translate(1 2)""#));

    assert!(svg.contains("fill-opacity"));
    assert!(svg.contains(r#"stroke-linejoin="round""#));

    // The guide is below the text.
    let guide_pos = svg.find(r#"d="M 0 50 L 100 50""#).unwrap();
    let shadow_pos = svg.find(r#"filter="url(#shadow)""#).unwrap();
    assert!(guide_pos < shadow_pos);
}

#[test]
fn empty_document() {
    let svg = textpath_render::svg::write(&[], &Boxes, &TextStyle::default(), None, None, size());

    assert!(svg.starts_with("<svg"));
    assert!(!svg.contains("<path"));
}

#[test]
fn unsupported_shadow_blur_is_skipped() {
    let shadow = Shadow {
        color: tiny_skia::Color::BLACK,
        offset: tiny_skia::Point::from_xy(0.0, 0.0),
        blur_radius: f32::INFINITY,
    };

    let svg = textpath_render::svg::write(
        horizontal_layout(),
        &Boxes,
        &TextStyle::default(),
        Some(&shadow),
        None,
        size(),
    );

    assert!(!svg.contains("<filter"));
    assert_eq!(svg.matches("<path").count(), 1);
}
