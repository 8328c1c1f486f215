// Copyright 2023 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output.

use std::fmt::Write;

use textpath::kurbo::BezPath;
use textpath::{LayoutGlyph, OutlineSource};
use tiny_skia::PathSegment;
use xmlwriter::XmlWriter;

use crate::{blur, glyph_run_path, Shadow, TextStyle};

/// A stroked guide path.
#[derive(Clone, Copy, Debug)]
pub struct GuideStroke<'a> {
    /// The path.
    pub path: &'a BezPath,
    /// Stroke color.
    pub color: tiny_skia::Color,
    /// Stroke width.
    pub width: f32,
}

/// Serializes a glyph layout as an SVG document.
///
/// All visible glyphs are merged into a single `path` element. The shadow,
/// when set, is a separate `path` with a blur filter. The guide, when set,
/// is drawn below the text.
pub fn write(
    glyphs: &[LayoutGlyph],
    outlines: &dyn OutlineSource,
    style: &TextStyle,
    shadow: Option<&Shadow>,
    guide: Option<&GuideStroke>,
    size: tiny_skia::IntSize,
) -> String {
    let shadow = shadow.filter(|s| s.blur_radius <= Shadow::MAX_BLUR_RADIUS);

    let mut xml = XmlWriter::new(xmlwriter::Options::default());
    xml.start_element("svg");
    xml.write_attribute("xmlns", "http://www.w3.org/2000/svg");
    xml.write_attribute("width", &size.width());
    xml.write_attribute("height", &size.height());
    xml.write_attribute_fmt(
        "viewBox",
        format_args!("0 0 {} {}", size.width(), size.height()),
    );

    if let Some(shadow) = shadow {
        write_shadow_filter(&mut xml, shadow);
    }

    if let Some(guide) = guide {
        if let Some(path) = textpath::path::to_tiny_skia(guide.path) {
            xml.start_element("path");
            xml.write_attribute("fill", "none");
            write_paint(&mut xml, "stroke", guide.color);
            xml.write_attribute("stroke-width", &guide.width);
            xml.write_attribute("d", &path_data(&path));
            xml.end_element();
        }
    }

    if let Some(run) = glyph_run_path(glyphs, outlines) {
        let data = path_data(&run);
        let stroke_width = style.embolden_width();

        if let Some(shadow) = shadow {
            xml.start_element("path");
            write_paint(&mut xml, "fill", shadow.color);
            write_stroke(&mut xml, shadow.color, stroke_width);
            xml.write_attribute("filter", "url(#shadow)");
            xml.write_attribute_fmt(
                "transform",
                format_args!("translate({} {})", shadow.offset.x, shadow.offset.y),
            );
            xml.write_attribute("d", &data);
            xml.end_element();
        }

        xml.start_element("path");
        write_paint(&mut xml, "fill", style.color);
        write_stroke(&mut xml, style.color, stroke_width);
        xml.write_attribute("d", &data);
        xml.end_element();
    }

    xml.end_document()
}

fn write_shadow_filter(xml: &mut XmlWriter, shadow: &Shadow) {
    xml.start_element("defs");
    xml.start_element("filter");
    xml.write_attribute("id", "shadow");
    xml.write_attribute("x", "-50%");
    xml.write_attribute("y", "-50%");
    xml.write_attribute("width", "200%");
    xml.write_attribute("height", "200%");

    xml.start_element("feGaussianBlur");
    xml.write_attribute("in", "SourceAlpha");
    xml.write_attribute("stdDeviation", &blur::radius_to_sigma(shadow.blur_radius));
    xml.write_attribute("result", "blur");
    xml.end_element();

    // Outer blur: nothing inside the glyphs.
    xml.start_element("feComposite");
    xml.write_attribute("in", "blur");
    xml.write_attribute("in2", "SourceAlpha");
    xml.write_attribute("operator", "out");
    xml.write_attribute("result", "outer");
    xml.end_element();

    xml.start_element("feFlood");
    write_paint(xml, "flood-color", shadow.color);
    xml.end_element();

    xml.start_element("feComposite");
    xml.write_attribute("in2", "outer");
    xml.write_attribute("operator", "in");
    xml.end_element();

    xml.end_element();
    xml.end_element();
}

fn write_stroke(xml: &mut XmlWriter, color: tiny_skia::Color, width: f32) {
    if width > 0.0 {
        write_paint(xml, "stroke", color);
        xml.write_attribute("stroke-width", &width);
        xml.write_attribute("stroke-linejoin", "round");
    }
}

/// Writes a color attribute with a matching opacity attribute.
fn write_paint(xml: &mut XmlWriter, name: &str, color: tiny_skia::Color) {
    let c = color.to_color_u8();
    xml.write_attribute_fmt(
        name,
        format_args!("rgb({}, {}, {})", c.red(), c.green(), c.blue()),
    );

    if color.alpha() < 1.0 {
        let opacity_name = match name {
            "fill" => "fill-opacity",
            "stroke" => "stroke-opacity",
            _ => "flood-opacity",
        };
        xml.write_attribute(opacity_name, &color.alpha());
    }
}

/// Converts a path into SVG path data.
pub(crate) fn path_data(path: &tiny_skia::Path) -> String {
    let mut s = String::new();
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                let _ = write!(s, "M {} {} ", p.x, p.y);
            }
            PathSegment::LineTo(p) => {
                let _ = write!(s, "L {} {} ", p.x, p.y);
            }
            PathSegment::QuadTo(p1, p) => {
                let _ = write!(s, "Q {} {} {} {} ", p1.x, p1.y, p.x, p.y);
            }
            PathSegment::CubicTo(p1, p2, p) => {
                let _ = write!(s, "C {} {} {} {} {} {} ", p1.x, p1.y, p2.x, p2.y, p.x, p.y);
            }
            PathSegment::Close => {
                s.push_str("Z ");
            }
        }
    }

    // Trailing space.
    s.pop();
    s
}
