// Copyright 2020 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop shadows.
//!
//! The blur is an approximation of a Gaussian blur made of three
//! consecutive box blurs.

use crate::{geom, path, OptionLog, Shadow};

const BLUR_PASSES: usize = 3;

// Scratch pixmap outset limit, in pixels.
const MAX_MARGIN: f32 = 4096.0;

/// Converts a blur radius into a Gaussian standard deviation.
pub(crate) fn radius_to_sigma(radius: f32) -> f32 {
    if radius > 0.0 {
        0.57735 * radius + 0.5
    } else {
        0.0
    }
}

/// Draws the shadow of `run` onto `pixmap`.
///
/// The run is rendered into a scratch pixmap, blurred, cut out by the run
/// itself and then composited over the target.
pub(crate) fn render_shadow(
    run: &tiny_skia::Path,
    stroke_width: f32,
    shadow: &Shadow,
    transform: tiny_skia::Transform,
    pixmap: &mut tiny_skia::PixmapMut,
) -> Option<()> {
    if !(shadow.blur_radius <= Shadow::MAX_BLUR_RADIUS) {
        log::warn!(
            "Shadow blur radius {} is not supported. Skipped.",
            shadow.blur_radius
        );
        return None;
    }

    let sigma = radius_to_sigma(shadow.blur_radius);
    let transform = transform.pre_translate(shadow.offset.x, shadow.offset.y);

    // Blur spreads pixels by about three sigmas.
    let margin = (3.0 * sigma).ceil() + stroke_width;
    if !(margin <= MAX_MARGIN) {
        log::warn!("Shadow is too wide. Skipped.");
        return None;
    }

    let margin_px = margin as u32;
    let canvas_rect = tiny_skia::IntRect::from_xywh(
        -(margin_px as i32),
        -(margin_px as i32),
        pixmap.width().checked_add(2 * margin_px)?,
        pixmap.height().checked_add(2 * margin_px)?,
    )?;
    let region = geom::device_bbox(run, transform, margin)
        .and_then(|bbox| geom::fit_to_rect(bbox, canvas_rect))?;

    let mut sub_pixmap = tiny_skia::Pixmap::new(region.width(), region.height())
        .log_none(|| log::warn!("Failed to allocate a shadow pixmap."))?;
    let sub_transform =
        tiny_skia::Transform::from_translate(-region.x() as f32, -region.y() as f32)
            .pre_concat(transform);

    path::fill_path(
        run,
        shadow.color,
        stroke_width,
        tiny_skia::BlendMode::SourceOver,
        sub_transform,
        &mut sub_pixmap.as_mut(),
    );

    if sigma > 0.0 {
        let width = sub_pixmap.width() as usize;
        let height = sub_pixmap.height() as usize;
        box_blur(sub_pixmap.data_mut(), width, height, sigma);

        // Keep only the part outside of the glyphs.
        path::fill_path(
            run,
            tiny_skia::Color::BLACK,
            stroke_width,
            tiny_skia::BlendMode::DestinationOut,
            sub_transform,
            &mut sub_pixmap.as_mut(),
        );
    }

    pixmap.draw_pixmap(
        region.x(),
        region.y(),
        sub_pixmap.as_ref(),
        &tiny_skia::PixmapPaint::default(),
        tiny_skia::Transform::identity(),
        None,
    );

    Some(())
}

/// Blurs premultiplied RGBA8 pixels in place.
pub(crate) fn box_blur(data: &mut [u8], width: usize, height: usize, sigma: f32) {
    if width == 0 || height == 0 || data.len() != width * height * 4 {
        return;
    }

    let mut buf = vec![0u8; data.len()];
    for size in boxes_for_gauss(sigma, BLUR_PASSES) {
        let radius = (size - 1) / 2;
        if radius == 0 {
            continue;
        }

        // Rows.
        box_blur_lines(data, &mut buf, height, width, width * 4, 4, radius);
        // Columns.
        box_blur_lines(&buf, data, width, height, 4, width * 4, radius);
    }
}

/// Returns box sizes that approximate a Gaussian blur when applied
/// one after another.
fn boxes_for_gauss(sigma: f32, n: usize) -> Vec<usize> {
    let n_float = n as f32;

    let w_ideal = (12.0 * sigma * sigma / n_float + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i32;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wl = wl.max(1);
    let wu = wl + 2;

    let wl_float = wl as f32;
    let m_ideal = (12.0 * sigma * sigma
        - n_float * wl_float * wl_float
        - 4.0 * n_float * wl_float
        - 3.0 * n_float)
        / (-4.0 * wl_float - 4.0);
    let m = m_ideal.round().max(0.0) as usize;

    (0..n)
        .map(|i| if i < m { wl as usize } else { wu as usize })
        .collect()
}

/// Applies a box blur of `radius` along `lines` independent lines.
///
/// `line_stride` is the byte distance between line starts, `step` the byte
/// distance between neighbour pixels in a line. Pixels outside of a line
/// are transparent.
fn box_blur_lines(
    src: &[u8],
    dst: &mut [u8],
    lines: usize,
    len: usize,
    line_stride: usize,
    step: usize,
    radius: usize,
) {
    let scale = 1.0 / (radius * 2 + 1) as f32;

    for line in 0..lines {
        let base = line * line_stride;
        for channel in 0..4 {
            let at = |i: usize| base + i * step + channel;

            let mut acc: u32 = (0..=radius.min(len - 1)).map(|i| src[at(i)] as u32).sum();
            for i in 0..len {
                dst[at(i)] = (acc as f32 * scale).round() as u8;

                if i + radius + 1 < len {
                    acc += src[at(i + radius + 1)] as u32;
                }
                if i >= radius {
                    acc -= src[at(i - radius)] as u32;
                }
            }
        }
    }
}
