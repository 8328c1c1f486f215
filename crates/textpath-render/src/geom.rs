// Copyright 2023 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Fits the current rect into the specified bounds.
pub(crate) fn fit_to_rect(
    r: tiny_skia::IntRect,
    bounds: tiny_skia::IntRect,
) -> Option<tiny_skia::IntRect> {
    let left = r.left().max(bounds.left());
    let top = r.top().max(bounds.top());
    let right = r.right().min(bounds.right());
    let bottom = r.bottom().min(bounds.bottom());

    tiny_skia::IntRect::from_ltrb(left, top, right, bottom)
}

/// Returns the device-space bounds of `path`, outset by `margin` on each side.
pub(crate) fn device_bbox(
    path: &tiny_skia::Path,
    transform: tiny_skia::Transform,
    margin: f32,
) -> Option<tiny_skia::IntRect> {
    let bounds = path.clone().transform(transform)?.bounds();
    tiny_skia::IntRect::from_ltrb(
        (bounds.left() - margin).floor() as i32,
        (bounds.top() - margin).floor() as i32,
        (bounds.right() + margin).ceil() as i32,
        (bounds.bottom() + margin).ceil() as i32,
    )
}
