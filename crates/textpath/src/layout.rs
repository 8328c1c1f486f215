// Copyright 2024 the Textpath Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Vec2};

use crate::path::{PathSampler, DEFAULT_TOLERANCE};
use crate::{Error, GlyphId, ShapedRun};

/// Text alignment along a path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum AlignmentMode {
    /// The run starts at the path start.
    Start,
    /// The run is centered on the path.
    #[default]
    Center,
    /// The run ends at the path end.
    End,
}

/// A rotation-scale-translation transform.
///
/// Maps `(x, y)` to `(scos * x - ssin * y + tx, ssin * x + scos * y + ty)`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GlyphTransform {
    /// Cosine of the rotation angle, multiplied by the scale.
    pub scos: f32,
    /// Sine of the rotation angle, multiplied by the scale.
    pub ssin: f32,
    /// Horizontal translation.
    pub tx: f32,
    /// Vertical translation.
    pub ty: f32,
}

impl GlyphTransform {
    /// Checks that the transform has no rotation and no scale.
    pub fn is_translate(&self) -> bool {
        self.scos == 1.0 && self.ssin == 0.0
    }

    /// Checks that all components are finite.
    pub fn is_finite(&self) -> bool {
        self.scos.is_finite() && self.ssin.is_finite() && self.tx.is_finite() && self.ty.is_finite()
    }

    /// Converts into a `tiny-skia` transform.
    pub fn to_transform(&self) -> tiny_skia_path::Transform {
        tiny_skia_path::Transform::from_row(
            self.scos, self.ssin, -self.ssin, self.scos, self.tx, self.ty,
        )
    }

    /// Converts into a `kurbo` transform.
    pub fn to_affine(&self) -> kurbo::Affine {
        kurbo::Affine::new([
            self.scos as f64,
            self.ssin as f64,
            -self.ssin as f64,
            self.scos as f64,
            self.tx as f64,
            self.ty as f64,
        ])
    }
}

/// A glyph placed on a path.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LayoutGlyph {
    /// Glyph ID.
    pub id: GlyphId,
    /// Glyph transform.
    ///
    /// Maps the glyph's baseline-left origin onto the path.
    pub transform: GlyphTransform,
}

/// Layout options.
#[derive(Clone, Copy, Debug)]
pub struct LayoutOptions {
    /// Where the run is placed along the path.
    ///
    /// Default: [`AlignmentMode::Center`]
    pub align: AlignmentMode,

    /// Baseline shift along the path normal.
    ///
    /// Positive values move glyphs to the right-hand side of the direction
    /// of travel, which is "down" for a left-to-right path in y-down
    /// coordinates.
    ///
    /// Default: 0
    pub perpendicular_offset: f64,

    /// Path flattening tolerance.
    ///
    /// Default: [`DEFAULT_TOLERANCE`]
    pub tolerance: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            align: AlignmentMode::default(),
            perpendicular_offset: 0.0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Lays out `run` along `path`.
///
/// Every glyph is rotated around its horizontal midpoint so that its
/// baseline is tangent to the path. Glyphs with a midpoint before the path
/// start or at/after the path end are dropped, so the result may be shorter
/// than the run. The order of glyphs is preserved.
///
/// Fails only when `path` contains non-finite coordinates.
pub fn layout(
    run: &ShapedRun,
    path: &BezPath,
    align: AlignmentMode,
    perpendicular_offset: f64,
) -> Result<Vec<LayoutGlyph>, Error> {
    let sampler = PathSampler::new(path)?;
    Ok(layout_with_sampler(
        run,
        &sampler,
        align,
        perpendicular_offset,
    ))
}

/// Lays out `run` along `path` using [`LayoutOptions`].
pub fn layout_with_options(
    run: &ShapedRun,
    path: &BezPath,
    options: &LayoutOptions,
) -> Result<Vec<LayoutGlyph>, Error> {
    let sampler = PathSampler::with_tolerance(path, options.tolerance)?;
    Ok(layout_with_sampler(
        run,
        &sampler,
        options.align,
        options.perpendicular_offset,
    ))
}

/// Lays out `run` along an already measured path.
///
/// Useful when the same path is used for several layouts.
pub fn layout_with_sampler(
    run: &ShapedRun,
    sampler: &PathSampler,
    align: AlignmentMode,
    perpendicular_offset: f64,
) -> Vec<LayoutGlyph> {
    let Some(first) = run.glyphs().first() else {
        return Vec::new();
    };

    let path_len = sampler.total_length();
    let text_len = run.text_length();

    // Where the run origin lands on the path.
    let start_offset = match align {
        AlignmentMode::Start => first.position.x,
        AlignmentMode::End => path_len - text_len + first.position.x,
        AlignmentMode::Center => (path_len - text_len) / 2.0 + first.position.x,
    };

    run.glyphs()
        .iter()
        .filter_map(|glyph| {
            // Glyphs are rotated around their horizontal midpoint.
            let half_width = glyph.advance / 2.0;
            let mid_offset = start_offset + glyph.position.x + half_width;

            // Glyphs that overflow at one of the path ends are dropped.
            if !(mid_offset >= 0.0 && mid_offset < path_len) {
                return None;
            }

            let sample = sampler.sample_at(mid_offset);
            let tangent = sample.tangent;
            let normal = Vec2::new(-tangent.y, tangent.x);

            let origin = sample.position - tangent * half_width
                + normal * (glyph.position.y + perpendicular_offset);

            let transform = GlyphTransform {
                scos: tangent.x as f32,
                ssin: tangent.y as f32,
                tx: origin.x as f32,
                ty: origin.y as f32,
            };

            // Offsets beyond the `f32` range.
            if !transform.is_finite() {
                log::warn!("Glyph {} cannot be placed on the path. Skipped.", glyph.id.0);
                return None;
            }

            Some(LayoutGlyph {
                id: glyph.id,
                transform,
            })
        })
        .collect()
}
