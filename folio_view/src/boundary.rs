// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};

/// Allowed translation range for a scaled image inside a viewport.
///
/// Translation is measured in view space relative to the centered, unpanned
/// image. The range is symmetric around zero and collapses to a single point
/// whenever the scaled image does not exceed the viewport along an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    /// Minimum horizontal translation (always `-max_x`).
    pub min_x: f64,
    /// Maximum horizontal translation.
    pub max_x: f64,
    /// Minimum vertical translation (always `-max_y`).
    pub min_y: f64,
    /// Maximum vertical translation.
    pub max_y: f64,
}

impl Boundary {
    /// A boundary that only admits zero translation.
    pub const ZERO: Self = Self {
        min_x: 0.0,
        max_x: 0.0,
        min_y: 0.0,
        max_y: 0.0,
    };

    /// Clamps a translation into this boundary.
    ///
    /// Non-finite components are mapped to zero so that garbage input can
    /// never leave the transform in an unusable state.
    #[must_use]
    pub fn clamp(&self, translate: Vec2) -> Vec2 {
        let x = if translate.x.is_finite() {
            translate.x.clamp(self.min_x, self.max_x)
        } else {
            0.0
        };
        let y = if translate.y.is_finite() {
            translate.y.clamp(self.min_y, self.max_y)
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    /// Returns `true` if `translate` lies within this boundary (inclusive).
    #[must_use]
    pub fn contains(&self, translate: Vec2) -> bool {
        translate.x >= self.min_x
            && translate.x <= self.max_x
            && translate.y >= self.min_y
            && translate.y <= self.max_y
    }
}

/// Computes the translation boundary for `scale` inside a viewport of `viewport` size.
///
/// The scaled image is centered in the viewport, so the image may be moved
/// by at most half of its overhang in either direction. At `scale <= 1.0`
/// there is no overhang and the boundary collapses to [`Boundary::ZERO`].
///
/// ```
/// use kurbo::Size;
/// use folio_view::compute_boundary;
///
/// let b = compute_boundary(2.0, Size::new(400.0, 600.0));
/// assert_eq!(b.max_x, 200.0);
/// assert_eq!(b.min_y, -300.0);
/// ```
#[must_use]
pub fn compute_boundary(scale: f64, viewport: Size) -> Boundary {
    let scaled_w = viewport.width * scale;
    let scaled_h = viewport.height * scale;
    let max_x = ((scaled_w - viewport.width) / 2.0).max(0.0);
    let max_y = ((scaled_h - viewport.height) / 2.0).max(0.0);
    // `f64::max` ignores NaN, so degenerate sizes still land on zero here.
    Boundary {
        min_x: -max_x,
        max_x,
        min_y: -max_y,
        max_y,
    }
}
