// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size, Vec2};

/// Uniform zoom plus translation of an image shown in a fixed viewport.
///
/// The image is laid out to fill the viewport at `scale == 1.0` and is
/// scaled about the viewport center. `translate` is the view-space offset of
/// the scaled image from that centered position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    /// Uniform zoom factor.
    pub scale: f64,
    /// View-space offset from the centered position.
    pub translate: Vec2,
}

impl ViewportTransform {
    /// Unit scale, no translation.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    /// Creates a transform from its components.
    #[must_use]
    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate: Vec2::new(translate_x, translate_y),
        }
    }

    /// Horizontal translation.
    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.translate.x
    }

    /// Vertical translation.
    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.translate.y
    }

    /// Returns `true` for exactly `{ scale: 1, translate: (0, 0) }`.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.translate == Vec2::ZERO
    }

    /// Returns the affine map from image space into view space.
    ///
    /// Image space spans `0..width, 0..height` of `viewport`; the result
    /// scales about the viewport center and then applies the translation.
    #[must_use]
    pub fn to_affine(&self, viewport: Size) -> Affine {
        let center = Vec2::new(viewport.width / 2.0, viewport.height / 2.0);
        Affine::translate(center + self.translate)
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Inclusive range of allowed zoom factors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomLimits {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl ZoomLimits {
    /// Creates limits, normalizing the order so that `min <= max`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamps `scale` into the range. NaN falls back to `1.0` clamped into
    /// the range; infinities pin to the nearest bound.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        let scale = if scale.is_nan() { 1.0 } else { scale };
        // `max`/`min` rather than `f64::clamp`, which panics on inverted bounds.
        scale.max(self.min).min(self.max)
    }

    /// Returns `true` if `scale` lies within the range.
    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 0.8, max: 4.0 }
    }
}

/// Partial transform change; `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformUpdate {
    /// New scale.
    pub scale: Option<f64>,
    /// New horizontal translation.
    pub translate_x: Option<f64>,
    /// New vertical translation.
    pub translate_y: Option<f64>,
}

impl TransformUpdate {
    /// An update that changes nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            scale: None,
            translate_x: None,
            translate_y: None,
        }
    }

    /// An update that replaces every component with `transform`'s.
    #[must_use]
    pub const fn to(transform: ViewportTransform) -> Self {
        Self {
            scale: Some(transform.scale),
            translate_x: Some(transform.translate.x),
            translate_y: Some(transform.translate.y),
        }
    }

    /// Sets the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets both translation components.
    #[must_use]
    pub const fn with_translate(mut self, translate: Vec2) -> Self {
        self.translate_x = Some(translate.x);
        self.translate_y = Some(translate.y);
        self
    }

    /// Applies the update on top of `base` without any clamping.
    #[must_use]
    pub fn apply_to(&self, base: ViewportTransform) -> ViewportTransform {
        ViewportTransform {
            scale: self.scale.unwrap_or(base.scale),
            translate: Vec2::new(
                self.translate_x.unwrap_or(base.translate.x),
                self.translate_y.unwrap_or(base.translate.y),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{TransformUpdate, ViewportTransform, ZoomLimits};

    #[test]
    fn identity_affine_is_identity() {
        let viewport = Size::new(375.0, 667.0);
        let p = Point::new(12.0, 34.0);
        let q = ViewportTransform::IDENTITY.to_affine(viewport) * p;
        assert!((q - p).hypot() < 1e-9);
    }

    #[test]
    fn affine_scales_about_viewport_center() {
        let viewport = Size::new(200.0, 100.0);
        let t = ViewportTransform::new(2.0, 0.0, 0.0);
        let center = Point::new(100.0, 50.0);
        let mapped = t.to_affine(viewport) * center;
        assert!((mapped - center).hypot() < 1e-9);

        let corner = t.to_affine(viewport) * Point::ZERO;
        assert!((corner - Point::new(-100.0, -50.0)).hypot() < 1e-9);
    }

    #[test]
    fn zoom_limits_normalize_and_clamp() {
        let limits = ZoomLimits::new(4.0, 0.8);
        assert_eq!(limits.min, 0.8);
        assert_eq!(limits.max, 4.0);
        assert_eq!(limits.clamp(5.0), 4.0);
        assert_eq!(limits.clamp(0.1), 0.8);
        assert_eq!(limits.clamp(f64::NAN), 1.0);
        assert_eq!(limits.clamp(f64::INFINITY), 4.0);
    }

    #[test]
    fn partial_update_keeps_unset_fields() {
        let base = ViewportTransform::new(2.0, 10.0, -5.0);
        let updated = TransformUpdate::none().with_scale(3.0).apply_to(base);
        assert_eq!(updated.scale, 3.0);
        assert_eq!(updated.translate, Vec2::new(10.0, -5.0));

        let only_x = TransformUpdate {
            translate_x: Some(1.0),
            ..TransformUpdate::none()
        };
        assert_eq!(only_x.apply_to(base).translate, Vec2::new(1.0, -5.0));
    }
}
