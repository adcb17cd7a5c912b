// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use folio_gesture::TapConfig;
use folio_view::{SpringConfig, ZoomLimits};
use thiserror::Error;

/// Construction-time options for a [`ReaderEngine`](crate::ReaderEngine).
///
/// `Default` yields the stock reader behavior: zoom between `0.8` and
/// `4.0`, double tap to `2.5`, and a slightly overdamped settle spring.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Smallest scale a pinch can reach.
    pub min_zoom: f64,
    /// Largest scale a pinch can reach.
    pub max_zoom: f64,
    /// Scale a double tap zooms to.
    pub double_tap_zoom: f64,
    /// Above this scale a double tap resets to identity instead of zooming in.
    pub double_tap_reset_threshold: f64,
    /// Spring used for animated transform changes.
    pub spring: SpringConfig,
    /// Tap timing and distance tolerances.
    pub taps: TapConfig,
    /// Travel in logical pixels before a single raw contact turns into a pan.
    pub touch_slop: f64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.8,
            max_zoom: 4.0,
            double_tap_zoom: 2.5,
            double_tap_reset_threshold: 1.5,
            spring: SpringConfig::default(),
            taps: TapConfig::default(),
            touch_slop: 8.0,
        }
    }
}

/// A rejected [`ReaderConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The zoom range is empty, inverted, or not made of positive finite numbers.
    #[error("invalid zoom range {min}..={max}")]
    InvalidZoomRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The double-tap zoom lies outside the zoom range.
    #[error("double-tap zoom {zoom} outside {min}..={max}")]
    DoubleTapZoomOutOfRange {
        /// Configured double-tap zoom.
        zoom: f64,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// The double-tap reset threshold is not finite.
    #[error("invalid double-tap reset threshold {0}")]
    InvalidResetThreshold(f64),
    /// A spring parameter is unusable.
    #[error("invalid spring {field}: {value}")]
    InvalidSpring {
        /// Name of the offending field.
        field: &'static str,
        /// Its value.
        value: f64,
    },
    /// The double-tap window is zero.
    #[error("double-tap window must be non-zero")]
    InvalidTapTiming,
    /// A slop distance is negative or not finite.
    #[error("invalid slop {0}")]
    InvalidSlop(f64),
}

impl ReaderConfig {
    /// Sets the zoom range.
    #[must_use]
    pub fn with_zoom_range(mut self, min: f64, max: f64) -> Self {
        self.min_zoom = min;
        self.max_zoom = max;
        self
    }

    /// Sets the double-tap zoom.
    #[must_use]
    pub fn with_double_tap_zoom(mut self, zoom: f64) -> Self {
        self.double_tap_zoom = zoom;
        self
    }

    /// Sets the spring parameters.
    #[must_use]
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Sets the tap tolerances.
    #[must_use]
    pub fn with_taps(mut self, taps: TapConfig) -> Self {
        self.taps = taps;
        self
    }

    /// The zoom range as [`ZoomLimits`].
    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_zoom, self.max_zoom)
    }

    /// Checks every field, returning the config unchanged if it is usable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidZoomRange { min, max });
        }
        let zoom = self.double_tap_zoom;
        if !(zoom >= min && zoom <= max) {
            return Err(ConfigError::DoubleTapZoomOutOfRange { zoom, min, max });
        }
        if !self.double_tap_reset_threshold.is_finite() {
            return Err(ConfigError::InvalidResetThreshold(
                self.double_tap_reset_threshold,
            ));
        }
        let spring = self.spring;
        for (field, value, allow_zero) in [
            ("damping", spring.damping, true),
            ("mass", spring.mass, false),
            ("stiffness", spring.stiffness, false),
            ("rest_displacement", spring.rest_displacement, false),
            ("rest_speed", spring.rest_speed, false),
        ] {
            let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
            if !ok {
                return Err(ConfigError::InvalidSpring { field, value });
            }
        }
        if self.taps.double_tap_window_ms == 0 {
            return Err(ConfigError::InvalidTapTiming);
        }
        for slop in [self.taps.tap_slop, self.touch_slop] {
            if !is_usable_slop(slop) {
                return Err(ConfigError::InvalidSlop(slop));
            }
        }
        Ok(self)
    }

    /// Returns a config that is always usable, repairing what
    /// [`validate`](Self::validate) would reject: inverted zoom ranges are
    /// swapped, unusable values fall back to defaults and the double-tap
    /// zoom is clamped into range.
    #[must_use]
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let limits = if positive(self.min_zoom) && positive(self.max_zoom) {
            ZoomLimits::new(self.min_zoom, self.max_zoom)
        } else {
            defaults.zoom_limits()
        };
        let tap_zoom = if self.double_tap_zoom.is_nan() {
            defaults.double_tap_zoom
        } else {
            self.double_tap_zoom
        };
        let threshold = self.double_tap_reset_threshold;
        let mut taps = self.taps;
        if taps.double_tap_window_ms == 0 {
            taps.double_tap_window_ms = defaults.taps.double_tap_window_ms;
        }
        taps.tap_slop = slop_or(taps.tap_slop, defaults.taps.tap_slop);
        Self {
            min_zoom: limits.min,
            max_zoom: limits.max,
            double_tap_zoom: limits.clamp(tap_zoom),
            double_tap_reset_threshold: if threshold.is_finite() {
                threshold
            } else {
                defaults.double_tap_reset_threshold
            },
            spring: self.spring.sanitized(),
            taps,
            touch_slop: slop_or(self.touch_slop, defaults.touch_slop),
        }
    }
}

fn is_usable_slop(slop: f64) -> bool {
    slop.is_finite() && slop >= 0.0
}

fn slop_or(slop: f64, fallback: f64) -> f64 {
    if is_usable_slop(slop) { slop } else { fallback }
}

#[cfg(test)]
mod tests {
    use folio_view::SpringConfig;

    use super::{ConfigError, ReaderConfig};

    #[test]
    fn default_is_valid() {
        assert_eq!(ReaderConfig::default().validate(), Ok(ReaderConfig::default()));
    }

    #[test]
    fn inverted_zoom_range_is_rejected_and_repaired() {
        let cfg = ReaderConfig::default().with_zoom_range(4.0, 0.8);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidZoomRange { min: 4.0, max: 0.8 })
        );
        let fixed = cfg.normalized();
        assert_eq!((fixed.min_zoom, fixed.max_zoom), (0.8, 4.0));
        assert!(fixed.validate().is_ok());
    }

    #[test]
    fn double_tap_zoom_outside_range() {
        let cfg = ReaderConfig::default().with_double_tap_zoom(6.0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DoubleTapZoomOutOfRange { zoom, .. }) if zoom == 6.0
        ));
        assert_eq!(cfg.normalized().double_tap_zoom, 4.0);
    }

    #[test]
    fn bad_spring_is_rejected() {
        let cfg = ReaderConfig::default().with_spring(SpringConfig {
            mass: 0.0,
            ..SpringConfig::default()
        });
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidSpring {
                field: "mass",
                value: 0.0
            })
        );
        assert!(cfg.normalized().validate().is_ok());
    }

    #[test]
    fn zero_tap_window_is_rejected() {
        let mut cfg = ReaderConfig::default();
        cfg.taps.double_tap_window_ms = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidTapTiming));
        assert_eq!(cfg.normalized().taps.double_tap_window_ms, 300);
    }
}
