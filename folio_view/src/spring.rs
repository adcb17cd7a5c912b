// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped spring integration used to settle transform changes.
//!
//! Each animated channel is a mass on a spring with viscous damping,
//! integrated with implicit (backward) Euler in fixed sub-steps. Backward
//! Euler is stable for any positive mass and stiffness, so stiff springs
//! settle instead of blowing up. The defaults
//! (`damping = 20`, `mass = 0.5`, `stiffness = 100`) are slightly
//! overdamped, so a channel approaches its target without visible
//! oscillation.

use kurbo::Vec2;

use crate::transform::ViewportTransform;

/// Largest integration sub-step, in seconds.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;

/// Upper bound on sub-steps per `advance` call so a stalled host cannot
/// make a single frame arbitrarily expensive.
const MAX_SUBSTEPS_PER_ADVANCE: u32 = 240;

/// Physical parameters of a damped spring.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringConfig {
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Mass attached to the spring.
    pub mass: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// A channel closer than this to its target may come to rest.
    pub rest_displacement: f64,
    /// A channel slower than this (units per second) may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 20.0,
            mass: 0.5,
            stiffness: 100.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }
}

impl SpringConfig {
    /// Returns a copy with parameters forced into a range the integrator
    /// can handle: positive mass and stiffness, non-negative damping.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            damping: if self.damping.is_finite() && self.damping >= 0.0 {
                self.damping
            } else {
                defaults.damping
            },
            mass: pick(self.mass, defaults.mass),
            stiffness: pick(self.stiffness, defaults.stiffness),
            rest_displacement: pick(self.rest_displacement, defaults.rest_displacement),
            rest_speed: pick(self.rest_speed, defaults.rest_speed),
        }
    }
}

/// One animated scalar channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    /// Current value.
    pub position: f64,
    /// Current velocity in units per second.
    pub velocity: f64,
    /// Value the spring pulls toward.
    pub target: f64,
}

impl Spring {
    /// Creates a spring at rest at `position` pulling toward `target`.
    #[must_use]
    pub fn new(position: f64, target: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target,
        }
    }

    /// Integrates one sub-step of `dt` seconds.
    ///
    /// Solves for the end-of-step velocity, then moves by it.
    pub fn step(&mut self, config: &SpringConfig, dt: f64) {
        let displacement = self.position - self.target;
        let w2 = config.stiffness / config.mass;
        let g = config.damping / config.mass;
        self.velocity = (self.velocity - dt * w2 * displacement) / (1.0 + dt * g + dt * dt * w2);
        self.position += self.velocity * dt;
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Returns `true` once the spring is both close to its target and slow.
    #[must_use]
    pub fn is_at_rest(&self, config: &SpringConfig) -> bool {
        (self.position - self.target).abs() <= config.rest_displacement
            && self.velocity.abs() <= config.rest_speed
    }

    /// Jumps to the target and stops.
    pub fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }
}

/// A spring-driven transition of a whole [`ViewportTransform`].
///
/// Scale and both translation axes are animated as independent channels
/// sharing one [`SpringConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformAnimation {
    config: SpringConfig,
    scale: Spring,
    x: Spring,
    y: Spring,
}

impl TransformAnimation {
    /// Starts an animation from `from` toward `to`.
    #[must_use]
    pub fn new(config: SpringConfig, from: ViewportTransform, to: ViewportTransform) -> Self {
        Self {
            config: config.sanitized(),
            scale: Spring::new(from.scale, to.scale),
            x: Spring::new(from.translate.x, to.translate.x),
            y: Spring::new(from.translate.y, to.translate.y),
        }
    }

    /// The interpolated value at the current time.
    #[must_use]
    pub fn current(&self) -> ViewportTransform {
        ViewportTransform {
            scale: self.scale.position,
            translate: Vec2::new(self.x.position, self.y.position),
        }
    }

    /// The value the animation settles on.
    #[must_use]
    pub fn target(&self) -> ViewportTransform {
        ViewportTransform {
            scale: self.scale.target,
            translate: Vec2::new(self.x.target, self.y.target),
        }
    }

    /// Replaces the current value, keeping velocities and target.
    ///
    /// Used to write back a clamped intermediate value so the springs keep
    /// integrating from what was actually committed.
    pub fn set_current(&mut self, value: ViewportTransform) {
        self.scale.position = value.scale;
        self.x.position = value.translate.x;
        self.y.position = value.translate.y;
    }

    /// Returns `true` when every channel is at rest.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.scale.is_at_rest(&self.config)
            && self.x.is_at_rest(&self.config)
            && self.y.is_at_rest(&self.config)
    }

    fn settle(&mut self) {
        self.scale.settle();
        self.x.settle();
        self.y.settle();
    }

    /// Advances by `dt` seconds, returning `true` while the animation is
    /// still running. A finished animation lands exactly on its target.
    ///
    /// If a channel ever goes non-finite the animation ends on its target.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return !self.is_finished();
        }
        let mut remaining = dt;
        let mut steps = 0;
        while remaining > 0.0 && steps < MAX_SUBSTEPS_PER_ADVANCE {
            let h = remaining.min(MAX_SUBSTEP);
            self.scale.step(&self.config, h);
            self.x.step(&self.config, h);
            self.y.step(&self.config, h);
            remaining -= h;
            steps += 1;
        }
        let finite = self.scale.is_finite() && self.x.is_finite() && self.y.is_finite();
        if !finite || self.is_finished() {
            self.settle();
            false
        } else {
            true
        }
    }
}
