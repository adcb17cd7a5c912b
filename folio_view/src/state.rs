// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use tracing::trace;

use crate::boundary::{Boundary, compute_boundary};
use crate::spring::{SpringConfig, TransformAnimation};
use crate::transform::{TransformUpdate, ViewportTransform, ZoomLimits};

/// How a transform change is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Transition {
    /// Commit the clamped value right away.
    #[default]
    Immediate,
    /// Settle toward the clamped value with the configured spring.
    Animated,
}

/// Authoritative zoom/pan state for one viewport.
///
/// Every value this type commits satisfies two invariants:
/// - `limits.min <= scale <= limits.max`;
/// - `translate` lies within [`compute_boundary`] for the committed scale.
///
/// Changes flow through [`TransformState::set_transform`], which clamps
/// before committing, or through the spring animation driven by
/// [`TransformState::advance`], which clamps every intermediate frame.
/// There is no way to write the fields directly.
#[derive(Clone, Debug)]
pub struct TransformState {
    viewport: Size,
    limits: ZoomLimits,
    spring: SpringConfig,
    current: ViewportTransform,
    animation: Option<TransformAnimation>,
}

impl TransformState {
    /// Creates an identity state for a viewport of `viewport` size.
    #[must_use]
    pub fn new(viewport: Size, limits: ZoomLimits, spring: SpringConfig) -> Self {
        let mut state = Self {
            viewport,
            limits,
            spring: spring.sanitized(),
            current: ViewportTransform::IDENTITY,
            animation: None,
        };
        // Identity may itself sit outside unusual limits (e.g. min_zoom > 1).
        state.current = state.clamp(ViewportTransform::IDENTITY);
        state
    }

    /// The committed transform.
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.current
    }

    /// The viewport size used for boundary computation.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The zoom range.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// The translation boundary for the committed scale.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        compute_boundary(self.current.scale, self.viewport)
    }

    /// Returns `true` while a spring animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// The value an in-flight animation settles on, if any.
    #[must_use]
    pub fn animation_target(&self) -> Option<ViewportTransform> {
        self.animation.as_ref().map(TransformAnimation::target)
    }

    /// Clamps a candidate transform: scale into the zoom range first, then
    /// translation into the boundary of that clamped scale.
    #[must_use]
    pub fn clamp(&self, candidate: ViewportTransform) -> ViewportTransform {
        let scale = self.limits.clamp(candidate.scale);
        let translate = compute_boundary(scale, self.viewport).clamp(candidate.translate);
        ViewportTransform { scale, translate }
    }

    /// Applies a partial update on top of the committed transform.
    ///
    /// The result is clamped against the boundary of the *new* scale. With
    /// [`Transition::Immediate`] it is committed at once (cancelling any
    /// animation); with [`Transition::Animated`] a spring animation starts
    /// from the committed value. Returns the clamped target.
    pub fn set_transform(
        &mut self,
        update: TransformUpdate,
        transition: Transition,
    ) -> ViewportTransform {
        let target = self.clamp(update.apply_to(self.current));
        match transition {
            Transition::Immediate => {
                self.animation = None;
                self.current = target;
            }
            Transition::Animated => {
                if target == self.current {
                    self.animation = None;
                } else {
                    trace!(?target, "spring animation started");
                    self.animation = Some(TransformAnimation::new(
                        self.spring,
                        self.current,
                        target,
                    ));
                }
            }
        }
        target
    }

    /// Returns to identity (clamped into the zoom range).
    pub fn reset(&mut self, transition: Transition) -> ViewportTransform {
        self.set_transform(TransformUpdate::to(ViewportTransform::IDENTITY), transition)
    }

    /// Stops any in-flight animation where it is.
    ///
    /// The interpolated value is already committed, so it simply stays; it is
    /// returned so callers can use it as the base for a new gesture.
    pub fn interrupt(&mut self) -> ViewportTransform {
        if self.animation.take().is_some() {
            trace!(current = ?self.current, "spring animation interrupted");
        }
        self.current
    }

    /// Advances the in-flight animation by `dt` seconds.
    ///
    /// Each intermediate value is clamped before it is committed. Returns
    /// `true` while the animation is still running.
    pub fn advance(&mut self, dt: f64) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        let running = animation.advance(dt);
        let clamped = {
            let raw = animation.current();
            let scale = self.limits.clamp(raw.scale);
            ViewportTransform {
                scale,
                translate: compute_boundary(scale, self.viewport).clamp(raw.translate),
            }
        };
        animation.set_current(clamped);
        self.current = clamped;
        if !running {
            trace!(current = ?self.current, "spring animation settled");
            self.animation = None;
        }
        running
    }

    /// Changes the viewport size and re-clamps the committed transform.
    ///
    /// An in-flight animation is retargeted onto the clamped target for the
    /// new size.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.current = self.clamp(self.current);
        if let Some(animation) = self.animation.take() {
            let target = self.clamp(animation.target());
            self.animation = Some(TransformAnimation::new(self.spring, self.current, target));
        }
    }
}
