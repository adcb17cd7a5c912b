// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use folio_gesture::{
    Arbiter, GestureEvent, GestureSet, Recognized, RecognizedBatch, TouchPoint, TouchTracker,
};
use folio_view::{Boundary, TransformState, TransformUpdate, Transition, ViewportTransform};
use kurbo::{Point, Size};
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, ReaderConfig};
use crate::host::{AppLifecycle, HapticIntensity, LifecycleNotifier, PageSource, ReaderHost};
use crate::page::{PageContent, PageCursor, PageView};

/// Frame length assumed for the first frame of an animation, in seconds.
const NOMINAL_FRAME: f64 = 1.0 / 60.0;

/// Longest frame the animation will integrate, in seconds. Longer gaps
/// (a stalled host, a backgrounded app) are treated as this long.
const MAX_FRAME: f64 = 0.1;

/// Gesture-driven reader for one viewport.
///
/// The engine owns the transform for the page on screen, routes gesture
/// input through the [`Arbiter`] and reacts to what it recognizes:
///
/// - pinch end: light haptic;
/// - single tap (after the double-tap window): [`ReaderHost::on_toggle_chrome`];
/// - double tap: spring to `double_tap_zoom` about the tap point, or back to
///   identity when already zoomed past `double_tap_reset_threshold`, plus a
///   medium haptic.
///
/// Page changes reset the transform to identity and discard any gesture in
/// progress. Nothing here fails at runtime: bad input is clamped, cancelled
/// gestures restore their base, and missing pages are a [`PageView`] state.
///
/// The host drives time by calling [`ReaderEngine::advance`] once per frame
/// while it returns `true`.
pub struct ReaderEngine<S, H, L> {
    config: ReaderConfig,
    view: TransformState,
    arbiter: Arbiter,
    touches: TouchTracker,
    cursor: PageCursor,
    source: S,
    host: H,
    lifecycle: L,
    error_dismissed: bool,
    last_frame_ms: Option<u64>,
}

impl<S, H, L> ReaderEngine<S, H, L>
where
    S: PageSource,
    H: ReaderHost,
    L: LifecycleNotifier,
{
    /// Creates an engine at page `0` with an identity transform.
    ///
    /// An invalid `config` is not an error here; it is repaired with
    /// [`ReaderConfig::normalized`]. Use [`ReaderEngine::try_new`] to reject
    /// it instead.
    pub fn new(config: ReaderConfig, viewport: Size, source: S, host: H, lifecycle: L) -> Self {
        let config = match config.validate() {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "reader config rejected; using repaired values");
                config.normalized()
            }
        };
        Self::build(config, viewport, source, host, lifecycle)
    }

    /// Creates an engine, rejecting an invalid `config`.
    pub fn try_new(
        config: ReaderConfig,
        viewport: Size,
        source: S,
        host: H,
        lifecycle: L,
    ) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        Ok(Self::build(config, viewport, source, host, lifecycle))
    }

    fn build(config: ReaderConfig, viewport: Size, source: S, host: H, mut lifecycle: L) -> Self {
        lifecycle.subscribe();
        let cursor = PageCursor::new(0, source.page_count());
        Self {
            view: TransformState::new(viewport, config.zoom_limits(), config.spring),
            arbiter: Arbiter::new(config.taps),
            touches: TouchTracker::new(config.touch_slop),
            cursor,
            source,
            host,
            lifecycle,
            error_dismissed: false,
            last_frame_ms: None,
            config,
        }
    }

    /// Starts at `index` (clamped to the page range) without notifying the host.
    #[must_use]
    pub fn with_initial_page(mut self, index: usize) -> Self {
        self.cursor = PageCursor::new(index, self.source.page_count());
        self
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// The committed transform.
    #[must_use]
    pub fn transform(&self) -> ViewportTransform {
        self.view.transform()
    }

    /// The translation boundary for the committed scale.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        self.view.boundary()
    }

    /// The transform store, for read-only inspection.
    #[must_use]
    pub fn view(&self) -> &TransformState {
        &self.view
    }

    /// Returns `true` while a spring animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.view.is_animating()
    }

    /// Gestures currently in progress.
    #[must_use]
    pub fn active_gestures(&self) -> GestureSet {
        self.arbiter.active()
    }

    /// The page cursor.
    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Index of the current page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.cursor.current()
    }

    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.cursor.total()
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The page source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The page source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Dispatches one gesture event.
    pub fn handle_event(&mut self, event: GestureEvent) {
        let batch = self.arbiter.handle(&event, &mut self.view);
        self.react(batch);
    }

    /// Dispatches all gesture events of one frame, pinch before pan.
    pub fn handle_frame<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = GestureEvent>,
    {
        let batch = self.arbiter.handle_frame(events, &mut self.view);
        self.react(batch);
    }

    /// Dispatches one raw contact update through the touch tracker.
    pub fn handle_touch(&mut self, touch: &TouchPoint) {
        let events = self.touches.handle(touch);
        self.handle_frame(events);
    }

    /// Advances to frame time `now_ms`.
    ///
    /// Drains lifecycle changes, steps the spring animation and fires a
    /// deferred single tap once its double-tap window has closed. Returns
    /// `true` while the engine needs further frames.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        self.drain_lifecycle(now_ms);

        let dt = match self.last_frame_ms {
            Some(prev) => (now_ms.saturating_sub(prev) as f64 / 1000.0).min(MAX_FRAME),
            None => NOMINAL_FRAME,
        };
        self.last_frame_ms = Some(now_ms);
        if self.view.is_animating() {
            self.view.advance(dt);
            trace!(transform = ?self.view.transform(), dt, "frame");
        }

        if let Some(recognized) = self.arbiter.poll(now_ms) {
            self.react(RecognizedBatch::from_iter([recognized]));
        }
        self.view.is_animating() || self.arbiter.has_pending_single_tap()
    }

    /// Applies a partial transform change, clamped against the boundary of
    /// the new scale. Returns the clamped target.
    pub fn set_transform(
        &mut self,
        update: TransformUpdate,
        transition: Transition,
    ) -> ViewportTransform {
        if transition == Transition::Animated {
            self.last_frame_ms = None;
        }
        self.view.set_transform(update, transition)
    }

    /// Returns the transform to identity.
    pub fn reset(&mut self, transition: Transition) -> ViewportTransform {
        self.set_transform(TransformUpdate::to(ViewportTransform::IDENTITY), transition)
    }

    /// Changes the viewport size (rotation, layout), re-clamping the transform.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.view.set_viewport_size(viewport);
    }

    /// Moves to the next page. No-op at the last page.
    pub fn go_to_next(&mut self) -> bool {
        match self.cursor.next() {
            Some(index) => {
                self.page_changed(index);
                true
            }
            None => false,
        }
    }

    /// Moves to the previous page. No-op at the first page.
    pub fn go_to_previous(&mut self) -> bool {
        match self.cursor.previous() {
            Some(index) => {
                self.page_changed(index);
                true
            }
            None => false,
        }
    }

    /// Jumps to `index`. No-op if it is out of range or already current.
    pub fn go_to_page(&mut self, index: usize) -> bool {
        match self.cursor.go_to(index) {
            Some(index) => {
                self.page_changed(index);
                true
            }
            None => false,
        }
    }

    /// Changes the number of pages, typically after the data layer loaded
    /// more. If the current page no longer exists the cursor moves to the
    /// last page, the transform resets and the host is told.
    pub fn set_page_count(&mut self, total: usize) {
        if let Some(index) = self.cursor.set_total(total) {
            self.page_changed(index);
        }
    }

    /// Asks the host to close the reader. Gestures in progress are dropped.
    pub fn close(&mut self) {
        self.arbiter.reset();
        debug!("close requested");
        self.host.on_close();
    }

    /// What to render for the current page.
    #[must_use]
    pub fn page_view(&self) -> PageView<S::Image> {
        if self.cursor.is_empty() {
            return PageView::Empty;
        }
        match self.source.page(self.cursor.current()) {
            PageContent::Ready(image) => PageView::Image(image),
            PageContent::Loading => PageView::Loading,
            PageContent::Unavailable => PageView::NotAvailable,
            PageContent::Failed { message } => {
                if self.error_dismissed {
                    PageView::Empty
                } else {
                    PageView::Error { message }
                }
            }
        }
    }

    /// Hides the error view of the current page until the next page change
    /// or retry.
    pub fn dismiss_error(&mut self) {
        debug!(page = self.cursor.current(), "error dismissed");
        self.error_dismissed = true;
    }

    /// Asks the data layer to retry the current page.
    pub fn retry(&mut self) {
        if self.cursor.is_empty() {
            return;
        }
        let page = self.cursor.current();
        debug!(page, "retry requested");
        self.error_dismissed = false;
        self.source.retry(page);
    }

    fn react(&mut self, batch: RecognizedBatch) {
        for recognized in batch {
            match recognized {
                Recognized::PinchEnded(_) => self.host.on_haptic(HapticIntensity::Light),
                Recognized::SingleTap(_) => self.host.on_toggle_chrome(),
                Recognized::DoubleTap(at) => self.double_tap(at),
                Recognized::PanEnded | Recognized::Cancelled(_) => {}
            }
        }
    }

    fn double_tap(&mut self, at: Point) {
        let current = self.view.interrupt();
        let target = if current.scale > self.config.double_tap_reset_threshold {
            self.reset(Transition::Animated)
        } else {
            let zoom = self.config.double_tap_zoom;
            let center = self.view.viewport().to_rect().center();
            // Zoom about the tap point: it stays under the finger.
            let translate = (center - at) * (zoom - 1.0);
            self.set_transform(
                TransformUpdate::none()
                    .with_scale(zoom)
                    .with_translate(translate),
                Transition::Animated,
            )
        };
        debug!(?at, from = ?current, to = ?target, "double tap");
        self.host.on_haptic(HapticIntensity::Medium);
    }

    fn page_changed(&mut self, index: usize) {
        self.arbiter.reset();
        self.touches = TouchTracker::new(self.config.touch_slop);
        self.view.reset(Transition::Immediate);
        self.error_dismissed = false;
        debug!(index, "page changed");
        self.host.on_page_change(index);
    }

    fn drain_lifecycle(&mut self, now_ms: u64) {
        while let Some(state) = self.lifecycle.next_change() {
            match state {
                AppLifecycle::Active => debug!("app active"),
                AppLifecycle::Inactive | AppLifecycle::Background => {
                    debug!(?state, "app lost focus; cancelling gestures");
                    let _ = self.touches.cancel(now_ms);
                    let batch = self.arbiter.cancel_all(&mut self.view);
                    self.react(batch);
                }
            }
        }
    }
}

impl<S, H, L> fmt::Debug for ReaderEngine<S, H, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderEngine")
            .field("config", &self.config)
            .field("view", &self.view)
            .field("arbiter", &self.arbiter)
            .field("cursor", &self.cursor)
            .field("error_dismissed", &self.error_dismissed)
            .finish_non_exhaustive()
    }
}
