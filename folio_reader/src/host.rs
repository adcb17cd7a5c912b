// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contracts: everything the engine delegates to its host.

use crate::page::PageContent;

/// Strength of a haptic pulse requested by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticIntensity {
    /// Pinch end.
    Light,
    /// Double tap.
    Medium,
}

/// Side effects the engine asks its host to perform.
///
/// All callbacks are invoked synchronously from within the engine call that
/// caused them.
pub trait ReaderHost {
    /// The current page changed to `index`.
    fn on_page_change(&mut self, index: usize);

    /// The reader asked to be closed.
    fn on_close(&mut self) {}

    /// A single tap was recognized; typically toggles reader chrome.
    fn on_toggle_chrome(&mut self) {}

    /// Play a haptic pulse.
    fn on_haptic(&mut self, intensity: HapticIntensity) {
        let _ = intensity;
    }
}

/// Per-page data supplied by the external data layer.
pub trait PageSource {
    /// Opaque image handle handed back to the rendering surface.
    type Image: Clone;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Current state of page `index`. Must be cheap; the engine may call it
    /// on every render.
    fn page(&self, index: usize) -> PageContent<Self::Image>;

    /// The user asked to retry a failed page. Fetching is the data layer's
    /// job; the engine never retries on its own.
    fn retry(&mut self, index: usize) {
        let _ = index;
    }
}

/// Application lifecycle states relevant to gesture handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppLifecycle {
    /// Foreground and receiving input.
    Active,
    /// Visible but not receiving input (system overlay, incoming call).
    Inactive,
    /// Not visible.
    Background,
}

/// Source of application lifecycle changes, injected at construction.
pub trait LifecycleNotifier {
    /// Called once by the engine when it is constructed.
    fn subscribe(&mut self) {}

    /// Next pending lifecycle change, if any. Drained on every frame.
    fn next_change(&mut self) -> Option<AppLifecycle>;
}

/// A notifier that never reports changes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLifecycle;

impl LifecycleNotifier for NoLifecycle {
    fn next_change(&mut self) -> Option<AppLifecycle> {
        None
    }
}
