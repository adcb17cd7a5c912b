// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the Folio demos: a logging host, an in-memory
//! book, and subscriber setup.

use folio_reader::{HapticIntensity, PageContent, PageSource, ReaderHost};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber. `RUST_LOG` overrides the default filter,
/// which shows the engine's discrete transitions.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio_reader=debug,folio_gesture=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// A host that logs every callback.
#[derive(Debug, Default)]
pub struct LoggingHost {
    /// Number of chrome toggles seen.
    pub chrome_toggles: usize,
    /// Whether the reader asked to close.
    pub closed: bool,
}

impl ReaderHost for LoggingHost {
    fn on_page_change(&mut self, index: usize) {
        info!(index, "host: page change");
    }

    fn on_close(&mut self) {
        info!("host: close");
        self.closed = true;
    }

    fn on_toggle_chrome(&mut self) {
        self.chrome_toggles += 1;
        info!(count = self.chrome_toggles, "host: toggle chrome");
    }

    fn on_haptic(&mut self, intensity: HapticIntensity) {
        info!(?intensity, "host: haptic");
    }
}

/// An in-memory yearbook whose pages are image paths.
#[derive(Debug)]
pub struct Book {
    pages: Vec<PageContent<String>>,
}

impl Book {
    /// A book with `count` ready pages.
    pub fn with_pages(count: usize) -> Self {
        Self {
            pages: (0..count)
                .map(|i| PageContent::Ready(format!("pages/{i:03}.jpg")))
                .collect(),
        }
    }

    /// Replaces the content of page `index`.
    pub fn set_page(&mut self, index: usize, content: PageContent<String>) {
        if let Some(page) = self.pages.get_mut(index) {
            *page = content;
        }
    }
}

impl PageSource for Book {
    type Image = String;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> PageContent<String> {
        self.pages
            .get(index)
            .cloned()
            .unwrap_or(PageContent::Unavailable)
    }

    fn retry(&mut self, index: usize) {
        info!(index, "book: retry requested");
        if let Some(page @ PageContent::Failed { .. }) = self.pages.get_mut(index) {
            *page = PageContent::Loading;
        }
    }
}
