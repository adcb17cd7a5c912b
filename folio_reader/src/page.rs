// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Position within a fixed-length run of pages.
///
/// The cursor is independent of the continuous transform; the engine resets
/// the transform whenever the cursor moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PageCursor {
    current: usize,
    total: usize,
}

impl PageCursor {
    /// Creates a cursor at `current`, clamped into `0..total`.
    #[must_use]
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            current: current.min(total.saturating_sub(1)),
            total,
        }
    }

    /// Index of the current page.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of pages.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if there are no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns `true` if a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total
    }

    /// Returns `true` if a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current > 0 && self.total > 0
    }

    /// Moves forward one page. Returns the new index, or `None` at the last page.
    pub fn next(&mut self) -> Option<usize> {
        if !self.has_next() {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    /// Moves back one page. Returns the new index, or `None` at the first page.
    pub fn previous(&mut self) -> Option<usize> {
        if !self.has_previous() {
            return None;
        }
        self.current -= 1;
        Some(self.current)
    }

    /// Jumps to `index`. Returns the new index, or `None` if `index` is out
    /// of range or already current.
    pub fn go_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.total || index == self.current {
            return None;
        }
        self.current = index;
        Some(index)
    }

    /// Changes the page count. Returns the new index if clamping moved the
    /// cursor.
    pub fn set_total(&mut self, total: usize) -> Option<usize> {
        self.total = total;
        let clamped = self.current.min(total.saturating_sub(1));
        if clamped == self.current {
            return None;
        }
        self.current = clamped;
        Some(clamped)
    }
}

/// What the data layer knows about one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageContent<I> {
    /// The image is available.
    Ready(I),
    /// The data layer is still fetching.
    Loading,
    /// The page has no image. Terminal for this page; not retried.
    Unavailable,
    /// Fetching failed upstream.
    Failed {
        /// Human-readable failure description.
        message: String,
    },
}

impl<I> PageContent<I> {
    /// Builds content from an availability flag and an optional image handle.
    ///
    /// A page marked available without a handle is reported as unavailable.
    #[must_use]
    pub fn from_availability(image_available: bool, image: Option<I>) -> Self {
        match (image_available, image) {
            (true, Some(image)) => Self::Ready(image),
            _ => Self::Unavailable,
        }
    }

    /// Returns `true` for [`PageContent::Ready`].
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// What the rendering surface should show for the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView<I> {
    /// Draw this image under the current transform.
    Image(I),
    /// Loading placeholder.
    Loading,
    /// The "page not available" terminal state.
    NotAvailable,
    /// Dismissible error with a retry affordance.
    Error {
        /// Human-readable failure description.
        message: String,
    },
    /// Nothing to show: there are no pages, or the error was dismissed.
    Empty,
}

#[cfg(test)]
mod tests {
    use super::{PageContent, PageCursor};

    #[test]
    fn next_stops_at_last_page() {
        let mut c = PageCursor::new(0, 3);
        assert_eq!(c.next(), Some(1));
        assert_eq!(c.next(), Some(2));
        assert_eq!(c.next(), None);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn previous_stops_at_first_page() {
        let mut c = PageCursor::new(1, 3);
        assert_eq!(c.previous(), Some(0));
        assert_eq!(c.previous(), None);
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn empty_cursor_never_moves() {
        let mut c = PageCursor::new(5, 0);
        assert!(c.is_empty());
        assert_eq!(c.current(), 0);
        assert_eq!(c.next(), None);
        assert_eq!(c.previous(), None);
        assert_eq!(c.go_to(0), None);
    }

    #[test]
    fn go_to_rejects_current_and_out_of_range() {
        let mut c = PageCursor::new(1, 3);
        assert_eq!(c.go_to(1), None);
        assert_eq!(c.go_to(3), None);
        assert_eq!(c.go_to(2), Some(2));
    }

    #[test]
    fn shrinking_total_clamps_cursor() {
        let mut c = PageCursor::new(4, 5);
        assert_eq!(c.set_total(10), None);
        assert_eq!(c.set_total(2), Some(1));
        assert_eq!(c.current(), 1);
    }

    #[test]
    fn availability_flag_maps_to_content() {
        assert_eq!(PageContent::from_availability(true, Some(7)), PageContent::Ready(7));
        assert_eq!(PageContent::<u32>::from_availability(true, None), PageContent::Unavailable);
        assert_eq!(PageContent::from_availability(false, Some(7)), PageContent::Unavailable);
    }
}
