//! Incremental multi-select controller.
//!
//! # Design
//! `MultiSelect` is the state machine behind a scroll-fed multi-select form
//! field: it grows a local buffer of options page by page, tracks the
//! selected subset, and pushes the selection and a single field-level error
//! through an injected [`SelectionSink`].
//!
//! Like the rest of the core it never performs I/O. Trigger methods return a
//! [`FetchCommand`] describing the page to load; the host runs the round
//! trip and feeds the outcome back through `fetch_succeeded` /
//! `fetch_failed`. Each command carries the controller's generation at issue
//! time; a completion whose generation no longer matches (the field was
//! re-mounted mid-flight) is discarded rather than applied.
//!
//! The `loading` flag is the sole mutual exclusion. It is raised in the same
//! turn a command is issued, and trigger signals arriving while it is raised
//! are dropped, not queued — the scroll listener re-fires continuously while
//! the bottom edge is visible. A hung request leaves `loading` raised
//! indefinitely; that surfaces as a frozen loading indicator.

use crate::domain::{Page, SelectableItem};
use crate::error::ApiError;

const SELECTION_REQUIRED: &str = "at least one selection is required";

/// Instruction to the host: fetch one page of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCommand {
    pub generation: u64,
    pub page_size: u32,
    pub page_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field requires at least one selected item.
    SelectionRequired,
    /// A page fetch failed; shown inline on the field, retried on the next
    /// scroll trigger.
    FetchFailed,
}

/// The single error attached to the bound field, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

/// Consumer of controller output: the bound form field.
///
/// `selection_changed` receives the full selection in toggle order on every
/// toggle. `error_changed` receives the field's current error — at most one
/// at a time — or `None` when it clears.
pub trait SelectionSink {
    fn selection_changed(&mut self, selected: &[SelectableItem]);
    fn error_changed(&mut self, error: Option<&FieldError>);
}

/// Scroll-fed paginated multi-select state. One instance per bound field;
/// nothing is shared across instances.
#[derive(Debug)]
pub struct MultiSelect {
    page_size: u32,
    /// Next page number to request, 1-indexed. Monotonic, and its own
    /// counter rather than `buffer.len() / page_size`, so pages with
    /// irregular sizes cannot skew the request sequence.
    cursor: u32,
    /// Options in fetch order, append-only. Not de-duplicated by id: if the
    /// server-side collection shifts between pages, duplicates survive here.
    buffer: Vec<SelectableItem>,
    /// Selected items in toggle order, not buffer order. Independent of
    /// buffer membership.
    selected: Vec<SelectableItem>,
    loading: bool,
    exhausted: bool,
    /// Bumped on every (re)mount; completions tagged with an older value are
    /// discarded.
    generation: u64,
    error: Option<FieldError>,
}

impl MultiSelect {
    /// A controller with a fixed page size, not yet mounted. No fetch is
    /// issued until [`MultiSelect::mount`].
    pub fn new(page_size: u32) -> Self {
        MultiSelect {
            page_size,
            cursor: 1,
            buffer: Vec::new(),
            selected: Vec::new(),
            loading: false,
            exhausted: false,
            generation: 0,
            error: None,
        }
    }

    /// Reset to initial state and eagerly request the first page.
    ///
    /// Called when the bound field mounts and again whenever its fetch source
    /// changes identity; either way all accumulated state is discarded and
    /// in-flight completions from before the call become stale.
    pub fn mount(&mut self) -> FetchCommand {
        self.generation += 1;
        self.cursor = 1;
        self.buffer.clear();
        self.selected.clear();
        self.exhausted = false;
        self.error = None;
        self.loading = true;
        FetchCommand {
            generation: self.generation,
            page_size: self.page_size,
            page_number: self.cursor,
        }
    }

    /// The presentation layer reports the user scrolled within one viewport
    /// of the end of the rendered list.
    ///
    /// While a fetch is in flight or the collection is exhausted the signal
    /// is coalesced: dropped with no state change, never queued for replay.
    pub fn scroll_near_bottom(&mut self) -> Option<FetchCommand> {
        if self.loading || self.exhausted {
            return None;
        }
        self.loading = true;
        Some(FetchCommand {
            generation: self.generation,
            page_size: self.page_size,
            page_number: self.cursor,
        })
    }

    /// Apply a successful page fetch.
    ///
    /// Stale generations are ignored. Items append to the buffer in fetch
    /// order without de-duplication, the cursor advances by one, and the
    /// collection is exhausted once the page reports itself last. A fetch
    /// error previously attached to the field clears.
    pub fn fetch_succeeded(
        &mut self,
        generation: u64,
        page: Page<SelectableItem>,
        sink: &mut dyn SelectionSink,
    ) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        self.exhausted = page.is_last();
        self.cursor += 1;
        self.buffer.extend(page.items);
        if matches!(
            self.error,
            Some(FieldError {
                kind: FieldErrorKind::FetchFailed,
                ..
            })
        ) {
            self.error = None;
            sink.error_changed(None);
        }
    }

    /// Apply a failed page fetch.
    ///
    /// Stale generations are ignored. The cursor and buffer stay untouched,
    /// so the next scroll trigger re-requests the same page; the failure is
    /// reported as the field's error.
    pub fn fetch_failed(
        &mut self,
        generation: u64,
        error: &ApiError,
        sink: &mut dyn SelectionSink,
    ) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        self.error = Some(FieldError {
            kind: FieldErrorKind::FetchFailed,
            message: error.to_string(),
        });
        sink.error_changed(self.error.as_ref());
    }

    /// Toggle an item in or out of the selection, by id.
    ///
    /// The sink is notified with the full toggle-ordered selection on every
    /// call, then validation re-runs.
    pub fn toggle(&mut self, item: SelectableItem, sink: &mut dyn SelectionSink) {
        match self.selected.iter().position(|s| s.id == item.id) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(item),
        }
        sink.selection_changed(&self.selected);
        self.validate(sink);
    }

    /// Require at least one selected item.
    ///
    /// Attaches the selection-required error only when the selection is
    /// empty and no error is already attached, and clears it only when the
    /// selection becomes non-empty — at most one error per field, and
    /// repeated passes never stack duplicates.
    pub fn validate(&mut self, sink: &mut dyn SelectionSink) {
        if self.selected.is_empty() {
            if self.error.is_none() {
                self.error = Some(FieldError {
                    kind: FieldErrorKind::SelectionRequired,
                    message: SELECTION_REQUIRED.to_string(),
                });
                sink.error_changed(self.error.as_ref());
            }
        } else if matches!(
            self.error,
            Some(FieldError {
                kind: FieldErrorKind::SelectionRequired,
                ..
            })
        ) {
            self.error = None;
            sink.error_changed(None);
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The next page number a trigger would request.
    pub fn next_page(&self) -> u32 {
        self.cursor
    }

    /// All fetched options, in fetch order.
    pub fn items(&self) -> &[SelectableItem] {
        &self.buffer
    }

    /// Current selection, in toggle order.
    pub fn selected(&self) -> &[SelectableItem] {
        &self.selected
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }
}
