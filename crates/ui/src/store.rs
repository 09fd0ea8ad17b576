//! Element store and reconciler
//!
//! The store owns every live [`Element`] in a fixed table of
//! [`MAX_ELEMENTS`] slots. Slot index is z-order: touches are hit-tested
//! from the highest occupied slot down, and a full redraw paints in
//! ascending slot order so higher slots end up on top. Replacements keep
//! their slot; new elements take the first free one.
//!
//! Reconciling a snapshot never touches the framebuffer. It appends
//! [`Action`]s to a FIFO queue; [`ElementStore::flush`] executes them in
//! order and blits the framebuffer to the panel once at the end.

use alloc::vec::Vec;

use heapless::Deque;
use serde_json::Value;
use tracing::{debug, info, warn};

use platform::config::MAX_ELEMENTS;
use platform::{EpdPanel, TouchPoint};

use crate::bitmap::ImageSource;
use crate::display_mode::DisplayMode;
use crate::element::{execute_clear, Element};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::refresh::RefreshTier;
use crate::touch::{CallbackDispatcher, TouchHit};

/// Actions the queue can hold before a pass degrades to a full redraw.
#[allow(clippy::arithmetic_side_effects)] // constant
pub const QUEUE_CAPACITY: usize = 4 * MAX_ELEMENTS;

/// One unit of pending render work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Flash `area` with `tier` cycles, then reset it to the background.
    Clear {
        /// Element the area belonged to
        id: u16,
        /// Region to erase, already padded and clipped
        area: Rect,
        /// Flash cycles; `NoRefresh` is framebuffer-only
        tier: RefreshTier,
    },
    /// Render the element currently stored under `id`.
    Draw {
        /// Element to draw
        id: u16,
    },
}

impl Action {
    /// Element this action refers to
    #[must_use]
    pub const fn id(&self) -> u16 {
        match self {
            Self::Clear { id, .. } | Self::Draw { id } => *id,
        }
    }
}

/// Outcome of one [`ElementStore::process_elements`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReconcileReport {
    /// New ids stored
    pub added: usize,
    /// Existing ids whose description changed
    pub replaced: usize,
    /// Ids missing from the snapshot and dropped
    pub removed: usize,
    /// Ids present with identical descriptions
    pub unchanged: usize,
    /// Entries that failed to parse
    pub rejected: usize,
    /// New entries dropped because every slot was taken
    pub skipped: usize,
}

impl ReconcileReport {
    /// `true` if anything on screen has to change.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.added > 0 || self.replaced > 0 || self.removed > 0
    }
}

/// Outcome of one [`ElementStore::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    /// Clear actions executed
    pub cleared: usize,
    /// Elements drawn successfully
    pub drawn: usize,
    /// Draws that failed (image unavailable, off-screen, ...)
    pub failed: usize,
    /// Draw actions whose element no longer exists
    pub stale: usize,
    /// The framebuffer was sent to the panel
    pub blitted: bool,
    /// The queue had overflowed and the screen was rebuilt
    pub rebuilt: bool,
}

/// Fixed-capacity element table plus the pending action queue.
pub struct ElementStore {
    slots: Vec<Option<Element>>,
    count: usize,
    queue: Deque<Action, QUEUE_CAPACITY>,
    overflowed: bool,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    /// Empty store with [`MAX_ELEMENTS`] free slots.
    #[must_use]
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(MAX_ELEMENTS);
        slots.resize_with(MAX_ELEMENTS, || None);
        Self { slots, count: 0, queue: Deque::new(), overflowed: false }
    }

    /// Live element count
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// `true` if no element is stored
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `true` if every slot is taken
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.count >= MAX_ELEMENTS
    }

    /// Element stored under `id`
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&Element> {
        self.iter().find(|e| e.id() == id)
    }

    /// Live elements in slot (z) order, bottom first
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.slots.iter().flatten()
    }

    /// Number of queued actions
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queued actions in execution order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.queue.iter()
    }

    /// `true` if an action was dropped since the last flush
    #[must_use]
    pub const fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Drop all queued actions without executing them.
    pub fn discard_pending(&mut self) {
        self.queue.clear();
        self.overflowed = false;
    }

    fn slot_of(&self, id: u16) -> Option<usize> {
        self.slots.iter().position(|s| s.as_ref().is_some_and(|e| e.id() == id))
    }

    fn enqueue(&mut self, action: Action) {
        if self.queue.push_back(action).is_err() {
            if !self.overflowed {
                warn!(capacity = QUEUE_CAPACITY, "action queue full, next flush rebuilds the screen");
            }
            self.overflowed = true;
        }
    }

    /// Reconcile the store against a full snapshot of element descriptions.
    ///
    /// Matching is by `id`. New ids get a draw; changed ids get a clear of
    /// the old area followed by a draw of the replacement in the same slot;
    /// ids missing from the snapshot get a clear and are dropped. Unchanged
    /// ids queue nothing. Malformed entries and entries that find no free
    /// slot are logged and skipped.
    ///
    /// `escalation` raises the flash tier of every clear queued by this pass.
    pub fn process_elements(&mut self, elements: &[Value], escalation: RefreshTier) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for element in self.slots.iter_mut().flatten() {
            element.set_updated(false);
        }

        for value in elements {
            let mut incoming = match Element::from_json(value) {
                Ok(element) => element,
                Err(e) => {
                    warn!(error = %e, "skipping element");
                    report.rejected = report.rejected.saturating_add(1);
                    continue;
                }
            };
            let id = incoming.id();

            if let Some(index) = self.slot_of(id) {
                let Some(slot) = self.slots.get_mut(index) else { continue };
                let Some(current) = slot.as_mut() else { continue };
                if current.is_equal(&incoming) {
                    current.set_updated(true);
                    report.unchanged = report.unchanged.saturating_add(1);
                    continue;
                }
                let tier = RefreshTier::Partial.max(escalation);
                let area = current.clear_region();
                incoming.set_refresh_tier(tier);
                *slot = Some(incoming);
                debug!(id, tier = tier.as_str(), "element replaced");
                self.enqueue(Action::Clear { id, area, tier });
                self.enqueue(Action::Draw { id });
                report.replaced = report.replaced.saturating_add(1);
                continue;
            }

            let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) else {
                warn!(id, max = MAX_ELEMENTS, "no free slots, element dropped");
                report.skipped = report.skipped.saturating_add(1);
                continue;
            };
            incoming.set_refresh_tier(RefreshTier::Fast.max(escalation));
            *slot = Some(incoming);
            self.count = self.count.saturating_add(1);
            debug!(id, "element added");
            self.enqueue(Action::Draw { id });
            report.added = report.added.saturating_add(1);
        }

        let tier = RefreshTier::Partial.max(escalation);
        let mut removals: Vec<(u16, Rect)> = Vec::new();
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|e| !e.is_updated()) {
                if let Some(gone) = slot.take() {
                    removals.push((gone.id(), gone.clear_region()));
                }
            }
        }
        for (id, area) in removals {
            debug!(id, tier = tier.as_str(), "element removed");
            self.count = self.count.saturating_sub(1);
            self.enqueue(Action::Clear { id, area, tier });
            report.removed = report.removed.saturating_add(1);
        }

        info!(
            added = report.added,
            replaced = report.replaced,
            removed = report.removed,
            unchanged = report.unchanged,
            rejected = report.rejected,
            skipped = report.skipped,
            "elements reconciled"
        );
        report
    }

    /// Replace the queue with a draw of every live element, bottom first.
    ///
    /// Used after the framebuffer background has been repainted.
    pub fn redraw_all(&mut self) {
        self.discard_pending();
        let ids: Vec<u16> = self.iter().map(Element::id).collect();
        for id in ids {
            self.enqueue(Action::Draw { id });
        }
    }

    /// Drop every element and every queued action.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
        self.discard_pending();
    }

    /// Topmost element whose bounds contain `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: i32, y: i32) -> Option<&Element> {
        self.slots.iter().rev().flatten().find(|e| e.contains(x, y))
    }

    /// Route a debounced press to the topmost element under it.
    ///
    /// The element is marked touched, its callback runs, and a
    /// framebuffer-only clear plus a draw are queued so the next flush shows
    /// the pressed state. Returns `None` if nothing was hit.
    pub fn handle_touch<D: CallbackDispatcher>(
        &mut self,
        point: TouchPoint,
        mode: &mut DisplayMode,
        dispatcher: &mut D,
    ) -> Option<TouchHit> {
        let (x, y) = (i32::from(point.x), i32::from(point.y));
        let index = self.slots.iter().rposition(|s| s.as_ref().is_some_and(|e| e.contains(x, y)))?;
        let element = self.slots.get_mut(index)?.as_mut()?;
        element.set_touched(true);
        let callback_ok = element.execute_callback(mode, dispatcher);
        let (id, area) = (element.id(), element.clear_region());
        info!(id, x, y, callback_ok, "element touched");
        self.enqueue(Action::Clear { id, area, tier: RefreshTier::NoRefresh });
        self.enqueue(Action::Draw { id });
        Some(TouchHit { id, callback_ok })
    }

    /// Reset every touched element and queue its restore draw.
    pub fn release_touched(&mut self) -> usize {
        let mut released: Vec<(u16, Rect)> = Vec::new();
        for element in self.slots.iter_mut().flatten().filter(|e| e.is_touched()) {
            element.set_touched(false);
            released.push((element.id(), element.clear_region()));
        }
        let count = released.len();
        for (id, area) in released {
            self.enqueue(Action::Clear { id, area, tier: RefreshTier::NoRefresh });
            self.enqueue(Action::Draw { id });
        }
        count
    }

    /// Execute queued actions in FIFO order and blit once.
    ///
    /// Clears flash the panel (unless framebuffer-only) and reset their
    /// area to the background. Draws render the element currently stored
    /// under the action's id; a failed draw is logged and skipped. If at
    /// least one draw succeeded the whole framebuffer is sent to the panel.
    ///
    /// After a queue overflow the framebuffer is repainted and every live
    /// element redrawn instead. A panel error aborts the flush and schedules
    /// that same rebuild for the next one.
    pub async fn flush<P: EpdPanel, I: ImageSource>(
        &mut self,
        fb: &mut Framebuffer,
        mode: &DisplayMode,
        panel: &mut P,
        images: &mut I,
    ) -> Result<DrainReport, P::Error> {
        let mut report = DrainReport::default();
        if self.overflowed {
            warn!("rebuilding screen after queue overflow");
            self.redraw_all();
            fb.fill(mode.background());
            report.rebuilt = true;
        }
        if self.queue.is_empty() {
            return Ok(report);
        }

        panel.power_on().await?;
        let drained = self.drain(fb, mode, panel, images, &mut report).await;
        let powered_off = panel.power_off().await;
        if let Err(e) = drained {
            self.queue.clear();
            self.overflowed = true;
            return Err(e);
        }
        powered_off?;

        debug!(
            cleared = report.cleared,
            drawn = report.drawn,
            failed = report.failed,
            stale = report.stale,
            blitted = report.blitted,
            "queue drained"
        );
        Ok(report)
    }

    async fn drain<P: EpdPanel, I: ImageSource>(
        &mut self,
        fb: &mut Framebuffer,
        mode: &DisplayMode,
        panel: &mut P,
        images: &mut I,
        report: &mut DrainReport,
    ) -> Result<(), P::Error> {
        while let Some(action) = self.queue.pop_front() {
            match action {
                Action::Clear { id, area, tier } => {
                    debug!(id, tier = tier.as_str(), "clearing area");
                    execute_clear(fb, mode, panel, area, tier).await?;
                    report.cleared = report.cleared.saturating_add(1);
                }
                Action::Draw { id } => {
                    let Some(element) = self.slots.iter_mut().flatten().find(|e| e.id() == id) else {
                        debug!(id, "draw for missing element skipped");
                        report.stale = report.stale.saturating_add(1);
                        continue;
                    };
                    match element.draw(fb, mode, images).await {
                        Ok(_) => report.drawn = report.drawn.saturating_add(1),
                        Err(e) => {
                            warn!(id, error = %e, "element draw failed");
                            report.failed = report.failed.saturating_add(1);
                        }
                    }
                }
            }
        }
        if report.drawn > 0 || report.rebuilt {
            panel.draw_grayscale(Rect::full_screen().into(), fb.as_bytes()).await?;
            report.blitted = true;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::bitmap::NoImages;
    use crate::touch::NoCallbacks;
    use alloc::vec;
    use platform::mocks::{MockPanel, PanelOp};
    use serde_json::json;

    fn text(id: u16, label: &str, x: i16, y: i16) -> Value {
        json!({ "type": "text", "id": id, "text": label, "x": x, "y": y, "anchor": "tl", "level": 1 })
    }

    fn ids(store: &ElementStore) -> Vec<u16> {
        store.iter().map(Element::id).collect()
    }

    #[test]
    fn new_elements_queue_draw_only() {
        let mut store = ElementStore::new();
        let report = store.process_elements(&[text(1, "a", 0, 0), text(2, "b", 50, 0)], RefreshTier::NoRefresh);
        assert_eq!(report.added, 2);
        assert!(report.changed());
        assert_eq!(store.actions().copied().collect::<Vec<_>>(), vec![
            Action::Draw { id: 1 },
            Action::Draw { id: 2 }
        ]);
        assert_eq!(store.get(1).unwrap().refresh_tier(), RefreshTier::Fast);
    }

    #[test]
    fn identical_snapshot_queues_nothing() {
        let mut store = ElementStore::new();
        let snapshot = [text(1, "a", 0, 0)];
        store.process_elements(&snapshot, RefreshTier::NoRefresh);
        store.discard_pending();
        let report = store.process_elements(&snapshot, RefreshTier::NoRefresh);
        assert!(!report.changed());
        assert_eq!(report.unchanged, 1);
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn replacement_keeps_slot_and_clears_old_area() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "a", 0, 0), text(2, "b", 100, 100)], RefreshTier::NoRefresh);
        let old_area = store.get(1).unwrap().clear_region();
        store.discard_pending();

        let report = store.process_elements(&[text(1, "a", 300, 300), text(2, "b", 100, 100)], RefreshTier::NoRefresh);
        assert_eq!(report.replaced, 1);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.actions().copied().collect::<Vec<_>>(), vec![
            Action::Clear { id: 1, area: old_area, tier: RefreshTier::Partial },
            Action::Draw { id: 1 }
        ]);
    }

    #[test]
    fn omitted_elements_are_removed() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "a", 0, 0), text(2, "b", 100, 0)], RefreshTier::NoRefresh);
        store.discard_pending();
        let report = store.process_elements(&[text(2, "b", 100, 0)], RefreshTier::NoRefresh);
        assert_eq!(report.removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert!(matches!(store.actions().next(), Some(Action::Clear { id: 1, .. })));
    }

    #[test]
    fn escalation_raises_every_tier() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "a", 0, 0), text(2, "b", 100, 0)], RefreshTier::NoRefresh);
        store.discard_pending();
        store.process_elements(&[text(1, "z", 0, 0), text(3, "c", 200, 0)], RefreshTier::Complete);
        for action in store.actions() {
            if let Action::Clear { tier, .. } = action {
                assert_eq!(*tier, RefreshTier::Complete);
            }
        }
        assert_eq!(store.get(3).unwrap().refresh_tier(), RefreshTier::Complete);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let mut store = ElementStore::new();
        let report = store.process_elements(
            &[json!({ "type": "text", "id": 1 }), json!(null), text(2, "ok", 0, 0)],
            RefreshTier::NoRefresh,
        );
        assert_eq!(report.rejected, 2);
        assert_eq!(ids(&store), vec![2]);
    }

    #[test]
    fn full_table_rejects_new_ids() {
        let mut store = ElementStore::new();
        let many: Vec<Value> = (1..=60).map(|id| text(id, "x", 0, 0)).collect();
        let report = store.process_elements(&many, RefreshTier::NoRefresh);
        assert_eq!(report.added, MAX_ELEMENTS);
        assert_eq!(report.skipped, 10);
        assert!(store.is_full());
        assert!(store.get(51).is_none());
    }

    #[test]
    fn freed_slot_is_reused_first() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "a", 0, 0), text(2, "b", 0, 0), text(3, "c", 0, 0)], RefreshTier::NoRefresh);
        store.process_elements(&[text(1, "a", 0, 0), text(3, "c", 0, 0)], RefreshTier::NoRefresh);
        store.process_elements(&[text(3, "c", 0, 0), text(4, "d", 0, 0), text(1, "a", 0, 0)], RefreshTier::NoRefresh);
        assert_eq!(ids(&store), vec![1, 4, 3]);
    }

    #[test]
    fn hit_test_prefers_highest_slot() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "long label", 0, 0), text(2, "top", 0, 0)], RefreshTier::NoRefresh);
        assert_eq!(store.hit_test(5, 5).map(Element::id), Some(2));
        assert_eq!(store.hit_test(60, 5).map(Element::id), Some(1));
        assert!(store.hit_test(500, 500).is_none());
    }

    #[test]
    fn touch_marks_element_and_queues_feedback() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "a", 10, 10)], RefreshTier::NoRefresh);
        store.discard_pending();
        let mut mode = DisplayMode::default();

        let hit = store.handle_touch(TouchPoint::new(12, 12), &mut mode, &mut NoCallbacks).unwrap();
        assert_eq!(hit, TouchHit { id: 1, callback_ok: false });
        assert!(store.get(1).unwrap().is_touched());
        let actions: Vec<Action> = store.actions().copied().collect();
        assert!(matches!(actions[0], Action::Clear { id: 1, tier: RefreshTier::NoRefresh, .. }));
        assert_eq!(actions[1], Action::Draw { id: 1 });

        store.discard_pending();
        assert_eq!(store.release_touched(), 1);
        assert!(!store.get(1).unwrap().is_touched());
        assert_eq!(store.pending(), 2);
        assert!(store.handle_touch(TouchPoint::new(900, 500), &mut mode, &mut NoCallbacks).is_none());
    }

    #[tokio::test]
    async fn flush_blits_once_for_many_draws() {
        let mut store = ElementStore::new();
        let mode = DisplayMode::default();
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        store.process_elements(&[text(1, "a", 0, 0), text(2, "b", 100, 0), text(3, "c", 200, 0)], RefreshTier::NoRefresh);

        let report = store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        assert_eq!(report.drawn, 3);
        assert!(report.blitted);
        assert_eq!(panel.draw_count(), 1);
        assert_eq!(panel.ops().first(), Some(&PanelOp::PowerOn));
        assert_eq!(panel.ops().last(), Some(&PanelOp::PowerOff));
        assert_eq!(store.pending(), 0);
        assert!(store.iter().all(Element::is_active));
    }

    #[tokio::test]
    async fn flush_with_empty_queue_leaves_panel_alone() {
        let mut store = ElementStore::new();
        let mode = DisplayMode::default();
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        let report = store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        assert_eq!(report, DrainReport::default());
        assert!(panel.ops().is_empty());
    }

    #[tokio::test]
    async fn removal_only_flush_flashes_without_blit() {
        let mut store = ElementStore::new();
        let mode = DisplayMode::default();
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        store.process_elements(&[text(1, "a", 0, 0)], RefreshTier::NoRefresh);
        store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        panel.clear();

        store.process_elements(&[], RefreshTier::NoRefresh);
        let report = store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        assert_eq!(report.cleared, 1);
        assert!(!report.blitted);
        assert_eq!(panel.draw_count(), 0);
        assert!(panel.push_count() > 0);
        assert!(fb.as_bytes().iter().all(|&b| b == 0xFF));
    }

    #[tokio::test]
    async fn failed_draw_does_not_block_the_rest() {
        let mut store = ElementStore::new();
        let mode = DisplayMode::default();
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        let image = json!({
            "type": "image", "id": 5, "name": "bell", "endpoint": "icon",
            "width": 16, "height": 16, "x": 0, "y": 0, "anchor": "tl"
        });
        store.process_elements(&[image, text(6, "ok", 100, 100)], RefreshTier::NoRefresh);
        let report = store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        assert_eq!((report.drawn, report.failed), (1, 1));
        assert_eq!(panel.draw_count(), 1);
    }

    #[tokio::test]
    async fn panel_error_schedules_rebuild() {
        let mut store = ElementStore::new();
        let mode = DisplayMode::default();
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        panel.fail_draws();
        store.process_elements(&[text(1, "a", 0, 0)], RefreshTier::NoRefresh);
        assert!(store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.is_err());
        assert!(store.overflowed());

        let mut panel = MockPanel::new();
        let report = store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        assert!(report.rebuilt);
        assert_eq!(report.drawn, 1);
        assert!(!store.overflowed());
    }

    #[tokio::test]
    async fn overflow_rebuilds_every_live_element() {
        let mut store = ElementStore::new();
        let mode = DisplayMode::default();
        let mut fb = Framebuffer::new(mode.background());
        let mut panel = MockPanel::new();
        let many: Vec<Value> = (1..=MAX_ELEMENTS as u16).map(|id| text(id, "x", 0, 0)).collect();
        store.process_elements(&many, RefreshTier::NoRefresh);
        let mut callbacks = NoCallbacks;
        let mut mode_mut = mode;
        while !store.overflowed() {
            store.release_touched();
            store.handle_touch(TouchPoint::new(1, 1), &mut mode_mut, &mut callbacks);
        }
        let report = store.flush(&mut fb, &mode, &mut panel, &mut NoImages).await.unwrap();
        assert!(report.rebuilt);
        assert_eq!(report.drawn, MAX_ELEMENTS);
        assert_eq!(report.cleared, 0);
        assert_eq!(panel.draw_count(), 1);
    }

    #[test]
    fn clear_all_empties_everything() {
        let mut store = ElementStore::new();
        store.process_elements(&[text(1, "a", 0, 0)], RefreshTier::NoRefresh);
        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.pending(), 0);
    }
}
