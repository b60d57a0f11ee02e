//! Live shape registry
//!
//! Holds every shape currently on screen, in insertion order. The registry
//! is the only owner of the visual handles: a handle is destroyed exactly
//! once, when its record is reaped, evicted, deduplicated, or cleared.
//!
//! ```text
//! insert ──▶ dedup by cell ──▶ evict oldest while full ──▶ append
//! tick   ──▶ advance + apply every record ──▶ reap completed (back to front)
//! ```

use std::collections::VecDeque;

use tessel_core::Size;

use crate::envelope::{evaluate, ShapeParams, ShapeTransform};

/// Default population bound
pub const MAX_LIVE: usize = 12;
/// Default shape lifetime in seconds
pub const DEFAULT_LIFETIME: f32 = 1.0;

/// A drawable owned by the registry
///
/// `destroy` consumes the handle, so a destroyed handle can never be
/// touched again.
pub trait VisualHandle {
    /// Push this frame's transform to the visual
    fn apply(&mut self, transform: &ShapeTransform);

    /// Remove the visual from the display
    fn destroy(self);
}

/// One live shape
#[derive(Debug)]
pub struct ShapeRecord<H> {
    pub handle: H,
    /// Originating cell; `None` for ambient shapes, which never dedup
    pub cell: Option<usize>,
    /// Seconds since spawn
    pub elapsed: f32,
    pub params: ShapeParams,
}

impl<H> ShapeRecord<H> {
    pub fn new(handle: H, cell: Option<usize>, params: ShapeParams) -> Self {
        Self {
            handle,
            cell,
            elapsed: 0.0,
            params,
        }
    }

    /// Normalized time for a given lifetime, clamped to 1
    pub fn progress(&self, lifetime: f32) -> f32 {
        (self.elapsed / lifetime).min(1.0)
    }
}

/// What an insert displaced
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Set when a live shape for the same cell was replaced
    pub restarted: Option<usize>,
    /// Cells of records evicted to make room, oldest first
    pub evicted: Vec<Option<usize>>,
}

/// What a tick did
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Records that received a transform
    pub animated: usize,
    /// Cells of records that completed and were removed, oldest first
    pub reaped: Vec<Option<usize>>,
}

/// Ordered set of live shapes with a population bound
#[derive(Debug)]
pub struct ShapeRegistry<H: VisualHandle> {
    records: VecDeque<ShapeRecord<H>>,
    max_live: usize,
    lifetime: f32,
}

impl<H: VisualHandle> ShapeRegistry<H> {
    pub fn new() -> Self {
        Self::with_limits(MAX_LIVE, DEFAULT_LIFETIME)
    }

    /// A registry holding at most `max_live` shapes (at least one), each
    /// living `lifetime` seconds
    pub fn with_limits(max_live: usize, lifetime: f32) -> Self {
        let max_live = max_live.max(1);
        Self {
            records: VecDeque::with_capacity(max_live),
            max_live,
            lifetime: lifetime.max(f32::EPSILON),
        }
    }

    pub fn max_live(&self) -> usize {
        self.max_live
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ShapeRecord<H>> {
        self.records.iter()
    }

    /// Cells of live records, oldest first
    pub fn cells(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.records.iter().map(|record| record.cell)
    }

    pub fn contains_cell(&self, cell: usize) -> bool {
        self.records.iter().any(|record| record.cell == Some(cell))
    }

    /// Insert a new shape.
    ///
    /// A live record for the same cell is destroyed first (restart, never
    /// stack). Then the oldest records are evicted until there is room.
    pub fn insert(&mut self, record: ShapeRecord<H>) -> InsertOutcome {
        let mut outcome = InsertOutcome::default();

        if let Some(cell) = record.cell {
            let prior = self
                .records
                .iter()
                .position(|live| live.cell == Some(cell))
                .and_then(|pos| self.records.remove(pos));
            if let Some(prior) = prior {
                tracing::debug!(cell, elapsed = prior.elapsed, "restarting shape");
                prior.handle.destroy();
                outcome.restarted = Some(cell);
            }
        }

        while self.records.len() >= self.max_live {
            let Some(oldest) = self.records.pop_front() else {
                break;
            };
            tracing::debug!(cell = ?oldest.cell, "evicting oldest shape");
            outcome.evicted.push(oldest.cell);
            oldest.handle.destroy();
        }

        self.records.push_back(record);
        outcome
    }

    /// Advance every record by `step` seconds, apply its transform, and
    /// remove the ones that completed.
    ///
    /// `clock` is wall-clock seconds for hold motion.
    pub fn tick(&mut self, step: f32, clock: f32, viewport: Size) -> TickReport {
        let lifetime = self.lifetime;
        let step = step.max(0.0);

        for (slot, record) in self.records.iter_mut().enumerate() {
            record.elapsed += step;
            let transform = evaluate(
                &record.params,
                record.progress(lifetime),
                clock,
                slot,
                viewport,
            );
            record.handle.apply(&transform);
        }

        let mut report = TickReport {
            animated: self.records.len(),
            reaped: Vec::new(),
        };

        // Back to front so removals don't shift unvisited indices
        for index in (0..self.records.len()).rev() {
            if self.records[index].progress(lifetime) < 1.0 {
                continue;
            }
            if let Some(done) = self.records.remove(index) {
                report.reaped.push(done.cell);
                done.handle.destroy();
            }
        }
        report.reaped.reverse();

        if !report.reaped.is_empty() {
            tracing::trace!(reaped = report.reaped.len(), live = self.records.len(), "reaped shapes");
        }
        report
    }

    /// Destroy every live shape
    pub fn clear(&mut self) {
        for record in self.records.drain(..) {
            record.handle.destroy();
        }
    }
}

impl<H: VisualHandle> Default for ShapeRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: VisualHandle> Drop for ShapeRegistry<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tessel_core::Point;

    const VIEWPORT: Size = Size::new(1920.0, 1080.0);

    #[derive(Default)]
    struct Log {
        applied: Vec<u32>,
        destroyed: Vec<u32>,
    }

    struct TestHandle {
        id: u32,
        log: Rc<RefCell<Log>>,
    }

    impl VisualHandle for TestHandle {
        fn apply(&mut self, _transform: &ShapeTransform) {
            self.log.borrow_mut().applied.push(self.id);
        }

        fn destroy(self) {
            self.log.borrow_mut().destroyed.push(self.id);
        }
    }

    struct Fixture {
        log: Rc<RefCell<Log>>,
        next_id: u32,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                log: Rc::new(RefCell::new(Log::default())),
                next_id: 0,
            }
        }

        fn record(&mut self, cell: Option<usize>) -> ShapeRecord<TestHandle> {
            let id = self.next_id;
            self.next_id += 1;
            let handle = TestHandle {
                id,
                log: Rc::clone(&self.log),
            };
            ShapeRecord::new(handle, cell, ShapeParams::new(Point::new(960.0, 540.0)))
        }

        fn destroyed(&self) -> Vec<u32> {
            self.log.borrow().destroyed.clone()
        }
    }

    #[test]
    fn test_dedup_replaces_same_cell() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();

        registry.insert(fx.record(Some(5)));
        registry.tick(0.2, 0.0, VIEWPORT);
        let outcome = registry.insert(fx.record(Some(5)));

        assert_eq!(outcome.restarted, Some(5));
        assert_eq!(registry.len(), 1);
        assert_eq!(fx.destroyed(), vec![0]);

        // Restart resets elapsed
        let live = registry.iter().next().unwrap();
        assert_eq!(live.elapsed, 0.0);
    }

    #[test]
    fn test_ambient_shapes_never_dedup() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();

        registry.insert(fx.record(None));
        let outcome = registry.insert(fx.record(None));

        assert_eq!(outcome.restarted, None);
        assert_eq!(registry.len(), 2);
        assert!(fx.destroyed().is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest_first() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();

        for cell in 0..MAX_LIVE {
            let outcome = registry.insert(fx.record(Some(cell)));
            assert!(outcome.evicted.is_empty());
        }
        assert_eq!(registry.len(), MAX_LIVE);

        let outcome = registry.insert(fx.record(Some(MAX_LIVE)));
        assert_eq!(outcome.evicted, vec![Some(0)]);
        assert_eq!(registry.len(), MAX_LIVE);
        assert_eq!(fx.destroyed(), vec![0]);

        let cells: Vec<_> = registry.cells().collect();
        let expected: Vec<_> = (1..=MAX_LIVE).map(Some).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_dedup_runs_before_eviction() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();

        for cell in 0..MAX_LIVE {
            registry.insert(fx.record(Some(cell)));
        }

        // Re-triggering a live cell at capacity frees its own slot
        let outcome = registry.insert(fx.record(Some(3)));
        assert_eq!(outcome.restarted, Some(3));
        assert!(outcome.evicted.is_empty());
        assert_eq!(registry.len(), MAX_LIVE);
        assert_eq!(registry.cells().last(), Some(Some(3)));
    }

    #[test]
    fn test_completed_records_are_reaped() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();
        registry.insert(fx.record(Some(1)));

        let mut frames = 0;
        while !registry.is_empty() {
            registry.tick(0.016, frames as f32 * 0.016, VIEWPORT);
            frames += 1;
            assert!(frames < 100, "record never completed");
        }

        // 1.0s at 16ms per frame completes on the 63rd tick
        assert_eq!(frames, 63);
        assert_eq!(fx.destroyed(), vec![0]);
        assert_eq!(fx.log.borrow().applied.len(), 63);
    }

    #[test]
    fn test_reap_keeps_order_of_survivors() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();

        registry.insert(fx.record(Some(0)));
        registry.tick(0.5, 0.0, VIEWPORT);
        registry.insert(fx.record(Some(1)));
        registry.tick(0.25, 0.0, VIEWPORT);
        registry.insert(fx.record(Some(2)));

        let report = registry.tick(0.25, 0.0, VIEWPORT);
        assert_eq!(report.animated, 3);
        assert_eq!(report.reaped, vec![Some(0)]);

        let cells: Vec<_> = registry.cells().collect();
        assert_eq!(cells, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_clear_and_drop_destroy_every_handle() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::new();
        registry.insert(fx.record(Some(0)));
        registry.insert(fx.record(Some(1)));
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(fx.destroyed(), vec![0, 1]);

        registry.insert(fx.record(Some(2)));
        drop(registry);
        assert_eq!(fx.destroyed(), vec![0, 1, 2]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut fx = Fixture::new();
        let mut registry = ShapeRegistry::with_limits(0, 1.0);
        registry.insert(fx.record(Some(0)));
        registry.insert(fx.record(Some(1)));
        assert_eq!(registry.max_live(), 1);
        assert_eq!(registry.cells().collect::<Vec<_>>(), vec![Some(1)]);
    }
}
