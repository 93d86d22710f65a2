//! Fixed-capacity counter slot registry.
//!
//! Slots are handed out densely from index 0 and are never freed one by one.
//! [`SlotTable::clear`] is the only way to reclaim them.

use heapless::Vec;

use crate::error::{CounterError, Result};
use crate::trigger::TriggerMode;

/// One configured counter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CounterSlot {
    pub index: u8,
    pub line: u8,
    /// `None` when the configuration byte was unrecognized; the line was never armed.
    pub trigger: Option<TriggerMode>,
    pub interval_ms: u16,
    /// Start of the current reporting window.
    pub last_report_ms: u32,
    pub last_reported: u32,
}

impl CounterSlot {
    /// Milliseconds since the window opened, correct across clock wraparound.
    #[inline]
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_report_ms)
    }

    #[inline]
    pub fn is_due(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) > u32::from(self.interval_ms)
    }

    /// Move the window forward by exactly one interval.
    #[inline]
    pub fn advance_window(&mut self) {
        self.last_report_ms = self.last_report_ms.wrapping_add(u32::from(self.interval_ms));
    }
}

/// Compile-time bound on slot capacity: the report mask has one bit per slot.
pub(crate) struct Capacity<const N: usize>;

impl<const N: usize> Capacity<N> {
    pub(crate) const FITS_MASK: () = assert!(N >= 1 && N <= 8, "report mask holds 1..=8 slots");
}

/// Dense slot registry.
///
/// ```compile_fail
/// // nine slots do not fit a one-byte report mask
/// let _table = edge_counter::SlotTable::<9>::new();
/// ```
pub struct SlotTable<const N: usize> {
    slots: Vec<CounterSlot, N>,
}

impl<const N: usize> SlotTable<N> {
    pub const fn new() -> Self {
        let () = Capacity::<N>::FITS_MASK;
        Self { slots: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Index the next allocation will receive, if any is left.
    #[inline]
    pub fn next_index(&self) -> Option<usize> {
        (!self.is_full()).then_some(self.slots.len())
    }

    /// Append a fresh slot with a zeroed report history.
    pub fn allocate(
        &mut self,
        line: u8,
        trigger: Option<TriggerMode>,
        interval_ms: u16,
        now_ms: u32,
    ) -> Result<usize> {
        let index = self.slots.len();
        let slot = CounterSlot {
            index: index as u8,
            line,
            trigger,
            interval_ms,
            last_report_ms: now_ms,
            last_reported: 0,
        };
        self.slots
            .push(slot)
            .map_err(|_| CounterError::TableFull { capacity: N })?;
        Ok(index)
    }

    /// Restart every window at `now_ms`.
    pub fn resync(&mut self, now_ms: u32) {
        for slot in self.slots.iter_mut() {
            slot.last_report_ms = now_ms;
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&CounterSlot> {
        self.slots.get(index)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, CounterSlot> {
        self.slots.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, CounterSlot> {
        self.slots.iter_mut()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<const N: usize> Default for SlotTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SlotTable;
    use crate::error::CounterError;

    #[test]
    fn allocates_densely_until_full() {
        let mut table = SlotTable::<3>::new();
        for (i, line) in [7u8, 2, 9].into_iter().enumerate() {
            assert_eq!(table.next_index(), Some(i));
            assert_eq!(table.allocate(line, None, 100, 0), Ok(i));
        }

        assert!(table.is_full());
        assert_eq!(table.next_index(), None);
        assert_eq!(
            table.allocate(1, None, 100, 0),
            Err(CounterError::TableFull { capacity: 3 })
        );
        assert_eq!(table.len(), 3);

        let lines: std::vec::Vec<(u8, u8)> = table.iter().map(|s| (s.index, s.line)).collect();
        assert_eq!(&lines[..], &[(0, 7), (1, 2), (2, 9)]);
    }

    #[test]
    fn due_only_after_interval_strictly_elapsed() {
        let mut table = SlotTable::<1>::new();
        table.allocate(0, None, 100, 1_000).unwrap();
        let slot = table.get(0).unwrap();

        assert!(!slot.is_due(1_050));
        assert!(!slot.is_due(1_100));
        assert!(slot.is_due(1_101));
    }

    #[test]
    fn elapsed_survives_clock_wrap() {
        let mut table = SlotTable::<1>::new();
        table.allocate(0, None, 100, u32::MAX - 20).unwrap();
        let slot = table.get(0).unwrap();

        assert_eq!(slot.elapsed(30), 51);
        assert!(!slot.is_due(30));
        assert!(slot.is_due(80));
    }

    #[test]
    fn advance_window_adds_exactly_one_interval() {
        let mut table = SlotTable::<1>::new();
        table.allocate(0, None, 100, u32::MAX - 49).unwrap();
        let slot = table.iter_mut().next().unwrap();

        slot.advance_window();
        assert_eq!(slot.last_report_ms, 50);
    }

    #[test]
    fn resync_and_clear() {
        let mut table = SlotTable::<2>::new();
        table.allocate(0, None, 10, 5).unwrap();
        table.allocate(1, None, 20, 8).unwrap();

        table.resync(42);
        assert!(table.iter().all(|s| s.last_report_ms == 42));

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.next_index(), Some(0));
    }
}
