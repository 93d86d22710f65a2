//! Interrupt-fed edge latches.
//!
//! # Overview
//! - One `EdgeLatch` per counter slot, grouped in a fixed-size `LatchBank`.
//! - Exactly one producer: the `EdgeHandler` bound to the slot's line at configuration time.
//! - Exactly one consumer: the report scheduler, which drains the latch to zero.
//! - Counts are `u32` and wrap on overflow.
//!
//! # Memory ordering
//! Increments are `Relaxed`; the count carries no other data. The drain is a single
//! atomic swap, so an edge landing between "read" and "zero" cannot exist: it is either
//! part of this drain or the first increment of the next window. The scheduler additionally
//! masks the slot's line around the swap (see [`crate::hal::LineMaskGuard`]) so targets that
//! emulate the swap through `portable-atomic` never interleave with the handler.
//!
//! # Static placement
//! `LatchBank::new` is `const`, so a bank can live in a `static` and hand out
//! `EdgeHandler<'static>` values to interrupt vectors.

cfg_if::cfg_if! {
    if #[cfg(feature = "portable-atomic")] {
        use portable_atomic::{AtomicU32, Ordering};
    } else {
        use core::sync::atomic::{AtomicU32, Ordering};
    }
}

/// A count written only from interrupt context and drained only from the poll loop.
#[derive(Debug)]
pub struct EdgeLatch {
    count: AtomicU32,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    #[inline(always)]
    fn increment(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Current count without draining it.
    #[inline]
    pub fn peek(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Read-and-zero in one atomic step.
    #[inline]
    pub fn drain(&self) -> u32 {
        self.count.swap(0, Ordering::AcqRel)
    }

    #[inline]
    pub(crate) fn clear(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed array of latches, indexed by slot.
pub struct LatchBank<const N: usize> {
    latches: [EdgeLatch; N],
}

impl<const N: usize> LatchBank<N> {
    pub const fn new() -> Self {
        Self {
            latches: [const { EdgeLatch::new() }; N],
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&EdgeLatch> {
        self.latches.get(slot)
    }

    /// Create the interrupt-side handle for `slot`.
    ///
    /// The handle captures only its own latch; binding it to more than one line breaks
    /// the single-producer contract.
    #[inline]
    pub fn handler(&self, slot: usize) -> Option<EdgeHandler<'_>> {
        self.latches.get(slot).map(|latch| EdgeHandler {
            latch,
            slot: slot as u8,
        })
    }
}

impl<const N: usize> Default for LatchBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle bound to one line's edge interrupt.
#[derive(Copy, Clone, Debug)]
pub struct EdgeHandler<'a> {
    latch: &'a EdgeLatch,
    slot: u8,
}

impl<'a> EdgeHandler<'a> {
    /// Record one qualifying edge. Call this from the line's interrupt handler.
    #[inline(always)]
    pub fn fire(&self) {
        self.latch.increment();
    }

    #[inline]
    pub fn slot(&self) -> u8 {
        self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::LatchBank;

    #[test]
    fn handler_counts_into_its_own_latch() {
        let bank = LatchBank::<4>::new();
        let h1 = bank.handler(1).unwrap();
        let h3 = bank.handler(3).unwrap();

        h1.fire();
        h1.fire();
        h3.fire();

        assert_eq!(h1.slot(), 1);
        assert_eq!(bank.get(0).unwrap().peek(), 0);
        assert_eq!(bank.get(1).unwrap().peek(), 2);
        assert_eq!(bank.get(3).unwrap().peek(), 1);
    }

    #[test]
    fn handler_out_of_range_is_none() {
        let bank = LatchBank::<2>::new();
        assert!(bank.handler(2).is_none());
        assert!(bank.get(2).is_none());
    }

    #[test]
    fn drain_returns_count_and_zeroes() {
        let bank = LatchBank::<1>::new();
        let h = bank.handler(0).unwrap();
        for _ in 0..37 {
            h.fire();
        }

        let latch = bank.get(0).unwrap();
        assert_eq!(latch.drain(), 37);
        assert_eq!(latch.peek(), 0);
        assert_eq!(latch.drain(), 0);
    }

    #[test]
    fn count_wraps_at_u32() {
        let bank = LatchBank::<1>::new();
        let latch = bank.get(0).unwrap();
        let h = bank.handler(0).unwrap();

        latch.count.store(u32::MAX, super::Ordering::Relaxed);
        h.fire();
        assert_eq!(latch.drain(), 0);
    }

    #[test]
    fn concurrent_drains_lose_no_edges() {
        const EDGES: u32 = 200_000;

        let bank = LatchBank::<1>::new();
        let h = bank.handler(0).unwrap();
        let latch = bank.get(0).unwrap();

        let mut drained = 0u64;
        std::thread::scope(|s| {
            let producer = s.spawn(move || {
                for _ in 0..EDGES {
                    h.fire();
                }
            });
            while !producer.is_finished() {
                drained += u64::from(latch.drain());
            }
        });
        drained += u64::from(latch.drain());

        assert_eq!(drained, u64::from(EDGES));
    }

    #[test]
    fn bank_can_be_static() {
        static BANK: LatchBank<2> = LatchBank::new();
        let h = BANK.handler(1).unwrap();
        h.fire();
        assert_eq!(BANK.get(1).unwrap().drain(), 1);
    }
}
