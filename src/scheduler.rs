//! Per-tick report scheduling.
//!
//! A slot is due once strictly more than its interval has elapsed since its window opened.
//! Draining a due slot moves its window forward by exactly one interval, so the report grid
//! keeps its phase no matter how late the poll tick runs.

use crate::codec::ReportFrame;
use crate::hal::{LineMask, LineMaskGuard};
use crate::latch::LatchBank;
use crate::slot::SlotTable;

/// Bit `i` set iff slot `i` is due at `now_ms`.
pub fn due_mask<const N: usize>(table: &SlotTable<N>, now_ms: u32) -> u8 {
    table
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_due(now_ms))
        .fold(0u8, |mask, (i, _)| mask | (1 << i))
}

/// Drain every due slot into a frame. Returns `None` when nothing is due.
pub fn drain_due<H: LineMask + ?Sized, const N: usize>(
    table: &mut SlotTable<N>,
    latches: &LatchBank<N>,
    hardware: &H,
    now_ms: u32,
) -> Option<ReportFrame<N>> {
    let mask = due_mask(table, now_ms);
    if mask == 0 {
        return None;
    }

    let mut frame = ReportFrame::new();
    for (i, slot) in table.iter_mut().enumerate() {
        if mask & (1 << i) == 0 {
            continue;
        }
        slot.advance_window();

        let Some(latch) = latches.get(i) else {
            continue;
        };
        // Unarmed slots never attached to their line; leave its mask alone.
        let value = if slot.trigger.is_some() {
            let _masked = LineMaskGuard::new(hardware, slot.line);
            latch.drain()
        } else {
            latch.drain()
        };
        slot.last_reported = value;
        frame.push(i, value);
    }
    Some(frame)
}
